//
// variables/resolve.rs
//
// Static substitution of variables in import targets
//

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::normalize::normalize_robot_name;
use crate::context::CompletionContext;
use crate::path_resolve::resolve_import_path;
use crate::syntax::{Statement, Token, TokenKind};

/// Nested document variables are followed at most this deep.
const MAX_RESOLVE_DEPTH: usize = 8;

fn variable_reference() -> &'static Regex {
    static REFERENCE: OnceLock<Regex> = OnceLock::new();
    REFERENCE.get_or_init(|| Regex::new(r"([$%])\{([^{}]*)\}").unwrap())
}

/// A `${X}` reference of a token value that has no static value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedVariable {
    /// Reference as written, e.g. `${X}`
    pub value: String,
    pub line: u32,
    pub col: u32,
    pub end_col: u32,
}

impl UnresolvedVariable {
    /// Name without sigil and braces
    pub fn bare_name(&self) -> &str {
        self.value
            .get(2..self.value.len().saturating_sub(1))
            .unwrap_or("")
    }

    /// Explanation shown to the user for an import that depends on this reference.
    pub fn message(&self) -> String {
        format!(
            "\nUnable to statically resolve variable: {}.\nPlease set the `{}` value in `robot.variables`.",
            self.value,
            self.bare_name()
        )
    }
}

/// Outcome of resolving the target of an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportResolution {
    Resolved(PathBuf),
    /// The target was computed but no such file exists
    NotFound { target: String },
    /// Some variable of the target has no static value
    Unresolved {
        target: String,
        errors: Vec<UnresolvedVariable>,
    },
    /// The import names no target
    MissingName,
}

/// Substitute every `${X}` / `%{X}` of `token` that has a static value.
pub fn resolve_token_value(
    ctx: &CompletionContext<'_>,
    token: &Token,
) -> (String, Vec<UnresolvedVariable>) {
    let mut errors = Vec::new();
    let value = substitute(ctx, &token.value, 0, &mut |start: usize, end: usize, reference: &str| {
        let prefix_cols = token.value[..start].encode_utf16().count() as u32;
        let len_cols = token.value[start..end].encode_utf16().count() as u32;
        errors.push(UnresolvedVariable {
            value: reference.to_string(),
            line: token.line,
            col: token.col + prefix_cols,
            end_col: token.col + prefix_cols + len_cols,
        });
    });
    (value, errors)
}

fn substitute(
    ctx: &CompletionContext<'_>,
    text: &str,
    depth: usize,
    on_unresolved: &mut dyn FnMut(usize, usize, &str),
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in variable_reference().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        // `\${X}` is an escaped literal
        if text[..whole.start()].ends_with('\\') {
            continue;
        }
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        let name = &caps[2];
        let resolved = if &caps[1] == "%" {
            std::env::var(name).ok()
        } else {
            lookup_variable(ctx, name, depth)
        };
        match resolved {
            Some(value) => out.push_str(&value),
            None => {
                on_unresolved(whole.start(), whole.end(), whole.as_str());
                out.push_str(whole.as_str());
            }
        }
    }
    out.push_str(&text[last..]);
    out
}

fn lookup_variable(ctx: &CompletionContext<'_>, name: &str, depth: usize) -> Option<String> {
    match name {
        "CURDIR" => return Some(ctx.doc().dir().display().to_string()),
        "EXECDIR" => return ctx.config().exec_dir().map(|p| p.display().to_string()),
        "/" => return Some(std::path::MAIN_SEPARATOR.to_string()),
        ":" => return Some(if cfg!(windows) { ";" } else { ":" }.to_string()),
        "SPACE" => return Some(" ".to_string()),
        _ => {}
    }

    let normalized = normalize_robot_name(name);
    if let Some(record) = ctx
        .get_settings_normalized_var_name_to_var_found()
        .get(&normalized)
        .or_else(|| ctx.get_arguments_files_normalized_var_name_to_var_found().get(&normalized))
    {
        return Some(record.value_repr.clone());
    }

    if depth >= MAX_RESOLVE_DEPTH {
        return None;
    }
    let record = ctx.get_doc_normalized_var_name_to_var_found().get(&normalized)?;
    let mut nested_failed = false;
    let value = substitute(ctx, &record.value_repr, depth + 1, &mut |_: usize, _: usize, _: &str| {
        nested_failed = true;
    });
    (!nested_failed).then_some(value)
}

/// Resolve the target of a `Resource` or `Variables` import of `ctx`'s document.
pub fn resolve_import(ctx: &CompletionContext<'_>, stmt: &Statement) -> ImportResolution {
    let Some(name_token) = stmt.get_token(TokenKind::Name) else {
        return ImportResolution::MissingName;
    };
    let (target, errors) = resolve_token_value(ctx, name_token);
    if !errors.is_empty() {
        return ImportResolution::Unresolved { target, errors };
    }

    let search_path = &ctx.config().python_path;
    let base_dir = ctx.doc().dir();
    // Open documents count even when they were never saved
    let exists = |path: &Path| ctx.provider().get_document(path).is_some();
    if let Some(path) = resolve_import_path(&target, base_dir, search_path, exists) {
        return ImportResolution::Resolved(path);
    }
    // A variables import may name a Python module
    let is_file_name = [".py", ".yaml", ".yml"].iter().any(|ext| target.ends_with(ext));
    if !is_file_name && !target.contains(['/', '\\']) {
        let module = format!("{}.py", target.replace('.', "/"));
        if let Some(path) = resolve_import_path(&module, base_dir, search_path, exists) {
            return ImportResolution::Resolved(path);
        }
    }
    ImportResolution::NotFound { target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VariablesConfig;
    use crate::syntax::StatementKind;
    use crate::workspace::Workspace;
    use std::fs;
    use tokio_util::sync::CancellationToken;

    fn first_import(ctx: &CompletionContext<'_>, kind: StatementKind) -> Statement {
        ctx.get_ast().imports(kind)[0].clone()
    }

    #[test]
    fn test_resolves_curdir_settings_and_document_variables() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("env")).unwrap();
        fs::write(dir.path().join("env/qa.yaml"), "A: 1\n").unwrap();

        let mut config = VariablesConfig::default();
        config.variables.insert("ENV".to_string(), "qa".to_string());
        let workspace = Workspace::new(config);
        let main = dir.path().join("main.robot");
        workspace.open_document(
            &main,
            "*** Settings ***\nVariables    ${CURDIR}${/}${SUB}/${ENV}.yaml\n\n*** Variables ***\n${SUB}    env\n",
        );
        let ctx = workspace
            .completion_context(&main, 0, 0, CancellationToken::new())
            .unwrap();
        let stmt = first_import(&ctx, StatementKind::VariablesImport);
        assert_eq!(
            resolve_import(&ctx, &stmt),
            ImportResolution::Resolved(dir.path().join("env/qa.yaml"))
        );
    }

    #[test]
    fn test_unresolved_reference_positions() {
        let workspace = Workspace::default();
        let main = Path::new("/ws/main.robot");
        workspace.open_document(main, "*** Settings ***\nVariables    ${ROOT}/vars.yaml\n");
        let ctx = workspace
            .completion_context(main, 0, 0, CancellationToken::new())
            .unwrap();
        let stmt = first_import(&ctx, StatementKind::VariablesImport);
        match resolve_import(&ctx, &stmt) {
            ImportResolution::Unresolved { target, errors } => {
                assert_eq!(target, "${ROOT}/vars.yaml");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].value, "${ROOT}");
                assert_eq!((errors[0].line, errors[0].col, errors[0].end_col), (1, 13, 20));
                assert_eq!(
                    errors[0].message(),
                    "\nUnable to statically resolve variable: ${ROOT}.\nPlease set the `ROOT` value in `robot.variables`."
                );
            }
            other => panic!("unexpected resolution {:?}", other),
        }
    }

    #[test]
    fn test_document_variable_depending_on_unknown_is_unresolved() {
        let workspace = Workspace::default();
        let main = Path::new("/ws/main.robot");
        workspace.open_document(
            main,
            "*** Settings ***\nResource    ${A}.resource\n*** Variables ***\n${A}    ${B}\n${B}    ${A}\n",
        );
        let ctx = workspace
            .completion_context(main, 0, 0, CancellationToken::new())
            .unwrap();
        let stmt = first_import(&ctx, StatementKind::ResourceImport);
        assert!(matches!(
            resolve_import(&ctx, &stmt),
            ImportResolution::Unresolved { .. }
        ));
    }

    #[test]
    fn test_missing_file_and_missing_name() {
        let workspace = Workspace::default();
        let main = Path::new("/ws/main.robot");
        workspace.open_document(main, "*** Settings ***\nVariables    nothing.yaml\nVariables\n");
        let ctx = workspace
            .completion_context(main, 0, 0, CancellationToken::new())
            .unwrap();
        let imports = ctx.get_ast().imports(StatementKind::VariablesImport);
        assert_eq!(
            resolve_import(&ctx, imports[0]),
            ImportResolution::NotFound {
                target: "nothing.yaml".to_string()
            }
        );
        assert_eq!(resolve_import(&ctx, imports[1]), ImportResolution::MissingName);
    }

    #[test]
    fn test_python_module_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/settings.py"), "A = 1\n").unwrap();

        let workspace = Workspace::default();
        let main = dir.path().join("main.robot");
        workspace.open_document(&main, "*** Settings ***\nVariables    pkg.settings\n");
        let ctx = workspace
            .completion_context(&main, 0, 0, CancellationToken::new())
            .unwrap();
        let stmt = first_import(&ctx, StatementKind::VariablesImport);
        assert_eq!(
            resolve_import(&ctx, &stmt),
            ImportResolution::Resolved(dir.path().join("pkg/settings.py"))
        );
    }
}
