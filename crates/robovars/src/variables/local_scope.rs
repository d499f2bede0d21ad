//
// variables/local_scope.rs
//
// Variables local to the keyword or test case around the cursor
//

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::collector::VariablesCollector;
use super::keyword_usage::{keyword_usages, pseudo_setter_record};
use super::normalize::{strip_assign_marker, strip_sigils};
use super::record::VariableRecord;
use crate::context::{Cancelled, CompletionContext};
use crate::cursor::VarTokenInfo;
use crate::syntax::{Block, BlockKind, Section, Statement, StatementKind, Token, TokenKind};

fn embedded_argument() -> &'static Regex {
    static EMBEDDED: OnceLock<Regex> = OnceLock::new();
    EMBEDDED.get_or_init(|| Regex::new(r"\$\{([^}:]+)(?::[^}]*)?\}").unwrap())
}

/// Node whose statements delimit the local scope
#[derive(Debug, Clone, Copy)]
pub enum ScopeNode<'a> {
    Block(&'a Block),
    Section(&'a Section),
}

impl<'a> ScopeNode<'a> {
    pub fn statements(&self) -> Vec<&'a Statement> {
        match *self {
            ScopeNode::Block(block) => block.statements(),
            ScopeNode::Section(section) => section.statements(),
        }
    }
}

/// Innermost keyword or test case around the cursor, else the outermost
/// enclosing block, else the current section.
pub fn enclosing_scope<'c>(ctx: &'c CompletionContext<'_>) -> Option<ScopeNode<'c>> {
    let stack = ctx.get_ast().block_stack_at(ctx.line());
    if let Some(block) = stack.iter().rev().copied().find(|b| b.kind.is_definition()) {
        return Some(ScopeNode::Block(block));
    }
    if let Some(block) = stack.first().copied() {
        return Some(ScopeNode::Block(block));
    }
    ctx.get_ast_current_section().map(ScopeNode::Section)
}

/// Record for a declaring token whose value still carries sigils.
fn declared(path: &Path, token: &Token, value_repr: String) -> Option<VariableRecord> {
    let raw = strip_assign_marker(&token.value);
    let (name, offset) = strip_sigils(raw);
    if name.is_empty() {
        return None;
    }
    let name_token = token.with_value(name, token.col + offset);
    Some(VariableRecord::from_token(path, name_token, value_repr))
}

/// `scope=` argument of a `VAR` statement, uppercased; `None` when absent.
pub fn var_scope(stmt: &Statement) -> Option<String> {
    stmt.arguments().find_map(|t| {
        let (key, value) = t.value.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("scope")
            .then(|| value.trim().to_uppercase())
    })
}

/// Assigned tokens: keyword-call targets, loop variables and local `VAR`s.
fn assign_tokens(stmt: &Statement) -> Vec<&Token> {
    match stmt.kind {
        StatementKind::KeywordCall | StatementKind::ForHeader => {
            stmt.tokens_of(TokenKind::Assign).collect()
        }
        StatementKind::Var => match var_scope(stmt).as_deref() {
            None | Some("LOCAL") => stmt.tokens_of(TokenKind::Assign).collect(),
            Some(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn collect_assigns(
    ctx: &CompletionContext<'_>,
    scope: ScopeNode<'_>,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    let path = ctx.path();
    for stmt in scope.statements() {
        for token in assign_tokens(stmt) {
            ctx.check_cancelled()?;
            let (name, _) = strip_sigils(strip_assign_marker(&token.value));
            if !collector.accepts(name) {
                continue;
            }
            if let Some(record) = declared(path, token, stmt.text()) {
                collector.on_variable(record);
            }
        }
    }
    Ok(())
}

/// Argument tokens of a keyword: `[Arguments]` cells and embedded `${name}`
/// parts of the keyword name.
fn argument_tokens(block: &Block) -> Vec<Token> {
    let mut tokens = Vec::new();

    if block.kind == BlockKind::Keyword {
        if let Some(name) = &block.name {
            for caps in embedded_argument().captures_iter(&name.value) {
                let Some(arg) = caps.get(1) else {
                    continue;
                };
                let prefix = name.value[..arg.start()].encode_utf16().count() as u32;
                tokens.push(Token::new(
                    TokenKind::Argument,
                    arg.as_str().trim(),
                    name.line,
                    name.col + prefix,
                ));
            }
        }
    }

    for stmt in block.statements() {
        if stmt.kind != StatementKind::Arguments {
            continue;
        }
        for token in stmt.arguments() {
            // `${arg}=default`
            let declaration = match token.value.find("}=") {
                Some(idx) => &token.value[..=idx],
                None => token.value.as_str(),
            };
            let (name, offset) = strip_sigils(declaration);
            if !name.is_empty() {
                tokens.push(token.with_value(name, token.col + offset));
            }
        }
    }
    tokens
}

fn collect_arguments(
    ctx: &CompletionContext<'_>,
    scope: ScopeNode<'_>,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    ctx.check_cancelled()?;
    let ScopeNode::Block(block) = scope else {
        return Ok(());
    };
    for token in argument_tokens(block) {
        if collector.accepts(&token.value) {
            collector.on_variable(VariableRecord::argument(ctx.path(), token));
        }
    }
    Ok(())
}

fn collect_local_setters(
    ctx: &CompletionContext<'_>,
    scope: ScopeNode<'_>,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    ctx.check_cancelled()?;
    for stmt in scope.statements() {
        for usage in keyword_usages(stmt) {
            if usage.normalized_name() != "setlocalvariable" {
                continue;
            }
            let record = {
                let accepts = |name: &str| collector.accepts(name);
                pseudo_setter_record(&usage, ctx.path(), &accepts)
            };
            if let Some(record) = record {
                collector.on_variable(record);
            }
        }
    }
    Ok(())
}

/// Emit the variables local to the cursor's keyword or test case:
/// assignments, then arguments, then `Set Local Variable` calls.
pub fn collect_local_variables(
    ctx: &CompletionContext<'_>,
    var_token_info: &VarTokenInfo,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    ctx.check_cancelled()?;
    log::trace!(
        "Collecting local variables for '{}' at line {}",
        var_token_info.token.value,
        ctx.line()
    );
    let Some(scope) = enclosing_scope(ctx) else {
        return Ok(());
    };
    collect_assigns(ctx, scope, collector)?;
    collect_arguments(ctx, scope, collector)?;
    collect_local_setters(ctx, scope, collector)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;
    use crate::variables::collector::UnresolvedVariableImport;
    use crate::workspace::Workspace;
    use tokio_util::sync::CancellationToken;

    #[derive(Default)]
    struct Names(Vec<(String, String)>);

    impl VariablesCollector for Names {
        fn accepts(&self, _name: &str) -> bool {
            true
        }
        fn on_variable(&mut self, record: VariableRecord) {
            self.0.push((record.name, record.value_repr));
        }
        fn on_unresolved_variable_import(&mut self, _: UnresolvedVariableImport) {}
    }

    const SOURCE: &str = "\
*** Keywords ***
Open ${page:\\w+} Page
    [Arguments]    ${user}    ${retries}=3    @{rest}
    ${result}    ${status}=    Run Keyword And Ignore Error    Login    ${user}
    FOR    ${item}    IN    @{rest}
        VAR    ${inner}    x
        VAR    ${suite_wide}    y    scope=SUITE
        Set Local Variable    ${from_setter}    z
    END
    Log    ${

Other
    ${sibling}=    Set Variable    1
    Log    ${
";

    fn collect_at(line: u32, col: u32) -> Vec<(String, String)> {
        let workspace = Workspace::default();
        let doc = workspace.open_document(Path::new("/ws/kw.resource"), SOURCE);
        let ctx = CompletionContext::new(&workspace, doc, line, col, CancellationToken::new());
        let info = ctx.get_current_variable().unwrap();
        let mut names = Names::default();
        collect_local_variables(&ctx, &info, &mut names).unwrap();
        names.0
    }

    #[test]
    fn test_locals_in_order() {
        let found = collect_at(9, 13);
        let names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "result",
                "status",
                "item",
                "inner",
                "page",
                "user",
                "retries",
                "rest",
                "from_setter",
            ]
        );
    }

    #[test]
    fn test_assign_value_is_statement_text() {
        let found = collect_at(9, 13);
        assert_eq!(
            found[0].1,
            "${result} ${status}= Run Keyword And Ignore Error Login ${user}"
        );
        let setter = found.iter().find(|(n, _)| n == "from_setter").unwrap();
        assert_eq!(setter.1, "z");
    }

    #[test]
    fn test_sibling_keyword_locals_not_visible() {
        let found = collect_at(13, 13);
        let names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["sibling"]);
    }

    #[test]
    fn test_var_scope() {
        let file = parse(
            "*** Test Cases ***\nT\n    VAR    ${a}    1    scope=Suite\n    VAR    ${b}    2\n",
        );
        let statements = file.statements();
        assert_eq!(var_scope(statements[0]).as_deref(), Some("SUITE"));
        assert_eq!(var_scope(statements[1]), None);
    }

    #[test]
    fn test_cancelled() {
        let workspace = Workspace::default();
        let doc = workspace.open_document(Path::new("/ws/kw.resource"), SOURCE);
        let cancel = CancellationToken::new();
        let ctx = CompletionContext::new(&workspace, doc, 9, 13, cancel.clone());
        let info = ctx.get_current_variable().unwrap();
        cancel.cancel();
        let mut names = Names::default();
        assert_eq!(
            collect_local_variables(&ctx, &info, &mut names),
            Err(Cancelled)
        );
        assert!(names.0.is_empty());
    }
}
