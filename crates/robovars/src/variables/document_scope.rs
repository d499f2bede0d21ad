//
// variables/document_scope.rs
//
// Variables visible across a document and the documents it imports
//

use super::collector::{UnresolvedVariableImport, VariablesCollector};
use super::dependency::VariableImportTarget;
use super::keyword_usage::{keyword_usages, pseudo_setter_record};
use super::local_scope::var_scope;
use super::normalize::strip_sigils;
use super::record::VariableRecord;
use super::variable_files;
use crate::context::{Cancelled, CompletionContext};
use crate::syntax::{StatementKind, TokenKind};

/// Keywords whose first argument declares a variable beyond the local scope
const DOCUMENT_SETTERS: [&str; 4] = [
    "settestvariable",
    "settaskvariable",
    "setsuitevariable",
    "setglobalvariable",
];

const DOCUMENT_VAR_SCOPES: [&str; 4] = ["TEST", "TASK", "SUITE", "GLOBAL"];

fn collect_declared(ctx: &CompletionContext<'_>, collector: &mut dyn VariablesCollector) {
    for record in ctx.get_doc_normalized_var_name_to_var_found().values() {
        if collector.accepts(&record.name) {
            collector.on_variable(record.clone());
        }
    }
}

fn collect_document_setters(
    ctx: &CompletionContext<'_>,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    ctx.check_cancelled()?;
    let path = ctx.path();
    for stmt in ctx.get_ast().statements() {
        if stmt.kind == StatementKind::Var {
            let scoped = var_scope(stmt)
                .is_some_and(|scope| DOCUMENT_VAR_SCOPES.contains(&scope.as_str()));
            if !scoped {
                continue;
            }
            let Some(token) = stmt.get_token(TokenKind::Assign) else {
                continue;
            };
            let (name, offset) = strip_sigils(&token.value);
            if name.is_empty() || !collector.accepts(name) {
                continue;
            }
            let value = stmt
                .arguments()
                .filter(|t| var_scope_cell(&t.value).is_none())
                .map(|t| t.value.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let name_token = token.with_value(name, token.col + offset);
            collector.on_variable(VariableRecord::from_token(path, name_token, value));
            continue;
        }

        for usage in keyword_usages(stmt) {
            if !DOCUMENT_SETTERS.contains(&usage.normalized_name().as_str()) {
                continue;
            }
            let record = {
                let accepts = |name: &str| collector.accepts(name);
                pseudo_setter_record(&usage, path, &accepts)
            };
            if let Some(record) = record {
                collector.on_variable(record);
            }
        }
    }
    Ok(())
}

fn var_scope_cell(value: &str) -> Option<&str> {
    let (key, scope) = value.split_once('=')?;
    key.trim().eq_ignore_ascii_case("scope").then_some(scope)
}

/// Declared variables and document-level setters of `ctx`'s document alone.
fn collect_in_document(
    ctx: &CompletionContext<'_>,
    collector: &mut dyn VariablesCollector,
) -> Result<(), Cancelled> {
    ctx.check_cancelled()?;
    collect_declared(ctx, collector);
    collect_document_setters(ctx, collector)
}

fn report_unresolved(target: &VariableImportTarget, collector: &mut dyn VariablesCollector) {
    let stmt = &target.statement;
    let path = target.importer.path().to_path_buf();
    let name_token = stmt.get_token(TokenKind::Name);
    let import_name = name_token.map_or_else(String::new, |t| t.value.clone());

    if !target.unresolved.is_empty() {
        for error in &target.unresolved {
            collector.on_unresolved_variable_import(UnresolvedVariableImport {
                path: path.clone(),
                import_name: import_name.clone(),
                start_line: error.line,
                end_line: error.line,
                start_col: error.col,
                end_col: error.end_col,
                message: Some(error.message()),
            });
        }
        return;
    }

    let (start_line, end_line, start_col, end_col) = match name_token {
        Some(token) => (token.line, token.line, token.col, token.end_col),
        None => (stmt.first_line(), stmt.last_line(), stmt.col(), stmt.end_col()),
    };
    collector.on_unresolved_variable_import(UnresolvedVariableImport {
        path,
        import_name,
        start_line,
        end_line,
        start_col,
        end_col,
        message: None,
    });
}

fn collect_static(ctx: &CompletionContext<'_>, collector: &mut dyn VariablesCollector) {
    let sources = [
        ctx.get_settings_normalized_var_name_to_var_found(),
        ctx.get_builtins_normalized_var_name_to_var_found(),
        ctx.get_arguments_files_normalized_var_name_to_var_found(),
    ];
    for source in sources {
        for record in source.values() {
            if collector.accepts(&record.name) {
                collector.on_variable(record.clone());
            }
        }
    }
}

/// Emit the variables declared in `ctx`'s document, then (unless
/// `only_current_doc`) those of imported resources, variable files and the
/// static sources.
pub fn collect_document_variables(
    ctx: &CompletionContext<'_>,
    collector: &mut dyn VariablesCollector,
    only_current_doc: bool,
) -> Result<(), Cancelled> {
    collect_in_document(ctx, collector)?;
    if only_current_doc {
        return Ok(());
    }

    let graph = ctx.collect_dependency_graph()?;
    for doc in graph.iter_dependency_docs() {
        let doc_ctx = ctx.create_copy(doc.clone());
        collect_in_document(&doc_ctx, collector)?;
    }

    let budget = ctx.config().yaml_line_search_budget;
    for target in graph.iter_all_variable_imports_as_docs() {
        ctx.check_cancelled()?;
        match &target.doc {
            Some(doc) => variable_files::load(doc, budget, collector),
            None => report_unresolved(target, collector),
        }
    }

    ctx.check_cancelled()?;
    collect_static(ctx, collector);
    Ok(())
}
