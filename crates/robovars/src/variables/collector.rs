//
// variables/collector.rs
//
// Accumulation of completion candidates from discovered variables
//

use std::path::PathBuf;

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Diagnostic, DiagnosticSeverity,
    Documentation, InsertTextFormat, Location, Position, Range, TextEdit,
};

use super::matcher::Matcher;
use super::record::VariableRecord;
use crate::cursor::{VarContext, VarTokenInfo};

/// A variable import whose target could not be determined statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedVariableImport {
    /// Document containing the import
    pub path: PathBuf,
    /// Import name as written
    pub import_name: String,
    pub start_line: u32,
    pub end_line: u32,
    pub start_col: u32,
    pub end_col: u32,
    pub message: Option<String>,
}

impl UnresolvedVariableImport {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match &self.message {
            Some(detail) => {
                format!("Unable to resolve variables import: {}{}", self.import_name, detail)
            }
            None => format!("Unable to resolve variables import: {}", self.import_name),
        };
        Diagnostic {
            range: Range::new(
                Position::new(self.start_line, self.start_col),
                Position::new(self.end_line, self.end_col),
            ),
            severity: Some(DiagnosticSeverity::WARNING),
            source: Some("robovars".to_string()),
            message,
            ..Default::default()
        }
    }
}

/// Receiver of discovered variables.
///
/// Resolvers ask `accepts` before building a record and hand accepted records
/// to `on_variable`. Implementations must not fail.
pub trait VariablesCollector {
    fn accepts(&self, name: &str) -> bool;

    fn on_variable(&mut self, record: VariableRecord);

    fn on_unresolved_variable_import(&mut self, unresolved: UnresolvedVariableImport);
}

/// A completion candidate built from an accepted variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    /// Label with `$` escaped for snippet insertion
    pub insert_text: String,
    /// Span of the partially typed name being replaced
    pub replace_span: Range,
    pub documentation: String,
    /// Where the variable is defined; `None` for static sources
    pub location: Option<Location>,
}

impl CompletionCandidate {
    pub fn to_completion_item(&self) -> CompletionItem {
        CompletionItem {
            label: self.label.clone(),
            kind: Some(CompletionItemKind::VARIABLE),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range: self.replace_span,
                new_text: self.insert_text.clone(),
            })),
            insert_text: Some(self.insert_text.clone()),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            documentation: Some(Documentation::String(self.documentation.clone())),
            data: self
                .location
                .as_ref()
                .and_then(|location| serde_json::to_value(location).ok()),
            ..Default::default()
        }
    }
}

/// Collector backing a single completion request.
pub struct CompletionCollector<M: Matcher> {
    matcher: M,
    line: u32,
    start_col: u32,
    end_col: u32,
    context: VarContext,
    candidates: Vec<CompletionCandidate>,
    unresolved_imports: Vec<UnresolvedVariableImport>,
}

impl<M: Matcher> CompletionCollector<M> {
    pub fn new(line: u32, var_token_info: &VarTokenInfo, matcher: M) -> Self {
        Self {
            matcher,
            line,
            start_col: var_token_info.token.col,
            end_col: var_token_info.token.end_col,
            context: var_token_info.context,
            candidates: Vec::new(),
            unresolved_imports: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[CompletionCandidate] {
        &self.candidates
    }

    pub fn unresolved_imports(&self) -> &[UnresolvedVariableImport] {
        &self.unresolved_imports
    }

    pub fn into_parts(self) -> (Vec<CompletionCandidate>, Vec<UnresolvedVariableImport>) {
        (self.candidates, self.unresolved_imports)
    }

    fn create_candidate(&self, record: &VariableRecord) -> CompletionCandidate {
        let label = match self.context {
            // `$name` references cannot contain spaces.
            VarContext::Expression => record.name.replace(' ', "_"),
            VarContext::Braces => record.name.clone(),
        };
        let insert_text = label.replace('$', "\\$");

        CompletionCandidate {
            label,
            insert_text,
            replace_span: Range::new(
                Position::new(self.line, self.start_col),
                Position::new(self.line, self.end_col),
            ),
            documentation: record.value_repr.clone(),
            location: record.location(),
        }
    }
}

impl<M: Matcher> VariablesCollector for CompletionCollector<M> {
    fn accepts(&self, name: &str) -> bool {
        self.matcher.accepts(name)
    }

    fn on_variable(&mut self, record: VariableRecord) {
        let candidate = self.create_candidate(&record);
        self.candidates.push(candidate);
    }

    fn on_unresolved_variable_import(&mut self, unresolved: UnresolvedVariableImport) {
        log::debug!(
            "Unresolved variables import '{}' in {} at line {}",
            unresolved.import_name,
            unresolved.path.display(),
            unresolved.start_line
        );
        self.unresolved_imports.push(unresolved);
    }
}
