//
// context.rs
//
// Per-request completion context
//

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use crate::config::VariablesConfig;
use crate::cursor::{self, TokenInfo, VarTokenInfo};
use crate::document::RobotDocument;
use crate::syntax::{File, Section, StatementKind, Token};
use crate::variables::dependency::{self, DependencyGraph};
use crate::variables::resolve::{self, ImportResolution, UnresolvedVariable};
use crate::variables::VariableRecord;
use crate::workspace::DocumentProvider;

/// The request was cancelled by the host before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Everything a completion request needs: the document, the cursor, the
/// provider for other documents and the cancellation token.
///
/// Contexts are cheap to copy for other documents of the same request via
/// [`CompletionContext::create_copy`]; they share the token.
#[derive(Clone)]
pub struct CompletionContext<'a> {
    provider: &'a dyn DocumentProvider,
    doc: Arc<RobotDocument>,
    line: u32,
    col: u32,
    cancel: CancellationToken,
}

impl<'a> CompletionContext<'a> {
    pub fn new(
        provider: &'a dyn DocumentProvider,
        doc: Arc<RobotDocument>,
        line: u32,
        col: u32,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            doc,
            line,
            col,
            cancel,
        }
    }

    /// Context for another document of the same request, with no cursor.
    pub fn create_copy(&self, doc: Arc<RobotDocument>) -> CompletionContext<'a> {
        Self::new(self.provider, doc, 0, 0, self.cancel.clone())
    }

    pub fn provider(&self) -> &'a dyn DocumentProvider {
        self.provider
    }

    pub fn config(&self) -> &'a VariablesConfig {
        self.provider.config()
    }

    pub fn doc(&self) -> &Arc<RobotDocument> {
        &self.doc
    }

    pub fn path(&self) -> &Path {
        self.doc.path()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn get_ast(&self) -> &File {
        self.doc.ast()
    }

    pub fn get_ast_current_section(&self) -> Option<&Section> {
        self.get_ast().section_at(self.line)
    }

    pub fn get_current_token(&self) -> Option<TokenInfo<'_>> {
        cursor::token_at(self.get_ast(), self.line, self.col)
    }

    pub fn get_current_variable(&self) -> Option<VarTokenInfo> {
        cursor::variable_at(self.get_ast(), self.line, self.col)
    }

    pub fn get_doc_normalized_var_name_to_var_found(&self) -> &IndexMap<String, VariableRecord> {
        self.doc.variables()
    }

    pub fn get_settings_normalized_var_name_to_var_found(
        &self,
    ) -> &'a IndexMap<String, VariableRecord> {
        &self.provider.globals().settings
    }

    pub fn get_builtins_normalized_var_name_to_var_found(
        &self,
    ) -> &'a IndexMap<String, VariableRecord> {
        &self.provider.globals().builtins
    }

    pub fn get_arguments_files_normalized_var_name_to_var_found(
        &self,
    ) -> &'a IndexMap<String, VariableRecord> {
        &self.provider.globals().argument_files
    }

    /// Resource documents imported directly by this document, in import order.
    /// Imports that cannot be resolved are skipped.
    pub fn get_resource_imports_as_docs(&self) -> Vec<Arc<RobotDocument>> {
        let mut docs = Vec::new();
        for stmt in self.get_ast().imports(StatementKind::ResourceImport) {
            match resolve::resolve_import(self, stmt) {
                ImportResolution::Resolved(path) => match self.provider.get_document(&path) {
                    Some(doc) => docs.push(doc),
                    None => log::debug!("Resource {} could not be loaded", path.display()),
                },
                unresolved => log::debug!(
                    "Skipping resource import in {}: {:?}",
                    self.path().display(),
                    unresolved
                ),
            }
        }
        docs
    }

    pub fn collect_dependency_graph(&self) -> Result<DependencyGraph, Cancelled> {
        dependency::collect_dependency_graph(self)
    }

    /// Value of `token` with variables substituted, plus the references that
    /// could not be resolved statically.
    pub fn token_value_and_unresolved_resolving_variables(
        &self,
        token: &Token,
    ) -> (String, Vec<UnresolvedVariable>) {
        resolve::resolve_token_value(self, token)
    }
}
