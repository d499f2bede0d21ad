//
// variables/dependency.rs
//
// Resource and variable import graph of a document
//

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use super::resolve::{resolve_import, ImportResolution, UnresolvedVariable};
use crate::context::{Cancelled, CompletionContext};
use crate::document::RobotDocument;
use crate::path_resolve::normalize_path;
use crate::perf::TimingGuard;
use crate::syntax::{Statement, StatementKind};

/// Name of the suite initialization file
const INIT_FILE: &str = "__init__.robot";

/// A `Variables` import reachable from the root document
#[derive(Debug, Clone)]
pub struct VariableImportTarget {
    /// Document containing the import
    pub importer: Arc<RobotDocument>,
    pub statement: Statement,
    /// Loaded target; `None` when it cannot be determined statically
    pub doc: Option<Arc<RobotDocument>>,
    /// References of the import name without a static value
    pub unresolved: Vec<UnresolvedVariable>,
}

/// Documents reachable from a root document through imports.
///
/// Every document appears once regardless of how many import paths reach it.
#[derive(Debug)]
pub struct DependencyGraph {
    /// Root first, then resource documents in breadth-first order
    docs: Vec<Arc<RobotDocument>>,
    variable_imports: Vec<VariableImportTarget>,
}

impl DependencyGraph {
    /// Resource documents (and the suite init file) excluding the root.
    pub fn iter_dependency_docs(&self) -> impl Iterator<Item = &Arc<RobotDocument>> {
        self.docs.iter().skip(1)
    }

    /// Paths of every visited document, root included.
    pub fn visited(&self) -> Vec<PathBuf> {
        self.docs.iter().map(|d| d.path().to_path_buf()).collect()
    }

    pub fn iter_all_variable_imports_as_docs(&self) -> impl Iterator<Item = &VariableImportTarget> {
        self.variable_imports.iter()
    }
}

/// Walk the resource imports of `ctx`'s document breadth-first.
pub fn collect_dependency_graph(ctx: &CompletionContext<'_>) -> Result<DependencyGraph, Cancelled> {
    let _timing = TimingGuard::with_threshold("collect_dependency_graph", 100);
    let root = ctx.doc().clone();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    visited.insert(normalize_path(root.path()));

    let mut docs = vec![root.clone()];
    let mut queue = VecDeque::from([root.clone()]);

    let init_path = root.dir().join(INIT_FILE);
    if !visited.contains(&init_path) {
        if let Some(init) = ctx.provider().get_document(&init_path) {
            visited.insert(normalize_path(init.path()));
            docs.push(init.clone());
            queue.push_back(init);
        }
    }

    let mut seen_variable_files: HashSet<PathBuf> = HashSet::new();
    let mut variable_imports = Vec::new();

    while let Some(doc) = queue.pop_front() {
        ctx.check_cancelled()?;
        log::trace!("Collecting imports of {}", doc.path().display());
        let doc_ctx = ctx.create_copy(doc.clone());

        for resource in doc_ctx.get_resource_imports_as_docs() {
            if visited.insert(normalize_path(resource.path())) {
                docs.push(resource.clone());
                queue.push_back(resource);
            }
        }

        let is_root = Arc::ptr_eq(&doc, &root);
        for stmt in doc.ast().imports(StatementKind::VariablesImport) {
            let unresolved = match resolve_import(&doc_ctx, stmt) {
                ImportResolution::Resolved(path) => {
                    if !seen_variable_files.insert(path.clone()) {
                        continue;
                    }
                    match ctx.provider().get_document(&path) {
                        Some(target) => {
                            variable_imports.push(VariableImportTarget {
                                importer: doc.clone(),
                                statement: stmt.clone(),
                                doc: Some(target),
                                unresolved: Vec::new(),
                            });
                            continue;
                        }
                        None => Vec::new(),
                    }
                }
                ImportResolution::Unresolved { errors, .. } => errors,
                ImportResolution::NotFound { .. } | ImportResolution::MissingName => Vec::new(),
            };

            // Only the root document's unresolved imports are reported.
            if is_root {
                variable_imports.push(VariableImportTarget {
                    importer: doc.clone(),
                    statement: stmt.clone(),
                    doc: None,
                    unresolved,
                });
            } else {
                log::debug!(
                    "Skipping unresolved variables import in {}",
                    doc.path().display()
                );
            }
        }
    }

    Ok(DependencyGraph {
        docs,
        variable_imports,
    })
}
