//
// workspace.rs
//
// Document provider: open documents plus a disk cache for closed files
//

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::config::VariablesConfig;
use crate::context::CompletionContext;
use crate::document::RobotDocument;
use crate::path_resolve::normalize_path;
use crate::variables::GlobalVariables;

/// Source of documents and shared configuration for resolution.
pub trait DocumentProvider: Send + Sync {
    /// Document at `path`, preferring open documents over disk.
    ///
    /// Open documents are authoritative: disk content is never returned for
    /// a path that is open.
    fn get_document(&self, path: &Path) -> Option<Arc<RobotDocument>>;

    fn config(&self) -> &VariablesConfig;

    fn globals(&self) -> &GlobalVariables;
}

/// Snapshot metadata for a closed file, used to determine cache validity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSnapshot {
    pub mtime: SystemTime,
    pub size: u64,
}

impl FileSnapshot {
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        Self {
            mtime: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            size: metadata.len(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedDocument {
    snapshot: FileSnapshot,
    document: Arc<RobotDocument>,
}

/// Documents known to the host, keyed by normalized path
pub struct Workspace {
    config: VariablesConfig,
    globals: GlobalVariables,
    open_documents: DashMap<PathBuf, Arc<RobotDocument>>,
    file_cache: DashMap<PathBuf, CachedDocument>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(VariablesConfig::default())
    }
}

impl Workspace {
    pub fn new(config: VariablesConfig) -> Self {
        let globals = GlobalVariables::from_config(&config);
        Self {
            config,
            globals,
            open_documents: DashMap::new(),
            file_cache: DashMap::new(),
        }
    }

    /// Open (or replace) an in-memory document.
    pub fn open_document(&self, path: &Path, text: impl Into<String>) -> Arc<RobotDocument> {
        let path = normalize_path(path);
        let document = Arc::new(RobotDocument::new(path.clone(), text));
        self.open_documents.insert(path, document.clone());
        document
    }

    pub fn close_document(&self, path: &Path) {
        self.open_documents.remove(&normalize_path(path));
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.open_documents.contains_key(&normalize_path(path))
    }

    /// Build the context of a completion request at `line` / `col` of `path`.
    pub fn completion_context(
        &self,
        path: &Path,
        line: u32,
        col: u32,
        cancel: CancellationToken,
    ) -> Option<CompletionContext<'_>> {
        let document = self.get_document(path)?;
        Some(CompletionContext::new(self, document, line, col, cancel))
    }

    fn read_from_disk(&self, path: &Path) -> Option<Arc<RobotDocument>> {
        let metadata = std::fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        let snapshot = FileSnapshot::from_metadata(&metadata);

        if let Some(cached) = self.file_cache.get(path) {
            if cached.snapshot == snapshot {
                return Some(cached.document.clone());
            }
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        log::trace!("Loaded {} from disk", path.display());
        let document = Arc::new(RobotDocument::new(path.to_path_buf(), text));
        self.file_cache.insert(
            path.to_path_buf(),
            CachedDocument {
                snapshot,
                document: document.clone(),
            },
        );
        Some(document)
    }
}

impl DocumentProvider for Workspace {
    fn get_document(&self, path: &Path) -> Option<Arc<RobotDocument>> {
        let path = normalize_path(path);
        if let Some(doc) = self.open_documents.get(&path) {
            return Some(doc.clone());
        }
        self.read_from_disk(&path)
    }

    fn config(&self) -> &VariablesConfig {
        &self.config
    }

    fn globals(&self) -> &GlobalVariables {
        &self.globals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_open_document_is_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.robot");
        fs::write(&path, "disk").unwrap();

        let workspace = Workspace::default();
        workspace.open_document(&path, "memory");
        assert_eq!(workspace.get_document(&path).unwrap().text(), "memory");
        assert!(workspace.is_open(&path));

        workspace.close_document(&path);
        assert_eq!(workspace.get_document(&path).unwrap().text(), "disk");
    }

    #[test]
    fn test_disk_cache_reuses_unchanged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.resource");
        fs::write(&path, "*** Variables ***\n").unwrap();

        let workspace = Workspace::default();
        let first = workspace.get_document(&path).unwrap();
        let second = workspace.get_document(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_disk_cache_detects_size_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.resource");
        fs::write(&path, "one").unwrap();

        let workspace = Workspace::default();
        assert_eq!(workspace.get_document(&path).unwrap().text(), "one");
        fs::write(&path, "three").unwrap();
        assert_eq!(workspace.get_document(&path).unwrap().text(), "three");
    }

    #[test]
    fn test_paths_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let path = dir.path().join("d.robot");
        fs::write(&path, "x").unwrap();

        let workspace = Workspace::default();
        let indirect = dir.path().join("sub/../d.robot");
        let doc = workspace.get_document(&indirect).unwrap();
        assert_eq!(doc.path(), path.as_path());
    }

    #[test]
    fn test_missing_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::default();
        assert!(workspace.get_document(&dir.path().join("missing.robot")).is_none());
        assert!(workspace.get_document(dir.path()).is_none());
    }
}
