//
// path_resolve.rs
//
// Path resolution for resource and variable imports
//

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, removing `.` and resolving `..` without
/// touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                // Preserve RootDir and Prefix components
                if let Some(last) = components.last() {
                    if matches!(last, Component::Normal(_)) {
                        components.pop();
                    }
                }
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    let mut result = PathBuf::new();
    for c in components {
        result.push(c);
    }
    result
}

/// Resolve an import target whose variables have already been substituted.
///
/// Absolute paths are used as-is. Relative paths are tried against
/// `base_dir` first and then against each `search_path` entry. Returns the
/// first normalized candidate accepted by `exists`.
pub fn resolve_import_path<F>(
    target: &str,
    base_dir: &Path,
    search_path: &[PathBuf],
    exists: F,
) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    let candidate = Path::new(target);
    if candidate.is_absolute() {
        let normalized = normalize_path(candidate);
        return exists(&normalized).then_some(normalized);
    }

    std::iter::once(base_dir)
        .chain(search_path.iter().map(PathBuf::as_path))
        .map(|dir| normalize_path(&dir.join(candidate)))
        .find(|path| exists(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/ws/suite/../res/./common.resource")),
            PathBuf::from("/ws/res/common.resource")
        );
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("res")).unwrap();
        fs::write(dir.path().join("res/vars.yaml"), "A: 1\n").unwrap();

        let resolved = resolve_import_path("res/vars.yaml", dir.path(), &[], Path::is_file);
        assert_eq!(resolved, Some(dir.path().join("res/vars.yaml")));
    }

    #[test]
    fn test_resolve_falls_back_to_search_path() {
        let base = tempfile::tempdir().unwrap();
        let libs = tempfile::tempdir().unwrap();
        fs::write(libs.path().join("settings.py"), "A = 1\n").unwrap();

        let search_path = [libs.path().to_path_buf()];
        let resolved = resolve_import_path("settings.py", base.path(), &search_path, Path::is_file);
        assert_eq!(resolved, Some(libs.path().join("settings.py")));
    }

    #[test]
    fn test_missing_target() {
        let base = tempfile::tempdir().unwrap();
        assert!(resolve_import_path("missing.resource", base.path(), &[], Path::is_file).is_none());
        assert!(resolve_import_path("  ", base.path(), &[], |_: &Path| true).is_none());
    }

    #[test]
    fn test_existence_check_is_pluggable() {
        let known = PathBuf::from("/ws/res/common.resource");
        let base = Path::new("/ws/suite");
        let resolved =
            resolve_import_path("../res/common.resource", base, &[], |p| p == known.as_path());
        assert_eq!(resolved, Some(known));
    }
}
