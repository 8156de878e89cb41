//! Directory scanner producing candidate video files.
//!
//! Walks an input root, matching files against a case-insensitive
//! extension filter. Results are sorted lexically by path so a scan is
//! deterministic for a given tree.

mod types;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

pub use types::{SourceFile, DEFAULT_VIDEO_EXTENSIONS};

/// Errors raised while scanning the input root.
///
/// All of these abort the batch before any job starts.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("input root not found: {path}")]
    RootNotFound { path: String },

    /// The scan root is not a directory.
    #[error("input root is not a directory: {path}")]
    NotADirectory { path: String },

    /// The root could not be read.
    #[error("failed to read input root: {0}")]
    Io(#[from] std::io::Error),
}

/// Scans `root` for files whose extension is in `extensions`.
///
/// With `recursive` set, all descendants are considered; otherwise only
/// direct children. Symlinks are not followed. The extension filter must
/// hold lowercase extensions without the leading dot.
pub fn scan(
    root: &Path,
    recursive: bool,
    extensions: &HashSet<String>,
) -> Result<Vec<SourceFile>, ScanError> {
    let meta = std::fs::metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScanError::RootNotFound {
                path: root.display().to_string(),
            }
        } else {
            ScanError::Io(e)
        }
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.display().to_string(),
        });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e.to_lowercase()))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_path_buf();
        debug!(path = %path.display(), "matched video file");
        files.push(SourceFile {
            path: path.to_path_buf(),
            relative_path,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Builds a lowercase extension set from an iterator of extension strings.
///
/// Leading dots and mixed case are tolerated.
pub fn extension_set<I, S>(extensions: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn exts(list: &[&str]) -> HashSet<String> {
        extension_set(list.iter().copied())
    }

    #[test]
    fn test_scan_non_recursive_only_direct_children() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.mp4");
        touch(&dir, "b.txt");
        touch(&dir, "sub/c.mp4");

        let files = scan(dir.path(), false, &exts(&["mp4"])).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, Path::new("a.mp4"));
    }

    #[test]
    fn test_scan_recursive_finds_descendants() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.mp4");
        touch(&dir, "sub/b.mov");
        touch(&dir, "sub/deep/c.mkv");
        touch(&dir, "sub/skip.txt");

        let files = scan(dir.path(), true, &exts(&["mp4", "mov", "mkv"])).unwrap();
        assert_eq!(files.len(), 3);
        let rels: Vec<_> = files.iter().map(|f| f.relative_path.clone()).collect();
        assert!(rels.contains(&"sub/b.mov".into()));
        assert!(rels.contains(&"sub/deep/c.mkv".into()));
    }

    #[test]
    fn test_scan_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "upper.MP4");
        touch(&dir, "mixed.Mov");

        let files = scan(dir.path(), false, &exts(&["mp4", "mov"])).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_scan_order_is_deterministic() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "z.mp4");
        touch(&dir, "a.mp4");
        touch(&dir, "m.mp4");

        let files = scan(dir.path(), false, &exts(&["mp4"])).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a.mp4", "m.mp4", "z.mp4"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let result = scan(Path::new("/nonexistent/root"), true, &exts(&["mp4"]));
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn test_scan_root_is_file() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.mp4");
        let result = scan(&dir.path().join("a.mp4"), true, &exts(&["mp4"]));
        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }

    #[test]
    fn test_extension_set_normalizes() {
        let set = extension_set([".MP4", "mov", ".Mkv", ""]);
        assert!(set.contains("mp4"));
        assert!(set.contains("mov"));
        assert!(set.contains("mkv"));
        assert_eq!(set.len(), 3);
    }
}
