//! Types for the scanner module.

use std::path::PathBuf;

/// Video extensions matched by default, lowercase without the dot.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "m4v", "wmv", "flv", "ts", "webm", "mpg", "mpeg", "m2v", "mp2",
    "m2p", "mpe", "3gp", "3g2", "mxf", "rm", "rmvb", "asf", "vob", "divx", "y4m", "ogv", "ogg",
    "drc", "gifv", "mts", "m2ts", "f4v",
];

/// A candidate input file discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
}

impl SourceFile {
    /// File name component, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
