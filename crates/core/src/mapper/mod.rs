//! Output path mapping.
//!
//! Computes where a converted file lands: the source's position relative
//! to the input root, mirrored under the output root, with the extension
//! swapped for the target format's.

use std::path::{Path, PathBuf};

use crate::converter::AudioFormat;
use crate::scanner::SourceFile;

/// Maps a source file to its destination under `output_root`.
pub fn map_output_path(source: &SourceFile, output_root: &Path, format: AudioFormat) -> PathBuf {
    output_root
        .join(&source.relative_path)
        .with_extension(format.extension())
}

/// Creates the destination's parent directories.
///
/// Idempotent: succeeds when the directories already exist.
pub async fn prepare_destination(destination: &Path) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source(rel: &str) -> SourceFile {
        SourceFile {
            path: Path::new("/videos").join(rel),
            relative_path: PathBuf::from(rel),
        }
    }

    #[test]
    fn test_map_mirrors_relative_path() {
        let dest = map_output_path(&source("a/b/video.mp4"), Path::new("/out"), AudioFormat::Wav);
        assert_eq!(dest, PathBuf::from("/out/a/b/video.wav"));
    }

    #[test]
    fn test_map_flat_file() {
        let dest = map_output_path(&source("clip.mkv"), Path::new("/out"), AudioFormat::Mp3);
        assert_eq!(dest, PathBuf::from("/out/clip.mp3"));
    }

    #[test]
    fn test_map_wav_voice_uses_wav_extension() {
        let dest = map_output_path(&source("talk.mp4"), Path::new("/out"), AudioFormat::WavVoice);
        assert_eq!(dest, PathBuf::from("/out/talk.wav"));
    }

    #[tokio::test]
    async fn test_prepare_destination_creates_parents() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("a/b/c.wav");
        prepare_destination(&dest).await.unwrap();
        assert!(dest.parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn test_prepare_destination_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("x/y.wav");
        prepare_destination(&dest).await.unwrap();
        prepare_destination(&dest).await.unwrap();
        assert!(dest.parent().unwrap().is_dir());
    }
}
