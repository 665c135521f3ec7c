//! Output file writing.
//!
//! Every file in a batch is attempted; a failure is logged and does not stop
//! the remaining writes, but the batch as a whole reports an error.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use super::ExportError;

/// A fully rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Render a value as two-space indented JSON.
    pub fn json<T: Serialize + ?Sized>(
        path: impl Into<PathBuf>,
        value: &T,
    ) -> Result<Self, ExportError> {
        Ok(Self::new(path, serde_json::to_string_pretty(value)?))
    }
}

/// Write every file, awaiting each one, and report which succeeded.
pub async fn write_outputs(files: &[OutputFile]) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::with_capacity(files.len());
    let mut failed = Vec::new();

    for file in files {
        match write_one(&file.path, &file.contents).await {
            Ok(()) => {
                info!("wrote {}", file.path.display());
                written.push(file.path.clone());
            }
            Err(e) => {
                error!("Error writing file {}: {}", file.path.display(), e);
                failed.push(file.path.display().to_string());
            }
        }
    }

    if failed.is_empty() {
        Ok(written)
    } else {
        Err(ExportError::Incomplete { failed })
    }
}

async fn write_one(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_all_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            OutputFile::new(temp_dir.path().join("a.txt"), "alpha"),
            OutputFile::new(temp_dir.path().join("nested/b.txt"), "beta"),
        ];

        let written = write_outputs(&files).await.unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("nested/b.txt")).unwrap(),
            "beta"
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_sibling_writes() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be overwritten as a file.
        std::fs::create_dir(temp_dir.path().join("taken")).unwrap();

        let files = vec![
            OutputFile::new(temp_dir.path().join("taken"), "nope"),
            OutputFile::new(temp_dir.path().join("ok.txt"), "fine"),
        ];

        let result = write_outputs(&files).await;

        match result {
            Err(ExportError::Incomplete { failed }) => {
                assert_eq!(failed.len(), 1);
                assert!(failed[0].ends_with("taken"));
            }
            other => panic!("Expected Incomplete error, got {:?}", other),
        }
        assert!(temp_dir.path().join("ok.txt").exists());
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let file = OutputFile::json("x.json", &serde_json::json!({"gene": "CYP2D6"})).unwrap();
        assert_eq!(file.contents, "{\n  \"gene\": \"CYP2D6\"\n}");
    }
}
