// src/core/fs_ops.rs
//! File system helpers for reading uploads and saving exports

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Save a downloaded or locally built payload as `dir/file_name`,
    /// creating `dir` when needed. Returns the written path.
    pub async fn save_download(dir: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        Self::ensure_dir_exists(dir).await?;

        let path = dir.join(file_name);
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_download_creates_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("nested").join("exports");

        let path = FsOps::save_download(&dir, "resume.json", b"{}")
            .await
            .expect("save");

        assert_eq!(path, dir.join("resume.json"));
        assert_eq!(FsOps::read_file_safe(&path).await.expect("read"), "{}");
    }

    #[tokio::test]
    async fn test_read_missing_file_errors() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = FsOps::read_bytes(&tmp.path().join("nope.pdf"))
            .await
            .expect_err("missing file");
        assert!(err.to_string().contains("Failed to read file"));
    }
}
