// src/storage/local.rs

//! Local filesystem corpus storage.
//!
//! Writes follow the temp-then-rename discipline: the new corpus is written
//! to a sibling temporary file, flushed, then renamed over the old file, so
//! a crash mid-write never loses the previous corpus.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::BookRecord;
use crate::storage::CorpusStore;

/// Corpus file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a store backed by the given corpus file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the corpus file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CorpusStore for LocalStorage {
    async fn load(&self) -> Result<Vec<BookRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No corpus found at {:?}, starting empty", self.path);
                Ok(Vec::new())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn save(&self, records: &[BookRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        self.write_bytes(&bytes).await
    }
}
