// src/output/writer.rs
//! Document sinks: the only place where output I/O happens.

use super::paths::display_relative;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Destination for rendered documents.
///
/// Paths are relative to the sink's root. Writing an existing path
/// overwrites it.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn write(&self, relative_path: &Path, contents: &str) -> Result<(), AppError>;
}

/// Writes documents under a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentSink for FileSystemSink {
    async fn write(&self, relative_path: &Path, contents: &str) -> Result<(), AppError> {
        let path = self.root.join(relative_path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        log::debug!("Writing {} bytes to {}", contents.len(), path.display());
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }
}

/// Keeps documents in memory, keyed by forward-slash relative path.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<BTreeMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, ordered by path.
    pub async fn documents(&self) -> BTreeMap<String, String> {
        self.documents.lock().await.clone()
    }

    pub async fn get(&self, relative_path: &str) -> Option<String> {
        self.documents.lock().await.get(relative_path).cloned()
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn write(&self, relative_path: &Path, contents: &str) -> Result<(), AppError> {
        self.documents
            .lock()
            .await
            .insert(display_relative(relative_path), contents.to_string());
        Ok(())
    }
}
