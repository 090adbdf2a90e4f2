use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a finished artifact ends up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedArtifact {
    pub file_name: String,
    pub location: PathBuf,
    pub size_bytes: usize,
    pub saved_at: DateTime<Utc>,
}

/// The "save this file" action at the end of an export.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn save(&self, file_name: &str, content: &[u8]) -> std::io::Result<SavedArtifact>;
}

/// Writes artifacts into a directory, creating it if needed and replacing
/// any earlier file of the same name.
#[derive(Debug, Clone)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactSink for DownloadDir {
    async fn save(&self, file_name: &str, content: &[u8]) -> std::io::Result<SavedArtifact> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let location = self.dir.join(file_name);
        tokio::fs::write(&location, content).await?;
        Ok(SavedArtifact {
            file_name: file_name.to_string(),
            location,
            size_bytes: content.len(),
            saved_at: Utc::now(),
        })
    }
}
