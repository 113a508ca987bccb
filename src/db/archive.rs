//! Archive seam for the job collection.
//!
//! The whole collection is serialized as one JSON document under the data
//! directory. Date fields round-trip through serde/chrono, so a reloaded
//! collection comes back fully hydrated.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::job::models::Job;

pub const JOBS_FILE: &str = "jobs.json";

#[async_trait]
pub trait JobArchive: Send + Sync {
    async fn persist(&self, jobs: &[Job]) -> Result<(), String>;
    async fn load(&self) -> Result<Vec<Job>, String>;
}

/// Archive backed by a single `jobs.json` file.
pub struct FileArchive {
    path: PathBuf,
}

impl FileArchive {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(JOBS_FILE),
        }
    }
}

#[async_trait]
impl JobArchive for FileArchive {
    async fn persist(&self, jobs: &[Job]) -> Result<(), String> {
        let json = serde_json::to_vec_pretty(jobs)
            .map_err(|e| format!("Failed to serialize job collection: {e}"))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))
    }

    async fn load(&self) -> Result<Vec<Job>, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| format!("Failed to parse {}: {e}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(format!("Failed to read {}: {e}", self.path.display())),
        }
    }
}
