//! Application state and job record store.
//!
//! The job collection lives in memory behind a lock, in insertion order,
//! and is write-through queued to a background worker that serializes it
//! to `jobs.json` under the data directory. Jobs are replaced wholesale
//! by id; the store never patches individual fields.

pub mod archive;
pub mod persistence;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::job::models::{Job, JobStats, JobStatus};
use crate::template::models::PdfTemplate;
use archive::{FileArchive, JobArchive};

pub struct AppState {
    pub jobs: RwLock<Vec<Job>>,
    /// Immutable after load.
    pub templates: Vec<PdfTemplate>,
    data_dir: PathBuf,
    persist_sender: mpsc::Sender<Vec<Job>>,
}

impl AppState {
    /// Load state from the data directory and spawn the persistence
    /// worker. Creates the directory layout on first run.
    pub async fn new(
        data_dir: PathBuf,
        templates: Vec<PdfTemplate>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&data_dir)?;
        let archive: Arc<dyn JobArchive> = Arc::new(FileArchive::new(&data_dir));
        Self::new_with_archive(archive, data_dir, templates).await
    }

    /// Same as `new` but with a caller-supplied archive. Used by tests to
    /// swap in an in-memory archive.
    pub async fn new_with_archive(
        archive: Arc<dyn JobArchive>,
        data_dir: PathBuf,
        templates: Vec<PdfTemplate>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(data_dir.join("uploads"))?;
        std::fs::create_dir_all(data_dir.join("documents"))?;

        let jobs = archive.load().await?;
        log::info!("Loaded {} job(s) from archive", jobs.len());

        let (persist_sender, receiver) = mpsc::channel(100);
        tokio::spawn(async move {
            persistence::start_persistence_worker(receiver, archive).await;
        });

        Ok(AppState {
            jobs: RwLock::new(jobs),
            templates,
            data_dir,
            persist_sender,
        })
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    pub fn all_jobs(&self) -> Vec<Job> {
        self.jobs.read().clone()
    }

    pub fn get_job(&self, id: &str) -> Option<Job> {
        self.jobs.read().iter().find(|j| j.id == id).cloned()
    }

    /// Insert or replace a job wholesale, keyed by id. New jobs append at
    /// the end, preserving creation order.
    pub fn save_job(&self, job: Job) {
        {
            let mut jobs = self.jobs.write();
            match jobs.iter_mut().find(|j| j.id == job.id) {
                Some(existing) => *existing = job,
                None => jobs.push(job),
            }
        }
        self.queue_persist();
    }

    pub fn delete_job(&self, id: &str) -> bool {
        let removed = {
            let mut jobs = self.jobs.write();
            let before = jobs.len();
            jobs.retain(|j| j.id != id);
            jobs.len() != before
        };
        if removed {
            self.queue_persist();
        }
        removed
    }

    pub fn stats(&self) -> JobStats {
        let jobs = self.jobs.read();
        let count = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
        JobStats {
            total: jobs.len(),
            draft: count(JobStatus::Draft),
            ready: count(JobStatus::Ready),
            submitted: count(JobStatus::Submitted),
            approved: count(JobStatus::Approved),
        }
    }

    /// Queue the current collection for background persistence. Memory
    /// stays authoritative if the queue is full.
    fn queue_persist(&self) {
        let snapshot = self.jobs.read().clone();
        if let Err(e) = self.persist_sender.try_send(snapshot) {
            log::error!("Failed to queue job collection for persistence: {e}");
        }
    }
}

/// Resolve the data directory from the environment, with a logged default.
pub fn data_dir_from_env() -> PathBuf {
    match std::env::var("MOLDTRACK_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let default = Path::new("./data");
            log::info!(
                "MOLDTRACK_DATA_DIR not set, using default path: {}",
                default.display()
            );
            default.to_path_buf()
        }
    }
}
