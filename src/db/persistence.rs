//! Background persistence worker for the job collection.
//!
//! Receives collection snapshots via channel and writes them through the
//! archive seam, debouncing to batch rapid successive saves.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::archive::JobArchive;
use crate::job::models::Job;

const DEBOUNCE_MS: u64 = 500;

/// Starts the background persistence worker.
///
/// Each received snapshot supersedes anything still queued; the latest
/// one wins and is written after a short debounce window.
pub async fn start_persistence_worker(
    mut receiver: mpsc::Receiver<Vec<Job>>,
    archive: Arc<dyn JobArchive>,
) {
    log::info!("Job persistence worker started");

    while let Some(jobs) = receiver.recv().await {
        // Debounce: drain any pending snapshots to get the latest
        let mut latest = jobs;
        while let Ok(newer) = receiver.try_recv() {
            log::debug!("Batching pending job snapshot");
            latest = newer;
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(DEBOUNCE_MS)).await;

        // Drain again after the delay to capture writes during the wait
        while let Ok(newer) = receiver.try_recv() {
            log::debug!("Batching job snapshot after debounce delay");
            latest = newer;
        }

        match archive.persist(&latest).await {
            Ok(()) => log::info!("Job collection persisted ({} jobs)", latest.len()),
            Err(e) => log::error!("Failed to persist job collection: {e}"),
        }
    }

    log::info!("Job persistence worker stopped");
}
