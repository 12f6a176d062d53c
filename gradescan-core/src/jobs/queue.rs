use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use futures::future;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    consts::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WORKER_COUNT},
    jobs::store::{SheetResult, SheetStore},
    ocr::provider::OcrProvider,
    pipeline::processor::{ProviderMode, SheetConfig, SheetProcessor},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One queued sheet: the scanned image plus everything needed to grade
/// it. Jobs are independent units of work; nothing is shared between
/// two in-flight sheets.
#[derive(Clone, Debug)]
pub struct SheetJob {
    pub id: Uuid,
    pub sheet_id: String,
    pub image: Bytes,
    pub sheet: SheetConfig,
    pub mode: ProviderMode,
}

impl SheetJob {
    pub fn new(
        sheet_id: impl Into<String>,
        image: Bytes,
        sheet: SheetConfig,
        mode: ProviderMode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sheet_id: sheet_id.into(),
            image,
            sheet,
            mode,
        }
    }
}

/// Terminal state of one job after the queue is done with it.
#[derive(Clone, Debug)]
pub struct JobReport {
    pub id: Uuid,
    pub sheet_id: String,
    pub status: JobStatus,
    pub attempts: u32,
    pub error: Option<String>,
}

/// Fixed-size worker pool processing queued grade sheets.
///
/// Failure handling is whole-job: a provider error retries the entire
/// per-sheet pipeline up to `max_attempts` (the pipeline stages are pure
/// and deterministic, so partial retries would buy nothing). Each job
/// ends with exactly one store write, the completed grade list or a
/// failure message.
pub struct JobQueue<P: OcrProvider, S: SheetStore> {
    processor: Arc<SheetProcessor<P>>,
    store: Arc<S>,
    workers: usize,
    max_attempts: u32,
}

impl<P, S> JobQueue<P, S>
where
    P: OcrProvider + 'static,
    S: SheetStore + 'static,
{
    pub fn new(processor: SheetProcessor<P>, store: S) -> Self {
        Self {
            processor: Arc::new(processor),
            store: Arc::new(store),
            workers: DEFAULT_WORKER_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Drains the given jobs through the worker pool and reports each
    /// job's terminal state. Abandoning a queued sheet is simply not
    /// enqueueing it; in-flight steps are fast, bounded computations
    /// that need no mid-operation cancellation.
    pub async fn run(&self, jobs: Vec<SheetJob>) -> Vec<JobReport> {
        let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));
        let reports = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..self.workers)
            .map(|worker| {
                let queue = Arc::clone(&queue);
                let reports = Arc::clone(&reports);
                let processor = Arc::clone(&self.processor);
                let store = Arc::clone(&self.store);
                let max_attempts = self.max_attempts;

                tokio::spawn(async move {
                    loop {
                        let job = queue.lock().await.pop_front();
                        let Some(job) = job else { break };

                        let report =
                            run_job(&processor, store.as_ref(), job, max_attempts, worker).await;
                        reports.lock().await.push(report);
                    }
                })
            })
            .collect();

        future::join_all(handles).await;

        let mut reports = reports.lock().await.drain(..).collect::<Vec<_>>();
        reports.sort_by_key(|report| report.sheet_id.clone());
        reports
    }
}

async fn run_job<P: OcrProvider, S: SheetStore + ?Sized>(
    processor: &SheetProcessor<P>,
    store: &S,
    job: SheetJob,
    max_attempts: u32,
    worker: usize,
) -> JobReport {
    info!(
        "worker {} processing sheet `{}` (job {})",
        worker, job.sheet_id, job.id
    );

    let mut attempts = 0;
    let mut last_error = String::new();

    while attempts < max_attempts {
        attempts += 1;

        match processor
            .process(job.image.clone(), &job.sheet, job.mode)
            .await
        {
            Ok(grades) => {
                let write = store
                    .write_result(&job.sheet_id, SheetResult::Completed { grades })
                    .await;
                if let Err(error) = write {
                    last_error = error.to_string();
                    warn!(
                        "store write for sheet `{}` failed on attempt {}: {}",
                        job.sheet_id, attempts, last_error
                    );
                    continue;
                }

                return JobReport {
                    id: job.id,
                    sheet_id: job.sheet_id,
                    status: JobStatus::Completed,
                    attempts,
                    error: None,
                };
            }
            Err(error) => {
                last_error = error.to_string();
                warn!(
                    "sheet `{}` attempt {}/{} failed: {}",
                    job.sheet_id, attempts, max_attempts, last_error
                );
            }
        }
    }

    // Best effort: a failed result write losing out changes nothing for
    // the reader, the job is failed either way
    let _ = store
        .write_result(
            &job.sheet_id,
            SheetResult::Failed {
                error: last_error.clone(),
            },
        )
        .await;

    JobReport {
        id: job.id,
        sheet_id: job.sheet_id,
        status: JobStatus::Failed,
        attempts,
        error: Some(last_error),
    }
}
