//! Scan orchestrator
//!
//! Fans prompt records out to the classification ensemble at bounded
//! concurrency, converts every outcome (success, explicit error, malformed
//! answer, transport failure, even a panicked worker) into exactly one
//! [`ScanResult`], and restores original-index order before returning.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use domain::{PromptRecord, ScanResult};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::ports::{ClassifierPort, NoopProgress, ProgressSink};

/// Error recorded on records that were never dispatched because the scan
/// was cancelled
pub const CANCELLED_ERROR: &str = "scan cancelled before dispatch";

const DEFAULT_CONCURRENCY: usize = 4;

/// Orchestrates a batch scan against the classification ensemble
pub struct ScanService {
    classifier: Arc<dyn ClassifierPort>,
    concurrency: usize,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ScanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanService")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl ScanService {
    /// Create a scan service with the default worker count
    pub fn new(classifier: Arc<dyn ClassifierPort>) -> Self {
        Self {
            classifier,
            concurrency: DEFAULT_CONCURRENCY,
            progress: Arc::new(NoopProgress),
            cancel: CancellationToken::new(),
        }
    }

    /// Set the maximum number of in-flight classifications (clamped to ≥ 1)
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Attach a progress sink, notified once per completed record
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Attach an external cancellation token
    ///
    /// On cancellation no further records are dispatched; in-flight
    /// classifications drain to completion. Records that were never
    /// dispatched still yield a result, tagged with [`CANCELLED_ERROR`],
    /// so the batch invariant (one result per record) holds.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Scan a batch of records
    ///
    /// Returns exactly one result per record, sorted ascending by index
    /// regardless of completion order or concurrency level. A failing
    /// classification never affects another record and never aborts the
    /// batch.
    #[instrument(skip(self, records), fields(total = records.len(), concurrency = self.concurrency))]
    pub async fn scan(&self, records: Vec<PromptRecord>) -> Vec<ScanResult> {
        let total = records.len();
        if total == 0 {
            return Vec::new();
        }

        info!(total, "Starting scan");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));

        // Keep each record next to its handle so a panicked worker can
        // still be turned into an error result instead of a lost record.
        let mut dispatched: Vec<(PromptRecord, Option<JoinHandle<ScanResult>>)> =
            Vec::with_capacity(total);

        for record in records {
            // Waits for a worker slot, bounding in-flight work. Cancellation
            // wins even while parked here, so a token cancelled mid-wait
            // never dispatches another record.
            let permit = tokio::select! {
                biased;
                () = self.cancel.cancelled() => None,
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                dispatched.push((record, None));
                continue;
            };

            let classifier = Arc::clone(&self.classifier);
            let progress = Arc::clone(&self.progress);
            let completed = Arc::clone(&completed);
            let task_record = record.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = classify_record(classifier.as_ref(), &task_record).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress.record_completed(done, total);
                result
            });

            dispatched.push((record, Some(handle)));
        }

        let mut results = Vec::with_capacity(total);
        for (record, handle) in dispatched {
            let result = match handle {
                Some(handle) => match handle.await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(index = record.index, error = %err, "Scan worker failed");
                        ScanResult::from_failure(&record, format!("scan task failed: {err}"))
                    },
                },
                None => ScanResult::from_failure(&record, CANCELLED_ERROR),
            };
            results.push(result);
        }

        // Deterministic output order independent of completion timing.
        results.sort_by_key(|r| r.index);

        info!(
            total,
            errors = results.iter().filter(|r| r.error.is_some()).count(),
            "Scan complete"
        );

        results
    }
}

/// Classify one record, converting every failure mode into result data
async fn classify_record(classifier: &dyn ClassifierPort, record: &PromptRecord) -> ScanResult {
    match classifier.classify(&record.prompt).await {
        Ok(verdict) => {
            debug!(index = record.index, "Classification received");
            ScanResult::from_verdict(record, verdict)
        },
        Err(err) => {
            warn!(index = record.index, error = %err, "Classification failed");
            ScanResult::from_failure(record, err.to_string())
        },
    }
}
