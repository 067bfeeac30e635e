//! Progress port - Incremental scan progress notifications

/// Sink for per-record scan progress
///
/// Called once per completed record, from worker tasks in completion
/// order. Implementations must be cheap and non-blocking; a slow sink
/// delays the worker that calls it.
pub trait ProgressSink: Send + Sync {
    /// One record finished; `completed` of `total` are now done
    fn record_completed(&self, completed: usize, total: usize);
}

/// Progress sink that discards all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn record_completed(&self, _completed: usize, _total: usize) {}
}
