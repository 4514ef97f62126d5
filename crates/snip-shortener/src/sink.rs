use parking_lot::Mutex;
use snip_core::ShortCode;
use std::fmt::Display;
use std::sync::Arc;
use tracing::warn;

/// A best-effort step of the service whose failure is swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CacheRead,
    CacheWrite,
    VisitCount,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::CacheRead => f.write_str("cache_read"),
            Operation::CacheWrite => f.write_str("cache_write"),
            Operation::VisitCount => f.write_str("visit_count"),
        }
    }
}

/// A failure that did not affect the request outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffortFailure {
    pub operation: Operation,
    pub code: ShortCode,
    pub reason: String,
}

/// The single destination for every swallowed error.
pub trait FailureSink: Send + Sync + 'static {
    fn record(&self, failure: BestEffortFailure);
}

impl<S: FailureSink + ?Sized> FailureSink for Arc<S> {
    fn record(&self, failure: BestEffortFailure) {
        (**self).record(failure)
    }
}

/// Emits each failure as a structured `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn record(&self, failure: BestEffortFailure) {
        warn!(
            operation = %failure.operation,
            code = %failure.code,
            reason = %failure.reason,
            "best-effort operation failed"
        );
    }
}

/// Keeps failures in memory so they can be inspected.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<BestEffortFailure>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded failures, oldest first.
    pub fn events(&self) -> Vec<BestEffortFailure> {
        self.events.lock().clone()
    }

    /// Number of recorded failures for `operation`.
    pub fn count(&self, operation: Operation) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.operation == operation)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl FailureSink for MemorySink {
    fn record(&self, failure: BestEffortFailure) {
        self.events.lock().push(failure);
    }
}
