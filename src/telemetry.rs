//! Injected logging handle.
//!
//! No subscriber is installed process-wide. The caller builds a
//! [`Telemetry`], hands a reference to every operation, and drops it once
//! the run is over. Operations emit through `tracing` inside
//! [`Telemetry::in_scope`], which routes events to this handle's
//! subscriber, and bump the handle's counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Counters {
    documents: AtomicUsize,
    failures: AtomicUsize,
    pages: AtomicUsize,
    tables: AtomicUsize,
}

/// Snapshot of the counters at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TelemetrySummary {
    pub documents: usize,
    pub failures: usize,
    pub pages: usize,
    pub tables: usize,
}

/// Cloneable logging and counting handle shared by the workers of a run.
#[derive(Clone)]
pub struct Telemetry {
    dispatch: Dispatch,
    counters: Arc<Counters>,
}

impl Telemetry {
    /// Compact human-readable logs on stderr at `level` and above.
    pub fn stderr(level: Level) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .finish();
        Self::from_dispatch(Dispatch::new(subscriber))
    }

    /// Logs on stderr filtered by an `EnvFilter` directive such as
    /// `tablift=debug`.
    pub fn with_filter(filter: EnvFilter) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .finish();
        Self::from_dispatch(Dispatch::new(subscriber))
    }

    /// Counts but never logs.
    pub fn disabled() -> Self {
        Self::from_dispatch(Dispatch::none())
    }

    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Run `f` with this handle's subscriber as the current default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    pub fn record_document(&self) {
        self.counters.documents.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.counters.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page(&self) {
        self.counters.pages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tables(&self, count: usize) {
        self.counters.tables.fetch_add(count, Ordering::Relaxed);
    }

    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            documents: self.counters.documents.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            pages: self.counters.pages.load(Ordering::Relaxed),
            tables: self.counters.tables.load(Ordering::Relaxed),
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("summary", &self.summary())
            .finish_non_exhaustive()
    }
}
