//! Process-wide planning counters.
//!
//! Counters are bumped silently at the call site; [`Metrics::flush`] emits
//! all of them as one `tracing::info!` event (e.g. before a CLI exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    plans_computed: AtomicU64,
    expansions_flagged: AtomicU64,
    expansions_declined: AtomicU64,
    commits_aborted: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            plans_computed: AtomicU64::new(0),
            expansions_flagged: AtomicU64::new(0),
            expansions_declined: AtomicU64::new(0),
            commits_aborted: AtomicU64::new(0),
        }
    }

    pub fn inc_plans_computed(&self) {
        self.plans_computed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "plans_computed", "counter incremented");
    }

    pub fn add_expansions_flagged(&self, n: u64) {
        self.expansions_flagged.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_expansions_declined(&self, n: u64) {
        self.expansions_declined.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_commits_aborted(&self) {
        self.commits_aborted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "commits_aborted", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            plans_computed = self.plans_computed(),
            expansions_flagged = self.expansions_flagged(),
            expansions_declined = self.expansions_declined(),
            commits_aborted = self.commits_aborted(),
        );
    }

    pub fn plans_computed(&self) -> u64 {
        self.plans_computed.load(Ordering::Relaxed)
    }

    pub fn expansions_flagged(&self) -> u64 {
        self.expansions_flagged.load(Ordering::Relaxed)
    }

    pub fn expansions_declined(&self) -> u64 {
        self.expansions_declined.load(Ordering::Relaxed)
    }

    pub fn commits_aborted(&self) -> u64 {
        self.commits_aborted.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.plans_computed.store(0, Ordering::Relaxed);
        self.expansions_flagged.store(0, Ordering::Relaxed);
        self.expansions_declined.store(0, Ordering::Relaxed);
        self.commits_aborted.store(0, Ordering::Relaxed);
    }
}
