//! Request counters for the /health endpoint.
//! Updated by every binder handler.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared request counters. Handlers record, /health reads.
#[derive(Default)]
pub struct HealthState {
    /// Binder requests answered successfully.
    pub requests_served: AtomicU64,
    /// Binder requests that failed to render (unknown metric, player, index...).
    pub render_failures: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, ok: bool) {
        if ok {
            self.requests_served.fetch_add(1, Ordering::Relaxed);
        } else {
            self.render_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn render_failures(&self) -> u64 {
        self.render_failures.load(Ordering::Relaxed)
    }
}
