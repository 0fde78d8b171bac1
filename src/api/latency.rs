//! In-memory latency histograms, one per binder.
//! Records the time a handler spends inside the binder call.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binder {
    PlayerTable,
    HistoryChart,
    SummaryChart,
}

impl std::fmt::Display for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Binder::PlayerTable => "player_table",
            Binder::HistoryChart => "history_chart",
            Binder::SummaryChart => "summary_chart",
        };
        write!(f, "{s}")
    }
}

/// Values stored in microseconds.
pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl LatencyStats {
    /// Tracks 1us to 100s, 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 100_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    pub fn record(&self, d: Duration) {
        let us = d.as_micros().clamp(1, 100_000_000) as u64;
        if let Ok(mut h) = self.inner.lock() {
            let _ = h.record(us);
        }
    }

    pub fn summary(&self) -> LatencySummary {
        let Ok(h) = self.inner.lock() else {
            return LatencySummary::default();
        };
        if h.len() == 0 {
            return LatencySummary::default();
        }
        LatencySummary {
            samples: h.len(),
            p50_us: Some(h.value_at_quantile(0.5)),
            p95_us: Some(h.value_at_quantile(0.95)),
            p99_us: Some(h.value_at_quantile(0.99)),
        }
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub samples: u64,
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
}

/// Shared by all handlers.
#[derive(Default)]
pub struct BinderLatency {
    player_table: LatencyStats,
    history_chart: LatencyStats,
    summary_chart: LatencyStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyReport {
    pub player_table: LatencySummary,
    pub history_chart: LatencySummary,
    pub summary_chart: LatencySummary,
}

impl BinderLatency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, binder: Binder, d: Duration) {
        self.stats(binder).record(d);
    }

    pub fn report(&self) -> LatencyReport {
        LatencyReport {
            player_table: self.player_table.summary(),
            history_chart: self.history_chart.summary(),
            summary_chart: self.summary_chart.summary(),
        }
    }

    fn stats(&self, binder: Binder) -> &LatencyStats {
        match binder {
            Binder::PlayerTable => &self.player_table,
            Binder::HistoryChart => &self.history_chart,
            Binder::SummaryChart => &self.summary_chart,
        }
    }
}
