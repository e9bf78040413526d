use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Counters accumulated over the lifetime of the poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub polls: usize,
    pub fetch_failures: usize,
    pub alerts: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_poll(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.polls += 1;
        }
    }

    pub fn record_fetch_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fetch_failures += 1;
        }
    }

    pub fn record_alert(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.alerts += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
