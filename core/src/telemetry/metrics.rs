use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::classify::ColorBucket;
use crate::presenter::Scene;

/// Per-run counters for fetch cycles and rendered markers.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Default)]
struct Metrics {
    fetches: usize,
    source_errors: usize,
    markers: BTreeMap<ColorBucket, usize>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub fetches: usize,
    pub source_errors: usize,
    pub markers: BTreeMap<ColorBucket, usize>,
}

impl MetricsSnapshot {
    pub fn total_markers(&self) -> usize {
        self.markers.values().sum()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_fetch(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fetches += 1;
        }
    }

    pub fn record_source_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.source_errors += 1;
        }
    }

    pub fn record_scene(&self, scene: &Scene) {
        if let Ok(mut metrics) = self.inner.lock() {
            for (bucket, count) in scene.bucket_counts() {
                *metrics.markers.entry(bucket).or_default() += count;
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                fetches: metrics.fetches,
                source_errors: metrics.source_errors,
                markers: metrics.markers.clone(),
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
