use serde::{Deserialize, Serialize};

/// Aggregate timing value written to the third CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Mean frame time in seconds.
    #[default]
    AverageDeltaTime,
    /// Reciprocal of the mean frame time.
    AverageFps,
}

impl Metric {
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::AverageDeltaTime => "averageDeltaTime",
            Metric::AverageFps => "averageFps",
        }
    }
}

/// Per-frame samples collected during one measurement window.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffers {
    frame_times: Vec<f32>,
    contact_counts: Vec<u64>,
}

impl SampleBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.frame_times.clear();
        self.contact_counts.clear();
    }

    pub fn record(&mut self, frame_time: f32, contacts: u64) {
        self.frame_times.push(frame_time);
        self.contact_counts.push(contacts);
    }

    pub fn len(&self) -> usize {
        self.frame_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times.is_empty()
    }

    pub fn frame_times(&self) -> &[f32] {
        &self.frame_times
    }

    pub fn contact_counts(&self) -> &[u64] {
        &self.contact_counts
    }

    /// Arithmetic mean of the recorded frame times, `None` when nothing was sampled.
    pub fn mean_frame_time(&self) -> Option<f64> {
        if self.frame_times.is_empty() {
            return None;
        }
        let sum: f64 = self.frame_times.iter().map(|&dt| f64::from(dt)).sum();
        Some(sum / self.frame_times.len() as f64)
    }

    pub fn total_contacts(&self) -> u64 {
        self.contact_counts.iter().sum()
    }

    /// Reduces the frame times to `metric`. Empty windows (and zero-length
    /// frames for [`Metric::AverageFps`]) yield `0.0`.
    pub fn aggregate(&self, metric: Metric) -> f64 {
        let Some(mean) = self.mean_frame_time() else {
            return 0.0;
        };
        match metric {
            Metric::AverageDeltaTime => mean,
            Metric::AverageFps if mean > 0.0 => mean.recip(),
            Metric::AverageFps => 0.0,
        }
    }
}
