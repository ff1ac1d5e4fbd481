use log::{debug, warn};
use std::time::{Duration, Instant};

/// Host-side work the controller performs around each measurement window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Spawn,
    Cleanup,
}

impl Stage {
    fn verb(self) -> &'static str {
        match self {
            Stage::Spawn => "spawned",
            Stage::Cleanup => "destroyed",
        }
    }
}

/// Wall-clock cost of one stage for one population.
///
/// Spawn and cleanup run outside the measured frames, so their cost is
/// reported separately instead of polluting the frame-time samples.
pub struct StageTimer {
    stage: Stage,
    population: u32,
    start: Instant,
}

impl StageTimer {
    pub fn start(stage: Stage, population: u32) -> Self {
        Self {
            stage,
            population,
            start: Instant::now(),
        }
    }

    /// Logs the elapsed time at debug level and returns it.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        debug!(
            "{} {} instances in {:.2} ms",
            self.stage.verb(),
            self.population,
            elapsed.as_secs_f64() * 1000.0
        );
        elapsed
    }
}

/// Warns when a measured frame ran longer than `threshold_ms`.
///
/// Returns whether the warning fired.
pub fn warn_if_frame_stalled(population: u32, delta_seconds: f32, threshold_ms: f32) -> bool {
    let frame_ms = delta_seconds * 1000.0;
    if threshold_ms > 0.0 && frame_ms > threshold_ms {
        warn!("frame stalled with {population} instances: {frame_ms:.2} ms > {threshold_ms:.2} ms");
        return true;
    }
    false
}
