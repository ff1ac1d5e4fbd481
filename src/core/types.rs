use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned region that spawn positions are drawn from (inclusive on both corners).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Finite corners with `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Placement and launch impulse for one spawned instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// Already scaled by the configured impulse magnitude.
    pub impulse: Vec3,
}

impl Default for SpawnPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            impulse: Vec3::ZERO,
        }
    }
}

/// Timing information handed to the controller once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Elapsed time of the frame that just ran, in seconds.
    pub delta: f32,
    /// Host wall clock at the end of that frame.
    pub now: std::time::Duration,
}
