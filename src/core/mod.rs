//! Core value types shared by the host seam and the sweep controller.

pub mod counter;
pub mod types;

pub use counter::ContactCounter;
pub use types::{FrameTick, SpawnBounds, SpawnPose};
