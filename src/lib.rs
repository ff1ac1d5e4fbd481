//! Contact Sweep – collision benchmark harness for physics hosts.
//!
//! Spawns growing populations of a test object inside a simulation host,
//! lets them collide, and records frame timing and contact-point totals
//! for each population to a CSV file.

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod report;
pub mod sweep;
pub mod utils;

pub use glam::{Quat, Vec3};

pub use config::SweepConfig;
pub use crate::core::{
    counter::ContactCounter,
    types::{FrameTick, SpawnBounds, SpawnPose},
};
pub use error::{Result, SweepError};
pub use host::{HeadlessHost, SimulationHost, MAX_HEADLESS_FRAME_TIME, MIN_HEADLESS_FRAME_TIME};
pub use report::{CsvReport, ResultRow};
pub use sweep::{
    run_sweep, Metric, RunTiming, SampleBuffers, SpawnSampler, SweepController, SweepPhase,
    SweepStatus, SweepSummary,
};
pub use utils::allocator::{InstanceArena, InstanceId};
