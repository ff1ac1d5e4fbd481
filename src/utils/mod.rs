//! Utility helpers: instance storage and logging.

pub mod allocator;
pub mod logging;

pub use allocator::{InstanceArena, InstanceId};
