//! Default sweep parameters and the serde-backed [`SweepConfig`].

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    core::types::SpawnBounds,
    error::{Result, SweepError},
    sweep::samples::Metric,
};

/// Seed applied to the spawn sampler at the start of every run.
pub const DEFAULT_SEED: u64 = 12345;

/// Smallest population in the stepped sequence.
pub const DEFAULT_MINIMUM_SPAWN_COUNT: u32 = 200;

/// Largest population in the stepped sequence (inclusive).
pub const DEFAULT_MAXIMUM_SPAWN_COUNT: u32 = 5000;

/// Step between consecutive stepped populations.
pub const DEFAULT_SPAWN_COUNT_INCREMENT: u32 = 250;

/// Large populations appended after the stepped sequence.
pub const DEFAULT_EXTRA_SPAWN_COUNTS: [u32; 5] = [6000, 7000, 8000, 9000, 10000];

/// Lower corner of the default spawn region (Y-up).
pub const DEFAULT_SPAWN_MIN: [f32; 3] = [-10.0, 1.0, -10.0];

/// Upper corner of the default spawn region (Y-up).
pub const DEFAULT_SPAWN_MAX: [f32; 3] = [10.0, 10.0, 10.0];

/// Magnitude of the impulse applied to each spawned rigid body.
pub const DEFAULT_IMPULSE_MAGNITUDE: f32 = 5.0;

/// Wall-clock settle time after spawning (in seconds).
pub const DEFAULT_WARMUP_DURATION: f32 = 5.0;

/// Accumulated frame time sampled per run (in seconds).
pub const DEFAULT_MEASUREMENT_DURATION: f32 = 20.0;

/// Results file name inside the output directory.
pub const DEFAULT_CSV_FILE_NAME: &str = "collision_test_results.csv";

/// Measured frames longer than this are reported as stalls.
pub const DEFAULT_STALL_WARNING_MS: f32 = 250.0;

/// Sub-directory of the platform data directory used when no output directory is set.
pub const APP_DATA_DIR_NAME: &str = "contact_sweep";

/// Immutable parameters of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub seed: u64,
    pub minimum_spawn_count: u32,
    pub maximum_spawn_count: u32,
    pub spawn_count_increment: u32,
    /// Only values above `maximum_spawn_count` that are not already scheduled are used.
    pub extra_spawn_counts: Vec<u32>,
    pub spawn_bounds: SpawnBounds,
    pub impulse_magnitude: f32,
    pub warmup_duration: f32,
    pub measurement_duration: f32,
    pub metric: Metric,
    pub output_dir: Option<PathBuf>,
    pub csv_file_name: String,
    /// Zero disables stall warnings.
    pub stall_warning_ms: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            minimum_spawn_count: DEFAULT_MINIMUM_SPAWN_COUNT,
            maximum_spawn_count: DEFAULT_MAXIMUM_SPAWN_COUNT,
            spawn_count_increment: DEFAULT_SPAWN_COUNT_INCREMENT,
            extra_spawn_counts: DEFAULT_EXTRA_SPAWN_COUNTS.to_vec(),
            spawn_bounds: SpawnBounds::new(
                Vec3::from_array(DEFAULT_SPAWN_MIN),
                Vec3::from_array(DEFAULT_SPAWN_MAX),
            ),
            impulse_magnitude: DEFAULT_IMPULSE_MAGNITUDE,
            warmup_duration: DEFAULT_WARMUP_DURATION,
            measurement_duration: DEFAULT_MEASUREMENT_DURATION,
            metric: Metric::default(),
            output_dir: None,
            csv_file_name: DEFAULT_CSV_FILE_NAME.to_owned(),
            stall_warning_ms: DEFAULT_STALL_WARNING_MS,
        }
    }
}

impl SweepConfig {
    /// Parses a configuration from TOML; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every field the controller relies on before a sweep starts.
    pub fn validate(&self) -> Result<()> {
        if self.spawn_count_increment == 0 {
            return Err(invalid("spawn_count_increment must be greater than zero"));
        }
        if self.minimum_spawn_count > self.maximum_spawn_count {
            return Err(invalid(format!(
                "minimum_spawn_count ({}) exceeds maximum_spawn_count ({})",
                self.minimum_spawn_count, self.maximum_spawn_count
            )));
        }
        if !self.spawn_bounds.is_valid() {
            return Err(invalid(format!(
                "spawn bounds must be finite with min <= max on every axis (min {}, max {})",
                self.spawn_bounds.min, self.spawn_bounds.max
            )));
        }
        for (name, value) in [
            ("warmup_duration", self.warmup_duration),
            ("measurement_duration", self.measurement_duration),
            ("impulse_magnitude", self.impulse_magnitude),
            ("stall_warning_ms", self.stall_warning_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if std::time::Duration::try_from_secs_f32(self.warmup_duration).is_err() {
            return Err(invalid(format!(
                "warmup_duration {} is out of range",
                self.warmup_duration
            )));
        }
        if self.csv_file_name.trim().is_empty() {
            return Err(invalid("csv_file_name must not be empty"));
        }
        Ok(())
    }

    /// Ordered population sizes: the stepped range, then accepted extras in configured order.
    pub fn population_counts(&self) -> Vec<u32> {
        let mut counts = Vec::new();
        if self.spawn_count_increment == 0 {
            return counts;
        }

        let mut current = self.minimum_spawn_count;
        while current <= self.maximum_spawn_count {
            counts.push(current);
            match current.checked_add(self.spawn_count_increment) {
                Some(next) => current = next,
                None => break,
            }
        }

        for &extra in &self.extra_spawn_counts {
            if extra > self.maximum_spawn_count && !counts.contains(&extra) {
                counts.push(extra);
            }
        }
        counts
    }

    /// Full path of the results file.
    pub fn output_path(&self) -> PathBuf {
        let dir = self.output_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DATA_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        dir.join(&self.csv_file_name)
    }
}

fn invalid(message: impl Into<String>) -> SweepError {
    SweepError::InvalidConfig(message.into())
}
