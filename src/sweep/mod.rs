//! Population sweep: spawn, warm up, measure, record and clean up once per
//! population size, one frame at a time.

pub mod samples;
pub mod spawner;

use std::{path::PathBuf, time::Duration};

use log::{debug, error, info};

use crate::{
    config::SweepConfig,
    core::{counter::ContactCounter, types::FrameTick},
    error::{Result, SweepError},
    host::SimulationHost,
    report::{CsvReport, ResultRow},
    utils::logging::{warn_if_frame_stalled, Stage, StageTimer},
};

pub use samples::{Metric, SampleBuffers};
pub use spawner::SpawnSampler;

/// Where the controller is suspended between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepPhase {
    /// Between runs; the next tick spawns the next population.
    Idle,
    /// Waiting for the host clock to reach `until`.
    WarmingUp { until: Duration },
    /// Sampling frames; `elapsed` is the accumulated frame time so far.
    Measuring { elapsed: f32 },
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStatus {
    Running,
    Done,
}

/// Host-side cost of setting up and tearing down one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub population: u32,
    pub spawn: Duration,
    pub cleanup: Duration,
}

/// Outcome of a sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepSummary {
    /// Rows successfully written, in run order.
    pub rows: Vec<ResultRow>,
    /// Populations whose row could not be written.
    pub failed_runs: Vec<u32>,
    /// Spawn and cleanup cost of every finished run, in run order.
    pub timings: Vec<RunTiming>,
    pub output_path: PathBuf,
}

/// Frame-stepped sweep state machine.
///
/// `I` is the host's instance handle. Each call to [`tick`](Self::tick)
/// consumes one frame and runs until the next suspension point.
pub struct SweepController<I> {
    config: SweepConfig,
    test_case: String,
    populations: Vec<u32>,
    next_run: usize,
    current: Option<u32>,
    spawn_time: Duration,
    phase: SweepPhase,
    sampler: SpawnSampler,
    spawned: Vec<I>,
    samples: SampleBuffers,
    report: CsvReport,
    summary: SweepSummary,
}

impl<I> SweepController<I> {
    pub fn new(config: SweepConfig, test_case: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let populations = config.population_counts();
        if populations.is_empty() {
            return Err(SweepError::InvalidConfig(
                "configuration yields no population sizes".into(),
            ));
        }

        let output_path = config.output_path();
        let report = CsvReport::new(output_path.clone(), config.metric);
        let sampler = SpawnSampler::new(config.seed, config.spawn_bounds, config.impulse_magnitude);

        Ok(Self {
            test_case: test_case.into(),
            populations,
            next_run: 0,
            current: None,
            spawn_time: Duration::ZERO,
            phase: SweepPhase::Idle,
            sampler,
            spawned: Vec::new(),
            samples: SampleBuffers::new(),
            report,
            summary: SweepSummary {
                output_path,
                ..SweepSummary::default()
            },
            config,
        })
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn populations(&self) -> &[u32] {
        &self.populations
    }

    /// Population of the run in progress, if any.
    pub fn current_population(&self) -> Option<u32> {
        self.current
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    pub fn samples(&self) -> &SampleBuffers {
        &self.samples
    }

    pub fn summary(&self) -> &SweepSummary {
        &self.summary
    }

    pub fn into_summary(self) -> SweepSummary {
        self.summary
    }

    /// Advances the sweep by one frame.
    ///
    /// `contacts` must hold the contact points the host reported during the
    /// frame described by `frame`. Ticks that do not take a sample discard
    /// the counter, so each sample covers exactly one frame.
    pub fn tick<H>(&mut self, host: &mut H, contacts: &ContactCounter, frame: FrameTick) -> SweepStatus
    where
        H: SimulationHost<Instance = I>,
    {
        loop {
            match self.phase {
                SweepPhase::Idle => {
                    contacts.reset();
                    let Some(&population) = self.populations.get(self.next_run) else {
                        self.phase = SweepPhase::Done;
                        info!(
                            "all tests complete, results at {}",
                            self.summary.output_path.display()
                        );
                        return SweepStatus::Done;
                    };
                    self.next_run += 1;
                    self.begin_run(host, population, frame.now);
                    return SweepStatus::Running;
                }
                SweepPhase::WarmingUp { until } => {
                    if frame.now < until {
                        contacts.reset();
                        return SweepStatus::Running;
                    }
                    self.samples.clear();
                    self.phase = SweepPhase::Measuring { elapsed: 0.0 };
                }
                SweepPhase::Measuring { elapsed } => {
                    if elapsed < self.config.measurement_duration {
                        let population = self.current.unwrap_or_default();
                        warn_if_frame_stalled(population, frame.delta, self.config.stall_warning_ms);
                        self.samples.record(frame.delta, contacts.take());
                        self.phase = SweepPhase::Measuring {
                            elapsed: elapsed + frame.delta,
                        };
                        return SweepStatus::Running;
                    }
                    contacts.reset();
                    self.finish_run(host);
                    self.phase = SweepPhase::Idle;
                    return SweepStatus::Running;
                }
                SweepPhase::Done => return SweepStatus::Done,
            }
        }
    }

    fn begin_run<H>(&mut self, host: &mut H, population: u32, now: Duration)
    where
        H: SimulationHost<Instance = I>,
    {
        self.sampler.reseed(self.config.seed);
        self.spawn_time = self.spawn(host, population);
        self.current = Some(population);
        info!("starting test for {population} instances");

        let warmup = Duration::from_secs_f32(self.config.warmup_duration);
        self.phase = SweepPhase::WarmingUp {
            until: now + warmup,
        };
    }

    fn spawn<H>(&mut self, host: &mut H, population: u32) -> Duration
    where
        H: SimulationHost<Instance = I>,
    {
        let timer = StageTimer::start(Stage::Spawn, population);
        self.spawned.clear();
        self.spawned.reserve(population as usize);

        let mut without_body = 0usize;
        for _ in 0..population {
            let pose = self.sampler.sample();
            let instance = host.spawn(&pose);
            if !host.apply_impulse(&instance, pose.impulse) {
                without_body += 1;
            }
            self.spawned.push(instance);
        }
        if without_body > 0 {
            debug!("{without_body} of {population} instances have no rigid body, impulse skipped");
        }
        timer.finish()
    }

    fn finish_run<H>(&mut self, host: &mut H)
    where
        H: SimulationHost<Instance = I>,
    {
        let population = self.current.take().unwrap_or_default();
        let row = ResultRow {
            test_case: self.test_case.clone(),
            spawn_count: population,
            metric: self.samples.aggregate(self.config.metric),
            total_collision_checks: self.samples.total_contacts(),
        };

        match self.report.append(&row) {
            Ok(()) => {
                info!("logged result for {population} instances");
                self.summary.rows.push(row);
            }
            Err(err) => {
                error!("failed to record run with {population} instances: {err}");
                self.summary.failed_runs.push(population);
            }
        }

        let cleanup = self.cleanup(host, population);
        self.summary.timings.push(RunTiming {
            population,
            spawn: self.spawn_time,
            cleanup,
        });
    }

    fn cleanup<H>(&mut self, host: &mut H, population: u32) -> Duration
    where
        H: SimulationHost<Instance = I>,
    {
        let timer = StageTimer::start(Stage::Cleanup, population);
        for instance in self.spawned.drain(..) {
            host.destroy(instance);
        }
        timer.finish()
    }
}

/// Runs a complete sweep against `host`, writing one CSV row per population.
///
/// Fails before spawning anything if the configuration is invalid or the
/// host has no test object. Per-run write failures are reported in the
/// returned [`SweepSummary`] instead.
pub fn run_sweep<H: SimulationHost>(host: &mut H, config: SweepConfig) -> Result<SweepSummary> {
    let test_case = host
        .test_object_name()
        .ok_or(SweepError::MissingTestObject)?
        .to_owned();
    let mut controller = SweepController::new(config, test_case)?;
    let contacts = ContactCounter::new();

    let mut frame = FrameTick {
        delta: 0.0,
        now: host.now(),
    };
    while controller.tick(host, &contacts, frame) == SweepStatus::Running {
        let delta = host.advance_frame(&contacts);
        frame = FrameTick {
            delta,
            now: host.now(),
        };
    }

    Ok(controller.into_summary())
}
