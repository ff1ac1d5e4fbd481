//! Seam between the sweep controller and the simulation engine being measured.

use std::time::Duration;

use glam::Vec3;

use crate::{
    core::{counter::ContactCounter, types::SpawnPose},
    utils::allocator::{InstanceArena, InstanceId},
};

/// Engine capabilities the sweep drives: a frame loop, object lifetime,
/// impulses and contact reporting.
pub trait SimulationHost {
    /// Handle to one spawned copy of the test object.
    type Instance;

    /// Label of the object under test, written to every result row.
    /// `None` means nothing is configured and the sweep refuses to start.
    fn test_object_name(&self) -> Option<&str>;

    /// Monotonic wall clock used for warm-up deadlines.
    fn now(&self) -> Duration;

    /// Runs one frame of simulation and rendering.
    ///
    /// Every colliding body pair's contact points for the frame must be
    /// added to `contacts`. Returns the frame's elapsed time in seconds.
    fn advance_frame(&mut self, contacts: &ContactCounter) -> f32;

    fn spawn(&mut self, pose: &SpawnPose) -> Self::Instance;

    /// Returns `false` when the instance has no rigid body to push.
    fn apply_impulse(&mut self, instance: &Self::Instance, impulse: Vec3) -> bool;

    fn destroy(&mut self, instance: Self::Instance);
}

/// Shortest frame a [`HeadlessHost`] will simulate, in seconds.
pub const MIN_HEADLESS_FRAME_TIME: f32 = 1.0e-4;

/// Longest frame a [`HeadlessHost`] will simulate, in seconds.
pub const MAX_HEADLESS_FRAME_TIME: f32 = 60.0;

#[derive(Debug, Clone, Copy)]
struct HeadlessBody {
    position: Vec3,
    velocity: Vec3,
}

/// Host without physics or rendering: fixed frame time, a virtual clock
/// and a configurable contact load per live instance.
pub struct HeadlessHost {
    test_object: Option<String>,
    frame_time: f32,
    clock: Duration,
    contacts_per_instance: u64,
    rigid_bodies: bool,
    bodies: InstanceArena<HeadlessBody>,
    frames: u64,
}

impl HeadlessHost {
    /// Creates a host whose frames all last `frame_time` seconds.
    ///
    /// The frame time is clamped to
    /// [`MIN_HEADLESS_FRAME_TIME`]..=[`MAX_HEADLESS_FRAME_TIME`] (NaN becomes
    /// the minimum) so warm-up and measurement windows always close.
    pub fn new(test_object: impl Into<String>, frame_time: f32) -> Self {
        Self {
            test_object: Some(test_object.into()),
            frame_time: clamp_frame_time(frame_time),
            clock: Duration::ZERO,
            contacts_per_instance: 0,
            rigid_bodies: true,
            bodies: InstanceArena::new(),
            frames: 0,
        }
    }

    /// Host with no test object; useful for exercising startup validation.
    pub fn without_test_object(frame_time: f32) -> Self {
        Self {
            test_object: None,
            ..Self::new(String::new(), frame_time)
        }
    }

    /// Every live instance reports this many contact points per frame.
    pub fn with_contacts_per_instance(mut self, contacts: u64) -> Self {
        self.contacts_per_instance = contacts;
        self
    }

    /// Spawned instances carry no rigid body, so impulses are skipped.
    pub fn without_rigid_bodies(mut self) -> Self {
        self.rigid_bodies = false;
        self
    }

    pub fn live_instances(&self) -> usize {
        self.bodies.len()
    }

    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }

    pub fn frames_advanced(&self) -> u64 {
        self.frames
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.bodies.iter().map(|body| body.position)
    }
}

fn clamp_frame_time(frame_time: f32) -> f32 {
    if frame_time.is_nan() {
        MIN_HEADLESS_FRAME_TIME
    } else {
        frame_time.clamp(MIN_HEADLESS_FRAME_TIME, MAX_HEADLESS_FRAME_TIME)
    }
}

impl SimulationHost for HeadlessHost {
    type Instance = InstanceId;

    fn test_object_name(&self) -> Option<&str> {
        self.test_object.as_deref()
    }

    fn now(&self) -> Duration {
        self.clock
    }

    fn advance_frame(&mut self, contacts: &ContactCounter) -> f32 {
        let dt = self.frame_time;
        self.clock += Duration::from_secs_f32(dt);
        self.frames += 1;

        // Unit mass, no gravity: impulses translate straight into drift.
        for body in self.bodies.iter_mut() {
            body.position += body.velocity * dt;
        }

        contacts.add(self.bodies.len() as u64 * self.contacts_per_instance);
        dt
    }

    fn spawn(&mut self, pose: &SpawnPose) -> InstanceId {
        self.bodies.insert(HeadlessBody {
            position: pose.position,
            velocity: Vec3::ZERO,
        })
    }

    fn apply_impulse(&mut self, instance: &InstanceId, impulse: Vec3) -> bool {
        if !self.rigid_bodies {
            return false;
        }
        match self.bodies.get_mut(*instance) {
            Some(body) => {
                body.velocity += impulse;
                true
            }
            None => false,
        }
    }

    fn destroy(&mut self, instance: InstanceId) {
        if self.bodies.remove(instance).is_none() {
            log::debug!("destroy of unknown instance {instance:?} ignored");
        }
    }
}
