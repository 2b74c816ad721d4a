//! The world: owner of all bodies and the gravitational constant
//!
//! A `World` is advanced by an external driver, one `step(dt)` per tick.
//! Between steps the driver (or a UI) may spawn, despawn and edit bodies.
//! Everything is single threaded; the borrow checker keeps a snapshot or a
//! `get_mut` borrow from overlapping a step.

use super::error::EngineError;
use super::forces::NewtonianGravity;
use super::integrator::{euler_sequential, euler_synchronized, StepMode};
use super::states::{Body, BodyId, NVec2};

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub skipped_pairs: usize, // coincident pairs left out of the force sum
}

#[derive(Debug, Clone)]
pub struct World {
    gravity: NewtonianGravity, // holds G, fixed for the world's lifetime
    bodies: Vec<Body>, // insertion order
    next_id: u64, // never reused
    mode: StepMode,
    t: f64, // simulated time
}

impl World {
    /// Empty world with gravitational constant `g`, stepping sequentially
    pub fn new(g: f64) -> Self {
        Self {
            gravity: NewtonianGravity::new(g),
            bodies: Vec::new(),
            next_id: 0,
            mode: StepMode::default(),
            t: 0.0,
        }
    }

    pub fn with_step_mode(mut self, mode: StepMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravity.g
    }

    pub fn step_mode(&self) -> StepMode {
        self.mode
    }

    pub fn set_step_mode(&mut self, mode: StepMode) {
        self.mode = mode;
    }

    /// Total simulated time stepped so far
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Advance every body by one tick of length `dt`.
    ///
    /// `dt == 0` is the paused state and leaves all bodies untouched.
    /// A negative or non-finite `dt` is rejected before anything moves.
    pub fn step(&mut self, dt: f64) -> Result<StepReport, EngineError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::InvalidTimestep(dt));
        }
        if dt == 0.0 {
            return Ok(StepReport::default());
        }

        let skipped_pairs = match self.mode {
            StepMode::Sequential => euler_sequential(&mut self.bodies, &self.gravity, dt),
            StepMode::Synchronized => euler_synchronized(&mut self.bodies, &self.gravity, dt),
        };
        self.t += dt;

        Ok(StepReport { skipped_pairs })
    }

    /// Take ownership of `body`, append it and hand back its new id.
    /// A body without a name is named after its id.
    pub fn spawn(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.assign_id(id);
        log::debug!("spawned body {} ({}) with mass {}", id, body.name(), body.mass());
        self.bodies.push(body);
        id
    }

    /// Remove the body with this id. `None` means no such body; nothing changes.
    pub fn despawn(&mut self, id: BodyId) -> Option<Body> {
        match self.index_of(id) {
            Some(idx) => {
                let body = self.bodies.remove(idx);
                log::debug!("despawned body {} ({})", id, body.name());
                Some(body)
            }
            None => {
                log::warn!("despawn: no body with id {}", id);
                None
            }
        }
    }

    /// Ordered, read-only view of all bodies for a renderer or UI
    pub fn snapshot(&self) -> Vec<&Body> {
        self.bodies.iter().collect()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == Some(id))
    }

    /// Mutable access for edits between steps
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id() == Some(id))
    }

    /// Like [`World::get`] but reports a missing id as an error
    pub fn try_get(&self, id: BodyId) -> Result<&Body, EngineError> {
        self.get(id).ok_or(EngineError::UnknownId(id))
    }

    /// First body carrying this name, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Sum of m * v over all bodies
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(NVec2::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id() == Some(id))
    }
}
