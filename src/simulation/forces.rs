//! Gravitational acceleration for the n-body engine
//!
//! Direct O(n^2) Newtonian gravity without softening. Each pair goes through
//! the same path the bodies expose publicly: force magnitude from
//! [`Body::gravitational_force`], divided by the body's own mass, pointed
//! along [`Body::angle_to`] / [`Body::angle_to_unit_vector`].

use super::error::EngineError;
use super::states::{Body, NVec2};

/// Pairs whose squared separation is at or below this value are coincident.
/// Pairs that are apart but close enough for the force or the resulting
/// acceleration to overflow to a non-finite value are treated the same way.
///
/// Gravitation is undefined for them, so the pair is skipped for that step:
/// neither body feels the other, a warning is logged and the skip is counted
/// in the step report. No minimum separation is clamped in.
pub const COINCIDENT_DISTANCE_SQUARED: f64 = 0.0;

/// Net acceleration on one body plus how many pairs had to be skipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetAcceleration {
    pub a: NVec2,
    pub skipped: usize,
}

/// 2D Newtonian gravity, direct summation
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Acceleration on `bodies[idx]` from every other body, in slice order.
    ///
    /// Self is excluded by index only. Two different bodies with identical
    /// state still attract each other.
    pub fn acceleration_on(&self, idx: usize, bodies: &[Body]) -> NetAcceleration {
        let b = &bodies[idx];
        let mut acc = NVec2::zeros();
        let mut skipped = 0;

        for (j, o) in bodies.iter().enumerate() {
            if j == idx {
                continue;
            }

            let f = match b.gravitational_force(self.g, o) {
                Ok(f) => f,
                Err(e @ EngineError::CoincidentBodies { .. }) => {
                    log::warn!("skipping pair ({}, {}): {}", idx, j, e);
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    // gravitational_force only reports coincidence
                    log::error!("unexpected force error for pair ({}, {}): {}", idx, j, e);
                    skipped += 1;
                    continue;
                }
            };

            let a = b.acceleration_from_force(f);
            let dir = Body::angle_to_unit_vector(b.angle_to(o));
            let contribution = dir * a;
            if !contribution.iter().all(|c| c.is_finite()) {
                log::warn!("skipping pair ({}, {}): acceleration {} is not finite", idx, j, a);
                skipped += 1;
                continue;
            }
            acc += contribution;
        }

        NetAcceleration { a: acc, skipped }
    }

    /// Accelerations for all bodies from one consistent state.
    /// `out[i]` is overwritten with the net acceleration on `bodies[i]`.
    /// Returns the number of skipped (ordered) pairs.
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [NVec2]) -> usize {
        let mut skipped = 0;
        for (i, slot) in out.iter_mut().enumerate().take(bodies.len()) {
            let net = self.acceleration_on(i, bodies);
            *slot = net.a;
            skipped += net.skipped;
        }
        skipped
    }
}
