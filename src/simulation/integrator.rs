//! Fixed-step time integrators for the N-body system
//!
//! Both integrators are semi-implicit Euler: velocity is kicked by the net
//! acceleration first, then position drifts with the new velocity. They only
//! differ in when the accelerations are evaluated.

use serde::Deserialize;

use super::forces::NewtonianGravity;
use super::states::{Body, NVec2};

/// Ordering of the per-body updates inside one step
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Each body is fully updated before the next one is looked at, so later
    /// bodies see the already-moved positions of earlier ones
    /// (Gauss-Seidel-style coupling). Results depend on body order and are
    /// not time reversible. This is the reference behavior.
    #[default]
    #[serde(rename = "sequential")]
    Sequential,

    /// All accelerations come from the state at the start of the step and are
    /// applied afterwards. Independent of body order.
    #[serde(rename = "synchronized")]
    Synchronized,
}

/// Advance `bodies` by `dt` one body at a time, in slice order.
/// Returns the number of coincident pairs skipped.
pub fn euler_sequential(bodies: &mut [Body], gravity: &NewtonianGravity, dt: f64) -> usize {
    let mut skipped = 0;

    for i in 0..bodies.len() {
        // forces see bodies[..i] at their new positions
        let net = gravity.acceleration_on(i, bodies);
        skipped += net.skipped;

        let b = &mut bodies[i];
        b.accelerate(net.a * dt);
        b.advance(dt);
    }

    skipped
}

/// Advance `bodies` by `dt` using accelerations from one snapshot.
/// Returns the number of coincident pairs skipped.
pub fn euler_synchronized(bodies: &mut [Body], gravity: &NewtonianGravity, dt: f64) -> usize {
    let n = bodies.len();
    if n == 0 {
        return 0;
    }

    let mut accels = vec![NVec2::zeros(); n];
    let skipped = gravity.accumulate_accels(bodies, &mut accels);

    for (b, a) in bodies.iter_mut().zip(accels.iter()) {
        b.accelerate(*a * dt);
        b.advance(dt);
    }

    skipped
}
