use std::time::Instant;

use crate::simulation::error::EngineError;
use crate::simulation::integrator::StepMode;
use crate::simulation::states::{Body, NVec2};
use crate::simulation::world::World;

/// Helper to build a world of `n` equal point masses
fn make_world(n: usize, mode: StepMode) -> Result<World, EngineError> {
    let mut world = World::new(0.1).with_step_mode(mode);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new((i_f * 0.37).sin() * 5.0, (i_f * 0.13).cos() * 5.0);
        world.spawn(Body::point(1.0)?.with_position(x));
    }

    Ok(world)
}

/// Wall-clock time per step in ms, averaged over `steps` after one warm-up step
fn time_steps(world: &mut World, dt: f64, steps: usize) -> Result<f64, EngineError> {
    world.step(dt)?;

    let t0 = Instant::now();
    for _ in 0..steps {
        world.step(dt)?;
    }
    Ok(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64)
}

/// Time `World::step` for a range of n in both step modes.
/// Paste output directly into a spreadsheet to graph.
pub fn bench_step() -> Result<(), EngineError> {
    println!("N,sequential_ms,synchronized_ms");

    for n in [50, 100, 200, 400, 800, 1600] {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 10 } else { 2 };

        let mut seq = make_world(n, StepMode::Sequential)?;
        let mut sync = make_world(n, StepMode::Synchronized)?;

        let ms_seq = time_steps(&mut seq, 0.001, steps)?;
        let ms_sync = time_steps(&mut sync, 0.001, steps)?;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_sync);
    }

    Ok(())
}
