use solys::{bench_step, Scenario, ScenarioConfig, StepMode, World};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    Sequential,
    Synchronized,
}

impl From<Mode> for StepMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Sequential => StepMode::Sequential,
            Mode::Synchronized => StepMode::Synchronized,
        }
    }
}

/// Headless driver for the solys N-body engine
#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML file; runs the built-in Sun/Earth scene when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of steps, overrides the scenario
    #[arg(short, long)]
    steps: Option<usize>,

    /// Step size, overrides the scenario
    #[arg(long)]
    dt: Option<f64>,

    /// Step ordering, overrides the scenario
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Log every body's state after this many steps (0 = only at the end)
    #[arg(long, default_value_t = 100)]
    report_every: usize,

    /// Time the step loop instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    match &args.file {
        Some(path) => {
            let cfg = ScenarioConfig::from_path(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            Ok(Scenario::build_scenario(&cfg)?)
        }
        None => Ok(Scenario::sun_earth()?),
    }
}

fn report(world: &World) {
    for b in world.snapshot() {
        let x = b.position();
        let v = b.velocity();
        log::info!(
            "t = {:.4} {:>8}: x = ({:.4}, {:.4}) v = ({:.4}, {:.4})",
            world.time(),
            b.name(),
            x.x,
            x.y,
            v.x,
            v.y
        );
    }
    let p = world.total_momentum();
    log::info!(
        "t = {:.4} momentum = ({:.6e}, {:.6e}) kinetic energy = {:.6e}",
        world.time(),
        p.x,
        p.y,
        world.kinetic_energy()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let mut scenario = load_scenario(&args)?;
    if let Some(mode) = args.mode {
        scenario.world.set_step_mode(mode.into());
    }
    let dt = args.dt.unwrap_or(scenario.dt);
    let steps = args.steps.unwrap_or(scenario.steps);
    if dt < 0.0 {
        bail!("dt must not be negative, got {}", dt);
    }

    log::info!(
        "running {} steps of dt = {} over {} bodies ({:?})",
        steps,
        dt,
        scenario.world.len(),
        scenario.world.step_mode()
    );
    report(&scenario.world);

    let mut skipped = 0;
    for i in 1..=steps {
        let r = scenario.world.step(dt)?;
        skipped += r.skipped_pairs;
        if args.report_every != 0 && i % args.report_every == 0 {
            report(&scenario.world);
        }
    }

    report(&scenario.world);
    if skipped > 0 {
        log::warn!("{} coincident pairs were skipped during the run", skipped);
    }

    Ok(())
}
