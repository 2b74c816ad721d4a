//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - the `World` with every body spawned in file order
//! - the step size and step count the driver should use
//!
//! Bodies that list `orbit` centres get their velocity seeded onto a
//! circular orbit around those centres at build time.

use crate::configuration::config::{BodyConfig, BodyKindConfig, ScenarioConfig};
use crate::simulation::error::{EngineError, ScenarioError};
use crate::simulation::states::{Body, NVec2};
use crate::simulation::world::World;

pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_STEPS: usize = 1000;

/// Gravitational constant of the built-in Sun/Earth scene
pub const SUN_EARTH_G: f64 = 0.081;

/// A world ready to run, plus how the driver should run it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub world: World,
    pub dt: f64,
    pub steps: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ScenarioError> {
        let world = build_world(cfg)?;
        log::info!(
            "built scenario: {} bodies, G = {}, {:?} stepping",
            world.len(),
            world.gravitational_constant(),
            world.step_mode()
        );

        Ok(Self {
            world,
            dt: cfg.world.dt.unwrap_or(DEFAULT_DT),
            steps: cfg.world.steps.unwrap_or(DEFAULT_STEPS),
        })
    }

    /// The default scene: a dense Sun at the origin and an Earth 400 m below
    /// it, moving along +x at circular orbit speed.
    pub fn sun_earth() -> Result<Self, EngineError> {
        let mut world = World::new(SUN_EARTH_G);

        let sun = Body::celestial(500.0, 70.0)?.with_name("Sun");
        let mut earth = Body::celestial(1.5, 6.0)?
            .with_name("Earth")
            .with_position(NVec2::new(0.0, -400.0));
        let speed = earth.circular_orbit_speed_around(SUN_EARTH_G, &sun);
        earth.set_velocity(NVec2::new(speed, 0.0));

        world.spawn(sun);
        world.spawn(earth);

        Ok(Self {
            world,
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
        })
    }
}

/// Map a `ScenarioConfig` to a `World`, spawning bodies in file order
pub fn build_world(cfg: &ScenarioConfig) -> Result<World, ScenarioError> {
    let g = cfg.world.g;
    if !g.is_finite() || g < 0.0 {
        return Err(ScenarioError::InvalidGravitationalConstant(g));
    }
    let mut world = World::new(cfg.world.g).with_step_mode(cfg.world.step_mode);

    for bc in &cfg.bodies {
        let body = build_body(&world, bc)?;
        world.spawn(body);
    }

    Ok(world)
}

fn build_body(world: &World, bc: &BodyConfig) -> Result<Body, ScenarioError> {
    let mut body = match bc.kind {
        BodyKindConfig::Celestial { density, radius } => Body::celestial(density, radius)?,
        BodyKindConfig::Point { mass } => Body::point(mass)?,
    };
    if let Some(name) = &bc.name {
        body.set_name(name.as_str());
    }
    body.set_position(NVec2::new(bc.x[0], bc.x[1]));

    let v = NVec2::new(bc.v[0], bc.v[1]);
    if bc.orbit.is_empty() {
        body.set_velocity(v);
        return Ok(body);
    }

    // Resolve orbit centres against bodies spawned so far
    let mut centers = Vec::with_capacity(bc.orbit.len());
    for center in &bc.orbit {
        let c = world.find_by_name(center).ok_or_else(|| ScenarioError::UnknownCenter {
            body: bc.name.clone().unwrap_or_default(),
            center: center.clone(),
        })?;
        centers.push(c);
    }

    let first = centers[0];
    let radial = body.position() - first.position();
    if radial.norm_squared() == 0.0 {
        return Err(EngineError::CoincidentBodies {
            a: None,
            b: first.id(),
        }
        .into());
    }

    // Tangent is the radius vector turned a quarter towards +x when the body
    // sits below its centre, matching the built-in scene.
    let tangent = NVec2::new(-radial.y, radial.x).normalize();
    let speed = body
        .circular_orbit_speed_around_all(world.gravitational_constant(), &centers)
        .unwrap_or(0.0);

    body.set_velocity(first.velocity() + tangent * speed + v);
    Ok(body)
}
