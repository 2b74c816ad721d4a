pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, BodyKind, NVec2, BEARING_OFFSET_DEG};
pub use simulation::error::{EngineError, ScenarioError};
pub use simulation::orbit::{circular_orbit_speed, circular_orbit_speed_multi};
pub use simulation::forces::{NewtonianGravity, COINCIDENT_DISTANCE_SQUARED};
pub use simulation::integrator::{euler_sequential, euler_synchronized, StepMode};
pub use simulation::world::{World, StepReport};
pub use simulation::scenario::{Scenario, build_world};

pub use configuration::config::{ScenarioConfig, WorldConfig, BodyConfig, BodyKindConfig};

pub use benchmark::benchmark::bench_step;
