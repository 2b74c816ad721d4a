pub mod states;
pub mod error;
pub mod orbit;
pub mod forces;
pub mod integrator;
pub mod world;
pub mod scenario;
