//! Error types for the simulation engine
//!
//! Every engine error is local to the call that produced it and can be
//! recovered from by the caller. None of them are fatal to the process.

use std::fmt;

use super::states::BodyId;

/// Errors reported by bodies and the world
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A body was constructed or mutated to a mass that is not a positive, finite number
    InvalidMass(f64),
    /// Two distinct bodies share a position, gravitation between them is undefined
    CoincidentBodies { a: Option<BodyId>, b: Option<BodyId> },
    /// No body with this id lives in the world
    UnknownId(BodyId),
    /// Timestep was negative or not finite
    InvalidTimestep(f64),
    /// A density/radius setter was called on a body without the celestial kind
    NotCelestial(Option<BodyId>),
    /// Mass was set directly on a body whose mass is derived from density and radius
    DerivedMass(Option<BodyId>),
}

fn fmt_id(id: &Option<BodyId>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "<unspawned>".to_string(),
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidMass(m) => write!(f, "Invalid mass {}: mass must be positive and finite", m),
            EngineError::CoincidentBodies { a, b } => write!(
                f,
                "Bodies {} and {} occupy the same position, gravitation is undefined",
                fmt_id(a),
                fmt_id(b)
            ),
            EngineError::UnknownId(id) => write!(f, "No body with id {} in the world", id),
            EngineError::InvalidTimestep(dt) => write!(f, "Invalid timestep {}: dt must be finite and >= 0", dt),
            EngineError::NotCelestial(id) => write!(f, "Body {} has no density or radius", fmt_id(id)),
            EngineError::DerivedMass(id) => write!(
                f,
                "Body {} derives its mass from density and radius, set those instead",
                fmt_id(id)
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors that can occur while loading or building a scenario
#[derive(Debug)]
pub enum ScenarioError {
    /// Failed to read the scenario file
    Io(std::io::Error),
    /// The file is not a valid scenario document
    Yaml(serde_yaml::Error),
    /// A body names an orbit centre that is not defined before it
    UnknownCenter { body: String, center: String },
    /// G is negative or not finite
    InvalidGravitationalConstant(f64),
    /// A world or body parameter was rejected by the engine
    Engine(EngineError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "Failed to read scenario file: {}", e),
            ScenarioError::Yaml(e) => write!(f, "Failed to parse scenario: {}", e),
            ScenarioError::UnknownCenter { body, center } => write!(
                f,
                "Body '{}' orbits '{}', which is not defined earlier in the scenario",
                body, center
            ),
            ScenarioError::InvalidGravitationalConstant(g) => {
                write!(f, "Invalid gravitational constant {}: G must be finite and >= 0", g)
            }
            ScenarioError::Engine(e) => write!(f, "Invalid scenario: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io(e) => Some(e),
            ScenarioError::Yaml(e) => Some(e),
            ScenarioError::Engine(e) => Some(e),
            ScenarioError::UnknownCenter { .. } | ScenarioError::InvalidGravitationalConstant(_) => None,
        }
    }
}

impl From<std::io::Error> for ScenarioError {
    fn from(e: std::io::Error) -> Self {
        ScenarioError::Io(e)
    }
}

impl From<serde_yaml::Error> for ScenarioError {
    fn from(e: serde_yaml::Error) -> Self {
        ScenarioError::Yaml(e)
    }
}

impl From<EngineError> for ScenarioError {
    fn from(e: EngineError) -> Self {
        ScenarioError::Engine(e)
    }
}
