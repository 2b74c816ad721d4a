//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WorldConfig`]    – gravitational constant and step settings
//! - [`BodyConfig`]     – initial state for each body
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The built-in Sun/Earth scene written out as a scenario:
//!
//! ```yaml
//! world:
//!   G: 0.081                  # gravitational constant
//!   step_mode: sequential     # or "synchronized"
//!   dt: 0.01                  # step size used by the driver
//!   steps: 1000               # number of steps the driver runs
//!
//! bodies:
//!   - name: Sun
//!     kind: { type: celestial, density: 500.0, radius: 70.0 }
//!     x: [ 0.0, 0.0 ]
//!   - name: Earth
//!     kind: { type: celestial, density: 1.5, radius: 6.0 }
//!     x: [ 0.0, -400.0 ]
//!     orbit: [ Sun ]          # seed a circular orbit around these bodies
//! ```
//!
//! `scenario::build_world` maps this configuration into a runtime `World`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::error::ScenarioError;
use crate::simulation::integrator::StepMode;

/// How a body gets its mass
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum BodyKindConfig {
    #[serde(rename = "celestial")] // Mass derived from density (kg/m^3) and radius (m)
    Celestial { density: f64, radius: f64 },

    #[serde(rename = "point")] // Raw mass in kg
    Point { mass: f64 },
}

/// World-level settings
#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    #[serde(default)]
    pub step_mode: StepMode, // ordering of body updates within a step
    pub dt: Option<f64>, // step size, the driver falls back to its own default
    pub steps: Option<usize>, // number of steps, same fallback
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: Option<String>, // display label, defaults to the id
    pub kind: BodyKindConfig,
    #[serde(default)]
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, relative to the first orbit centre if `orbit` is set
    #[serde(default)]
    pub orbit: Vec<String>, // names of earlier bodies to orbit, innermost first
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
