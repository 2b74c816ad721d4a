//! Core state types for the N-body simulation.
//!
//! Defines the 2D point-mass `Body`, its id, and the closed set of body kinds:
//! - `BodyKind::Celestial` derives its mass from density and radius
//! - `BodyKind::Unknown` carries a raw mass and nothing else
//!
//! Bodies are plain values until they are spawned into a `World`, which
//! assigns the id and owns them from then on.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector2;

use super::error::EngineError;
use super::forces::COINCIDENT_DISTANCE_SQUARED;
use super::orbit::{circular_orbit_speed, circular_orbit_speed_multi};

pub type NVec2 = Vector2<f64>;

/// Offset in degrees applied by [`Body::angle_to`] so that bearing 0 points
/// towards decreasing y. Coupled with the `(sin, -cos)` convention of
/// [`Body::angle_to_unit_vector`]; changing one alone flips orbit direction.
pub const BEARING_OFFSET_DEG: f64 = -90.0;

/// Identity of a body inside a world. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of body this is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Sphere of uniform density; mass = density * (4/3) * pi * radius^3
    Celestial { density: f64, radius: f64 },
    /// Raw point mass
    Unknown,
}

/// Volume of a sphere: V = (4/3) * pi * r^3
pub fn sphere_volume(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius * radius * radius
}

/// Mass from density and volume: m = d * V
pub fn mass_from_density(density: f64, volume: f64) -> f64 {
    density * volume
}

fn check_mass(m: f64) -> Result<f64, EngineError> {
    if m.is_finite() && m > 0.0 {
        Ok(m)
    } else {
        Err(EngineError::InvalidMass(m))
    }
}

fn derive_mass(density: f64, radius: f64) -> Result<f64, EngineError> {
    let m = mass_from_density(density, sphere_volume(radius));
    // negative density and negative radius would multiply out to a positive mass
    if density <= 0.0 || radius <= 0.0 {
        return Err(EngineError::InvalidMass(m.min(0.0)));
    }
    check_mass(m)
}

#[derive(Debug, Clone)]
pub struct Body {
    id: Option<BodyId>, // set on spawn
    name: String, // display label
    default_name: bool, // name was filled in from the id
    x: NVec2, // position
    v: NVec2, // velocity
    m: f64, // mass
    kind: BodyKind,
}

impl Body {
    /// Celestial body from density (kg/m^3) and radius (m), at rest at the origin
    pub fn celestial(density: f64, radius: f64) -> Result<Self, EngineError> {
        let m = derive_mass(density, radius)?;
        Ok(Self {
            id: None,
            name: String::new(),
            default_name: false,
            x: NVec2::zeros(),
            v: NVec2::zeros(),
            m,
            kind: BodyKind::Celestial { density, radius },
        })
    }

    /// Point body with a raw mass in kg, at rest at the origin
    pub fn point(mass: f64) -> Result<Self, EngineError> {
        let m = check_mass(mass)?;
        Ok(Self {
            id: None,
            name: String::new(),
            default_name: false,
            x: NVec2::zeros(),
            v: NVec2::zeros(),
            m,
            kind: BodyKind::Unknown,
        })
    }

    pub fn with_position(mut self, x: NVec2) -> Self {
        self.x = x;
        self
    }

    pub fn with_velocity(mut self, v: NVec2) -> Self {
        self.v = v;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.default_name = false;
        self
    }

    /// Called by the world on spawn. An empty name, or one that was itself
    /// filled in from an earlier id, becomes the decimal id.
    pub(crate) fn assign_id(&mut self, id: BodyId) {
        self.id = Some(id);
        if self.name.is_empty() || self.default_name {
            self.name = id.to_string();
            self.default_name = true;
        }
    }

    /// `None` until the body has been spawned into a world
    pub fn id(&self) -> Option<BodyId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.default_name = false;
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> Option<f64> {
        match self.kind {
            BodyKind::Celestial { radius, .. } => Some(radius),
            BodyKind::Unknown => None,
        }
    }

    pub fn density(&self) -> Option<f64> {
        match self.kind {
            BodyKind::Celestial { density, .. } => Some(density),
            BodyKind::Unknown => None,
        }
    }

    pub fn set_position(&mut self, x: NVec2) {
        self.x = x;
    }

    pub fn set_velocity(&mut self, v: NVec2) {
        self.v = v;
    }

    /// Change the radius of a celestial body and re-derive its mass.
    /// The body is left untouched on error.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), EngineError> {
        match self.kind {
            BodyKind::Celestial { density, .. } => {
                self.m = derive_mass(density, radius)?;
                self.kind = BodyKind::Celestial { density, radius };
                Ok(())
            }
            BodyKind::Unknown => Err(EngineError::NotCelestial(self.id)),
        }
    }

    /// Change the density of a celestial body and re-derive its mass.
    /// The body is left untouched on error.
    pub fn set_density(&mut self, density: f64) -> Result<(), EngineError> {
        match self.kind {
            BodyKind::Celestial { radius, .. } => {
                self.m = derive_mass(density, radius)?;
                self.kind = BodyKind::Celestial { density, radius };
                Ok(())
            }
            BodyKind::Unknown => Err(EngineError::NotCelestial(self.id)),
        }
    }

    /// Overwrite the mass of a raw point body
    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        match self.kind {
            BodyKind::Unknown => {
                self.m = check_mass(mass)?;
                Ok(())
            }
            BodyKind::Celestial { .. } => Err(EngineError::DerivedMass(self.id)),
        }
    }

    /// v += a. The integrator calls this once per step with the net acceleration times dt.
    pub fn accelerate(&mut self, a: NVec2) {
        self.v += a;
    }

    /// x += v * dt, using whatever velocity the body has right now
    pub fn advance(&mut self, dt: f64) {
        self.x += self.v * dt;
    }

    pub fn distance(&self, other: &Body) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Body) -> f64 {
        let d = self.x - other.x;
        d.x * d.x + d.y * d.y
    }

    /// F = G * m * M / r^2. Fails when both bodies sit on the same point, or
    /// are so close that the force is no longer a finite number.
    pub fn gravitational_force(&self, g: f64, other: &Body) -> Result<f64, EngineError> {
        let r2 = self.distance_squared(other);
        let f = (g * self.m * other.m) / r2;
        if r2 <= COINCIDENT_DISTANCE_SQUARED || !f.is_finite() {
            return Err(EngineError::CoincidentBodies {
                a: self.id,
                b: other.id,
            });
        }
        Ok(f)
    }

    /// a = F / m
    pub fn acceleration_from_force(&self, force: f64) -> f64 {
        force / self.m
    }

    /// Bearing in degrees from this body towards `other`.
    ///
    /// `atan2` of `self - other`, shifted into `[0, 360)`, then offset by
    /// [`BEARING_OFFSET_DEG`]. Feed the result to [`Body::angle_to_unit_vector`].
    pub fn angle_to(&self, other: &Body) -> f64 {
        let d = self.x - other.x;
        let mut angle = d.y.atan2(d.x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        angle + BEARING_OFFSET_DEG
    }

    /// Unit vector for a bearing produced by [`Body::angle_to`]: (sin t, -cos t)
    pub fn angle_to_unit_vector(angle_deg: f64) -> NVec2 {
        let t = angle_deg.to_radians();
        NVec2::new(t.sin(), -t.cos())
    }

    /// Value equality over position, velocity and mass. Two distinct bodies
    /// can compare equal here, so this says nothing about identity.
    pub fn same_state_as(&self, other: &Body) -> bool {
        self.x == other.x && self.v == other.v && self.m == other.m
    }

    /// Speed for a circular orbit around `center` at the current distance,
    /// ignoring every other body
    pub fn circular_orbit_speed_around(&self, g: f64, center: &Body) -> f64 {
        circular_orbit_speed(g, center.m, self.distance(center))
    }

    /// Speed for an approximate orbit around the combined mass of `centers`.
    /// The distance is measured to `centers[0]`, so order them innermost first.
    /// Returns `None` for an empty slice.
    pub fn circular_orbit_speed_around_all(&self, g: f64, centers: &[&Body]) -> Option<f64> {
        let first = centers.first()?;
        let masses: Vec<f64> = centers.iter().map(|c| c.m).collect();
        Some(circular_orbit_speed_multi(g, &masses, self.distance(first)))
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}
