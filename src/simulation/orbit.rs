//! Circular orbit speeds for seeding scenarios
//!
//! Only used when setting a scene up, never inside the step loop.

/// Speed needed at distance `r` from a single mass `center_mass` to stay on a
/// circular orbit, ignoring all other bodies: v = sqrt(G * M / r)
pub fn circular_orbit_speed(g: f64, center_mass: f64, r: f64) -> f64 {
    ((g * center_mass) / r).sqrt()
}

/// Same as [`circular_orbit_speed`] with `M` replaced by the sum of
/// `ordered_masses`.
///
/// This is an approximation: orbits around several bodies have no closed
/// form. It only makes sense when `r` is the distance from the *first* mass
/// in the sequence and the others sit roughly inside the orbit.
pub fn circular_orbit_speed_multi(g: f64, ordered_masses: &[f64], r: f64) -> f64 {
    let total: f64 = ordered_masses.iter().sum();
    circular_orbit_speed(g, total, r)
}
