use crate::engine::Chain;
use glam::DVec2;

/// Kinetic and gravitational potential energy of a chain, in joules
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Energies {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energies {
    /// Mechanical energy
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Compute the energy totals of `chain` without touching it.
///
/// Potential energy is measured against the lowest point a fully extended
/// vertical chain could reach (`pivot.y + total_length`). With y growing
/// downward, a bob near the pivot holds the most potential energy and a bob
/// at full extension holds none.
///
/// `total_length` is in simulation units, `gravity` in m/s².
pub fn compute_energies(
    chain: &Chain,
    pivot: DVec2,
    total_length: f64,
    pixels_per_meter: f64,
    dt: f64,
    gravity: f64,
) -> Energies {
    let to_meters = 1.0 / pixels_per_meter;
    let equilibrium_y = pivot.y + total_length;

    chain
        .bobs
        .iter()
        .fold(Energies::default(), |mut acc, bob| {
            let velocity = bob.velocity(dt) * to_meters;
            acc.kinetic += 0.5 * bob.mass * velocity.length_squared();
            acc.potential += bob.mass * gravity * (equilibrium_y - bob.position.y) * to_meters;
            acc
        })
}
