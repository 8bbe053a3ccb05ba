use crate::engine::Chain;
use glam::DVec2;

/// Advance every bob by one step of position Verlet with quadratic drag.
///
/// Produces unconstrained positions; call
/// [`apply_constraints`](crate::constraints::apply_constraints) afterwards.
/// `gravity` is in simulation units (pixels/s²) and points along +y.
pub fn integrate(chain: &mut Chain, dt: f64, gravity: f64, drag: f64) {
    let dt_sq = dt * dt;

    // Each bob only reads its own state, so one pass is enough.
    for bob in &mut chain.bobs {
        let velocity = bob.velocity(dt);
        let drag_force = -drag * velocity.length() * velocity;
        let acceleration = DVec2::new(0.0, gravity) + drag_force / bob.mass;

        bob.previous_position = bob.position;
        bob.position += velocity * dt + acceleration * dt_sq;
    }
}
