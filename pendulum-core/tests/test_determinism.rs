//! Determinism and rest equilibrium

use glam::DVec2;
use pendulum_core::tests::test_helpers::{config_with_bobs, positions_approx_equal};
use pendulum_core::{ChainConfig, PhysicsConstants, Simulation};

#[test]
fn test_initialization_determinism() {
    let config = ChainConfig {
        bob_count: 7,
        mass: 3.0,
        length_m: 4.0,
        angle_deg: 33.0,
        drag: 0.02,
    };
    let pivot = DVec2::new(512.0, 50.0);
    let a = Simulation::initialize(config, pivot);
    let b = Simulation::initialize(config, pivot);

    assert_eq!(a.chain(), b.chain());
    assert!(a.chain().is_at_rest());
    assert_eq!(a.energies().kinetic, 0.0);
}

#[test]
fn test_stepping_is_deterministic() {
    let run = || {
        let mut sim = Simulation::initialize(config_with_bobs(6), DVec2::ZERO);
        for _ in 0..1000 {
            sim.step(0.03);
        }
        sim.positions()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_rest_equilibrium_without_gravity() {
    let constants = PhysicsConstants {
        gravity: 0.0,
        ..PhysicsConstants::default()
    };
    for bobs in [1, 3, 10] {
        let config = ChainConfig {
            bob_count: bobs,
            angle_deg: 0.0,
            ..ChainConfig::default()
        };
        let mut sim = Simulation::with_constants(config, DVec2::new(100.0, 50.0), constants);
        let start = sim.positions();
        for _ in 0..500 {
            sim.step(0.0);
        }
        assert!(
            positions_approx_equal(&start, &sim.positions(), 1e-9),
            "{} bob(s) drifted",
            bobs
        );
    }
}

#[test]
fn test_reinitialize_discards_state() {
    let mut sim = Simulation::initialize(config_with_bobs(4), DVec2::ZERO);
    for _ in 0..100 {
        sim.step(0.01);
    }
    sim.reinitialize(config_with_bobs(2));

    let fresh = Simulation::initialize(config_with_bobs(2), DVec2::ZERO);
    assert_eq!(sim.chain(), fresh.chain());
    assert_eq!(sim.step_count(), 0);
    assert_eq!(sim.initial_energy(), fresh.initial_energy());
}
