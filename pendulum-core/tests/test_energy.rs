//! Energy accounting and dissipation under drag

use glam::DVec2;
use pendulum_core::tests::test_helpers::{approx_eq, config_with_bobs, energy_trace};
use pendulum_core::{ChainConfig, Simulation, GRAVITY};

#[test]
fn test_at_rest_energies_match_formula() {
    let config = ChainConfig {
        bob_count: 4,
        mass: 2.5,
        length_m: 2.0,
        angle_deg: 40.0,
        drag: 0.01,
    };
    let sim = Simulation::initialize(config, DVec2::new(500.0, 50.0));
    let energies = sim.energies();

    // Bob i sits (1 - cos θ · i/n) · L meters above the reference line
    let cos = config.angle_deg.to_radians().cos();
    let expected: f64 = (1..=4)
        .map(|i| config.mass * GRAVITY * config.length_m * (1.0 - cos * i as f64 / 4.0))
        .sum();

    assert_eq!(energies.kinetic, 0.0);
    assert!(approx_eq(energies.potential, expected, 1e-9));
    assert_eq!(sim.initial_energy(), energies);
}

#[test]
fn test_straight_down_single_bob_has_no_potential() {
    let config = ChainConfig {
        angle_deg: 0.0,
        ..ChainConfig::default()
    };
    let sim = Simulation::initialize(config, DVec2::ZERO);
    assert!(sim.energies().potential.abs() < 1e-9);
}

#[test]
fn test_potential_largest_near_pivot() {
    let low = Simulation::initialize(
        ChainConfig {
            angle_deg: 5.0,
            ..ChainConfig::default()
        },
        DVec2::ZERO,
    );
    let high = Simulation::initialize(
        ChainConfig {
            angle_deg: 60.0,
            ..ChainConfig::default()
        },
        DVec2::ZERO,
    );
    assert!(high.energies().potential > low.energies().potential);
}

#[test]
fn test_energy_query_does_not_mutate() {
    let mut sim = Simulation::initialize(config_with_bobs(3), DVec2::ZERO);
    for _ in 0..20 {
        sim.step(0.01);
    }
    let before = sim.chain().clone();
    let first = sim.energies();
    let second = sim.energies();
    assert_eq!(first, second);
    assert_eq!(sim.chain(), &before);
}

#[test]
fn test_energy_never_exceeds_initial_with_drag() {
    for bobs in [1, 3, 5] {
        let mut sim = Simulation::initialize(config_with_bobs(bobs), DVec2::ZERO);
        let initial = sim.initial_energy().total();
        let trace = energy_trace(&mut sim, 2000, 0.01);
        for (step, energy) in trace.iter().enumerate() {
            assert!(
                *energy <= initial + 1e-6,
                "{} bob(s): energy {} above initial {} at step {}",
                bobs,
                energy,
                initial,
                step
            );
        }
    }
}

#[test]
fn test_energy_bleeds_under_drag() {
    let mut sim = Simulation::initialize(config_with_bobs(3), DVec2::ZERO);
    let trace = energy_trace(&mut sim, 2000, 0.01);

    // Peak energy per 100-step window must not grow
    let peaks: Vec<f64> = trace
        .chunks(100)
        .map(|w| w.iter().cloned().fold(f64::MIN, f64::max))
        .collect();
    for pair in peaks.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-6, "window peak rose: {:?}", pair);
    }
}

#[test]
fn test_single_bob_comes_to_rest() {
    let mut sim = Simulation::initialize(ChainConfig::default(), DVec2::ZERO);
    let initial = sim.initial_energy().total();
    energy_trace(&mut sim, 500, 0.01);
    assert!(sim.energies().total() < 0.1 * initial);
    assert!(sim.energy_drift() < 0.0);
}
