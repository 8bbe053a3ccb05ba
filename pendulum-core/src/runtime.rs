use crate::config::{ChainConfig, PhysicsConstants};
use crate::constraints::apply_constraints;
use crate::energy::{compute_energies, Energies};
use crate::engine::Chain;
use crate::integrator::integrate;
use glam::DVec2;

/// Live pendulum chain plus everything needed to step it.
///
/// `step` borrows mutably, so readers always see a chain between steps,
/// never one halfway through a sweep.
#[derive(Debug, Clone)]
pub struct Simulation {
    chain: Chain,
    pivot: DVec2,
    config: ChainConfig,
    constants: PhysicsConstants,
    initial_energy: Energies,
    steps: u64,
}

impl Simulation {
    /// Build a chain at rest with the fixed physics constants
    pub fn initialize(config: ChainConfig, pivot: DVec2) -> Self {
        Self::with_constants(config, pivot, PhysicsConstants::default())
    }

    pub fn with_constants(config: ChainConfig, pivot: DVec2, constants: PhysicsConstants) -> Self {
        let chain = Chain::initialize(&config, pivot, constants.pixels_per_meter);
        let mut sim = Self {
            chain,
            pivot,
            config,
            constants,
            initial_energy: Energies::default(),
            steps: 0,
        };
        sim.initial_energy = sim.energies();
        log::debug!(
            "initialized {} bob(s), segment {:.3} px, pivot ({:.1}, {:.1}), energy {:.4} J",
            sim.chain.len(),
            sim.chain.segment_length,
            pivot.x,
            pivot.y,
            sim.initial_energy.total()
        );
        sim
    }

    /// Discard the current chain and rebuild it from `config`
    pub fn reinitialize(&mut self, config: ChainConfig) {
        *self = Self::with_constants(config, self.pivot, self.constants);
    }

    /// Move the anchor. The chain is rebuilt from rest around it.
    pub fn set_pivot(&mut self, pivot: DVec2) {
        if pivot != self.pivot {
            self.rebuild_at(self.config, pivot);
        }
    }

    /// Rebuild from rest with a new configuration around a new anchor
    pub fn rebuild_at(&mut self, config: ChainConfig, pivot: DVec2) {
        *self = Self::with_constants(config, pivot, self.constants);
    }

    /// Advance one fixed time step: integrate, then one constraint sweep.
    ///
    /// `drag` is taken per call so it can be tuned while running; the value
    /// stored in the configuration is only a starting point for callers.
    pub fn step(&mut self, drag: f64) {
        integrate(
            &mut self.chain,
            self.constants.dt,
            self.constants.gravity_px(),
            drag,
        );
        let segment_length = self.chain.segment_length;
        apply_constraints(&mut self.chain, self.pivot, segment_length);
        self.steps += 1;
        log::trace!("step {} done", self.steps);
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn pivot(&self) -> DVec2 {
        self.pivot
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    /// Pivot followed by every bob, in chain order
    pub fn positions(&self) -> Vec<DVec2> {
        std::iter::once(self.pivot)
            .chain(self.chain.bobs.iter().map(|b| b.position))
            .collect()
    }

    pub fn energies(&self) -> Energies {
        compute_energies(
            &self.chain,
            self.pivot,
            self.chain.total_length,
            self.constants.pixels_per_meter,
            self.constants.dt,
            self.constants.gravity,
        )
    }

    /// Energy recorded when the chain was built
    pub fn initial_energy(&self) -> Energies {
        self.initial_energy
    }

    /// Current mechanical energy minus the initial one
    pub fn energy_drift(&self) -> f64 {
        self.energies().total() - self.initial_energy.total()
    }

    /// See [`Chain::max_stretch`]
    pub fn segment_stretch(&self) -> f64 {
        self.chain.max_stretch(self.pivot)
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds since initialization
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.constants.dt
    }
}

/// Energy snapshot taken by the host loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    pub step: u64,
    pub time: f64,
    pub energies: Energies,
}

impl EnergySample {
    pub fn of(sim: &Simulation) -> Self {
        Self {
            step: sim.step_count(),
            time: sim.elapsed(),
            energies: sim.energies(),
        }
    }
}

/// Drive `steps` fixed-cadence ticks on a simulated clock, calling
/// `observer` after each completed step.
pub fn run_for<F>(sim: &mut Simulation, steps: u64, drag: f64, mut observer: F)
where
    F: FnMut(&Simulation),
{
    for _ in 0..steps {
        sim.step(drag);
        observer(sim);
    }
}

/// Converts wall-clock frame times into a whole number of fixed steps.
///
/// Leftover time carries into the next frame. After a stall longer than
/// `max_steps` worth of time the backlog is dropped instead of replayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FixedStepClock {
    pub fn new(step: f64, max_steps: u32) -> Self {
        Self {
            step,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Number of steps to run for a frame that took `frame_dt` seconds
    pub fn ticks(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_steps {
            self.accumulator = 0.0;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Run a fresh simulation headless and sample energies every
/// `sample_every` steps. The initial state is always the first sample.
pub fn run_headless(
    config: ChainConfig,
    pivot: DVec2,
    steps: u64,
    sample_every: u64,
) -> Vec<EnergySample> {
    let mut sim = Simulation::initialize(config, pivot);
    let every = sample_every.max(1);
    let mut samples = vec![EnergySample::of(&sim)];

    run_for(&mut sim, steps, config.drag, |sim| {
        if sim.step_count() % every == 0 {
            samples.push(EnergySample::of(sim));
        }
    });

    samples
}
