pub mod config;
pub mod constraints;
pub mod energy;
pub mod engine;
pub mod integrator;
pub mod runtime;

pub use config::{ChainConfig, ConfigError, PhysicsConstants, GRAVITY, PIXELS_PER_METER, TIME_STEP};
pub use constraints::apply_constraints;
pub use energy::{compute_energies, Energies};
pub use engine::{Bob, Chain};
pub use integrator::integrate;
pub use runtime::{run_for, run_headless, EnergySample, FixedStepClock, Simulation};

pub use glam;
