//! Chain configuration and the fixed physics constants.
//!
//! The physics core trusts whatever it is handed. Callers that take values
//! from users (CLI flags, sliders, preset files) run them through
//! [`ChainConfig::validate`] or [`ChainConfig::clamped`] first.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.8;
/// Scale between simulation space (pixels) and physical space (meters).
pub const PIXELS_PER_METER: f64 = 100.0;
/// Fixed time step, one 60 Hz frame.
pub const TIME_STEP: f64 = 0.016;

pub const BOB_COUNT_RANGE: RangeInclusive<usize> = 1..=10;
pub const MASS_RANGE: RangeInclusive<f64> = 1.0..=10.0;
pub const LENGTH_RANGE: RangeInclusive<f64> = 1.0..=5.0;
pub const ANGLE_RANGE: RangeInclusive<f64> = 1.0..=60.0;
pub const DRAG_RANGE: RangeInclusive<f64> = 0.01..=0.05;

/// Errors raised while loading or checking a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// User-facing description of a pendulum chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Number of bobs in the chain
    pub bob_count: usize,
    /// Mass of every bob, in kilograms
    pub mass: f64,
    /// Total chain length, in meters
    pub length_m: f64,
    /// Initial angle from vertical, in degrees
    pub angle_deg: f64,
    /// Quadratic air drag coefficient
    pub drag: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            bob_count: 1,
            mass: 1.0,
            length_m: 1.0,
            angle_deg: 15.0,
            drag: 0.01,
        }
    }
}

impl ChainConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the physics core cannot run with.
    ///
    /// This is looser than [`ChainConfig::clamped`]: any positive mass and
    /// length pass, only degenerate or non-finite values fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bob_count == 0 {
            return Err(ConfigError::invalid("bob_count", "must be at least 1"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::invalid(
                "mass",
                format!("must be positive, got {}", self.mass),
            ));
        }
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(ConfigError::invalid(
                "length_m",
                format!("must be positive, got {}", self.length_m),
            ));
        }
        if !self.angle_deg.is_finite() {
            return Err(ConfigError::invalid("angle_deg", "must be finite"));
        }
        if !self.drag.is_finite() || self.drag < 0.0 {
            return Err(ConfigError::invalid(
                "drag",
                format!("must be non-negative, got {}", self.drag),
            ));
        }
        Ok(())
    }

    /// Clamp every field into the range offered by the interactive controls.
    pub fn clamped(&self) -> Self {
        let clamped = Self {
            bob_count: self
                .bob_count
                .clamp(*BOB_COUNT_RANGE.start(), *BOB_COUNT_RANGE.end()),
            mass: clamp_f64(self.mass, &MASS_RANGE),
            length_m: clamp_f64(self.length_m, &LENGTH_RANGE),
            angle_deg: clamp_f64(self.angle_deg, &ANGLE_RANGE),
            drag: clamp_f64(self.drag, &DRAG_RANGE),
        };
        if clamped != *self {
            log::warn!("configuration clamped from {:?} to {:?}", self, clamped);
        }
        clamped
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    /// Total chain length in simulation units
    pub fn total_length(&self, pixels_per_meter: f64) -> f64 {
        self.length_m * pixels_per_meter
    }
}

// NaN falls to the lower bound so the result is always usable.
fn clamp_f64(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

/// Constants the integrator runs with.
///
/// [`PhysicsConstants::default`] carries the fixed production values; other
/// values are only useful for tests and experiments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    /// Time step in seconds
    pub dt: f64,
    /// Gravitational acceleration in m/s²
    pub gravity: f64,
    pub pixels_per_meter: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            dt: TIME_STEP,
            gravity: GRAVITY,
            pixels_per_meter: PIXELS_PER_METER,
        }
    }
}

impl PhysicsConstants {
    /// Gravity scaled into simulation units (pixels/s²)
    pub fn gravity_px(&self) -> f64 {
        self.gravity * self.pixels_per_meter
    }
}
