use crate::config::ChainConfig;
use glam::DVec2;

/// A point mass on the chain
#[derive(Debug, Clone, PartialEq)]
pub struct Bob {
    pub mass: f64,
    pub position: DVec2,
    /// Position before the most recent integration step. Velocity is never
    /// stored; it is implied by the difference of the two positions.
    pub previous_position: DVec2,
}

impl Bob {
    /// A bob at rest
    pub fn at_rest(mass: f64, position: DVec2) -> Self {
        Self {
            mass,
            position,
            previous_position: position,
        }
    }

    /// Velocity estimate in simulation units per second
    pub fn velocity(&self, dt: f64) -> DVec2 {
        (self.position - self.previous_position) / dt
    }
}

/// Ordered bobs hanging from a pivot, index 0 nearest the pivot
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub bobs: Vec<Bob>,
    /// Maximum distance between neighbours (and between the pivot and bob 0)
    pub segment_length: f64,
    /// Total chain length in simulation units
    pub total_length: f64,
}

impl Chain {
    /// Lay the bobs out from rest along a straight line at the configured
    /// angle from vertical. An angle of zero hangs straight down (+y).
    pub fn initialize(config: &ChainConfig, pivot: DVec2, pixels_per_meter: f64) -> Self {
        let count = config.bob_count;
        let total_length = config.total_length(pixels_per_meter);
        let segment_length = total_length / count as f64;
        let (sin, cos) = config.angle_rad().sin_cos();

        let bobs = (1..=count)
            .map(|i| {
                let ratio = i as f64 / count as f64;
                let position =
                    pivot + DVec2::new(total_length * sin * ratio, total_length * cos * ratio);
                Bob::at_rest(config.mass, position)
            })
            .collect();

        Self {
            bobs,
            segment_length,
            total_length,
        }
    }

    pub fn len(&self) -> usize {
        self.bobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bobs.is_empty()
    }

    pub fn is_at_rest(&self) -> bool {
        self.bobs.iter().all(|b| b.position == b.previous_position)
    }

    /// Largest amount by which any segment exceeds `segment_length`.
    /// Zero when nothing is stretched.
    pub fn max_stretch(&self, pivot: DVec2) -> f64 {
        let mut anchor = pivot;
        let mut worst = 0.0_f64;
        for bob in &self.bobs {
            worst = worst.max(bob.position.distance(anchor) - self.segment_length);
            anchor = bob.position;
        }
        worst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bobs_laid_out_at_fractions_of_length() {
        let config = ChainConfig {
            bob_count: 4,
            length_m: 2.0,
            angle_deg: 30.0,
            ..ChainConfig::default()
        };
        let pivot = DVec2::new(500.0, 50.0);
        let chain = Chain::initialize(&config, pivot, 100.0);

        assert_eq!(chain.len(), 4);
        assert!((chain.segment_length - 50.0).abs() < 1e-12);
        for (i, bob) in chain.bobs.iter().enumerate() {
            let expected = 50.0 * (i + 1) as f64;
            assert!((bob.position.distance(pivot) - expected).abs() < 1e-9);
        }
        let last = chain.bobs[3].position - pivot;
        assert!((last.x - 200.0 * 0.5).abs() < 1e-9);
        assert!(last.y > 0.0);
        assert!(chain.is_at_rest());
    }
}
