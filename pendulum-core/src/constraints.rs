//! Maximum-distance constraints between the pivot and consecutive bobs.
//!
//! One forward sweep per step, pivot first. Corrections between bobs are
//! split evenly regardless of mass, and a later correction may re-stretch a
//! pair fixed earlier in the sweep. That residual is left for the next frame,
//! which gives multi-bob chains a slight elasticity.

use crate::engine::Chain;
use glam::DVec2;

/// Pull over-stretched segments back to `segment_length`.
/// Segments shorter than `segment_length` are left alone.
pub fn apply_constraints(chain: &mut Chain, pivot: DVec2, segment_length: f64) {
    let Some(first) = chain.bobs.first_mut() else {
        return;
    };

    let delta = first.position - pivot;
    let dist = delta.length();
    if dist > segment_length {
        first.position = pivot + delta * (segment_length / dist);
    }

    for i in 0..chain.bobs.len().saturating_sub(1) {
        let delta = chain.bobs[i + 1].position - chain.bobs[i].position;
        let dist = delta.length();
        if dist > segment_length {
            let correction = delta * (1.0 - segment_length / dist);
            chain.bobs[i].position += correction * 0.5;
            chain.bobs[i + 1].position -= correction * 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Bob;

    #[test]
    fn slack_segments_untouched() {
        let mut chain = Chain {
            bobs: vec![
                Bob::at_rest(1.0, DVec2::new(0.0, 30.0)),
                Bob::at_rest(1.0, DVec2::new(0.0, 60.0)),
            ],
            segment_length: 50.0,
            total_length: 100.0,
        };
        let before = chain.clone();
        apply_constraints(&mut chain, DVec2::ZERO, 50.0);
        assert_eq!(chain, before);
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let mut chain = Chain {
            bobs: Vec::new(),
            segment_length: 1.0,
            total_length: 1.0,
        };
        apply_constraints(&mut chain, DVec2::ZERO, 1.0);
        assert!(chain.is_empty());
    }
}
