//! Sonar sensing
//!
//! Five fixed-angle arms ray-march outward from the vehicle against the
//! occupancy surface. Each arm walks a template of evenly spaced sample
//! points rotated by (vehicle heading + arm offset), flipped into surface
//! coordinates, and reports the 1-based index of the first non-track sample
//! together with its classification.

use glam::Vec2;

use super::occupancy::{Occupancy, OccupancyField};
use crate::rotate_about;

/// Arm angular offsets relative to the vehicle heading, in observation order
pub const ARM_OFFSETS: [f32; 5] = [0.75, 0.5, 0.0, -0.5, -0.75];
/// Samples per arm
pub const ARM_SAMPLES: u32 = 40;
/// Spacing between consecutive samples (arena units)
pub const ARM_SPACING: f32 = 10.0;
/// Dead zone before the first sample
pub const ARM_GAP: f32 = 20.0;

/// One arm's result: sample count to the first hit, and what was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// 1-based index of the first non-track sample, or `ARM_SAMPLES` if the
    /// arm exhausts on open track
    pub distance: u32,
    pub occupancy: Occupancy,
}

/// Flattened observation vector: (normalized distance, code) per arm
pub type Observation = [f32; 10];

/// Cast all five arms from the vehicle pose
pub fn sense(field: &OccupancyField, pos: Vec2, heading: f32) -> [Reading; 5] {
    ARM_OFFSETS.map(|offset| march_arm(field, pos, heading + offset))
}

/// Walk one arm outward, stopping at the first non-track sample
fn march_arm(field: &OccupancyField, pos: Vec2, angle: f32) -> Reading {
    for i in 1..=ARM_SAMPLES {
        let template = pos + Vec2::new(ARM_GAP + ARM_SPACING * i as f32, 0.0);
        let rotated = rotate_about(pos, template, angle);
        let sample = Vec2::new(rotated.x, field.height - rotated.y);
        let occupancy = field.classify(sample);
        if occupancy != Occupancy::Track {
            return Reading {
                distance: i,
                occupancy,
            };
        }
    }
    Reading {
        distance: ARM_SAMPLES,
        occupancy: Occupancy::Track,
    }
}

/// Flatten readings into the policy observation vector
///
/// Distances are normalized as (d - 20) / 20; classification codes stay raw
/// small integers. Downstream policies are trained against exactly this
/// asymmetric encoding.
pub fn encode(readings: &[Reading; 5]) -> Observation {
    let mut obs = [0.0; 10];
    for (k, r) in readings.iter().enumerate() {
        obs[2 * k] = (r.distance as f32 - 20.0) / 20.0;
        obs[2 * k + 1] = r.occupancy.code() as f32;
    }
    obs
}

/// Sum of the five raw sample distances (drives the open-track reward)
pub fn distance_sum(readings: &[Reading; 5]) -> u32 {
    readings.iter().map(|r| r.distance).sum()
}
