//! Sonar Rover - a 2D arena driving simulation for learning policies
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, world, sonar sensing, controller)
//! - `config`: Data-driven arena and vehicle configuration
//! - `error`: Crate error types

pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use sim::{Observation, Simulation};

use glam::Vec2;

/// Simulation constants (reference configuration)
pub mod consts {
    /// Fixed physics integration step (simulated time units)
    pub const SIM_DT: f32 = 0.1;

    /// Driving direction magnitude (heading unit vector scaled by this)
    pub const DRIVE_DIR_SCALE: f32 = 2.0;
    /// Forward thrust multiplier applied to the driving direction each tick
    pub const VEHICLE_THRUST: f32 = 10.0;

    /// Reverse thrust multiplier applied at the start of crash recovery
    pub const RECOVERY_THRUST: f32 = -100.0;
    /// Heading increment per recovery sub-step
    pub const RECOVERY_TURN: f32 = 0.1;
    /// Scripted recovery sub-step count
    pub const RECOVERY_STEPS: u32 = 10;

    /// Steering deltas indexed by action
    pub const STEER_DELTAS: [f32; 5] = [-0.2, -0.1, 0.0, 0.1, 0.2];

    /// Reward for consuming a target
    pub const REWARD_TARGET: i32 = 500;
    /// Reward for crashing into an obstacle or wall
    pub const REWARD_CRASH: i32 = -500;
    /// Base reward before the sonar distance bonus
    pub const REWARD_BASE: i32 = -5;

    /// Scatter speed range (inclusive, arena units per time unit)
    pub const SCATTER_SPEED_MIN: i32 = 1;
    pub const SCATTER_SPEED_MAX: i32 = 5;
    /// Scatter heading perturbation bound (radians)
    pub const SCATTER_SPREAD: f32 = 2.0;
}

/// Unit vector for a heading angle
#[inline]
pub fn heading_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Rotate `point` about `center` by `radians`
///
/// Uses the arena's screen-flip rotation convention; the sensing path flips
/// the resulting Y into surface coordinates afterwards.
#[inline]
pub fn rotate_about(center: Vec2, point: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    let dx = (point.x - center.x) * cos + (point.y - center.y) * sin;
    let dy = (center.y - point.y) * cos - (center.x - point.x) * sin;
    Vec2::new(center.x + dx, center.y + dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_vec_cardinal() {
        let v = heading_vec(0.0);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_rotate_about_identity() {
        let center = Vec2::new(100.0, 100.0);
        let point = Vec2::new(150.0, 100.0);
        let rotated = rotate_about(center, point, 0.0);
        assert!((rotated - point).length() < 1e-4);
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let center = Vec2::new(100.0, 100.0);
        let point = Vec2::new(150.0, 100.0);
        let rotated = rotate_about(center, point, FRAC_PI_2);
        // Screen-flip convention: a positive quarter turn sends +x to -y.
        assert!((rotated.x - 100.0).abs() < 1e-3);
        assert!((rotated.y - 50.0).abs() < 1e-3);
    }
}
