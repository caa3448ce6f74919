//! Simulation configuration
//!
//! Data-driven layout for the arena, bodies, and RNG seeding. The default
//! matches the reference configuration the policy harness trains against.

use serde::{Deserialize, Serialize};

/// Fixed obstacle placement: position and radius
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleSeed {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl ObstacleSeed {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Arena width in arena units
    pub width: f32,
    /// Arena height in arena units
    pub height: f32,
    /// Obstacle layout applied on reset
    pub obstacles: Vec<ObstacleSeed>,
    /// Number of collectible targets kept active
    pub target_count: usize,
    /// Target radius
    pub target_radius: f32,
    /// Vehicle start position
    pub start_x: f32,
    pub start_y: f32,
    /// Vehicle start heading (radians)
    pub start_heading: f32,
    /// Vehicle radius
    pub vehicle_radius: f32,
    /// Obstacle/target motion refresh interval in ticks (must be >= 1)
    pub scatter_interval: u64,
    /// RNG seed for spawn positions and scatter velocities
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            obstacles: vec![
                ObstacleSeed::new(200.0, 350.0, 100.0),
                ObstacleSeed::new(700.0, 200.0, 125.0),
                ObstacleSeed::new(600.0, 600.0, 35.0),
            ],
            target_count: 5,
            target_radius: 60.0,
            start_x: 100.0,
            start_y: 100.0,
            start_heading: 0.5,
            vehicle_radius: 25.0,
            scatter_interval: 100,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
