//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod body;
pub mod controller;
pub mod occupancy;
pub mod sonar;
pub mod world;

pub use body::{BodyKind, Circle, Segment, Vehicle};
pub use controller::{ACTION_COUNT, Simulation};
pub use occupancy::{Occupancy, OccupancyField};
pub use sonar::{ARM_OFFSETS, ARM_SAMPLES, Observation, Reading};
pub use world::{ContactResponse, StepEvents, World};
