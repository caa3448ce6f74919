//! Physics world
//!
//! Owns every body, advances them with a fixed integration step, keeps them
//! inside the arena with elastic wall reflection, and resolves vehicle
//! contacts through responses registered once at construction.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::{BodyKind, Circle, Segment, Vehicle, circle_hits_segment, circles_overlap};
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::heading_vec;

/// Response to a contact between two body categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Flag the vehicle as crashed; no body is removed
    FlagCrash,
    /// Remove the target and spawn a replacement in the same tick
    ConsumeTarget,
}

/// Category-pair contact table, populated once at world construction
#[derive(Debug, Clone)]
pub struct ContactTable {
    entries: Vec<((BodyKind, BodyKind), ContactResponse)>,
}

impl ContactTable {
    fn with_defaults() -> Self {
        Self {
            entries: vec![
                (
                    (BodyKind::Vehicle, BodyKind::Wall),
                    ContactResponse::FlagCrash,
                ),
                (
                    (BodyKind::Vehicle, BodyKind::Obstacle),
                    ContactResponse::FlagCrash,
                ),
                (
                    (BodyKind::Vehicle, BodyKind::Target),
                    ContactResponse::ConsumeTarget,
                ),
            ],
        }
    }

    /// Look up the response for an unordered category pair
    pub fn response(&self, a: BodyKind, b: BodyKind) -> Option<ContactResponse> {
        self.entries
            .iter()
            .find(|((x, y), _)| (*x == a && *y == b) || (*x == b && *y == a))
            .map(|(_, r)| *r)
    }
}

/// Contact outcomes of one physics step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepEvents {
    pub crashed: bool,
    pub targets_consumed: u32,
}

/// The physics world: vehicle, border walls, obstacles, and targets
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub vehicle: Vehicle,
    pub walls: [Segment; 4],
    pub obstacles: Vec<Circle>,
    pub targets: Vec<Circle>,
    target_radius: f32,
    contacts: ContactTable,
}

impl World {
    /// Build the world from a configuration, spawning targets at random
    pub fn new(config: &SimConfig, rng: &mut Pcg32) -> Self {
        let (w, h) = (config.width, config.height);
        let walls = [
            Segment::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, h)),
            Segment::new(Vec2::new(1.0, h), Vec2::new(w, h)),
            Segment::new(Vec2::new(w - 1.0, h), Vec2::new(w - 1.0, 1.0)),
            Segment::new(Vec2::new(1.0, 1.0), Vec2::new(w, 1.0)),
        ];
        let obstacles = config
            .obstacles
            .iter()
            .map(|s| Circle::at(Vec2::new(s.x, s.y), s.radius))
            .collect();
        let mut targets = Vec::with_capacity(config.target_count);
        for _ in 0..config.target_count {
            targets.push(Circle::at(
                Self::random_spawn(w, h, rng),
                config.target_radius,
            ));
        }
        Self {
            width: w,
            height: h,
            vehicle: Vehicle::new(
                Vec2::new(config.start_x, config.start_y),
                config.vehicle_radius,
                config.start_heading,
            ),
            walls,
            obstacles,
            targets,
            target_radius: config.target_radius,
            contacts: ContactTable::with_defaults(),
        }
    }

    /// Driving direction derived from the vehicle heading
    pub fn driving_direction(&self) -> Vec2 {
        heading_vec(self.vehicle.heading) * DRIVE_DIR_SCALE
    }

    /// Assign fresh random velocities to every obstacle and target
    ///
    /// Direction follows the vehicle's current heading plus a random
    /// perturbation, matching the reference motion model.
    pub fn scatter(&mut self, rng: &mut Pcg32) {
        let heading = self.vehicle.heading;
        for body in self.obstacles.iter_mut().chain(self.targets.iter_mut()) {
            let speed = rng.random_range(SCATTER_SPEED_MIN..=SCATTER_SPEED_MAX) as f32;
            let angle = heading + rng.random_range(-SCATTER_SPREAD..=SCATTER_SPREAD);
            body.vel = heading_vec(angle) * speed;
        }
    }

    /// Apply forward drive, integrate one step, and resolve vehicle contacts
    pub fn step(&mut self, dt: f32, rng: &mut Pcg32) -> Result<StepEvents> {
        self.vehicle.body.vel = self.driving_direction() * VEHICLE_THRUST;
        self.integrate(dt)?;

        let mut events = StepEvents::default();

        for wall in &self.walls {
            if circle_hits_segment(&self.vehicle.body, wall)
                && self.contacts.response(BodyKind::Vehicle, BodyKind::Wall)
                    == Some(ContactResponse::FlagCrash)
            {
                events.crashed = true;
            }
        }
        for obstacle in &self.obstacles {
            if circles_overlap(&self.vehicle.body, obstacle)
                && self.contacts.response(BodyKind::Vehicle, BodyKind::Obstacle)
                    == Some(ContactResponse::FlagCrash)
            {
                events.crashed = true;
            }
        }
        for i in 0..self.targets.len() {
            if circles_overlap(&self.vehicle.body, &self.targets[i])
                && self.contacts.response(BodyKind::Vehicle, BodyKind::Target)
                    == Some(ContactResponse::ConsumeTarget)
            {
                // Replace in the same tick so the active count never drops.
                let pos = Self::random_spawn(self.width, self.height, rng);
                self.targets[i] = Circle::at(pos, self.target_radius);
                events.targets_consumed += 1;
            }
        }

        Ok(events)
    }

    /// Integrate body motion one step; elastic reflection keeps every body
    /// inside the arena. Used directly by crash recovery, which must move
    /// bodies without dispatching contacts.
    pub fn integrate(&mut self, dt: f32) -> Result<()> {
        let (w, h) = (self.width, self.height);
        self.vehicle.body.integrate(dt);
        Self::bounce(&mut self.vehicle.body, w, h);
        for body in self.obstacles.iter_mut().chain(self.targets.iter_mut()) {
            body.integrate(dt);
            Self::bounce(body, w, h);
        }
        self.check_finite()
    }

    /// Reflect a body off the arena border
    fn bounce(body: &mut Circle, width: f32, height: f32) {
        let r = body.radius;
        if body.pos.x < r {
            body.pos.x = r;
            body.vel.x = body.vel.x.abs();
        } else if body.pos.x > width - r {
            body.pos.x = width - r;
            body.vel.x = -body.vel.x.abs();
        }
        if body.pos.y < r {
            body.pos.y = r;
            body.vel.y = body.vel.y.abs();
        } else if body.pos.y > height - r {
            body.pos.y = height - r;
            body.vel.y = -body.vel.y.abs();
        }
    }

    fn check_finite(&self) -> Result<()> {
        let bodies = std::iter::once(&self.vehicle.body)
            .chain(self.obstacles.iter())
            .chain(self.targets.iter());
        for body in bodies {
            if !body.pos.is_finite() || !body.vel.is_finite() {
                return Err(SimError::InvariantViolation(format!(
                    "body escaped representable coordinates: pos {:?} vel {:?}",
                    body.pos, body.vel
                )));
            }
        }
        Ok(())
    }

    fn random_spawn(width: f32, height: f32, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random_range(1.0..width - 1.0),
            rng.random_range(1.0..height - 1.0),
        )
    }
}
