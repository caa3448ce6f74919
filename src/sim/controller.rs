//! Simulation controller
//!
//! Owns the world, the RNG, and the run counters; advances one tick per
//! `step` call and produces the (reward, observation) pair consumed by an
//! external policy.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::occupancy::OccupancyField;
use super::sonar::{self, Observation};
use super::world::World;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::{Result, SimError};

/// Number of discrete steering actions
pub const ACTION_COUNT: u8 = 5;

/// The simulation: world, RNG, and cumulative run counters
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    rng: Pcg32,
    world: Option<World>,
    tick: u64,
    collisions: u64,
    targets_collected: u64,
}

impl Simulation {
    /// Create an uninitialized simulation; call `reset` before `step`
    pub fn new(config: SimConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            world: None,
            tick: 0,
            collisions: 0,
            targets_collected: 0,
        }
    }

    /// (Re)build the world at the fixed start pose and zero the counters
    pub fn reset(&mut self) {
        self.world = Some(World::new(&self.config, &mut self.rng));
        self.tick = 0;
        self.collisions = 0;
        self.targets_collected = 0;
        log::info!(
            "reset: {}x{} arena, {} obstacles, {} targets",
            self.config.width,
            self.config.height,
            self.config.obstacles.len(),
            self.config.target_count
        );
    }

    /// Advance one tick: steer, move, sense, and score
    ///
    /// Crash recovery runs to completion inside this call; the tick counter
    /// advances once per call regardless.
    pub fn step(&mut self, action: u8) -> Result<(i32, Observation)> {
        if action >= ACTION_COUNT {
            return Err(SimError::InvalidAction(action));
        }
        let world = self.world.as_mut().ok_or(SimError::NotInitialized)?;

        world.vehicle.heading += STEER_DELTAS[action as usize];

        if self.tick % self.config.scatter_interval == 0 {
            world.scatter(&mut self.rng);
        }

        let driving_direction = world.driving_direction();
        let events = world.step(SIM_DT, &mut self.rng)?;

        let field = OccupancyField::capture(world);
        let readings = sonar::sense(&field, world.vehicle.body.pos, world.vehicle.heading);

        // Target consumption takes precedence over a crash in the same tick.
        let reward = if events.targets_consumed > 0 {
            self.targets_collected += u64::from(events.targets_consumed);
            log::debug!(
                "target collected ({} collisions, {} targets)",
                self.collisions,
                self.targets_collected
            );
            REWARD_TARGET
        } else if events.crashed {
            self.collisions += 1;
            log::debug!(
                "crash ({} collisions, {} targets)",
                self.collisions,
                self.targets_collected
            );
            Self::recover(world, driving_direction)?;
            REWARD_CRASH
        } else {
            REWARD_BASE + (sonar::distance_sum(&readings) / 10) as i32
        };

        self.tick += 1;
        Ok((reward, sonar::encode(&readings)))
    }

    /// Scripted crash recovery, resolved entirely within the current tick
    ///
    /// Reverse thrust along the last driving direction, then exactly
    /// `RECOVERY_STEPS` sub-steps of a fixed turn plus one integration each.
    /// No contacts are dispatched and no readings are produced while it runs.
    fn recover(world: &mut World, driving_direction: Vec2) -> Result<()> {
        world.vehicle.body.vel = driving_direction * RECOVERY_THRUST;
        for _ in 0..RECOVERY_STEPS {
            world.vehicle.heading += RECOVERY_TURN;
            world.integrate(SIM_DT)?;
        }
        Ok(())
    }

    /// Ticks advanced since the last reset
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Cumulative crash count since the last reset
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Cumulative consumed-target count since the last reset
    pub fn targets_collected(&self) -> u64 {
        self.targets_collected
    }

    /// Read access to the world, for drivers that render or inspect state
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleSeed;
    use crate::heading_vec;
    use crate::sim::body::Circle;

    /// Arena large enough that no wall is within sonar range of the center
    fn open_config() -> SimConfig {
        SimConfig {
            width: 2000.0,
            height: 2000.0,
            obstacles: Vec::new(),
            target_count: 0,
            start_x: 1000.0,
            start_y: 1000.0,
            start_heading: 0.0,
            seed: 7,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_step_before_reset_fails() {
        let mut sim = Simulation::new(SimConfig::default());
        assert!(matches!(sim.step(2), Err(SimError::NotInitialized)));
    }

    #[test]
    fn test_invalid_action_rejected() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.reset();
        assert!(matches!(sim.step(5), Err(SimError::InvalidAction(5))));
    }

    #[test]
    fn test_observation_codes_are_small_integers() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.reset();
        for t in 0..200u64 {
            let (_, obs) = sim.step((t % 5) as u8).unwrap();
            for k in 0..5 {
                assert!([-1.0, 0.0, 1.0].contains(&obs[2 * k + 1]));
            }
        }
    }

    #[test]
    fn test_open_track_reward() {
        let mut sim = Simulation::new(open_config());
        sim.reset();
        for _ in 0..10 {
            let (reward, obs) = sim.step(2).unwrap();
            assert_eq!(reward, 15);
            for k in 0..5 {
                assert_eq!(obs[2 * k], 1.0);
                assert_eq!(obs[2 * k + 1], 0.0);
            }
        }
        assert_eq!(sim.tick(), 10);
    }

    #[test]
    fn test_target_consumed_keeps_cardinality() {
        let config = SimConfig {
            target_count: 1,
            ..open_config()
        };
        let mut sim = Simulation::new(config);
        sim.reset();
        {
            let world = sim.world.as_mut().unwrap();
            world.vehicle.body.pos = world.targets[0].pos;
        }
        let (reward, _) = sim.step(2).unwrap();
        assert_eq!(reward, 500);
        assert_eq!(sim.targets_collected(), 1);
        assert_eq!(sim.collisions(), 0);
        assert_eq!(sim.world().unwrap().targets.len(), 1);
    }

    #[test]
    fn test_crash_reward_and_recovery() {
        let mut sim = Simulation::new(open_config());
        sim.reset();
        let heading_before;
        {
            let world = sim.world.as_mut().unwrap();
            heading_before = world.vehicle.heading;
            let ahead = world.vehicle.body.pos + Vec2::new(10.0, 0.0);
            world.obstacles.push(Circle::at(ahead, 50.0));
        }
        let (reward, _) = sim.step(2).unwrap();
        assert_eq!(reward, -500);
        assert_eq!(sim.collisions(), 1);

        let world = sim.world().unwrap();
        // Exactly ten recovery sub-steps, each turning by 0.1.
        assert!((world.vehicle.heading - heading_before - 1.0).abs() < 1e-4);
        // Reverse thrust opposes the pre-crash driving direction.
        assert!(world.vehicle.body.vel.dot(heading_vec(heading_before)) < 0.0);
    }

    #[test]
    fn test_target_cardinality_over_run() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.reset();
        for t in 0..300u64 {
            sim.step((t % 5) as u8).unwrap();
            assert_eq!(sim.world().unwrap().targets.len(), 5);
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = Simulation::new(SimConfig::default());
        let mut b = Simulation::new(SimConfig::default());
        a.reset();
        b.reset();
        for t in 0..200u64 {
            let action = (t % 5) as u8;
            let (ra, oa) = a.step(action).unwrap();
            let (rb, ob) = b.step(action).unwrap();
            assert_eq!(ra, rb);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.collisions(), b.collisions());
        assert_eq!(a.targets_collected(), b.targets_collected());
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.reset();
        for t in 0..150u64 {
            sim.step((t % 5) as u8).unwrap();
        }
        sim.reset();
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.collisions(), 0);
        assert_eq!(sim.targets_collected(), 0);
    }
}
