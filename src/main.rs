//! Sonar Rover entry point
//!
//! Headless driver that loops the simulation with uniformly random actions.
//! A policy harness would replace the action sampling; rendering is a no-op
//! here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use sonar_rover::sim::ACTION_COUNT;
use sonar_rover::{Result, SimConfig, Simulation};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(10_000);
    let config = match args.next() {
        Some(path) => load_config(&path),
        None => SimConfig::default(),
    };

    let action_seed = config.seed.wrapping_add(1);
    let mut sim = Simulation::new(config);
    sim.reset();

    let mut action_rng = Pcg32::seed_from_u64(action_seed);
    let mut total_reward: i64 = 0;
    for _ in 0..ticks {
        let action = action_rng.random_range(0..ACTION_COUNT);
        let (reward, _observation) = sim.step(action)?;
        total_reward += i64::from(reward);
    }

    println!(
        "{} ticks: total reward {}, {} collisions, {} targets collected",
        sim.tick(),
        total_reward,
        sim.collisions(),
        sim.targets_collected()
    );
    Ok(())
}

fn load_config(path: &str) -> SimConfig {
    let parsed = std::fs::read_to_string(path)
        .ok()
        .and_then(|json| SimConfig::from_json(&json).ok());
    match parsed {
        Some(config) => config,
        None => {
            log::warn!("could not load config from {path}, using defaults");
            SimConfig::default()
        }
    }
}
