//! Occupancy classification
//!
//! Answers "what is at point (x, y)" for the sensing path. Classification is
//! a direct geometric query against category-tagged body geometry captured
//! from the world each tick; there is no rendering surface in the loop. The
//! surface uses the screen convention (y grows downward), so body positions
//! are flipped on capture and sensing flips its sample points to match.

use glam::Vec2;

use super::world::World;

/// Classification of a point on the occupancy surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Open track
    Track,
    /// Obstacle body, or out-of-bounds (a wall-class hit)
    Obstacle,
    /// Collectible target
    Target,
}

impl Occupancy {
    /// Numeric code carried into the observation vector
    #[inline]
    pub fn code(self) -> i8 {
        match self {
            Occupancy::Track => 0,
            Occupancy::Obstacle => 1,
            Occupancy::Target => -1,
        }
    }
}

/// Snapshot of body geometry in surface coordinates, rebuilt each tick
///
/// Captured after physics integration so queries always reflect the current
/// tick's positions.
#[derive(Debug, Clone)]
pub struct OccupancyField {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) obstacles: Vec<(Vec2, f32)>,
    pub(crate) targets: Vec<(Vec2, f32)>,
}

impl OccupancyField {
    /// Capture the current body positions from the world
    pub fn capture(world: &World) -> Self {
        let flip = |p: Vec2| Vec2::new(p.x, world.height - p.y);
        Self {
            width: world.width,
            height: world.height,
            obstacles: world
                .obstacles
                .iter()
                .map(|o| (flip(o.pos), o.radius))
                .collect(),
            targets: world
                .targets
                .iter()
                .map(|t| (flip(t.pos), t.radius))
                .collect(),
        }
    }

    /// Classify a point in surface coordinates
    ///
    /// Any coordinate at or beyond the arena border classifies as an
    /// obstacle, which stops a sensing march the same way a body hit does.
    pub fn classify(&self, p: Vec2) -> Occupancy {
        if p.x <= 0.0 || p.y <= 0.0 || p.x >= self.width || p.y >= self.height {
            return Occupancy::Obstacle;
        }
        for &(pos, radius) in &self.obstacles {
            if (p - pos).length_squared() <= radius * radius {
                return Occupancy::Obstacle;
            }
        }
        for &(pos, radius) in &self.targets {
            if (p - pos).length_squared() <= radius * radius {
                return Occupancy::Target;
            }
        }
        Occupancy::Track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> OccupancyField {
        OccupancyField {
            width: 1000.0,
            height: 700.0,
            obstacles: vec![(Vec2::new(300.0, 300.0), 50.0)],
            targets: vec![(Vec2::new(800.0, 200.0), 60.0)],
        }
    }

    #[test]
    fn test_classify_track() {
        assert_eq!(field().classify(Vec2::new(500.0, 500.0)), Occupancy::Track);
    }

    #[test]
    fn test_classify_obstacle_and_target() {
        let f = field();
        assert_eq!(f.classify(Vec2::new(310.0, 290.0)), Occupancy::Obstacle);
        assert_eq!(f.classify(Vec2::new(790.0, 210.0)), Occupancy::Target);
    }

    #[test]
    fn test_off_bounds_is_wall_class() {
        let f = field();
        assert_eq!(f.classify(Vec2::new(-5.0, 100.0)), Occupancy::Obstacle);
        assert_eq!(f.classify(Vec2::new(100.0, 0.0)), Occupancy::Obstacle);
        assert_eq!(f.classify(Vec2::new(1000.0, 100.0)), Occupancy::Obstacle);
        assert_eq!(f.classify(Vec2::new(100.0, 750.0)), Occupancy::Obstacle);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Occupancy::Track.code(), 0);
        assert_eq!(Occupancy::Obstacle.code(), 1);
        assert_eq!(Occupancy::Target.code(), -1);
    }

    #[test]
    fn test_capture_flips_y() {
        use crate::config::{ObstacleSeed, SimConfig};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let config = SimConfig {
            obstacles: vec![ObstacleSeed::new(200.0, 100.0, 40.0)],
            target_count: 0,
            ..SimConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let world = World::new(&config, &mut rng);
        let field = OccupancyField::capture(&world);

        // Body at world y=100 sits at surface y = height - 100.
        assert_eq!(
            field.classify(Vec2::new(200.0, 600.0)),
            Occupancy::Obstacle
        );
        assert_eq!(field.classify(Vec2::new(200.0, 100.0)), Occupancy::Track);
    }
}
