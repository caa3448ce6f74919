//! Physics bodies and overlap tests
//!
//! Circle bodies for the vehicle, obstacles, and targets; segment walls for
//! the arena border. Overlap tests are plain geometric checks against the
//! positions at the time of the query.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Body category used to key contact responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Vehicle,
    Wall,
    Obstacle,
    Target,
}

/// A circular dynamic body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Create a body at rest
    pub fn at(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Advance the position by one integration step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// The player vehicle: a circle body plus a heading angle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vehicle {
    pub body: Circle,
    /// Heading in radians; unbounded, wraps through the trig functions
    pub heading: f32,
}

impl Vehicle {
    pub fn new(pos: Vec2, radius: f32, heading: f32) -> Self {
        Self {
            body: Circle::at(pos, radius),
            heading,
        }
    }
}

/// A fixed wall segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq < 1e-6 {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }
}

/// Circle-circle overlap test
#[inline]
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    (a.pos - b.pos).length_squared() < reach * reach
}

/// Circle-segment overlap test
///
/// Inclusive at the boundary: a body resting exactly on the arena border
/// counts as touching the wall.
pub fn circle_hits_segment(c: &Circle, s: &Segment) -> bool {
    (c.pos - s.closest_point(c.pos)).length_squared() <= c.radius * c.radius
}
