//! Trigger-style overlap detection
//!
//! No physics response: a player box either overlaps an entity box this tick
//! or it doesn't, and the session decides what the contact means.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityCategory;

/// Axis-aligned box (x = lateral, y = travel axis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Strict overlap; boxes that only touch edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.x < reach.x && gap.y < reach.y
    }
}

/// What the receiver wants done with the entity it was told about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResponse {
    /// Remove and destroy the entity
    Consume,
    /// Leave the entity in the world
    Keep,
}

/// Receives collision reports from the lane controllers
pub trait CollisionSink {
    fn report_collision(&mut self, category: EntityCategory) -> HitResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(Vec2::new(1.35, 18.0), Vec2::new(0.9, 2.0));
        let b = Aabb::new(Vec2::new(1.35, 15.0), Vec2::new(0.9, 2.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_adjacent_lanes_do_not_overlap() {
        let a = Aabb::new(Vec2::new(1.35, 18.0), Vec2::new(0.9, 2.0));
        let b = Aabb::new(Vec2::new(4.05, 18.0), Vec2::new(0.9, 2.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&b));
    }
}
