//! Per-side lane controller
//!
//! Each side's car toggles between its two lanes on a tap and glides toward
//! the selected lane at a fixed lateral speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionSink, HitResponse};
use super::entity::{EntityCategory, EntityId, EntityRegistry};
use super::lane::{LaneTrack, Side, SideLanes};
use crate::platform::Tap;
use crate::tuning::PlayerTuning;

/// One side's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    pub side: Side,
    /// Index into the side's two lanes
    pub lane: usize,
    /// x = lateral, y = fixed travel line
    pub pos: Vec2,
    pub move_speed: f32,
    pub half_extents: Vec2,
    bounds: SideLanes,
}

impl PlayerController {
    pub fn new(side: Side, lanes: &LaneTrack, tuning: &PlayerTuning) -> Self {
        let bounds = *lanes.side(side);
        let lane = bounds.default_lane;
        Self {
            side,
            lane,
            pos: Vec2::new(bounds.lane_x(lane), tuning.travel_line),
            move_speed: tuning.move_speed,
            half_extents: Vec2::from_array(tuning.half_extents),
            bounds,
        }
    }

    /// Snap back to the default lane (session start/restart)
    pub fn reset(&mut self) {
        self.lane = self.bounds.default_lane;
        self.pos.x = self.bounds.lane_x(self.lane);
    }

    pub fn bounds(&self) -> &SideLanes {
        &self.bounds
    }

    /// Whether a tap belongs to this side. Sides are cross-mapped: the left
    /// car answers taps on the right half and vice versa.
    pub fn accepts(&self, tap: &Tap) -> bool {
        match self.side {
            Side::Left => tap.is_right_half(),
            Side::Right => tap.is_left_half(),
        }
    }

    /// Toggle lanes if the tap is ours. Returns true if the lane changed.
    pub fn handle_tap(&mut self, tap: &Tap) -> bool {
        if !self.accepts(tap) {
            return false;
        }
        self.lane ^= 1;
        log::debug!("{:?} car -> lane {}", self.side, self.lane);
        true
    }

    pub fn target_x(&self) -> f32 {
        self.bounds.lane_x(self.lane)
    }

    /// Move toward the target lane without overshooting or leaving the side
    pub fn advance(&mut self, dt: f32) {
        let target = self.target_x();
        let delta = target - self.pos.x;
        let max_delta = self.move_speed * dt;
        let next = if delta.abs() <= max_delta {
            target
        } else {
            self.pos.x + max_delta.copysign(delta)
        };
        self.pos.x = self.bounds.clamp_x(next);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }

    /// Test every live entity against this car and report contacts.
    ///
    /// Obstacles are reported once and then marked struck; collectibles are
    /// removed when the sink consumes them. Without a sink the contacts are
    /// logged and dropped with no state change. Returns the reports made.
    pub fn detect_collisions(
        &self,
        registry: &mut EntityRegistry,
        sink: Option<&mut dyn CollisionSink>,
    ) -> usize {
        let mine = self.aabb();
        let hits: Vec<(EntityId, EntityCategory)> = registry
            .iter()
            .filter(|e| !e.struck && mine.overlaps(&e.bounds()))
            .map(|e| (e.id, e.category))
            .collect();
        if hits.is_empty() {
            return 0;
        }

        let Some(sink) = sink else {
            log::error!(
                "{:?} car hit {} entities but no session is wired; dropping",
                self.side,
                hits.len()
            );
            return 0;
        };

        for &(id, category) in &hits {
            let response = sink.report_collision(category);
            match category {
                EntityCategory::Obstacle => {
                    if let Some(entity) = registry.get_mut(id) {
                        entity.struck = true;
                    }
                }
                EntityCategory::Collectible => {
                    if response == HitResponse::Consume {
                        registry.despawn(id);
                    }
                }
            }
        }
        hits.len()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::tuning::SpawnTuning;

    const SCREEN: f32 = 1080.0;

    fn car(side: Side) -> PlayerController {
        PlayerController::new(side, &LaneTrack::default(), &PlayerTuning::default())
    }

    #[derive(Default)]
    struct CountingSink {
        obstacles: u32,
        collectibles: u32,
    }

    impl CollisionSink for CountingSink {
        fn report_collision(&mut self, category: EntityCategory) -> HitResponse {
            match category {
                EntityCategory::Obstacle => {
                    self.obstacles += 1;
                    HitResponse::Keep
                }
                EntityCategory::Collectible => {
                    self.collectibles += 1;
                    HitResponse::Consume
                }
            }
        }
    }

    #[test]
    fn test_start_in_inner_lanes() {
        assert_eq!(car(Side::Left).pos.x, -1.35);
        assert_eq!(car(Side::Right).pos.x, 1.35);
    }

    #[test]
    fn test_taps_are_cross_mapped() {
        let mut left = car(Side::Left);
        let mut right = car(Side::Right);

        let right_half = Tap::new(800.0, SCREEN);
        assert!(left.handle_tap(&right_half));
        assert!(!right.handle_tap(&right_half));

        let left_half = Tap::new(100.0, SCREEN);
        assert!(!left.handle_tap(&left_half));
        assert!(right.handle_tap(&left_half));

        // Midline belongs to the right half
        assert!(left.accepts(&Tap::new(540.0, SCREEN)));
        assert!(!right.accepts(&Tap::new(540.0, SCREEN)));
    }

    #[test]
    fn test_glides_without_overshoot() {
        let mut left = car(Side::Left);
        left.handle_tap(&Tap::new(900.0, SCREEN));
        assert_eq!(left.target_x(), -4.05);

        left.advance(0.1);
        assert!((left.pos.x - -2.35).abs() < 1e-5);
        left.advance(0.1);
        left.advance(0.1);
        assert_eq!(left.pos.x, -4.05);
    }

    #[test]
    fn test_reset_returns_to_default_lane() {
        let mut right = car(Side::Right);
        right.handle_tap(&Tap::new(10.0, SCREEN));
        right.advance(1.0);
        assert_eq!(right.pos.x, 4.05);
        right.reset();
        assert_eq!(right.lane, 0);
        assert_eq!(right.pos.x, 1.35);
    }

    #[test]
    fn test_obstacle_reported_once() {
        let left = car(Side::Left);
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let id = registry.spawn(EntityCategory::Obstacle, -1.35);
        registry.get_mut(id).unwrap().travel_distance = 17.0;

        let mut sink = CountingSink::default();
        assert_eq!(left.detect_collisions(&mut registry, Some(&mut sink)), 1);
        assert_eq!(left.detect_collisions(&mut registry, Some(&mut sink)), 0);
        assert_eq!(sink.obstacles, 1);
        assert!(registry.get(id).unwrap().struck);
    }

    #[test]
    fn test_collectible_consumed() {
        let right = car(Side::Right);
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let id = registry.spawn(EntityCategory::Collectible, 1.35);
        registry.get_mut(id).unwrap().travel_distance = 18.0;

        let mut sink = CountingSink::default();
        right.detect_collisions(&mut registry, Some(&mut sink));
        assert_eq!(sink.collectibles, 1);
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn test_other_side_lane_not_hit() {
        let left = car(Side::Left);
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let id = registry.spawn(EntityCategory::Obstacle, 1.35);
        registry.get_mut(id).unwrap().travel_distance = 18.0;

        let mut sink = CountingSink::default();
        assert_eq!(left.detect_collisions(&mut registry, Some(&mut sink)), 0);
    }

    #[test]
    fn test_missing_sink_drops_event() {
        let right = car(Side::Right);
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let id = registry.spawn(EntityCategory::Collectible, 1.35);
        registry.get_mut(id).unwrap().travel_distance = 18.0;

        assert_eq!(right.detect_collisions(&mut registry, None), 0);
        assert!(registry.get(id).is_some());
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_side(
            steps in proptest::collection::vec((any::<bool>(), 0.0f32..1000.0, 0.0f32..0.2), 1..200),
        ) {
            for side in Side::BOTH {
                let mut player = car(side);
                let (min, max) = (player.bounds().min_x, player.bounds().max_x);
                for &(tap, x, dt) in &steps {
                    if tap {
                        player.handle_tap(&Tap::new(x, 1000.0));
                    }
                    player.advance(dt);
                    prop_assert!(player.pos.x >= min && player.pos.x <= max);
                }
            }
        }
    }
}
