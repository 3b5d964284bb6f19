//! Procedural obstacle and collectible spawning
//!
//! Each category runs its own countdown. When it runs out one entity is
//! emitted in a random lane and the interval grows by a fixed step up to a
//! cap, so spawns get sparser the longer a run lasts. Countdowns only move
//! while the caller ticks them; a paused session simply stops calling `tick`.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EntityCategory, EntityId, EntityRegistry};
use super::lane::LaneTrack;
use crate::tuning::{ScheduleTuning, SpawnTuning};

/// Countdown and difficulty ramp for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub min_interval: f32,
    pub max_interval: f32,
    pub increase_step: f32,
    /// Interval used for the next wait; never shrinks within a session
    pub current_interval: f32,
    /// Seconds until the next spawn
    pub countdown: f32,
    /// Spawns emitted this session
    pub spawned: u32,
}

impl SpawnSchedule {
    pub fn new(tuning: ScheduleTuning) -> Self {
        Self {
            min_interval: tuning.min_interval,
            max_interval: tuning.max_interval,
            increase_step: tuning.increase_step,
            current_interval: tuning.min_interval,
            countdown: tuning.min_interval,
            spawned: 0,
        }
    }

    /// Back to the fresh-session interval and a full countdown
    pub fn reset(&mut self) {
        self.current_interval = self.min_interval;
        self.countdown = self.min_interval;
        self.spawned = 0;
    }

    /// Run the countdown for `dt` seconds. Returns true when a spawn is due;
    /// the interval has already been grown and the countdown restarted.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return false;
        }
        self.spawned += 1;
        self.current_interval = (self.current_interval + self.increase_step).min(self.max_interval);
        self.countdown = self.current_interval;
        true
    }
}

/// Two independent spawn schedules sharing one lane pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacles: SpawnSchedule,
    pub collectibles: SpawnSchedule,
}

impl Spawner {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            obstacles: SpawnSchedule::new(tuning.obstacle_schedule),
            collectibles: SpawnSchedule::new(tuning.collectible_schedule),
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.reset();
        self.collectibles.reset();
    }

    pub fn schedule(&self, category: EntityCategory) -> &SpawnSchedule {
        match category {
            EntityCategory::Obstacle => &self.obstacles,
            EntityCategory::Collectible => &self.collectibles,
        }
    }

    /// Advance both countdowns and emit whatever is due (at most one per category)
    pub fn tick(
        &mut self,
        dt: f32,
        rng: &mut Pcg32,
        lanes: &LaneTrack,
        registry: &mut EntityRegistry,
    ) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        if self.obstacles.advance(dt) {
            spawned.push(emit(EntityCategory::Obstacle, rng, lanes, registry));
        }
        if self.collectibles.advance(dt) {
            spawned.push(emit(EntityCategory::Collectible, rng, lanes, registry));
        }
        spawned
    }
}

/// Uniform draw with replacement over every lane; repeats are allowed
fn random_lane(rng: &mut Pcg32, lanes: &LaneTrack) -> f32 {
    let all = lanes.all_lanes();
    all[rng.random_range(0..all.len())]
}

fn emit(
    category: EntityCategory,
    rng: &mut Pcg32,
    lanes: &LaneTrack,
    registry: &mut EntityRegistry,
) -> EntityId {
    let lane_x = random_lane(rng, lanes);
    let id = registry.spawn(category, lane_x);
    log::debug!("Spawned {} {:?} at lane x={}", category.as_str(), id, lane_x);
    id
}
