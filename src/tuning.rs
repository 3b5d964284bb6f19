//! Data-driven game balance
//!
//! Every gameplay constant lives here so a build can override lanes, spawn
//! ramps and speeds from a JSON file. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::EntityCategory;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{side} side needs exactly two lanes, got {count}")]
    LaneCount { side: &'static str, count: usize },
    #[error("{side} side bounds are inverted ({min} > {max})")]
    InvertedBounds {
        side: &'static str,
        min: f32,
        max: f32,
    },
    #[error("lane {x} is not strictly inside the {side} side bounds [{min}, {max}]")]
    LaneOutOfBounds {
        side: &'static str,
        x: f32,
        min: f32,
        max: f32,
    },
    #[error("left and right side bounds overlap")]
    OverlappingSides,
    #[error("{category} schedule must satisfy 0 < min <= max and step >= 0")]
    InvalidSchedule { category: &'static str },
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
}

/// Lateral bounds and lane centers for one play side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideTuning {
    pub min_x: f32,
    pub max_x: f32,
    /// The two lane centers this side toggles between
    pub lanes: Vec<f32>,
    /// Index into `lanes` used on every (re)start
    pub default_lane: usize,
}

/// Lane layout for both sides (10.8 unit road centered on x = 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTuning {
    pub left: SideTuning,
    pub right: SideTuning,
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self {
            left: SideTuning {
                min_x: -5.4,
                max_x: 0.0,
                lanes: vec![-4.05, -1.35],
                // Inner lane
                default_lane: 1,
            },
            right: SideTuning {
                min_x: 0.0,
                max_x: 5.4,
                lanes: vec![1.35, 4.05],
                // Inner lane
                default_lane: 0,
            },
        }
    }
}

impl LaneTuning {
    /// Each side needs two lanes strictly inside its bounds, sides disjoint
    pub fn validate(&self) -> Result<(), TuningError> {
        validate_side("left", &self.left)?;
        validate_side("right", &self.right)?;
        if self.left.max_x > self.right.min_x {
            return Err(TuningError::OverlappingSides);
        }
        Ok(())
    }
}

/// Spawn ramp for one entity category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTuning {
    /// Starting interval (seconds) between spawns
    pub min_interval: f32,
    /// Interval cap (longest rest between spawns)
    pub max_interval: f32,
    /// Growth applied to the interval after every spawn
    pub increase_step: f32,
}

/// Per-category entity behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityTuning {
    /// Scroll speed (units/sec along the travel axis)
    pub speed: f32,
    /// Entity is removed once its travel distance exceeds this
    pub expiry_threshold: f32,
    /// Half extents of the overlap box (lateral, travel)
    pub half_extents: [f32; 2],
}

/// Obstacle and collectible settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub obstacle_schedule: ScheduleTuning,
    pub collectible_schedule: ScheduleTuning,
    pub obstacle: EntityTuning,
    pub collectible: EntityTuning,
    /// Optional sensor line: entities past it are removed
    pub despawn_line: Option<f32>,
    /// Restrict the sensor line to one category; `None` removes everything
    pub despawn_only: Option<EntityCategory>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_schedule: ScheduleTuning {
                min_interval: 1.5,
                max_interval: 3.5,
                increase_step: 0.05,
            },
            collectible_schedule: ScheduleTuning {
                min_interval: 3.0,
                max_interval: 6.0,
                increase_step: 0.1,
            },
            obstacle: EntityTuning {
                speed: 10.0,
                expiry_threshold: 25.0,
                half_extents: [0.9, 2.0],
            },
            collectible: EntityTuning {
                speed: 10.0,
                expiry_threshold: 22.0,
                half_extents: [0.5, 0.5],
            },
            despawn_line: None,
            despawn_only: None,
        }
    }
}

/// Player car settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Lateral speed toward the target lane (units/sec)
    pub move_speed: f32,
    /// Fixed position of both cars along the travel axis
    pub travel_line: f32,
    /// Half extents of the overlap box (lateral, travel)
    pub half_extents: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            travel_line: 18.0,
            half_extents: [0.9, 2.0],
        }
    }
}

/// Road tile recycling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackTuning {
    pub scroll_speed: f32,
    pub segment_length: f32,
    /// Segments laid end to end; the reset distance is `segment_count * segment_length`
    pub segment_count: u32,
}

impl Default for TrackTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 15.0,
            segment_length: 19.16,
            segment_count: 3,
        }
    }
}

impl TrackTuning {
    pub fn reset_distance(&self) -> f32 {
        self.segment_length * self.segment_count as f32
    }
}

/// Complete balance data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lanes: LaneTuning,
    pub spawn: SpawnTuning,
    pub player: PlayerTuning,
    pub track: TrackTuning,
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check the lane layout, schedules and speeds
    pub fn validate(&self) -> Result<(), TuningError> {
        self.lanes.validate()?;
        validate_schedule("obstacle", &self.spawn.obstacle_schedule)?;
        validate_schedule("collectible", &self.spawn.collectible_schedule)?;

        positive("obstacle speed", self.spawn.obstacle.speed)?;
        positive("collectible speed", self.spawn.collectible.speed)?;
        positive("player move speed", self.player.move_speed)?;
        positive("track scroll speed", self.track.scroll_speed)?;
        positive("track segment length", self.track.segment_length)?;
        positive("track segment count", self.track.segment_count as f32)?;
        Ok(())
    }
}

fn validate_side(side: &'static str, tuning: &SideTuning) -> Result<(), TuningError> {
    if tuning.lanes.len() != 2 || tuning.default_lane >= tuning.lanes.len() {
        return Err(TuningError::LaneCount {
            side,
            count: tuning.lanes.len(),
        });
    }
    if tuning.min_x > tuning.max_x {
        return Err(TuningError::InvertedBounds {
            side,
            min: tuning.min_x,
            max: tuning.max_x,
        });
    }
    for &x in &tuning.lanes {
        if x <= tuning.min_x || x >= tuning.max_x {
            return Err(TuningError::LaneOutOfBounds {
                side,
                x,
                min: tuning.min_x,
                max: tuning.max_x,
            });
        }
    }
    Ok(())
}

fn validate_schedule(category: &'static str, s: &ScheduleTuning) -> Result<(), TuningError> {
    let valid = s.min_interval > 0.0 && s.min_interval <= s.max_interval && s.increase_step >= 0.0;
    if valid {
        Ok(())
    } else {
        Err(TuningError::InvalidSchedule { category })
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().track.reset_distance(), 19.16 * 3.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{ "player": { "move_speed": 20.0 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.player.move_speed, 20.0);
        // Unnamed fields keep their defaults
        assert_eq!(tuning.player.travel_line, 18.0);
        assert_eq!(tuning.spawn, SpawnTuning::default());
    }

    #[test]
    fn test_lane_on_bound_rejected() {
        let mut tuning = Tuning::default();
        tuning.lanes.right.lanes = vec![1.35, 5.4];
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::LaneOutOfBounds { side: "right", .. })
        ));
    }

    #[test]
    fn test_overlapping_sides_rejected() {
        let mut tuning = Tuning::default();
        tuning.lanes.left.max_x = 1.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OverlappingSides)
        ));
    }

    #[test]
    fn test_inverted_schedule_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn.collectible_schedule.max_interval = 1.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidSchedule {
                category: "collectible"
            })
        ));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
