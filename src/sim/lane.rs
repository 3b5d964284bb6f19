//! Lane layout for both play sides
//!
//! Lanes are fixed lateral offsets. The full set is shared by the spawner;
//! each side only ever toggles between its own two lanes.

use serde::{Deserialize, Serialize};

use crate::tuning::{LaneTuning, SideTuning, TuningError};

/// One of the two play areas sharing the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Bounds and lane centers for one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideLanes {
    pub min_x: f32,
    pub max_x: f32,
    pub lanes: [f32; 2],
    pub default_lane: usize,
}

impl SideLanes {
    fn from_tuning(tuning: &SideTuning) -> Self {
        Self {
            min_x: tuning.min_x,
            max_x: tuning.max_x,
            lanes: [tuning.lanes[0], tuning.lanes[1]],
            default_lane: tuning.default_lane,
        }
    }

    /// Lane center for `lane` (0 or 1), kept inside the side bounds
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.lanes[lane & 1].clamp(self.min_x, self.max_x)
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

/// The complete, immutable lane set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTrack {
    sides: [SideLanes; 2],
    /// Every lane, left to right
    all: Vec<f32>,
}

impl Default for LaneTrack {
    fn default() -> Self {
        Self::from_parts(&LaneTuning::default())
    }
}

impl LaneTrack {
    /// Build a lane track, rejecting layouts that break the side invariants
    pub fn new(tuning: &LaneTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_parts(tuning))
    }

    fn from_parts(tuning: &LaneTuning) -> Self {
        let left = SideLanes::from_tuning(&tuning.left);
        let right = SideLanes::from_tuning(&tuning.right);
        let all = left.lanes.iter().chain(right.lanes.iter()).copied().collect();
        Self {
            sides: [left, right],
            all,
        }
    }

    pub fn side(&self, side: Side) -> &SideLanes {
        &self.sides[side.index()]
    }

    /// Every lane center across both sides
    pub fn all_lanes(&self) -> &[f32] {
        &self.all
    }

    /// Which side's bounds contain a lateral position, if any
    pub fn side_of(&self, x: f32) -> Option<Side> {
        Side::BOTH.into_iter().find(|&s| self.side(s).contains_x(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let track = LaneTrack::default();
        assert_eq!(track.all_lanes(), &[-4.05, -1.35, 1.35, 4.05]);
        assert_eq!(track.side(Side::Left).lane_x(1), -1.35);
        assert_eq!(track.side(Side::Right).lane_x(0), 1.35);
    }

    #[test]
    fn test_every_lane_belongs_to_one_side() {
        let track = LaneTrack::default();
        assert_eq!(track.side_of(-4.05), Some(Side::Left));
        assert_eq!(track.side_of(-1.35), Some(Side::Left));
        assert_eq!(track.side_of(1.35), Some(Side::Right));
        assert_eq!(track.side_of(4.05), Some(Side::Right));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut tuning = LaneTuning::default();
        tuning.left.lanes = vec![-6.0, -1.35];
        assert!(LaneTrack::new(&tuning).is_err());
    }
}
