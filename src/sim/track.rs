//! Scrolling road tiles
//!
//! Each segment scrolls forward and, once it has moved a full reset distance
//! from where it started, jumps back by exactly that distance. With every
//! segment sharing the same speed and reset distance the spacing never drifts.

use serde::{Deserialize, Serialize};

use crate::tuning::TrackTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    /// Start position along the scroll axis
    pub base: f32,
    pub position: f32,
    pub length: f32,
    pub reset_distance: f32,
    pub scroll_speed: f32,
}

impl TrackSegment {
    pub fn new(base: f32, tuning: &TrackTuning) -> Self {
        Self {
            base,
            position: base,
            length: tuning.segment_length,
            reset_distance: tuning.reset_distance(),
            scroll_speed: tuning.scroll_speed,
        }
    }

    /// The segments for one road, laid end to end from 0
    pub fn road(tuning: &TrackTuning) -> Vec<TrackSegment> {
        (0..tuning.segment_count)
            .map(|i| TrackSegment::new(i as f32 * tuning.segment_length, tuning))
            .collect()
    }

    pub fn displacement(&self) -> f32 {
        self.position - self.base
    }

    /// Scroll for `dt` seconds unless paused. Returns true if the segment wrapped.
    /// Negative or non-finite `dt` leaves the segment where it is.
    pub fn advance(&mut self, dt: f32, paused: bool) -> bool {
        if paused || !dt.is_finite() || dt < 0.0 {
            return false;
        }
        self.position += self.scroll_speed * dt;
        let mut wrapped = false;
        // May wrap more than once per frame
        while self.displacement() >= self.reset_distance {
            self.position -= self.reset_distance;
            wrapped = true;
        }
        wrapped
    }

    /// Back to the start position (session reload)
    pub fn reset(&mut self) {
        self.position = self.base;
    }
}
