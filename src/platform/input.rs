//! Tap input events

use serde::{Deserialize, Serialize};

/// A single tap/click in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    /// Horizontal tap position in pixels
    pub x: f32,
    /// Screen width in pixels at the time of the tap
    pub screen_width: f32,
}

impl Tap {
    pub fn new(x: f32, screen_width: f32) -> Self {
        Self { x, screen_width }
    }

    /// Tap landed on the left half of the screen
    pub fn is_left_half(&self) -> bool {
        self.x < self.screen_width / 2.0
    }

    /// Tap landed on the right half (the midline counts as right)
    pub fn is_right_half(&self) -> bool {
        !self.is_left_half()
    }
}
