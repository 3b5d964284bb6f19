//! Frame clock with a global time scale

use crate::consts::MAX_FRAME_DT;

/// Scales raw frame time by the global pause multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    /// 0 = fully paused, 1 = normal speed
    time_scale: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Clocks start paused until the session starts playing
    pub fn new() -> Self {
        Self { time_scale: 0.0 }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Convert raw wall-clock seconds into scaled simulation seconds.
    /// Non-finite frame times count as an empty frame.
    pub fn scaled_delta(&self, raw_dt: f32) -> f32 {
        if !raw_dt.is_finite() {
            log::warn!("Dropping non-finite frame delta {}", raw_dt);
            return 0.0;
        }
        raw_dt.clamp(0.0, MAX_FRAME_DT) * self.time_scale
    }
}
