//! Hooks into the presentation layer
//!
//! The core only pushes into these; it never reads state back. Every method
//! has a no-op default so a front end wires just what it draws or plays.

use serde::{Deserialize, Serialize};

use crate::sim::EntityCategory;

/// UI, audio and scene hooks driven by the session
pub trait Presentation {
    fn set_score_text(&mut self, _score: u64) {}
    fn set_high_score_text(&mut self, _high_score: u64) {}
    fn show_title(&mut self) {}
    fn hide_title(&mut self) {}
    fn show_game_over(&mut self) {}
    fn hide_game_over(&mut self) {}
    fn play_music(&mut self) {}
    fn stop_music(&mut self) {}
    fn play_collision_sound(&mut self) {}
    /// Scene reload was requested (restart or exit to menu)
    fn reload_session(&mut self) {}
}

/// Opaque handle to a front-end representation of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// Creates and destroys the visual/physical side of spawned entities
pub trait EntityFactory {
    fn spawn(&mut self, category: EntityCategory, lane_x: f32) -> EntityHandle;
    fn destroy(&mut self, handle: EntityHandle);
}
