//! Twin Lane Runner - gameplay core of a two-sided endless lane runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session, spawning, lanes, collisions)
//! - `platform`: Clock, input and presentation hooks
//! - `persistence`: Cross-session key-value store
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{Collaborators, GamePhase, TickInput, World};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame time for headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the clock will pass on, to avoid huge catch-up steps
    pub const MAX_FRAME_DT: f32 = 0.1;
}

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use wasm_bindgen::prelude::*;

    /// Browser entry point: route logs and panics to the console
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Twin Lane Runner core loaded");
    }
}
