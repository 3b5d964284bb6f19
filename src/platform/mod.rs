//! Platform abstraction layer
//!
//! Narrow interfaces to everything outside the gameplay core:
//! - Time source and global time scale
//! - Tap input events
//! - Presentation (UI text, visibility, audio, reload) and entity factory hooks

pub mod clock;
pub mod input;
pub mod presentation;

pub use clock::Clock;
pub use input::Tap;
pub use presentation::{EntityFactory, EntityHandle, Presentation};
