//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Scaled delta time only (no wall clock reads)
//! - Seeded RNG only
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies beyond the hook traits

pub mod collision;
pub mod entity;
pub mod lane;
pub mod player;
pub mod session;
pub mod spawner;
pub mod tick;
pub mod track;

pub use collision::{Aabb, CollisionSink, HitResponse};
pub use entity::{EntityCategory, EntityId, EntityRegistry, SpawnedEntity};
pub use lane::{LaneTrack, Side, SideLanes};
pub use player::PlayerController;
pub use session::{GamePhase, Session};
pub use spawner::{SpawnSchedule, Spawner};
pub use tick::{Collaborators, TickInput, World};
pub use track::TrackSegment;
