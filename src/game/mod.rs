//! Runtime core
//!
//! The deterministic heart of the platformer, host- and
//! backend-agnostic:
//! - Timer: wall-clock time in, fixed simulation steps out
//! - Entity + traits: actors composed from independent behaviors
//! - Stage + Level + layers: ordered update and draw passes
//! - Camera: scrolling viewport clamped to world bounds
//!
//! Everything here is synchronous and single-threaded; one step runs
//! to completion between host frame callbacks. Determinism rests on
//! three ordering rules: traits update in attach order, entities in
//! insertion order, layers in registration order, for update and
//! draw both.

pub mod timer;
pub mod error;
pub mod context;
pub mod event;
pub mod entity;
pub mod stage;
pub mod layer;
pub mod layers;
pub mod level;
pub mod camera;
pub mod factory;
pub mod traits;

// Re-export the types the driver and loader reach for
pub use camera::{Camera, CameraBounds};
pub use context::GameContext;
pub use entity::Entity;
pub use event::Events;
pub use factory::EntityFactory;
pub use layers::{BackgroundLayer, CollisionLayer, DashboardLayer, EntityLayer, EntitySpriteLayer};
pub use level::Level;
pub use stage::{Stage, TileMap};
pub use timer::{Clock, FixedTimer};
