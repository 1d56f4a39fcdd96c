//! Standard layers
//!
//! The usual pipeline for a side-scrolling level, in registration
//! order: entities advance, collision resolves, background paints,
//! dashboard paints last so it reads fully resolved state.

pub mod entities;
pub mod collision;
pub mod background;
pub mod dashboard;

pub use entities::EntityLayer;
pub use collision::CollisionLayer;
pub use background::{BackgroundLayer, EntitySpriteLayer};
pub use dashboard::DashboardLayer;
