//! Pluggable entity behaviors
//!
//! Each trait gives an entity one capability. Kinds are built by
//! combining them: the player is velocity + gravity + walk + jump +
//! fallout; a walker swaps the control traits for patrol AI. Attach
//! order is update order, so physics traits go on before traits that
//! react to contact flags.

pub mod velocity;
pub mod gravity;
pub mod walk;
pub mod jump;
pub mod patrol;
pub mod fallout;
pub mod player;

pub use velocity::Velocity;
pub use gravity::Gravity;
pub use walk::Walk;
pub use jump::Jump;
pub use patrol::Patrol;
pub use fallout::{Fallout, FalloutAction};
pub use player::PlayerController;
