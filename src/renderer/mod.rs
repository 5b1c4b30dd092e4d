//! Render-side view of the simulation
//!
//! Produces plain data for an external GPU layer: a serializable snapshot and
//! colored triangle lists built from it.

pub mod shapes;
pub mod snapshot;
pub mod vertex;

pub use snapshot::{Hud, PlayerPose, PlayerView, Snapshot, Sprite, SpriteKind};
pub use vertex::Vertex;
