//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Bounded};
pub use collision::resolve_collisions;
pub use pool::{Pool, SlotId};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, ObstacleShape, Player, RunAnimation,
    ThrownTrash, TrashBin, TrashKind, MAX_PENDING_EVENTS,
};
pub use tick::{TickInput, tick};
