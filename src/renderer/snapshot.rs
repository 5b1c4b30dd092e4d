//! Read-only view of a session for drawing
//!
//! The renderer never reads `GameState` directly. It gets a `Snapshot` holding
//! only active entities, in the order they should be drawn.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, ObstacleKind, Player, RunAnimation, TrashKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    TrashBin(TrashKind),
    Obstacle(ObstacleKind),
    ThrownTrash(TrashKind),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Bottom-left corner, y up
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerPose {
    Running { frame: u8 },
    Jumping,
    Ducking,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    /// Drawn size; shorter while ducking
    pub size: Vec2,
    pub pose: PlayerPose,
}

impl PlayerView {
    fn new(player: &Player, animation: &RunAnimation) -> Self {
        let pose = if player.jumping {
            PlayerPose::Jumping
        } else if player.ducking {
            PlayerPose::Ducking
        } else {
            PlayerPose::Running {
                frame: animation.frame,
            }
        };
        Self {
            pos: player.pos,
            size: Vec2::new(player.size.x, player.hitbox_height()),
            pose,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u8,
    pub selected_trash: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub screen_width: f32,
    pub screen_height: f32,
    pub background_offsets: [f32; 2],
    pub player: PlayerView,
    /// Bins first, then obstacles, then projectiles
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let bins = state.trash_bins.iter_active().map(|(_, bin)| Sprite {
            kind: SpriteKind::TrashBin(bin.kind),
            pos: bin.pos,
            size: bin.size,
        });
        let obstacles = state.obstacles.iter_active().map(|(_, o)| Sprite {
            kind: SpriteKind::Obstacle(o.kind),
            pos: o.pos,
            size: o.size,
        });
        let thrown = state.thrown_trash.iter_active().map(|(_, t)| Sprite {
            kind: SpriteKind::ThrownTrash(t.kind),
            pos: t.pos,
            size: t.size,
        });

        Self {
            phase: state.phase,
            screen_width: state.screen_width,
            screen_height: state.screen_height,
            background_offsets: state.background_offsets,
            player: PlayerView::new(&state.player, &state.run_animation),
            sprites: bins.chain(obstacles).chain(thrown).collect(),
            hud: Hud {
                score: state.score,
                lives: state.lives,
                selected_trash: state.selected_trash_name(),
            },
        }
    }
}
