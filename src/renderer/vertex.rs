//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{ObstacleKind, TrashKind};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` (`position` sits at 0)
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::{ObstacleKind, TrashKind};

    pub const SKY: [f32; 4] = [0.55, 0.78, 0.95, 1.0];
    pub const SKY_ALT: [f32; 4] = [0.5, 0.74, 0.93, 1.0];
    pub const GROUND: [f32; 4] = [0.35, 0.55, 0.25, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.4, 0.9, 1.0];

    pub const PAPER: [f32; 4] = [0.2, 0.45, 0.95, 1.0];
    pub const GLASS: [f32; 4] = [0.25, 0.75, 0.35, 1.0];
    pub const PLASTIC: [f32; 4] = [0.95, 0.85, 0.2, 1.0];
    pub const METAL: [f32; 4] = [0.65, 0.65, 0.7, 1.0];
    pub const ORGANIC: [f32; 4] = [0.5, 0.32, 0.15, 1.0];

    pub const HOLE: [f32; 4] = [0.08, 0.06, 0.05, 1.0];
    pub const DOG: [f32; 4] = [0.7, 0.45, 0.2, 1.0];
    pub const BIKE: [f32; 4] = [0.85, 0.2, 0.2, 1.0];
    pub const MONSTER: [f32; 4] = [0.55, 0.1, 0.6, 1.0];

    pub const fn trash(kind: TrashKind) -> [f32; 4] {
        match kind {
            TrashKind::Paper => PAPER,
            TrashKind::Glass => GLASS,
            TrashKind::Plastic => PLASTIC,
            TrashKind::Metal => METAL,
            TrashKind::Organic => ORGANIC,
        }
    }

    pub const fn obstacle(kind: ObstacleKind) -> [f32; 4] {
        match kind {
            ObstacleKind::Hole => HOLE,
            ObstacleKind::Dog => DOG,
            ObstacleKind::Bike => BIKE,
            ObstacleKind::GroundMonster | ObstacleKind::FlyingMonster => MONSTER,
        }
    }
}
