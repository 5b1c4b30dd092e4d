//! Shape generation for 2D primitives
//!
//! Everything is built in clip space from world coordinates (origin at the
//! bottom-left of the viewport, y up), two triangles per quad.

use glam::Vec2;

use super::snapshot::{PlayerPose, Snapshot, SpriteKind};
use super::vertex::{Vertex, colors};
use crate::consts::GROUND_LEVEL;

/// World position to normalized device coordinates
#[inline]
pub fn to_clip(p: Vec2, screen: Vec2) -> Vec2 {
    p / screen * 2.0 - Vec2::ONE
}

/// Append a filled axis-aligned rectangle
fn push_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, screen: Vec2, color: [f32; 4]) {
    let min = to_clip(pos, screen);
    let max = to_clip(pos + size, screen);

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

fn sprite_color(kind: SpriteKind) -> [f32; 4] {
    match kind {
        SpriteKind::TrashBin(trash) | SpriteKind::ThrownTrash(trash) => colors::trash(trash),
        SpriteKind::Obstacle(obstacle) => colors::obstacle(obstacle),
    }
}

/// Whole frame as one triangle list: background, ground, sprites, player
pub fn frame(snapshot: &Snapshot) -> Vec<Vertex> {
    let screen = Vec2::new(snapshot.screen_width, snapshot.screen_height);
    let quads = 3 + snapshot.sprites.len() + 1;
    let mut vertices = Vec::with_capacity(quads * 6);

    for (offset, color) in snapshot.background_offsets.iter().zip([colors::SKY, colors::SKY_ALT]) {
        push_rect(&mut vertices, Vec2::new(*offset, 0.0), screen, screen, color);
    }
    push_rect(
        &mut vertices,
        Vec2::ZERO,
        Vec2::new(screen.x, GROUND_LEVEL),
        screen,
        colors::GROUND,
    );

    for sprite in &snapshot.sprites {
        push_rect(&mut vertices, sprite.pos, sprite.size, screen, sprite_color(sprite.kind));
    }

    let player = &snapshot.player;
    let mut color = colors::PLAYER;
    // Alternate shade for the second run frame
    if player.pose == (PlayerPose::Running { frame: 1 }) {
        color[2] *= 0.8;
    }
    push_rect(&mut vertices, player.pos, player.size, screen, color);

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::Snapshot;
    use crate::sim::GameState;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_clip_corners() {
        assert_eq!(to_clip(Vec2::ZERO, SCREEN), Vec2::new(-1.0, -1.0));
        assert_eq!(to_clip(SCREEN, SCREEN), Vec2::new(1.0, 1.0));
        assert_eq!(to_clip(SCREEN / 2.0, SCREEN), Vec2::ZERO);
    }

    #[test]
    fn test_rect_two_triangles() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, Vec2::ZERO, SCREEN, SCREEN, colors::GROUND);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            assert!(v.position[0] == -1.0 || v.position[0] == 1.0);
            assert!(v.position[1] == -1.0 || v.position[1] == 1.0);
            assert_eq!(v.color, colors::GROUND);
        }
    }

    #[test]
    fn test_frame_vertex_count() {
        let mut state = GameState::with_seed(3, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
        state.start_new_session();
        state.throw_selected_trash();
        let snapshot = Snapshot::capture(&state);
        let vertices = frame(&snapshot);

        // Two background strips, ground, sprites, player
        assert_eq!(vertices.len(), (3 + snapshot.sprites.len() + 1) * 6);
        // Player is drawn last
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::PLAYER));
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), SCREEN, colors::DOG);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * Vertex::STRIDE);
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);
    }
}
