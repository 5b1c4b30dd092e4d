//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per-tick
//! constants are tuned for `SIM_DT`; any other `dt` scales them linearly.

use super::collision::{end_session, resolve_collisions};
use super::spawn;
use super::state::{GamePhase, GameState, Player, RunAnimation, TrashKind};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start from the menu or restart after Game Over
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the pause screen for the main menu
    pub back_to_menu: bool,
    pub jump: bool,
    /// `Some(true)` duck pressed, `Some(false)` released
    pub duck: Option<bool>,
    pub cycle_trash: bool,
    pub select_trash: Option<TrashKind>,
    pub throw: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start {
        state.start();
    }
    if input.pause {
        state.toggle_pause();
    }
    if input.back_to_menu {
        state.back_to_menu();
    }

    // Don't tick unless a session is running
    if state.phase != GamePhase::Running {
        return;
    }

    apply_player_input(state, input);

    let scale = dt / SIM_DT;
    state.time_ticks += 1;
    state.elapsed += dt;

    integrate_player(&mut state.player, &mut state.run_animation, dt, scale);

    // Background follows the speed from before this tick's ramp
    let speed_multiplier = state.obstacle_speed / BASE_SPEED;

    spawn::scroll_obstacles(state, scale);
    spawn::scroll_trash_bins(state, scale);
    move_thrown_trash(state, scale);
    scroll_background(state, BACKGROUND_SPEED * speed_multiplier * scale);

    ramp_difficulty(state, scale);

    resolve_collisions(state);

    if state.lives == 0 {
        end_session(state);
    }
}

fn apply_player_input(state: &mut GameState, input: &TickInput) {
    match input.duck {
        Some(true) => {
            state.begin_duck();
        }
        Some(false) => state.end_duck(),
        None => {}
    }
    if input.jump {
        state.begin_jump();
    }
    if let Some(kind) = input.select_trash {
        state.select_trash(kind);
    }
    if input.cycle_trash {
        state.cycle_selected_trash();
    }
    if input.throw {
        state.throw_selected_trash();
    }
}

/// Jump arc, or the run cycle when on foot and upright
pub fn integrate_player(player: &mut Player, animation: &mut RunAnimation, dt: f32, scale: f32) {
    if player.jumping {
        player.pos.y += player.vertical_velocity * scale;
        player.vertical_velocity -= GRAVITY * scale;

        if player.pos.y <= GROUND_LEVEL {
            player.pos.y = GROUND_LEVEL;
            player.jumping = false;
            player.vertical_velocity = 0.0;
        }
    } else if !player.ducking {
        animation.timer += dt;
        if animation.timer >= RUN_FRAME_DURATION {
            animation.timer = 0.0;
            animation.frame = (animation.frame + 1) % 2;
        }
    }
}

/// Ballistic arc with reduced gravity; leaving the screen frees the slot
pub fn move_thrown_trash(state: &mut GameState, scale: f32) {
    let right_limit = state.screen_width + THROWN_TRASH_CULL_MARGIN;
    for i in 0..MAX_THROWN_TRASH {
        if !state.thrown_trash.is_active(i) {
            continue;
        }
        let trash = state.thrown_trash.value_mut(i);
        trash.pos += trash.vel * scale;
        trash.vel.y -= GRAVITY * THROWN_TRASH_GRAVITY_SCALE * scale;

        if trash.pos.y < -THROWN_TRASH_CULL_MARGIN || trash.pos.x > right_limit {
            state.thrown_trash.deactivate(i);
        }
    }
}

/// Two strips leapfrog each other for an endless background
pub fn scroll_background(state: &mut GameState, step: f32) {
    let width = state.screen_width;
    let [first, second] = &mut state.background_offsets;
    *first -= step;
    *second -= step;
    if *first <= -width {
        *first = *second + width;
    }
    if *second <= -width {
        *second = *first + width;
    }
}

/// Continuous, unbounded speed-up
fn ramp_difficulty(state: &mut GameState, scale: f32) {
    state.obstacle_speed += state.elapsed * SPEED_RAMP * scale;
}
