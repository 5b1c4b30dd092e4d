//! Scripted player for the headless demo
//!
//! Reads the state the way a human reads the screen and answers with one
//! `TickInput` per tick. It never touches the state directly.

use crate::settings::AutopilotSettings;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind, TickInput, TrashKind};

pub struct Autopilot {
    tuning: AutopilotSettings,
    cooldown: u32,
}

impl Autopilot {
    pub fn new(tuning: AutopilotSettings) -> Self {
        Self { tuning, cooldown: 0 }
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Menu | GamePhase::Over => {
                return TickInput {
                    start: true,
                    ..Default::default()
                };
            }
            GamePhase::Paused => {
                return TickInput {
                    pause: true,
                    ..Default::default()
                };
            }
            GamePhase::Running => {}
        }

        let mut input = TickInput::default();
        let player = &state.player;
        let front = player.pos.x + player.size.x;

        let ground_close = obstacles_ahead(state)
            .any(|o| o.kind != ObstacleKind::FlyingMonster && o.pos.x - front < self.tuning.jump_distance);
        let flyer_close = obstacles_ahead(state)
            .any(|o| o.kind == ObstacleKind::FlyingMonster && o.pos.x - front < self.tuning.duck_distance);

        // Jumping wins: nothing on the ground can be ducked
        if ground_close {
            if !player.jumping {
                if player.ducking {
                    input.duck = Some(false);
                }
                input.jump = true;
            }
        } else if flyer_close {
            if !player.ducking && !player.jumping {
                input.duck = Some(true);
            }
        } else if player.ducking {
            input.duck = Some(false);
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
        } else if let Some(kind) = self.pick_ammo(state, front) {
            input.select_trash = Some(kind);
            input.throw = true;
            self.cooldown = self.tuning.throw_cooldown_ticks;
        }

        input
    }

    /// Metal for a monster in range, else the category of the nearest bin in range
    fn pick_ammo(&self, state: &GameState, front: f32) -> Option<TrashKind> {
        let in_range = |x: f32| x - front <= self.tuning.throw_distance;

        if obstacles_ahead(state).any(|o| o.kind.is_monster() && in_range(o.pos.x)) {
            return Some(TrashKind::Metal);
        }

        state
            .trash_bins
            .iter_active()
            .map(|(_, bin)| bin)
            .filter(|bin| bin.pos.x >= front && in_range(bin.pos.x))
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|bin| bin.kind)
    }
}

/// Active obstacles not yet fully behind the player
fn obstacles_ahead(state: &GameState) -> impl Iterator<Item = &Obstacle> {
    let player_left = state.player.pos.x;
    state
        .obstacles
        .iter_active()
        .map(|(_, o)| o)
        .filter(move |o| o.pos.x + o.size.x > player_left)
}
