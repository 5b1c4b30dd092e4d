//! Collision resolution and scoring
//!
//! Runs once per tick after every position update. All tests are strict AABB
//! overlaps and every scan walks pools in index order, so the lowest index wins
//! a tie.

use super::aabb::Bounded;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Resolve this tick's collisions in rule order
pub fn resolve_collisions(state: &mut GameState) {
    // A player hit ends the pass: no projectile scoring on the same tick
    if player_vs_obstacles(state) {
        return;
    }
    for index in 0..MAX_THROWN_TRASH {
        if state.thrown_trash.is_active(index) {
            resolve_thrown_trash(state, index);
        }
    }
}

/// First obstacle overlapping the player costs one life. Returns true on a hit.
///
/// At most one life is lost per tick no matter how many obstacles overlap.
pub fn player_vs_obstacles(state: &mut GameState) -> bool {
    let player_box = state.player.aabb();
    let Some((id, kind)) = state
        .obstacles
        .iter_active()
        .find(|(_, obstacle)| player_box.overlaps(&obstacle.aabb()))
        .map(|(id, obstacle)| (id, obstacle.kind))
    else {
        return false;
    };

    state.lives = state.lives.saturating_sub(1);
    spawn::knock_back_obstacle(state, id.index());
    state.push_event(GameEvent::LifeLost { obstacle: kind });
    log::debug!("Hit {:?} (slot {}), {} lives left", kind, id.index(), state.lives);

    if state.lives == 0 {
        end_session(state);
    }
    true
}

/// Resolve one projectile: monsters first, then bins
///
/// A projectile touching any monster is consumed there and never reaches the
/// bin scan, even if it overlaps a bin too.
fn resolve_thrown_trash(state: &mut GameState, index: usize) {
    let trash = state.thrown_trash.value(index);
    let trash_box = trash.aabb();
    let kind = trash.kind;

    let monster = state
        .obstacles
        .iter_active()
        .find(|(_, obstacle)| obstacle.kind.is_monster() && trash_box.overlaps(&obstacle.aabb()))
        .map(|(id, obstacle)| (id, obstacle.kind));

    if let Some((monster_id, monster)) = monster {
        state.thrown_trash.deactivate(index);
        if kind.kills_monsters() {
            state.obstacles.release(monster_id);
            state.score += MONSTER_KILL_POINTS;
            state.push_event(GameEvent::MonsterKilled { monster });
            log::debug!("{:?} killed by {:?}, score {}", monster, kind, state.score);
        } else {
            state.push_event(GameEvent::MonsterResisted {
                monster,
                trash: kind,
            });
        }
        return;
    }

    let bin = state
        .trash_bins
        .iter_active()
        .find(|(_, bin)| trash_box.overlaps(&bin.aabb()))
        .map(|(_, bin)| bin.kind);

    let Some(bin) = bin else {
        return;
    };

    state.thrown_trash.deactivate(index);
    if bin == kind {
        state.score += CORRECT_BIN_POINTS;
        state.push_event(GameEvent::CorrectBin { kind });
        check_life_threshold(state);
    } else {
        state.score = state.score.saturating_sub(WRONG_BIN_PENALTY);
        state.push_event(GameEvent::WrongBin { trash: kind, bin });
    }
}

/// Award an extra life when the score reaches the threshold
///
/// The threshold advances even when lives are already full.
fn check_life_threshold(state: &mut GameState) {
    if state.score < state.next_life_threshold {
        return;
    }
    if state.lives < MAX_LIVES {
        state.lives += 1;
        state.push_event(GameEvent::ExtraLife);
        log::info!("Extra life! Lives: {}", state.lives);
    } else {
        state.push_event(GameEvent::ExtraLifeForfeited);
        log::info!("Extra life threshold reached with lives full");
    }
    state.next_life_threshold += LIFE_THRESHOLD_STEP;
    log::debug!("Next extra life at {}", state.next_life_threshold);
}

/// Lives ran out
pub fn end_session(state: &mut GameState) {
    if state.phase == GamePhase::Over {
        return;
    }
    state.phase = GamePhase::Over;
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} after {:.1}s (seed {})",
        state.score,
        state.elapsed,
        state.seed
    );
}
