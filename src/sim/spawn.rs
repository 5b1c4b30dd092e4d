//! Procedural placement and recycling
//!
//! Nothing is ever created or destroyed during play: obstacles and bins that
//! scroll off the left edge are re-activated to the right of the current
//! frontier, and thrown trash reuses the first free projectile slot.

use rand::Rng;
use rand_pcg::Pcg32;

use super::aabb::Bounded;
use super::pool::{Pool, SlotId};
use super::state::{
    GameState, Obstacle, ObstacleKind, Player, ThrownTrash, ThrownTrashPool, TrashBin,
};
use crate::consts::*;

/// Rightmost right edge among live, on-screen members of a pool, never less
/// than the screen edge.
///
/// Entities still active but entirely left of the screen are ignored so a
/// stale remnant cannot pull new spawns back toward the player.
pub fn frontier<T: Bounded, const N: usize>(pool: &Pool<T, N>, screen_width: f32) -> f32 {
    pool.iter_active()
        .map(|(_, entity)| entity.aabb().right())
        .filter(|&right| right > 0.0)
        .fold(screen_width, f32::max)
}

/// `min + uniform[0, spread)` in whole pixels
pub fn spacing(rng: &mut Pcg32, min: f32, spread: u32) -> f32 {
    min + rng.random_range(0..spread) as f32
}

pub fn random_obstacle_kind(rng: &mut Pcg32) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::COUNT)]
}

/// Initial layout: a chain of bins past the right edge, then the obstacles
pub fn lay_out_session(state: &mut GameState) {
    let mut last_right = state.screen_width + INITIAL_LAYOUT_LEAD;

    for i in 0..MAX_TRASH_BINS {
        let kind = state.trash_bins.value(i).kind;
        let x = last_right + spacing(&mut state.rng, MIN_TRASH_BIN_SPACING, RAND_TRASH_BIN_SPACING);
        let bin = TrashBin::new(kind, x);
        last_right = bin.aabb().right();
        state.trash_bins.activate(i, bin);
    }

    last_right += INITIAL_LAYOUT_GAP;

    for i in 0..MAX_OBSTACLES {
        let kind = random_obstacle_kind(&mut state.rng);
        let x = last_right + spacing(&mut state.rng, MIN_OBSTACLE_SPACING, RAND_OBSTACLE_SPACING);
        let obstacle = Obstacle::new(kind, x);
        last_right = obstacle.aabb().right();
        state.obstacles.activate(i, obstacle);
    }

    log::debug!(
        "Layout: bins up to x={:.0}, obstacles up to x={:.0}",
        state.trash_bins.value(MAX_TRASH_BINS - 1).pos.x,
        last_right
    );
}

/// Re-place obstacle slot `index` past the frontier with a fresh kind
pub fn respawn_obstacle(state: &mut GameState, index: usize) {
    let base = frontier(&state.obstacles, state.screen_width);
    let x = base + spacing(&mut state.rng, MIN_OBSTACLE_SPACING, RAND_OBSTACLE_SPACING);
    let kind = random_obstacle_kind(&mut state.rng);
    log::debug!("Obstacle {} respawned as {:?} at x={:.0}", index, kind, x);
    state.obstacles.activate(index, Obstacle::new(kind, x));
}

/// Re-place bin slot `index` past the frontier; its kind never changes
pub fn respawn_trash_bin(state: &mut GameState, index: usize) {
    let base = frontier(&state.trash_bins, state.screen_width);
    let x = base + spacing(&mut state.rng, MIN_TRASH_BIN_SPACING, RAND_TRASH_BIN_SPACING);
    let kind = state.trash_bins.value(index).kind;
    log::debug!("{:?} bin respawned at x={:.0}", kind, x);
    state.trash_bins.activate(index, TrashBin::new(kind, x));
}

/// Scroll obstacles left and recycle the ones past the margin
///
/// Slots are visited in index order, so a respawn only sees the slots before
/// it at their post-scroll position. Inactive slots (killed monsters) are
/// revived in the same pass.
pub fn scroll_obstacles(state: &mut GameState, scale: f32) {
    let step = state.obstacle_speed * scale;
    for i in 0..MAX_OBSTACLES {
        if !state.obstacles.is_active(i) {
            respawn_obstacle(state, i);
            continue;
        }
        let obstacle = state.obstacles.value_mut(i);
        obstacle.pos.x -= step;
        if obstacle.pos.x < -obstacle.size.x - OBSTACLE_RESPAWN_MARGIN {
            respawn_obstacle(state, i);
        }
    }
}

/// Scroll bins left (slightly slower than obstacles) and recycle
pub fn scroll_trash_bins(state: &mut GameState, scale: f32) {
    let step = state.obstacle_speed * TRASH_BIN_SPEED_FACTOR * scale;
    for i in 0..MAX_TRASH_BINS {
        if !state.trash_bins.is_active(i) {
            continue;
        }
        let bin = state.trash_bins.value_mut(i);
        bin.pos.x -= step;
        if bin.pos.x < -bin.size.x - TRASH_BIN_RESPAWN_MARGIN {
            respawn_trash_bin(state, i);
        }
    }
}

/// Throw the player's selected trash into the first free slot
pub fn throw_item(player: &Player, pool: &mut ThrownTrashPool) -> Option<SlotId<ThrownTrash>> {
    pool.acquire(ThrownTrash::new(player.selected_trash, player.throw_origin()))
}

/// Push an obstacle that just hit the player well past the right edge
pub fn knock_back_obstacle(state: &mut GameState, index: usize) {
    let jitter = state.rng.random_range(0..RAND_OBSTACLE_KNOCKBACK) as f32;
    let x = state.screen_width + OBSTACLE_KNOCKBACK + jitter + index as f32 * OBSTACLE_KNOCKBACK_PER_INDEX;
    state.obstacles.value_mut(index).pos.x = x;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TrashKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::with_seed(seed, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
        state.start_new_session();
        state
    }

    #[test]
    fn test_frontier_defaults_to_screen_edge() {
        let pool: Pool<Obstacle, 3> = Pool::new(|_| Obstacle::new(ObstacleKind::Dog, 0.0));
        assert_eq!(frontier(&pool, 800.0), 800.0);
    }

    #[test]
    fn test_frontier_ignores_offscreen_remnants() {
        let mut pool: Pool<Obstacle, 3> = Pool::new(|_| Obstacle::new(ObstacleKind::Dog, 0.0));
        pool.activate(0, Obstacle::new(ObstacleKind::Dog, 1000.0));
        // Right edge exactly at 0 is not visible
        pool.activate(1, Obstacle::new(ObstacleKind::Dog, -70.0));
        assert_eq!(frontier(&pool, 800.0), 1070.0);

        pool.deactivate(0);
        assert_eq!(frontier(&pool, 800.0), 800.0);
    }

    #[test]
    fn test_layout_is_ordered_and_spaced() {
        let state = running_state(11);

        let mut last_right = DEFAULT_SCREEN_WIDTH + INITIAL_LAYOUT_LEAD;
        for i in 0..MAX_TRASH_BINS {
            let bin = state.trash_bins.value(i);
            assert_eq!(bin.kind, TrashKind::ALL[i]);
            assert!(bin.pos.x >= last_right + MIN_TRASH_BIN_SPACING);
            assert!(bin.pos.x < last_right + MIN_TRASH_BIN_SPACING + RAND_TRASH_BIN_SPACING as f32);
            last_right = bin.pos.x + bin.size.x;
        }

        last_right += INITIAL_LAYOUT_GAP;
        for i in 0..MAX_OBSTACLES {
            let obstacle = state.obstacles.value(i);
            assert!(obstacle.pos.x >= last_right + MIN_OBSTACLE_SPACING);
            last_right = obstacle.pos.x + obstacle.size.x;
        }
    }

    #[test]
    fn test_obstacle_shapes_from_table() {
        let hole = Obstacle::new(ObstacleKind::Hole, 0.0);
        assert_eq!(hole.size, Vec2::new(90.0, 20.0));
        assert_eq!(hole.pos.y, GROUND_LEVEL - 10.0);

        let bike = Obstacle::new(ObstacleKind::Bike, 0.0);
        assert_eq!(bike.size, Vec2::new(80.0, 100.0));
        assert_eq!(bike.pos.y, GROUND_LEVEL);

        let flyer = Obstacle::new(ObstacleKind::FlyingMonster, 0.0);
        assert_eq!(flyer.pos.y, GROUND_LEVEL + PLAYER_HEIGHT / 1.5);
    }

    #[test]
    fn test_offscreen_obstacle_respawns_past_frontier() {
        let mut state = running_state(5);
        state.obstacles.activate(0, Obstacle::new(ObstacleKind::Dog, -269.0));
        state.obstacles.activate(1, Obstacle::new(ObstacleKind::Dog, 1500.0));
        for i in 2..MAX_OBSTACLES {
            state.obstacles.activate(i, Obstacle::new(ObstacleKind::Dog, 100.0 * i as f32));
        }

        scroll_obstacles(&mut state, 1.0);

        // Slot 0 is visited first, so slot 1 is still at 1500 when it respawns
        let respawned = state.obstacles.value(0);
        assert!(respawned.pos.x >= 1570.0 + MIN_OBSTACLE_SPACING);
        assert!(respawned.pos.x < 1570.0 + MIN_OBSTACLE_SPACING + RAND_OBSTACLE_SPACING as f32);
        assert!(state.obstacles.is_active(0));
    }

    #[test]
    fn test_obstacle_just_inside_margin_is_kept() {
        let mut state = running_state(5);
        state.obstacle_speed = 0.0;
        state.obstacles.activate(0, Obstacle::new(ObstacleKind::Dog, -270.0));
        scroll_obstacles(&mut state, 1.0);
        assert_eq!(state.obstacles.value(0).pos.x, -270.0);
    }

    #[test]
    fn test_bin_respawn_boundary() {
        let mut state = running_state(5);
        state.obstacle_speed = 0.0;
        state.trash_bins.activate(1, TrashBin::new(TrashKind::Glass, -220.0));
        scroll_trash_bins(&mut state, 1.0);
        assert_eq!(state.trash_bins.value(1).pos.x, -220.0);

        state.trash_bins.activate(1, TrashBin::new(TrashKind::Glass, -220.5));
        scroll_trash_bins(&mut state, 1.0);
        assert!(state.trash_bins.value(1).pos.x > DEFAULT_SCREEN_WIDTH);
        assert_eq!(state.trash_bins.value(1).kind, TrashKind::Glass);
    }

    #[test]
    fn test_bin_respawn_keeps_kind() {
        let mut state = running_state(9);
        state.trash_bins.activate(3, TrashBin::new(TrashKind::Metal, -300.0));
        scroll_trash_bins(&mut state, 1.0);

        let bin = state.trash_bins.value(3);
        assert_eq!(bin.kind, TrashKind::Metal);
        let others_right = (0..MAX_TRASH_BINS)
            .filter(|&i| i != 3)
            .map(|i| state.trash_bins.value(i).pos.x + TRASH_BIN_WIDTH)
            .fold(DEFAULT_SCREEN_WIDTH, f32::max);
        assert!(bin.pos.x >= others_right + MIN_TRASH_BIN_SPACING);
    }

    #[test]
    fn test_bins_scroll_slower_than_obstacles() {
        let mut state = running_state(9);
        let bin_x = state.trash_bins.value(0).pos.x;
        let obstacle_x = state.obstacles.value(0).pos.x;
        scroll_obstacles(&mut state, 1.0);
        scroll_trash_bins(&mut state, 1.0);
        assert!((bin_x - state.trash_bins.value(0).pos.x - BASE_SPEED * 0.9).abs() < 1e-3);
        assert!((obstacle_x - state.obstacles.value(0).pos.x - BASE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_killed_slot_is_revived() {
        let mut state = running_state(21);
        state.obstacles.deactivate(2);
        scroll_obstacles(&mut state, 1.0);
        assert!(state.obstacles.is_active(2));
        assert_eq!(state.obstacles.active_count(), MAX_OBSTACLES);
    }

    #[test]
    fn test_knock_back_lands_past_screen() {
        let mut state = running_state(2);
        let kind = state.obstacles.value(4).kind;
        let size = state.obstacles.value(4).size;
        knock_back_obstacle(&mut state, 4);
        // Knock-back only moves the obstacle
        assert_eq!(state.obstacles.value(4).kind, kind);
        assert_eq!(state.obstacles.value(4).size, size);
        let x = state.obstacles.value(4).pos.x;
        let min = DEFAULT_SCREEN_WIDTH + OBSTACLE_KNOCKBACK + 4.0 * OBSTACLE_KNOCKBACK_PER_INDEX;
        assert!(x >= min && x < min + RAND_OBSTACLE_KNOCKBACK as f32);
    }

    proptest! {
        #[test]
        fn prop_respawn_never_closer_than_min_spacing(
            seed in any::<u64>(),
            xs in proptest::collection::vec(-500.0f32..3000.0, MAX_OBSTACLES),
        ) {
            let mut state = running_state(seed);
            for (i, &x) in xs.iter().enumerate() {
                state.obstacles.activate(i, Obstacle::new(ObstacleKind::Dog, x));
            }
            for i in 0..MAX_OBSTACLES {
                let before = frontier(&state.obstacles, state.screen_width);
                respawn_obstacle(&mut state, i);
                prop_assert!(state.obstacles.value(i).pos.x >= before + MIN_OBSTACLE_SPACING);
            }
        }

        #[test]
        fn prop_pools_never_exceed_capacity(seed in any::<u64>(), ticks in 1usize..400) {
            let mut state = running_state(seed);
            for _ in 0..ticks {
                scroll_obstacles(&mut state, 1.0);
                scroll_trash_bins(&mut state, 1.0);
                prop_assert!(state.obstacles.active_count() <= MAX_OBSTACLES);
                prop_assert_eq!(state.trash_bins.active_count(), MAX_TRASH_BINS);
            }
        }
    }
}
