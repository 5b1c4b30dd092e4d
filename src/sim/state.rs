//! Game state and core simulation types
//!
//! One `GameState` is one session context: the player, the three entity pools,
//! scoring, difficulty, and the seeded RNG. The driver owns it; nothing here is
//! global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, Bounded};
use super::pool::{Pool, SlotId};
use super::spawn;
use crate::settings::{Settings, SettingsError, check_viewport};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, nothing simulated
    Menu,
    /// Active gameplay
    Running,
    /// Simulation frozen until resumed
    Paused,
    /// Lives ran out
    Over,
}

/// Recyclable trash categories, one bin per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrashKind {
    Paper,
    Glass,
    Plastic,
    Metal,
    Organic,
}

impl TrashKind {
    pub const COUNT: usize = 5;

    /// Bin slot order
    pub const ALL: [TrashKind; Self::COUNT] = [
        TrashKind::Paper,
        TrashKind::Glass,
        TrashKind::Plastic,
        TrashKind::Metal,
        TrashKind::Organic,
    ];

    const NAMES: [&'static str; Self::COUNT] = ["Paper", "Glass", "Plastic", "Metal", "Organic"];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// HUD display name
    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Next category, wrapping back to Paper
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// The only category that destroys monsters
    pub fn kills_monsters(self) -> bool {
        self == TrashKind::Metal
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Hole,
    Dog,
    Bike,
    GroundMonster,
    FlyingMonster,
}

/// Per-kind obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleShape {
    pub width: f32,
    pub height: f32,
    /// Bottom edge in world space
    pub y: f32,
}

const OBSTACLE_SHAPES: [ObstacleShape; ObstacleKind::COUNT] = [
    // Hole sinks just below the ground line
    ObstacleShape { width: 90.0, height: 20.0, y: GROUND_LEVEL - 10.0 },
    ObstacleShape { width: 70.0, height: 50.0, y: GROUND_LEVEL },
    ObstacleShape { width: 80.0, height: 100.0, y: GROUND_LEVEL },
    ObstacleShape { width: 75.0, height: 90.0, y: GROUND_LEVEL },
    // Flies above a ducking player's head, below a standing one's
    ObstacleShape { width: 60.0, height: 60.0, y: GROUND_LEVEL + PLAYER_HEIGHT / 1.5 },
];

impl ObstacleKind {
    pub const COUNT: usize = 5;

    pub const ALL: [ObstacleKind; Self::COUNT] = [
        ObstacleKind::Hole,
        ObstacleKind::Dog,
        ObstacleKind::Bike,
        ObstacleKind::GroundMonster,
        ObstacleKind::FlyingMonster,
    ];

    #[inline]
    pub fn shape(self) -> ObstacleShape {
        OBSTACLE_SHAPES[self as usize]
    }

    /// Monsters can be hit by thrown trash
    pub fn is_monster(self) -> bool {
        matches!(self, ObstacleKind::GroundMonster | ObstacleKind::FlyingMonster)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub jumping: bool,
    pub vertical_velocity: f32,
    pub ducking: bool,
    pub selected_trash: TrashKind,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_LEVEL),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            jumping: false,
            vertical_velocity: 0.0,
            ducking: false,
            selected_trash: TrashKind::Plastic,
        }
    }
}

impl Player {
    /// Current collision height (shorter while ducking)
    pub fn hitbox_height(&self) -> f32 {
        if self.ducking {
            self.size.y / DUCK_HEIGHT_DIVISOR
        } else {
            self.size.y
        }
    }

    /// Start a jump. Ignored mid-air or while ducking.
    pub fn try_jump(&mut self) -> bool {
        if self.jumping || self.ducking {
            return false;
        }
        self.jumping = true;
        self.vertical_velocity = JUMP_INITIAL_VELOCITY;
        true
    }

    /// Start ducking. Ignored mid-air.
    pub fn try_duck(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.ducking = true;
        true
    }

    pub fn stand_up(&mut self) {
        self.ducking = false;
    }

    /// Where a throw leaves the player's hand
    pub fn throw_origin(&self) -> Vec2 {
        let hand = if self.ducking {
            self.size.y / 3.6
        } else {
            self.size.y / 1.8
        };
        Vec2::new(self.pos.x + self.size.x, self.pos.y + hand)
    }
}

impl Bounded for Player {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.size.x, self.hitbox_height()))
    }
}

/// A scrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Obstacle of `kind` with its left edge at `x`
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            pos: Vec2::new(x, shape.y),
            size: Vec2::new(shape.width, shape.height),
        }
    }
}

impl Bounded for Obstacle {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A recycling bin; its kind is fixed by its pool slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashBin {
    pub kind: TrashKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl TrashBin {
    pub fn new(kind: TrashKind, x: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, GROUND_LEVEL),
            size: Vec2::new(TRASH_BIN_WIDTH, TRASH_BIN_HEIGHT),
        }
    }
}

impl Bounded for TrashBin {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A piece of trash in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrownTrash {
    pub kind: TrashKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl ThrownTrash {
    pub fn new(kind: TrashKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::splat(THROWN_TRASH_SIZE),
            vel: Vec2::new(THROWN_TRASH_SPEED_X, THROWN_TRASH_SPEED_Y),
        }
    }
}

impl Bounded for ThrownTrash {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

pub type ObstaclePool = Pool<Obstacle, MAX_OBSTACLES>;
pub type TrashBinPool = Pool<TrashBin, MAX_TRASH_BINS>;
pub type ThrownTrashPool = Pool<ThrownTrash, MAX_THROWN_TRASH>;

/// Two-frame run cycle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunAnimation {
    pub timer: f32,
    pub frame: u8,
}

/// Notable outcomes for the audio/HUD layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Jumped,
    Thrown { kind: TrashKind },
    /// No free projectile slot
    ThrowDropped,
    LifeLost { obstacle: ObstacleKind },
    MonsterKilled { monster: ObstacleKind },
    MonsterResisted { monster: ObstacleKind, trash: TrashKind },
    CorrectBin { kind: TrashKind },
    WrongBin { trash: TrashKind, bin: TrashKind },
    ExtraLife,
    /// Threshold crossed with lives already full
    ExtraLifeForfeited,
    GameOver { score: u32 },
}

/// Pending events beyond this are dropped until the driver drains them
pub const MAX_PENDING_EVENTS: usize = 64;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Viewport width used for spawning, culling and wraparound
    pub screen_width: f32,
    pub screen_height: f32,
    pub player: Player,
    pub obstacles: ObstaclePool,
    pub trash_bins: TrashBinPool,
    pub thrown_trash: ThrownTrashPool,
    pub score: u32,
    pub lives: u8,
    pub next_life_threshold: u32,
    /// Horizontal scroll speed, pixels per tick
    pub obstacle_speed: f32,
    /// Seconds of Running time this session
    pub elapsed: f32,
    pub background_offsets: [f32; 2],
    pub run_animation: RunAnimation,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state sitting in the main menu
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(seed, settings.screen_width, settings.screen_height)
    }

    /// Create a state with an explicit seed and viewport
    pub fn with_seed(seed: u64, screen_width: f32, screen_height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            screen_width,
            screen_height,
            player: Player::default(),
            obstacles: Pool::new(|_| Obstacle::new(ObstacleKind::Hole, 0.0)),
            // Bin kinds are bound to their slot for the whole process
            trash_bins: Pool::new(|i| TrashBin::new(TrashKind::ALL[i], 0.0)),
            thrown_trash: Pool::new(|_| ThrownTrash::new(TrashKind::Plastic, Vec2::ZERO)),
            score: 0,
            lives: STARTING_LIVES,
            next_life_threshold: FIRST_LIFE_THRESHOLD,
            obstacle_speed: BASE_SPEED,
            elapsed: 0.0,
            background_offsets: [0.0, screen_width],
            run_animation: RunAnimation::default(),
            time_ticks: 0,
            events: Vec::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    /// Reset everything and begin a fresh Running session
    pub fn start_new_session(&mut self) {
        self.player = Player::default();
        self.run_animation = RunAnimation::default();

        spawn::lay_out_session(self);
        self.thrown_trash.clear();

        self.score = 0;
        self.lives = STARTING_LIVES;
        self.next_life_threshold = FIRST_LIFE_THRESHOLD;
        self.obstacle_speed = BASE_SPEED;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.background_offsets = [0.0, self.screen_width];

        self.phase = GamePhase::Running;
        self.push_event(GameEvent::SessionStarted);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Menu or Game Over -> fresh session
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Menu | GamePhase::Over => self.start_new_session(),
            _ => {}
        }
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => {
                log::info!("Paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                GamePhase::Running
            }
            other => other,
        };
    }

    /// Paused -> Menu
    pub fn back_to_menu(&mut self) {
        if self.phase == GamePhase::Paused {
            log::info!("Back to menu");
            self.phase = GamePhase::Menu;
        }
    }

    /// Update the viewport between ticks
    ///
    /// Non-positive sizes are rejected and leave the state untouched. The
    /// background strips are re-anchored one new width apart, keeping the
    /// left strip's phase.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SettingsError> {
        check_viewport(width, height)?;
        self.screen_width = width;
        self.screen_height = height;

        let [a, b] = self.background_offsets;
        let mut anchor = a.min(b) % width;
        if anchor > 0.0 {
            anchor -= width;
        }
        self.background_offsets = [anchor, anchor + width];
        log::debug!("Viewport resized to {}x{}", width, height);
        Ok(())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn begin_jump(&mut self) -> bool {
        let jumped = self.is_running() && self.player.try_jump();
        if jumped {
            self.push_event(GameEvent::Jumped);
        }
        jumped
    }

    pub fn begin_duck(&mut self) -> bool {
        self.is_running() && self.player.try_duck()
    }

    pub fn end_duck(&mut self) {
        if self.is_running() {
            self.player.stand_up();
        }
    }

    pub fn cycle_selected_trash(&mut self) {
        if self.is_running() {
            self.player.selected_trash = self.player.selected_trash.next();
        }
    }

    pub fn select_trash(&mut self, kind: TrashKind) {
        if self.is_running() {
            self.player.selected_trash = kind;
        }
    }

    /// Throw the selected trash. `None` if not Running or every slot is in flight.
    pub fn throw_selected_trash(&mut self) -> Option<SlotId<ThrownTrash>> {
        if !self.is_running() {
            return None;
        }
        let kind = self.player.selected_trash;
        match spawn::throw_item(&self.player, &mut self.thrown_trash) {
            Some(id) => {
                self.push_event(GameEvent::Thrown { kind });
                Some(id)
            }
            None => {
                log::debug!("Throw dropped: all {} slots in flight", MAX_THROWN_TRASH);
                self.push_event(GameEvent::ThrowDropped);
                None
            }
        }
    }

    /// Display name of the selected category
    pub fn selected_trash_name(&self) -> &'static str {
        self.player.selected_trash.name()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() < MAX_PENDING_EVENTS {
            self.events.push(event);
        } else {
            log::trace!("Event queue full, dropping {:?}", event);
        }
    }

    /// Events not yet drained
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
