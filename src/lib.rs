//! Eco Runner - A side-scrolling recycling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `renderer`: Read-only snapshots and quad geometry for an external renderer
//! - `settings`: Viewport/seed configuration loaded from JSON
//! - `autopilot`: Scripted player used by the headless driver

pub mod autopilot;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Velocities and accelerations are per tick and tuned for `SIM_DT`.
pub mod consts {
    /// Fixed simulation timestep (16 ms)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

    /// Y coordinate of the ground line (y grows upward)
    pub const GROUND_LEVEL: f32 = 100.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_START_X: f32 = 100.0;
    /// Hitbox height divisor while ducking
    pub const DUCK_HEIGHT_DIVISOR: f32 = 1.8;
    pub const JUMP_INITIAL_VELOCITY: f32 = 22.0;
    pub const GRAVITY: f32 = 0.75;
    /// Seconds per run-cycle frame
    pub const RUN_FRAME_DURATION: f32 = 0.12;

    /// Starting horizontal scroll speed (pixels per tick)
    pub const BASE_SPEED: f32 = 3.0;
    /// Speed gained per tick, multiplied by elapsed seconds
    pub const SPEED_RAMP: f32 = 0.000015;
    /// Background strip speed at BASE_SPEED
    pub const BACKGROUND_SPEED: f32 = 2.0;

    /// Obstacle spacing and recycling
    pub const MIN_OBSTACLE_SPACING: f32 = 450.0;
    pub const RAND_OBSTACLE_SPACING: u32 = 300;
    pub const OBSTACLE_RESPAWN_MARGIN: f32 = 200.0;
    /// Knock-back after hitting the player
    pub const OBSTACLE_KNOCKBACK: f32 = 250.0;
    pub const RAND_OBSTACLE_KNOCKBACK: u32 = 200;
    pub const OBSTACLE_KNOCKBACK_PER_INDEX: f32 = 20.0;

    /// Trash bins
    pub const TRASH_BIN_WIDTH: f32 = 70.0;
    pub const TRASH_BIN_HEIGHT: f32 = 90.0;
    pub const MIN_TRASH_BIN_SPACING: f32 = 400.0;
    pub const RAND_TRASH_BIN_SPACING: u32 = 250;
    pub const TRASH_BIN_RESPAWN_MARGIN: f32 = 150.0;
    /// Bins scroll slightly slower than obstacles
    pub const TRASH_BIN_SPEED_FACTOR: f32 = 0.90;
    /// Initial layout: first bin chain starts this far past the screen edge
    pub const INITIAL_LAYOUT_LEAD: f32 = 100.0;
    /// Initial layout: gap between the last bin and the first obstacle
    pub const INITIAL_LAYOUT_GAP: f32 = 150.0;

    /// Thrown trash
    pub const THROWN_TRASH_SIZE: f32 = 25.0;
    pub const THROWN_TRASH_SPEED_X: f32 = 7.0;
    pub const THROWN_TRASH_SPEED_Y: f32 = 4.0;
    /// Fraction of GRAVITY applied to thrown trash (flatter arc)
    pub const THROWN_TRASH_GRAVITY_SCALE: f32 = 0.35;
    pub const THROWN_TRASH_CULL_MARGIN: f32 = 50.0;

    /// Pool capacities
    pub const MAX_OBSTACLES: usize = 5;
    pub const MAX_TRASH_BINS: usize = 5;
    pub const MAX_THROWN_TRASH: usize = 10;

    /// Scoring
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;
    pub const FIRST_LIFE_THRESHOLD: u32 = 2000;
    pub const LIFE_THRESHOLD_STEP: u32 = 2000;
    pub const CORRECT_BIN_POINTS: u32 = 10;
    pub const WRONG_BIN_PENALTY: u32 = 5;
    pub const MONSTER_KILL_POINTS: u32 = 30;
}
