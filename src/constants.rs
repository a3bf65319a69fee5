//! Compile-time defaults for every tuning value.
//!
//! [`crate::config::GameConfig::default`] is built from these; a TOML file can
//! override any subset at startup. Distances are in world pixels, times in
//! milliseconds, per-frame quantities are applied once per `tick`.

// ── Screen ────────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_X: f32 = 100.0;
pub const PLAYER_SIZE: f32 = 40.0;
/// Added to the vertical velocity every frame.
pub const GRAVITY: f32 = 0.1;
/// Velocity set (not added) by a jump. Negative is up.
pub const JUMP_FORCE: f32 = -4.0;
pub const MAX_SHIELDS: u8 = 3;
pub const INVULNERABILITY_MS: f64 = 1000.0;

// ── Weapons ───────────────────────────────────────────────────────────────────

pub const DEFAULT_COOLDOWN_MS: f64 = 400.0;
pub const FAST_LASER_COOLDOWN_MS: f64 = 50.0;
pub const CHARGE_GUN_COOLDOWN_MS: f64 = 400.0;
pub const WEAPON_PICKUP_AMMO: u32 = 50;
pub const MAX_CHARGE: f32 = 100.0;
pub const CHARGE_RATE: f32 = 1.0;
pub const CHARGE_SOUND_INTERVAL_MS: f64 = 100.0;
/// Bullets in a zero-charge burst; one more per `CHARGE_PER_EXTRA_BULLET`.
pub const CHARGE_BASE_BULLETS: usize = 5;
pub const CHARGE_PER_EXTRA_BULLET: f32 = 10.0;

// ── Bullets: (width, height, speed) ───────────────────────────────────────────

pub const DEFAULT_BULLET: (f32, f32, f32) = (10.0, 5.0, 10.0);
pub const LASER_BULLET: (f32, f32, f32) = (10.0, 6.0, 30.0);
pub const CHARGE_BULLET: (f32, f32, f32) = (30.0, 30.0, 8.0);
pub const NORMAL_BULLET: (f32, f32, f32) = (10.0, 5.0, 5.0);
pub const UFO_BULLET: (f32, f32, f32) = (8.0, 8.0, 10.0);
pub const BLOB_BULLET: (f32, f32, f32) = (15.0, 15.0, 8.0);

// ── World ─────────────────────────────────────────────────────────────────────

pub const SCROLL_SPEED: f32 = 2.0;
/// Per-frame scroll decay during the game-over sequence.
pub const SCROLL_DECAY: f32 = 0.01;

// ── Spawner ───────────────────────────────────────────────────────────────────

pub const ENEMY_INTERVAL_MS: f64 = 2000.0;
pub const POWER_UP_INTERVAL_MS: f64 = 2000.0;
pub const OBSTACLE_INTERVAL_MS: f64 = 1500.0;
pub const MOVING_ENEMY_CHANCE: f32 = 0.5;
pub const UFO_SPAWN_CHANCE: f32 = 0.1;
pub const BLOB_SPAWN_CHANCE: f32 = 0.05;
pub const POWER_UP_DROP_CHANCE: f32 = 0.6;
/// Shield, fast laser, charge gun.
pub const POWER_UP_WEIGHTS: [f32; 3] = [0.3, 0.3, 0.4];
pub const POWER_UP_SIZE: f32 = 30.0;

// ── Obstacles ─────────────────────────────────────────────────────────────────

pub const OBSTACLE_GAP: f32 = 250.0;
pub const OBSTACLE_MIN_HEIGHT: f32 = 50.0;
pub const OBSTACLE_WIDTH: f32 = 50.0;
pub const WINDOW_ROWS: u8 = 20;
pub const WINDOW_COLS: u8 = 3;
pub const WINDOW_PRESENT_CHANCE: f32 = 0.7;
pub const WINDOW_LIT_CHANCE: f32 = 0.3;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 40.0;
pub const BASIC_HEALTH: i32 = 1;
pub const UFO_HEALTH: i32 = 5;
pub const BLOB_HEALTH: i32 = 8;
pub const BASIC_SCORE: u32 = 10;
pub const UFO_SCORE: u32 = 50;
pub const BLOB_SCORE: u32 = 75;
pub const OBSTACLE_SCORE: u32 = 1;

pub const MOVING_ENEMY_SPEED: f32 = 3.0;
pub const ENEMY_SPEED: f32 = 2.0;
pub const ENEMY_MOVE_INTERVAL_MS: f64 = 500.0;
pub const ENEMY_SHOOT_COOLDOWN_MS: f64 = 2000.0;
pub const UFO_SHOOT_COOLDOWN_MS: f64 = 1000.0;
pub const BLOB_SHOOT_COOLDOWN_MS: f64 = 1500.0;

// ── Blob ──────────────────────────────────────────────────────────────────────

/// Fraction of the screen width the blob patrols while on the right.
pub const BLOB_RIGHT_AREA: f32 = 0.3;
pub const BLOB_RIGHT_SIDE_MS: f64 = 5000.0;
pub const BLOB_LEFT_SIDE_MS: f64 = 3000.0;
pub const BLOB_RETURN_SPEED: f32 = 8.0;
pub const BLOB_CHASE_FACTOR: f32 = 1.5;
pub const BLOB_PURSUIT_WEIGHT: f32 = 0.7;
pub const BLOB_BURST_DIRECTIONS: usize = 8;

pub const TENTACLE_COUNT: usize = 8;
pub const TENTACLE_BASE_LENGTH: f32 = 120.0;
pub const TENTACLE_WIDTH: f32 = 5.0;
pub const TENTACLE_WIGGLE: f32 = 15.0;
pub const TENTACLE_ANGLE_STEP: f32 = 0.001;
pub const TENTACLE_PHASE_STEP: f32 = 0.005;
pub const TENTACLE_WIGGLE_STEP: f32 = 0.01;
/// Points sampled along each tentacle curve for hit tests.
pub const TENTACLE_SAMPLES: usize = 8;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const EXPLOSION_PARTICLES: usize = 30;
pub const SMALL_EXPLOSION_PARTICLES: usize = 12;
pub const EXPLOSION_DURATION_MS: f64 = 1000.0;
pub const PARTICLE_GRAVITY: f32 = 0.1;

/// (count, brightness, size) per parallax layer, far to close.
pub const STAR_LAYERS: [(usize, f32, f32); 3] = [(150, 0.2, 1.0), (80, 0.4, 2.0), (20, 0.8, 3.0)];
