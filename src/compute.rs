//! Game-logic functions.
//!
//! Every public function takes the world by exclusive reference and, where it
//! needs randomness, an injected RNG handle. Callers control determinism by
//! choosing the RNG (tests use a seeded or mocked one).
//!
//! One frame runs the stages in a fixed order so that later stages always see
//! the mutations of earlier ones:
//!
//! clock → invulnerability → stars → player → spawner → obstacles → enemies →
//! power-ups → bullets → obstacle/ceiling hits → particles

pub mod collision;
pub mod effects;
pub mod enemies;
pub mod obstacles;
pub mod player;
pub mod projectiles;
pub mod spawner;

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{MAX_SHIELDS, PLAYER_SIZE, PLAYER_X, SCROLL_DECAY};
use crate::entities::{FireClocks, Player, PlayerStatus, SpawnTimers, Weapon, World};

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player(config: &GameConfig) -> Player {
    Player {
        x: PLAYER_X,
        y: config.screen_height / 2.0,
        width: PLAYER_SIZE,
        height: PLAYER_SIZE,
        velocity: 0.0,
        is_shooting: false,
        is_charging: false,
        charge_level: 0.0,
        last_shot: None,
        last_charge_sound: None,
        weapon: Weapon::default_gun(),
    }
}

/// Build the initial world for a validated config.
pub fn init_world(config: GameConfig, rng: &mut impl Rng) -> World {
    let stars = effects::create_stars(&config, rng);
    World {
        now: 0.0,
        score: 0,
        scroll_speed: config.scroll_speed,
        status: PlayerStatus::Vulnerable,
        shields: MAX_SHIELDS,
        has_ufo: false,
        has_blob: false,
        spawn_timers: SpawnTimers::default(),
        fire_clocks: FireClocks::default(),
        player: new_player(&config),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        obstacles: Vec::new(),
        particles: Vec::new(),
        stars,
        cues: Vec::new(),
        config,
    }
}

/// Throw the current run away and start over with the same config.
pub fn restart(world: &mut World, rng: &mut impl Rng) {
    log::info!("restarting run (previous score {})", world.score);
    let config = world.config.clone();
    *world = init_world(config, rng);
}

// ── Input events ─────────────────────────────────────────────────────────────

pub fn on_jump(world: &mut World) {
    player::jump(world);
}

pub fn on_fire_start(world: &mut World) {
    player::fire_start(world);
}

pub fn on_fire_end(world: &mut World) {
    player::fire_end(world);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `delta_ms` milliseconds.
///
/// Negative or non-finite deltas are treated as zero so the clock stays
/// monotonic.
pub fn tick(world: &mut World, delta_ms: f64, rng: &mut impl Rng) {
    let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    };
    world.now += delta_ms;

    if world.is_game_over() {
        effects::update_particles(world, delta_ms);
        world.scroll_speed = (world.scroll_speed - SCROLL_DECAY).max(0.0);
        return;
    }

    collision::expire_invulnerability(world);
    effects::update_stars(world, rng);
    player::update(world);
    spawner::update(world, delta_ms, rng);
    obstacles::update(world);
    enemies::update(world, delta_ms, rng);

    // A fatal hit freezes the rest of the gameplay stages for this frame.
    if !world.is_game_over() {
        projectiles::update_power_ups(world, delta_ms);
        projectiles::update_player_bullets(world, rng);
        projectiles::update_enemy_bullets(world, rng);
    }
    if !world.is_game_over() {
        collision::check_obstacles(world, rng);
    }

    effects::update_particles(world, delta_ms);
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

/// Unit vector along `(x, y)`, or `None` when the length is zero.
pub fn normalize(x: f32, y: f32) -> Option<(f32, f32)> {
    let len = (x * x + y * y).sqrt();
    if len.is_finite() && len > f32::EPSILON {
        Some((x / len, y / len))
    } else {
        None
    }
}

/// Uniform draw in `[-1, 1)`, one component of a random direction.
pub fn signed_unit(rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}
