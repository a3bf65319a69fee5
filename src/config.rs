//! Runtime tuning loaded from a TOML file.
//!
//! [`GameConfig`] mirrors the gameplay constants in [`crate::constants`].
//! Missing keys fall back to those defaults, so a file only needs the values
//! it wants to change:
//!
//! ```toml
//! scroll_speed = 3.0
//! ufo_spawn_chance = 0.25
//! tentacle_hits = true
//! ```
//!
//! `GameConfig::default()` reproduces the classic game exactly.

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{ensure_positive, ensure_probability, GameError, GameResult};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "frog_blaster.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub gravity: f32,
    pub jump_force: f32,
    pub invulnerability_ms: f64,
    pub weapon_pickup_ammo: u32,

    // ── World ────────────────────────────────────────────────────────────────
    pub scroll_speed: f32,

    // ── Spawner ──────────────────────────────────────────────────────────────
    pub enemy_interval_ms: f64,
    pub power_up_interval_ms: f64,
    pub obstacle_interval_ms: f64,
    pub moving_enemy_chance: f32,
    pub ufo_spawn_chance: f32,
    pub blob_spawn_chance: f32,
    pub power_up_drop_chance: f32,
    /// Shield, fast laser, charge gun.
    pub power_up_weights: [f32; 3],

    // ── Obstacles ────────────────────────────────────────────────────────────
    pub obstacle_gap: f32,
    pub obstacle_min_height: f32,

    // ── Enemy fire ───────────────────────────────────────────────────────────
    pub enemy_shoot_cooldown_ms: f64,
    pub ufo_shoot_cooldown_ms: f64,
    pub blob_shoot_cooldown_ms: f64,

    // ── Blob ─────────────────────────────────────────────────────────────────
    pub blob_right_side_ms: f64,
    pub blob_left_side_ms: f64,
    /// Also count tentacle curves, not just the body, as contact.
    pub tentacle_hits: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            invulnerability_ms: INVULNERABILITY_MS,
            weapon_pickup_ammo: WEAPON_PICKUP_AMMO,
            scroll_speed: SCROLL_SPEED,
            enemy_interval_ms: ENEMY_INTERVAL_MS,
            power_up_interval_ms: POWER_UP_INTERVAL_MS,
            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            moving_enemy_chance: MOVING_ENEMY_CHANCE,
            ufo_spawn_chance: UFO_SPAWN_CHANCE,
            blob_spawn_chance: BLOB_SPAWN_CHANCE,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,
            power_up_weights: POWER_UP_WEIGHTS,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            enemy_shoot_cooldown_ms: ENEMY_SHOOT_COOLDOWN_MS,
            ufo_shoot_cooldown_ms: UFO_SHOOT_COOLDOWN_MS,
            blob_shoot_cooldown_ms: BLOB_SHOOT_COOLDOWN_MS,
            blob_right_side_ms: BLOB_RIGHT_SIDE_MS,
            blob_left_side_ms: BLOB_LEFT_SIDE_MS,
            tentacle_hits: false,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(source: &str, origin: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(source).map_err(|e| GameError::ConfigParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    ///
    /// A file that exists but fails to parse or validate is an error; silently
    /// playing with half a config is worse than refusing to start.
    pub fn load_or_default(path: &Path) -> GameResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents, &path.display().to_string())?;
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no {} found; using compiled defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(GameError::Io(e)),
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        ensure_positive("screen_width", self.screen_width as f64)?;
        ensure_positive("screen_height", self.screen_height as f64)?;
        ensure_positive("invulnerability_ms", self.invulnerability_ms)?;
        ensure_positive("enemy_interval_ms", self.enemy_interval_ms)?;
        ensure_positive("power_up_interval_ms", self.power_up_interval_ms)?;
        ensure_positive("obstacle_interval_ms", self.obstacle_interval_ms)?;
        ensure_positive("enemy_shoot_cooldown_ms", self.enemy_shoot_cooldown_ms)?;
        ensure_positive("ufo_shoot_cooldown_ms", self.ufo_shoot_cooldown_ms)?;
        ensure_positive("blob_shoot_cooldown_ms", self.blob_shoot_cooldown_ms)?;
        ensure_positive("blob_right_side_ms", self.blob_right_side_ms)?;
        ensure_positive("blob_left_side_ms", self.blob_left_side_ms)?;
        ensure_positive("obstacle_gap", self.obstacle_gap as f64)?;
        ensure_positive("obstacle_min_height", self.obstacle_min_height as f64)?;
        ensure_positive("weapon_pickup_ammo", self.weapon_pickup_ammo as f64)?;

        ensure_probability("moving_enemy_chance", self.moving_enemy_chance as f64)?;
        ensure_probability("ufo_spawn_chance", self.ufo_spawn_chance as f64)?;
        ensure_probability("blob_spawn_chance", self.blob_spawn_chance as f64)?;
        ensure_probability("power_up_drop_chance", self.power_up_drop_chance as f64)?;

        if self.scroll_speed < 0.0 || !self.scroll_speed.is_finite() {
            return Err(GameError::InvalidConfig {
                field: "scroll_speed",
                value: self.scroll_speed as f64,
                expected: "a finite value >= 0",
            });
        }

        // Both pillars need their minimum height plus the gap between them.
        let needed = self.obstacle_gap + 2.0 * self.obstacle_min_height;
        if needed >= self.screen_height {
            return Err(GameError::InvalidConfig {
                field: "obstacle_gap",
                value: self.obstacle_gap as f64,
                expected: "gap + 2 * obstacle_min_height < screen_height",
            });
        }

        let total: f32 = self.power_up_weights.iter().sum();
        let bad_weight = self
            .power_up_weights
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0);
        if bad_weight || !total.is_finite() || total <= 0.0 {
            return Err(GameError::InvalidConfig {
                field: "power_up_weights",
                value: total as f64,
                expected: "finite non-negative weights with a positive sum",
            });
        }

        Ok(())
    }

    /// Largest top-pillar height that still leaves room for the gap and the
    /// bottom pillar.
    pub fn obstacle_max_height(&self) -> f32 {
        self.screen_height - self.obstacle_gap - self.obstacle_min_height
    }
}
