//! All game entity types: pure data, no simulation rules.
//!
//! Behavior lives in [`crate::compute`]; this module only holds records, their
//! geometry helpers and read-only views of the world.

use crate::config::GameConfig;
use crate::constants::{
    CHARGE_GUN_COOLDOWN_MS, DEFAULT_COOLDOWN_MS, FAST_LASER_COOLDOWN_MS, MAX_SHIELDS,
};
use crate::events::SoundCue;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Default,
    FastLaser,
    ChargeGun,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub ammo: u32,
    pub cooldown_ms: f64,
}

impl Weapon {
    pub fn default_gun() -> Self {
        Weapon {
            kind: WeaponKind::Default,
            ammo: 0,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }

    pub fn fast_laser(ammo: u32) -> Self {
        Weapon {
            kind: WeaponKind::FastLaser,
            ammo,
            cooldown_ms: FAST_LASER_COOLDOWN_MS,
        }
    }

    pub fn charge_gun(ammo: u32) -> Self {
        Weapon {
            kind: WeaponKind::ChargeGun,
            ammo,
            cooldown_ms: CHARGE_GUN_COOLDOWN_MS,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity in pixels per frame; negative is up.
    pub velocity: f32,
    pub is_shooting: bool,
    pub is_charging: bool,
    /// 0..=MAX_CHARGE while the charge gun is held.
    pub charge_level: f32,
    /// `None` until the first shot, so the very first shot is never gated.
    pub last_shot: Option<f64>,
    pub last_charge_sound: Option<f64>,
    pub weapon: Weapon,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Default,
    Laser,
    Charge,
    /// Basic enemy shot.
    Normal,
    Ufo,
    Blob,
}

impl BulletKind {
    pub fn from_player(self) -> bool {
        matches!(self, BulletKind::Default | BulletKind::Laser | BulletKind::Charge)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletMotion {
    /// Horizontal travel; positive is rightward.
    Axis { speed: f32 },
    /// Per-frame displacement, already scaled by speed.
    Vector { dx: f32, dy: f32 },
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub motion: BulletMotion,
    pub kind: BulletKind,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct UfoState {
    pub move_timer: f64,
    pub direction: (f32, f32),
}

/// Where the blob is in its right → left → return cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlobPhase {
    /// Patrolling the right strip; `timer` counts dwell time.
    OnRight { timer: f64 },
    /// Hunting the player; `timer` counts time since leaving the right.
    MovingLeft { timer: f64 },
    /// Dashing back to the right edge.
    Returning,
}

/// Tentacle animation phases, advanced by a fixed step every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TentacleAnim {
    pub angle: f32,
    pub phase: f32,
    pub wiggle: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlobState {
    pub move_timer: f64,
    pub direction: (f32, f32),
    pub phase: BlobPhase,
    pub tentacles: TentacleAnim,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    /// Flies left at its own speed.
    Moving,
    /// Drifts left with the scrolling world.
    Drifting,
    Ufo(UfoState),
    Blob(BlobState),
}

/// Behavior category, without the per-archetype state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Archetype {
    Basic,
    Ufo,
    Blob,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }

    pub fn archetype(&self) -> Archetype {
        match self.kind {
            EnemyKind::Moving | EnemyKind::Drifting => Archetype::Basic,
            EnemyKind::Ufo(_) => Archetype::Ufo,
            EnemyKind::Blob(_) => Archetype::Blob,
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    FastLaser,
    ChargeGun,
}

impl PowerUpKind {
    /// Same order as `GameConfig::power_up_weights`.
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::FastLaser,
        PowerUpKind::ChargeGun,
    ];
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub kind: PowerUpKind,
    /// Drives the cosmetic pulse; milliseconds since spawn.
    pub pulse_timer: f64,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkyscraperWindow {
    pub row: u8,
    pub col: u8,
    pub lit: bool,
}

/// A pair of skyscraper pillars with a flyable gap between them.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the top pillar.
    pub top_height: f32,
    /// Top edge of the bottom pillar.
    pub bottom_y: f32,
    /// Set once the player has cleared it and the point was awarded.
    pub passed: bool,
    pub shade: u8,
    pub windows: Vec<SkyscraperWindow>,
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// UFO wreckage.
    Grey,
    /// Blob and player bursts.
    Purple,
    /// Basic enemies.
    Ember,
}

#[derive(Clone, Debug)]
pub struct ExplosionParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub alpha: f32,
    pub age_ms: f64,
    pub palette: Palette,
    /// 0..1 variation within the palette (lightness or hue offset).
    pub tint: f32,
}

/// Background parallax star; brightness doubles as the depth factor.
#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub brightness: f32,
}

// ── Master world state ────────────────────────────────────────────────────────

/// Hit-resolution state of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerStatus {
    Vulnerable,
    /// Hits are ignored until `since + invulnerability_ms`.
    Invulnerable { since: f64 },
    /// Terminal until restart; only particles and scroll decay keep running.
    GameOver,
}

/// Interval accumulators, in milliseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnTimers {
    pub enemy: f64,
    pub power_up: f64,
    pub obstacle: f64,
}

/// Last volley time of each shared enemy fire clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FireClocks {
    pub basic: f64,
    pub ufo: f64,
    pub blob: f64,
}

/// The entire simulation state. Owned by the driver and passed by `&mut` to
/// every stage of the frame.
#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    /// Monotonic clock in ms, advanced by each tick's delta.
    pub now: f64,
    pub score: u32,
    pub scroll_speed: f32,
    pub status: PlayerStatus,
    pub shields: u8,
    pub has_ufo: bool,
    pub has_blob: bool,
    pub spawn_timers: SpawnTimers,
    pub fire_clocks: FireClocks,
    pub player: Player,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<ExplosionParticle>,
    pub stars: Vec<Star>,
    /// Sound cues queued since the last drain.
    pub cues: Vec<SoundCue>,
}

/// Read-only view handed to a renderer each frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub width: f32,
    pub height: f32,
    pub score: u32,
    pub shields: u8,
    pub max_shields: u8,
    pub invulnerable: bool,
    pub game_over: bool,
    pub player: &'a Player,
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub power_ups: &'a [PowerUp],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [ExplosionParticle],
    pub stars: &'a [Star],
}

/// What an external UI needs once the run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub game_over: bool,
    pub final_score: u32,
}

impl World {
    pub fn is_game_over(&self) -> bool {
        self.status == PlayerStatus::GameOver
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.status, PlayerStatus::Invulnerable { .. })
    }

    pub fn emit(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Hand the queued cues to the audio sink, leaving the queue empty.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            width: self.config.screen_width,
            height: self.config.screen_height,
            score: self.score,
            shields: self.shields,
            max_shields: MAX_SHIELDS,
            invulnerable: self.is_invulnerable(),
            game_over: self.is_game_over(),
            player: &self.player,
            player_bullets: &self.player_bullets,
            enemy_bullets: &self.enemy_bullets,
            enemies: &self.enemies,
            power_ups: &self.power_ups,
            obstacles: &self.obstacles,
            particles: &self.particles,
            stars: &self.stars,
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            game_over: self.is_game_over(),
            final_score: self.score,
        }
    }
}
