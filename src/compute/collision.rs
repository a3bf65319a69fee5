//! Hit resolution: the player's Vulnerable → Invulnerable → GameOver machine,
//! enemy damage and kills, pillar and ceiling contact.

use rand::Rng;

use crate::constants::{
    BASIC_SCORE, BLOB_SCORE, EXPLOSION_PARTICLES, SMALL_EXPLOSION_PARTICLES, UFO_SCORE,
};
use crate::entities::{Archetype, Enemy, Palette, PlayerStatus, World};
use crate::events::SoundCue;

use super::effects;

/// What a hit did to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already invulnerable or already dead; nothing changed.
    Ignored,
    /// A shield soaked it and the invulnerability window started.
    Absorbed,
    /// No shields left; the run is over.
    Fatal,
}

/// Apply one hit to the player. The hit sound plays in every state.
pub fn handle_hit(world: &mut World, rng: &mut impl Rng) -> HitOutcome {
    world.emit(SoundCue::Hit);

    match world.status {
        PlayerStatus::GameOver | PlayerStatus::Invulnerable { .. } => HitOutcome::Ignored,
        PlayerStatus::Vulnerable if world.shields > 0 => {
            world.shields -= 1;
            world.status = PlayerStatus::Invulnerable { since: world.now };
            log::debug!("shield absorbed hit, {} left", world.shields);
            HitOutcome::Absorbed
        }
        PlayerStatus::Vulnerable => {
            enter_game_over(world, rng);
            HitOutcome::Fatal
        }
    }
}

fn enter_game_over(world: &mut World, rng: &mut impl Rng) {
    world.status = PlayerStatus::GameOver;
    world.player.is_shooting = false;
    world.player.is_charging = false;

    let (cx, cy) = world.player.center();
    effects::create_explosion(
        &mut world.particles,
        (cx, cy),
        Palette::Purple,
        EXPLOSION_PARTICLES,
        rng,
    );
    world.emit(SoundCue::Explosion);
    world.emit(SoundCue::GameOver);
    log::info!("game over, final score {}", world.score);
}

/// Drop back to Vulnerable once the window has fully elapsed.
pub fn expire_invulnerability(world: &mut World) {
    if let PlayerStatus::Invulnerable { since } = world.status {
        if world.now - since >= world.config.invulnerability_ms {
            world.status = PlayerStatus::Vulnerable;
        }
    }
}

/// Start (or restart) the invulnerability window without touching shields.
/// A dead player stays dead.
pub fn grant_invulnerability(world: &mut World) {
    if !world.is_game_over() {
        world.status = PlayerStatus::Invulnerable { since: world.now };
    }
}

/// Pillars and the ceiling. Only tested while vulnerable, and at most one hit
/// per frame.
pub fn check_obstacles(world: &mut World, rng: &mut impl Rng) {
    if world.status != PlayerStatus::Vulnerable {
        return;
    }
    let p = world.player.rect();
    let pillar_hit = world.obstacles.iter().any(|o| {
        let in_column = p.x + p.width > o.x && p.x < o.x + o.width;
        in_column && (p.y < o.top_height || p.y + p.height > o.bottom_y)
    });

    if pillar_hit || p.y < 0.0 {
        handle_hit(world, rng);
    }
}

// ── Enemy damage ─────────────────────────────────────────────────────────────

pub fn score_for(archetype: Archetype) -> u32 {
    match archetype {
        Archetype::Basic => BASIC_SCORE,
        Archetype::Ufo => UFO_SCORE,
        Archetype::Blob => BLOB_SCORE,
    }
}

/// One point of damage to `world.enemies[index]`; kills and removes it at zero.
pub fn damage_enemy(world: &mut World, index: usize, rng: &mut impl Rng) {
    let enemy = &mut world.enemies[index];
    enemy.health -= 1;
    if enemy.health > 0 {
        match enemy.archetype() {
            Archetype::Ufo => world.emit(SoundCue::UfoHit),
            Archetype::Blob => world.emit(SoundCue::Hit),
            Archetype::Basic => {}
        }
        return;
    }

    let enemy = world.enemies.remove(index);
    kill_enemy(world, &enemy, rng);
}

/// Score, presence flags, sound and explosion for a destroyed enemy.
pub fn kill_enemy(world: &mut World, enemy: &Enemy, rng: &mut impl Rng) {
    let archetype = enemy.archetype();
    let (palette, particles) = match archetype {
        Archetype::Ufo => {
            world.has_ufo = false;
            world.emit(SoundCue::UfoDeath);
            (Palette::Grey, EXPLOSION_PARTICLES)
        }
        Archetype::Blob => {
            world.has_blob = false;
            world.emit(SoundCue::EnemyDeath);
            world.emit(SoundCue::Explosion);
            (Palette::Purple, EXPLOSION_PARTICLES)
        }
        Archetype::Basic => {
            world.emit(SoundCue::EnemyDeath);
            (Palette::Ember, SMALL_EXPLOSION_PARTICLES)
        }
    };

    world.score += score_for(archetype);
    effects::create_explosion(&mut world.particles, enemy.center(), palette, particles, rng);
    log::debug!("{:?} destroyed, score {}", archetype, world.score);
}
