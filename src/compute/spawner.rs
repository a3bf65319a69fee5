//! Interval timers that bring new enemies, power-ups and obstacles on screen.

use rand::Rng;

use crate::constants::POWER_UP_SIZE;
use crate::entities::{Archetype, PowerUp, PowerUpKind, World};
use crate::events::SoundCue;

use super::{enemies, obstacles};

/// Accumulate `delta_ms` on every timer; a timer that passes its interval
/// resets to zero and spawns.
pub fn update(world: &mut World, delta_ms: f64, rng: &mut impl Rng) {
    world.spawn_timers.obstacle += delta_ms;
    if world.spawn_timers.obstacle > world.config.obstacle_interval_ms {
        world.spawn_timers.obstacle = 0.0;
        spawn_obstacle(world, rng);
    }

    world.spawn_timers.enemy += delta_ms;
    if world.spawn_timers.enemy > world.config.enemy_interval_ms {
        world.spawn_timers.enemy = 0.0;
        spawn_enemy(world, rng);
    }

    world.spawn_timers.power_up += delta_ms;
    if world.spawn_timers.power_up > world.config.power_up_interval_ms {
        world.spawn_timers.power_up = 0.0;
        if rng.gen::<f32>() < world.config.power_up_drop_chance {
            spawn_power_up(world, rng);
        }
    }
}

pub fn spawn_obstacle(world: &mut World, rng: &mut impl Rng) {
    let obstacle = obstacles::create_obstacle(&world.config, rng);
    world.obstacles.push(obstacle);
}

/// Always spawns exactly one enemy. The presence flags are raised here so a
/// second UFO or Blob can never be drawn while one is alive.
pub fn spawn_enemy(world: &mut World, rng: &mut impl Rng) {
    let enemy = enemies::create_enemy(&world.config, world.has_ufo, world.has_blob, rng);
    match enemy.archetype() {
        Archetype::Ufo => {
            world.has_ufo = true;
            world.emit(SoundCue::UfoPresence);
            log::debug!("ufo spawned at y={:.0}", enemy.y);
        }
        Archetype::Blob => {
            world.has_blob = true;
            world.emit(SoundCue::BlobPresence);
            log::debug!("blob spawned at y={:.0}", enemy.y);
        }
        Archetype::Basic => {}
    }
    world.enemies.push(enemy);
}

pub fn spawn_power_up(world: &mut World, rng: &mut impl Rng) {
    let kind = pick_power_up_kind(&world.config.power_up_weights, rng.gen::<f32>());
    let y = rng.gen::<f32>() * (world.config.screen_height - POWER_UP_SIZE);
    world.power_ups.push(PowerUp {
        x: world.config.screen_width,
        y,
        size: POWER_UP_SIZE,
        kind,
        pulse_timer: 0.0,
    });
}

/// Cumulative-weight selection: `roll` in `[0, 1)` is scaled by the weight
/// total and walked through the running sum.
pub fn pick_power_up_kind(weights: &[f32; 3], roll: f32) -> PowerUpKind {
    let total: f32 = weights.iter().sum();
    let target = roll * total;
    let mut cumulative = 0.0;
    for (kind, weight) in PowerUpKind::ALL.iter().zip(weights) {
        cumulative += weight;
        if target < cumulative {
            return *kind;
        }
    }
    // Rounding can leave `target` a hair above the final sum.
    PowerUpKind::ALL[PowerUpKind::ALL.len() - 1]
}
