//! Cosmetic state: explosion particles and the parallax starfield.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{EXPLOSION_DURATION_MS, PARTICLE_GRAVITY, STAR_LAYERS};
use crate::entities::{ExplosionParticle, Palette, Star, World};

/// Burst of `count` particles spread evenly around `origin`, each at a random
/// speed.
pub fn create_explosion(
    particles: &mut Vec<ExplosionParticle>,
    origin: (f32, f32),
    palette: Palette,
    count: usize,
    rng: &mut impl Rng,
) {
    particles.reserve(count);
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let speed = 3.0 + rng.gen::<f32>() * 3.0;
        particles.push(ExplosionParticle {
            x: origin.0,
            y: origin.1,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            size: 4.0 + rng.gen::<f32>() * 4.0,
            alpha: 1.0,
            age_ms: 0.0,
            palette,
            tint: rng.gen::<f32>(),
        });
    }
}

/// Particles fall under a light gravity and fade out linearly over their
/// lifetime; fully faded ones are dropped.
pub fn update_particles(world: &mut World, delta_ms: f64) {
    for p in &mut world.particles {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += PARTICLE_GRAVITY;
        p.age_ms += delta_ms;
        p.alpha = (1.0 - p.age_ms / EXPLOSION_DURATION_MS) as f32;
    }
    world.particles.retain(|p| p.alpha > 0.0);
}

pub fn create_stars(config: &GameConfig, rng: &mut impl Rng) -> Vec<Star> {
    let mut stars = Vec::new();
    for &(count, brightness, size) in STAR_LAYERS.iter() {
        for _ in 0..count {
            stars.push(Star {
                x: rng.gen::<f32>() * config.screen_width,
                y: rng.gen::<f32>() * config.screen_height,
                size,
                brightness,
            });
        }
    }
    stars
}

/// Brighter stars are nearer and scroll faster. A star leaving on the left
/// re-enters on the right at a fresh height.
pub fn update_stars(world: &mut World, rng: &mut impl Rng) {
    let scroll = world.scroll_speed;
    let (width, height) = (world.config.screen_width, world.config.screen_height);
    for star in &mut world.stars {
        star.x -= scroll * star.brightness;
        if star.x < -star.size {
            star.x = width + star.size;
            star.y = rng.gen::<f32>() * height;
        }
    }
}
