//! Bullet flight and hits, power-up drift and pickup.

use rand::Rng;

use crate::constants::MAX_SHIELDS;
use crate::entities::{Bullet, BulletMotion, PowerUpKind, Weapon, WeaponKind, World};
use crate::events::SoundCue;

use super::{collision, player};

pub fn advance(bullet: &mut Bullet) {
    match bullet.motion {
        BulletMotion::Axis { speed } => bullet.x += speed,
        BulletMotion::Vector { dx, dy } => {
            bullet.x += dx;
            bullet.y += dy;
        }
    }
}

/// Player bullets leave once their origin crosses any edge.
fn player_bullet_on_screen(bullet: &Bullet, width: f32, height: f32) -> bool {
    !(bullet.x > width || bullet.x < 0.0 || bullet.y > height || bullet.y < 0.0)
}

/// Enemy bullets leave once fully past any edge.
fn enemy_bullet_on_screen(bullet: &Bullet, width: f32, height: f32) -> bool {
    !(bullet.x + bullet.width < 0.0
        || bullet.x > width
        || bullet.y + bullet.height < 0.0
        || bullet.y > height)
}

/// Move player bullets and test each against every enemy; the first enemy hit
/// takes one damage and consumes the bullet.
pub fn update_player_bullets(world: &mut World, rng: &mut impl Rng) {
    let (width, height) = (world.config.screen_width, world.config.screen_height);
    let mut bullets = std::mem::take(&mut world.player_bullets);

    bullets.retain_mut(|bullet| {
        advance(bullet);
        let rect = bullet.rect();
        if let Some(index) = world.enemies.iter().rposition(|e| rect.overlaps(&e.rect())) {
            collision::damage_enemy(world, index, rng);
            return false;
        }
        player_bullet_on_screen(bullet, width, height)
    });

    bullets.append(&mut world.player_bullets);
    world.player_bullets = bullets;
}

/// Move enemy bullets; any that overlap the player hit it and are consumed.
pub fn update_enemy_bullets(world: &mut World, rng: &mut impl Rng) {
    let (width, height) = (world.config.screen_width, world.config.screen_height);
    let mut bullets = std::mem::take(&mut world.enemy_bullets);

    bullets.retain_mut(|bullet| {
        advance(bullet);
        if bullet.rect().overlaps(&world.player.rect()) {
            collision::handle_hit(world, rng);
            return false;
        }
        enemy_bullet_on_screen(bullet, width, height)
    });

    bullets.append(&mut world.enemy_bullets);
    world.enemy_bullets = bullets;
}

/// Drift power-ups with the scroll and apply any the player touches.
pub fn update_power_ups(world: &mut World, delta_ms: f64) {
    let mut power_ups = std::mem::take(&mut world.power_ups);

    power_ups.retain_mut(|power_up| {
        power_up.x -= world.scroll_speed;
        power_up.pulse_timer += delta_ms;
        if power_up.rect().overlaps(&world.player.rect()) {
            apply_power_up(world, power_up.kind);
            return false;
        }
        power_up.x + power_up.size >= 0.0
    });

    power_ups.append(&mut world.power_ups);
    world.power_ups = power_ups;
}

/// Shield: always grants the invulnerability window, adds a shield only below
/// the cap. Fast laser: tops up ammo if already equipped. Charge gun: fresh
/// gun with full ammo.
pub fn apply_power_up(world: &mut World, kind: PowerUpKind) {
    let pickup_ammo = world.config.weapon_pickup_ammo;
    match kind {
        PowerUpKind::Shield => {
            collision::grant_invulnerability(world);
            if world.shields < MAX_SHIELDS {
                world.shields += 1;
            }
            world.emit(SoundCue::ShieldRecharge);
        }
        PowerUpKind::FastLaser => {
            let weapon = &mut world.player.weapon;
            if weapon.kind == WeaponKind::FastLaser {
                weapon.ammo += pickup_ammo;
            } else {
                player::equip(&mut world.player, Weapon::fast_laser(pickup_ammo));
            }
            world.emit(SoundCue::PowerUp);
        }
        PowerUpKind::ChargeGun => {
            player::equip(&mut world.player, Weapon::charge_gun(pickup_ammo));
            world.emit(SoundCue::PowerUp);
        }
    }
}
