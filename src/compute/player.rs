//! Player physics, shooting and charging.

use std::f32::consts::TAU;

use crate::constants::{
    CHARGE_BASE_BULLETS, CHARGE_BULLET, CHARGE_PER_EXTRA_BULLET, CHARGE_RATE,
    CHARGE_SOUND_INTERVAL_MS, DEFAULT_BULLET, LASER_BULLET, MAX_CHARGE,
};
use crate::entities::{Bullet, BulletKind, BulletMotion, Player, Weapon, WeaponKind, World};
use crate::events::SoundCue;

// ── Input ────────────────────────────────────────────────────────────────────

/// Set the vertical velocity to the jump impulse. Always overrides, so two
/// jumps in the same frame are the same as one.
pub fn jump(world: &mut World) {
    if world.is_game_over() {
        return;
    }
    world.player.velocity = world.config.jump_force;
}

pub fn fire_start(world: &mut World) {
    if world.is_game_over() {
        return;
    }
    let player = &mut world.player;
    if player.weapon.kind == WeaponKind::ChargeGun {
        player.is_charging = true;
    } else {
        player.is_shooting = true;
    }
}

/// Release the trigger. Fires the charge burst if one was building; a release
/// without a matching press only clears flags.
pub fn fire_end(world: &mut World) {
    let releasing =
        world.player.weapon.kind == WeaponKind::ChargeGun && world.player.is_charging;
    if releasing && !world.is_game_over() {
        release_charge_shot(world);
    }
    world.player.is_shooting = false;
    world.player.is_charging = false;
}

// ── Per-frame ────────────────────────────────────────────────────────────────

pub fn update(world: &mut World) {
    if world.player.is_shooting {
        try_shoot(world);
    }
    if world.player.is_charging {
        accumulate_charge(world);
    }
    apply_gravity(world);
}

/// Fixed increment per frame, not scaled by delta; the floor stops the fall
/// dead with no bounce.
pub fn apply_gravity(world: &mut World) {
    let floor = world.config.screen_height;
    let player = &mut world.player;
    player.velocity += world.config.gravity;
    player.y += player.velocity;
    if player.y + player.height > floor {
        player.y = floor - player.height;
        player.velocity = 0.0;
    }
}

fn cooled_down(player: &Player, now: f64) -> bool {
    match player.last_shot {
        Some(last) => now - last >= player.weapon.cooldown_ms,
        None => true,
    }
}

/// One shot attempt with the held trigger.
///
/// The fast laser spends one ammo per shot; an attempt with an empty laser
/// reverts to the default gun instead of firing. The charge gun never fires
/// on hold.
pub fn try_shoot(world: &mut World) {
    let now = world.now;
    if !cooled_down(&world.player, now) {
        return;
    }

    let player = &mut world.player;
    let muzzle_x = player.x + player.width;
    let muzzle_y = player.y + player.height / 2.0;

    let (shape, kind, cue) = match player.weapon.kind {
        WeaponKind::Default => (DEFAULT_BULLET, BulletKind::Default, SoundCue::Shoot),
        WeaponKind::FastLaser if player.weapon.ammo > 0 => {
            player.weapon.ammo -= 1;
            (LASER_BULLET, BulletKind::Laser, SoundCue::Laser)
        }
        WeaponKind::FastLaser => {
            log::debug!("fast laser empty, reverting to default gun");
            equip(player, Weapon::default_gun());
            return;
        }
        WeaponKind::ChargeGun => return,
    };

    let (width, height, speed) = shape;
    player.last_shot = Some(now);
    world.player_bullets.push(Bullet {
        x: muzzle_x,
        y: muzzle_y,
        width,
        height,
        motion: BulletMotion::Axis { speed },
        kind,
    });
    world.emit(cue);
}

fn accumulate_charge(world: &mut World) {
    if world.player.weapon.kind != WeaponKind::ChargeGun {
        return;
    }
    let now = world.now;
    let player = &mut world.player;
    player.charge_level = (player.charge_level + CHARGE_RATE).min(MAX_CHARGE);

    let due = match player.last_charge_sound {
        Some(last) => now - last >= CHARGE_SOUND_INTERVAL_MS,
        None => true,
    };
    if due {
        player.last_charge_sound = Some(now);
        world.emit(SoundCue::Charge);
    }
}

/// Bullets in a charge burst: 5 at no charge, 15 at full charge.
pub fn charge_burst_size(charge_level: f32) -> usize {
    let charge = charge_level.clamp(0.0, MAX_CHARGE);
    CHARGE_BASE_BULLETS + (charge / CHARGE_PER_EXTRA_BULLET).floor() as usize
}

/// Fire the radial burst. Costs one ammo per release, not per bullet.
pub fn release_charge_shot(world: &mut World) {
    let player = &mut world.player;
    if player.weapon.kind != WeaponKind::ChargeGun {
        return;
    }
    if player.weapon.ammo == 0 {
        equip(player, Weapon::default_gun());
        return;
    }

    let count = charge_burst_size(player.charge_level);
    let (cx, cy) = player.center();
    let (width, height, speed) = CHARGE_BULLET;
    let step = TAU / count as f32;

    world.player_bullets.extend((0..count).map(|i| {
        let angle = step * i as f32;
        Bullet {
            x: cx,
            y: cy,
            width,
            height,
            motion: BulletMotion::Vector {
                dx: angle.cos() * speed,
                dy: angle.sin() * speed,
            },
            kind: BulletKind::Charge,
        }
    }));

    player.weapon.ammo -= 1;
    player.charge_level = 0.0;
    if player.weapon.ammo == 0 {
        equip(player, Weapon::default_gun());
    }
    world.emit(SoundCue::Laser);
}

/// Swap weapons, carrying a held trigger over to the new weapon's hold mode.
pub fn equip(player: &mut Player, weapon: Weapon) {
    let held = player.is_shooting || player.is_charging;
    player.weapon = weapon;
    if player.weapon.kind != WeaponKind::ChargeGun {
        player.charge_level = 0.0;
    }
    if held {
        let charging = player.weapon.kind == WeaponKind::ChargeGun;
        player.is_charging = charging;
        player.is_shooting = !charging;
    }
}
