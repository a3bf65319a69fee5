//! Enemy archetypes: creation, movement, fire patterns and body contact.
//!
//! * Basic enemies fly (`Moving`) or drift with the scroll (`Drifting`) to the
//!   left and share one volley clock.
//! * The UFO random-walks on screen and fires homing shots.
//! * The Blob cycles right strip → hunt the player → dash back right, and
//!   fires an eight-way burst.

use std::f32::consts::TAU;

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    BASIC_HEALTH, BLOB_BULLET, BLOB_BURST_DIRECTIONS, BLOB_CHASE_FACTOR, BLOB_HEALTH,
    BLOB_PURSUIT_WEIGHT, BLOB_RETURN_SPEED, BLOB_RIGHT_AREA, ENEMY_MOVE_INTERVAL_MS,
    ENEMY_SIZE, ENEMY_SPEED, MOVING_ENEMY_SPEED, NORMAL_BULLET, TENTACLE_ANGLE_STEP,
    TENTACLE_BASE_LENGTH, TENTACLE_COUNT, TENTACLE_PHASE_STEP, TENTACLE_SAMPLES,
    TENTACLE_WIDTH, TENTACLE_WIGGLE, TENTACLE_WIGGLE_STEP, UFO_BULLET, UFO_HEALTH,
};
use crate::entities::{
    Archetype, BlobPhase, BlobState, Bullet, BulletKind, BulletMotion, Enemy, EnemyKind,
    Player, Rect, UfoState, World,
};
use crate::events::SoundCue;

use super::{collision, normalize, signed_unit};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A new enemy just past the right edge.
///
/// Draw order: moving vs drifting, then UFO if none is alive, then Blob if
/// none is alive and this spawn did not already become a UFO.
pub fn create_enemy(
    config: &GameConfig,
    has_ufo: bool,
    has_blob: bool,
    rng: &mut impl Rng,
) -> Enemy {
    let is_moving = rng.gen::<f32>() < config.moving_enemy_chance;
    let is_ufo = !has_ufo && rng.gen::<f32>() < config.ufo_spawn_chance;
    let is_blob = !is_ufo && !has_blob && rng.gen::<f32>() < config.blob_spawn_chance;

    let y = rng.gen::<f32>() * (config.screen_height - ENEMY_SIZE);
    let direction = (signed_unit(rng), signed_unit(rng));

    let (kind, health) = if is_ufo {
        (
            EnemyKind::Ufo(UfoState {
                move_timer: 0.0,
                direction,
            }),
            UFO_HEALTH,
        )
    } else if is_blob {
        (
            EnemyKind::Blob(BlobState {
                move_timer: 0.0,
                direction,
                phase: BlobPhase::OnRight { timer: 0.0 },
                tentacles: Default::default(),
            }),
            BLOB_HEALTH,
        )
    } else if is_moving {
        (EnemyKind::Moving, BASIC_HEALTH)
    } else {
        (EnemyKind::Drifting, BASIC_HEALTH)
    };

    Enemy {
        x: config.screen_width,
        y,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        health,
        kind,
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Move, fire and resolve body contact for every enemy, then run the shared
/// basic-enemy volley.
pub fn update(world: &mut World, delta_ms: f64, rng: &mut impl Rng) {
    let mut enemies = std::mem::take(&mut world.enemies);
    enemies.retain_mut(|enemy| step_enemy(world, enemy, delta_ms, rng));
    // Nothing spawns enemies mid-pass, but keep anything that did.
    enemies.append(&mut world.enemies);
    world.enemies = enemies;

    basic_volley(world);
}

/// Returns `false` when the enemy should be removed.
fn step_enemy(world: &mut World, enemy: &mut Enemy, delta_ms: f64, rng: &mut impl Rng) -> bool {
    match enemy.archetype() {
        Archetype::Ufo => {
            move_ufo(enemy, &world.config, delta_ms, rng);
            ufo_fire(world, enemy);
            if world.player.rect().overlaps(&enemy.rect()) {
                collision::handle_hit(world, rng);
                world.has_ufo = false;
                log::debug!("ufo rammed the player");
                return false;
            }
            true
        }
        Archetype::Blob => {
            let target = (world.player.x, world.player.y);
            move_blob(enemy, target, &world.config, delta_ms, rng);
            animate_tentacles(enemy);
            blob_fire(world, enemy);
            if blob_touches_player(enemy, &world.player, world.config.tentacle_hits) {
                collision::handle_hit(world, rng);
            }
            true
        }
        Archetype::Basic => {
            enemy.x -= match enemy.kind {
                EnemyKind::Moving => MOVING_ENEMY_SPEED,
                _ => world.scroll_speed,
            };
            if world.player.rect().overlaps(&enemy.rect()) {
                collision::handle_hit(world, rng);
                return false;
            }
            enemy.x + enemy.width >= 0.0
        }
    }
}

/// Keep a box of `width × height` inside `[min_x, max_x] × [0, max_y]`,
/// right and bottom edges winning when the area is too small.
fn clamp_into(x: &mut f32, y: &mut f32, size: (f32, f32), min_x: f32, bounds: (f32, f32)) {
    let (width, height) = size;
    let (max_x, max_y) = bounds;
    if *x < min_x {
        *x = min_x;
    }
    if *x + width > max_x {
        *x = max_x - width;
    }
    if *y < 0.0 {
        *y = 0.0;
    }
    if *y + height > max_y {
        *y = max_y - height;
    }
}

// ── UFO ──────────────────────────────────────────────────────────────────────

/// Random walk: a fresh direction every move interval, constant step, clamped
/// fully on screen.
pub fn move_ufo(enemy: &mut Enemy, config: &GameConfig, delta_ms: f64, rng: &mut impl Rng) {
    let EnemyKind::Ufo(state) = &mut enemy.kind else {
        return;
    };
    state.move_timer += delta_ms;
    if state.move_timer > ENEMY_MOVE_INTERVAL_MS {
        state.direction = (signed_unit(rng), signed_unit(rng));
        state.move_timer = 0.0;
    }
    let (dx, dy) = state.direction;

    enemy.x += dx * ENEMY_SPEED;
    enemy.y += dy * ENEMY_SPEED;
    let size = (enemy.width, enemy.height);
    clamp_into(
        &mut enemy.x,
        &mut enemy.y,
        size,
        0.0,
        (config.screen_width, config.screen_height),
    );
}

/// One shot aimed at the player's current position. The aim is fixed at fire
/// time. When UFO and player coincide there is no direction, so the shot is
/// skipped and the clock is left alone.
pub fn ufo_fire(world: &mut World, enemy: &Enemy) {
    let now = world.now;
    if now - world.fire_clocks.ufo < world.config.ufo_shoot_cooldown_ms {
        return;
    }
    let Some((nx, ny)) = normalize(world.player.x - enemy.x, world.player.y - enemy.y) else {
        log::trace!("ufo on top of player, holding fire");
        return;
    };

    let (width, height, speed) = UFO_BULLET;
    world.enemy_bullets.push(Bullet {
        x: enemy.x,
        y: enemy.y + enemy.height / 2.0,
        width,
        height,
        motion: BulletMotion::Vector {
            dx: nx * speed,
            dy: ny * speed,
        },
        kind: BulletKind::Ufo,
    });
    world.fire_clocks.ufo = now;
    world.emit(SoundCue::UfoShoot);
}

// ── Blob ─────────────────────────────────────────────────────────────────────

/// Advance the blob's phase machine. `target` is the player's top-left corner.
pub fn move_blob(
    enemy: &mut Enemy,
    target: (f32, f32),
    config: &GameConfig,
    delta_ms: f64,
    rng: &mut impl Rng,
) {
    let EnemyKind::Blob(state) = &mut enemy.kind else {
        return;
    };
    let screen = (config.screen_width, config.screen_height);
    let size = (enemy.width, enemy.height);
    let strip_left = screen.0 - screen.0 * BLOB_RIGHT_AREA;
    state.move_timer += delta_ms;

    let phase = state.phase;
    state.phase = match phase {
        BlobPhase::Returning => {
            enemy.x += BLOB_RETURN_SPEED;
            let right_edge = screen.0 - enemy.width;
            if enemy.x > right_edge {
                enemy.x = right_edge;
                BlobPhase::OnRight { timer: 0.0 }
            } else {
                BlobPhase::Returning
            }
        }
        BlobPhase::MovingLeft { timer } => {
            if state.move_timer > ENEMY_MOVE_INTERVAL_MS {
                let pursuit =
                    normalize(target.0 - enemy.x, target.1 - enemy.y).unwrap_or((0.0, 0.0));
                let jitter = (signed_unit(rng), signed_unit(rng));
                let mixed = (
                    pursuit.0 * BLOB_PURSUIT_WEIGHT + jitter.0 * (1.0 - BLOB_PURSUIT_WEIGHT),
                    pursuit.1 * BLOB_PURSUIT_WEIGHT + jitter.1 * (1.0 - BLOB_PURSUIT_WEIGHT),
                );
                if let Some(direction) = normalize(mixed.0, mixed.1) {
                    state.direction = direction;
                }
                state.move_timer = 0.0;
            }

            let step = ENEMY_SPEED * BLOB_CHASE_FACTOR;
            enemy.x += state.direction.0 * step;
            enemy.y += state.direction.1 * step;
            clamp_into(&mut enemy.x, &mut enemy.y, size, 0.0, screen);

            let timer = timer + delta_ms;
            if timer >= config.blob_left_side_ms {
                BlobPhase::Returning
            } else {
                BlobPhase::MovingLeft { timer }
            }
        }
        BlobPhase::OnRight { timer } => {
            if state.move_timer > ENEMY_MOVE_INTERVAL_MS {
                let target_x = strip_left + rng.gen::<f32>() * (screen.0 - strip_left);
                let target_y = rng.gen::<f32>() * (screen.1 - enemy.height);
                if let Some(direction) = normalize(target_x - enemy.x, target_y - enemy.y) {
                    state.direction = direction;
                }
                state.move_timer = 0.0;
            }

            enemy.x += state.direction.0 * ENEMY_SPEED;
            enemy.y += state.direction.1 * ENEMY_SPEED;
            clamp_into(&mut enemy.x, &mut enemy.y, size, strip_left, screen);

            let timer = timer + delta_ms;
            if timer >= config.blob_right_side_ms {
                BlobPhase::MovingLeft { timer: 0.0 }
            } else {
                BlobPhase::OnRight { timer }
            }
        }
    };
}

/// Fixed per-frame steps, independent of delta.
pub fn animate_tentacles(enemy: &mut Enemy) {
    let EnemyKind::Blob(state) = &mut enemy.kind else {
        return;
    };
    let anim = &mut state.tentacles;
    anim.angle += TENTACLE_ANGLE_STEP;
    anim.phase += TENTACLE_PHASE_STEP;
    if anim.phase > TAU {
        anim.phase = 0.0;
    }
    anim.wiggle += TENTACLE_WIGGLE_STEP;
}

/// Eight-way burst from the blob's centre.
pub fn blob_fire(world: &mut World, enemy: &Enemy) {
    let now = world.now;
    if now - world.fire_clocks.blob < world.config.blob_shoot_cooldown_ms {
        return;
    }

    let (cx, cy) = enemy.center();
    let (width, height, speed) = BLOB_BULLET;
    let step = TAU / BLOB_BURST_DIRECTIONS as f32;
    world
        .enemy_bullets
        .extend((0..BLOB_BURST_DIRECTIONS).map(|i| {
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
                kind: BulletKind::Blob,
            }
        }));
    world.fire_clocks.blob = now;
    world.emit(SoundCue::BlobShoot);
}

/// One tentacle as a cubic Bézier from the body's edge outward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TentacleCurve {
    pub start: (f32, f32),
    pub control1: (f32, f32),
    pub control2: (f32, f32),
    pub end: (f32, f32),
}

impl TentacleCurve {
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        (
            a * self.start.0 + b * self.control1.0 + c * self.control2.0 + d * self.end.0,
            a * self.start.1 + b * self.control1.1 + c * self.control2.1 + d * self.end.1,
        )
    }
}

/// Current tentacle shapes; empty for anything but a blob.
pub fn tentacle_curves(enemy: &Enemy) -> Vec<TentacleCurve> {
    let EnemyKind::Blob(state) = &enemy.kind else {
        return Vec::new();
    };
    let anim = state.tentacles;
    let (cx, cy) = enemy.center();
    let radius = enemy.width / 2.0;

    (0..TENTACLE_COUNT)
        .map(|i| {
            let i = i as f32;
            let base_angle = TAU * i / TENTACLE_COUNT as f32 + anim.angle;
            let extension = (anim.phase + i * 0.5).sin() * 0.5 + 0.5;
            let length = TENTACLE_BASE_LENGTH * (0.7 + extension * 0.3);
            let sway = (anim.wiggle + i * 0.8).sin();
            let angle = base_angle + sway * TENTACLE_WIGGLE * 0.1;

            let start = (cx + angle.cos() * radius, cy + angle.sin() * radius);
            let mid = length * 0.5;
            let bend1 = angle + sway * 0.3;
            let bend2 = angle + (anim.wiggle + i * 0.8 + 0.5).sin() * 0.3;

            TentacleCurve {
                start,
                control1: (start.0 + bend1.cos() * mid, start.1 + bend1.sin() * mid),
                control2: (
                    start.0 + bend2.cos() * mid * 1.5,
                    start.1 + bend2.sin() * mid * 1.5,
                ),
                end: (start.0 + angle.cos() * length, start.1 + angle.sin() * length),
            }
        })
        .collect()
}

/// Body contact is a circle test on the centres. With `tentacle_hits` the
/// sampled tentacle curves count too.
pub fn blob_touches_player(enemy: &Enemy, player: &Player, tentacle_hits: bool) -> bool {
    let (px, py) = player.center();
    let (bx, by) = enemy.center();
    let distance = ((px - bx).powi(2) + (py - by).powi(2)).sqrt();
    if distance < player.width / 2.0 + enemy.width / 2.0 {
        return true;
    }
    if !tentacle_hits {
        return false;
    }

    let pad = TENTACLE_WIDTH / 2.0;
    let reach = Rect::new(
        player.x - pad,
        player.y - pad,
        player.width + 2.0 * pad,
        player.height + 2.0 * pad,
    );
    tentacle_curves(enemy).iter().any(|curve| {
        (0..=TENTACLE_SAMPLES).any(|s| {
            let (x, y) = curve.point_at(s as f32 / TENTACLE_SAMPLES as f32);
            reach.contains(x, y)
        })
    })
}

// ── Basic volley ─────────────────────────────────────────────────────────────

/// Every live basic enemy fires one shot to the left on the shared clock.
pub fn basic_volley(world: &mut World) {
    let now = world.now;
    if now - world.fire_clocks.basic < world.config.enemy_shoot_cooldown_ms {
        return;
    }

    let (width, height, speed) = NORMAL_BULLET;
    let shots: Vec<Bullet> = world
        .enemies
        .iter()
        .filter(|e| e.archetype() == Archetype::Basic)
        .map(|e| Bullet {
            x: e.x,
            y: e.y + e.height / 2.0,
            width,
            height,
            motion: BulletMotion::Axis { speed: -speed },
            kind: BulletKind::Normal,
        })
        .collect();

    for _ in 0..shots.len() {
        world.emit(SoundCue::EnemyShoot);
    }
    world.enemy_bullets.extend(shots);
    world.fire_clocks.basic = now;
}
