use std::f32::consts::TAU;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use frog_blaster::compute::collision::{self, HitOutcome};
use frog_blaster::compute::*;
use frog_blaster::config::GameConfig;
use frog_blaster::constants::*;
use frog_blaster::entities::*;
use frog_blaster::events::SoundCue;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every `gen::<f32>()` returns 0.0.
fn low_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Every `gen::<f32>()` returns just under 1.0.
fn high_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Every `gen::<f32>()` returns exactly 0.5, so `signed_unit` is 0.
fn mid_rng() -> StepRng {
    StepRng::new(0x8000_0000, 0)
}

fn make_world() -> World {
    init_world(GameConfig::default(), &mut seeded_rng())
}

fn basic_enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        health: BASIC_HEALTH,
        kind: EnemyKind::Drifting,
    }
}

fn ufo(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        health: UFO_HEALTH,
        kind: EnemyKind::Ufo(UfoState {
            move_timer: 0.0,
            direction: (0.0, 0.0),
        }),
    }
}

fn blob(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        health: BLOB_HEALTH,
        kind: EnemyKind::Blob(BlobState {
            move_timer: 0.0,
            direction: (0.0, 0.0),
            phase: BlobPhase::OnRight { timer: 0.0 },
            tentacles: TentacleAnim::default(),
        }),
    }
}

fn player_shot(x: f32, y: f32) -> Bullet {
    let (width, height, speed) = DEFAULT_BULLET;
    Bullet {
        x,
        y,
        width,
        height,
        motion: BulletMotion::Axis { speed },
        kind: BulletKind::Default,
    }
}

fn enemy_shot(x: f32, y: f32) -> Bullet {
    let (width, height, speed) = NORMAL_BULLET;
    Bullet {
        x,
        y,
        width,
        height,
        motion: BulletMotion::Axis { speed: -speed },
        kind: BulletKind::Normal,
    }
}

fn blob_phase(enemy: &Enemy) -> BlobPhase {
    match &enemy.kind {
        EnemyKind::Blob(state) => state.phase,
        other => panic!("expected a blob, got {:?}", other),
    }
}

// ── init_world / restart ──────────────────────────────────────────────────────

#[test]
fn init_world_initial_state() {
    let w = make_world();
    assert_eq!(w.score, 0);
    assert_eq!(w.shields, MAX_SHIELDS);
    assert_eq!(w.status, PlayerStatus::Vulnerable);
    assert_eq!(w.now, 0.0);
    assert!(!w.has_ufo);
    assert!(!w.has_blob);
    assert!(w.enemies.is_empty());
    assert!(w.player_bullets.is_empty());
    assert!(w.enemy_bullets.is_empty());
    assert!(w.power_ups.is_empty());
    assert!(w.obstacles.is_empty());
    assert!(w.particles.is_empty());
    assert!(w.cues.is_empty());
    assert_relative_eq!(w.scroll_speed, SCROLL_SPEED);
}

#[test]
fn init_world_player_position() {
    let w = make_world();
    assert_relative_eq!(w.player.x, PLAYER_X);
    assert_relative_eq!(w.player.y, 300.0);
    assert_relative_eq!(w.player.velocity, 0.0);
    assert_eq!(w.player.weapon, Weapon::default_gun());
    assert!(w.player.last_shot.is_none());
}

#[test]
fn init_world_fills_star_layers() {
    let w = make_world();
    let expected: usize = STAR_LAYERS.iter().map(|(count, _, _)| count).sum();
    assert_eq!(w.stars.len(), expected);
    assert!(w
        .stars
        .iter()
        .all(|s| s.x >= 0.0 && s.x <= SCREEN_WIDTH && s.y >= 0.0 && s.y <= SCREEN_HEIGHT));
}

#[test]
fn restart_resets_everything() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.score = 123;
    w.shields = 0;
    w.now = 9_000.0;
    w.has_ufo = true;
    w.enemies.push(ufo(400.0, 100.0));
    w.player.weapon = Weapon::fast_laser(10);
    collision::handle_hit(&mut w, &mut rng);
    assert!(w.is_game_over());

    restart(&mut w, &mut rng);

    assert_eq!(w.score, 0);
    assert_eq!(w.shields, MAX_SHIELDS);
    assert_eq!(w.status, PlayerStatus::Vulnerable);
    assert_eq!(w.now, 0.0);
    assert!(!w.has_ufo);
    assert!(w.enemies.is_empty());
    assert!(w.particles.is_empty());
    assert_eq!(w.player.weapon.kind, WeaponKind::Default);
    assert_eq!(w.config, GameConfig::default());
}

// ── Jump and gravity ──────────────────────────────────────────────────────────

#[test]
fn jump_sets_velocity() {
    let mut w = make_world();
    on_jump(&mut w);
    assert_relative_eq!(w.player.velocity, JUMP_FORCE);
}

#[test]
fn jump_twice_same_as_once() {
    let mut w = make_world();
    on_jump(&mut w);
    on_jump(&mut w);
    assert_relative_eq!(w.player.velocity, JUMP_FORCE);
}

#[test]
fn gravity_applies_before_position() {
    let mut w = make_world();
    on_jump(&mut w);
    player::apply_gravity(&mut w);
    assert_relative_eq!(w.player.velocity, -3.9, epsilon = 1e-5);
    assert_relative_eq!(w.player.y, 296.1, epsilon = 1e-3);
}

#[test]
fn floor_stops_the_fall() {
    let mut w = make_world();
    w.player.y = 570.0;
    w.player.velocity = 5.0;
    player::apply_gravity(&mut w);
    assert_relative_eq!(w.player.y, SCREEN_HEIGHT - PLAYER_SIZE);
    assert_relative_eq!(w.player.velocity, 0.0);
}

#[test]
fn jump_ignored_after_game_over() {
    let mut w = make_world();
    w.status = PlayerStatus::GameOver;
    on_jump(&mut w);
    assert_relative_eq!(w.player.velocity, 0.0);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn default_gun_fires_from_muzzle() {
    let mut w = make_world();
    on_fire_start(&mut w);
    player::try_shoot(&mut w);

    assert_eq!(w.player_bullets.len(), 1);
    let b = &w.player_bullets[0];
    assert_relative_eq!(b.x, PLAYER_X + PLAYER_SIZE);
    assert_relative_eq!(b.y, 300.0 + PLAYER_SIZE / 2.0);
    assert_eq!(b.kind, BulletKind::Default);
    assert_eq!(b.motion, BulletMotion::Axis { speed: 10.0 });
    assert_eq!(w.drain_cues(), vec![SoundCue::Shoot]);
}

#[test]
fn default_gun_respects_cooldown() {
    let mut w = make_world();
    on_fire_start(&mut w);
    player::try_shoot(&mut w);
    w.now += DEFAULT_COOLDOWN_MS - 1.0;
    player::try_shoot(&mut w);
    assert_eq!(w.player_bullets.len(), 1);

    w.now += 1.0;
    player::try_shoot(&mut w);
    assert_eq!(w.player_bullets.len(), 2);
}

#[test]
fn fast_laser_spends_ammo_then_reverts() {
    let mut w = make_world();
    w.player.weapon = Weapon::fast_laser(1);
    on_fire_start(&mut w);

    player::try_shoot(&mut w);
    assert_eq!(w.player_bullets.len(), 1);
    assert_eq!(w.player_bullets[0].kind, BulletKind::Laser);
    assert_eq!(w.player.weapon.ammo, 0);
    assert_eq!(w.player.weapon.kind, WeaponKind::FastLaser);

    w.now += FAST_LASER_COOLDOWN_MS;
    player::try_shoot(&mut w);
    assert_eq!(w.player_bullets.len(), 1, "empty laser must not fire");
    assert_eq!(w.player.weapon, Weapon::default_gun());
    assert!(w.player.is_shooting, "trigger stays held across the swap");
}

#[test]
fn charge_gun_does_not_fire_on_hold() {
    let mut w = make_world();
    w.player.weapon = Weapon::charge_gun(WEAPON_PICKUP_AMMO);
    on_fire_start(&mut w);
    assert!(w.player.is_charging);
    assert!(!w.player.is_shooting);

    for _ in 0..3 {
        player::update(&mut w);
    }
    assert!(w.player_bullets.is_empty());
    assert_relative_eq!(w.player.charge_level, 3.0);
    // Same timestamp: only the first frame plays the charge sound.
    let charges = w.cues.iter().filter(|c| **c == SoundCue::Charge).count();
    assert_eq!(charges, 1);
}

#[test]
fn charge_level_caps_at_max() {
    let mut w = make_world();
    w.player.weapon = Weapon::charge_gun(WEAPON_PICKUP_AMMO);
    on_fire_start(&mut w);
    for _ in 0..250 {
        player::update(&mut w);
    }
    assert_relative_eq!(w.player.charge_level, MAX_CHARGE);
}

#[test]
fn full_charge_releases_fifteen_bullets() {
    let mut w = make_world();
    w.player.weapon = Weapon::charge_gun(WEAPON_PICKUP_AMMO);
    on_fire_start(&mut w);
    w.player.charge_level = MAX_CHARGE;
    on_fire_end(&mut w);

    assert_eq!(w.player_bullets.len(), 15);
    assert_eq!(w.player.weapon.ammo, WEAPON_PICKUP_AMMO - 1);
    assert_relative_eq!(w.player.charge_level, 0.0);
    assert!(!w.player.is_charging);
    assert!(w.cues.contains(&SoundCue::Laser));

    let (cx, cy) = w.player.center();
    let step = TAU / 15.0;
    for (i, b) in w.player_bullets.iter().enumerate() {
        assert_eq!(b.kind, BulletKind::Charge);
        assert_relative_eq!(b.x, cx);
        assert_relative_eq!(b.y, cy);
        let BulletMotion::Vector { dx, dy } = b.motion else {
            panic!("charge bullets travel along a vector");
        };
        let angle = step * i as f32;
        assert_abs_diff_eq!(dx, angle.cos() * 8.0, epsilon = 1e-4);
        assert_abs_diff_eq!(dy, angle.sin() * 8.0, epsilon = 1e-4);
    }
}

#[test]
fn empty_charge_still_fires_five() {
    let mut w = make_world();
    w.player.weapon = Weapon::charge_gun(WEAPON_PICKUP_AMMO);
    on_fire_start(&mut w);
    on_fire_end(&mut w);
    assert_eq!(w.player_bullets.len(), 5);
}

#[test]
fn charge_burst_size_steps_every_ten() {
    assert_eq!(player::charge_burst_size(0.0), 5);
    assert_eq!(player::charge_burst_size(9.9), 5);
    assert_eq!(player::charge_burst_size(10.0), 6);
    assert_eq!(player::charge_burst_size(55.0), 10);
    assert_eq!(player::charge_burst_size(100.0), 15);
    assert_eq!(player::charge_burst_size(400.0), 15);
}

#[test]
fn last_charge_shot_reverts_weapon() {
    let mut w = make_world();
    w.player.weapon = Weapon::charge_gun(1);
    on_fire_start(&mut w);
    on_fire_end(&mut w);
    assert_eq!(w.player_bullets.len(), 5);
    assert_eq!(w.player.weapon, Weapon::default_gun());
}

#[test]
fn fire_end_without_charge_only_clears_flags() {
    let mut w = make_world();
    on_fire_start(&mut w);
    on_fire_end(&mut w);
    assert!(!w.player.is_shooting);
    assert!(!w.player.is_charging);
    assert!(w.player_bullets.is_empty());
}

#[test]
fn fire_ignored_after_game_over() {
    let mut w = make_world();
    w.status = PlayerStatus::GameOver;
    w.player.weapon = Weapon::charge_gun(5);
    on_fire_start(&mut w);
    assert!(!w.player.is_charging);

    w.player.is_charging = true;
    on_fire_end(&mut w);
    assert!(w.player_bullets.is_empty());
    assert!(!w.player.is_charging);
    assert_eq!(w.player.weapon.ammo, 5);
}

// ── Hits and invulnerability ──────────────────────────────────────────────────

#[test]
fn hit_consumes_shield_and_grants_invulnerability() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    assert_eq!(collision::handle_hit(&mut w, &mut rng), HitOutcome::Absorbed);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
    assert!(w.is_invulnerable());
    assert_eq!(w.cues, vec![SoundCue::Hit]);
}

#[test]
fn hit_while_invulnerable_is_ignored() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    collision::handle_hit(&mut w, &mut rng);
    w.now += 500.0;
    assert_eq!(collision::handle_hit(&mut w, &mut rng), HitOutcome::Ignored);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
    // The window is not re-armed by the ignored hit.
    assert_eq!(w.status, PlayerStatus::Invulnerable { since: 0.0 });
    // The hit sound still plays.
    assert_eq!(w.cues, vec![SoundCue::Hit, SoundCue::Hit]);
}

#[test]
fn invulnerable_with_no_shields_survives() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.shields = 0;
    w.status = PlayerStatus::Invulnerable { since: 0.0 };
    assert_eq!(collision::handle_hit(&mut w, &mut rng), HitOutcome::Ignored);
    assert!(!w.is_game_over());
}

#[test]
fn invulnerability_expires_after_window() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    collision::handle_hit(&mut w, &mut rng);

    w.now = INVULNERABILITY_MS - 1.0;
    collision::expire_invulnerability(&mut w);
    assert!(w.is_invulnerable());

    w.now = INVULNERABILITY_MS;
    collision::expire_invulnerability(&mut w);
    assert_eq!(w.status, PlayerStatus::Vulnerable);
}

#[test]
fn hit_without_shields_is_fatal_once() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.shields = 0;
    on_fire_start(&mut w);

    assert_eq!(collision::handle_hit(&mut w, &mut rng), HitOutcome::Fatal);
    assert!(w.is_game_over());
    assert!(!w.player.is_shooting);
    assert_eq!(w.particles.len(), EXPLOSION_PARTICLES);
    assert!(w.particles.iter().all(|p| p.palette == Palette::Purple));
    assert!(w.cues.contains(&SoundCue::Explosion));
    assert!(w.cues.contains(&SoundCue::GameOver));

    w.cues.clear();
    assert_eq!(collision::handle_hit(&mut w, &mut rng), HitOutcome::Ignored);
    assert!(!w.cues.contains(&SoundCue::GameOver));
    assert_eq!(w.particles.len(), EXPLOSION_PARTICLES);
}

#[test]
fn outcome_reports_final_score() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.score = 42;
    w.shields = 0;
    assert!(!w.outcome().game_over);
    collision::handle_hit(&mut w, &mut rng);
    assert_eq!(
        w.outcome(),
        Outcome {
            game_over: true,
            final_score: 42
        }
    );
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[test]
fn create_obstacle_low_draw() {
    let config = GameConfig::default();
    let o = obstacles::create_obstacle(&config, &mut low_rng());
    assert_relative_eq!(o.x, SCREEN_WIDTH);
    assert_relative_eq!(o.width, OBSTACLE_WIDTH);
    assert_relative_eq!(o.top_height, OBSTACLE_MIN_HEIGHT);
    assert_relative_eq!(o.bottom_y, OBSTACLE_MIN_HEIGHT + OBSTACLE_GAP);
    assert_eq!(o.shade, 20);
    assert_eq!(o.windows.len(), (WINDOW_ROWS * WINDOW_COLS) as usize);
    assert!(o.windows.iter().all(|win| win.lit));
    assert!(!o.passed);
}

#[test]
fn create_obstacle_high_draw_keeps_bottom_pillar() {
    let config = GameConfig::default();
    let o = obstacles::create_obstacle(&config, &mut high_rng());
    assert!(o.top_height <= config.obstacle_max_height());
    assert!(SCREEN_HEIGHT - o.bottom_y >= OBSTACLE_MIN_HEIGHT);
    assert!(o.windows.is_empty());
}

#[test]
fn obstacle_scores_once_when_passed() {
    let mut w = make_world();
    let mut o = obstacles::create_obstacle(&w.config, &mut low_rng());
    o.x = 49.0;
    w.obstacles.push(o);

    obstacles::update(&mut w);
    assert_eq!(w.score, OBSTACLE_SCORE);
    assert!(w.obstacles[0].passed);

    obstacles::update(&mut w);
    assert_eq!(w.score, OBSTACLE_SCORE);
}

#[test]
fn obstacle_not_passed_while_overlapping_player_column() {
    let mut w = make_world();
    let mut o = obstacles::create_obstacle(&w.config, &mut low_rng());
    o.x = 60.0;
    w.obstacles.push(o);
    obstacles::update(&mut w);
    assert_eq!(w.score, 0);
}

#[test]
fn obstacle_removed_offscreen() {
    let mut w = make_world();
    let mut o = obstacles::create_obstacle(&w.config, &mut low_rng());
    o.x = -OBSTACLE_WIDTH + 1.0;
    o.passed = true;
    w.obstacles.push(o);
    obstacles::update(&mut w);
    assert!(w.obstacles.is_empty());
}

#[test]
fn pillar_contact_hits_player() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut o = obstacles::create_obstacle(&w.config, &mut low_rng());
    o.x = 90.0;
    o.top_height = 350.0;
    o.bottom_y = 600.0;
    w.obstacles.push(o);

    collision::check_obstacles(&mut w, &mut rng);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
}

#[test]
fn flying_through_gap_is_safe() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut o = obstacles::create_obstacle(&w.config, &mut low_rng());
    o.x = 90.0;
    o.top_height = 250.0;
    o.bottom_y = 500.0;
    w.obstacles.push(o);

    collision::check_obstacles(&mut w, &mut rng);
    assert_eq!(w.shields, MAX_SHIELDS);
    assert!(w.cues.is_empty());
}

#[test]
fn ceiling_hits_player() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.player.y = -1.0;
    collision::check_obstacles(&mut w, &mut rng);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
}

// ── Player bullets vs enemies ─────────────────────────────────────────────────

#[test]
fn basic_enemy_dies_to_one_bullet() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(basic_enemy(500.0, 100.0));
    w.player_bullets.push(player_shot(495.0, 110.0));

    projectiles::update_player_bullets(&mut w, &mut rng);

    assert_eq!(w.score, BASIC_SCORE);
    assert!(w.enemies.is_empty());
    assert!(w.player_bullets.is_empty());
    assert_eq!(w.particles.len(), SMALL_EXPLOSION_PARTICLES);
    assert!(w.cues.contains(&SoundCue::EnemyDeath));
}

#[test]
fn ufo_takes_five_hits() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(ufo(500.0, 100.0));
    w.has_ufo = true;

    for _ in 0..4 {
        w.player_bullets.push(player_shot(495.0, 110.0));
        projectiles::update_player_bullets(&mut w, &mut rng);
    }
    assert_eq!(w.enemies[0].health, 1);
    assert_eq!(w.score, 0);
    let ufo_hits = w.cues.iter().filter(|c| **c == SoundCue::UfoHit).count();
    assert_eq!(ufo_hits, 4);

    w.player_bullets.push(player_shot(495.0, 110.0));
    projectiles::update_player_bullets(&mut w, &mut rng);
    assert_eq!(w.score, UFO_SCORE);
    assert!(!w.has_ufo);
    assert!(w.enemies.is_empty());
    assert!(w.cues.contains(&SoundCue::UfoDeath));
    assert!(w.particles.iter().all(|p| p.palette == Palette::Grey));
}

#[test]
fn blob_takes_eight_hits() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(blob(500.0, 100.0));
    w.has_blob = true;

    for _ in 0..BLOB_HEALTH {
        w.player_bullets.push(player_shot(495.0, 110.0));
        projectiles::update_player_bullets(&mut w, &mut rng);
    }
    assert_eq!(w.score, BLOB_SCORE);
    assert!(!w.has_blob);
    assert!(w.enemies.is_empty());
}

#[test]
fn one_bullet_damages_one_enemy() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(basic_enemy(500.0, 100.0));
    w.enemies.push(basic_enemy(505.0, 100.0));
    w.player_bullets.push(player_shot(500.0, 110.0));

    projectiles::update_player_bullets(&mut w, &mut rng);
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.score, BASIC_SCORE);
}

#[test]
fn player_bullet_leaves_screen() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.player_bullets.push(player_shot(795.0, 100.0));
    projectiles::update_player_bullets(&mut w, &mut rng);
    assert!(w.player_bullets.is_empty());
}

#[test]
fn charge_bullets_move_along_vector() {
    let mut b = player_shot(100.0, 100.0);
    b.motion = BulletMotion::Vector { dx: 3.0, dy: -4.0 };
    projectiles::advance(&mut b);
    assert_relative_eq!(b.x, 103.0);
    assert_relative_eq!(b.y, 96.0);
}

// ── Enemy bullets vs player ───────────────────────────────────────────────────

#[test]
fn enemy_bullet_hits_player() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemy_bullets.push(enemy_shot(120.0, 310.0));
    projectiles::update_enemy_bullets(&mut w, &mut rng);
    assert!(w.enemy_bullets.is_empty());
    assert_eq!(w.shields, MAX_SHIELDS - 1);
}

#[test]
fn enemy_bullet_leaves_screen() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemy_bullets.push(enemy_shot(-6.0, 100.0));
    w.enemy_bullets.push(enemy_shot(400.0, 100.0));
    projectiles::update_enemy_bullets(&mut w, &mut rng);
    assert_eq!(w.enemy_bullets.len(), 1);
    assert_relative_eq!(w.enemy_bullets[0].x, 395.0);
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn shield_pickup_at_cap_keeps_three() {
    let mut w = make_world();
    projectiles::apply_power_up(&mut w, PowerUpKind::Shield);
    assert_eq!(w.shields, MAX_SHIELDS);
    assert!(w.is_invulnerable());
    assert_eq!(w.cues, vec![SoundCue::ShieldRecharge]);
}

#[test]
fn shield_pickup_restores_one() {
    let mut w = make_world();
    w.shields = 1;
    projectiles::apply_power_up(&mut w, PowerUpKind::Shield);
    assert_eq!(w.shields, 2);
}

#[test]
fn shield_pickup_rearms_invulnerability() {
    let mut w = make_world();
    w.shields = 1;
    w.status = PlayerStatus::Invulnerable { since: 100.0 };
    w.now = 1_500.0;
    projectiles::apply_power_up(&mut w, PowerUpKind::Shield);
    assert_eq!(w.status, PlayerStatus::Invulnerable { since: 1_500.0 });
    assert_eq!(w.shields, 2);
}

#[test]
fn charge_pickup_with_zero_ammo_reverts_on_release() {
    let mut config = GameConfig::default();
    config.weapon_pickup_ammo = 0;
    let mut w = init_world(config, &mut seeded_rng());
    projectiles::apply_power_up(&mut w, PowerUpKind::ChargeGun);
    assert_eq!(w.player.weapon.kind, WeaponKind::ChargeGun);

    on_fire_start(&mut w);
    player::update(&mut w);
    on_fire_end(&mut w);

    assert!(w.player_bullets.is_empty());
    assert_eq!(w.player.weapon.kind, WeaponKind::Default);
    assert_relative_eq!(w.player.charge_level, 0.0);
}

#[test]
fn fast_laser_pickup_stacks_ammo() {
    let mut w = make_world();
    projectiles::apply_power_up(&mut w, PowerUpKind::FastLaser);
    assert_eq!(w.player.weapon, Weapon::fast_laser(WEAPON_PICKUP_AMMO));
    projectiles::apply_power_up(&mut w, PowerUpKind::FastLaser);
    assert_eq!(w.player.weapon.ammo, 2 * WEAPON_PICKUP_AMMO);
    assert_eq!(w.cues, vec![SoundCue::PowerUp, SoundCue::PowerUp]);
}

#[test]
fn charge_pickup_while_firing_switches_to_charging() {
    let mut w = make_world();
    on_fire_start(&mut w);
    projectiles::apply_power_up(&mut w, PowerUpKind::ChargeGun);
    assert_eq!(w.player.weapon, Weapon::charge_gun(WEAPON_PICKUP_AMMO));
    assert!(w.player.is_charging);
    assert!(!w.player.is_shooting);
}

#[test]
fn charge_pickup_replaces_laser() {
    let mut w = make_world();
    w.player.weapon = Weapon::fast_laser(7);
    projectiles::apply_power_up(&mut w, PowerUpKind::ChargeGun);
    assert_eq!(w.player.weapon.kind, WeaponKind::ChargeGun);
    assert_eq!(w.player.weapon.ammo, WEAPON_PICKUP_AMMO);
}

#[test]
fn power_up_collected_on_contact() {
    let mut w = make_world();
    w.shields = 2;
    w.power_ups.push(PowerUp {
        x: 105.0,
        y: 305.0,
        size: POWER_UP_SIZE,
        kind: PowerUpKind::Shield,
        pulse_timer: 0.0,
    });
    projectiles::update_power_ups(&mut w, 16.0);
    assert!(w.power_ups.is_empty());
    assert_eq!(w.shields, 3);
}

#[test]
fn power_up_drifts_and_expires() {
    let mut w = make_world();
    w.power_ups.push(PowerUp {
        x: 400.0,
        y: 50.0,
        size: POWER_UP_SIZE,
        kind: PowerUpKind::FastLaser,
        pulse_timer: 0.0,
    });
    w.power_ups.push(PowerUp {
        x: -POWER_UP_SIZE + 1.0,
        y: 50.0,
        size: POWER_UP_SIZE,
        kind: PowerUpKind::FastLaser,
        pulse_timer: 0.0,
    });
    projectiles::update_power_ups(&mut w, 16.0);
    assert_eq!(w.power_ups.len(), 1);
    assert_relative_eq!(w.power_ups[0].x, 398.0);
    assert_relative_eq!(w.power_ups[0].pulse_timer, 16.0);
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn low_draw_spawns_ufo_first() {
    let config = GameConfig::default();
    let e = enemies::create_enemy(&config, false, false, &mut low_rng());
    assert_eq!(e.archetype(), Archetype::Ufo);
    assert_eq!(e.health, UFO_HEALTH);
    assert_relative_eq!(e.x, SCREEN_WIDTH);
    assert_relative_eq!(e.y, 0.0);
}

#[test]
fn blob_drawn_only_when_ufo_present() {
    let config = GameConfig::default();
    let e = enemies::create_enemy(&config, true, false, &mut low_rng());
    assert_eq!(e.archetype(), Archetype::Blob);
    assert_eq!(e.health, BLOB_HEALTH);
    assert_eq!(blob_phase(&e), BlobPhase::OnRight { timer: 0.0 });
}

#[test]
fn presence_flags_force_basic_enemy() {
    let config = GameConfig::default();
    let e = enemies::create_enemy(&config, true, true, &mut low_rng());
    assert_eq!(e.kind, EnemyKind::Moving);
    assert_eq!(e.health, BASIC_HEALTH);

    let e = enemies::create_enemy(&config, false, false, &mut high_rng());
    assert_eq!(e.kind, EnemyKind::Drifting);
}

#[test]
fn spawn_enemy_raises_presence_flag() {
    let mut w = make_world();
    spawner::spawn_enemy(&mut w, &mut low_rng());
    assert!(w.has_ufo);
    assert_eq!(w.cues, vec![SoundCue::UfoPresence]);

    spawner::spawn_enemy(&mut w, &mut low_rng());
    assert!(w.has_blob);
    assert_eq!(w.cues[1], SoundCue::BlobPresence);
}

#[test]
fn never_more_than_one_ufo_or_blob() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    for _ in 0..300 {
        spawner::spawn_enemy(&mut w, &mut rng);
    }
    let ufos = w.enemies.iter().filter(|e| e.archetype() == Archetype::Ufo).count();
    let blobs = w.enemies.iter().filter(|e| e.archetype() == Archetype::Blob).count();
    assert!(ufos <= 1);
    assert!(blobs <= 1);
    assert_eq!(w.enemies.len(), 300);
}

#[test]
fn spawner_timers_fire_and_reset() {
    let mut w = make_world();
    spawner::update(&mut w, 2_001.0, &mut low_rng());
    assert_eq!(w.obstacles.len(), 1);
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.power_ups.len(), 1);
    assert_eq!(w.power_ups[0].kind, PowerUpKind::Shield);
    assert_eq!(w.spawn_timers, SpawnTimers::default());
}

#[test]
fn spawner_waits_for_interval() {
    let mut w = make_world();
    spawner::update(&mut w, OBSTACLE_INTERVAL_MS, &mut low_rng());
    assert!(w.obstacles.is_empty(), "interval must be strictly exceeded");
    spawner::update(&mut w, 1.0, &mut low_rng());
    assert_eq!(w.obstacles.len(), 1);
}

#[test]
fn power_up_drop_can_miss() {
    let mut w = make_world();
    spawner::update(&mut w, 2_001.0, &mut high_rng());
    assert!(w.power_ups.is_empty());
    assert_relative_eq!(w.spawn_timers.power_up, 0.0);
}

#[test]
fn weighted_power_up_pick() {
    let weights = POWER_UP_WEIGHTS;
    assert_eq!(spawner::pick_power_up_kind(&weights, 0.0), PowerUpKind::Shield);
    assert_eq!(spawner::pick_power_up_kind(&weights, 0.29), PowerUpKind::Shield);
    assert_eq!(spawner::pick_power_up_kind(&weights, 0.31), PowerUpKind::FastLaser);
    assert_eq!(spawner::pick_power_up_kind(&weights, 0.61), PowerUpKind::ChargeGun);
    assert_eq!(spawner::pick_power_up_kind(&weights, 0.999_999), PowerUpKind::ChargeGun);
    assert_eq!(spawner::pick_power_up_kind(&[0.0, 0.0, 1.0], 0.0), PowerUpKind::ChargeGun);
}

// ── Enemy behavior ────────────────────────────────────────────────────────────

#[test]
fn basic_enemies_move_left() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut mover = basic_enemy(500.0, 50.0);
    mover.kind = EnemyKind::Moving;
    w.enemies.push(mover);
    w.enemies.push(basic_enemy(500.0, 150.0));

    enemies::update(&mut w, 16.0, &mut rng);
    assert_relative_eq!(w.enemies[0].x, 500.0 - MOVING_ENEMY_SPEED);
    assert_relative_eq!(w.enemies[1].x, 500.0 - SCROLL_SPEED);
}

#[test]
fn basic_enemy_contact_hits_and_removes() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(basic_enemy(110.0, 300.0));
    enemies::update(&mut w, 16.0, &mut rng);
    assert!(w.enemies.is_empty());
    assert_eq!(w.shields, MAX_SHIELDS - 1);
    assert_eq!(w.score, 0);
}

#[test]
fn basic_volley_one_shot_per_enemy() {
    let mut w = make_world();
    w.enemies.push(basic_enemy(500.0, 50.0));
    w.enemies.push(basic_enemy(600.0, 150.0));
    w.enemies.push(ufo(300.0, 300.0));
    w.now = ENEMY_SHOOT_COOLDOWN_MS;

    enemies::basic_volley(&mut w);
    assert_eq!(w.enemy_bullets.len(), 2);
    assert!(w.enemy_bullets.iter().all(|b| b.kind == BulletKind::Normal));
    assert_relative_eq!(w.enemy_bullets[0].y, 70.0);
    assert_eq!(w.cues, vec![SoundCue::EnemyShoot, SoundCue::EnemyShoot]);
    assert_relative_eq!(w.fire_clocks.basic, ENEMY_SHOOT_COOLDOWN_MS);

    enemies::basic_volley(&mut w);
    assert_eq!(w.enemy_bullets.len(), 2);
}

#[test]
fn basic_volley_clock_runs_without_enemies() {
    let mut w = make_world();
    w.now = 4_000.0;
    enemies::basic_volley(&mut w);
    assert!(w.enemy_bullets.is_empty());
    assert_relative_eq!(w.fire_clocks.basic, 4_000.0);
}

#[test]
fn ufo_aims_at_player() {
    let mut w = make_world();
    let u = ufo(500.0, 300.0);
    w.now = UFO_SHOOT_COOLDOWN_MS;
    enemies::ufo_fire(&mut w, &u);

    assert_eq!(w.enemy_bullets.len(), 1);
    let b = &w.enemy_bullets[0];
    assert_eq!(b.kind, BulletKind::Ufo);
    assert_relative_eq!(b.y, 320.0);
    let BulletMotion::Vector { dx, dy } = b.motion else {
        panic!("ufo shots travel along a vector");
    };
    assert_relative_eq!(dx, -10.0, epsilon = 1e-4);
    assert_abs_diff_eq!(dy, 0.0, epsilon = 1e-4);
    assert_relative_eq!(w.fire_clocks.ufo, UFO_SHOOT_COOLDOWN_MS);
    assert_eq!(w.cues, vec![SoundCue::UfoShoot]);
}

#[test]
fn ufo_holds_fire_on_top_of_player() {
    let mut w = make_world();
    let u = ufo(w.player.x, w.player.y);
    w.now = 5_000.0;
    enemies::ufo_fire(&mut w, &u);
    assert!(w.enemy_bullets.is_empty());
    assert_relative_eq!(w.fire_clocks.ufo, 0.0);
}

#[test]
fn ufo_stays_on_screen() {
    let config = GameConfig::default();
    let mut u = ufo(SCREEN_WIDTH - ENEMY_SIZE, 0.0);
    if let EnemyKind::Ufo(state) = &mut u.kind {
        state.direction = (1.0, -1.0);
    }
    enemies::move_ufo(&mut u, &config, 16.0, &mut seeded_rng());
    assert_relative_eq!(u.x, SCREEN_WIDTH - ENEMY_SIZE);
    assert_relative_eq!(u.y, 0.0);
}

#[test]
fn ufo_ram_clears_presence() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(ufo(w.player.x, w.player.y));
    w.has_ufo = true;
    enemies::update(&mut w, 16.0, &mut rng);
    assert!(w.enemies.is_empty());
    assert!(!w.has_ufo);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
}

#[test]
fn blob_burst_fires_eight_ways() {
    let mut w = make_world();
    let b = blob(600.0, 100.0);
    w.now = BLOB_SHOOT_COOLDOWN_MS;
    enemies::blob_fire(&mut w, &b);
    assert_eq!(w.enemy_bullets.len(), BLOB_BURST_DIRECTIONS);
    assert!(w
        .enemy_bullets
        .iter()
        .all(|shot| shot.kind == BulletKind::Blob && shot.x == 620.0 && shot.y == 120.0));
    assert_eq!(w.cues, vec![SoundCue::BlobShoot]);
}

#[test]
fn blob_phase_cycle() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut b = blob(700.0, 100.0);
    let target = (PLAYER_X, 300.0);

    for _ in 0..4 {
        enemies::move_blob(&mut b, target, &config, 1_000.0, &mut rng);
        assert!(b.x >= SCREEN_WIDTH * (1.0 - BLOB_RIGHT_AREA) - 1e-3);
    }
    assert_eq!(blob_phase(&b), BlobPhase::OnRight { timer: 4_000.0 });

    enemies::move_blob(&mut b, target, &config, 1_000.0, &mut rng);
    assert_eq!(blob_phase(&b), BlobPhase::MovingLeft { timer: 0.0 });

    for _ in 0..3 {
        enemies::move_blob(&mut b, target, &config, 1_000.0, &mut rng);
    }
    assert_eq!(blob_phase(&b), BlobPhase::Returning);

    b.x = 100.0;
    let mut frames = 0;
    while blob_phase(&b) == BlobPhase::Returning {
        enemies::move_blob(&mut b, target, &config, 16.0, &mut rng);
        frames += 1;
        assert!(frames < 200, "blob never made it back");
    }
    assert_relative_eq!(b.x, SCREEN_WIDTH - ENEMY_SIZE);
    assert_eq!(blob_phase(&b), BlobPhase::OnRight { timer: 0.0 });
}

#[test]
fn blob_hunts_the_player() {
    let config = GameConfig::default();
    let mut b = blob(700.0, 300.0);
    if let EnemyKind::Blob(state) = &mut b.kind {
        state.phase = BlobPhase::MovingLeft { timer: 0.0 };
        state.move_timer = ENEMY_MOVE_INTERVAL_MS;
    }
    // Zero jitter leaves pure pursuit.
    enemies::move_blob(&mut b, (PLAYER_X, 300.0), &config, 16.0, &mut mid_rng());
    assert_relative_eq!(b.x, 700.0 - ENEMY_SPEED * BLOB_CHASE_FACTOR, epsilon = 1e-3);
    assert_relative_eq!(b.y, 300.0, epsilon = 1e-3);
}

#[test]
fn blob_contact_hits_but_blob_survives() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut b = blob(w.player.x + 10.0, w.player.y);
    if let EnemyKind::Blob(state) = &mut b.kind {
        state.phase = BlobPhase::MovingLeft { timer: 0.0 };
    }
    w.enemies.push(b);
    w.has_blob = true;
    enemies::update(&mut w, 16.0, &mut rng);
    assert_eq!(w.enemies.len(), 1);
    assert!(w.has_blob);
    assert_eq!(w.shields, MAX_SHIELDS - 1);
}

#[test]
fn tentacles_count_only_when_enabled() {
    let w = make_world();
    let b = blob(400.0, 300.0);
    let curves = enemies::tentacle_curves(&b);
    assert_eq!(curves.len(), TENTACLE_COUNT);

    let (ex, ey) = curves[0].end;
    let mut p = w.player.clone();
    p.x = ex - p.width / 2.0;
    p.y = ey - p.height / 2.0;

    assert!(!enemies::blob_touches_player(&b, &p, false));
    assert!(enemies::blob_touches_player(&b, &p, true));
}

#[test]
fn tentacle_curve_endpoints() {
    let b = blob(400.0, 300.0);
    for curve in enemies::tentacle_curves(&b) {
        let start = curve.point_at(0.0);
        let end = curve.point_at(1.0);
        assert_abs_diff_eq!(start.0, curve.start.0, epsilon = 1e-3);
        assert_abs_diff_eq!(start.1, curve.start.1, epsilon = 1e-3);
        assert_abs_diff_eq!(end.0, curve.end.0, epsilon = 1e-3);
        assert_abs_diff_eq!(end.1, curve.end.1, epsilon = 1e-3);
    }
    assert!(enemies::tentacle_curves(&basic_enemy(0.0, 0.0)).is_empty());
}

#[test]
fn tentacle_phase_wraps() {
    let mut b = blob(400.0, 300.0);
    if let EnemyKind::Blob(state) = &mut b.kind {
        state.tentacles.phase = TAU - 0.001;
    }
    enemies::animate_tentacles(&mut b);
    let EnemyKind::Blob(state) = &b.kind else {
        unreachable!()
    };
    assert_relative_eq!(state.tentacles.phase, 0.0);
    assert_relative_eq!(state.tentacles.angle, TENTACLE_ANGLE_STEP);
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[test]
fn particles_fade_over_a_second() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    effects::create_explosion(&mut w.particles, (200.0, 200.0), Palette::Ember, 10, &mut rng);
    assert_eq!(w.particles.len(), 10);
    assert!(w.particles.iter().all(|p| p.alpha == 1.0));

    effects::update_particles(&mut w, 500.0);
    assert_eq!(w.particles.len(), 10);
    assert!(w.particles.iter().all(|p| (p.alpha - 0.5).abs() < 1e-5));

    effects::update_particles(&mut w, 500.0);
    assert!(w.particles.is_empty());
}

#[test]
fn explosion_spreads_particles_evenly() {
    let mut particles = Vec::new();
    effects::create_explosion(&mut particles, (0.0, 0.0), Palette::Grey, 8, &mut seeded_rng());
    for (i, p) in particles.iter().enumerate() {
        let speed = p.vx.hypot(p.vy);
        assert!(speed > 2.99 && speed < 6.01);
        let angle = TAU * i as f32 / 8.0;
        assert_abs_diff_eq!(p.vx / speed, angle.cos(), epsilon = 1e-4);
        assert_abs_diff_eq!(p.vy / speed, angle.sin(), epsilon = 1e-4);
    }
}

#[test]
fn stars_wrap_to_the_right() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.stars.truncate(1);
    w.stars[0] = Star {
        x: -0.5,
        y: 10.0,
        size: 1.0,
        brightness: 1.0,
    };
    effects::update_stars(&mut w, &mut rng);
    assert_relative_eq!(w.stars[0].x, SCREEN_WIDTH + 1.0);
    assert!(w.stars[0].y >= 0.0 && w.stars[0].y <= SCREEN_HEIGHT);
}

#[test]
fn stars_scroll_by_depth() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.stars.truncate(1);
    w.stars[0] = Star {
        x: 400.0,
        y: 10.0,
        size: 2.0,
        brightness: 0.4,
    };
    effects::update_stars(&mut w, &mut rng);
    assert_relative_eq!(w.stars[0].x, 400.0 - SCROLL_SPEED * 0.4);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_advances_clock() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    tick(&mut w, 16.0, &mut rng);
    tick(&mut w, 17.0, &mut rng);
    assert_relative_eq!(w.now, 33.0);
}

#[test]
fn tick_ignores_bad_delta() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    tick(&mut w, -5.0, &mut rng);
    tick(&mut w, f64::NAN, &mut rng);
    assert_relative_eq!(w.now, 0.0);
}

#[test]
fn game_over_freezes_play_and_decays_scroll() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.shields = 0;
    collision::handle_hit(&mut w, &mut rng);
    let y = w.player.y;
    let particles = w.particles.len();

    tick(&mut w, 16.0, &mut rng);
    assert_relative_eq!(w.player.y, y);
    assert_relative_eq!(w.scroll_speed, SCROLL_SPEED - SCROLL_DECAY);
    assert_eq!(w.particles.len(), particles);

    for _ in 0..1_000 {
        tick(&mut w, 16.0, &mut rng);
    }
    assert_relative_eq!(w.scroll_speed, 0.0);
    assert!(w.particles.is_empty());
    assert!(w.enemies.is_empty(), "spawner must not run after game over");
}

#[test]
fn fatal_hit_skips_rest_of_frame() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.shields = 0;
    w.enemies.push(basic_enemy(110.0, 300.0));
    w.power_ups.push(PowerUp {
        x: 105.0,
        y: 305.0,
        size: POWER_UP_SIZE,
        kind: PowerUpKind::Shield,
        pulse_timer: 0.0,
    });

    tick(&mut w, 16.0, &mut rng);
    assert!(w.is_game_over());
    assert_eq!(w.shields, 0, "power-up stage must not run after the fatal hit");
    assert_eq!(w.power_ups.len(), 1);
}

#[test]
fn long_run_keeps_invariants() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut last_now = 0.0;
    on_fire_start(&mut w);

    for frame in 0..5_000u32 {
        if frame % 25 == 0 {
            on_jump(&mut w);
        }
        tick(&mut w, 16.0, &mut rng);

        assert!(w.now >= last_now);
        last_now = w.now;
        assert!(w.shields <= MAX_SHIELDS);
        assert!(w.player.charge_level <= MAX_CHARGE);
        assert!(w.player.y + w.player.height <= SCREEN_HEIGHT + 1e-3);

        let ufos = w.enemies.iter().filter(|e| e.archetype() == Archetype::Ufo).count();
        let blobs = w.enemies.iter().filter(|e| e.archetype() == Archetype::Blob).count();
        assert!(ufos <= 1 && blobs <= 1);
        assert_eq!(w.has_ufo, ufos == 1);
        assert_eq!(w.has_blob, blobs == 1);
        assert!(w.enemies.iter().all(|e| e.health > 0));
        assert!(w.player_bullets.iter().all(|b| b.kind.from_player()));
        assert!(w.enemy_bullets.iter().all(|b| !b.kind.from_player()));

        w.drain_cues();
        if w.is_game_over() && frame % 100 == 0 {
            restart(&mut w, &mut rng);
            last_now = 0.0;
            on_fire_start(&mut w);
        }
    }
}
