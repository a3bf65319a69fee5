//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and a read-only snapshot of the
//! world. World coordinates are in pixels; a `Viewport` maps them onto the
//! terminal cells inside the border.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use frog_blaster::compute::enemies::tentacle_curves;
use frog_blaster::constants::MAX_CHARGE;
use frog_blaster::entities::{
    Bullet, BulletKind, Enemy, EnemyKind, ExplosionParticle, Obstacle, Palette, PowerUp,
    PowerUpKind, Snapshot, Star, WeaponKind,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SHIELDS: Color = Color::Cyan;
const C_HUD_WEAPON: Color = Color::White;
const C_CHARGE: Color = Color::Magenta;
const C_PLAYER: Color = Color::Green;
const C_PLAYER_BLINK: Color = Color::DarkGreen;
const C_ENEMY_BASIC: Color = Color::Red;
const C_ENEMY_UFO: Color = Color::Grey;
const C_ENEMY_BLOB: Color = Color::Magenta;
const C_TENTACLE: Color = Color::DarkMagenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Red;
const C_TOWER: Color = Color::DarkGrey;
const C_WINDOW_LIT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world pixels onto the play area: columns `1..cols-1`, rows `2..rows-2`.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Viewport {
            cols,
            rows,
            sx: inner_w / world_w.max(1.0),
            sy: inner_h / world_h.max(1.0),
        }
    }

    /// Terminal cell for a world point, or `None` outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = 1.0 + x * self.sx;
        let row = 2.0 + y * self.sy;
        let in_cols = col >= 1.0 && col < self.cols.saturating_sub(1) as f32;
        let in_rows = row >= 2.0 && row < self.rows.saturating_sub(2) as f32;
        (in_cols && in_rows).then(|| (col as u16, row as u16))
    }

    fn row_of(&self, y: f32) -> f32 {
        2.0 + y * self.sy
    }
}

fn put<W: Write>(out: &mut W, at: Option<(u16, u16)>, color: Color, glyph: &str) -> std::io::Result<()> {
    if let Some((col, row)) = at {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `blink` toggles the invulnerability flicker.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot<'_>, blink: bool) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, snap.width, snap.height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, snap, &view)?;

    for star in snap.stars {
        draw_star(out, star, &view)?;
    }
    for obstacle in snap.obstacles {
        draw_obstacle(out, obstacle, snap.height, &view)?;
    }
    for power_up in snap.power_ups {
        draw_power_up(out, power_up, &view)?;
    }
    for enemy in snap.enemies {
        draw_enemy(out, enemy, &view)?;
    }
    for bullet in snap.player_bullets.iter().chain(snap.enemy_bullets) {
        draw_bullet(out, bullet, &view)?;
    }

    if !snap.game_over {
        draw_player(out, snap, &view, blink)?;
    }
    for particle in snap.particles {
        draw_particle(out, particle, &view)?;
    }

    draw_controls_hint(out, &view)?;

    if snap.game_over {
        draw_game_over(out, snap, &view)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot<'_>, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snap.score)))?;

    // Weapon and ammo in the centre, with a charge meter for the charge gun
    let weapon = &snap.player.weapon;
    let weapon_str = match weapon.kind {
        WeaponKind::Default => "[ BLASTER ]".to_string(),
        WeaponKind::FastLaser => format!("[ LASER {:>3} ]", weapon.ammo),
        WeaponKind::ChargeGun => format!("[ CHARGE {:>3} ]", weapon.ammo),
    };
    let mut centre = weapon_str;
    if weapon.kind == WeaponKind::ChargeGun {
        let filled = ((snap.player.charge_level / MAX_CHARGE) * 10.0).round() as usize;
        centre.push_str(&format!(
            " {}{}",
            "▮".repeat(filled.min(10)),
            "▯".repeat(10 - filled.min(10))
        ));
    }
    let cx = (view.cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(if snap.player.is_charging {
        C_CHARGE
    } else {
        C_HUD_WEAPON
    }))?;
    out.queue(Print(&centre))?;

    let filled = snap.shields as usize;
    let empty = snap.max_shields.saturating_sub(snap.shields) as usize;
    let shields_str = format!("Shields:{}{}", "◆".repeat(filled), "◇".repeat(empty));
    let rx = view
        .cols
        .saturating_sub(shields_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELDS))?;
    out.queue(Print(&shields_str))?;

    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_star<W: Write>(out: &mut W, star: &Star, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = if star.brightness > 0.6 {
        ("*", Color::White)
    } else if star.brightness > 0.3 {
        ("·", Color::Grey)
    } else {
        ("·", Color::DarkGrey)
    };
    put(out, view.cell(star.x, star.y), color, glyph)
}

/// Both towers of a pillar pair, with lit windows picked out in yellow.
fn draw_obstacle<W: Write>(
    out: &mut W,
    obstacle: &Obstacle,
    world_h: f32,
    view: &Viewport,
) -> std::io::Result<()> {
    let x0 = obstacle.x;
    let x1 = obstacle.x + obstacle.width;
    let top_end = view.row_of(obstacle.top_height);
    let bottom_start = view.row_of(obstacle.bottom_y);
    let step = 1.0 / view.sx;

    let mut x = x0;
    while x < x1 {
        for row in 2..view.rows.saturating_sub(2) {
            let r = row as f32;
            if r < top_end || r >= bottom_start {
                let y = (r - 2.0) / view.sy;
                put(out, view.cell(x, y.min(world_h - 1.0)), C_TOWER, "█")?;
            }
        }
        x += step;
    }

    // Windows sit on a fixed grid inside the bottom tower.
    for window in obstacle.windows.iter().filter(|w| w.lit) {
        let wx = x0 + (window.col as f32 + 0.5) * obstacle.width / 3.0;
        let wy = obstacle.bottom_y + 10.0 + window.row as f32 * 20.0;
        if wy < world_h {
            put(out, view.cell(wx, wy), C_WINDOW_LIT, "▪")?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    view: &Viewport,
    blink: bool,
) -> std::io::Result<()> {
    let p = snap.player;
    let color = if snap.invulnerable && blink {
        C_PLAYER_BLINK
    } else {
        C_PLAYER
    };
    //  ◉◉   ← eyes
    //  ▙▟>  ← body with blaster
    put(out, view.cell(p.x, p.y), color, "◉◉")?;
    put(out, view.cell(p.x, p.y + p.height / 2.0), color, "▙▟>")
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let at = view.cell(enemy.x, enemy.y);
    match &enemy.kind {
        EnemyKind::Moving | EnemyKind::Drifting => put(out, at, C_ENEMY_BASIC, "◄▓"),
        EnemyKind::Ufo(_) => {
            put(out, at, C_ENEMY_UFO, "▁▄▁")?;
            put(out, view.cell(enemy.x, enemy.y + enemy.height / 2.0), C_ENEMY_UFO, "◖═◗")
        }
        EnemyKind::Blob(_) => {
            for curve in tentacle_curves(enemy) {
                for i in 1..=4 {
                    let (tx, ty) = curve.point_at(i as f32 / 4.0);
                    put(out, view.cell(tx, ty), C_TENTACLE, "~")?;
                }
            }
            put(out, at, C_ENEMY_BLOB, "(◎◎)")?;
            put(out, view.cell(enemy.x, enemy.y + enemy.height / 2.0), C_ENEMY_BLOB, "(▓▓)")
        }
    }
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: &Viewport) -> std::io::Result<()> {
    let glyph = match bullet.kind {
        BulletKind::Default => "─",
        BulletKind::Laser => "═",
        BulletKind::Charge => "●",
        BulletKind::Normal => "-",
        BulletKind::Ufo => "•",
        BulletKind::Blob => "○",
    };
    // Charge shots keep the meter colour; other shots are coloured by owner.
    let color = match bullet.kind {
        BulletKind::Charge => C_CHARGE,
        kind if kind.from_player() => C_BULLET_PLAYER,
        BulletKind::Ufo => C_ENEMY_UFO,
        BulletKind::Blob => C_ENEMY_BLOB,
        _ => C_BULLET_ENEMY,
    };
    put(out, view.cell(bullet.x, bullet.y), color, glyph)
}

/// Symbols:
///   S  (cyan)     Shield:     +1 shield and a grace window
///   L  (yellow)   FastLaser:  rapid fire, limited ammo
///   C  (magenta)  ChargeGun:  hold to charge, release for a burst
fn draw_power_up<W: Write>(out: &mut W, power_up: &PowerUp, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = match power_up.kind {
        PowerUpKind::Shield => ("S", Color::Cyan),
        PowerUpKind::FastLaser => ("L", Color::Yellow),
        PowerUpKind::ChargeGun => ("C", Color::Magenta),
    };
    // Pulse between bracketed and bare every 250 ms.
    let label = if (power_up.pulse_timer / 250.0) as u64 % 2 == 0 {
        format!("[{}]", glyph)
    } else {
        format!(" {} ", glyph)
    };
    put(out, view.cell(power_up.x, power_up.y), color, &label)
}

fn draw_particle<W: Write>(
    out: &mut W,
    particle: &ExplosionParticle,
    view: &Viewport,
) -> std::io::Result<()> {
    let color = match particle.palette {
        Palette::Grey if particle.tint > 0.5 => Color::White,
        Palette::Grey => Color::Grey,
        Palette::Purple if particle.tint > 0.5 => Color::Magenta,
        Palette::Purple => Color::DarkMagenta,
        Palette::Ember if particle.tint > 0.5 => Color::Yellow,
        Palette::Ember => Color::Red,
    };
    let glyph = if particle.alpha > 0.6 {
        "✶"
    } else if particle.alpha > 0.3 {
        "*"
    } else {
        "."
    };
    put(out, view.cell(particle.x, particle.y), color, glyph)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Jump   X : Fire (hold to charge)   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot<'_>, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", snap.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = view.cols / 2;
    let total_rows = lines.len() + 2;
    let start_row = (view.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
