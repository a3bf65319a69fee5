mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use frog_blaster::compute::{init_world, on_fire_end, on_fire_start, on_jump, restart, tick};
use frog_blaster::config::{GameConfig, DEFAULT_CONFIG_FILE};
use frog_blaster::entities::World;
use frog_blaster::error::GameError;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Without key-release events a key counts as held if its last press/repeat
/// arrived within this many frames. 36 frames @ 60 FPS ≈ 600 ms, enough to
/// bridge the usual OS delay before key-repeat starts.
const HOLD_WINDOW: u64 = 36;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, releases: bool) -> bool {
    key_frame
        .get(key)
        .map(|&last| releases || frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_fire_key(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Char('x') | KeyCode::Char('X'))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Jump and restart act on the press event itself. Fire is level-triggered:
/// the trigger is pulled on the first press and released either on a real
/// release event (keyboard-enhancement terminals) or once the key has been
/// silent for `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    releases: bool,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut firing = false;
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => on_jump(world),
                        KeyCode::Char('r') | KeyCode::Char('R') if world.is_game_over() => {
                            restart(world, &mut rng);
                            firing = false;
                            key_frame.clear();
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Fire trigger edges ────────────────────────────────────────────────
        let fire_held = is_held(&key_frame, &KeyCode::Char('x'), frame, releases)
            || is_held(&key_frame, &KeyCode::Char('X'), frame, releases);
        if fire_held && !firing {
            on_fire_start(world);
            firing = true;
        } else if !fire_held && firing {
            on_fire_end(world);
            firing = false;
            key_frame.retain(|code, _| !is_fire_key(code));
        }

        let now = Instant::now();
        let delta_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;
        tick(world, delta_ms, &mut rng);

        for cue in world.drain_cues() {
            log::debug!("sound: {}", cue.name());
        }

        display::render(out, &world.snapshot(), (frame / 6) % 2 == 0)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config() -> Result<GameConfig, GameError> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    GameConfig::load_or_default(&path)
}

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Config problems are reported before the terminal is taken over.
    let config = load_config()?;
    let mut world = init_world(config, &mut thread_rng());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events where the terminal has them.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("keyboard enhancement: {}", keyboard_enhanced);

    // Blocking event reads live on their own thread so the loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut world, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let outcome = world.outcome();
    log::info!(
        "exiting (game over: {}, score {})",
        outcome.game_over,
        outcome.final_score
    );
    result.map_err(GameError::from)
}
