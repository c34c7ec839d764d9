mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::panic;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use space_garbage::assets::FrameSet;
use space_garbage::config::GameConfig;
use space_garbage::entities::Control;
use space_garbage::game::Game;
use space_garbage::GameError;

const USAGE: &str = "space_garbage [--config <file.json>] [--seed <n>] [--log <file>] [--show-obstacles]";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks. Covers terminals that don't emit key-release events: the
/// OS key-repeat rate outpaces a 100 ms tick, so a held key is refreshed
/// before it expires.
const HOLD_WINDOW: u64 = 2;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_tick: &HashMap<KeyCode, u64>, key: &KeyCode, tick: u64) -> bool {
    key_tick
        .get(key)
        .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_tick: &HashMap<KeyCode, u64>, keys: &[KeyCode], tick: u64) -> bool {
    keys.iter().any(|k| is_held(key_tick, k, tick))
}

/// Folds the event stream into one `Control` per tick.
struct Keyboard {
    rx: mpsc::Receiver<Event>,
    key_tick: HashMap<KeyCode, u64>,
    fired: bool,
}

impl Keyboard {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Keyboard {
            rx,
            key_tick: HashMap::new(),
            fired: false,
        }
    }

    /// Drain pending events without blocking. Quit keys end the game.
    fn poll(&mut self, tick: u64) -> Result<Control, GameError> {
        self.fired = false;
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = self.rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Err(GameError::Interrupted);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Err(GameError::Interrupted);
                        }
                        KeyCode::Char(' ') => self.fired = true,
                        _ => {}
                    }
                    self.key_tick.insert(code, tick);
                }
                KeyEventKind::Repeat => {
                    if code == KeyCode::Char(' ') {
                        self.fired = true;
                    }
                    self.key_tick.insert(code, tick);
                }
                KeyEventKind::Release => {
                    self.key_tick.remove(&code);
                }
            }
        }

        let held = |keys: &[KeyCode]| any_held(&self.key_tick, keys, tick);
        let up = held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]);
        let down = held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]);
        let left = held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        let right = held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);

        Ok(Control {
            rows: down as i32 - up as i32,
            columns: right as i32 - left as i32,
            fire: self.fired,
        })
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

fn parse_args() -> Result<GameConfig> {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut log_file: Option<PathBuf> = None;
    let mut show_obstacles = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().context(USAGE)?.into()),
            "--seed" => {
                let value = args.next().context(USAGE)?;
                seed = Some(value.parse().with_context(|| format!("bad seed `{value}`"))?);
            }
            "--log" => log_file = Some(args.next().context(USAGE)?.into()),
            "--show-obstacles" => show_obstacles = true,
            "-h" | "--help" => bail!("Usage: {USAGE}"),
            other => bail!("unknown argument `{other}`\nUsage: {USAGE}"),
        }
    }

    let mut config = match &config_path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => GameConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    if log_file.is_some() {
        config.log_file = log_file;
    }
    config.show_obstacles |= show_obstacles;
    config.validate()?;
    Ok(config)
}

/// Logs go to a file: stderr would scribble over the game screen.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Set once the terminal has been handed back, so the panic hook and the
/// guard never restore twice.
static RESTORED: AtomicBool = AtomicBool::new(false);
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

fn restore_terminal() {
    if RESTORED.swap(true, Ordering::SeqCst) {
        return;
    }
    let mut out = stdout();
    if KEYBOARD_ENHANCED.load(Ordering::SeqCst) {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Owns raw mode and the alternate screen. The terminal comes back on drop,
/// and before the panic message is printed if a behavior panics.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self> {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));

        RESTORED.store(false, Ordering::SeqCst);
        let guard = TerminalGuard;
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back gracefully.
        let enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        KEYBOARD_ENHANCED.store(enhanced, Ordering::SeqCst);
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn play<W: Write>(out: &mut W, game: &mut Game, config: &GameConfig, keyboard: &mut Keyboard) -> Result<()> {
    let mut tick: u64 = 0;
    game.scheduler
        .run(&mut game.world, config.tick_interval(), |world| {
            tick += 1;
            display::render(&mut *out, world)?;
            world.control = keyboard.poll(tick)?;
            Ok(())
        })?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(e) if matches!(e.downcast_ref::<GameError>(), Some(GameError::Interrupted)) => {
            println!("CTRL+C pressed, exiting...");
            0
        }
        Err(e) => {
            eprintln!("Something went wrong, see details below:\n<{e:#}>");
            1
        }
    };
    process::exit(code);
}

fn run() -> Result<()> {
    let config = parse_args()?;
    init_logging(&config)?;

    let frames = FrameSet::load(&config.assets_dir)
        .with_context(|| format!("Failed to load frames from {}", config.assets_dir.display()))?;
    let (columns, rows) = terminal::size()?;
    let mut game = Game::new(&config, &frames, rows, columns)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let _terminal = TerminalGuard::enter(&mut out)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut keyboard = Keyboard::new(rx);
    play(&mut out, &mut game, &config, &mut keyboard)
}
