//! Circle vs Squares - terminal entry point
//!
//! Parses the command line, sets up logging and the terminal, then runs the
//! fixed-timestep game loop until the player quits.

use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use circle_vs_squares::consts::{MAX_SUBSTEPS, SIM_DT};
use circle_vs_squares::platform::{Event, EventHandler, KeyTracker};
use circle_vs_squares::renderer;
use circle_vs_squares::sim::{Difficulty, GameEvent, GameState, tick};
use circle_vs_squares::{GameOverPolicy, Settings};

/// Target frame time (~60 FPS)
const FRAME: Duration = Duration::from_millis(16);
/// Event thread poll interval
const EVENT_POLL_MS: u64 = 5;
const LOG_FILE: &str = "circle-vs-squares.log";

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Parser, Debug)]
#[command(name = "circle-vs-squares")]
#[command(about = "Steer a circle and shoot the squares closing in on it")]
struct Args {
    /// Start playing immediately, skipping the title and difficulty screens
    #[arg(long)]
    skip_menu: bool,

    /// Difficulty preset: easy, normal or hard
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file; flags given here override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kills between shot cooldown reductions
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    cooldown_kills: Option<u32>,

    /// Let the player leave the playfield
    #[arg(long)]
    no_clamp: bool,

    /// Hide the aim direction line
    #[arg(long)]
    no_aim_line: bool,

    /// Stay on the loss screen until Enter is pressed
    #[arg(long)]
    wait_for_confirm: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{}' (easy, normal, hard)", s))
}

/// Settings file (if any) with command-line overrides applied
fn build_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if args.skip_menu {
        settings.skip_menu = true;
    }
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(kills) = args.cooldown_kills {
        settings.kills_per_cooldown_step = kills;
    }
    if args.no_clamp {
        settings.clamp_player = false;
    }
    if args.no_aim_line {
        settings.show_aim_line = false;
    }
    if args.wait_for_confirm {
        settings.game_over = GameOverPolicy::Confirm;
    }

    settings.validate()?;
    Ok(settings)
}

/// Log to a file while the terminal is in raw mode; stderr if that fails
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Could not create {}: {} (logging to stderr)", LOG_FILE, e),
    }
    builder.init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn setup_terminal() -> Result<(Tui, bool)> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

    // Release events where the terminal supports them; others fall back to
    // the hold window
    let keyboard_enhanced = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok((terminal, keyboard_enhanced))
}

fn restore_terminal(terminal: &mut Tui, keyboard_enhanced: bool) -> Result<()> {
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leaving alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

/// Totals gathered from tick events
#[derive(Debug, Default)]
struct Tally {
    shots: u32,
    kills: u32,
    mode_changes: u32,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    keys: KeyTracker,
    accumulator: f32,
    tally: Tally,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, settings),
            keys: KeyTracker::new(),
            accumulator: 0.0,
            tally: Tally::default(),
        }
    }

    /// Run simulation ticks for `dt` seconds of wall time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        if self.accumulator < SIM_DT {
            return;
        }

        // One-shot presses reach only the first substep
        let mut input = self.keys.take_input();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, SIM_DT);
            input.clear_one_shots();
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.record_events();
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
    }

    fn record_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::Shot { .. } => self.tally.shots += 1,
                GameEvent::EnemyKilled { .. } => self.tally.kills += 1,
                GameEvent::ModeChanged { .. } => self.tally.mode_changes += 1,
                _ => {}
            }
        }
    }

    fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let events = EventHandler::new(EVENT_POLL_MS);
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();

            for event in events.drain() {
                match event {
                    Event::Key(key) => {
                        if self.keys.handle_key(key) {
                            log::info!("Quit requested");
                            return Ok(());
                        }
                    }
                    Event::Resize(w, h) => log::debug!("Terminal resized to {}x{}", w, h),
                }
            }

            let dt = frame_start.duration_since(last_frame).as_secs_f32();
            last_frame = frame_start;
            self.update(dt);
            self.keys.end_frame();

            terminal
                .draw(|frame| renderer::terminal::draw(frame, &self.state))
                .context("drawing frame")?;

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME {
                std::thread::sleep(FRAME - elapsed);
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = build_settings(&args)?;

    if args.print_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    init_logging();
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!(
        "Circle vs Squares starting (seed {}, difficulty {})",
        seed,
        settings.difficulty.as_str()
    );

    let mut game = Game::new(seed, settings);
    let (mut terminal, keyboard_enhanced) = setup_terminal()?;
    let result = game.run(&mut terminal);
    let restored = restore_terminal(&mut terminal, keyboard_enhanced);
    result?;
    restored?;

    log::info!(
        "Session over: {} runs, best score {}, {} shots, {} kills, {} screen changes",
        game.state.runs,
        game.state.best_score,
        game.tally.shots,
        game.tally.kills,
        game.tally.mode_changes
    );
    Ok(())
}
