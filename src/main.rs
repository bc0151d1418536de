use std::collections::HashMap;
use std::env;
use std::io;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vibe_shooter::config::{CliArgs, GameConfig};
use vibe_shooter::game::{FixedRateClock, Game, TickOutcome, UnthrottledClock};
use vibe_shooter::presentation::{Presentation, TerminalAudio};
use vibe_shooter::rendering::{OutputTarget, ScreenBuffer, TerminalCanvas};
use vibe_shooter::terminal_io::{Command, KeyState, SimulatedInput, TerminalInput, TickInput};

const TITLE_SCREEN: [&str; 7] = [
    "V I B E - S H O O T E R",
    "",
    "arrows/WASD move    z or Shift boost    space fire    x spread",
    "h hyper mode (100 pts)    Tab gravity field (50 pts)",
    "q quit",
    "",
    "Press any key to start...",
];

/// Headless runs stop here unless a frame cap was given.
const DEMO_FRAMES: u64 = 120;

fn main() -> io::Result<()> {
    if let Err(e) = simple_logging::log_to_file("vibe-shooter.log", LevelFilter::Info) {
        eprintln!("Could not open vibe-shooter.log: {}", e);
    }
    info!("Starting vibe-shooter.");

    let args: Vec<String> = env::args().collect();
    let cli = CliArgs::parse(&args);
    let config = GameConfig::default();
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("RNG seed {}", seed);
    let rng = StdRng::seed_from_u64(seed);

    match cli.debug {
        Some((width, height)) => run_debug(width, height, cli.max_frames.unwrap_or(DEMO_FRAMES), config, rng),
        None => run_terminal(cli.max_frames, config, rng),
    }
}

/// Scripted input: walk right firing, spread shot, then drift up-left.
fn demo_script() -> SimulatedInput {
    let mut events = HashMap::new();
    events.insert(1, TickInput::command(Command::Fire));
    events.insert(15, TickInput::command(Command::SpreadFire));
    events.insert(45, TickInput::command(Command::Fire));
    SimulatedInput::new(events)
        .hold(2..30, KeyState { right: true, ..KeyState::default() })
        .hold(30..40, KeyState { up: true, left: true, boost: true, ..KeyState::default() })
}

fn run_debug(width: u16, height: u16, max_frames: u64, config: GameConfig, rng: StdRng) -> io::Result<()> {
    info!("Debug mode enabled.");
    info!("Debug resolution set to {}x{}", width, height);
    let target = OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height));
    let canvas = TerminalCanvas::new(width, height, target, config.arena);
    let mut presentation = Presentation::new(TerminalAudio::new(false), canvas);

    let mut game = Game::new(config, rng);
    let outcome = game.run(&mut demo_script(), &mut presentation, &mut UnthrottledClock::default(), Some(max_frames))?;
    info!(
        "Debug run ended with {:?} after {} ticks, score {}",
        outcome,
        game.tick(),
        game.world.score.value()
    );
    Ok(())
}

fn run_terminal(max_frames: Option<u64>, config: GameConfig, rng: StdRng) -> io::Result<()> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    info!("Raw mode enabled.");

    let result = play(max_frames, config, rng);
    let restored = restore_terminal();
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    result.and(restored)
}

fn play(max_frames: Option<u64>, config: GameConfig, rng: StdRng) -> io::Result<()> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let mut target = OutputTarget::Stdout(io::stdout());
    target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    let mut canvas = TerminalCanvas::new(width, height, target, config.arena);
    canvas.clear_screen().map_err(|e| { error!("Failed to clear screen: {}", e); e })?;

    canvas.show_message(&TITLE_SCREEN)?;
    info!("Title screen displayed. Waiting for key press.");
    wait_for_key()?;
    canvas.clear_screen()?;

    let mut clock = FixedRateClock::for_config(&config);
    let mut presentation = Presentation::new(TerminalAudio::new(true), canvas);
    let mut game = Game::new(config, rng);
    let outcome = game.run(&mut TerminalInput::new(), &mut presentation, &mut clock, max_frames)?;
    info!("Game loop ended with {:?} after {} ticks.", outcome, game.tick());

    let headline = match outcome {
        TickOutcome::Victory => "VICTORY!",
        TickOutcome::GameOver => "GAME OVER!",
        TickOutcome::Quit | TickOutcome::Continue => "Thanks for playing",
    };
    let score_line = format!("Final Score: {}", game.world.score.value());
    presentation
        .render
        .show_message(&[headline, "", score_line.as_str(), "", "Press any key to exit..."])?;
    wait_for_key()?;
    info!("Final key pressed. Exiting application.");
    Ok(())
}

/// Discards buffered input, then blocks for a fresh key press.
fn wait_for_key() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    loop {
        if let Event::Key(key) = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })
}
