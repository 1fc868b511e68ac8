use aeroflap::audio::{AudioSink, Silent, TerminalBell};
use aeroflap::core::{
    Clock, ConfigError, FrameScheduler, GameConfig, MonotonicClock, CONFIG_FILE,
    HIGH_SCORE_KEY, INPUT_POLL_MS, LOG_FILE, REALTIME_FRAME_MS, SCORES_FILE,
};
use aeroflap::game::{Game, JumpOutcome};
use aeroflap::input::{map_event, InputResult, UiState};
use aeroflap::ui::draw_ui;
use aeroflap::utils::build_info;
use aeroflap::utils::logging::init_file_logger;
use aeroflap::utils::persistence::{save_path, JsonFileStore, KeyValueStore};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Command-line options.
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    mute: bool,
    reset_high_score: bool,
}

fn print_help() {
    println!("Aeroflap - keep the plane in the air\n");
    println!("Usage: aeroflap [options]\n");
    println!("Options:");
    println!("  --seed <n>          Use a fixed seed for obstacle placement");
    println!("  --mute              Disable the terminal bell");
    println!("  --reset-high-score  Set the saved high score back to 0");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
    println!("\nControls: Space, Up or mouse click to flap; Esc twice or q to quit.");
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--mute" => options.mute = true,
            "--reset-high-score" => options.reset_high_score = true,
            "--seed" => match iter.next().and_then(|s| s.parse().ok()) {
                Some(seed) => options.seed = Some(seed),
                None => {
                    eprintln!("--seed needs a non-negative integer");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'aeroflap --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    options
}

/// Defaults, overridden by ~/.aeroflap/config.json when present.
fn load_config() -> Result<GameConfig, ConfigError> {
    match save_path(CONFIG_FILE) {
        Ok(path) => {
            if path.exists() {
                log::info!("loading config overrides from {}", path.display());
            }
            GameConfig::load(&path)
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

/// Report a rejected configuration and turn it into the process error.
fn invalid_config(e: ConfigError) -> io::Error {
    eprintln!("Invalid configuration: {}", e);
    log::error!("invalid configuration: {}", e);
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// Undo raw mode, mouse capture and the alternate screen. Every step runs
/// even when an earlier one fails; the first error is returned.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let steps = [
        disable_raw_mode(),
        terminal
            .backend_mut()
            .execute(DisableMouseCapture)
            .map(|_| ()),
        terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .map(|_| ()),
        terminal.show_cursor(),
    ];
    first_failure(steps)
}

/// Log every failed step and return the first failure.
fn first_failure(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    let mut first_error = None;
    for step in steps {
        if let Err(e) = step {
            log::warn!("terminal restore step failed: {}", e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// High-score store in the data directory, or the temp directory when the
/// home directory is unavailable.
fn open_store() -> JsonFileStore {
    match JsonFileStore::in_data_dir(SCORES_FILE) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("data directory unavailable ({}), using temp dir", e);
            JsonFileStore::open(std::env::temp_dir().join("aeroflap-scores.json"))
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if let Ok(path) = save_path(LOG_FILE) {
        // Logging is optional; the game runs without it.
        let _ = init_file_logger(&path);
    }
    log::info!("{}", build_info::version_line());

    let mut store = open_store();

    if options.reset_high_score {
        store.set(HIGH_SCORE_KEY, 0)?;
        println!("High score reset.");
        return Ok(());
    }

    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("obstacle seed {}", seed);

    let audio: Box<dyn AudioSink> = if options.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(io::stdout()))
    };

    let config = load_config().map_err(invalid_config)?;
    let mut game =
        Game::new(config, store, audio, StdRng::seed_from_u64(seed)).map_err(invalid_config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run_game(&mut terminal, &mut game, &MonotonicClock::new());

    // Restore terminal even when the loop failed
    let restored = restore_terminal(&mut terminal);

    if let Err(e) = &result {
        log::error!("game loop failed: {}", e);
    }
    result.and(restored)
}

/// Main loop: one tick+render per scheduled frame, input between frames.
fn run_game<S: KeyValueStore, A: AudioSink, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut Game<S, A, R>,
    clock: &impl Clock,
) -> io::Result<()> {
    let mut ui = UiState::new();
    let mut scheduler = FrameScheduler::new(Duration::from_millis(REALTIME_FRAME_MS));
    let idle_poll = Duration::from_millis(INPUT_POLL_MS);
    let mut needs_redraw = true;

    loop {
        let now = Instant::now();
        if scheduler.is_due(now) {
            let (status, _) = game.frame(clock.now_ms());
            scheduler.after_frame(status, now);
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| draw_ui(f, game.session(), &ui))?;
            needs_redraw = false;
        }

        if !event::poll(scheduler.poll_timeout(Instant::now(), idle_poll))? {
            continue;
        }

        let input_event = event::read()?;
        match ui.handle(map_event(&input_event)) {
            InputResult::Exit => break,
            InputResult::Jump => {
                if game.jump() == JumpOutcome::Started {
                    scheduler.request_now(Instant::now());
                }
            }
            InputResult::Continue => {}
        }
        needs_redraw = true;
    }

    log::info!("exiting with high score {}", game.session().high_score);
    Ok(())
}
