mod ui;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_scene::core::{SceneConfig, CONFIG_FILE, FRAME_INTERVAL_MS, LOG_FILE};
use flappy_scene::engine::ArcadeEngine;
use flappy_scene::scene::{PlayScene, SceneEvent, ScenePhase};
use flappy_scene::score::{BestScoreStore, JsonBestScoreStore, MemoryBestScoreStore};
use flappy_scene::utils::persistence::save_path;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Scene = PlayScene<ArcadeEngine, Box<dyn BestScoreStore>, ThreadRng>;

/// Longest frame step; keeps the bird from tunnelling after a stall.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Log to ~/.flappy/flappy.log so output does not tear the TUI.
/// Level comes from RUST_LOG, default `warn`.
fn init_logging() {
    let Ok(path) = save_path(LOG_FILE) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn open_store() -> Box<dyn BestScoreStore> {
    match JsonBestScoreStore::in_flappy_dir() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "best score storage disabled for this session");
            Box::new(MemoryBestScoreStore::default())
        }
    }
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("flappy {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy - side-scrolling bird game for the terminal\n");
                println!("Usage: flappy\n");
                println!("Controls:");
                println!("  Space / Up / click  Flap");
                println!("  P / Esc             Pause");
                println!("  P / Enter           Resume from pause");
                println!("  Q                   Quit\n");
                println!("Files (in ~/.flappy/):");
                println!("  {:<16} scene tuning, optional", CONFIG_FILE);
                println!("  best_score.json  best score");
                println!("  {:<16} log, level set by RUST_LOG", LOG_FILE);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();

    let config = match SceneConfig::load_or_default(save_path(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid config in ~/.flappy/{}: {}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    let engine = ArcadeEngine::new(&config);
    let mut scene: Scene = PlayScene::new(config, engine, open_store(), rand::thread_rng());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut scene);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(runs = scene.runs(), "exiting");
    result
}

/// Pause button / pause menu handling.
fn toggle_pause(scene: &mut Scene) {
    if scene.phase() == ScenePhase::Paused {
        scene.engine_mut().close_pause_menu();
        scene.resume();
    } else {
        scene.request_pause();
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, scene: &mut Scene) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| {
            let area = f.size();
            ui::render_play_scene(f, area, &*scene);
        })?;

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up => {
                        scene.flap();
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => toggle_pause(scene),
                    KeyCode::Enter if scene.phase() == ScenePhase::Paused => toggle_pause(scene),
                    _ => {}
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    scene.flap();
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame_interval {
            last_frame = Instant::now();
            for event in scene.frame(elapsed.min(MAX_FRAME_STEP)) {
                if let SceneEvent::GameOver { cause, score } = event {
                    info!(?cause, score, "run ended");
                }
            }
        }
    }
}
