//! anomaly-tui - Interactive shell for rolling z-score anomaly detection.

mod app;
mod event;
mod ui;
mod widgets;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use session::{Session, SessionConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use event::{handle_key_event, poll_event};
use ui::draw_ui;

#[derive(Parser, Debug)]
#[command(name = "anomaly-tui")]
#[command(about = "Interactive anomaly review for a single time series", long_about = None)]
struct Args {
    /// Tab-separated file to open on start
    file: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Log file (the terminal is busy drawing)
    #[arg(long, default_value = "anomaly-tui.log")]
    log_file: PathBuf,
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anomaly_tui=info,session=info,data_core=info".into()),
        )
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let config = SessionConfig::from_env()?;
    let mut app = App::new(Session::new(config), args.export_dir);
    if let Some(path) = &args.file {
        app.open_file(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "tui exited with error");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Draw UI
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Clear expired status messages
        app.clear_expired_status();

        // Handle events
        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            handle_key_event(app, key);
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
