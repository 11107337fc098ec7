//! movieflex - browse and search movies from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! movieflex
//!
//! # CLI mode (for automation)
//! movieflex search "blade runner"
//! movieflex info 78 --json
//! movieflex trending
//! ```

use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use movieflex::api::{CatalogClient, TrendingClient};
use movieflex::app::App;
use movieflex::cli::{Cli, Command, ExitCode, Output};
use movieflex::commands;
use movieflex::config::{Config, ConfigError};
use movieflex::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

const DEFAULT_LOG_FILTER: &str = "movieflex=info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(&cli);

    let config = match load_config(&cli, &output) {
        Ok(config) => config,
        Err(e) => {
            let code = output.error(e.to_string(), ExitCode::ConfigError);
            std::process::exit(code.into());
        }
    };

    if cli.is_cli_mode() {
        init_stderr_logging();
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        init_file_logging(&config);
        run_tui(&config).await
    }
}

/// Config from `--config` (must be valid) or the default path, then env.
/// Runs before logging is set up, so a broken default file is reported on stderr.
fn load_config(cli: &Cli, output: &Output) -> Result<Config, ConfigError> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            output.info(format!("warning: {}, using defaults", e));
            Config::default()
        }),
    };
    Ok(config.with_env())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// CLI mode: logs go to stderr so stdout stays parseable
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// TUI mode: logs go to a file so they don't corrupt the screen
fn init_file_logging(config: &Config) {
    let Some(path) = config.log_path() else {
        return;
    };
    let Ok(file) = open_log_file(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    let catalog = || CatalogClient::from_config(config);

    match cli.command {
        Some(Command::Popular(cmd)) => match catalog() {
            Ok(client) => commands::popular_cmd(cmd, &client, &output).await,
            Err(e) => output.error(e.to_string(), ExitCode::ConfigError),
        },

        Some(Command::Search(cmd)) => match catalog() {
            Ok(client) => commands::search_cmd(cmd, &client, &output).await,
            Err(e) => output.error(e.to_string(), ExitCode::ConfigError),
        },

        Some(Command::Info(cmd)) => match catalog() {
            Ok(client) => commands::info_cmd(cmd, &client, &output).await,
            Err(e) => output.error(e.to_string(), ExitCode::ConfigError),
        },

        Some(Command::Trending(cmd)) => {
            commands::trending_cmd(cmd, &TrendingClient::new(), &output).await
        }

        Some(Command::Image(cmd)) => commands::image_cmd(cmd, &config.image_base_url, &output),

        None => {
            // Handled by the is_cli_mode check
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    // Fail before touching the terminal so the message stays readable
    let catalog = CatalogClient::from_config(config)?;
    info!(base_url = %config.base_url, "starting TUI");

    let mut terminal = init_terminal()?;
    let mut app = App::new(catalog, TrendingClient::new(), config.debounce_delay());

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!("event loop failed: {:#}", e);
    }
    result
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Blocking poll off the runtime so fetch tasks keep progressing
        let key = tokio::task::spawn_blocking(|| -> std::io::Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = key {
            // Only handle key press events (ignore releases on Windows)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }

    Ok(())
}
