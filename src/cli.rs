//! CLI - Command Line Interface for movieflex
//!
//! Every catalog lookup the TUI performs is scriptable. All output is
//! JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse
//! movieflex popular --limit 12
//! movieflex trending --json
//!
//! # Look up
//! movieflex search "the batman"
//! movieflex info 414906
//! movieflex image /74xTEgt7R36Fpooo50r9T25onhq.jpg --size original
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::ImageSize;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Movie not found
    NotFound = 4,
    /// Missing API key or unreadable config
    ConfigError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// movieflex - browse and search movies from the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "movieflex",
    version,
    about = "Browse, search and inspect movies from TMDB",
    long_about = "A terminal movie browser backed by The Movie Database.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.\n\
                  Requires a TMDB API key (TMDB_API_KEY or config.toml).",
    after_help = "EXAMPLES:\n\
                  movieflex                        Launch interactive TUI\n\
                  movieflex search \"blade runner\"  Search for movies\n\
                  movieflex info 335984            Show movie details\n\
                  movieflex trending --json        Most searched movies"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List popular movies
    #[command(visible_alias = "p")]
    Popular(PopularCmd),

    /// Search movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get full details for a movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Most searched movies
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Build an image URL for a poster or backdrop path
    #[command(visible_alias = "img")]
    Image(ImageCmd),
}

/// List popular movies
#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Result page (starts at 1)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Search for movies by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Result page (starts at 1)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 414906)
    #[arg(required = true)]
    pub id: String,
}

/// Most searched movies
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "5")]
    pub limit: usize,
}

/// Build an image URL
#[derive(Args, Debug)]
pub struct ImageCmd {
    /// Image path as returned by the API (e.g., /abc.jpg)
    #[arg(required = true)]
    pub path: String,

    /// Image size
    #[arg(long, short = 's', value_enum, default_value = "w500")]
    pub size: SizeArg,
}

/// Image size accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeArg {
    #[value(name = "w300")]
    W300,
    #[default]
    #[value(name = "w500")]
    W500,
    Original,
}

impl From<SizeArg> for ImageSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::W300 => ImageSize::W300,
            SizeArg::W500 => ImageSize::W500,
            SizeArg::Original => ImageSize::Original,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Envelope for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Image command response
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub path: String,
    pub size: String,
    pub url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON (wrapped in the envelope in JSON mode)
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a human-readable line (non-JSON mode)
    pub fn line(&self, msg: impl std::fmt::Display) {
        println!("{}", msg);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Argument Validation
// =============================================================================

/// Validate a TMDB movie ID (positive integer)
pub fn validate_movie_id(id: &str) -> Result<u64, &'static str> {
    match id.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("Invalid movie ID (expected a positive TMDB ID, e.g. 414906)"),
    }
}

/// Validate a non-blank search query
pub fn validate_query(query: &str) -> Result<&str, &'static str> {
    let query = query.trim();
    if query.is_empty() {
        Err("Search query must not be empty")
    } else {
        Ok(query)
    }
}

// =============================================================================
// Tests
// =============================================================================
