//! movieflex - terminal movie browser backed by TMDB
//!
//! Popular and trending lists, debounced search-as-you-type and movie
//! details, each screen driven by its own fetch controller.
//!
//! # Modules
//!
//! - `controller` - Fetch lifecycle and debounce controllers
//! - `models` - Movie, paged listing and trending data structures
//! - `api` - Catalog (TMDB) and trending clients
//! - `config` - Config file and environment handling
//! - `app` - Application state and navigation
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable command-line mode

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use models::{Genre, Movie, MovieResponse, PagedResult, ProductionCompany, TrendingMovie};

pub use api::{CatalogClient, CatalogError, ImageSize, TrendingClient};
pub use app::{App, AppState, Tab};
pub use config::{Config, ConfigError};
pub use controller::{Debouncer, FetchController, FetchError, FetchState, Pending};
