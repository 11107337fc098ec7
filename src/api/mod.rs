//! API clients for external services
//!
//! - TMDB: movie catalog (popular, search, details, images)
//! - Trending: search-count ranking backend (mocked)

pub mod tmdb;
pub mod trending;

pub use tmdb::{CatalogClient, CatalogError, ImageSize};
pub use trending::TrendingClient;
