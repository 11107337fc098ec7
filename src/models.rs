//! Data structures for movieflex
//!
//! Shapes mirror the TMDB v3 JSON payloads so they can be deserialized
//! directly, plus the trending backend's ranked entries.
//! - **Catalog**: movies, genres, production companies, paged results
//! - **Trending**: ranked movies and search tracking outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Movie genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Studio credited on a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// A movie as returned by list, search and detail endpoints.
///
/// List endpoints only fill the summary fields; the detail endpoint adds
/// genres, runtime, budget, revenue and production companies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_companies: Option<Vec<ProductionCompany>>,
}

impl Movie {
    /// Release year from a date like "2022-03-04"
    pub fn year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }

    /// Rating as shown on cards, e.g. "7.8/10"
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Genre names, empty when the payload carried none
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|g| g.name.as_str())
            .collect()
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {:.1}", self.title, year_str, self.vote_average)
    }
}

/// One page of a paginated TMDB listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Paged movie listing (popular, search)
pub type MovieResponse = PagedResult<Movie>;

impl<T> PagedResult<T> {
    /// Empty first page, used for blank search queries
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

fn first_page() -> u32 {
    1
}

// =============================================================================
// Trending Models
// =============================================================================

/// A movie ranked by how often it was searched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingMovie {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_count: Option<u64>,
}

impl TrendingMovie {
    pub fn title(&self) -> &str {
        &self.movie.title
    }
}

impl fmt::Display for TrendingMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "#{} {}", rank, self.movie.title)?,
            None => write!(f, "{}", self.movie.title)?,
        }
        if let Some(count) = self.search_count {
            write!(f, " ({} searches)", count)?;
        }
        Ok(())
    }
}

/// Result of reporting a search term to the trending backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Format a runtime in minutes as "2h 10m"
pub fn format_runtime(minutes: u32) -> String {
    if minutes == 0 {
        return "N/A".to_string();
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Format a dollar amount with thousands separators, "N/A" for zero
pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return "N/A".to_string();
    }
    format!("${}", group_thousands(amount))
}

/// Format a count with thousands separators
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// TMDB sends `null` for some string fields that are usually present
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Tests
// =============================================================================
