//! Trending backend (mocked)
//!
//! Serves a fixed, seeded ranking. Tracked search terms are tallied in
//! memory for inspection via `search_count` and never change the ranking.
//! Both calls stay asynchronous so screens treat this like the catalog client.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{Movie, TrackOutcome, TrendingMovie};

/// Seed ranking: (title, search count)
const SEED_TRENDING: &[(&str, u64)] = &[
    ("Top Gun: Maverick", 156),
    ("Avatar: The Way of Water", 143),
    ("Black Panther: Wakanda Forever", 128),
    ("Doctor Strange in the Multiverse of Madness", 112),
    ("Thor: Love and Thunder", 98),
];

/// Mocked trending client; clones share the same search tally
#[derive(Debug, Clone, Default)]
pub struct TrendingClient {
    searches: Arc<Mutex<HashMap<String, u64>>>,
    latency: Duration,
}

impl TrendingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` to simulate a remote backend
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Current trending movies, ranked from 1
    pub async fn trending_movies(&self) -> Result<Vec<TrendingMovie>> {
        self.simulate_latency().await;

        let movies = SEED_TRENDING
            .iter()
            .enumerate()
            .map(|(i, (title, count))| TrendingMovie {
                movie: Movie {
                    id: i as u64 + 1,
                    title: title.to_string(),
                    ..Movie::default()
                },
                rank: Some(i as u32 + 1),
                search_count: Some(*count),
            })
            .collect();
        Ok(movies)
    }

    /// Record a search term, optionally with the movie it led to
    pub async fn track_search_term(&self, term: &str, context: Option<&Movie>) -> TrackOutcome {
        self.simulate_latency().await;

        let term = term.trim();
        if term.is_empty() {
            return TrackOutcome::failed("empty search term");
        }

        let key = term.to_lowercase();
        let count = match self.searches.lock() {
            Ok(mut searches) => {
                let count = searches.entry(key).or_insert(0);
                *count += 1;
                *count
            }
            Err(_) => return TrackOutcome::failed("search tally unavailable"),
        };

        match context {
            Some(movie) => info!(term, count, movie_id = movie.id, "tracked search term"),
            None => debug!(term, count, "tracked search term"),
        }
        TrackOutcome::ok()
    }

    /// How many times a term was tracked (case-insensitive)
    pub fn search_count(&self, term: &str) -> u64 {
        self.searches
            .lock()
            .ok()
            .and_then(|s| s.get(&term.trim().to_lowercase()).copied())
            .unwrap_or(0)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
