//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the catalog and trending clients.
//! Each handler takes CLI args, the client it needs and Output, returns
//! ExitCode.

use serde::Serialize;
use tracing::debug;

use crate::api::{tmdb, CatalogClient, CatalogError, ImageSize, TrendingClient};
use crate::cli::{
    validate_movie_id, validate_query, ExitCode, ImageCmd, ImageResponse, InfoCmd, Output,
    PopularCmd, SearchCmd, TrendingCmd,
};
use crate::models::{format_currency, format_runtime, group_thousands, Movie, MovieResponse};

/// Map a client failure onto a semantic exit code
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::NotFound) => ExitCode::NotFound,
        Some(CatalogError::RateLimited)
        | Some(CatalogError::ServerError(_))
        | Some(CatalogError::RequestFailed(_)) => ExitCode::NetworkError,
        Some(CatalogError::InvalidResponse(_)) => ExitCode::Error,
        None if err.downcast_ref::<reqwest::Error>().is_some() => ExitCode::NetworkError,
        None => ExitCode::Error,
    }
}

/// Print data as JSON, mapping serialization failures to an error exit
fn print_json<T: Serialize>(data: T, output: &Output) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

/// Print a page of movies, one per line in text mode
fn print_movies(mut page: MovieResponse, limit: usize, output: &Output) -> ExitCode {
    page.results.truncate(limit);
    if output.json {
        return print_json(&page, output);
    }

    for movie in &page.results {
        output.line(format!("{:>8}  {}", movie.id, movie));
    }
    output.info(format!(
        "page {}/{} ({} results)",
        page.page, page.total_pages, page.total_results
    ));
    ExitCode::Success
}

// =============================================================================
// Popular Command
// =============================================================================

pub async fn popular_cmd(cmd: PopularCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info("Fetching popular movies...");

    match client.popular_movies(cmd.page).await {
        Ok(page) => print_movies(page, cmd.limit, output),
        Err(e) => output.error(format!("Popular fetch failed: {:#}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let query = match validate_query(&cmd.query) {
        Ok(query) => query,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };
    output.info(format!("Searching for: {}", query));

    match client.search_movies(query, cmd.page).await {
        Ok(page) => print_movies(page, cmd.limit, output),
        Err(e) => output.error(format!("Search failed: {:#}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let id = match validate_movie_id(&cmd.id) {
        Ok(id) => id,
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };
    output.info(format!("Getting info for: {}", id));

    match client.movie_details(id).await {
        Ok(movie) if output.json => print_json(&movie, output),
        Ok(movie) => {
            for line in info_lines(&movie, client) {
                output.line(line);
            }
            ExitCode::Success
        }
        Err(e) => {
            let code = exit_code_for(&e);
            if code == ExitCode::NotFound {
                return output.error(format!("Movie {} not found", id), code);
            }
            output.error(format!("Info fetch failed: {:#}", e), code)
        }
    }
}

/// Human-readable summary of a movie's details
pub fn info_lines(movie: &Movie, client: &CatalogClient) -> Vec<String> {
    let mut lines = vec![
        movie.to_string(),
        format!(
            "Rating:       {} ({} votes)",
            movie.rating_label(),
            group_thousands(movie.vote_count)
        ),
    ];

    let genres = movie.genre_names();
    if !genres.is_empty() {
        lines.push(format!("Genres:       {}", genres.join(", ")));
    }
    lines.push(format!(
        "Runtime:      {}",
        format_runtime(movie.runtime.unwrap_or(0))
    ));
    if !movie.release_date.is_empty() {
        lines.push(format!("Release Date: {}", movie.release_date));
    }
    lines.push(format!(
        "Budget:       {}",
        format_currency(movie.budget.unwrap_or(0))
    ));
    lines.push(format!(
        "Revenue:      {}",
        format_currency(movie.revenue.unwrap_or(0))
    ));
    if let Some(url) = client.image_url(movie.poster_path.as_deref(), ImageSize::W500) {
        lines.push(format!("Poster:       {}", url));
    }
    if !movie.overview.is_empty() {
        lines.push(String::new());
        lines.push(movie.overview.clone());
    }
    lines
}

// =============================================================================
// Trending Command
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, client: &TrendingClient, output: &Output) -> ExitCode {
    output.info("Fetching trending movies...");

    match client.trending_movies().await {
        Ok(mut movies) => {
            movies.truncate(cmd.limit);
            if output.json {
                return print_json(&movies, output);
            }
            for movie in &movies {
                output.line(movie);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Trending fetch failed: {:#}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Image Command
// =============================================================================

/// Image URLs need no API key, only the configured CDN base
pub fn image_cmd(cmd: ImageCmd, image_base_url: &str, output: &Output) -> ExitCode {
    let size = ImageSize::from(cmd.size);
    let Some(url) = tmdb::image_url(image_base_url, Some(cmd.path.trim()), size) else {
        return output.error("Image path must not be empty", ExitCode::InvalidArgs);
    };
    debug!(%url, "built image url");

    if output.json {
        return print_json(
            ImageResponse {
                path: cmd.path,
                size: size.to_string(),
                url,
            },
            output,
        );
    }
    output.line(url);
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&CatalogError::NotFound.into()), ExitCode::NotFound);
        assert_eq!(exit_code_for(&CatalogError::RateLimited.into()), ExitCode::NetworkError);
        assert_eq!(exit_code_for(&CatalogError::ServerError(502).into()), ExitCode::NetworkError);
        assert_eq!(
            exit_code_for(&CatalogError::InvalidResponse("bad".into()).into()),
            ExitCode::Error
        );
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), ExitCode::Error);
    }

    #[test]
    fn test_info_lines() {
        let client = CatalogClient::new("k");
        let movie = Movie {
            id: 1,
            title: "Dune".into(),
            release_date: "2021-09-15".into(),
            vote_average: 7.8,
            vote_count: 12000,
            runtime: Some(155),
            budget: Some(165_000_000),
            poster_path: Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".into()),
            ..Movie::default()
        };

        let lines = info_lines(&movie, &client);
        assert_eq!(lines[0], "Dune (2021) ★ 7.8");
        assert!(lines.contains(&"Rating:       7.8/10 (12,000 votes)".to_string()));
        assert!(lines.contains(&"Runtime:      2h 35m".to_string()));
        assert!(lines.contains(&"Revenue:      N/A".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.ends_with("/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")));
    }

    #[test]
    fn test_image_cmd_rejects_blank_path() {
        let output = Output {
            json: false,
            quiet: true,
        };
        let cmd = ImageCmd {
            path: "  ".into(),
            size: crate::cli::SizeArg::W300,
        };
        assert_eq!(
            image_cmd(cmd, "https://image.tmdb.org/t/p", &output),
            ExitCode::InvalidArgs
        );
    }
}
