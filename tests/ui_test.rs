//! UI rendering tests
//!
//! Renders full frames into a `TestBackend` and checks the visible text for
//! each screen's loading, error, empty and data states.

use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use movieflex::api::{CatalogClient, TrendingClient};
use movieflex::app::{App, Tab};
use movieflex::ui::{self, TabIcon, Theme};
use ratatui::{backend::TestBackend, style::Color, Terminal};
use tokio::time::sleep;

// =============================================================================
// Helpers
// =============================================================================

fn render(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn offline_app() -> App {
    let catalog = CatalogClient::with_base_url("test_key", "http://127.0.0.1:9");
    App::new(catalog, TrendingClient::new(), Duration::from_millis(10))
}

fn app_for(server: &ServerGuard) -> App {
    let catalog = CatalogClient::with_base_url("test_key", server.url());
    App::new(catalog, TrendingClient::new(), Duration::from_millis(10))
}

async fn wait_for(app: &mut App, mut done: impl FnMut(&App) -> bool) {
    for _ in 0..300 {
        app.tick();
        if done(app) {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}

const POPULAR_BODY: &str = r#"{
    "page": 1,
    "results": [
        {"id": 1, "title": "Oppenheimer", "release_date": "2023-07-19", "vote_average": 8.1, "vote_count": 8000},
        {"id": 2, "title": "Barbie", "release_date": "2023-07-19", "vote_average": 7.1, "vote_count": 7000}
    ],
    "total_pages": 1,
    "total_results": 2
}"#;

// =============================================================================
// THEME TESTS
// =============================================================================

#[test]
fn test_theme_colors_are_rgb() {
    for color in [
        Theme::PRIMARY,
        Theme::SECONDARY,
        Theme::ACCENT,
        Theme::LIGHT_100,
        Theme::LIGHT_200,
        Theme::LIGHT_300,
        Theme::DARK_100,
        Theme::DARK_200,
        Theme::WHITE,
        Theme::GRAY,
        Theme::ERROR,
        Theme::SUCCESS,
    ] {
        assert!(matches!(color, Color::Rgb(..)), "{:?} should be RGB", color);
    }
}

#[test]
fn test_rating_style_tiers_differ() {
    assert_ne!(Theme::rating(8.5), Theme::rating(3.0));
}

// =============================================================================
// CHROME
// =============================================================================

#[test]
fn test_every_tab_has_distinct_icon() {
    let mut glyphs: Vec<&str> = Tab::ALL.iter().map(|t| TabIcon::for_tab(*t).glyph()).collect();
    glyphs.sort_unstable();
    glyphs.dedup();
    assert_eq!(glyphs.len(), Tab::ALL.len());
}

#[tokio::test]
async fn test_header_and_status_bar() {
    let app = offline_app();
    let screen = render(&app, 80, 24);

    assert!(screen.contains("MOVIEFLEX"));
    for tab in Tab::ALL {
        assert!(screen.contains(tab.title()), "tab {} missing", tab.title());
    }
    assert!(screen.contains("NORMAL"));
    assert!(screen.contains("q:quit"));
}

#[tokio::test]
async fn test_small_terminal_does_not_panic() {
    let mut app = offline_app();
    render(&app, 20, 6);
    app.select_tab(Tab::Search);
    render(&app, 20, 6);
    app.open_detail(5);
    render(&app, 20, 6);
}

// =============================================================================
// HOME
// =============================================================================

#[tokio::test]
async fn test_home_initial_load_shows_loading() {
    // Spawned fetches have not run yet on the current-thread runtime
    let app = offline_app();
    let screen = render(&app, 80, 24);

    assert!(screen.contains("Trending Now"));
    assert!(screen.contains("Latest Movies"));
    assert!(screen.contains("Loading..."));
}

#[tokio::test]
async fn test_home_failure_shows_retry_hint() {
    let mut app = offline_app();
    wait_for(&mut app, |app| {
        app.home.popular.error().is_some() && app.home.trending.data().is_some()
    })
    .await;

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Failed to load movies"));
    assert!(screen.contains("retry"));
    // Failures render inside their section, never as an overlay
    assert!(!screen.contains("ERROR"));
    // Trending is local and still loads
    assert!(screen.contains("Top Gun: Maverick"));
}

#[tokio::test]
async fn test_home_refresh_failure_keeps_list_and_shows_error() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(POPULAR_BODY)
        .create_async()
        .await;

    let mut app = app_for(&server);
    wait_for(&mut app, |app| app.home.popular.data().is_some()).await;
    assert!(!render(&app, 80, 24).contains("Server error"));

    ok.remove_async().await;
    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    app.home.popular.refetch().await;
    app.tick();

    assert!(app.home.popular.data().is_some());
    assert!(app.home.popular.error().is_some());

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Oppenheimer"));
    assert!(screen.contains("Barbie"));
    assert!(screen.contains("Server error: 500"));
    assert!(screen.contains("r retry"));
}

#[tokio::test]
async fn test_home_with_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(POPULAR_BODY)
        .create_async()
        .await;

    let mut app = app_for(&server);
    wait_for(&mut app, |app| {
        app.home.popular.data().is_some() && app.home.trending.data().is_some()
    })
    .await;

    let screen = render(&app, 100, 30);
    assert!(screen.contains("Oppenheimer"));
    assert!(screen.contains("Barbie"));
    assert!(screen.contains("156 searches"));
    assert!(!screen.contains("Loading..."));
}

// =============================================================================
// SEARCH
// =============================================================================

#[tokio::test]
async fn test_search_empty_query_prompt() {
    let mut app = offline_app();
    app.focus_search();
    app.tick();

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Search Movies"));
    assert!(screen.contains("Search for Movies"));
    assert!(screen.contains("INSERT"));
}

#[tokio::test]
async fn test_search_placeholder_when_not_editing() {
    let mut app = offline_app();
    app.select_tab(Tab::Search);

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Search for movies..."));
}

#[tokio::test]
async fn test_search_no_results() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.focus_search();
    app.search.insert('z');
    wait_for(&mut app, |app| {
        app.search.settled_query() == "z"
            && !app.search.results.is_loading()
            && app.search.results.data().is_some()
    })
    .await;

    let screen = render(&app, 80, 24);
    assert!(screen.contains("No Results Found"));
}

#[tokio::test]
async fn test_search_results_and_count() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(POPULAR_BODY)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.focus_search();
    for c in "oppen".chars() {
        app.search.insert(c);
    }
    wait_for(&mut app, |app| {
        app.search.results.data().is_some_and(|page| !page.is_empty())
    })
    .await;

    let screen = render(&app, 80, 24);
    assert!(screen.contains("oppen"));
    assert!(screen.contains("2 results found"));
    assert!(screen.contains("Oppenheimer"));
}

#[tokio::test]
async fn test_search_failure_message() {
    let mut app = offline_app();
    app.focus_search();
    app.search.insert('q');
    wait_for(&mut app, |app| app.search.results.error().is_some()).await;

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Search failed. Please try again."));
}

// =============================================================================
// DETAIL
// =============================================================================

#[tokio::test]
async fn test_detail_loading_then_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/movie/361743")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "id": 361743,
                "title": "Top Gun: Maverick",
                "overview": "Maverick returns.",
                "release_date": "2022-05-24",
                "vote_average": 8.3,
                "vote_count": 7500,
                "runtime": 131,
                "budget": 170000000,
                "revenue": 1488732821,
                "genres": [{"id": 28, "name": "Action"}],
                "production_companies": [{"id": 4, "name": "Paramount", "logo_path": null}]
            }"#,
        )
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.open_detail(361743);

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Loading movie details..."));

    wait_for(&mut app, |app| {
        app.detail.as_ref().is_some_and(|d| d.details.data().is_some())
    })
    .await;

    let screen = render(&app, 100, 40);
    assert!(screen.contains("Top Gun: Maverick"));
    assert!(screen.contains("2h 11m"));
    assert!(screen.contains("$170,000,000"));
    assert!(screen.contains("$1,488,732,821"));
    assert!(screen.contains("Paramount"));
    assert!(screen.contains("7,500 votes"));
}

#[tokio::test]
async fn test_detail_failure_offers_retry_and_back() {
    let mut app = offline_app();
    app.open_detail(9);
    wait_for(&mut app, |app| {
        app.detail.as_ref().is_some_and(|d| d.details.error().is_some())
    })
    .await;

    let screen = render(&app, 80, 24);
    assert!(screen.contains("Failed to load movie details"));
    assert!(screen.contains("retry"));
    assert!(screen.contains("go back"));
}

// =============================================================================
// SAVED / PROFILE
// =============================================================================

#[tokio::test]
async fn test_saved_empty_state() {
    let mut app = offline_app();
    app.select_tab(Tab::Saved);

    let screen = render(&app, 100, 30);
    assert!(screen.contains("No Saved Movies Yet"));
}

#[tokio::test]
async fn test_profile_shows_session_stats() {
    let mut app = offline_app();
    app.open_detail(1);
    app.open_detail(2);
    app.select_tab(Tab::Profile);

    let screen = render(&app, 100, 30);
    assert!(screen.contains("Movie Enthusiast"));
    assert!(screen.contains("Movies Viewed"));
    assert!(screen.contains("Searches"));
    assert_eq!(app.stats.movies_viewed, 2);
}
