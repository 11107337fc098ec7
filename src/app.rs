//! App state and core application logic
//!
//! Manages the screen navigation stack, owns one set of data controllers
//! per screen, and maps keyboard input onto them.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::api::{CatalogClient, TrendingClient};
use crate::controller::{Debouncer, FetchController, FetchState};
use crate::models::{Movie, MovieResponse, TrendingMovie};

/// Popular movies shown on the home screen
pub const HOME_GRID_LIMIT: usize = 12;

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Trending row and popular grid
    #[default]
    Home,
    /// Search box with live results
    Search,
    /// Saved movies
    Saved,
    /// Session profile
    Profile,
    /// Detail page for one movie
    Detail,
}

/// Root screens reachable from the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Search,
    Saved,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Search, Tab::Saved, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Saved => "Saved",
            Tab::Profile => "Profile",
        }
    }

    pub fn state(&self) -> AppState {
        match self {
            Tab::Home => AppState::Home,
            Tab::Search => AppState::Search,
            Tab::Saved => AppState::Saved,
            Tab::Profile => AppState::Profile,
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Producers
// =============================================================================

type Producer<T> = BoxFuture<'static, Result<T>>;

fn popular_producer(catalog: CatalogClient) -> impl Fn() -> Producer<MovieResponse> + Send + Sync {
    move || {
        let catalog = catalog.clone();
        async move { catalog.popular_movies(1).await }.boxed()
    }
}

fn trending_producer(trending: TrendingClient) -> impl Fn() -> Producer<Vec<TrendingMovie>> + Send + Sync {
    move || {
        let trending = trending.clone();
        async move { trending.trending_movies().await }.boxed()
    }
}

/// Blank queries resolve to an empty page without touching the network
fn search_producer(catalog: CatalogClient, query: String) -> impl Fn() -> Producer<MovieResponse> + Send + Sync {
    move || {
        let catalog = catalog.clone();
        let query = query.trim().to_string();
        async move {
            if query.is_empty() {
                return Ok(MovieResponse::empty());
            }
            catalog.search_movies(&query, 1).await
        }
        .boxed()
    }
}

fn detail_producer(catalog: CatalogClient, id: u64) -> impl Fn() -> Producer<Movie> + Send + Sync {
    move || {
        let catalog = catalog.clone();
        async move { catalog.movie_details(id).await }.boxed()
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Which home section has the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeSection {
    #[default]
    Trending,
    Popular,
}

/// Home view state
#[derive(Debug)]
pub struct HomeState {
    pub popular: FetchController<MovieResponse>,
    pub trending: FetchController<Vec<TrendingMovie>>,
    pub section: HomeSection,
    pub trending_list: ListState,
    pub popular_list: ListState,
}

impl HomeState {
    pub fn new(catalog: &CatalogClient, trending: &TrendingClient) -> Self {
        Self {
            popular: FetchController::auto(popular_producer(catalog.clone())),
            trending: FetchController::auto(trending_producer(trending.clone())),
            section: HomeSection::default(),
            trending_list: ListState::default(),
            popular_list: ListState::default(),
        }
    }

    /// Refetch both sections; resolves when both have settled
    pub fn refresh(&self) -> impl Future<Output = ()> + Send + 'static {
        let popular = self.popular.refetch();
        let trending = self.trending.refetch();
        async move {
            tokio::join!(popular, trending);
        }
    }

    /// Pull-to-refresh indicator: both sections reloading
    pub fn is_refreshing(&self) -> bool {
        self.popular.is_loading() && self.trending.is_loading()
    }

    /// Popular movies limited to the home grid
    pub fn popular_movies(&self) -> Vec<Movie> {
        self.popular
            .data()
            .map(|page| page.results.into_iter().take(HOME_GRID_LIMIT).collect())
            .unwrap_or_default()
    }

    /// Movie id under the selection in the focused section
    pub fn selected_movie_id(&self) -> Option<u64> {
        match self.section {
            HomeSection::Trending => self
                .trending
                .data()
                .and_then(|movies| movies.get(self.trending_list.selected).map(|m| m.movie.id)),
            HomeSection::Popular => self
                .popular_movies()
                .get(self.popular_list.selected)
                .map(|m| m.id),
        }
    }

    fn selected_list(&mut self) -> &mut ListState {
        match self.section {
            HomeSection::Trending => &mut self.trending_list,
            HomeSection::Popular => &mut self.popular_list,
        }
    }

    fn sync_lists(&mut self) {
        let trending_len = self.trending.data().map(|m| m.len()).unwrap_or(0);
        self.trending_list.set_len(trending_len);
        let popular_len = self.popular_movies().len();
        self.popular_list.set_len(popular_len);
    }
}

/// Search view state
#[derive(Debug)]
pub struct SearchState {
    /// Raw search query as typed
    pub query: String,
    /// Cursor position in query (in chars)
    pub cursor: usize,
    /// Settles the query before it reaches the catalog
    pub debouncer: Debouncer<String>,
    /// Results keyed by the settled query
    pub results: FetchController<MovieResponse, String>,
    /// Results list state
    pub list: ListState,
    catalog: CatalogClient,
    trending: TrendingClient,
}

impl SearchState {
    pub fn new(catalog: &CatalogClient, trending: &TrendingClient, delay: Duration) -> Self {
        let producer = search_producer(catalog.clone(), String::new());
        Self {
            query: String::new(),
            cursor: 0,
            debouncer: Debouncer::new(String::new(), delay),
            results: FetchController::new(producer, true, String::new()),
            list: ListState::default(),
            catalog: catalog.clone(),
            trending: trending.clone(),
        }
    }

    /// Settled query currently driving the results
    pub fn settled_query(&self) -> String {
        self.debouncer.value()
    }

    /// Feed the raw query through the debouncer and refetch on change
    pub fn tick(&mut self) {
        let delay = self.debouncer.delay();
        let settled = self.debouncer.update(self.query.clone(), delay);
        if settled != *self.results.deps() {
            debug!(query = %settled, "search query settled");
            let producer = search_producer(self.catalog.clone(), settled.clone());
            self.results.update(producer, settled);
            self.list.first();
        }
        let len = self.results.data().map(|page| page.results.len()).unwrap_or(0);
        self.list.set_len(len);
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.query.insert(idx, c);
        self.cursor += 1;
        self.on_query_changed();
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.query.remove(idx);
            self.on_query_changed();
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.query.chars().count() {
            let idx = self.byte_index();
            self.query.remove(idx);
            self.on_query_changed();
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.query.chars().count();
    }

    /// Clear query
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Get currently selected result
    pub fn selected_movie(&self) -> Option<Movie> {
        self.results
            .data()
            .and_then(|page| page.results.into_iter().nth(self.list.selected))
    }

    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    /// Report non-blank terms to the trending backend
    fn on_query_changed(&self) {
        let term = self.query.trim().to_string();
        if term.is_empty() {
            return;
        }
        let trending = self.trending.clone();
        tokio::spawn(async move {
            trending.track_search_term(&term, None).await;
        });
    }
}

/// Detail view state for one movie
#[derive(Debug)]
pub struct DetailState {
    pub movie_id: u64,
    pub details: FetchController<Movie, u64>,
    /// Vertical scroll of the detail body
    pub scroll: u16,
}

impl DetailState {
    pub fn new(catalog: &CatalogClient, movie_id: u64) -> Self {
        Self {
            movie_id,
            details: FetchController::new(detail_producer(catalog.clone(), movie_id), true, movie_id),
            scroll: 0,
        }
    }

    pub fn state(&self) -> FetchState<Movie> {
        self.details.state()
    }
}

/// Session counters shown on the profile screen
#[derive(Debug, Clone, Default)]
pub struct ProfileStats {
    pub movies_viewed: u32,
    pub searches: u32,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,

    // View-specific states
    pub home: HomeState,
    pub search: SearchState,
    pub detail: Option<DetailState>,
    pub stats: ProfileStats,

    catalog: CatalogClient,
}

impl App {
    /// Create the app; starts the home screen fetches, so this must run
    /// inside a tokio runtime
    pub fn new(catalog: CatalogClient, trending: TrendingClient, search_delay: Duration) -> Self {
        Self {
            state: AppState::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,

            home: HomeState::new(&catalog, &trending),
            search: SearchState::new(&catalog, &trending, search_delay),
            detail: None,
            stats: ProfileStats::default(),

            catalog,
        }
    }

    /// Catalog client shared with the screens
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Called once per event-loop iteration
    pub fn tick(&mut self) {
        self.search.tick();
        self.home.sync_lists();
    }

    /// Tab owning the current screen (Detail belongs to the tab it came from)
    pub fn active_tab(&self) -> Tab {
        let root = std::iter::once(&self.state)
            .chain(self.nav_stack.iter().rev())
            .find(|s| **s != AppState::Detail)
            .copied()
            .unwrap_or_default();
        match root {
            AppState::Search => Tab::Search,
            AppState::Saved => Tab::Saved,
            AppState::Profile => Tab::Profile,
            AppState::Home | AppState::Detail => Tab::Home,
        }
    }

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state);
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Switch to a root tab, discarding any detail page
    pub fn select_tab(&mut self, tab: Tab) {
        self.nav_stack.clear();
        self.detail = None;
        self.state = tab.state();
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            if self.state == AppState::Detail {
                // Dropping the controller discards its in-flight fetch
                self.detail = None;
            }
            self.state = prev;
            true
        } else {
            false
        }
    }

    /// Open the detail page for a movie
    pub fn open_detail(&mut self, movie_id: u64) {
        debug!(movie_id, "opening detail");
        self.detail = Some(DetailState::new(&self.catalog, movie_id));
        self.stats.movies_viewed += 1;
        self.navigate(AppState::Detail);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if self.state != AppState::Search {
            self.select_tab(Tab::Search);
        }
        self.input_mode = InputMode::Editing;
    }

    /// Refresh the home screen in the background
    pub fn refresh_home(&self) {
        let refresh = self.home.refresh();
        tokio::spawn(async move {
            refresh.await;
            debug!("home refresh complete");
        });
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear();
                true
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                if !self.search.query.trim().is_empty() {
                    self.stats.searches += 1;
                }
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.select_tab(Tab::ALL[idx]);
                return true;
            }
            KeyCode::Tab => {
                let next = self.active_tab().next();
                self.select_tab(next);
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Search => self.handle_search_key(key),
            AppState::Detail => self.handle_detail_key(key),
            AppState::Saved | AppState::Profile => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.home.selected_list().up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.home.selected_list().down();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.home.section = HomeSection::Trending;
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.home.section = HomeSection::Popular;
                true
            }
            KeyCode::Char('r') => {
                self.refresh_home();
                true
            }
            KeyCode::Enter => {
                if let Some(id) = self.home.selected_movie_id() {
                    self.open_detail(id);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.list.down();
                true
            }
            KeyCode::PageUp => {
                self.search.list.page_up(10);
                true
            }
            KeyCode::PageDown => {
                self.search.list.page_down(10);
                true
            }
            KeyCode::Home => {
                self.search.list.first();
                true
            }
            KeyCode::End => {
                self.search.list.last();
                true
            }
            KeyCode::Char('i') => {
                self.input_mode = InputMode::Editing;
                true
            }
            KeyCode::Char('x') => {
                self.search.clear();
                true
            }
            KeyCode::Char('r') => {
                // Retry is always explicit
                drop(self.search.results.refetch());
                true
            }
            KeyCode::Enter => {
                if let Some(movie) = self.search.selected_movie() {
                    self.open_detail(movie.id);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        let Some(detail) = self.detail.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                detail.scroll = detail.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                detail.scroll = detail.scroll.saturating_add(1);
                true
            }
            KeyCode::Char('r') => {
                drop(detail.details.refetch());
                true
            }
            KeyCode::Backspace => self.back(),
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
