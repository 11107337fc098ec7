//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.
//! `draw` is the single entry point used by the event loop.

pub mod detail;
pub mod home;
pub mod icons;
pub mod profile;
pub mod saved;
pub mod search;
pub mod theme;

pub use icons::TabIcon;
pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, InputMode, Tab};

/// Main render function - dispatches to view-specific renderers
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::PRIMARY)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

/// Logo plus the tab bar
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "MOVIE",
            Style::default().fg(Theme::WHITE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "FLEX",
            Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    frame.render_widget(tab_bar(app.active_tab()), header_chunks[1]);
}

/// Tab bar; the active tab's icon and label use the accent color
pub fn tab_bar(active: Tab) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let icon = TabIcon::for_tab(*tab);
        let style = if *tab == active {
            Theme::list_item_selected()
        } else {
            Theme::dimmed()
        };
        spans.push(Span::styled(format!("{}", i + 1), Theme::keybind()));
        spans.push(Span::styled(
            format!(" {} {} ", icon.glyph(), tab.title()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    )
}

/// Render the main content area based on current state
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.state {
        AppState::Home => home::render(frame, area, &app.home),
        AppState::Search => search::render(frame, area, &app.search, &app.input_mode),
        AppState::Saved => saved::render(frame, area),
        AppState::Profile => profile::render(frame, area, &app.stats),
        AppState::Detail => match &app.detail {
            Some(detail) => detail::render(frame, area, detail, app.catalog()),
            None => home::render(frame, area, &app.home),
        },
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::PRIMARY).bg(Theme::LIGHT_200),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::PRIMARY).bg(Theme::ACCENT),
        ),
    };

    let state_indicator = Span::styled(
        format!(" {} ", format!("{:?}", app.state).to_uppercase()),
        Style::default().fg(Theme::GRAY),
    );

    let help = match app.state {
        AppState::Home => " q:quit  1-4:tabs  ←→:section  ↵:open  r:refresh ",
        AppState::Search if app.input_mode == InputMode::Editing => " ESC:done  ^U:clear ",
        AppState::Search => " q:quit  /:type  ↵:open  r:retry ",
        AppState::Detail => " ESC:back  ↑↓:scroll  r:retry ",
        AppState::Saved | AppState::Profile => " q:quit  1-4:tabs  /:search ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        state_indicator,
        Span::raw("│"),
        Span::styled(help, Theme::keybind_desc()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
