//! Movie detail view
//!
//! Title, rating, genres and overview on the left; a details grid with
//! runtime, release date, budget and revenue, followed by production
//! companies and image links.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::api::{CatalogClient, ImageSize};
use crate::app::DetailState;
use crate::models::{format_currency, format_runtime, group_thousands, Movie};
use crate::ui::{icons::TabIcon, Theme};

/// Production companies listed at most
pub const MAX_COMPANIES: usize = 6;

/// Render the detail view
pub fn render(frame: &mut Frame, area: Rect, detail: &DetailState, catalog: &CatalogClient) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" DETAIL ", Theme::title()));

    let state = detail.state();

    if state.is_initial_load() {
        let loading = Paragraph::new(Span::styled("Loading movie details...", Theme::loading()))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let Some(movie) = state.data else {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled("Failed to load movie details", Theme::error())),
        ];
        if let Some(err) = &state.error {
            text.push(Line::from(Span::styled(err.to_string(), Theme::dimmed())));
        }
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("r", Theme::keybind()),
            Span::styled(" retry  ", Theme::keybind_desc()),
            Span::styled("Esc", Theme::keybind()),
            Span::styled(" go back", Theme::keybind_desc()),
        ]));
        let failed = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(failed, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = detail_lines(&movie, catalog, inner.width);
    if let Some(err) = &state.error {
        // Refresh failed; the previous data stays visible
        lines.insert(0, Line::from(Span::styled(format!("⚠ {}", err), Theme::error())));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .scroll((detail.scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Body lines for a loaded movie
pub fn detail_lines(movie: &Movie, catalog: &CatalogClient, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("▶ ", Theme::accent()),
        Span::styled(movie.title.clone(), Theme::title()),
    ]));

    let year = movie
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(Line::from(vec![
        Span::styled(year, Theme::year()),
        Span::styled("  │  ", Theme::dimmed()),
        Span::styled(
            format!("{} {:.1}", TabIcon::Star.glyph(), movie.vote_average),
            Theme::rating(movie.vote_average),
        ),
        Span::styled(
            format!(" ({} votes)", group_thousands(movie.vote_count)),
            Theme::dimmed(),
        ),
    ]));

    let genres = movie.genre_names();
    if !genres.is_empty() {
        let mut spans = Vec::new();
        for genre in genres {
            spans.push(Span::styled(format!(" {} ", genre), Theme::genre()));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(separator(width));
    lines.push(Line::from(Span::styled("Overview", Theme::accent())));
    let overview = if movie.overview.trim().is_empty() {
        "No overview available."
    } else {
        movie.overview.as_str()
    };
    for line in overview.lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Theme::LIGHT_200),
        )));
    }

    lines.push(separator(width));
    lines.push(Line::from(Span::styled("Details", Theme::accent())));
    let release = if movie.release_date.is_empty() {
        "N/A".to_string()
    } else {
        movie.release_date.clone()
    };
    let cards = [
        (TabIcon::Clock, "Runtime", format_runtime(movie.runtime.unwrap_or(0))),
        (TabIcon::Calendar, "Release Date", release),
        (TabIcon::Dollar, "Budget", format_currency(movie.budget.unwrap_or(0))),
        (TabIcon::Dollar, "Revenue", format_currency(movie.revenue.unwrap_or(0))),
    ];
    for (icon, label, value) in cards {
        lines.push(info_card(icon, label, value));
    }

    let companies = movie.production_companies.as_deref().unwrap_or_default();
    if !companies.is_empty() {
        lines.push(separator(width));
        lines.push(Line::from(Span::styled("Production Companies", Theme::accent())));
        for company in companies.iter().take(MAX_COMPANIES) {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", TabIcon::Users.glyph()), Theme::accent()),
                Span::styled(company.name.clone(), Style::default().fg(Theme::LIGHT_100)),
            ]));
        }
    }

    let backdrop = movie.backdrop_path.as_deref().or(movie.poster_path.as_deref());
    let images = [
        ("Poster", catalog.image_url(movie.poster_path.as_deref(), ImageSize::W500)),
        ("Backdrop", catalog.image_url(backdrop, ImageSize::Original)),
    ];
    if images.iter().any(|(_, url)| url.is_some()) {
        lines.push(separator(width));
        for (label, url) in images {
            if let Some(url) = url {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<9}", label), Theme::dimmed()),
                    Span::styled(url, Theme::subtitle()),
                ]));
            }
        }
    }

    lines
}

fn info_card(icon: TabIcon, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{} ", icon.glyph()), Theme::accent()),
        Span::styled(format!("{:<14}", label), Theme::dimmed()),
        Span::styled(value, Theme::title()),
    ])
}

fn separator(width: u16) -> Line<'static> {
    Line::from(Span::styled("─".repeat(width as usize), Theme::dimmed()))
}
