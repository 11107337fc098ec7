//! Saved movies view
//!
//! Bookmarks are not persisted yet; this renders the empty state.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::ui::{icons::TabIcon, Theme};

const FEATURES: [(TabIcon, &str); 3] = [
    (TabIcon::Star, "Save movies for later viewing"),
    (TabIcon::Bookmark, "Create your personal watchlist"),
    (TabIcon::Award, "Mark your all-time favorites"),
];

/// Render the saved view
pub fn render(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" {} Saved Movies ", TabIcon::Bookmark.glyph()),
            Theme::title(),
        ));

    let mut lines = vec![
        Line::from(Span::styled("Your favorite films in one place", Theme::subtitle())),
        Line::from(""),
        Line::from(Span::styled("No Saved Movies Yet", Theme::title())),
        Line::from(Span::styled(
            "Start exploring and save your favorite movies to build your personal collection.",
            Theme::dimmed(),
        )),
        Line::from(""),
    ];
    for (icon, feature) in FEATURES {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icon.glyph()), Theme::accent()),
            Span::styled(feature, Style::default().fg(Theme::LIGHT_100)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Coming soon: full bookmark support",
        Theme::accent(),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
