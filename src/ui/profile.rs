//! Profile view
//!
//! Session stat cards, a menu of upcoming features and app info.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::ProfileStats;
use crate::ui::{icons::TabIcon, Theme};

const MENU: [(TabIcon, &str); 4] = [
    (TabIcon::Settings, "Settings & Preferences"),
    (TabIcon::Star, "My Reviews & Ratings"),
    (TabIcon::Clock, "Watch History"),
    (TabIcon::Award, "Recommended for You"),
];

/// Render the profile view
pub fn render(frame: &mut Frame, area: Rect, stats: &ProfileStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(4),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", TabIcon::User.glyph()), Theme::accent()),
            Span::styled("Movie Enthusiast", Theme::title()),
        ]),
        Line::from(Span::styled("movieflex@example.com", Theme::dimmed())),
    ]);
    frame.render_widget(header, chunks[0]);

    let cards = [
        (TabIcon::Film, "Movies Viewed", stats.movies_viewed.to_string()),
        (TabIcon::Search, "Searches", stats.searches.to_string()),
    ];
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for ((icon, label, value), card_area) in cards.into_iter().zip(card_areas.iter()) {
        render_stat_card(frame, *card_area, icon, label, value);
    }

    let mut lines: Vec<Line> = MENU
        .iter()
        .map(|(icon, item)| {
            Line::from(vec![
                Span::styled(format!("{} ", icon.glyph()), Theme::accent()),
                Span::styled(*item, Style::default().fg(Theme::LIGHT_100)),
                Span::styled("  (coming soon)", Theme::dimmed()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Movie Flex", Theme::accent()),
        Span::styled(
            format!("  Version {}", env!("CARGO_PKG_VERSION")),
            Theme::dimmed(),
        ),
    ]));

    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(menu, chunks[2]);
}

fn render_stat_card(frame: &mut Frame, area: Rect, icon: TabIcon, label: &str, value: String) {
    let card = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon.glyph()), Theme::accent()),
            Span::styled(value, Theme::title()),
        ]),
        Line::from(Span::styled(label.to_string(), Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .style(Theme::card())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(card, area);
}
