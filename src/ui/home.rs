//! Home view
//!
//! "Trending Now" ranking on top, "Latest Movies" (popular) below.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{HomeSection, HomeState, ListState};
use crate::controller::FetchState;
use crate::models::{Movie, TrendingMovie};
use crate::ui::{icons::TabIcon, Theme};

/// Render the home view
pub fn render(frame: &mut Frame, area: Rect, home: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(area);

    let refreshing = home.is_refreshing();
    render_trending(frame, chunks[0], home, refreshing);
    render_popular(frame, chunks[1], home, refreshing);
}

fn section_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(title, Theme::title()))
}

fn section_title(icon: TabIcon, name: &str, refreshing: bool) -> String {
    if refreshing {
        format!(" {} {} ⟳ ", icon.glyph(), name)
    } else {
        format!(" {} {} ", icon.glyph(), name)
    }
}

/// Loading or error placeholder; None when there is data to show
fn placeholder<T>(state: &FetchState<T>, failure: &str) -> Option<Paragraph<'static>> {
    if state.is_initial_load() {
        return Some(Paragraph::new(Span::styled("Loading...", Theme::loading())));
    }
    match (&state.data, &state.error) {
        (None, Some(err)) => Some(Paragraph::new(vec![
            Line::from(Span::styled(failure.to_string(), Theme::error())),
            Line::from(Span::styled(err.to_string(), Theme::dimmed())),
            Line::from(vec![
                Span::styled("r", Theme::keybind()),
                Span::styled(" retry", Theme::keybind_desc()),
            ]),
        ])),
        (None, None) => Some(Paragraph::new(Span::styled(
            "Nothing here yet",
            Theme::dimmed(),
        ))),
        _ => None,
    }
}

/// Keeps the stale list on screen and reports the failed refresh in the bottom border
fn with_refresh_error<T>(block: Block<'static>, state: &FetchState<T>) -> Block<'static> {
    match &state.error {
        Some(err) => block.title_bottom(Line::from(vec![
            Span::styled(format!(" ⚠ {} ", err), Theme::error()),
            Span::styled("r", Theme::keybind()),
            Span::styled(" retry ", Theme::keybind_desc()),
        ])),
        None => block,
    }
}

fn render_trending(frame: &mut Frame, area: Rect, home: &HomeState, refreshing: bool) {
    let focused = home.section == HomeSection::Trending;
    let block = section_block(
        section_title(TabIcon::Trending, "Trending Now", refreshing),
        focused,
    );
    let state = home.trending.state();

    if let Some(placeholder) = placeholder(&state, "Failed to load trending movies") {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let block = with_refresh_error(block, &state);
    let movies = state.data.unwrap_or_default();
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = visible_rows(&movies, &home.trending_list, visible)
        .map(|(i, movie)| trending_item(movie, focused && i == home.trending_list.selected))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn trending_item(movie: &TrendingMovie, selected: bool) -> ListItem<'static> {
    let rank = movie.rank.map(|r| format!("#{:<2} ", r)).unwrap_or_default();
    let title_style = if selected {
        Theme::list_item_selected()
    } else {
        Style::default().fg(Theme::LIGHT_100)
    };
    let mut spans = vec![
        Span::styled(rank, Theme::accent()),
        Span::styled(movie.title().to_string(), title_style),
    ];
    if let Some(count) = movie.search_count {
        spans.push(Span::styled(format!("  {} searches", count), Theme::dimmed()));
    }
    ListItem::new(Line::from(spans))
}

fn render_popular(frame: &mut Frame, area: Rect, home: &HomeState, refreshing: bool) {
    let focused = home.section == HomeSection::Popular;
    let block = section_block(
        section_title(TabIcon::Film, "Latest Movies", refreshing),
        focused,
    );
    let state = home.popular.state();

    if let Some(placeholder) = placeholder(&state, "Failed to load movies") {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let block = with_refresh_error(block, &state);
    let movies = home.popular_movies();
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = visible_rows(&movies, &home.popular_list, visible)
        .map(|(i, movie)| movie_item(movie, focused && i == home.popular_list.selected))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// One-line movie card: ▸ Title (Year)  ★ 7.8/10
pub fn movie_item(movie: &Movie, selected: bool) -> ListItem<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let year_str = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let title_style = if selected {
        Theme::list_item_selected()
    } else {
        Style::default().fg(Theme::LIGHT_100)
    };

    ListItem::new(Line::from(vec![
        Span::styled(marker, Theme::accent()),
        Span::styled(movie.title.clone(), title_style),
        Span::styled(year_str, Theme::year()),
        Span::raw("  "),
        Span::styled(
            format!("{} {}", TabIcon::Star.glyph(), movie.rating_label()),
            Theme::rating(movie.vote_average),
        ),
    ]))
}

/// Rows that fit the viewport, scrolled so the selection stays visible
pub fn visible_rows<'a, T>(
    items: &'a [T],
    list: &ListState,
    visible: usize,
) -> impl Iterator<Item = (usize, &'a T)> {
    let start = if visible == 0 {
        0
    } else {
        list.selected.saturating_sub(visible - 1)
    };
    items.iter().enumerate().skip(start).take(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(len: usize, selected: usize, visible: usize) -> Vec<usize> {
        let items: Vec<usize> = (0..len).collect();
        let list = ListState { selected, len };
        visible_rows(&items, &list, visible).map(|(i, _)| i).collect()
    }

    #[test]
    fn test_visible_rows_follow_selection() {
        assert_eq!(window(20, 0, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(window(20, 4, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(window(20, 12, 5), vec![8, 9, 10, 11, 12]);
        assert_eq!(window(20, 19, 5), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_visible_rows_short_list_and_zero_height() {
        assert_eq!(window(3, 2, 10), vec![0, 1, 2]);
        assert!(window(20, 7, 0).is_empty());
    }
}
