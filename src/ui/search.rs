//! Search view component
//!
//! Search input with live, debounced results.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{InputMode, SearchState};
use crate::ui::{home, icons::TabIcon, Theme};

/// Render the search view
pub fn render(frame: &mut Frame, area: Rect, search: &SearchState, input_mode: &InputMode) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    render_input(frame, chunks[0], search, *input_mode == InputMode::Editing);
    render_status(frame, chunks[1], search);
    render_results(frame, chunks[2], search);
}

fn render_input(frame: &mut Frame, area: Rect, search: &SearchState, editing: bool) {
    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(" Search Movies ", Theme::title()));

    let mut spans = vec![Span::styled(
        format!("{} ", TabIcon::Search.glyph()),
        Theme::accent(),
    )];
    if search.query.is_empty() && !editing {
        spans.push(Span::styled("Search for movies...", Theme::dimmed()));
    } else if editing {
        // Split around the cursor so it can be drawn as a block
        let (before, rest) = split_at_char(&search.query, search.cursor);
        let mut rest_chars = rest.chars();
        let at_cursor = rest_chars.next().map(String::from).unwrap_or_else(|| " ".into());
        spans.push(Span::styled(before.to_string(), Theme::input()));
        spans.push(Span::styled(at_cursor, Theme::input_cursor()));
        spans.push(Span::styled(rest_chars.as_str().to_string(), Theme::input()));
    } else {
        spans.push(Span::styled(search.query.clone(), Theme::input()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn split_at_char(s: &str, chars: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(idx)
}

fn render_status(frame: &mut Frame, area: Rect, search: &SearchState) {
    let state = search.results.state();
    let settled = search.settled_query();

    let line = if state.loading {
        Line::from(Span::styled("Searching...", Theme::loading()))
    } else if state.error.is_some() {
        Line::from(Span::styled("Search failed. Please try again.", Theme::error()))
    } else {
        match state.data {
            Some(page) if !settled.trim().is_empty() && !page.is_empty() => Line::from(Span::styled(
                format!("{} results found", page.total_results),
                Theme::subtitle(),
            )),
            _ => Line::from(""),
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_results(frame: &mut Frame, area: Rect, search: &SearchState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border());

    let state = search.results.state();
    let settled = search.settled_query();

    if settled.trim().is_empty() {
        render_empty(
            frame,
            area,
            block,
            "Search for Movies",
            "Find your favorite films, discover new releases, and explore trending content",
        );
        return;
    }

    if let (None, Some(err)) = (&state.data, &state.error) {
        let text = vec![
            Line::from(Span::styled(err.to_string(), Theme::dimmed())),
            Line::from(vec![
                Span::styled("r", Theme::keybind()),
                Span::styled(" retry", Theme::keybind_desc()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let movies = state.data.map(|page| page.results).unwrap_or_default();
    if movies.is_empty() {
        if !state.loading {
            render_empty(
                frame,
                area,
                block,
                "No Results Found",
                "Try adjusting your search terms or browse popular movies instead",
            );
        } else {
            frame.render_widget(block, area);
        }
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = home::visible_rows(&movies, &search.list, visible)
        .map(|(i, movie)| home::movie_item(movie, i == search.list.selected))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block<'static>, title: &str, subtitle: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), Theme::title())),
        Line::from(""),
        Line::from(Span::styled(subtitle.to_string(), Theme::subtitle())),
    ];
    let empty = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(empty, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_char_multibyte() {
        assert_eq!(split_at_char("amélie", 3), ("amé", "lie"));
        assert_eq!(split_at_char("abc", 10), ("abc", ""));
        assert_eq!(split_at_char("", 0), ("", ""));
    }
}
