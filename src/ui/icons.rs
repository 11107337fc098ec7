//! Icon glyphs
//!
//! Every icon the screens draw is a `TabIcon` variant; glyphs come from one
//! static table indexed by the variant, so an unknown icon is unrepresentable.

use crate::app::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabIcon {
    Home,
    Search,
    Bookmark,
    User,
    Settings,
    Trending,
    Star,
    Film,
    Award,
    Clock,
    Calendar,
    Dollar,
    Users,
}

/// Glyph table, in declaration order of `TabIcon`
static GLYPHS: [(TabIcon, &str); 13] = [
    (TabIcon::Home, "⌂"),
    (TabIcon::Search, "⌕"),
    (TabIcon::Bookmark, "⚑"),
    (TabIcon::User, "☺"),
    (TabIcon::Settings, "⚙"),
    (TabIcon::Trending, "↗"),
    (TabIcon::Star, "★"),
    (TabIcon::Film, "▣"),
    (TabIcon::Award, "✪"),
    (TabIcon::Clock, "◷"),
    (TabIcon::Calendar, "▦"),
    (TabIcon::Dollar, "$"),
    (TabIcon::Users, "☻"),
];

impl TabIcon {
    pub const ALL: [TabIcon; 13] = [
        TabIcon::Home,
        TabIcon::Search,
        TabIcon::Bookmark,
        TabIcon::User,
        TabIcon::Settings,
        TabIcon::Trending,
        TabIcon::Star,
        TabIcon::Film,
        TabIcon::Award,
        TabIcon::Clock,
        TabIcon::Calendar,
        TabIcon::Dollar,
        TabIcon::Users,
    ];

    pub fn glyph(self) -> &'static str {
        GLYPHS[self as usize].1
    }

    /// Icon shown in the tab bar for a root screen
    pub fn for_tab(tab: Tab) -> Self {
        match tab {
            Tab::Home => TabIcon::Home,
            Tab::Search => TabIcon::Search,
            Tab::Saved => TabIcon::Bookmark,
            Tab::Profile => TabIcon::User,
        }
    }
}
