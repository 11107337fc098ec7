//! Dark violet theme for movieflex
//!
//! Color palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Dark violet color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Primary: #030014 (near-black violet, app background)
    pub const PRIMARY: Color = Color::Rgb(0x03, 0x00, 0x14);

    /// Secondary: #151312 (warm black)
    pub const SECONDARY: Color = Color::Rgb(0x15, 0x13, 0x12);

    /// Accent: #AB8BFF (lavender)
    pub const ACCENT: Color = Color::Rgb(0xab, 0x8b, 0xff);

    /// Light 100: #D6C7FF (body text)
    pub const LIGHT_100: Color = Color::Rgb(0xd6, 0xc7, 0xff);

    /// Light 200: #A8B5DB (secondary text)
    pub const LIGHT_200: Color = Color::Rgb(0xa8, 0xb5, 0xdb);

    /// Light 300: #9CA4AB (metadata)
    pub const LIGHT_300: Color = Color::Rgb(0x9c, 0xa4, 0xab);

    /// Dark 100: #221F3D (cards)
    pub const DARK_100: Color = Color::Rgb(0x22, 0x1f, 0x3d);

    /// Dark 200: #0F0D23 (panels)
    pub const DARK_200: Color = Color::Rgb(0x0f, 0x0d, 0x23);

    pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Gray: #8E8E93 (muted)
    pub const GRAY: Color = Color::Rgb(0x8e, 0x8e, 0x93);

    /// Error: #FF3B30
    pub const ERROR: Color = Color::Rgb(0xff, 0x3b, 0x30);

    /// Success: #34C759
    pub const SUCCESS: Color = Color::Rgb(0x34, 0xc7, 0x59);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::LIGHT_100).bg(Self::PRIMARY)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text (subtitles, descriptions)
    pub fn subtitle() -> Style {
        Style::default().fg(Self::LIGHT_200)
    }

    /// Accent text style
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::GRAY)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::DARK_100)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Card background
    pub fn card() -> Style {
        Style::default().fg(Self::LIGHT_100).bg(Self::DARK_100)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::WHITE).bg(Self::DARK_200)
    }

    /// Style for input cursor
    pub fn input_cursor() -> Style {
        Style::default().fg(Self::PRIMARY).bg(Self::ACCENT)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::GRAY)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::LIGHT_200).bg(Self::DARK_200)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::LIGHT_300)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::ACCENT).bg(Self::DARK_100)
    }

    /// Rating color by score
    pub fn rating(rating: f32) -> Style {
        if rating >= 7.5 {
            Self::success()
        } else if rating >= 6.0 {
            Style::default().fg(Self::ACCENT)
        } else {
            Self::dimmed()
        }
    }
}
