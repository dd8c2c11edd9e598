//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Palette for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Escuro",
            Self::Light => "Claro",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A style for every visual role in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    // -- Category panel --
    pub category_normal: Style,
    pub category_active: Style,
    pub category_selected: Style,

    // -- Article list --
    pub featured_label: Style,
    pub featured_title: Style,
    pub article_title: Style,
    pub article_selected: Style,
    pub article_meta: Style,
    pub article_excerpt: Style,
    pub category_label: Style,
    pub saved_marker: Style,
    /// "Carregando..." and end-of-feed notices.
    pub notice: Style,

    // -- Sidebar and ticker --
    pub sidebar_heading: Style,
    pub sidebar_item: Style,
    pub trending_rank: Style,
    pub ticker_label: Style,
    pub ticker_text: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            category_normal: Style::default(),
            category_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            category_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            featured_label: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            featured_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            article_title: Style::default().add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            article_meta: Style::default().fg(Color::DarkGray),
            article_excerpt: Style::default().fg(Color::Gray),
            category_label: Style::default().fg(Color::Magenta),
            saved_marker: Style::default().fg(Color::Yellow),
            notice: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            sidebar_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sidebar_item: Style::default(),
            trending_rank: Style::default().fg(Color::Yellow),
            ticker_label: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            ticker_text: Style::default().fg(Color::White),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            category_normal: Style::default().fg(Color::Black),
            category_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            category_selected: Style::default().bg(Color::Blue).fg(Color::White),

            featured_label: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            featured_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::Blue).fg(Color::White),
            article_meta: Style::default().fg(Color::DarkGray),
            article_excerpt: Style::default().fg(Color::DarkGray),
            category_label: Style::default().fg(Color::Magenta),
            saved_marker: Style::default().fg(Color::Magenta),
            notice: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            sidebar_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sidebar_item: Style::default().fg(Color::Black),
            trending_rank: Style::default().fg(Color::Magenta),
            ticker_label: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            ticker_text: Style::default().fg(Color::Black),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}
