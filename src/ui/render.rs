//! Render functions for the TUI.
//!
//! This module handles the screen layout and dispatches each panel to its
//! widget module.

use crate::app::App;
use crate::theme::ColorPalette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{articles, categories, help, sidebar, status, ticker};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Layout, top to bottom: headline ticker (only when it has headlines), the
/// three panels, status bar. The help overlay draws on top of everything.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Pequeno demais")
        } else {
            Paragraph::new(format!(
                "Terminal pequeno demais\n\nMínimo: {}x{}\nAtual: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let palette = app.session.theme().palette();
    let headlines = app.session.ticker_headlines();
    let ticker_height = if headlines.is_empty() { 0 } else { 1 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ticker_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    if !headlines.is_empty() {
        ticker::render(f, &palette, &headlines, app.ticker_offset, chunks[0]);
    }
    render_main_panels(f, app, &palette, chunks[1]);
    status::render(f, app, &palette, chunks[2]);

    if app.show_help {
        help::render(f, app, &palette);
    }
}

/// Three columns: categories | articles | sidebar.
///
/// The sidebar is dropped on narrow terminals.
fn render_main_panels(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    if area.width >= 100 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Min(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        categories::render(f, app, palette, chunks[0]);
        articles::render(f, app, palette, chunks[1]);
        sidebar::render(f, app, palette, chunks[2]);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(0)])
            .split(area);

        categories::render(f, app, palette, chunks[0]);
        articles::render(f, app, palette, chunks[1]);
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::app::test_support::{load, test_app};
    use crate::news::{fallback_articles, SAVED_SLUG};
    use ratatui::{backend::TestBackend, Terminal};

    /// Render `app` into a `width`x`height` buffer and return its rows.
    pub(in crate::ui) fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_too_small_terminal_shows_message() {
        let (app, _rx) = test_app();
        let rows = draw(&app, 40, 8);
        assert!(rows.iter().any(|r| r.contains("Terminal pequeno demais")));
    }

    #[test]
    fn test_ticker_shown_above_loaded_feed() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        let rows = draw(&app, 120, 30);
        assert!(rows[0].contains("URGENTE"));
    }

    #[test]
    fn test_ticker_hidden_in_saved_view() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        app.session.toggle_save_at(1);
        app.select_category(SAVED_SLUG);

        let rows = draw(&app, 120, 30);
        assert!(rows.iter().all(|r| !r.contains("URGENTE")));
        assert!(rows.iter().any(|r| r.contains("Artigos Salvos")));
    }

    #[test]
    fn test_sidebar_only_on_wide_terminals() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        assert!(draw(&app, 120, 30).iter().any(|r| r.contains("Em Alta")));
        assert!(draw(&app, 80, 30).iter().all(|r| !r.contains("Em Alta")));
    }

    #[test]
    fn test_help_overlay_lists_bindings() {
        let (mut app, _rx) = test_app();
        app.show_help = true;
        let rows = draw(&app, 100, 40);
        assert!(rows.iter().any(|r| r.contains("Ajuda")));
        assert!(rows.iter().any(|r| r.contains("Salvar / remover dos salvos")));
    }
}
