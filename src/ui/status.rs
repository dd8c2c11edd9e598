use crate::app::{App, Focus};
use crate::theme::ColorPalette;
use crate::util::strip_control_chars;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if app.search_mode {
        Cow::Owned(format!(
            "Buscar: {}_  (Enter confirma, Esc cancela)",
            strip_control_chars(&app.search_input)
        ))
    } else if let Some(msg) = app.status_text() {
        strip_control_chars(msg)
    } else {
        match app.focus {
            Focus::Categories => Cow::Borrowed(
                "[Enter]abrir [Tab]notícias [/]buscar [S]salvos [t]ema [?]ajuda [q]sair",
            ),
            Focus::Articles => Cow::Borrowed(
                "[s]alvar [o]abrir [m]ais [Tab]categorias [/]buscar [S]salvos [?]ajuda [q]sair",
            ),
        }
    };

    f.render_widget(Paragraph::new(text).style(palette.status_bar), area);
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::test_app;
    use crate::ui::render::tests::draw;

    #[test]
    fn test_status_message_replaces_hints() {
        let (mut app, _rx) = test_app();
        let rows = draw(&app, 100, 20);
        assert!(rows[19].contains("[s]alvar"));

        app.set_status("Tema: Claro");
        let rows = draw(&app, 100, 20);
        assert!(rows[19].starts_with("Tema: Claro"));
    }

    #[test]
    fn test_search_input_is_echoed() {
        let (mut app, _rx) = test_app();
        app.search_mode = true;
        app.search_input = "eleições".to_string();
        let rows = draw(&app, 100, 20);
        assert!(rows[19].starts_with("Buscar: eleições_"));
    }
}
