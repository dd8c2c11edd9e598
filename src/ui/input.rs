//! Input handling for the TUI.
//!
//! Processes keyboard input and dispatches to the appropriate handler based
//! on the current mode and panel focus.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::{category_menu, App, Focus};
use crate::feed::FeedView;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::news::{ALL_SLUG, SAVED_SLUG};
use crate::util::{validate_url_for_open, MAX_SEARCH_QUERY_LENGTH};

use super::Action;

/// Map the current focus panel to a keybinding context.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Categories => KbContext::Categories,
        Focus::Articles => KbContext::ArticleList,
    }
}

/// Main input dispatch function.
///
/// `opener` hands a validated URL to the system browser; the event loop
/// passes [`open_in_browser`].
pub(super) fn handle_input<O>(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    opener: O,
) -> Action
where
    O: FnOnce(&str) -> std::io::Result<()>,
{
    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.search_mode {
        handle_search_input(app, code);
        return Action::Continue;
    }

    let context = focus_to_context(app.focus);
    match app.keybindings.action_for_key(code, modifiers, context) {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::CycleFocus) => {
            app.focus = match app.focus {
                Focus::Categories => Focus::Articles,
                Focus::Articles => Focus::Categories,
            };
        }
        Some(KbAction::Back | KbAction::Home) => app.select_category(ALL_SLUG),
        Some(KbAction::Select) => match app.focus {
            Focus::Categories => {
                if let Some((slug, _)) = category_menu().nth(app.selected_category) {
                    app.select_category(slug);
                    app.focus = Focus::Articles;
                }
            }
            Focus::Articles => handle_open(app, opener),
        },
        Some(KbAction::ShowSaved) => app.select_category(SAVED_SLUG),
        Some(KbAction::ToggleSave) => handle_save(app),
        Some(KbAction::EnterSearch) => {
            app.search_mode = true;
            app.search_input.clear();
        }
        Some(KbAction::OpenInBrowser) => handle_open(app, opener),
        Some(KbAction::LoadMore) => handle_more(app),
        Some(KbAction::CycleTheme) => {
            let theme = app.session.toggle_theme();
            tracing::info!(theme = theme.name(), "Theme changed");
            app.set_status(format!("Tema: {}", theme.name()));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        None => {}
    }

    Action::Continue
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.search_mode = false;
            app.search_input.clear();
        }
        KeyCode::Enter => {
            app.search_mode = false;
            let query = std::mem::take(&mut app.search_input);
            app.search(&query);
            app.focus = Focus::Articles;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            if app.search_input.len() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "A busca chegou ao limite ({} caracteres)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
        }
        _ => {}
    }
}

/// Explicit request for the next page. Explains why when it is ignored.
fn handle_more(app: &mut App) {
    if app.advance_page() {
        return;
    }

    let session = &app.session;
    let msg = if *session.feed().view() == FeedView::Saved {
        "Os artigos salvos não têm mais páginas."
    } else if session.is_loading() || session.is_loading_more() {
        "Aguarde, ainda carregando..."
    } else {
        "Você chegou ao fim das notícias."
    };
    app.set_status(msg);
}

fn handle_save(app: &mut App) {
    let Some((title, saved)) = app.session.toggle_save_at(app.selected_article + 1) else {
        app.set_status("Nenhum artigo selecionado");
        return;
    };

    let msg = if saved {
        format!("Salvo: {}", title)
    } else {
        format!("Removido dos salvos: {}", title)
    };
    app.set_status(msg);
    // Unsaving in the saved view shrinks the list under the cursor.
    app.clamp_selection();
    app.needs_redraw = true;
}

fn handle_open<O>(app: &mut App, opener: O)
where
    O: FnOnce(&str) -> std::io::Result<()>,
{
    let Some(article) = app.selected_article() else {
        app.set_status("Nenhum artigo selecionado");
        return;
    };

    let url = match validate_url_for_open(&article.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = %article.url, error = %e, "Refusing to open article URL");
            app.set_status(format!("Não é possível abrir: {}", e));
            return;
        }
    };

    match opener(url.as_str()) {
        Ok(()) => app.set_status(format!("Abrindo {}", url.host_str().unwrap_or_default())),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to open browser");
            app.set_status(format!("Falha ao abrir o navegador: {}", e));
        }
    }
}

/// Open `url` in the system browser.
pub(super) fn open_in_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{load, test_app};
    use crate::news::{fallback_articles, FeedPage};
    use crate::theme::ThemeVariant;
    use crate::ui::render::tests::draw;
    use std::cell::RefCell;

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE, no_browser)
    }

    fn no_browser(_: &str) -> std::io::Result<()> {
        panic!("browser must not be opened")
    }

    #[test]
    fn test_quit() {
        let (mut app, _rx) = test_app();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, no_browser),
            Action::Quit
        ));
    }

    #[test]
    fn test_save_and_unsave_selected() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        app.selected_article = 1;

        press(&mut app, KeyCode::Char('s'));
        assert!(app.session.is_saved("fallback-2"));
        assert!(app.status_text().unwrap().starts_with("Salvo:"));

        press(&mut app, KeyCode::Char('s'));
        assert!(!app.session.is_saved("fallback-2"));
        assert!(app.status_text().unwrap().starts_with("Removido"));
    }

    #[test]
    fn test_save_outside_saved_view_redraws_marker() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        app.selected_article = 2;
        app.needs_redraw = false;

        press(&mut app, KeyCode::Char('s'));
        assert!(app.needs_redraw);
        assert!(draw(&app, 120, 40).iter().any(|r| r.contains("★ Dólar atinge")));
    }

    #[test]
    fn test_save_with_empty_list() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.status_text(), Some("Nenhum artigo selecionado"));
        assert!(app.session.saved().is_empty());
    }

    #[test]
    fn test_save_not_bound_in_category_panel() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        app.focus = Focus::Categories;
        press(&mut app, KeyCode::Char('s'));
        assert!(app.session.saved().is_empty());
    }

    #[test]
    fn test_unsave_in_saved_view_clamps_cursor() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        app.session.toggle_save_at(1);
        app.session.toggle_save_at(2);
        app.select_category(SAVED_SLUG);
        app.selected_article = 1;

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.visible_articles().count(), 1);
        assert_eq!(app.selected_article, 0);
        assert_eq!(app.selected_article().map(|a| a.id.as_str()), Some("fallback-1"));
    }

    #[test]
    fn test_more_ignored_after_fallback() {
        let (mut app, _rx) = test_app();
        let req = app.session.select_category("brasil").unwrap();
        app.session
            .apply_page(req.generation, req.page, FeedPage::fallback());

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.session.feed().page(), 1);
        assert!(app.status_text().unwrap().contains("fim"));
    }

    #[test]
    fn test_more_while_loading_explains() {
        let (mut app, _rx) = test_app();
        app.session.select_category("brasil");
        press(&mut app, KeyCode::Char('m'));
        assert!(app.status_text().unwrap().contains("carregando"));
    }

    #[tokio::test]
    async fn test_scrolling_to_last_article_loads_next_page() {
        let (mut app, _rx) = test_app();
        let mut articles = fallback_articles();
        articles.truncate(3);
        load(&mut app, articles);

        press(&mut app, KeyCode::Char('j'));
        assert!(!app.session.is_loading_more());
        press(&mut app, KeyCode::Down);
        assert!(app.session.is_loading_more());
        assert!(draw(&app, 100, 30)
            .iter()
            .any(|r| r.contains("Carregando mais notícias...")));
    }

    #[tokio::test]
    async fn test_enter_on_category_selects_it() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Categories);

        // Destaques, Brasil, Mundo
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.feed().active_category(), "mundo");
        assert!(app.session.is_loading());
        assert_eq!(app.focus, Focus::Articles);
    }

    #[tokio::test]
    async fn test_search_mode_collects_and_commits_query() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_mode);

        // Bound keys are typed, not dispatched, while searching.
        for c in "qsx".chars() {
            assert!(matches!(press(&mut app, KeyCode::Char(c)), Action::Continue));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_input, "qs");

        press(&mut app, KeyCode::Enter);
        assert!(!app.search_mode);
        assert!(app.search_input.is_empty());
        assert_eq!(app.session.feed().search_query(), Some("qs"));
    }

    #[test]
    fn test_search_escape_cancels() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.search_mode);
        assert!(app.search_input.is_empty());
        assert_eq!(app.session.feed().search_query(), None);
    }

    #[test]
    fn test_search_input_is_capped() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('/'));
        app.search_input = "a".repeat(MAX_SEARCH_QUERY_LENGTH);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.search_input.len(), MAX_SEARCH_QUERY_LENGTH);
        assert!(app.status_text().unwrap().contains("limite"));
    }

    #[test]
    fn test_open_placeholder_link_refused() {
        let (mut app, _rx) = test_app();
        load(&mut app, fallback_articles());
        press(&mut app, KeyCode::Char('o'));
        assert!(app.status_text().unwrap().contains("no link"));
    }

    #[test]
    fn test_open_rejects_non_web_scheme() {
        let (mut app, _rx) = test_app();
        let mut articles = fallback_articles();
        articles[0].url = "file:///etc/passwd".to_string();
        load(&mut app, articles);

        press(&mut app, KeyCode::Enter);
        assert!(app.status_text().unwrap().contains("Unsupported scheme"));
    }

    #[test]
    fn test_open_valid_link_uses_opener() {
        let (mut app, _rx) = test_app();
        let mut articles = fallback_articles();
        articles[1].url = "https://g1.globo.com/economia/noticia.ghtml".to_string();
        load(&mut app, articles);
        app.selected_article = 1;

        let opened = RefCell::new(None);
        handle_input(&mut app, KeyCode::Char('o'), KeyModifiers::NONE, |url| {
            *opened.borrow_mut() = Some(url.to_string());
            Ok(())
        });

        assert_eq!(
            opened.into_inner().as_deref(),
            Some("https://g1.globo.com/economia/noticia.ghtml")
        );
        assert_eq!(app.status_text(), Some("Abrindo g1.globo.com"));
    }

    #[test]
    fn test_theme_toggle() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.session.theme(), ThemeVariant::Light);
        assert_eq!(app.status_text(), Some("Tema: Claro"));
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        // 'q' closes the overlay instead of quitting.
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.help_scroll_offset, 1);
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Continue));
        assert!(!app.show_help);
        assert_eq!(app.help_scroll_offset, 0);
    }
}
