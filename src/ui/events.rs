//! Application event handling.
//!
//! Applies background fetch completions to the session. Stale completions are
//! filtered by the feed controller's generation check and leave the screen
//! alone.

use crate::app::{App, AppEvent};

/// Handle one event from a background task.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::PageLoaded {
            generation,
            page,
            result,
        } => {
            let fallback = result.is_fallback();
            if !app.session.apply_page(generation, page, result) {
                return;
            }
            app.clamp_selection();
            app.needs_redraw = true;
            if fallback {
                app.set_status(
                    "Não foi possível carregar as notícias agora. Exibindo destaques de exemplo.",
                );
            }
        }
        AppEvent::TaskPanicked {
            task,
            generation,
            page,
            error,
        } => {
            tracing::error!(task, generation, page, error, "Background task panicked");
            if app.session.fail(generation, page) {
                app.clamp_selection();
                app.needs_redraw = true;
                app.set_status(format!("Erro interno na tarefa {}", task));
            }
        }
    }
}
