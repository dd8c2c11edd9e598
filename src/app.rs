use crate::feed::{FeedController, FeedView, FetchRequest, SavedArticles};
use crate::keybindings::KeybindingRegistry;
use crate::news::{Article, FeedPage, NewsClient, ALL_SLUG, CATEGORIES, SAVED_SLUG};
use crate::theme::ThemeVariant;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Articles shown in the "Últimas Notícias" sidebar.
const LATEST_NEWS_COUNT: usize = 5;
/// Headlines cycled by the ticker.
const TICKER_COUNT: usize = 5;

// ============================================================================
// Session State
// ============================================================================

/// Everything the portal remembers between commands.
///
/// Pure state: every mutation that needs network work returns a
/// [`FetchRequest`] for [`App`] to execute.
#[derive(Debug, Default)]
pub struct Session {
    feed: FeedController,
    saved: SavedArticles,
    theme: ThemeVariant,
}

impl Session {
    pub fn new(theme: ThemeVariant) -> Self {
        Self {
            feed: FeedController::new(),
            saved: SavedArticles::new(),
            theme,
        }
    }

    pub fn feed(&self) -> &FeedController {
        &self.feed
    }

    pub fn saved(&self) -> &SavedArticles {
        &self.saved
    }

    pub fn theme(&self) -> ThemeVariant {
        self.theme
    }

    pub fn articles(&self) -> &[Article] {
        self.feed.articles()
    }

    pub fn featured(&self) -> Option<&Article> {
        self.feed.featured()
    }

    pub fn is_loading(&self) -> bool {
        self.feed.is_loading()
    }

    pub fn is_loading_more(&self) -> bool {
        self.feed.is_loading_more()
    }

    pub fn has_more(&self) -> bool {
        self.feed.has_more()
    }

    pub fn select_category(&mut self, slug: &str) -> Option<FetchRequest> {
        self.feed.select_category(slug, self.saved.as_slice())
    }

    pub fn search(&mut self, query: &str) -> Option<FetchRequest> {
        self.feed.search(query)
    }

    pub fn advance_page(&mut self) -> Option<FetchRequest> {
        self.feed.advance_page()
    }

    pub fn apply_page(&mut self, generation: u64, page: u32, result: FeedPage) -> bool {
        self.feed.apply_page(generation, page, result)
    }

    pub fn fail(&mut self, generation: u64, page: u32) -> bool {
        self.feed.fail(generation, page)
    }

    /// Featured article followed by the list, in display order.
    pub fn visible_articles(&self) -> impl Iterator<Item = &Article> + '_ {
        self.feed.featured().into_iter().chain(self.feed.articles())
    }

    /// Article shown at 1-based position `n`.
    pub fn article_at(&self, n: usize) -> Option<&Article> {
        n.checked_sub(1)
            .and_then(|idx| self.visible_articles().nth(idx))
    }

    /// Save or unsave `article`. Returns `true` if it is saved afterwards.
    ///
    /// The saved view, if showing, is re-mirrored.
    pub fn toggle_save(&mut self, article: &Article) -> bool {
        let saved = self.saved.toggle(article);
        self.feed.refresh_saved(self.saved.as_slice());
        tracing::debug!(id = %article.id, saved, "Toggled saved article");
        saved
    }

    /// Toggle the article at 1-based position `n`.
    ///
    /// Returns the article title and its new saved state, or `None` for an
    /// out-of-range position.
    pub fn toggle_save_at(&mut self, n: usize) -> Option<(String, bool)> {
        let article = self.article_at(n)?.clone();
        let saved = self.toggle_save(&article);
        Some((article.title, saved))
    }

    /// Sidebar articles: the first few of the list, or the saved articles
    /// while the list is empty.
    pub fn latest_news(&self) -> impl Iterator<Item = &Article> + '_ {
        let source = if self.feed.articles().is_empty() {
            self.saved.as_slice()
        } else {
            self.feed.articles()
        };
        source.iter().take(LATEST_NEWS_COUNT)
    }

    /// Ticker headlines: the first few of featured plus list. Empty while the
    /// first page loads and in the saved view.
    pub fn ticker_headlines(&self) -> Vec<&Article> {
        if self.feed.is_loading() || *self.feed.view() == FeedView::Saved {
            return Vec::new();
        }
        self.visible_articles().take(TICKER_COUNT).collect()
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    pub fn toggle_theme(&mut self) -> ThemeVariant {
        self.theme = self.theme.next();
        self.theme
    }
}

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A page fetch finished.
    ///
    /// Fields:
    /// - `generation`: The feed generation the fetch was issued under
    /// - `page`: The 1-based page that was requested
    /// - `result`: The page after the fallback policy was applied
    PageLoaded {
        generation: u64,
        page: u32,
        result: FeedPage,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked
    /// - `generation`, `page`: The fetch the task was performing
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked {
        task: &'static str,
        generation: u64,
        page: u32,
        error: String,
    },
}

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking fetch task would otherwise vanish and leave the feed stuck in
/// a loading state. The panic message comes back as `Err(String)`.
pub(crate) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

// ============================================================================
// Application Runtime
// ============================================================================

/// Panel with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Articles,
}

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Entries of the category panel: the unfiltered feed, every portal
/// category, then the saved view. Yields `(slug, label)`.
pub fn category_menu() -> impl Iterator<Item = (&'static str, &'static str)> {
    std::iter::once((ALL_SLUG, "Destaques"))
        .chain(CATEGORIES.iter().map(|c| (c.slug, c.name)))
        .chain(std::iter::once((SAVED_SLUG, "Salvos")))
}

/// Session state, UI state and the machinery that runs fetches.
///
/// Fetches run as tokio tasks and report back through the `AppEvent`
/// channel. Only one fetch is ever in flight: starting a new one aborts the
/// previous task, and the controller's generation check drops anything that
/// still slips through.
pub struct App {
    pub session: Session,
    client: Arc<NewsClient>,
    event_tx: mpsc::Sender<AppEvent>,
    fetch_handle: Option<JoinHandle<()>>,

    // UI state
    pub keybindings: KeybindingRegistry,
    pub focus: Focus,
    /// Cursor in the category panel (index into [`category_menu`]).
    pub selected_category: usize,
    /// Cursor in the article list (0-based display position).
    pub selected_article: usize,
    pub search_mode: bool,
    pub search_input: String,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    /// Columns the headline ticker has scrolled.
    pub ticker_offset: usize,
    /// Status bar message and when it was set.
    pub status_message: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(
        client: Arc<NewsClient>,
        theme: ThemeVariant,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            session: Session::new(theme),
            client,
            event_tx,
            fetch_handle: None,
            keybindings: KeybindingRegistry::new(),
            focus: Focus::Articles,
            selected_category: 0,
            selected_article: 0,
            search_mode: false,
            search_input: String::new(),
            show_help: false,
            help_scroll_offset: 0,
            ticker_offset: 0,
            status_message: None,
            needs_redraw: true,
        }
    }

    /// Set status message (expires after a few seconds).
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(msg, _)| msg.as_str())
    }

    /// Clear the status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// A page fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        let feed = self.session.feed();
        feed.is_loading() || feed.is_loading_more()
    }

    pub fn select_category(&mut self, slug: &str) {
        let generation = self.session.feed().generation();
        let request = self.session.select_category(slug);
        if let Some(idx) = category_menu().position(|(s, _)| s == slug) {
            self.selected_category = idx;
        }
        self.after_switch(generation, request);
    }

    pub fn search(&mut self, query: &str) {
        let generation = self.session.feed().generation();
        let request = self.session.search(query);
        self.after_switch(generation, request);
    }

    /// Request the next page. Returns `false` when the request was ignored.
    pub fn advance_page(&mut self) -> bool {
        match self.session.advance_page() {
            Some(request) => {
                self.spawn_fetch(request);
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    /// Article under the list cursor.
    pub fn selected_article(&self) -> Option<&Article> {
        self.session.article_at(self.selected_article + 1)
    }

    /// Number of articles in the list panel.
    pub fn article_count(&self) -> usize {
        self.session.visible_articles().count()
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Categories => {
                self.selected_category = self.selected_category.saturating_sub(1);
            }
            Focus::Articles => {
                self.selected_article = self.selected_article.saturating_sub(1);
            }
        }
    }

    /// Move the cursor down.
    ///
    /// Reaching the last article is the scroll-to-bottom signal: the next
    /// page is requested.
    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Categories => {
                let max_index = category_menu().count() - 1;
                self.selected_category = (self.selected_category + 1).min(max_index);
            }
            Focus::Articles => {
                let count = self.article_count();
                if count == 0 {
                    return;
                }
                self.selected_article = (self.selected_article + 1).min(count - 1);
                if self.selected_article + 1 == count {
                    self.advance_page();
                }
            }
        }
    }

    /// Keep the list cursor on an existing article after the list shrank.
    pub fn clamp_selection(&mut self) {
        let count = self.article_count();
        self.selected_article = self.selected_article.min(count.saturating_sub(1));
    }

    /// Scroll the ticker one column. Returns true if it is visible.
    pub fn advance_ticker(&mut self) -> bool {
        if self.session.ticker_headlines().is_empty() {
            self.ticker_offset = 0;
            return false;
        }
        self.ticker_offset = self.ticker_offset.wrapping_add(1);
        true
    }

    /// Reset the cursors if the view changed since `generation`, then start
    /// the fetch, if any.
    fn after_switch(&mut self, generation: u64, request: Option<FetchRequest>) {
        if self.session.feed().generation() != generation {
            self.selected_article = 0;
            self.ticker_offset = 0;
        } else {
            self.clamp_selection();
        }
        if let Some(request) = request {
            self.spawn_fetch(request);
        }
        self.needs_redraw = true;
    }

    /// Spawn the fetch for `request`, aborting any fetch still in flight.
    fn spawn_fetch(&mut self, request: FetchRequest) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous fetch task");
        }

        let FetchRequest {
            generation,
            filter,
            page,
        } = request;
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();

        tracing::debug!(?filter, generation, page, "Spawning feed fetch task");

        self.fetch_handle = Some(tokio::spawn(async move {
            let tx_panic = tx.clone();
            match catch_task_panic(client.fetch_news(&filter, page)).await {
                Ok(result) => {
                    if let Err(e) = tx
                        .send(AppEvent::PageLoaded {
                            generation,
                            page,
                            result,
                        })
                        .await
                    {
                        tracing::warn!(error = %e, event = "PageLoaded", "Channel send failed (receiver dropped)");
                    }
                }
                Err(panic_msg) => {
                    tracing::error!(error = %panic_msg, "Feed fetch task panicked");
                    let _ = tx_panic
                        .send(AppEvent::TaskPanicked {
                            task: "feed_fetch",
                            generation,
                            page,
                            error: panic_msg,
                        })
                        .await;
                }
            }
        }));
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort the in-flight fetch on drop so no task outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted fetch task on App drop");
        }
    }
}
