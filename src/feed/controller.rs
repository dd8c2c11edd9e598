//! Feed pagination state machine.
//!
//! The controller owns which feed is showing (a category, a search, or the
//! saved view), the current page, the accumulated articles and the featured
//! article. It never performs I/O: mutators return a [`FetchRequest`] that the
//! caller executes, and the outcome comes back through
//! [`FeedController::apply_page`] or [`FeedController::fail`].
//!
//! Each reset bumps a generation counter. Requests carry the generation they
//! were issued under, and completions from an older generation are dropped, so
//! a slow response for a previous category can never overwrite the current one.

use crate::news::{Article, FeedFilter, FeedPage, ALL_SLUG, SAVED_SLUG};

/// Lifecycle phase, derived from the controller's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected yet.
    Idle,
    /// First page of a new filter is in flight.
    LoadingInitial,
    Ready,
    /// A later page is in flight.
    LoadingMore,
    /// Showing saved articles; no fetching.
    SavedView,
}

/// What the feed is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    Feed(FeedFilter),
    Saved,
}

/// A fetch the caller must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub filter: FeedFilter,
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct FeedController {
    view: FeedView,
    page: u32,
    articles: Vec<Article>,
    featured: Option<Article>,
    has_more: bool,
    loading: bool,
    loading_more: bool,
    generation: u64,
    started: bool,
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            view: FeedView::Feed(FeedFilter::All),
            page: 1,
            articles: Vec::new(),
            featured: None,
            has_more: true,
            loading: false,
            loading_more: false,
            generation: 0,
            started: false,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::Idle
        } else if self.view == FeedView::Saved {
            Phase::SavedView
        } else if self.loading {
            Phase::LoadingInitial
        } else if self.loading_more {
            Phase::LoadingMore
        } else {
            Phase::Ready
        }
    }

    /// Articles below the featured slot, in insertion order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn featured(&self) -> Option<&Article> {
        self.featured.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> &FeedView {
        &self.view
    }

    /// Slug of the active category (`all` while searching, `saved` in saved view).
    pub fn active_category(&self) -> &str {
        match &self.view {
            FeedView::Saved => SAVED_SLUG,
            FeedView::Feed(FeedFilter::Category(slug)) => slug,
            FeedView::Feed(FeedFilter::All | FeedFilter::Search(_)) => ALL_SLUG,
        }
    }

    pub fn search_query(&self) -> Option<&str> {
        match &self.view {
            FeedView::Feed(FeedFilter::Search(query)) => Some(query),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------------

    /// Select a category by slug. `saved` switches to the saved view, which
    /// mirrors `saved` and issues no fetch.
    ///
    /// Clears any active search. Re-selecting the active category is a no-op
    /// (apart from re-mirroring the saved view).
    pub fn select_category(&mut self, slug: &str, saved: &[Article]) -> Option<FetchRequest> {
        let view = if slug == SAVED_SLUG {
            FeedView::Saved
        } else {
            FeedView::Feed(FeedFilter::category(slug))
        };
        self.switch_view(view, saved)
    }

    /// Search for `query`, clearing any active category. A blank query returns
    /// to the unfiltered feed.
    pub fn search(&mut self, query: &str) -> Option<FetchRequest> {
        self.switch_view(FeedView::Feed(FeedFilter::search(query)), &[])
    }

    /// Viewport reached the last item: request the next page.
    ///
    /// Ignored (returns `None`) while any load is in flight, once the feed is
    /// exhausted, before the first selection, and in the saved view.
    pub fn advance_page(&mut self) -> Option<FetchRequest> {
        if !self.started || self.loading || self.loading_more || !self.has_more {
            return None;
        }
        let FeedView::Feed(filter) = &self.view else {
            return None;
        };
        let filter = filter.clone();

        self.page += 1;
        self.loading_more = true;
        tracing::debug!(page = self.page, generation = self.generation, "Advancing feed page");
        Some(FetchRequest {
            generation: self.generation,
            filter,
            page: self.page,
        })
    }

    /// Keep the saved view in sync after the saved collection changed.
    pub fn refresh_saved(&mut self, saved: &[Article]) {
        if self.view == FeedView::Saved {
            self.articles = saved.to_vec();
        }
    }

    // ------------------------------------------------------------------------
    // Completions
    // ------------------------------------------------------------------------

    /// Apply a fetched page. Returns `false` if the result was stale and ignored.
    ///
    /// Page 1 replaces the feed: the first article becomes featured and the
    /// rest become the list. Later pages append without de-duplication. An
    /// empty page ends pagination and leaves the list untouched. A fallback
    /// page is shown like page 1 but ends pagination.
    pub fn apply_page(&mut self, generation: u64, page: u32, result: FeedPage) -> bool {
        if !self.is_current(generation, page) {
            tracing::debug!(
                expected_generation = self.generation,
                generation,
                expected_page = self.page,
                page,
                "Ignoring stale feed page"
            );
            return false;
        }

        self.loading = false;
        self.loading_more = false;

        let fallback = result.is_fallback();
        let mut articles = result.articles;
        if articles.is_empty() {
            self.has_more = false;
            tracing::debug!(page, "Feed exhausted");
            return true;
        }

        let count = articles.len();
        if page == 1 {
            let rest = articles.split_off(1);
            self.featured = articles.pop();
            self.articles = rest;
        } else {
            self.articles.append(&mut articles);
        }
        if fallback {
            self.has_more = false;
        }

        tracing::debug!(
            page,
            count,
            total = self.articles.len(),
            fallback,
            "Applied feed page"
        );
        true
    }

    /// The fetch for `(generation, page)` died without producing a page.
    ///
    /// Treated as an unavailable page: the fallback set on page 1, end of
    /// feed afterwards. Returns `false` if stale.
    pub fn fail(&mut self, generation: u64, page: u32) -> bool {
        self.apply_page(generation, page, FeedPage::unavailable(page))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn is_current(&self, generation: u64, page: u32) -> bool {
        generation == self.generation
            && page == self.page
            && (self.loading || self.loading_more)
            && matches!(self.view, FeedView::Feed(_))
    }

    fn switch_view(&mut self, view: FeedView, saved: &[Article]) -> Option<FetchRequest> {
        if self.started && self.view == view {
            self.refresh_saved(saved);
            return None;
        }

        self.started = true;
        self.generation += 1;
        self.view = view;
        self.page = 1;
        self.articles.clear();
        self.featured = None;
        self.has_more = true;
        self.loading_more = false;

        match &self.view {
            FeedView::Saved => {
                self.loading = false;
                self.has_more = false;
                self.articles = saved.to_vec();
                tracing::debug!(count = saved.len(), "Showing saved articles");
                None
            }
            FeedView::Feed(filter) => {
                self.loading = true;
                tracing::debug!(?filter, generation = self.generation, "Feed reset");
                Some(FetchRequest {
                    generation: self.generation,
                    filter: filter.clone(),
                    page: 1,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::fallback_articles;
    use pretty_assertions::assert_eq;

    fn article(n: usize) -> Article {
        Article {
            id: format!("a-{n}"),
            title: format!("Article {n}"),
            excerpt: String::new(),
            category: "Tecnologia".to_string(),
            author: "Fonte".to_string(),
            date: String::new(),
            image_url: "https://img.example.com/x.jpg".to_string(),
            read_time: "3 min".to_string(),
            url: format!("https://example.com/{n}"),
            source_url: None,
        }
    }

    fn page_of(range: std::ops::Range<usize>) -> FeedPage {
        FeedPage::upstream(range.map(article).collect())
    }

    fn ids(articles: &[Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_starts_idle() {
        let mut ctl = FeedController::new();
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.advance_page().is_none());
    }

    #[test]
    fn test_select_category_resets_before_fetch() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("tecnologia", &[]).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.filter, FeedFilter::Category("tecnologia".to_string()));
        assert_eq!(ctl.phase(), Phase::LoadingInitial);
        assert!(ctl.articles().is_empty());
        assert!(ctl.featured().is_none());
        assert!(ctl.has_more());
    }

    #[test]
    fn test_technology_two_pages() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("tecnologia", &[]).unwrap();
        assert!(ctl.apply_page(req.generation, req.page, page_of(0..12)));

        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("a-0"));
        assert_eq!(ctl.articles().len(), 11);
        assert!(ctl.has_more());
        assert_eq!(ctl.phase(), Phase::Ready);

        let req = ctl.advance_page().unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(ctl.phase(), Phase::LoadingMore);
        assert!(ctl.apply_page(req.generation, req.page, page_of(12..24)));

        assert_eq!(ctl.articles().len(), 23);
        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("a-0"));
        assert!(ctl.has_more());
        assert_eq!(ctl.articles()[0].id, "a-1");
        assert_eq!(ctl.articles()[22].id, "a-23");
    }

    #[test]
    fn test_empty_later_page_ends_feed() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("esportes", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..5));
        let before = ids(ctl.articles());

        let req = ctl.advance_page().unwrap();
        ctl.apply_page(req.generation, req.page, FeedPage::upstream(Vec::new()));

        assert!(!ctl.has_more());
        assert_eq!(ids(ctl.articles()), before);
        assert!(!ctl.is_loading() && !ctl.is_loading_more());
        assert!(ctl.advance_page().is_none());
    }

    #[test]
    fn test_fallback_first_page() {
        let mut ctl = FeedController::new();
        let req = ctl.search("pix").unwrap();
        ctl.apply_page(req.generation, req.page, FeedPage::fallback());

        let fallback = fallback_articles();
        assert_eq!(ctl.featured(), Some(&fallback[0]));
        assert_eq!(ctl.articles(), &fallback[1..]);
        assert!(!ctl.has_more());
    }

    #[test]
    fn test_failed_first_page_shows_fallback() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("mundo", &[]).unwrap();
        assert!(ctl.fail(req.generation, req.page));
        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("fallback-1"));
        assert_eq!(ctl.articles().len(), 4);
        assert!(!ctl.is_loading());
    }

    #[test]
    fn test_failed_later_page_ends_feed() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("mundo", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..3));
        let req = ctl.advance_page().unwrap();
        assert!(ctl.fail(req.generation, req.page));
        assert!(!ctl.has_more());
        assert_eq!(ctl.articles().len(), 2);
        assert!(!ctl.is_loading_more());
    }

    #[test]
    fn test_duplicates_across_pages_are_kept() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("brasil", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..3));
        let req = ctl.advance_page().unwrap();
        ctl.apply_page(req.generation, req.page, page_of(1..3));
        assert_eq!(ids(ctl.articles()), ["a-1", "a-2", "a-1", "a-2"]);
    }

    #[test]
    fn test_advance_ignored_while_loading() {
        let mut ctl = FeedController::new();
        ctl.select_category("brasil", &[]).unwrap();
        assert!(ctl.advance_page().is_none());
        assert_eq!(ctl.page(), 1);
    }

    #[test]
    fn test_advance_ignored_while_loading_more() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("brasil", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..3));
        ctl.advance_page().unwrap();
        assert!(ctl.advance_page().is_none());
        assert_eq!(ctl.page(), 2);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut ctl = FeedController::new();
        let old = ctl.select_category("esportes", &[]).unwrap();
        let new = ctl.select_category("economia", &[]).unwrap();
        assert_ne!(old.generation, new.generation);

        assert!(!ctl.apply_page(old.generation, old.page, page_of(0..5)));
        assert!(ctl.articles().is_empty());
        assert!(ctl.featured().is_none());
        assert_eq!(ctl.phase(), Phase::LoadingInitial);

        assert!(ctl.apply_page(new.generation, new.page, page_of(5..8)));
        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("a-5"));
    }

    #[test]
    fn test_duplicate_completion_discarded() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("esportes", &[]).unwrap();
        assert!(ctl.apply_page(req.generation, req.page, page_of(0..3)));
        assert!(!ctl.apply_page(req.generation, req.page, page_of(3..6)));
        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("a-0"));
    }

    #[test]
    fn test_search_clears_category() {
        let mut ctl = FeedController::new();
        ctl.select_category("tecnologia", &[]);
        ctl.search("inteligência artificial");
        assert_eq!(ctl.active_category(), ALL_SLUG);
        assert_eq!(ctl.search_query(), Some("inteligência artificial"));

        ctl.select_category("jogos", &[]);
        assert_eq!(ctl.search_query(), None);
        assert_eq!(ctl.active_category(), "jogos");
    }

    #[test]
    fn test_reselecting_same_category_is_noop() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("jogos", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..3));
        assert!(ctl.select_category("jogos", &[]).is_none());
        assert_eq!(ctl.articles().len(), 2);
    }

    #[test]
    fn test_saved_view_mirrors_without_fetch() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("brasil", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..4));

        let saved = vec![article(7), article(9)];
        assert!(ctl.select_category(SAVED_SLUG, &saved).is_none());
        assert_eq!(ctl.phase(), Phase::SavedView);
        assert_eq!(ctl.articles(), saved.as_slice());
        assert!(ctl.featured().is_none());
        assert!(!ctl.has_more());
        assert!(ctl.advance_page().is_none());

        ctl.refresh_saved(&saved[..1]);
        assert_eq!(ids(ctl.articles()), ["a-7"]);
    }

    #[test]
    fn test_response_after_switching_to_saved_is_discarded() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("brasil", &[]).unwrap();
        ctl.select_category(SAVED_SLUG, &[]);
        assert!(!ctl.apply_page(req.generation, req.page, page_of(0..4)));
        assert!(ctl.articles().is_empty());
    }

    #[test]
    fn test_blank_search_goes_home() {
        let mut ctl = FeedController::new();
        ctl.select_category("saúde", &[]);
        let req = ctl.search("   ").unwrap();
        assert_eq!(req.filter, FeedFilter::All);
        assert_eq!(ctl.active_category(), ALL_SLUG);
    }

    #[test]
    fn test_single_article_first_page() {
        let mut ctl = FeedController::new();
        let req = ctl.select_category("opinião", &[]).unwrap();
        ctl.apply_page(req.generation, req.page, page_of(0..1));
        assert_eq!(ctl.featured().map(|a| a.id.as_str()), Some("a-0"));
        assert!(ctl.articles().is_empty());
        assert!(ctl.has_more());
    }
}
