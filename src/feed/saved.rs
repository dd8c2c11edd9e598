use std::collections::HashSet;

use crate::news::Article;

/// Locally bookmarked articles.
///
/// A set keyed by article id that remembers insertion order for display.
/// Independent of the feed: toggling never touches the feed's article list.
#[derive(Debug, Clone, Default)]
pub struct SavedArticles {
    items: Vec<Article>,
    ids: HashSet<String>,
}

impl SavedArticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `article` if absent, remove it if present.
    ///
    /// Returns `true` when the article is saved after the call.
    pub fn toggle(&mut self, article: &Article) -> bool {
        if self.ids.remove(&article.id) {
            self.items.retain(|a| a.id != article.id);
            false
        } else {
            self.ids.insert(article.id.clone());
            self.items.push(article.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Saved articles in the order they were saved.
    pub fn as_slice(&self) -> &[Article] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
