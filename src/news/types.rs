use serde::{Deserialize, Serialize};

/// Slug of the unfiltered top-headlines feed.
pub const ALL_SLUG: &str = "all";

/// Slug of the pseudo-category that shows locally saved articles.
pub const SAVED_SLUG: &str = "saved";

// ============================================================================
// Article
// ============================================================================

/// A normalized news article as presented by the portal.
///
/// Articles are immutable once built. Identity is the `id` field: it is what
/// the saved collection keys on. Two articles with the same `id` are the same
/// story even when other fields differ (e.g. a randomized read time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Display label ("Tecnologia", "Destaque", ...), not an upstream field.
    pub category: String,
    /// Source name, shown as the byline.
    pub author: String,
    /// Pre-formatted publish date.
    pub date: String,
    pub image_url: String,
    /// Estimated read time, e.g. "4 min".
    pub read_time: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

// ============================================================================
// Category
// ============================================================================

/// A portal category. The slug is both the UI key and the upstream mapping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    /// Decorative; never updated.
    pub count: u32,
}

/// The portal's navigation categories, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { id: "cat-br", name: "Brasil", slug: "brasil", count: 0 },
    Category { id: "cat-world", name: "Mundo", slug: "mundo", count: 0 },
    Category { id: "cat-eco", name: "Economia", slug: "economia", count: 0 },
    Category { id: "cat-tech", name: "Tecnologia", slug: "tecnologia", count: 0 },
    Category { id: "cat-games", name: "Jogos", slug: "jogos", count: 0 },
    Category { id: "cat-ent", name: "Entretenimento", slug: "entretenimento", count: 0 },
    Category { id: "cat-sport", name: "Esportes", slug: "esportes", count: 0 },
    Category { id: "cat-pol", name: "Política", slug: "política", count: 0 },
    Category { id: "cat-sci", name: "Ciência", slug: "ciência", count: 0 },
    Category { id: "cat-health", name: "Saúde", slug: "saúde", count: 0 },
    Category { id: "cat-op", name: "Opinião", slug: "opinião", count: 0 },
];

/// Look up a category by slug.
pub fn category_by_slug(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}

// ============================================================================
// Trending
// ============================================================================

/// Static sidebar entry. Purely decorative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingItem {
    pub id: &'static str,
    pub rank: u32,
    pub title: &'static str,
    pub views: &'static str,
}

pub const TRENDING: &[TrendingItem] = &[
    TrendingItem { id: "t1", rank: 1, title: "IA Generativa transforma mercado de trabalho", views: "245k" },
    TrendingItem { id: "t2", rank: 2, title: "Novo PS6: Rumores e expectativas para 2026", views: "189k" },
    TrendingItem { id: "t3", rank: 3, title: "Eleições 2026: Cenário político esquenta", views: "150k" },
    TrendingItem { id: "t4", rank: 4, title: "Dólar atinge nova cotação histórica", views: "120k" },
];
