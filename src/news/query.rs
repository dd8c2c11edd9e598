//! Mapping from portal filters to upstream NewsAPI requests.

use url::Url;

use super::types::ALL_SLUG;

/// How a category slug is expressed against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryQuery {
    /// Plain country top-headlines.
    Country,
    /// An upstream-native category (`category=...`).
    Native(&'static str),
    /// No upstream category exists; search top-headlines by keyword (`q=...`).
    Keyword(&'static str),
}

/// Static slug lookup. Unknown slugs map to [`CategoryQuery::Country`].
pub fn map_category(slug: &str) -> CategoryQuery {
    match slug {
        "brasil" => CategoryQuery::Country,
        "mundo" => CategoryQuery::Keyword("mundo"),
        "economia" => CategoryQuery::Native("business"),
        "tecnologia" => CategoryQuery::Native("technology"),
        "entretenimento" => CategoryQuery::Native("entertainment"),
        "esportes" => CategoryQuery::Native("sports"),
        "ciência" => CategoryQuery::Native("science"),
        "saúde" => CategoryQuery::Native("health"),
        "política" => CategoryQuery::Keyword("política"),
        "jogos" => CategoryQuery::Keyword("games"),
        "opinião" => CategoryQuery::Keyword("opinião"),
        _ => CategoryQuery::Country,
    }
}

/// What the feed is currently filtered by, as seen by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    /// Unfiltered top headlines.
    All,
    /// A category slug (never `all` or `saved`).
    Category(String),
    /// Free-text search; the query is trimmed and non-empty.
    Search(String),
}

impl FeedFilter {
    /// Build the filter for a category selection.
    pub fn category(slug: &str) -> Self {
        if slug == ALL_SLUG {
            Self::All
        } else {
            Self::Category(slug.to_string())
        }
    }

    /// Build the filter for a search. A blank query means the unfiltered feed.
    pub fn search(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            Self::All
        } else {
            Self::Search(query.to_string())
        }
    }

    /// Label stamped on every article fetched for this filter.
    ///
    /// Category feeds use the capitalized slug; the unfiltered feed and search
    /// results share the generic "Destaque" label.
    pub fn article_label(&self) -> String {
        match self {
            Self::Category(slug) => capitalize(slug),
            Self::All | Self::Search(_) => "Destaque".to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upstream endpoint parameters shared by every request.
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub country: String,
    pub language: String,
    pub page_size: u32,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            country: "br".to_string(),
            language: "pt".to_string(),
            page_size: 12,
        }
    }
}

/// A fully resolved upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamRequest {
    TopHeadlines {
        category: Option<&'static str>,
        keyword: Option<String>,
        page: u32,
    },
    Everything {
        query: String,
        page: u32,
    },
}

impl UpstreamRequest {
    /// Resolve a filter and page into an upstream request.
    pub fn for_filter(filter: &FeedFilter, page: u32) -> Self {
        match filter {
            FeedFilter::All => Self::TopHeadlines {
                category: None,
                keyword: None,
                page,
            },
            FeedFilter::Search(query) => Self::Everything {
                query: query.clone(),
                page,
            },
            FeedFilter::Category(slug) => match map_category(slug) {
                CategoryQuery::Country => Self::TopHeadlines {
                    category: None,
                    keyword: None,
                    page,
                },
                CategoryQuery::Native(category) => Self::TopHeadlines {
                    category: Some(category),
                    keyword: None,
                    page,
                },
                CategoryQuery::Keyword(keyword) => Self::TopHeadlines {
                    category: None,
                    keyword: Some(keyword.to_string()),
                    page,
                },
            },
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            Self::TopHeadlines { page, .. } | Self::Everything { page, .. } => *page,
        }
    }

    /// Render the request URL against `base` (e.g. `https://newsapi.org/v2`).
    ///
    /// Query values are percent-encoded by `url`, so accented keywords such as
    /// "política" are safe to pass through.
    pub fn to_url(&self, base: &Url, defaults: &RequestDefaults) -> Url {
        let mut url = base.clone();
        let endpoint = match self {
            Self::TopHeadlines { .. } => "top-headlines",
            Self::Everything { .. } => "everything",
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(endpoint);
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            match self {
                Self::TopHeadlines {
                    category, keyword, ..
                } => {
                    pairs.append_pair("country", &defaults.country);
                    if let Some(keyword) = keyword {
                        pairs.append_pair("q", keyword);
                    }
                    if let Some(category) = category {
                        pairs.append_pair("category", category);
                    }
                }
                Self::Everything { query, .. } => {
                    pairs.append_pair("q", query);
                    pairs.append_pair("language", &defaults.language);
                    pairs.append_pair("sortBy", "publishedAt");
                }
            }
            pairs.append_pair("pageSize", &defaults.page_size.to_string());
            pairs.append_pair("page", &self.page().to_string());
        }
        url
    }
}
