//! Upstream NewsAPI v2 response schema.
//!
//! Every field is optional: the upstream omits or nulls fields freely, and an
//! error body (`{"status":"error","code":...,"message":...}`) shares the same
//! top-level shape as a success body. Presence is checked explicitly during
//! normalization rather than assumed here.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiResponse {
    pub status: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    pub articles: Option<Vec<NewsApiArticle>>,
}

impl NewsApiResponse {
    /// True when the body is an upstream error envelope.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub source: Option<NewsApiSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}
