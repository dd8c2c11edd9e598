//! Adapter over the upstream news API.
//!
//! This module turns portal filters into NewsAPI requests and upstream JSON
//! into portal articles:
//!
//! - **Query mapping**: category slugs to native categories, keyword searches
//!   or plain country headlines
//! - **Normalization**: explicit-schema items to [`Article`], with placeholder
//!   excerpt/image/author and a per-filter category label
//! - **Fallback policy**: failures on the first page yield a fixed sample set,
//!   failures on later pages yield nothing
//!
//! # Architecture
//!
//! - [`query`] - slug mapping and request URL building
//! - [`schema`] - serde model of the upstream response
//! - [`normalize`] - item mapping and the quality filter
//! - [`fallback`] - the hardcoded sample articles
//! - [`client`] - HTTP fetch with size/time limits and the fallback policy

pub mod client;
pub mod fallback;
pub mod normalize;
pub mod query;
pub mod schema;
mod types;

pub use client::{
    build_http_client, ClientOptions, FeedPage, FetchError, NewsClient, PageOrigin,
    DEFAULT_BASE_URL,
};
pub use fallback::fallback_articles;
pub use query::{FeedFilter, RequestDefaults};
pub use types::{
    category_by_slug, Article, Category, TrendingItem, ALL_SLUG, CATEGORIES, SAVED_SLUG, TRENDING,
};
