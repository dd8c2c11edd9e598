use std::time::Duration;

use futures::StreamExt;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

use super::fallback::fallback_articles;
use super::normalize::normalize_page;
use super::query::{FeedFilter, RequestDefaults, UpstreamRequest};
use super::schema::NewsApiResponse;
use super::types::Article;

/// Public NewsAPI v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB
const API_KEY_HEADER: &str = "X-Api-Key";

/// Errors from a single upstream fetch.
///
/// None of these reach the feed: [`NewsClient::fetch_news`] collapses them
/// into the fallback policy. They exist for logging and for callers that
/// want the raw outcome via [`NewsClient::fetch_page`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Body was not valid JSON or did not match the response schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Upstream answered 2xx with an error envelope
    #[error("Upstream error {code}: {message}")]
    Upstream { code: String, message: String },
    #[error("No API key configured (set NEWSAPI_KEY or api_key in config)")]
    MissingApiKey,
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
}

/// Where the articles of a [`FeedPage`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    Upstream,
    /// The hardcoded sample set substituted for a failed first page.
    Fallback,
}

/// Outcome of [`NewsClient::fetch_news`]. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    pub articles: Vec<Article>,
    pub origin: PageOrigin,
}

impl FeedPage {
    pub fn upstream(articles: Vec<Article>) -> Self {
        Self {
            articles,
            origin: PageOrigin::Upstream,
        }
    }

    pub fn fallback() -> Self {
        Self {
            articles: fallback_articles(),
            origin: PageOrigin::Fallback,
        }
    }

    /// The page returned when `page` could not be loaded.
    ///
    /// Page 1 gets the sample set so the first screen is never empty; later
    /// pages get nothing, which ends the scroll instead of looping on samples.
    pub fn unavailable(page: u32) -> Self {
        if page <= 1 {
            Self::fallback()
        } else {
            Self::upstream(Vec::new())
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == PageOrigin::Fallback
    }
}

/// Settings for [`NewsClient::new`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub defaults: RequestDefaults,
    pub timeout: Duration,
    pub placeholder_images: Vec<String>,
}

/// Create a redirect policy with loop detection and limited hops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Build the shared HTTP client used for upstream requests.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .user_agent(concat!("pulso/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Adapter over the upstream news API.
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    defaults: RequestDefaults,
    timeout: Duration,
    placeholder_images: Vec<String>,
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("defaults", &self.defaults)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NewsClient {
    /// Create a client.
    ///
    /// The base URL must be HTTPS so the API key header never travels in the
    /// clear; plain HTTP is accepted only for localhost/127.0.0.1.
    pub fn new(http: reqwest::Client, options: ClientOptions) -> Result<Self, FetchError> {
        let base_url = Url::parse(&options.base_url)?;

        if base_url.scheme() != "https" {
            let is_localhost = base_url.scheme() == "http"
                && matches!(base_url.host_str(), Some("127.0.0.1") | Some("localhost"));
            if !is_localhost {
                tracing::error!(base_url = %base_url, "Rejecting non-HTTPS base URL");
                return Err(FetchError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base_url, "Using non-HTTPS news API base URL (localhost only)");
        }

        let api_key = options
            .api_key
            .filter(|k| !k.expose_secret().trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("No news API key configured; feeds will show sample articles");
        }

        Ok(Self {
            http,
            base_url,
            api_key,
            defaults: options.defaults,
            timeout: options.timeout,
            placeholder_images: options.placeholder_images,
        })
    }

    /// Fetch `page` of `filter`, applying the fallback policy.
    ///
    /// Transport failures, non-2xx statuses, error envelopes, malformed JSON
    /// and empty results are all logged and turned into
    /// [`FeedPage::unavailable`]. This never fails.
    pub async fn fetch_news(&self, filter: &FeedFilter, page: u32) -> FeedPage {
        match self.fetch_page(filter, page).await {
            Ok(articles) if !articles.is_empty() => FeedPage::upstream(articles),
            Ok(_) => {
                tracing::debug!(?filter, page, "Upstream returned no articles");
                FeedPage::unavailable(page)
            }
            Err(e) => {
                tracing::warn!(?filter, page, error = %e, "News fetch failed, using fallback policy");
                FeedPage::unavailable(page)
            }
        }
    }

    /// Fetch and normalize one page without the fallback policy.
    pub async fn fetch_page(
        &self,
        filter: &FeedFilter,
        page: u32,
    ) -> Result<Vec<Article>, FetchError> {
        let api_key = self.api_key.as_ref().ok_or(FetchError::MissingApiKey)?;
        let url = UpstreamRequest::for_filter(filter, page).to_url(&self.base_url, &self.defaults);
        tracing::debug!(url = %url, "Fetching news page");

        let response = tokio::time::timeout(
            self.timeout,
            self.http
                .get(url)
                .header(API_KEY_HEADER, api_key.expose_secret())
                .send(),
        )
        .await
        .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))??;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let body: NewsApiResponse = serde_json::from_slice(&bytes)?;

        if body.is_error() {
            return Err(FetchError::Upstream {
                code: body.code.unwrap_or_else(|| "unknown".to_string()),
                message: body.message.unwrap_or_default(),
            });
        }

        let items = body.articles.unwrap_or_default();
        let received = items.len();
        let articles = normalize_page(items, filter, &self.placeholder_images);
        tracing::debug!(page, received, kept = articles.len(), "Normalized news page");
        Ok(articles)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
