use thiserror::Error;
use url::Url;

/// Errors that can occur when validating an article link.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The article carries no real link (empty or the `#` placeholder).
    #[error("Article has no link")]
    Missing,
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host to open.
    #[error("URL has no host")]
    NoHost,
}

/// Validates an article URL before handing it to the system browser.
///
/// Article links come straight from the upstream API, so anything that is not
/// a plain web link is refused before it reaches `open::that`. That rules out
/// `file://`, `javascript:` and custom scheme handlers.
///
/// # Examples
///
/// ```
/// use pulso::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://g1.globo.com/economia/").is_ok());
/// assert!(validate_url_for_open("#").is_err());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() || trimmed == "#" {
        return Err(UrlValidationError::Missing);
    }

    let url = Url::parse(trimmed)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::NoHost),
    }

    Ok(url)
}
