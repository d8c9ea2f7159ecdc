//! Destination URL syntax checks.
//!
//! URLs are stored exactly as submitted. Validation only requires that the
//! input parses as an absolute URL with a scheme and a non-empty host.

use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("{0}")]
    Malformed(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Validates that `input` is an absolute URL with a scheme and host.
///
/// # Errors
///
/// Returns [`UrlValidationError::Malformed`] if the input does not parse and
/// [`UrlValidationError::MissingHost`] for host-less URLs such as `mailto:`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
