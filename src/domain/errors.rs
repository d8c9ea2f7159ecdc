//! Error kinds surfaced by slug allocation, resolution and reporting.

use crate::domain::repositories::StoreError;

/// Failures of the core operations.
///
/// Client-caused kinds (`InvalidUrl`, `InvalidSlugFormat`, `SlugTaken`,
/// `NotFound`) are separated from infrastructure kinds (`SlugExhausted`,
/// `StoreUnavailable`) by [`ShortenError::is_client_error`].
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("invalid URL format: {0}")]
    InvalidUrl(String),

    #[error(
        "slug '{0}' must be 3-20 characters and contain only letters, numbers, hyphens, or underscores"
    )]
    InvalidSlugFormat(String),

    #[error("slug '{0}' already exists")]
    SlugTaken(String),

    #[error("failed to generate a unique slug after {attempts} attempts")]
    SlugExhausted { attempts: usize },

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("slug '{0}' not found")]
    NotFound(String),
}

impl ShortenError {
    /// Stable kebab-case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid-url",
            Self::InvalidSlugFormat(_) => "invalid-slug-format",
            Self::SlugTaken(_) => "slug-taken",
            Self::SlugExhausted { .. } => "slug-exhausted",
            Self::StoreUnavailable(_) => "store-unavailable",
            Self::NotFound(_) => "not-found",
        }
    }

    /// Returns true when the caller's input caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::InvalidSlugFormat(_) | Self::SlugTaken(_) | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_and_infrastructure_kinds_are_distinct() {
        assert!(ShortenError::InvalidUrl("x".into()).is_client_error());
        assert!(ShortenError::InvalidSlugFormat("ab".into()).is_client_error());
        assert!(ShortenError::SlugTaken("abc".into()).is_client_error());
        assert!(ShortenError::NotFound("abc".into()).is_client_error());

        assert!(!ShortenError::SlugExhausted { attempts: 10 }.is_client_error());
        assert!(
            !ShortenError::StoreUnavailable(StoreError::Connection("refused".into()))
                .is_client_error()
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ShortenError::InvalidUrl("x".into()).kind(), "invalid-url");
        assert_eq!(
            ShortenError::SlugExhausted { attempts: 10 }.kind(),
            "slug-exhausted"
        );
        assert_eq!(
            ShortenError::from(StoreError::Command("boom".into())).kind(),
            "store-unavailable"
        );
    }
}
