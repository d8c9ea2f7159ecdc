//! Short link entity returned by slug allocation.

/// A freshly allocated slug and its URL record metadata.
///
/// Timestamps are Unix seconds. `expires_at` is when the URL record expires
/// and the slug becomes free again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub slug: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub last_accessed: i64,
    pub click_count: i64,
    pub is_custom_slug: bool,
}

/// Joins the public base URL and a slug into a short link.
pub fn build_short_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_short_url() {
        assert_eq!(
            build_short_url("http://localhost:8080", "abc123"),
            "http://localhost:8080/abc123"
        );
    }

    #[test]
    fn test_build_short_url_trims_trailing_slash() {
        assert_eq!(
            build_short_url("https://s.example.com/", "xY9"),
            "https://s.example.com/xY9"
        );
    }
}
