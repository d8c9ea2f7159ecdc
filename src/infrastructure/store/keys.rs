//! Key naming for URL and stats records.

const URL_NAMESPACE: &str = "url:";
const STATS_NAMESPACE: &str = "stats:";

/// Builds store keys for a slug under an optional deployment prefix.
///
/// With an empty prefix the keys are `url:<slug>` and `stats:<slug>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn url_key(&self, slug: &str) -> String {
        format!("{}{}{}", self.prefix, URL_NAMESPACE, slug)
    }

    pub fn stats_key(&self, slug: &str) -> String {
        format!("{}{}{}", self.prefix, STATS_NAMESPACE, slug)
    }

    /// Glob pattern matching every stats key.
    pub fn stats_pattern(&self) -> String {
        format!("{}{}*", self.prefix, STATS_NAMESPACE)
    }

    /// Extracts the slug from a stats key, or `None` for foreign keys.
    pub fn slug_from_stats_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix.as_str())?
            .strip_prefix(STATS_NAMESPACE)
            .filter(|slug| !slug.is_empty())
    }
}
