//! Slug generation and validation utilities.
//!
//! Random slugs are drawn from the 62-symbol alphanumeric alphabet using the
//! thread-local generator, so concurrent callers never share or reseed state.
//! Custom slugs additionally allow `-` and `_`.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Shortest custom slug accepted by [`is_valid_slug`].
pub const CUSTOM_SLUG_MIN_LEN: usize = 3;

/// Longest custom slug accepted by [`is_valid_slug`].
pub const CUSTOM_SLUG_MAX_LEN: usize = 20;

/// Generates a random candidate slug.
///
/// The length is picked uniformly in `[min_len, max_len]`, then each character
/// is drawn independently from `[a-zA-Z0-9]`. The result is not guaranteed to be
/// unique; callers check the store for collisions.
///
/// # Panics
///
/// Panics if `min_len > max_len`. Configuration validation rules this out.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug(4, 6);
/// assert!((4..=6).contains(&slug.len()));
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug(min_len: usize, max_len: usize) -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(min_len..=max_len);

    rng.sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Checks a user-supplied slug against the custom slug syntax.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: `a-z`, `A-Z`, `0-9`, `-`, `_`
///
/// Comparison is exact and case-sensitive; nothing is normalized.
pub fn is_valid_slug(candidate: &str) -> bool {
    (CUSTOM_SLUG_MIN_LEN..=CUSTOM_SLUG_MAX_LEN).contains(&candidate.len())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
