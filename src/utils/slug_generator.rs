//! Random slug generation and reserved-slug checks.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of generated slugs.
pub const SLUG_LENGTH: usize = 8;

/// Random bytes per slug; 6 bytes encode to exactly 8 base64 characters.
const SLUG_LENGTH_BYTES: usize = SLUG_LENGTH / 4 * 3;

/// Slugs shadowed by fixed routes (`GET /health`, `/url`).
const RESERVED_SLUGS: &[&str] = &["health", "url"];

/// Generates a random URL-safe slug of [`SLUG_LENGTH`] characters.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, so the alphabet is `[A-Za-z0-9_-]`.
///
/// # Panics
///
/// Panics if the system random number generator fails.
pub fn generate_slug() -> String {
    let mut buffer = [0u8; SLUG_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Rejects caller-supplied slugs that can never be resolved.
///
/// Any other non-empty slug is accepted verbatim. Empty slugs never reach
/// this check; the caller generates a slug instead.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for reserved slugs.
pub fn ensure_not_reserved(slug: &str) -> Result<(), AppError> {
    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_slug_has_configured_length() {
        assert_eq!(generate_slug().len(), SLUG_LENGTH);
    }

    #[test]
    fn test_generate_slug_url_safe_characters() {
        for _ in 0..100 {
            let slug = generate_slug();
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {slug}"
            );
        }
    }

    #[test]
    fn test_generate_slug_no_padding() {
        assert!(!generate_slug().contains('='));
    }

    #[test]
    fn test_generate_slug_produces_unique_slugs() {
        let slugs: HashSet<_> = (0..1000).map(|_| generate_slug()).collect();
        assert_eq!(slugs.len(), 1000);
    }

    #[test]
    fn test_reserved_slug_rejected() {
        let err = ensure_not_reserved("health").unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_all_reserved_slugs() {
        for &reserved in RESERVED_SLUGS {
            assert!(
                ensure_not_reserved(reserved).is_err(),
                "Reserved slug '{}' should be rejected",
                reserved
            );
        }
    }

    #[test]
    fn test_arbitrary_slugs_pass_through() {
        assert!(ensure_not_reserved("custom1").is_ok());
        assert!(ensure_not_reserved("Ünïcode slug").is_ok());
        assert!(ensure_not_reserved("urls").is_ok());
    }
}
