//! Alias generation and validation utilities.
//!
//! Generated aliases are drawn uniformly from the case-sensitive ASCII
//! alphanumeric alphabet. Caller-supplied aliases may additionally contain
//! `-` and `_`.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Longest alias accepted from callers or configuration.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Path segments used by the router itself; an alias with one of these names
/// could never be reached.
pub const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Draws an alias of `length` characters from `[A-Za-z0-9]` using `rng`.
///
/// The randomness source is supplied by the caller, so seeded generators give
/// reproducible output.
///
/// # Examples
///
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let alias = generate_alias(&mut rng, 6);
/// assert_eq!(alias.len(), 6);
/// ```
pub fn generate_alias<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Returns true if the alias is taken by a route.
pub fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// Returns true if every character is URL-path-safe.
pub fn is_alias_charset(alias: &str) -> bool {
    alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters (either case), digits, `-`, `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !is_alias_charset(alias) {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_alias_has_requested_length() {
        let mut rng = rand::rng();
        assert_eq!(generate_alias(&mut rng, DEFAULT_ALIAS_LENGTH).len(), 6);
        assert_eq!(generate_alias(&mut rng, 12).len(), 12);
        assert!(generate_alias(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_generate_alias_alphanumeric_only() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let alias = generate_alias(&mut rng, DEFAULT_ALIAS_LENGTH);
            assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_alias_is_reproducible_with_seed() {
        let a = generate_alias(&mut StdRng::seed_from_u64(7), 6);
        let b = generate_alias(&mut StdRng::seed_from_u64(7), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_alias_rarely_repeats() {
        let mut rng = StdRng::seed_from_u64(1);
        let aliases: HashSet<String> = (0..1000)
            .map(|_| generate_alias(&mut rng, DEFAULT_ALIAS_LENGTH))
            .collect();

        assert!(aliases.len() > 990);
    }

    #[test]
    fn test_generate_alias_uses_both_cases() {
        let mut rng = StdRng::seed_from_u64(3);
        let joined: String = (0..100)
            .map(|_| generate_alias(&mut rng, DEFAULT_ALIAS_LENGTH))
            .collect();

        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_validate_accepts_mixed_case() {
        assert!(validate_custom_alias("a1B2c3").is_ok());
    }

    #[test]
    fn test_validate_accepts_hyphen_and_underscore() {
        assert!(validate_custom_alias("my-link_2024").is_ok());
    }

    #[test]
    fn test_validate_single_char() {
        assert!(validate_custom_alias("x").is_ok());
    }

    #[test]
    fn test_validate_empty_string() {
        let err = validate_custom_alias("").unwrap_err();
        assert!(err.to_string().contains("1-64"));
    }

    #[test]
    fn test_validate_too_long() {
        let alias = "a".repeat(MAX_ALIAS_LENGTH + 1);
        assert!(validate_custom_alias(&alias).is_err());

        let alias = "a".repeat(MAX_ALIAS_LENGTH);
        assert!(validate_custom_alias(&alias).is_ok());
    }

    #[test]
    fn test_validate_rejects_path_characters() {
        for alias in ["a/b", "a b", "a?b", "a#b", "a%20", "ü"] {
            assert!(
                validate_custom_alias(alias).is_err(),
                "alias '{}' should be invalid",
                alias
            );
        }
    }

    #[test]
    fn test_validate_all_reserved_aliases() {
        for &reserved in RESERVED_ALIASES {
            let err = validate_custom_alias(reserved).unwrap_err();
            assert!(err.to_string().contains("reserved"));
        }
    }
}
