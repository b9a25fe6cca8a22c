//! Filename sanitization
//!
//! Vault entity names are free-form; output paths are not. Names pass
//! through [`sanitize_filename`] before they become path segments.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

// Characters Windows Explorer refuses in filenames. Requirements differ
// per filesystem; this set is the common denominator the vault UI also
// rejects.
static FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:\\/*?<>|]").unwrap());

/// Maps an arbitrary name to a filesystem-safe name, deterministically
/// disambiguated.
///
/// Forbidden characters are replaced by spaces. If nothing was replaced
/// the input is returned unchanged. If anything was replaced, the first
/// 8 hex characters of the SHA-256 of the ORIGINAL name are appended, so
/// two distinct names that sanitize to the same string still get
/// distinct outputs (`Model 1/2` and `Model 1 2` would otherwise
/// collide).
pub fn sanitize_filename(name: &str) -> String {
    if !FORBIDDEN.is_match(name) {
        return name.to_string();
    }

    let replaced = FORBIDDEN.replace_all(name, " ");
    tracing::debug!(
        original = %name,
        sanitized = %replaced,
        "Filename contained forbidden characters, replacing"
    );

    let digest = Sha256::digest(name.as_bytes());
    let hash = format!("{digest:x}");
    format!("{replaced}_{}", &hash[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Model"; "plain name")]
    #[test_case("Bracket v2 (rev A)"; "parentheses and spaces are fine")]
    #[test_case("café"; "non-ascii is fine")]
    fn test_clean_names_pass_through(name: &str) {
        assert_eq!(sanitize_filename(name), name);
    }

    #[test_case(":"; "colon")]
    #[test_case("\\"; "backslash")]
    #[test_case("/"; "slash")]
    #[test_case("*"; "asterisk")]
    #[test_case("?"; "question mark")]
    #[test_case("<"; "less than")]
    #[test_case(">"; "greater than")]
    #[test_case("|"; "pipe")]
    fn test_each_forbidden_character_is_replaced(bad: &str) {
        let name = format!("a{bad}b");
        let sanitized = sanitize_filename(&name);
        assert!(!sanitized.contains(bad));
        assert!(sanitized.starts_with("a b_"));
    }

    #[test]
    fn test_sanitize_is_deterministic() {
        let name = "Model 1/2";
        assert_eq!(sanitize_filename(name), sanitize_filename(name));
    }

    #[test]
    fn test_hash_suffix_derives_from_original() {
        let digest = Sha256::digest("Model 1/2".as_bytes());
        let expected = format!("Model 1 2_{}", &format!("{digest:x}")[..8]);
        assert_eq!(sanitize_filename("Model 1/2"), expected);
    }

    #[test]
    fn test_colliding_names_get_distinct_outputs() {
        let a = sanitize_filename("Model 1/2");
        let b = sanitize_filename("Model 1:2");
        let c = sanitize_filename("Model 1 2");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(c, "Model 1 2");
    }

    #[test]
    fn test_suffix_is_eight_hex_chars() {
        let sanitized = sanitize_filename("a/b");
        let suffix = sanitized.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
