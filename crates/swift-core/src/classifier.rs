//! # Code Classifier
//!
//! Derives the institution hierarchy from the structure of a SWIFT code.
//!
//! ## Code Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         B P K O P L P W X X X                           │
//! │                         └─┬───┘ └┬┘ └┬┘ └─┬─┘                           │
//! │                         bank  country loc  branch                       │
//! │                         └──────┬──────┘                                 │
//! │                       institution prefix (8)                            │
//! │                                                                         │
//! │  Suffix "XXX" → headquarter                                             │
//! │  Any other suffix → branch of the headquarter with the same prefix      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no foreign key between a branch and its headquarter. Records
//! are grouped purely by prefix, so rows may arrive in any order during
//! bulk import.

use crate::{HEADQUARTER_SUFFIX, PREFIX_LENGTH};

/// Returns true when the code designates a headquarter.
///
/// Case-insensitive and total: any string is accepted, including the empty
/// string (which is not a headquarter).
///
/// ## Example
/// ```rust
/// use swift_core::classifier::is_headquarter;
///
/// assert!(is_headquarter("ABCDEF12XXX"));
/// assert!(is_headquarter("abcdef12xxx"));
/// assert!(!is_headquarter("ABCDEF12ABC"));
/// assert!(!is_headquarter(""));
/// ```
pub fn is_headquarter(code: &str) -> bool {
    code.to_ascii_uppercase().ends_with(HEADQUARTER_SUFFIX)
}

/// Returns the 8-character institution prefix of a code.
///
/// Returns `None` when the code is too short to carry a prefix.
pub fn institution_prefix(code: &str) -> Option<&str> {
    code.get(..PREFIX_LENGTH)
}

/// Canonical form of a code or country key: trimmed, ASCII upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Returns true when both codes belong to the same institution.
pub fn are_institution_mates(a: &str, b: &str) -> bool {
    match (institution_prefix(a), institution_prefix(b)) {
        (Some(pa), Some(pb)) => pa.eq_ignore_ascii_case(pb),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_headquarter() {
        let cases = [
            ("ABCDEF12XXX", true),
            ("ABCDEF12345", false),
            ("", false),
            ("abcdef12xxx", true),
            ("ABCDEF12xXx", true),
            ("XXX", true),
        ];

        for (code, want) in cases {
            assert_eq!(is_headquarter(code), want, "code {:?}", code);
        }
    }

    #[test]
    fn test_is_headquarter_matches_suffix_for_all_case_variants() {
        for code in ["AAAABBCCXXX", "AAAABBCC123", "aaaabbccxxx", "AaAaBbCcXxA"] {
            let expected = code.to_uppercase().ends_with("XXX");
            assert_eq!(is_headquarter(code), expected);
        }
    }

    #[test]
    fn test_institution_prefix() {
        assert_eq!(institution_prefix("BPKOPLPWXXX"), Some("BPKOPLPW"));
        assert_eq!(institution_prefix("BPKOPLPW"), Some("BPKOPLPW"));
        assert_eq!(institution_prefix("BPKO"), None);
        assert_eq!(institution_prefix(""), None);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" bpkoplpwxxx "), "BPKOPLPWXXX");
        assert_eq!(normalize_code("us"), "US");
    }

    #[test]
    fn test_are_institution_mates() {
        assert!(are_institution_mates("ABCDEF12XXX", "ABCDEF12ABC"));
        assert!(are_institution_mates("abcdef12xxx", "ABCDEF12ABC"));
        assert!(!are_institution_mates("ABCDEF12XXX", "ABCDEF13XXX"));
        assert!(!are_institution_mates("ABC", "ABCDEF12XXX"));
    }
}
