//! Field name rules.
//!
//! Field names are case-sensitive identifiers made of ASCII letters, digits,
//! underscores, and hyphens. Both declaration and reference tokens use the
//! same rule, so the scanners share these helpers.

/// Returns `true` if `b` may appear in a field name.
///
/// # Examples
///
/// ```
/// use metafield_core::util::ids::is_field_byte;
///
/// assert!(is_field_byte(b'a'));
/// assert!(is_field_byte(b'-'));
/// assert!(!is_field_byte(b':'));
/// assert!(!is_field_byte(b'}'));
/// ```
#[inline]
pub fn is_field_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Returns `true` if `name` is a valid, non-empty field name.
///
/// # Examples
///
/// ```
/// use metafield_core::util::ids::is_field_name;
///
/// assert!(is_field_name("title"));
/// assert!(is_field_name("post_date-2"));
/// assert!(!is_field_name(""));
/// assert!(!is_field_name("two words"));
/// assert!(!is_field_name("título"));
/// ```
pub fn is_field_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_field_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bytes() {
        for b in b"azAZ09_-" {
            assert!(is_field_byte(*b), "{} should be a field byte", *b as char);
        }
        for b in b" :{}.\n\t/" {
            assert!(!is_field_byte(*b), "{:?} should not be a field byte", *b as char);
        }
    }

    #[test]
    fn test_non_ascii_bytes_rejected() {
        for b in "é音".bytes() {
            assert!(!is_field_byte(b));
        }
    }

    #[test]
    fn test_field_name_case_sensitive_and_valid() {
        assert!(is_field_name("Title"));
        assert!(is_field_name("title"));
        assert!(is_field_name("-"));
    }

    #[test]
    fn test_field_name_rejects_whitespace_and_colon() {
        assert!(!is_field_name(" title"));
        assert!(!is_field_name("title:"));
        assert!(!is_field_name("a b"));
    }
}
