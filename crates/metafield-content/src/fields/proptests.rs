//! Property-based tests for the extraction and substitution passes.

#[cfg(test)]
mod tests {
    use crate::fields::{Substituter, extract, substitute};
    use metafield_core::{FieldTable, MissingFieldPolicy, is_field_byte};
    use proptest::prelude::*;

    /// Brute-force check for `{{name:...}}` anywhere in `s`.
    fn has_declaration(s: &str) -> bool {
        let bytes = s.as_bytes();
        (0..bytes.len()).any(|p| {
            if !bytes[p..].starts_with(b"{{") {
                return false;
            }
            let name_len = bytes[p + 2..].iter().take_while(|&&b| is_field_byte(b)).count();
            let colon = p + 2 + name_len;
            name_len > 0
                && bytes.get(colon) == Some(&b':')
                && s[colon + 1..].contains("}}")
        })
    }

    proptest! {
        #[test]
        fn test_text_without_colon_unchanged(s in "[^:]{0,64}") {
            let result = extract(&s);
            prop_assert_eq!(result.body(), s.as_str());
            prop_assert!(result.fields().is_empty());
        }

        #[test]
        fn test_cleaned_body_has_no_declaration(s in "[ab{}: \n-]{0,48}") {
            let result = extract(&s);
            prop_assert!(
                !has_declaration(result.body()),
                "left a declaration in {:?}",
                result.body()
            );
        }

        #[test]
        fn test_extract_idempotent(s in "[ab{}: \n]{0,48}") {
            let first = extract(&s);
            let second = extract(first.body());
            prop_assert_eq!(second.body(), first.body());
            prop_assert!(second.fields().is_empty());
        }

        #[test]
        fn test_declaration_roundtrips_value(
            name in "[A-Za-z0-9_-]{1,12}",
            value in "[^{}]{0,24}",
            body in "[a-z #\n]{0,24}",
        ) {
            let content = format!("{{{{{name}:{value}}}}}\n{body}");
            let result = extract(&content);
            prop_assert_eq!(result.fields().get(&name), Some(value.trim()));
            prop_assert_eq!(result.removed(), 1);
        }

        #[test]
        fn test_substitute_never_touches_declarations(
            name in "[A-Za-z0-9_-]{1,12}",
            value in "[a-z {]{0,12}",
            tail in "[a-z ]{0,8}",
        ) {
            let token = format!("{{{{{name}:{value}}}}}");
            let fields: FieldTable = [(name.as_str(), "replaced")].into_iter().collect();
            prop_assert_eq!(substitute(&token, &fields), token.clone());

            // The value may spell out a reference that the declaration's own
            // `}}` closes.
            let token = format!("{{{{{name}:{value}{{{{{name}}}}}{tail}");
            prop_assert_eq!(substitute(&token, &fields), token.clone());
        }

        #[test]
        fn test_keep_policy_with_empty_table_is_identity(s in "[ab{}: \n]{0,48}") {
            let keep = Substituter::new(MissingFieldPolicy::Keep);
            let rendered = keep.render(&s, &FieldTable::new());
            prop_assert_eq!(rendered.text(), s.as_str());
        }
    }
}
