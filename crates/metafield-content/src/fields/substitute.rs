//! Reference substitution.
//!
//! Templates refer to fields with `{{name}}`. The substituter replaces each
//! reference with the field's value from a [`FieldTable`]; references to
//! fields the table does not hold are handled by a [`MissingFieldPolicy`].
//!
//! Declarations (`{{name: value}}`) are never touched, and inserted values
//! are not scanned again.
//!
//! # Usage
//!
//! ```rust
//! use metafield_content::fields::substitute;
//! use metafield_core::FieldTable;
//!
//! let fields: FieldTable = [("title", "Hello World")].into_iter().collect();
//! let html = substitute("<title>{{title}}</title>", &fields);
//! assert_eq!(html, "<title>Hello World</title>");
//! ```

use std::collections::BTreeSet;

use metafield_core::{FieldTable, MetaConfig, MissingFieldPolicy, is_field_byte};

/// Result of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    text: String,
    unresolved: Vec<String>,
}

impl Rendered {
    /// The rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take ownership of the rendered text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Names of referenced fields that were not in the table, in order of
    /// first appearance.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Returns `true` if every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Single-pass reference scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substituter {
    on_missing: MissingFieldPolicy,
}

impl Substituter {
    /// Create a substituter with the given miss policy.
    pub fn new(on_missing: MissingFieldPolicy) -> Self {
        Self { on_missing }
    }

    /// Create a substituter from configuration.
    pub fn from_config(config: &MetaConfig) -> Self {
        Self::new(config.on_missing)
    }

    /// The active miss policy.
    pub fn policy(&self) -> MissingFieldPolicy {
        self.on_missing
    }

    /// Replace every `{{name}}` in `template` using `fields`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use metafield_content::fields::Substituter;
    /// use metafield_core::{FieldTable, MissingFieldPolicy};
    ///
    /// let fields = FieldTable::new();
    /// let keep = Substituter::new(MissingFieldPolicy::Keep);
    /// let rendered = keep.render("by {{author}}", &fields);
    ///
    /// assert_eq!(rendered.text(), "by {{author}}");
    /// assert_eq!(rendered.unresolved(), ["author"]);
    /// ```
    pub fn render(&self, template: &str, fields: &FieldTable) -> Rendered {
        let bytes = template.as_bytes();
        let mut text = String::with_capacity(template.len());
        let mut unresolved = Vec::new();
        let mut seen = BTreeSet::new();

        let mut copied = 0;
        let mut search = 0;
        while let Some(rel) = template[search..].find("{{") {
            let open = search + rel;
            let name_start = open + 2;
            let name_end = bytes[name_start..]
                .iter()
                .position(|&b| !is_field_byte(b))
                .map_or(bytes.len(), |p| name_start + p);

            if name_end == name_start {
                search = open + 1;
                continue;
            }

            // A declaration runs to the first `}}` after its colon and is
            // copied as-is, including any reference-like text in its value.
            if bytes[name_end..].starts_with(b":") {
                match template[name_end + 1..].find("}}") {
                    Some(rel) => {
                        search = name_end + 1 + rel + 2;
                        continue;
                    }
                    // Nothing after this point can close a reference.
                    None => break,
                }
            }

            if !template[name_end..].starts_with("}}") {
                search = open + 1;
                continue;
            }

            let name = &template[name_start..name_end];
            let end = name_end + 2;
            text.push_str(&template[copied..open]);

            match fields.get(name) {
                Some(value) => text.push_str(value),
                None => {
                    let first = seen.insert(name);
                    if first {
                        unresolved.push(name.to_string());
                    }
                    match self.on_missing {
                        MissingFieldPolicy::Empty => {}
                        MissingFieldPolicy::Keep => text.push_str(&template[open..end]),
                        MissingFieldPolicy::Warn => {
                            if first {
                                log::warn!("Unresolved field reference '{{{{{name}}}}}'");
                            }
                        }
                    }
                }
            }

            copied = end;
            search = end;
        }
        text.push_str(&template[copied..]);

        Rendered { text, unresolved }
    }
}

/// Substitute references with the default policy (unresolved → empty).
///
/// # Example
///
/// ```rust
/// use metafield_content::fields::substitute;
/// use metafield_core::FieldTable;
///
/// assert_eq!(substitute("{{missing}}", &FieldTable::new()), "");
/// ```
pub fn substitute(template: &str, fields: &FieldTable) -> String {
    Substituter::default().render(template, fields).into_text()
}

// ============================================================================
// Tests
// ============================================================================
