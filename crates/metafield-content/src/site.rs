//! Per-site content store.
//!
//! A host loads its content documents into a [`SiteContent`], runs
//! [`SiteContent::load_meta_fields`] once, and then renders each document's
//! templates against that document's own [`FieldTable`].
//!
//! # Example
//!
//! ```rust
//! use metafield_content::fields::{Extractor, Substituter};
//! use metafield_content::SiteContent;
//!
//! let mut site = SiteContent::new();
//! site.insert("about.md", "{{title: About}}\n\nWho we are.");
//! site.load_meta_fields(&Extractor::new());
//!
//! assert_eq!(site.get("about.md").unwrap().content, "Who we are.");
//!
//! let page = site
//!     .render("about.md", "<h1>{{title}}</h1>", &Substituter::default())
//!     .unwrap();
//! assert_eq!(page.text(), "<h1>About</h1>");
//! ```

use std::collections::btree_map::{self, BTreeMap};

use metafield_core::{Error, FieldTable, Result};

use crate::fields::{Extractor, Rendered, Substituter};

/// One content document and its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentEntry {
    /// Document body. Holds the cleaned body after extraction.
    pub content: String,
    /// Fields for this document. May be seeded by the host before extraction.
    pub meta: FieldTable,
}

impl ContentEntry {
    /// Create an entry with no fields.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            meta: FieldTable::new(),
        }
    }

    /// Create an entry with host-supplied fields.
    pub fn with_meta(content: impl Into<String>, meta: FieldTable) -> Self {
        Self {
            content: content.into(),
            meta,
        }
    }
}

/// Content documents keyed by host-chosen identifiers (usually paths).
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    entries: BTreeMap<String, ContentEntry>,
}

impl SiteContent {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any entry with the same key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<ContentEntry> {
        self.insert_entry(key, ContentEntry::new(content))
    }

    /// Add a prepared entry, replacing any entry with the same key.
    pub fn insert_entry(
        &mut self,
        key: impl Into<String>,
        entry: ContentEntry,
    ) -> Option<ContentEntry> {
        self.entries.insert(key.into(), entry)
    }

    /// Look up a document.
    pub fn get(&self, key: &str) -> Option<&ContentEntry> {
        self.entries.get(key)
    }

    /// The field table of a document.
    pub fn meta(&self, key: &str) -> Option<&FieldTable> {
        self.entries.get(key).map(|e| &e.meta)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over documents in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ContentEntry> {
        self.entries.iter()
    }

    /// Iterate mutably over documents in key order.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, ContentEntry> {
        self.entries.iter_mut()
    }

    /// Extract declarations from every document.
    ///
    /// Each body is replaced by its cleaned form and the extracted fields are
    /// merged into the entry's existing table, overwriting on conflict.
    /// Returns the total number of declarations removed.
    pub fn load_meta_fields(&mut self, extractor: &Extractor) -> usize {
        let mut total = 0;
        for (key, entry) in &mut self.entries {
            let result = extractor.extract(&entry.content);
            total += result.removed();
            if result.removed() > 0 {
                log::debug!("{key}: {} field(s)", result.fields().len());
            }
            let (body, fields) = result.into_parts();
            entry.content = body;
            entry.meta.merge(fields);
        }
        total
    }

    /// Render `template` against the fields of document `key`.
    pub fn render(&self, key: &str, template: &str, substituter: &Substituter) -> Result<Rendered> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| Error::unknown_document(key))?;
        Ok(substituter.render(template, &entry.meta))
    }
}

impl<'a> IntoIterator for &'a SiteContent {
    type Item = (&'a String, &'a ContentEntry);
    type IntoIter = btree_map::Iter<'a, String, ContentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
