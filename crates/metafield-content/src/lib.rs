//! Meta-field extraction and substitution for static-site content.
//!
//! Content files declare fields inline with `{{name: value}}`. This crate
//! strips those declarations from the body, collects them into a
//! [`FieldTable`], and fills `{{name}}` references in templates from it.
//!
//! # Modules
//!
//! - [`fields`]: The extraction and substitution passes
//!   - [`fields::extract`]: Declaration removal
//!   - [`fields::substitute`]: Reference replacement
//! - [`site`]: Per-site store of documents and their fields
//! - [`hooks`]: The interface a host uses to run filters
//!
//! # Example
//!
//! ```rust
//! use metafield_content::{extract, substitute};
//!
//! let page = extract("{{title: Hello World}}\n\n# Body");
//! assert_eq!(page.body(), "# Body");
//!
//! let html = substitute("<title>{{title}}</title>", page.fields());
//! assert_eq!(html, "<title>Hello World</title>");
//! ```

#![forbid(unsafe_code)]

pub mod fields;
pub mod hooks;
pub mod site;

// Re-export commonly used types
pub use fields::{Extraction, Extractor, Rendered, Substituter, extract, substitute};
pub use hooks::{ContentHook, Hooks, MetaFields};
pub use site::{ContentEntry, SiteContent};

// Re-export core types for convenience
pub use metafield_core::{FieldTable, MetaConfig, MissingFieldPolicy};
