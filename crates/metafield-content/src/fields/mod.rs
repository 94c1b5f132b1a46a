//! Declaration extraction and reference substitution.
//!
//! - [`extract`]: Strip `{{name: value}}` declarations into a [`FieldTable`]
//! - [`substitute`]: Replace `{{name}}` references from a [`FieldTable`]
//!
//! Both passes are linear scans over the input with no backtracking, so
//! unbalanced braces in large documents cost no more than plain text.
//!
//! # Example
//!
//! ```rust
//! use metafield_content::fields::{extract, substitute};
//!
//! let page = extract("{{title: Hello World}}\n\n# Body");
//! let html = substitute("<title>{{title}}</title>", page.fields());
//!
//! assert_eq!(page.body(), "# Body");
//! assert_eq!(html, "<title>Hello World</title>");
//! ```
//!
//! [`FieldTable`]: metafield_core::FieldTable

pub mod extract;
pub mod substitute;

mod proptests;

pub use extract::{Extraction, Extractor, extract};
pub use substitute::{Rendered, Substituter, substitute};
