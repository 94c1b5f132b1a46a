//! Host hook interface.
//!
//! Hosts call filters at two points: once after all content is loaded, and
//! once per document when its content or template text is rendered. Filters
//! are handed to the host explicitly through a [`Hooks`] list; there is no
//! process-wide registry.
//!
//! # Example
//!
//! ```rust
//! use metafield_content::{Hooks, MetaFields, SiteContent};
//!
//! let hooks = Hooks::new().with(MetaFields::default());
//!
//! let mut site = SiteContent::new();
//! site.insert("post.md", "{{title: Hi}}\nBody");
//! hooks.load_content(&mut site);
//!
//! let html = hooks.single_content("<h1>{{title}}</h1>", "post.md", &site).unwrap();
//! assert_eq!(html, "<h1>Hi</h1>");
//! ```

use metafield_core::{MetaConfig, Result};

use crate::fields::{Extractor, Substituter};
use crate::site::SiteContent;

/// A content filter the host invokes during site generation.
pub trait ContentHook: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Called once after the host has loaded every content document.
    fn load_content(&self, site: &mut SiteContent);

    /// Called with text belonging to document `key` before it is written out.
    fn single_content(&self, content: &str, key: &str, site: &SiteContent) -> Result<String>;
}

/// The meta-field filter: strips declarations on load, fills references on
/// render.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaFields {
    extractor: Extractor,
    substituter: Substituter,
}

impl MetaFields {
    /// Build the filter from configuration.
    pub fn new(config: &MetaConfig) -> Self {
        Self {
            extractor: Extractor::from_config(config),
            substituter: Substituter::from_config(config),
        }
    }

    /// The extractor used on load.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// The substituter used on render.
    pub fn substituter(&self) -> &Substituter {
        &self.substituter
    }
}

impl ContentHook for MetaFields {
    fn name(&self) -> &str {
        "meta"
    }

    fn load_content(&self, site: &mut SiteContent) {
        let removed = site.load_meta_fields(&self.extractor);
        log::info!("meta: removed {removed} declaration(s) from {} document(s)", site.len());
    }

    fn single_content(&self, content: &str, key: &str, site: &SiteContent) -> Result<String> {
        let rendered = site.render(key, content, &self.substituter)?;
        if !rendered.is_complete() {
            log::debug!("{key}: unresolved {:?}", rendered.unresolved());
        }
        Ok(rendered.into_text())
    }
}

/// Ordered list of filters supplied by the host.
#[derive(Default)]
pub struct Hooks {
    hooks: Vec<Box<dyn ContentHook>>,
}

impl Hooks {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn with(mut self, hook: impl ContentHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` if no filters are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every filter's load step in order.
    pub fn load_content(&self, site: &mut SiteContent) {
        for hook in &self.hooks {
            log::debug!("load_content: {}", hook.name());
            hook.load_content(site);
        }
    }

    /// Thread `content` through every filter's render step in order.
    pub fn single_content(&self, content: &str, key: &str, site: &SiteContent) -> Result<String> {
        let mut current = content.to_string();
        for hook in &self.hooks {
            current = hook.single_content(&current, key, site)?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}
