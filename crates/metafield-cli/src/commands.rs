//! Handlers for the `extract`, `render`, and `site` commands.
//!
//! Each handler writes its primary output to the supplied writer so the
//! binary can pass stdout and tests can pass a buffer.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use metafield_content::{ContentHook, Extractor, Hooks, MetaFields, SiteContent, Substituter};
use metafield_core::{Error, FieldTable, MetaConfig, Result};

/// Field that `site` fills with the cleaned body unless a document declares it.
pub const BODY_FIELD: &str = "content";

/// Read a UTF-8 file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))
}

fn write_out(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| Error::io_with_path(e, "<stdout>"))
}

/// Extract declarations from `file`, write the cleaned body to `out`, and
/// return the field table. With `meta_out`, the table is also written there
/// as JSON.
pub fn cmd_extract(
    file: &Path,
    meta_out: Option<&Path>,
    config: &MetaConfig,
    out: &mut impl Write,
) -> Result<FieldTable> {
    let content = read_text(file)?;
    let (body, fields) = Extractor::from_config(config).extract(&content).into_parts();
    log::info!("{}: {} field(s)", file.display(), fields.len());

    write_out(out, &body)?;

    if let Some(path) = meta_out {
        let json = serde_json::to_string_pretty(&fields)?;
        std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Wrote fields to {}", path.display());
    }
    Ok(fields)
}

/// Where `render` takes its fields from.
#[derive(Debug, Clone)]
pub enum FieldSource {
    /// Declarations in a content file.
    Content(PathBuf),
    /// A JSON object written by `extract --meta-out`.
    Json(PathBuf),
}

impl FieldSource {
    /// Load the field table.
    pub fn load(&self, config: &MetaConfig) -> Result<FieldTable> {
        match self {
            FieldSource::Content(path) => {
                let content = read_text(path)?;
                let (_, fields) = Extractor::from_config(config).extract(&content).into_parts();
                Ok(fields)
            }
            FieldSource::Json(path) => Ok(serde_json::from_str(&read_text(path)?)?),
        }
    }
}

/// Render `template` with fields from `source` and write the result to `out`.
///
/// Returns the names of unresolved references.
pub fn cmd_render(
    template: &Path,
    source: &FieldSource,
    config: &MetaConfig,
    out: &mut impl Write,
) -> Result<Vec<String>> {
    let fields = source.load(config)?;
    let template_text = read_text(template)?;
    let rendered = Substituter::from_config(config).render(&template_text, &fields);
    write_out(out, rendered.text())?;
    Ok(rendered.unresolved().to_vec())
}

/// Exposes each document's cleaned body as the `content` field.
///
/// References inside the body are filled from the document's own fields
/// first, since values inserted into a template are not scanned again.
#[derive(Debug, Default, Clone, Copy)]
pub struct BodyField {
    substituter: Substituter,
}

impl BodyField {
    /// Create the hook with the substituter used for bodies.
    pub fn new(substituter: Substituter) -> Self {
        Self { substituter }
    }
}

impl ContentHook for BodyField {
    fn name(&self) -> &str {
        "body"
    }

    fn load_content(&self, site: &mut SiteContent) {
        for (_, entry) in site.iter_mut() {
            if !entry.meta.contains(BODY_FIELD) {
                let body = self.substituter.render(&entry.content, &entry.meta).into_text();
                entry.meta.insert(BODY_FIELD, body);
            }
        }
    }

    fn single_content(&self, content: &str, _key: &str, _site: &SiteContent) -> Result<String> {
        Ok(content.to_string())
    }
}

/// Load every regular file directly inside `dir`, keyed by file name.
pub fn load_dir(dir: &Path) -> Result<SiteContent> {
    let mut site = SiteContent::new();
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_with_path(e, dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        site.insert(name, read_text(&path)?);
    }
    Ok(site)
}

/// Output path for document `key`: its file stem with an `.html` extension.
pub fn output_path(out_dir: &Path, key: &str) -> PathBuf {
    let stem = Path::new(key)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(key);
    out_dir.join(format!("{stem}.html"))
}

/// Map every document to its output path, failing if two documents share one.
fn plan_outputs<'a>(site: &'a SiteContent, out_dir: &Path) -> Result<Vec<(&'a str, PathBuf)>> {
    let mut claimed: BTreeMap<PathBuf, &str> = BTreeMap::new();
    let mut plan = Vec::with_capacity(site.len());
    for (key, _) in site {
        let path = output_path(out_dir, key);
        if let Some(other) = claimed.insert(path.clone(), key.as_str()) {
            return Err(Error::config(format!(
                "'{other}' and '{key}' would both be written to {}",
                path.display()
            )));
        }
        plan.push((key.as_str(), path));
    }
    Ok(plan)
}

/// Render `template` once per document in `content_dir` into `out_dir`.
///
/// Each output is named after the document's file stem with an `.html`
/// extension. Documents whose stems collide are rejected before anything is
/// written. Returns the written paths in document order.
pub fn cmd_site(
    content_dir: &Path,
    template: &Path,
    out_dir: &Path,
    config: &MetaConfig,
) -> Result<Vec<PathBuf>> {
    let template_text = read_text(template)?;
    let mut site = load_dir(content_dir)?;

    // BodyField runs after MetaFields so it sees cleaned bodies.
    let hooks = Hooks::new()
        .with(MetaFields::new(config))
        .with(BodyField::new(Substituter::from_config(config)));
    hooks.load_content(&mut site);

    let plan = plan_outputs(&site, out_dir)?;
    std::fs::create_dir_all(out_dir).map_err(|e| Error::io_with_path(e, out_dir))?;

    let mut written = Vec::with_capacity(plan.len());
    for (key, path) in plan {
        let html = hooks.single_content(&template_text, key, &site)?;
        std::fs::write(&path, html).map_err(|e| Error::io_with_path(e, &path))?;
        log::info!("{key} -> {}", path.display());
        written.push(path);
    }
    Ok(written)
}
