//! metafield CLI
//!
//! Strip inline meta-field declarations from content and fill template
//! references.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use metafield_cli::commands::{self, FieldSource};
use metafield_cli::config_handlers::{handle_config_command, load_config};
use metafield_cli::{Cli, Command, ConfigAction};
use metafield_core::MetaConfig;

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // `config path` and `config init` must work when the file is missing or broken.
    let config = match &args.command {
        Command::Config {
            action: ConfigAction::Path | ConfigAction::Init { .. },
        } => MetaConfig::default(),
        _ => load_config(args.config.as_deref(), args.on_missing)
            .context("Failed to load configuration")?,
    };
    log::debug!("Using config: {config:?}");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Extract { file, meta_out } => {
            let fields = commands::cmd_extract(&file, meta_out.as_deref(), &config, &mut out)
                .with_context(|| format!("Failed to extract fields from {}", file.display()))?;
            if meta_out.is_none() {
                eprintln!("{}", serde_json::to_string_pretty(&fields)?);
            }
        }
        Command::Render {
            template,
            content,
            meta,
        } => {
            let source = match (content, meta) {
                (Some(path), _) => FieldSource::Content(path),
                (None, Some(path)) => FieldSource::Json(path),
                (None, None) => anyhow::bail!("render needs --content or --meta"),
            };
            let unresolved = commands::cmd_render(&template, &source, &config, &mut out)
                .with_context(|| format!("Failed to render {}", template.display()))?;
            if !unresolved.is_empty() {
                log::debug!("Unresolved references: {}", unresolved.join(", "));
            }
        }
        Command::Site {
            content_dir,
            template,
            out: out_dir,
        } => {
            let written = commands::cmd_site(&content_dir, &template, &out_dir, &config)
                .with_context(|| format!("Failed to render site from {}", content_dir.display()))?;
            tracing::info!(count = written.len(), out = %out_dir.display(), "Site rendered");
        }
        Command::Config { action } => {
            handle_config_command(args.config.as_deref(), &config, action, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
