//! Configuration resolution and the `config` subcommands.
//!
//! The config file is found in this order:
//!
//! 1. `--config <FILE>` (or `METAFIELD_CONFIG`), which must exist
//! 2. `<platform config dir>/metafield/config.toml`, if present
//! 3. Built-in defaults

use std::io::Write;
use std::path::{Path, PathBuf};

use metafield_core::{Error, MetaConfig, MissingFieldPolicy, Result};

use crate::cli::ConfigAction;

const PROJECT_NAME: &str = "metafield";

// ============================================================================
// Resolution
// ============================================================================

/// Default config file location for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
}

/// The config path that will be used, explicit or default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_config_path)
}

/// Load the effective configuration, applying a CLI policy override.
pub fn load_config(
    explicit: Option<&Path>,
    on_missing: Option<MissingFieldPolicy>,
) -> Result<MetaConfig> {
    let mut config = match explicit {
        Some(path) => MetaConfig::load(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => MetaConfig::load(&path)?,
            _ => {
                log::debug!("No config file found, using defaults");
                MetaConfig::default()
            }
        },
    };
    if let Some(policy) = on_missing {
        config.on_missing = policy;
    }
    Ok(config)
}

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a `config` subcommand.
pub fn handle_config_command(
    explicit: Option<&Path>,
    config: &MetaConfig,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(explicit, out),
        ConfigAction::Show => cmd_config_show(config, out),
        ConfigAction::Init { file, force } => {
            cmd_config_init(file.as_deref(), force, out).map(|_| ())
        }
    }
}

/// Print the resolved config file path.
pub fn cmd_config_path(explicit: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let path = resolve_config_path(explicit)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    writeln!(out, "{}", path.display()).map_err(|e| Error::io_with_path(e, "<stdout>"))?;
    if !path.exists() {
        log::info!(
            "{} does not exist; run `{PROJECT_NAME} config init` to create it",
            path.display()
        );
    }
    Ok(())
}

/// Print the effective configuration.
pub fn cmd_config_show(config: &MetaConfig, out: &mut impl Write) -> Result<()> {
    let text = config.to_toml_string()?;
    write!(out, "{text}").map_err(|e| Error::io_with_path(e, "<stdout>"))
}

/// Write a default configuration file and return its path.
pub fn cmd_config_init(file: Option<&Path>, force: bool, out: &mut impl Write) -> Result<PathBuf> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let text = MetaConfig::default().to_toml_string()?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())
        .map_err(|e| Error::io_with_path(e, "<stdout>"))?;
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
