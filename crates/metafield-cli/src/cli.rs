//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use metafield_core::MissingFieldPolicy;

/// metafield - strip inline meta-field declarations and fill template references
#[derive(Parser, Debug)]
#[command(name = "metafield", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "METAFIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the policy for unresolved references (empty, keep, warn)
    #[arg(long, global = true)]
    pub on_missing: Option<MissingFieldPolicy>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove declarations from a content file and print the cleaned body
    Extract {
        /// Content file to read
        file: PathBuf,

        /// Write the field table as JSON to this file instead of stderr
        #[arg(long)]
        meta_out: Option<PathBuf>,
    },

    /// Fill references in a template and print the result
    Render {
        /// Template file to read
        template: PathBuf,

        /// Content file whose declarations supply the fields
        #[arg(long, conflicts_with = "meta", required_unless_present = "meta")]
        content: Option<PathBuf>,

        /// JSON object of fields, as written by `extract --meta-out`
        #[arg(long)]
        meta: Option<PathBuf>,
    },

    /// Render one template for every file in a content directory
    Site {
        /// Directory of content files (not searched recursively)
        content_dir: PathBuf,

        /// Template applied to each document
        template: PathBuf,

        /// Output directory; created if missing
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        /// Destination (defaults to the platform config directory)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_content() {
        let args = ["metafield", "render", "t.html", "--content", "a.md"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Render { template, content, meta } = cli.command else {
            unreachable!("Expected Render command");
        };
        assert_eq!(template, PathBuf::from("t.html"));
        assert_eq!(content, Some(PathBuf::from("a.md")));
        assert!(meta.is_none());
    }

    #[test]
    fn test_render_requires_a_field_source() {
        assert!(Cli::try_parse_from(["metafield", "render", "t.html"]).is_err());
        assert!(
            Cli::try_parse_from(["metafield", "render", "t.html", "--content", "a", "--meta", "b"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_on_missing() {
        let args = ["metafield", "--on-missing", "keep", "extract", "a.md"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.on_missing, Some(MissingFieldPolicy::Keep));
    }

    #[test]
    fn test_reject_bad_policy() {
        let args = ["metafield", "--on-missing", "loud", "extract", "a.md"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
