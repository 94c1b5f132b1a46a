//! # metafield-cli
//!
//! Command-line host for the metafield content filter:
//! - `extract`: strip declarations from a content file
//! - `render`: fill references in a template
//! - `site`: render a template for every document in a directory
//! - `config`: inspect and create the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction};
