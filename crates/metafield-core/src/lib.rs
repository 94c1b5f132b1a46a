//! Metafield Core: shared types, errors, and configuration.
//!
//! This crate provides the foundational types used by the metafield crates.
//! It has no internal metafield dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`table`]: The per-document [`FieldTable`]
//! - [`config`]: [`MetaConfig`] and [`MissingFieldPolicy`]
//! - [`util`]: Field name rules

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod table;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{MetaConfig, MissingFieldPolicy};
pub use error::{Error, Result};
pub use table::FieldTable;
pub use util::ids::{is_field_byte, is_field_name};
