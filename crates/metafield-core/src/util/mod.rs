//! Utility modules.
//!
//! - [`ids`]: Field name rules shared by the scanners

pub mod ids;
