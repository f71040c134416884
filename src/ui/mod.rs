//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Printing of results, narration, warnings and errors
//! - [`display`] - Text rendering of releases and check results
//!
//! All command output goes through this module so that diagnostics share
//! the `atr: error:` / `atr: warning:` prefixes.

pub mod display;
pub mod output;
