//! atrclient - A command-line client for Apache Trusted Releases (ATR)
//!
//! `atr` drives release-management workflows against an ATR server:
//! starting releases, uploading files, inspecting check results, running
//! votes and announcements, managing signing keys, and verifying artifact
//! signatures.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`api`] - Typed client for the ATR JSON API
//! - [`auth`] - JWT lifecycle backed by a stored Personal Access Token
//! - [`config`] - Locked YAML configuration file with dotted-key access
//! - [`verify`] - OpenPGP detached signature verification
//! - [`ui`] - Output and rendering of results
//!
//! # Invariants
//!
//! 1. Every configuration read and write happens under the file lock
//! 2. Token values never reach logs or debug output
//! 3. Every API result is checked against the endpoint that produced it

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod ui;
pub mod verify;
