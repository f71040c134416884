//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout. Errors and warnings go to stderr prefixed with
//! the program name, e.g. `atr: error: No revision number found.`
//! Narration for `--verbose` commands only prints at [`Verbosity::Verbose`].

use std::fmt::Display;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

/// Program name used in diagnostics.
pub const PROGRAM: &str = "atr";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Results only
    Normal,
    /// Results plus step-by-step narration
    Verbose,
}

impl Verbosity {
    /// Create verbosity from a `--verbose` flag.
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a result line.
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print a narration line (only in verbose mode).
pub fn narrate(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Verbose {
        println!("{}", message);
    }
}

/// Format an error line.
pub fn error_line(message: impl Display) -> String {
    format!("{}: error: {}", PROGRAM, message)
}

/// Format a warning line.
pub fn warning_line(message: impl Display) -> String {
    format!("{}: warning: {}", PROGRAM, message)
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("{}", error_line(message));
}

/// Print a warning message (always shown).
pub fn warn(message: impl Display) {
    eprintln!("{}", warning_line(message));
}

/// JSON with no whitespace, e.g. `{"a":1,"b":[2,3]}`.
pub fn json_compact<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// JSON on one line with a space after each separator, e.g.
/// `{"a": 1, "b": [2, 3]}`.
pub fn json_spaced<T: Serialize + ?Sized>(value: &T) -> String {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// JSON indented by two spaces.
pub fn json_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}
