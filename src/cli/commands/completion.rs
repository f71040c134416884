//! completion command - Print a shell completion script for `atr`

use std::io::Write;

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::{Cli, Shell};

/// Print the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&script(shell))?;
    Ok(())
}

fn script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = Vec::new();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, name, &mut out);
    out
}
