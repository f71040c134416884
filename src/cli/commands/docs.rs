//! docs command - Render help for every command group as Markdown

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::ui::output;

/// Print the documentation.
pub fn docs() -> Result<()> {
    output::print(markdown().trim_end());
    Ok(())
}

/// Help for the root command and every command group.
///
/// Each section is headed by the command path, with one `#` per level of
/// nesting, followed by the help text in a code block. Groups are visited
/// in name order.
pub fn markdown() -> String {
    let mut cmd = Cli::command();
    cmd.build();
    let mut path = vec![cmd.get_name().to_string()];
    let mut out = String::new();
    render(&mut cmd, &mut path, &mut out);
    out
}

fn render(cmd: &mut clap::Command, path: &mut Vec<String>, out: &mut String) {
    let help = cmd.render_help().to_string();
    out.push_str(&format!(
        "\n{} {}\n\n```\n{}\n```\n",
        "#".repeat(path.len()),
        path.join(" "),
        help.trim_end()
    ));

    let mut groups: Vec<String> = cmd
        .get_subcommands()
        .filter(|sub| sub.get_name() != "help" && sub.has_subcommands())
        .map(|sub| sub.get_name().to_string())
        .collect();
    groups.sort();

    for name in groups {
        if let Some(sub) = cmd.find_subcommand_mut(&name) {
            path.push(name);
            render(sub, path, out);
            path.pop();
        }
    }
}
