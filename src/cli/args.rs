//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// atr - command-line client for Apache Trusted Releases
#[derive(Parser, Debug)]
#[command(name = "atr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Announce a release
    #[command(
        name = "announce",
        after_help = "\
EXAMPLES:
    atr announce tooling-test-example 0.3+rc1 00005 -m dev@tooling.apache.org"
    )]
    Announce {
        /// Project name
        project: String,
        /// Release version
        version: String,
        /// Revision number
        revision: String,
        /// Mailing list to send the announcement to
        #[arg(short = 'm', long)]
        mailing_list: String,
        /// Email subject
        #[arg(short, long)]
        subject: Option<String>,
        /// Email body
        #[arg(short, long)]
        body: Option<String>,
        /// Suffix of the path the release is published under
        #[arg(short = 'p', long)]
        path_suffix: Option<String>,
    },

    /// Call the API directly
    #[command(
        name = "api",
        long_about = "Call the API directly.\n\n\
            POSTs the given `--key value` pairs as a JSON object of strings to \
            the endpoint path and prints the JSON response.",
        after_help = "\
EXAMPLES:
    atr api /release/create --project tooling-test-example --version 0.3"
    )]
    Api {
        /// Endpoint path, e.g. /release/create
        path: String,
        /// Request fields as --key value pairs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Check result operations
    Checks {
        #[command(subcommand)]
        action: ChecksAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    atr completion bash >> ~/.bashrc

    # Zsh
    atr completion zsh > \"${fpath[1]}/_atr\"

    # Fish
    atr completion fish > ~/.config/fish/completions/atr.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Developer operations
    Dev {
        #[command(subcommand)]
        action: DevAction,
    },

    /// Show comprehensive CLI documentation in Markdown
    Docs,

    /// Draft operations
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Remove a configuration key using dot notation
    Drop {
        /// Configuration key, e.g. tokens.jwt
        path: String,
    },

    /// Check result ignore rule operations
    Ignore {
        #[command(subcommand)]
        action: IgnoreAction,
    },

    /// JWT operations
    Jwt {
        #[command(subcommand)]
        action: JwtAction,
    },

    /// Keys operations
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// List all files within a release
    List {
        /// Project name
        project: String,
        /// Release version
        version: String,
        /// Revision number (defaults to the latest)
        revision: Option<String>,
    },

    /// Release operations
    Release {
        #[command(subcommand)]
        action: ReleaseAction,
    },

    /// List all revisions for a release
    Revisions {
        /// Project name
        project: String,
        /// Release version
        version: String,
    },

    /// Rsync a release
    #[command(
        name = "rsync",
        long_about = "Rsync a directory into a release.\n\n\
            Runs `rsync -av` over SSH on port 2222 as the configured asf.uid.",
        after_help = "\
EXAMPLES:
    # Upload the current directory to the release root
    atr rsync tooling-test-example 0.3

    # Upload dist/ into the release's source/ directory
    atr rsync tooling-test-example 0.3 dist source"
    )]
    Rsync {
        /// Project name
        project: String,
        /// Release version
        version: String,
        /// Local directory to upload
        #[arg(default_value = ".")]
        source: String,
        /// Directory within the release
        #[arg(default_value = "/")]
        target: String,
    },

    /// Set a configuration value using dot notation
    #[command(
        name = "set",
        after_help = "\
EXAMPLES:
    atr set asf.uid alice
    atr set atr.host localhost.apache.org:8080
    atr set tokens.pat \"$(cat ~/.atr-pat)\""
    )]
    Set {
        /// Configuration key, e.g. asf.uid
        path: String,
        /// Value to store
        value: String,
    },

    /// Show a configuration value using dot notation
    Show {
        /// Configuration key, e.g. atr.host
        path: String,
    },

    /// SSH operations
    Ssh {
        #[command(subcommand)]
        action: SshAction,
    },

    /// Upload a file to a release
    Upload {
        /// Project name
        project: String,
        /// Release version
        version: String,
        /// Path of the file within the release
        path: String,
        /// Local file to upload
        filepath: PathBuf,
    },

    /// Verify an artifact
    #[command(
        name = "verify",
        long_about = "Verify an artifact signature.\n\n\
            Downloads the artifact and its detached .asc signature, asks the ATR \
            which published key made the signature, and checks the signature \
            with that key. Key expiry is ignored.",
        after_help = "\
EXAMPLES:
    atr verify https://downloads.apache.org/example/example-1.0.tar.gz
    atr verify https://downloads.apache.org/example/example-1.0.tar.gz.asc --verbose"
    )]
    Verify {
        /// URL of the artifact or of its .asc signature
        url: String,
        /// Explain each step
        #[arg(long)]
        verbose: bool,
        /// Do not verify TLS certificates when downloading
        #[arg(long)]
        no_verify_tls: bool,
    },

    /// Vote operations
    Vote {
        #[command(subcommand)]
        action: VoteAction,
    },
}

/// Checks subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ChecksAction {
    /// Get check exceptions for a release revision
    Exceptions {
        project: String,
        version: String,
        revision: String,
        /// Include results for archive members
        #[arg(short, long)]
        members: bool,
    },
    /// Get check failures for a release revision
    Failures {
        project: String,
        version: String,
        revision: String,
        /// Include results for archive members
        #[arg(short, long)]
        members: bool,
    },
    /// Get check status for a release revision
    Status {
        project: String,
        version: String,
        /// Revision number (defaults to the latest)
        #[arg(long)]
        revision: Option<String>,
        /// Show counts by depth and example results
        #[arg(short, long)]
        verbose: bool,
    },
    /// Wait for checks to be completed
    Wait {
        project: String,
        version: String,
        /// Revision number (defaults to the latest)
        #[arg(long)]
        revision: Option<String>,
        /// Seconds to wait before giving up
        #[arg(short, long, default_value_t = 60.0)]
        timeout: f64,
        /// Milliseconds between polls
        #[arg(short, long, default_value_t = 500)]
        interval: u64,
    },
    /// Get check warnings for a release revision
    Warnings {
        project: String,
        version: String,
        revision: String,
        /// Include results for archive members
        #[arg(short, long)]
        members: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the configuration file contents
    File,
    /// Show the configuration file path
    Path,
}

/// Dev subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DevAction {
    /// Delete a release
    Delete { project: String, version: String },
    /// Show the ATR_* environment variables
    Env,
    /// Write a test OpenPGP key to tooling-public-test.asc
    Key,
    /// Read a PAT from ~/.atr-pat
    Pat,
    /// Show the current working directory
    Pwd,
    /// Generate a random alphabetical token
    Token,
    /// Show the value of $USER
    User,
}

/// Draft subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DraftAction {
    /// Delete a draft release
    Delete { project: String, version: String },
}

/// Ignore subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum IgnoreAction {
    /// Ignore matching check results
    Add {
        /// Committee that owns the rule
        committee: String,
        /// Release name glob
        #[arg(long)]
        release: Option<String>,
        /// Revision number
        #[arg(long)]
        revision: Option<String>,
        /// Checker name glob
        #[arg(long)]
        checker: Option<String>,
        /// Primary path glob
        #[arg(long)]
        primary_rel_path: Option<String>,
        /// Archive member path glob
        #[arg(long)]
        member_rel_path: Option<String>,
        /// Result status
        #[arg(long, value_enum)]
        status: Option<IgnoreStatus>,
        /// Message glob
        #[arg(long)]
        message: Option<String>,
    },
    /// Delete an ignore rule
    Delete {
        committee: String,
        /// Rule ID as shown by `atr ignore list`
        id: i64,
    },
    /// List the ignore rules of a committee
    List { committee: String },
}

/// JWT subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum JwtAction {
    /// Show decoded JWT payload from stored config
    Dump,
    /// Show JWT payload in human-readable form
    Info,
    /// Fetch a JWT using the stored PAT and store it in config
    Refresh {
        /// ASF UID to authenticate as (defaults to asf.uid)
        #[arg(long)]
        asf_uid: Option<String>,
    },
    /// Show stored JWT token
    Show,
}

/// Keys subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum KeysAction {
    /// Add an OpenPGP key
    Add {
        /// Path to an ASCII-armored public key
        path: PathBuf,
        /// Comma-separated committee names
        #[arg(default_value = "")]
        committees: String,
    },
    /// Delete an OpenPGP key
    Delete { fingerprint: String },
    /// Get an OpenPGP key
    Get { fingerprint: String },
    /// Upload a KEYS file
    Upload {
        /// Path to the KEYS file
        path: PathBuf,
        /// Committee the keys belong to
        committee: String,
    },
    /// List OpenPGP keys for a user
    User {
        /// ASF UID (defaults to asf.uid)
        #[arg(long)]
        asf_uid: Option<String>,
    },
}

/// Release subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ReleaseAction {
    /// Show information about a release
    Info { project: String, version: String },
    /// List releases for a project
    List { project: String },
    /// Start a release
    Start { project: String, version: String },
}

/// SSH subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SshAction {
    /// Add an SSH key
    Add {
        /// Public key text
        text: String,
    },
    /// Delete an SSH key
    Delete { fingerprint: String },
    /// List SSH keys
    List {
        /// ASF UID (defaults to asf.uid)
        #[arg(long)]
        asf_uid: Option<String>,
    },
}

/// Vote subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum VoteAction {
    /// Resolve a vote
    Resolve {
        project: String,
        version: String,
        #[arg(value_enum)]
        resolution: Resolution,
    },
    /// Start a vote
    Start {
        project: String,
        version: String,
        revision: String,
        /// Mailing list to send the vote to
        #[arg(short = 'm', long)]
        mailing_list: String,
        /// Vote duration in hours
        #[arg(short, long, default_value_t = 72)]
        duration: u32,
        /// Email subject
        #[arg(short, long)]
        subject: Option<String>,
        /// File containing the email body
        #[arg(short, long)]
        body: Option<PathBuf>,
    },
    /// Tabulate a vote
    Tabulate { project: String, version: String },
}

/// Outcome of a vote
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Passed,
    Failed,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Passed => "passed",
            Resolution::Failed => "failed",
        }
    }
}

/// Check result statuses that can be ignored
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreStatus {
    Exception,
    Failure,
    Warning,
}

impl IgnoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IgnoreStatus::Exception => "exception",
            IgnoreStatus::Failure => "failure",
            IgnoreStatus::Warning => "warning",
        }
    }
}

/// Shells `atr completion` can generate scripts for.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    PowerShell,
    Zsh,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Elvish => clap_complete::Shell::Elvish,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Zsh => clap_complete::Shell::Zsh,
        }
    }
}
