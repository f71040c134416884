//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Reads configuration or calls the API
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Commands that talk to the server are async because they involve
//! network I/O. Their synchronous entry points build a tokio runtime and
//! block on the async implementation.

mod announce;
mod api_cmd;
mod checks;
mod completion;
mod config_cmd;
mod dev;
mod docs;
mod ignore;
mod jwt_cmd;
mod keys;
mod release;
mod rsync;
mod ssh;
mod verify_cmd;
mod vote;

// Re-export command functions for testing and direct invocation
pub use announce::announce;
pub use api_cmd::{api, parse_pairs};
pub use completion::completion;
pub use config_cmd::{drop, set, show};
pub use docs::{docs, markdown};
pub use rsync::{remote_target, rsync};
pub use verify_cmd::verify;

use std::future::Future;

use anyhow::Result;

use crate::cli::args::{
    ChecksAction, Command, ConfigAction, DevAction, DraftAction, IgnoreAction, JwtAction,
    KeysAction, ReleaseAction, SshAction, VoteAction,
};
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        // Configuration
        Command::Set { path, value } => config_cmd::set(ctx, &path, &value),
        Command::Show { path } => config_cmd::show(ctx, &path),
        Command::Drop { path } => config_cmd::drop(ctx, &path),
        Command::Config { action } => match action {
            ConfigAction::File => config_cmd::file(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },

        // Tokens
        Command::Jwt { action } => match action {
            JwtAction::Dump => jwt_cmd::dump(ctx),
            JwtAction::Info => jwt_cmd::info(ctx),
            JwtAction::Refresh { asf_uid } => jwt_cmd::refresh(ctx, asf_uid.as_deref()),
            JwtAction::Show => jwt_cmd::show(ctx),
        },

        // Releases
        Command::Release { action } => match action {
            ReleaseAction::Info { project, version } => release::info(ctx, &project, &version),
            ReleaseAction::List { project } => release::list_releases(ctx, &project),
            ReleaseAction::Start { project, version } => release::start(ctx, &project, &version),
        },
        Command::List {
            project,
            version,
            revision,
        } => release::list(ctx, &project, &version, revision.as_deref()),
        Command::Revisions { project, version } => release::revisions(ctx, &project, &version),
        Command::Upload {
            project,
            version,
            path,
            filepath,
        } => release::upload(ctx, &project, &version, &path, &filepath),
        Command::Draft { action } => match action {
            DraftAction::Delete { project, version } => {
                release::draft_delete(ctx, &project, &version)
            }
        },
        Command::Rsync {
            project,
            version,
            source,
            target,
        } => rsync::rsync(ctx, &project, &version, &source, &target),

        // Checks
        Command::Checks { action } => match action {
            ChecksAction::Exceptions {
                project,
                version,
                revision,
                members,
            } => checks::by_status(ctx, "exception", &project, &version, &revision, members),
            ChecksAction::Failures {
                project,
                version,
                revision,
                members,
            } => checks::by_status(ctx, "failure", &project, &version, &revision, members),
            ChecksAction::Warnings {
                project,
                version,
                revision,
                members,
            } => checks::by_status(ctx, "warning", &project, &version, &revision, members),
            ChecksAction::Status {
                project,
                version,
                revision,
                verbose,
            } => checks::status(ctx, &project, &version, revision, verbose),
            ChecksAction::Wait {
                project,
                version,
                revision,
                timeout,
                interval,
            } => checks::wait(
                ctx,
                &project,
                &version,
                revision.as_deref(),
                timeout,
                interval,
            ),
        },
        Command::Ignore { action } => match action {
            IgnoreAction::Add {
                committee,
                release,
                revision,
                checker,
                primary_rel_path,
                member_rel_path,
                status,
                message,
            } => ignore::add(
                ctx,
                ignore::Rule {
                    committee,
                    release,
                    revision,
                    checker,
                    primary_rel_path,
                    member_rel_path,
                    status,
                    message,
                },
            ),
            IgnoreAction::Delete { committee, id } => ignore::delete(ctx, &committee, id),
            IgnoreAction::List { committee } => ignore::list(ctx, &committee),
        },

        // Keys
        Command::Keys { action } => match action {
            KeysAction::Add { path, committees } => keys::add(ctx, &path, &committees),
            KeysAction::Delete { fingerprint } => keys::delete(ctx, &fingerprint),
            KeysAction::Get { fingerprint } => keys::get(ctx, &fingerprint),
            KeysAction::Upload { path, committee } => keys::upload(ctx, &path, &committee),
            KeysAction::User { asf_uid } => keys::user(ctx, asf_uid),
        },
        Command::Ssh { action } => match action {
            SshAction::Add { text } => ssh::add(ctx, &text),
            SshAction::Delete { fingerprint } => ssh::delete(ctx, &fingerprint),
            SshAction::List { asf_uid } => ssh::list(ctx, asf_uid),
        },

        // Votes and announcements
        Command::Vote { action } => match action {
            VoteAction::Resolve {
                project,
                version,
                resolution,
            } => vote::resolve(ctx, &project, &version, resolution),
            VoteAction::Start {
                project,
                version,
                revision,
                mailing_list,
                duration,
                subject,
                body,
            } => vote::start(
                ctx,
                vote::StartOptions {
                    project: &project,
                    version: &version,
                    revision: &revision,
                    mailing_list: &mailing_list,
                    duration,
                    subject: subject.as_deref(),
                    body: body.as_deref(),
                },
            ),
            VoteAction::Tabulate { project, version } => vote::tabulate(ctx, &project, &version),
        },
        Command::Announce {
            project,
            version,
            revision,
            mailing_list,
            subject,
            body,
            path_suffix,
        } => announce::announce(
            ctx,
            announce::AnnounceOptions {
                project: &project,
                version: &version,
                revision: &revision,
                mailing_list: &mailing_list,
                subject: subject.as_deref(),
                body: body.as_deref(),
                path_suffix: path_suffix.as_deref(),
            },
        ),

        // Verification
        Command::Verify {
            url,
            verbose,
            no_verify_tls,
        } => verify_cmd::verify(ctx, &url, verbose, !no_verify_tls),

        // Miscellaneous
        Command::Api { path, args } => api_cmd::api(ctx, &path, &args),
        Command::Dev { action } => match action {
            DevAction::Delete { project, version } => dev::delete(ctx, &project, &version),
            DevAction::Env => dev::env(),
            DevAction::Key => dev::key(),
            DevAction::Pat => dev::pat(),
            DevAction::Pwd => dev::pwd(),
            DevAction::Token => dev::token(),
            DevAction::User => dev::user(),
        },
        Command::Docs => docs::docs(),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Run an async command implementation to completion.
fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

/// Render a flag the way the server's own tooling prints it.
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
