use std::fmt::{Display, Formatter};

use itertools::Itertools;
use thiserror::Error;
use tracing::Instrument;

use crate::config::ActionConfig;
use crate::permissions::{assert_authorized, AuthorizationRole};
use crate::prow::command::{enabled_commands, CommandName};
use crate::prow::event::TriggerEvent;
use crate::prow::{Comment, RepositoryClient};
use crate::utils::logging::LogError;

mod approve;
mod lgtm;

use approve::command_approve;
use lgtm::command_lgtm;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("please provide a list of space delimited commands / jobs to run. None found")]
    NoCommandsConfigured,
    #[error("could not execute {0}. May not be supported - please refer to docs")]
    UnsupportedCommand(String),
    #[error("no latest review found to cancel")]
    NoReviewToCancel,
    #[error("the {0} label is not present on the issue")]
    LabelNotPresent(String),
}

/// A single command that failed during dispatch.
#[derive(Debug)]
pub struct CommandFailure {
    pub command: String,
    pub error: anyhow::Error,
}

/// All commands of a comment that failed. Commands that succeeded are not included.
#[derive(Debug)]
pub struct DispatchError {
    kind: &'static str,
    failures: Vec<CommandFailure>,
}

impl DispatchError {
    pub fn failures(&self) -> &[CommandFailure] {
        &self.failures
    }
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error handling {}: {}",
            self.kind,
            self.failures
                .iter()
                .map(|failure| format!("{}: {:#}", failure.command, failure.error))
                .join("; ")
        )
    }
}

impl std::error::Error for DispatchError {}

/// Runs every enabled command that is mentioned in the comment of the event.
///
/// The commands run concurrently and a failing command does not stop the others. Failures are
/// collected and returned together once all commands have finished.
pub async fn dispatch<Client: RepositoryClient>(
    client: &Client,
    config: &ActionConfig,
    event: &TriggerEvent,
) -> Result<(), DispatchError> {
    let body = event.body();
    tracing::trace!("Text: {body}");

    let commands: Vec<&str> = enabled_commands(&config.commands)
        .into_iter()
        .filter(|command| body.contains(command))
        .collect();
    tracing::debug!("Commands: {commands:?}");

    let results = futures::future::join_all(commands.into_iter().map(|command| {
        let span = tracing::info_span!(
            "Command",
            command,
            pr = format!("{}#{}", event.repository(), event.parent()),
            author = event.author().username
        );
        async move {
            let result = run_command(client, config, event, command).await;
            if let Err(ref error) = result {
                tracing::error!("Command {command} failed: {error:?}");
            }
            (command, result)
        }
        .instrument(span)
    }))
    .await;

    let failures: Vec<CommandFailure> = results
        .into_iter()
        .filter_map(|(command, result)| {
            result.err().map(|error| CommandFailure {
                command: command.to_string(),
                error,
            })
        })
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(DispatchError {
            kind: event.kind(),
            failures,
        })
    }
}

async fn run_command<Client: RepositoryClient>(
    client: &Client,
    config: &ActionConfig,
    event: &TriggerEvent,
    command: &str,
) -> anyhow::Result<()> {
    if command.is_empty() {
        return Err(CommandError::NoCommandsConfigured.into());
    }
    match command.parse::<CommandName>() {
        Ok(CommandName::Approve) => command_approve(client, config, event).await,
        Ok(CommandName::Lgtm) => command_lgtm(client, event).await,
        Err(()) => Err(CommandError::UnsupportedCommand(command.to_string()).into()),
    }
}

/// Checks that the author of the event has the given role.
///
/// If they do not, the bot tries to explain why on the issue. The authorization error is returned
/// even if posting the explanation fails.
async fn authorize_or_notify<Client: RepositoryClient>(
    client: &Client,
    event: &TriggerEvent,
    role: AuthorizationRole,
    denied_comment: fn(&anyhow::Error) -> Comment,
) -> anyhow::Result<()> {
    let author = &event.author().username;
    if let Err(error) = assert_authorized(client, role, author).await {
        tracing::warn!("{author} is not authorized as {role}: {error}");
        if let Err(comment_error) = client
            .post_comment(event.parent(), denied_comment(&error))
            .await
        {
            tracing::Span::current().log_side_failure("comment with an auth error", comment_error);
        }
        return Err(error);
    }
    Ok(())
}
