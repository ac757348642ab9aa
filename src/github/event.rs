use thiserror::Error;

use crate::github::{GithubRepoName, GithubUser, IssueNumber};
use crate::prow::event::{CommentEvent, TriggerComment, TriggerEvent};

#[derive(Error, Debug)]
pub enum EventError {
    #[error("github context does not have an eventName set")]
    MissingEventName,
    #[error("{0} not yet supported")]
    UnsupportedEventKind(String),
    #[error("github context eventName is {kind} but the payload is not a valid {kind} event")]
    MalformedPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("handling of {0} events is not implemented")]
    NotImplemented(String),
}

/// The parts of a webhook repository object that are needed by the bot.
#[derive(serde::Deserialize, Debug)]
struct WebhookRepository {
    name: String,
    owner: WebhookUser,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookUser {
    login: String,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookComment {
    body: Option<String>,
    user: WebhookUser,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookParent {
    number: u64,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookIssueComment {
    repository: WebhookRepository,
    comment: WebhookComment,
    issue: WebhookParent,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookPullRequestReview {
    repository: WebhookRepository,
    review: WebhookComment,
    pull_request: WebhookParent,
}

/// Maps a webhook payload of the given event kind to a [`TriggerEvent`].
pub fn parse_trigger_event(event_name: &str, body: &[u8]) -> Result<TriggerEvent, EventError> {
    match event_name {
        "issue_comment" => {
            let payload: WebhookIssueComment =
                serde_json::from_slice(body).map_err(|source| EventError::MalformedPayload {
                    kind: "issue_comment",
                    source,
                })?;
            Ok(TriggerEvent::IssueComment(comment_event(
                payload.repository,
                payload.comment,
                payload.issue,
            )))
        }
        "pull_request_review" => {
            let payload: WebhookPullRequestReview =
                serde_json::from_slice(body).map_err(|source| EventError::MalformedPayload {
                    kind: "pull_request_review",
                    source,
                })?;
            Ok(TriggerEvent::PullRequestReview(comment_event(
                payload.repository,
                payload.review,
                payload.pull_request,
            )))
        }
        // Mapping a completed run back to the review that started it needs a lookup that is not
        // defined yet.
        "workflow_run" => Err(EventError::NotImplemented(event_name.to_string())),
        "" => Err(EventError::MissingEventName),
        _ => Err(EventError::UnsupportedEventKind(event_name.to_string())),
    }
}

fn comment_event(
    repository: WebhookRepository,
    comment: WebhookComment,
    parent: WebhookParent,
) -> CommentEvent {
    CommentEvent {
        repository: GithubRepoName::new(&repository.owner.login, &repository.name),
        comment: TriggerComment {
            body: comment.body,
            author: GithubUser::new(&comment.user.login),
        },
        parent: IssueNumber(parent.number),
    }
}
