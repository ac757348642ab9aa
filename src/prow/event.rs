use crate::github::{GithubRepoName, GithubUser, IssueNumber};

/// An event that can carry prow commands.
///
/// Constructed once from the webhook payload, so that everything downstream works with a
/// single shape no matter which GitHub event triggered the run.
#[derive(Clone, Debug)]
pub enum TriggerEvent {
    /// A comment was posted on an issue or a pull request.
    IssueComment(CommentEvent),
    /// A review was submitted on a pull request.
    PullRequestReview(CommentEvent),
}

impl TriggerEvent {
    fn inner(&self) -> &CommentEvent {
        match self {
            TriggerEvent::IssueComment(event) | TriggerEvent::PullRequestReview(event) => event,
        }
    }

    pub fn repository(&self) -> &GithubRepoName {
        &self.inner().repository
    }

    pub fn comment(&self) -> &TriggerComment {
        &self.inner().comment
    }

    /// The issue or pull request the comment belongs to.
    pub fn parent(&self) -> IssueNumber {
        self.inner().parent
    }

    pub fn author(&self) -> &GithubUser {
        &self.comment().author
    }

    /// Comment text, an absent body is treated as empty.
    pub fn body(&self) -> &str {
        self.comment().body.as_deref().unwrap_or_default()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TriggerEvent::IssueComment(_) => "issue_comment",
            TriggerEvent::PullRequestReview(_) => "pull_request_review",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommentEvent {
    pub repository: GithubRepoName,
    pub comment: TriggerComment,
    pub parent: IssueNumber,
}

/// The comment (or review body) that triggered the event.
#[derive(Clone, Debug)]
pub struct TriggerComment {
    pub body: Option<String>,
    pub author: GithubUser,
}
