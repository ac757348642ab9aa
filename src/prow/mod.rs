use async_trait::async_trait;

use crate::github::{GithubRepoName, IssueNumber};

pub mod command;
mod comment;
pub mod event;
mod handlers;

pub use comment::Comment;
pub use handlers::{dispatch, CommandError, DispatchError};

/// Provides functionality for working with a remote repository.
///
/// Every operation is a single request, failures are not retried.
#[async_trait]
pub trait RepositoryClient: Sync {
    fn repository(&self) -> &GithubRepoName;

    /// Load the content of a file from the default branch.
    /// Returns `None` if the file does not exist.
    async fn get_file_content(&self, path: &str) -> anyhow::Result<Option<String>>;

    /// Is `username` a member of the given organization?
    async fn is_org_member(&self, org: &str, username: &str) -> anyhow::Result<bool>;

    /// Is `username` a collaborator of this repository?
    async fn is_collaborator(&self, username: &str) -> anyhow::Result<bool>;

    /// Post a comment to the issue or pull request with the given number.
    async fn post_comment(&self, issue: IssueNumber, comment: Comment) -> anyhow::Result<()>;

    /// List reviews of a pull request, in the order returned by GitHub.
    async fn list_reviews(&self, pr: IssueNumber) -> anyhow::Result<Vec<Review>>;

    /// Create an approving review without any comments.
    async fn approve_pull_request(&self, pr: IssueNumber) -> anyhow::Result<()>;

    /// Dismiss a review with the given message.
    async fn dismiss_review(
        &self,
        pr: IssueNumber,
        review_id: u64,
        message: &str,
    ) -> anyhow::Result<()>;

    /// Names of the labels currently attached to an issue.
    async fn get_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>>;

    /// Add a set of labels to an issue.
    async fn add_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()>;

    /// Remove a single label from an issue.
    async fn remove_label(&self, issue: IssueNumber, label: &str) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    #[serde(other)]
    Other,
}

/// A review attached to a pull request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    pub id: u64,
    pub author: String,
    pub state: ReviewState,
}
