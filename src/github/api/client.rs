use anyhow::Context;
use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::api::operations::{check_membership, get_file_content};
use crate::github::{GithubRepoName, IssueNumber};
use crate::prow::{Comment, RepositoryClient, Review, ReviewState};

/// Provides access to a single repository using the GitHub API.
pub struct GithubRepositoryClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    pub fn name(&self) -> &GithubRepoName {
        &self.repo_name
    }

    fn format_issue(&self, issue: IssueNumber) -> String {
        format!("{}#{issue}", self.name())
    }
}

#[async_trait]
impl RepositoryClient for GithubRepositoryClient {
    fn repository(&self) -> &GithubRepoName {
        self.name()
    }

    async fn get_file_content(&self, path: &str) -> anyhow::Result<Option<String>> {
        get_file_content(self, path).await
    }

    async fn is_org_member(&self, org: &str, username: &str) -> anyhow::Result<bool> {
        check_membership(self, &format!("/orgs/{org}/members/{username}")).await
    }

    async fn is_collaborator(&self, username: &str) -> anyhow::Result<bool> {
        check_membership(
            self,
            &format!("/repos/{}/collaborators/{username}", self.name()),
        )
        .await
    }

    async fn post_comment(&self, issue: IssueNumber, comment: Comment) -> anyhow::Result<()> {
        // https://docs.github.com/en/rest/issues/comments?apiVersion=2022-11-28#create-an-issue-comment
        let _: serde_json::Value = self
            .client
            .post(
                format!("/repos/{}/issues/{issue}/comments", self.name()),
                Some(&serde_json::json!({ "body": comment.render() })),
            )
            .await
            .with_context(|| format!("Cannot post comment to {}", self.format_issue(issue)))?;
        Ok(())
    }

    async fn list_reviews(&self, pr: IssueNumber) -> anyhow::Result<Vec<Review>> {
        #[derive(serde::Deserialize)]
        struct UserPayload {
            login: String,
        }

        #[derive(serde::Deserialize)]
        struct ReviewPayload {
            id: u64,
            user: Option<UserPayload>,
            state: ReviewState,
        }

        // https://docs.github.com/en/rest/pulls/reviews?apiVersion=2022-11-28#list-reviews-for-a-pull-request
        let page: Page<ReviewPayload> = self
            .client
            .get(
                format!("/repos/{}/pulls/{pr}/reviews", self.name()),
                Some(&[("per_page", "100")][..]),
            )
            .await
            .with_context(|| format!("Cannot list reviews of {}", self.format_issue(pr)))?;
        let reviews = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot list reviews of {}", self.format_issue(pr)))?;

        Ok(reviews
            .into_iter()
            .map(|review| Review {
                id: review.id,
                // Reviews of deleted accounts do not have an author.
                author: review.user.map(|user| user.login).unwrap_or_default(),
                state: review.state,
            })
            .collect())
    }

    async fn approve_pull_request(&self, pr: IssueNumber) -> anyhow::Result<()> {
        // https://docs.github.com/en/rest/pulls/reviews?apiVersion=2022-11-28#create-a-review-for-a-pull-request
        let _: serde_json::Value = self
            .client
            .post(
                format!("/repos/{}/pulls/{pr}/reviews", self.name()),
                Some(&serde_json::json!({ "event": "APPROVE", "comments": [] })),
            )
            .await
            .with_context(|| format!("Cannot approve {}", self.format_issue(pr)))?;
        Ok(())
    }

    async fn dismiss_review(
        &self,
        pr: IssueNumber,
        review_id: u64,
        message: &str,
    ) -> anyhow::Result<()> {
        // https://docs.github.com/en/rest/pulls/reviews?apiVersion=2022-11-28#dismiss-a-review-for-a-pull-request
        let _: serde_json::Value = self
            .client
            .put(
                format!(
                    "/repos/{}/pulls/{pr}/reviews/{review_id}/dismissals",
                    self.name()
                ),
                Some(&serde_json::json!({ "message": message, "event": "DISMISS" })),
            )
            .await
            .with_context(|| {
                format!(
                    "Cannot dismiss review {review_id} of {}",
                    self.format_issue(pr)
                )
            })?;
        Ok(())
    }

    async fn get_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct LabelPayload {
            name: String,
        }

        // https://docs.github.com/en/rest/issues/labels?apiVersion=2022-11-28#list-labels-for-an-issue
        let page: Page<LabelPayload> = self
            .client
            .get(
                format!("/repos/{}/issues/{issue}/labels", self.name()),
                Some(&[("per_page", "100")][..]),
            )
            .await
            .with_context(|| format!("Cannot list labels of {}", self.format_issue(issue)))?;
        let labels = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot list labels of {}", self.format_issue(issue)))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn add_labels(&self, issue: IssueNumber, labels: &[String]) -> anyhow::Result<()> {
        if labels.is_empty() {
            return Ok(());
        }
        self.client
            .issues(self.name().owner(), self.name().name())
            .add_labels(issue.0, labels)
            .await
            .with_context(|| format!("Cannot add label(s) to {}", self.format_issue(issue)))?;
        Ok(())
    }

    async fn remove_label(&self, issue: IssueNumber, label: &str) -> anyhow::Result<()> {
        self.client
            .issues(self.name().owner(), self.name().name())
            .remove_label(issue.0, label)
            .await
            .with_context(|| {
                format!(
                    "Cannot remove label {label} from {}",
                    self.format_issue(issue)
                )
            })?;
        Ok(())
    }
}
