use anyhow::Context;

use crate::github::IssueNumber;
use crate::permissions::AuthorizationRole;
use crate::prow::command::{get_command_args, is_cancel, CommandName};
use crate::prow::comment::lgtm_denied_comment;
use crate::prow::event::TriggerEvent;
use crate::prow::handlers::{authorize_or_notify, CommandError};
use crate::prow::RepositoryClient;

/// Label signaling that a reviewer has signed off on the change.
pub const LGTM_LABEL: &str = "lgtm";

/// Mark an issue as reviewed with the `lgtm` label.
/// `/lgtm cancel` removes the label instead.
pub(super) async fn command_lgtm<Client: RepositoryClient>(
    client: &Client,
    event: &TriggerEvent,
) -> anyhow::Result<()> {
    authorize_or_notify(
        client,
        event,
        AuthorizationRole::Reviewers,
        lgtm_denied_comment,
    )
    .await?;

    let args = get_command_args(CommandName::Lgtm.as_str(), event.body());
    let issue = event.parent();
    if is_cancel(&args) {
        return cancel_label(client, issue)
            .await
            .context("could not remove latest review");
    }

    // Adding a label that is already present is a no-op on GitHub's side.
    tracing::info!("Adding label {LGTM_LABEL} to {issue}");
    client
        .add_labels(issue, &[LGTM_LABEL.to_string()])
        .await
        .with_context(|| format!("could not add the {LGTM_LABEL} label"))
}

async fn cancel_label<Client: RepositoryClient>(
    client: &Client,
    issue: IssueNumber,
) -> anyhow::Result<()> {
    let labels = client
        .get_labels(issue)
        .await
        .with_context(|| format!("could not list labels of {issue}"))?;
    if !labels.iter().any(|label| label == LGTM_LABEL) {
        return Err(CommandError::LabelNotPresent(LGTM_LABEL.to_string()).into());
    }
    tracing::info!("Removing label {LGTM_LABEL} from {issue}");
    client.remove_label(issue, LGTM_LABEL).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::event::{comment, default_pr_number};
    use crate::tests::state::{ClientBuilder, TestRepositoryClient};

    const REVIEWERS: &str = "reviewers:\n- Codertocat\n";

    async fn lgtm(client: &TestRepositoryClient, text: &str) -> anyhow::Result<()> {
        command_lgtm(client, &comment(text).author("Codertocat").create()).await
    }

    #[tokio::test]
    async fn lgtm_as_owners_reviewer() {
        let client = ClientBuilder::default().owners(REVIEWERS).create();
        lgtm(&client, "/lgtm").await.unwrap();

        client.check_added_labels(default_pr_number(), &["lgtm"]);
        client.check_comments(default_pr_number(), &[]);
    }

    #[tokio::test]
    async fn lgtm_by_approver_only_is_denied() {
        let client = ClientBuilder::default()
            .owners("approvers:\n- Codertocat\n")
            .create();
        lgtm(&client, "/lgtm").await.unwrap_err();

        client.check_added_labels(default_pr_number(), &[]);
        insta::assert_snapshot!(
            client.get_last_comment(default_pr_number()),
            @"Cannot apply the lgtm label because Codertocat is not included in the reviewers role in the OWNERS file"
        );
    }

    #[tokio::test]
    async fn lgtm_by_stranger_is_denied() {
        let client = ClientBuilder::default().create();
        let error = lgtm(&client, "/lgtm").await.unwrap_err();

        assert!(error
            .downcast_ref::<crate::permissions::AuthorizationError>()
            .is_some());
        client.check_added_labels(default_pr_number(), &[]);
        client.check_comments(
            default_pr_number(),
            &["Cannot apply the lgtm label because Codertocat is not a org member or collaborator"],
        );
    }

    #[tokio::test]
    async fn lgtm_twice_on_labeled_issue() {
        let client = ClientBuilder::default()
            .collaborator("Codertocat")
            .labels(&["lgtm"])
            .create();
        lgtm(&client, "/lgtm").await.unwrap();
        lgtm(&client, "/lgtm").await.unwrap();

        client.check_added_labels(default_pr_number(), &["lgtm", "lgtm"]);
        client.check_labels(default_pr_number(), &["lgtm"]);
    }

    #[tokio::test]
    async fn lgtm_cancel_removes_label() {
        let client = ClientBuilder::default()
            .owners(REVIEWERS)
            .labels(&["bug", "lgtm"])
            .create();
        lgtm(&client, "/lgtm cancel").await.unwrap();

        client.check_removed_labels(default_pr_number(), &["lgtm"]);
        client.check_labels(default_pr_number(), &["bug"]);
    }

    #[tokio::test]
    async fn lgtm_cancel_without_label() {
        let client = ClientBuilder::default()
            .owners(REVIEWERS)
            .labels(&["bug"])
            .create();
        let error = lgtm(&client, "/lgtm cancel").await.unwrap_err();

        assert_eq!(
            error.root_cause().downcast_ref::<CommandError>(),
            Some(&CommandError::LabelNotPresent("lgtm".to_string()))
        );
        client.check_removed_labels(default_pr_number(), &[]);
    }

    #[tokio::test]
    async fn lgtm_cancel_failure_is_reported() {
        let client = ClientBuilder::default()
            .owners(REVIEWERS)
            .labels(&["lgtm"])
            .fail_labels(true)
            .create();
        let error = lgtm(&client, "/lgtm cancel").await.unwrap_err();
        insta::assert_snapshot!(
            format!("{error:#}"),
            @"could not remove latest review: could not list labels of 1: Cannot list labels"
        );
    }

    #[tokio::test]
    async fn lgtm_label_failure_is_reported() {
        let client = ClientBuilder::default()
            .owners(REVIEWERS)
            .fail_labels(true)
            .create();
        let error = lgtm(&client, "/lgtm").await.unwrap_err();
        assert_eq!(error.to_string(), "could not add the lgtm label");
    }
}
