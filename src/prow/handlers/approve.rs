use anyhow::Context;

use crate::config::ActionConfig;
use crate::github::IssueNumber;
use crate::permissions::AuthorizationRole;
use crate::prow::command::{get_command_args, is_cancel, CommandName};
use crate::prow::comment::{approve_denied_comment, review_dismissal_message};
use crate::prow::event::TriggerEvent;
use crate::prow::handlers::{authorize_or_notify, CommandError};
use crate::prow::{RepositoryClient, ReviewState};

/// Approve a pull request with a review authored by the bot.
/// `/approve cancel` dismisses the last approval of the bot instead.
pub(super) async fn command_approve<Client: RepositoryClient>(
    client: &Client,
    config: &ActionConfig,
    event: &TriggerEvent,
) -> anyhow::Result<()> {
    authorize_or_notify(
        client,
        event,
        AuthorizationRole::Approvers,
        approve_denied_comment,
    )
    .await?;

    let args = get_command_args(CommandName::Approve.as_str(), event.body());
    let pr = event.parent();
    if is_cancel(&args) {
        return cancel_approval(client, config, pr, &event.author().username)
            .await
            .context("could not remove latest review");
    }

    tracing::info!("Approving PR {pr}");
    client
        .approve_pull_request(pr)
        .await
        .context("could not create review")
}

/// Dismisses the last approving review created by the bot.
async fn cancel_approval<Client: RepositoryClient>(
    client: &Client,
    config: &ActionConfig,
    pr: IssueNumber,
    commenter: &str,
) -> anyhow::Result<()> {
    tracing::info!("Canceling latest approval of PR {pr}");
    let reviews = client
        .list_reviews(pr)
        .await
        .with_context(|| format!("could not list reviews for PR {pr}"))?;

    // The last matching review in the listing wins, regardless of its id.
    let Some(review) = reviews
        .iter()
        .filter(|review| review.author == config.bot_login && review.state == ReviewState::Approved)
        .last()
    else {
        return Err(CommandError::NoReviewToCancel.into());
    };

    tracing::debug!("Dismissing review {}", review.id);
    client
        .dismiss_review(
            pr,
            review.id,
            &review_dismissal_message(&config.bot_name, commenter),
        )
        .await
        .context("could not dismiss review")
}
