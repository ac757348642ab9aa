use anyhow::Context;
use base64::Engine;
use http::StatusCode;

use crate::github::api::client::GithubRepositoryClient;

/// Checks whether a user is part of some group using an endpoint that answers with
/// `204 No Content` for members.
///
/// Documentation:
/// - https://docs.github.com/en/rest/orgs/members?apiVersion=2022-11-28#check-organization-membership-for-a-user
/// - https://docs.github.com/en/rest/collaborators/collaborators?apiVersion=2022-11-28#check-if-a-user-is-a-repository-collaborator
pub async fn check_membership(repo: &GithubRepositoryClient, route: &str) -> anyhow::Result<bool> {
    let client = repo.client();
    let response = client
        ._get(route)
        .await
        .with_context(|| format!("Cannot send request to {route}"))?;

    let status = response.status();
    tracing::trace!("Membership check {route}: {status}");
    match status {
        StatusCode::NO_CONTENT => Ok(true),
        // GitHub answers with a redirect if the requester itself is not an organization member.
        StatusCode::NOT_FOUND | StatusCode::FORBIDDEN | StatusCode::FOUND => Ok(false),
        _ => {
            let text = client.body_to_string(response).await.unwrap_or_default();
            Err(anyhow::anyhow!(
                "Unexpected response from {route} ({status}): {text}"
            ))
        }
    }
}

#[derive(serde::Deserialize)]
struct ContentResponse {
    encoding: Option<String>,
    content: Option<String>,
}

/// Loads a file from the default branch of the repository.
/// Returns `None` if the file does not exist.
///
/// Documentation: https://docs.github.com/en/rest/repos/contents?apiVersion=2022-11-28#get-repository-content
pub async fn get_file_content(
    repo: &GithubRepositoryClient,
    path: &str,
) -> anyhow::Result<Option<String>> {
    let client = repo.client();
    let route = format!("/repos/{}/contents/{path}", repo.name());
    let response = client
        ._get(route.as_str())
        .await
        .with_context(|| format!("Cannot send request to {route}"))?;

    let status = response.status();
    let text = client.body_to_string(response).await.unwrap_or_default();
    match status {
        StatusCode::OK => {
            let response: ContentResponse = serde_json::from_str(&text)
                .with_context(|| format!("Cannot deserialize content of {path}"))?;
            decode_content(response)
                .with_context(|| format!("Cannot decode content of {path}"))
                .map(Some)
        }
        StatusCode::NOT_FOUND => Ok(None),
        _ => Err(anyhow::anyhow!(
            "Cannot load {path} from {} ({status}): {text}",
            repo.name()
        )),
    }
}

fn decode_content(response: ContentResponse) -> anyhow::Result<String> {
    let Some(content) = response.content else {
        return Err(anyhow::anyhow!("Response does not contain file content"));
    };
    match response.encoding.as_deref() {
        Some("base64") => {
            // GitHub wraps the encoded content into lines.
            let content: String = content.split_whitespace().collect();
            let bytes = base64::prelude::BASE64_STANDARD.decode(content)?;
            Ok(String::from_utf8(bytes)?)
        }
        Some("utf-8") | None => Ok(content),
        Some(encoding) => Err(anyhow::anyhow!("Unknown content encoding {encoding}")),
    }
}
