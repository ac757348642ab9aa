use anyhow::Context;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

pub mod client;
pub(crate) mod operations;

pub use client::GithubRepositoryClient;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Creates a GitHub client that authenticates every request with the given token.
///
/// Every request is sent exactly once. Creating a review or a comment is not idempotent.
pub fn create_github_client(token: SecretString, base_url: &str) -> anyhow::Result<Octocrab> {
    let mut builder = Octocrab::builder()
        .base_uri(base_url)
        .with_context(|| format!("Invalid GitHub API URL {base_url}"))?
        .personal_token(token.expose_secret().to_string());
    builder.add_retry_config(RetryConfig::None);
    builder.build().context("Could not create octocrab builder")
}
