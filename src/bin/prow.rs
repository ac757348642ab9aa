use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use prow_actions::config::{load_event_payload, ConfigError, DEFAULT_BOT_LOGIN, DEFAULT_BOT_NAME};
use prow_actions::github::api::{GithubRepositoryClient, DEFAULT_GITHUB_API_URL};
use prow_actions::github::parse_trigger_event;
use prow_actions::{create_github_client, dispatch, ActionConfig};

/// Runs prow commands found in the comment that triggered the workflow.
#[derive(clap::Parser)]
struct Opts {
    /// Token used to access the GitHub API.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Space or newline delimited list of enabled commands.
    #[arg(long, env = "INPUT_PROW-COMMANDS", default_value = "")]
    commands: String,

    /// Name of the event that triggered the workflow.
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    event_name: String,

    /// Path to the JSON webhook payload of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    api_url: String,

    /// Name of the bot used in messages.
    #[arg(long, env = "INPUT_BOT-NAME", default_value = DEFAULT_BOT_NAME)]
    bot_name: String,

    /// Login of the account whose reviews the bot may dismiss.
    #[arg(long, env = "INPUT_BOT-LOGIN", default_value = DEFAULT_BOT_LOGIN)]
    bot_login: String,
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let token = opts
        .github_token
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingCredential)?;

    let payload = load_event_payload(&opts.event_path)?;
    let event = parse_trigger_event(&opts.event_name, &payload)?;
    tracing::debug!("Received event {event:?}");

    let config = ActionConfig {
        commands: opts.commands,
        bot_name: opts.bot_name,
        bot_login: opts.bot_login,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(async {
        let client = create_github_client(SecretString::new(token), &opts.api_url)?;
        let client = GithubRepositoryClient::new(client, event.repository().clone());
        dispatch(&client, &config, &event).await?;
        Ok::<_, anyhow::Error>(())
    })
}

fn main() {
    // Standard output is reserved for workflow commands.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        tracing::error!("{error:?}");
        println!("::error::{error:#}");
        std::process::exit(1);
    }
}
