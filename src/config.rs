use std::path::Path;

use thiserror::Error;

pub const DEFAULT_BOT_NAME: &str = "prow-github-actions";
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input required and not supplied: github-token")]
    MissingCredential,
    #[error("Cannot read event payload from {path}")]
    EventPayload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration of a single action run, read once from the action inputs.
#[derive(Clone, Debug)]
pub struct ActionConfig {
    /// Space or newline delimited list of enabled commands, e.g. `/approve /lgtm`.
    pub commands: String,
    /// Name of the bot, used in messages posted by the bot.
    pub bot_name: String,
    /// Login of the account the bot acts as. Reviews created by this account can be dismissed.
    pub bot_login: String,
}

impl ActionConfig {
    pub fn new(commands: impl Into<String>) -> Self {
        Self {
            commands: commands.into(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
        }
    }
}

/// Reads the webhook payload that the Actions runtime stored for the triggering event.
pub fn load_event_payload(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::EventPayload {
        path: path.display().to_string(),
        source,
    })
}
