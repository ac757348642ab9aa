mod parser;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use parser::{enabled_commands, get_command_args};

/// Argument that reverts the effect of a previous command.
pub const CANCEL_ARG: &str = "cancel";

/// Prow command supported by the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandName {
    /// Create (or dismiss) an approving review.
    Approve,
    /// Add (or remove) the `lgtm` label.
    Lgtm,
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Approve => "/approve",
            CommandName::Lgtm => "/lgtm",
        }
    }
}

impl Display for CommandName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "/approve" => Ok(CommandName::Approve),
            "/lgtm" => Ok(CommandName::Lgtm),
            _ => Err(()),
        }
    }
}

/// Does the first argument of the command ask to revert its effect?
pub fn is_cancel(args: &[String]) -> bool {
    args.first().is_some_and(|arg| arg == CANCEL_ARG)
}
