//! Extracts prow commands and their arguments from comment text.

/// Returns the whitespace separated arguments that follow the first occurrence of `command`
/// in `text`.
///
/// Returns an empty list if nothing follows the command or if the command is not present.
pub fn get_command_args(command: &str, text: &str) -> Vec<String> {
    let Some(index) = text.find(command) else {
        return vec![];
    };
    text[index + command.len()..]
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// Splits the configured command list into command tokens.
///
/// Newlines are treated as spaces. Tokens are separated by single spaces, so repeated spaces
/// (or an empty list) produce empty tokens, which are reported by the dispatcher.
pub fn enabled_commands(config: &str) -> Vec<&str> {
    let config = config.trim();
    config
        .split([' ', '\n'])
        .map(|token| token.trim_end_matches('\r'))
        .collect()
}
