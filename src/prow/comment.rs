/// A comment that can be posted to an issue or a pull request.
#[derive(Debug)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn render(&self) -> &str {
        &self.text
    }
}

pub fn approve_denied_comment(error: &anyhow::Error) -> Comment {
    Comment::new(format!("Cannot approve the pull request: {error}"))
}

pub fn lgtm_denied_comment(error: &anyhow::Error) -> Comment {
    Comment::new(format!("Cannot apply the lgtm label because {error}"))
}

pub fn review_dismissal_message(bot_name: &str, commenter: &str) -> String {
    format!("Canceled through {bot_name} by @{commenter}")
}
