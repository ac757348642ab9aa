//! Contains definitions of common types (repository name, user, issue number) needed
//! for working with GitHub repositories.
use std::fmt::{Debug, Display, Formatter};

pub mod api;
pub mod event;

pub use event::{parse_trigger_event, EventError};

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GithubUser {
    pub username: String,
}

impl GithubUser {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
        }
    }
}

/// Number of an issue or a pull request. GitHub shares the numbering between both, and
/// a pull request can be addressed through the issues API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssueNumber(pub u64);

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for IssueNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}
