//! This is the library of the prow GitHub Actions bot.
pub mod config;
pub mod github;
pub mod permissions;
pub mod prow;
pub mod utils;

pub use config::ActionConfig;
pub use github::api::create_github_client;
pub use prow::{dispatch, RepositoryClient};

#[cfg(test)]
mod tests;
