use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use anyhow::Context;
use thiserror::Error;

use crate::prow::RepositoryClient;

/// Path of the file that lists users allowed to run commands, relative to the repository root.
pub const OWNERS_FILE_PATH: &str = "OWNERS";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationRole {
    /// Users allowed to approve pull requests.
    Approvers,
    /// Users allowed to mark pull requests as reviewed.
    Reviewers,
}

impl Display for AuthorizationRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationRole::Approvers => f.write_str("approvers"),
            AuthorizationRole::Reviewers => f.write_str("reviewers"),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("{login} is not included in the {role} role in the OWNERS file")]
    NotInOwnersRole {
        login: String,
        role: AuthorizationRole,
    },
    #[error("{login} is not a org member or collaborator")]
    NotOrgMemberOrCollaborator { login: String },
}

/// Users listed in the `OWNERS` file of a repository.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Owners {
    approvers: HashSet<String>,
    reviewers: HashSet<String>,
}

impl Owners {
    pub fn has_role(&self, username: &str, role: AuthorizationRole) -> bool {
        match role {
            AuthorizationRole::Approvers => self.approvers.contains(username),
            AuthorizationRole::Reviewers => self.reviewers.contains(username),
        }
    }

    /// Parses the YAML content of an `OWNERS` file.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        #[derive(serde::Deserialize)]
        struct OwnersFile {
            #[serde(default)]
            approvers: Option<HashSet<String>>,
            #[serde(default)]
            reviewers: Option<HashSet<String>>,
        }

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: OwnersFile = serde_yaml::from_str(content)?;
        Ok(Self {
            approvers: file.approvers.unwrap_or_default(),
            reviewers: file.reviewers.unwrap_or_default(),
        })
    }
}

/// Loads the `OWNERS` file from the default branch of the repository.
/// Returns `None` if the repository does not have one.
pub async fn load_owners(client: &impl RepositoryClient) -> anyhow::Result<Option<Owners>> {
    let Some(content) = client
        .get_file_content(OWNERS_FILE_PATH)
        .await
        .context("Cannot load OWNERS file")?
    else {
        tracing::debug!("Repository {} has no OWNERS file", client.repository());
        return Ok(None);
    };
    let owners = Owners::parse(&content).context("Cannot parse OWNERS file")?;
    Ok(Some(owners))
}

/// Checks that `username` may act in the given `role`.
///
/// If the repository has an `OWNERS` file, it is the only source of truth. Otherwise, members
/// of the organization owning the repository and repository collaborators are allowed.
///
/// Fails with [`AuthorizationError`] if the user is not allowed, or with an API error if the
/// permissions could not be determined.
pub async fn assert_authorized(
    client: &impl RepositoryClient,
    role: AuthorizationRole,
    username: &str,
) -> anyhow::Result<()> {
    if let Some(owners) = load_owners(client).await? {
        if owners.has_role(username, role) {
            tracing::debug!("{username} is in the {role} role of the OWNERS file");
            return Ok(());
        }
        return Err(AuthorizationError::NotInOwnersRole {
            login: username.to_string(),
            role,
        }
        .into());
    }

    let org = client.repository().owner();
    if client
        .is_org_member(org, username)
        .await
        .with_context(|| format!("Cannot check membership of {username} in {org}"))?
    {
        tracing::debug!("{username} is a member of {org}");
        return Ok(());
    }
    if client
        .is_collaborator(username)
        .await
        .with_context(|| format!("Cannot check if {username} is a collaborator"))?
    {
        tracing::debug!("{username} is a collaborator of {}", client.repository());
        return Ok(());
    }
    Err(AuthorizationError::NotOrgMemberOrCollaborator {
        login: username.to_string(),
    }
    .into())
}
