//! Pushing generated files to a GitHub repository through the backend.

use crate::client::{BackendClient, BackendError};
use sc_protocol::api_models::PushToGithubRequest;
use sc_protocol::run_models::GeneratedFile;
use thiserror::Error;
use tracing::{info, warn};

/// Credentials entered by the user for a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubCredentials {
    pub username: String,
    pub repo: String,
    pub token: String,
}

impl GithubCredentials {
    pub fn is_complete(&self) -> bool {
        [&self.username, &self.repo, &self.token]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Errors that can occur when pushing to GitHub.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GithubError {
    /// Username, repository or token is empty.
    #[error("GitHub credentials are required")]
    MissingCredentials,

    /// The current run has no generated files.
    #[error("There are no generated files to push")]
    NothingToPush,

    /// The backend rejected or failed the push.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Validate credentials and files and build the push request.
pub fn prepare_push(
    credentials: GithubCredentials,
    files: &[GeneratedFile],
) -> Result<PushToGithubRequest, GithubError> {
    if !credentials.is_complete() {
        return Err(GithubError::MissingCredentials);
    }
    if files.is_empty() {
        return Err(GithubError::NothingToPush);
    }

    Ok(PushToGithubRequest {
        username: credentials.username.trim().to_string(),
        repo: credentials.repo.trim().to_string(),
        token: credentials.token,
        files: files.to_vec(),
    })
}

/// Send a prepared push request. Returns the repository name on success.
pub async fn push(
    backend: &dyn BackendClient,
    request: PushToGithubRequest,
) -> Result<String, GithubError> {
    let repo = format!("{}/{}", request.username, request.repo);
    match backend.push_to_github(&request).await {
        Ok(()) => {
            info!(%repo, files = request.files.len(), "Pushed files to GitHub");
            Ok(repo)
        }
        Err(err) => {
            warn!(%repo, error = %err, "GitHub push failed");
            Err(err.into())
        }
    }
}
