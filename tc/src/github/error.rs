//! GitHub error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading the Actions context or talking to the REST API
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Error creating status check, response was {status} with data {body}")]
    CheckRunRejected { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read event payload {path}: {source}")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Event payload has no pull_request; run this on pull_request events")]
    NotPullRequest,

    #[error("Invalid repository '{0}', expected OWNER/REPO")]
    InvalidRepository(String),

    #[error("Repository is unknown: pass --repository or set GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("Token contains characters not allowed in an HTTP header")]
    InvalidToken,
}

impl GithubError {
    /// Check if this error is worth another attempt
    ///
    /// Only connect failures count among network errors: a request that
    /// reached GitHub may already have created the check run.
    pub fn is_retryable(&self) -> bool {
        match self {
            GithubError::CheckRunRejected { status, .. } => is_retryable_status(*status),
            GithubError::Network(e) => e.is_connect(),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_carries_status_and_body() {
        let err = GithubError::CheckRunRejected {
            status: 422,
            body: "{\"message\":\"No commit found for SHA\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error creating status check, response was 422 with data {\"message\":\"No commit found for SHA\"}"
        );
    }

    #[test]
    fn test_is_retryable() {
        // 5xx and rate limits should be retried
        for status in [429, 500, 502, 503] {
            assert!(
                GithubError::CheckRunRejected {
                    status,
                    body: String::new()
                }
                .is_retryable()
            );
        }

        // Client errors should not
        for status in [400, 401, 403, 404, 422] {
            assert!(
                !GithubError::CheckRunRejected {
                    status,
                    body: String::new()
                }
                .is_retryable()
            );
        }

        assert!(!GithubError::NotPullRequest.is_retryable());
        assert!(!GithubError::InvalidRepository("x".to_string()).is_retryable());
    }
}
