//! Pull request event payload and the context derived from it

use log::debug;
use serde::Deserialize;
use std::path::Path;

use super::GithubError;

/// Subset of the webhook payload found at `GITHUB_EVENT_PATH`
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequest>,

    #[serde(default)]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: Option<u64>,

    /// Null when the author left the description empty
    #[serde(default)]
    pub body: Option<String>,

    pub head: Head,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Head {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

impl EventPayload {
    pub fn from_json(json: &str) -> Result<Self, GithubError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, GithubError> {
        debug!("EventPayload::load: path={}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| GithubError::EventRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

/// Everything the run needs to know about the pull request being checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
    pub number: Option<u64>,
    pub body: Option<String>,
}

impl ActionContext {
    /// Build the context from a payload
    ///
    /// `repository` (`OWNER/REPO`, usually `GITHUB_REPOSITORY`) wins over the
    /// payload's own repository object.
    pub fn from_payload(payload: EventPayload, repository: Option<&str>) -> Result<Self, GithubError> {
        let pr = payload.pull_request.ok_or(GithubError::NotPullRequest)?;

        let (owner, repo) = match (repository, payload.repository) {
            (Some(full), _) => split_repository(full)?,
            (None, Some(r)) => (r.owner.login, r.name),
            (None, None) => return Err(GithubError::MissingRepository),
        };

        Ok(Self {
            owner,
            repo,
            head_sha: pr.head.sha,
            number: pr.number,
            body: pr.body,
        })
    }

    pub fn load(event_path: &Path, repository: Option<&str>) -> Result<Self, GithubError> {
        Self::from_payload(EventPayload::load(event_path)?, repository)
    }
}

fn split_repository(full: &str) -> Result<(String, String), GithubError> {
    match full.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GithubError::InvalidRepository(full.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"{
        "action": "edited",
        "pull_request": {
            "number": 7,
            "body": "- [x] tests\r\n- [ ] docs",
            "head": { "sha": "0123abcd", "ref": "feature" }
        },
        "repository": { "name": "widgets", "owner": { "login": "acme" } }
    }"#;

    #[test]
    fn test_context_from_payload() {
        let payload = EventPayload::from_json(PAYLOAD).unwrap();
        let ctx = ActionContext::from_payload(payload, None).unwrap();

        assert_eq!(ctx.owner, "acme");
        assert_eq!(ctx.repo, "widgets");
        assert_eq!(ctx.head_sha, "0123abcd");
        assert_eq!(ctx.number, Some(7));
        assert_eq!(ctx.body.as_deref(), Some("- [x] tests\r\n- [ ] docs"));
    }

    #[test]
    fn test_repository_override() {
        let payload = EventPayload::from_json(PAYLOAD).unwrap();
        let ctx = ActionContext::from_payload(payload, Some("fork/gadgets")).unwrap();
        assert_eq!(ctx.owner, "fork");
        assert_eq!(ctx.repo, "gadgets");
    }

    #[test]
    fn test_null_body() {
        let json = r#"{"pull_request": {"body": null, "head": {"sha": "abc"}}}"#;
        let ctx = ActionContext::from_payload(EventPayload::from_json(json).unwrap(), Some("o/r")).unwrap();
        assert_eq!(ctx.body, None);
    }

    #[test]
    fn test_push_event_is_rejected() {
        let json = r#"{"ref": "refs/heads/main", "repository": {"name": "r", "owner": {"login": "o"}}}"#;
        let err = ActionContext::from_payload(EventPayload::from_json(json).unwrap(), None).unwrap_err();
        assert!(matches!(err, GithubError::NotPullRequest));
    }

    #[test]
    fn test_missing_repository() {
        let json = r#"{"pull_request": {"head": {"sha": "abc"}}}"#;
        let err = ActionContext::from_payload(EventPayload::from_json(json).unwrap(), None).unwrap_err();
        assert!(matches!(err, GithubError::MissingRepository));
    }

    #[test]
    fn test_invalid_repository_strings() {
        for bad in ["", "noslash", "/repo", "owner/", "a/b/c"] {
            assert!(
                matches!(split_repository(bad), Err(GithubError::InvalidRepository(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("event.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        let ctx = ActionContext::load(&path, None).unwrap();
        assert_eq!(ctx.head_sha, "0123abcd");

        let err = ActionContext::load(&temp.path().join("missing.json"), None).unwrap_err();
        assert!(matches!(err, GithubError::EventRead { .. }));
    }
}
