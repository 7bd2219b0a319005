//! Check Runs API client
//!
//! Creates a completed check run on the pull request head commit. Connect
//! failures and 408/429/5xx responses are retried with exponential backoff;
//! any other non-201 response is returned as
//! [`GithubError::CheckRunRejected`]. A 201 always counts as created.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::GithubError;
use crate::check::{CheckOutcome, Conclusion};

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

const API_VERSION: &str = "2022-11-28";

/// Body of `POST /repos/{owner}/{repo}/check-runs`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRunRequest {
    pub name: String,
    pub head_sha: String,
    pub status: &'static str,
    pub conclusion: Conclusion,
    pub completed_at: String,
    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    pub text: String,
}

impl CheckRunRequest {
    /// A completed check run titled after the check itself
    pub fn new(name: &str, head_sha: &str, outcome: &CheckOutcome, completed_at: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            head_sha: head_sha.to_string(),
            status: "completed",
            conclusion: outcome.conclusion,
            completed_at: completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            output: CheckRunOutput {
                title: name.to_string(),
                summary: outcome.summary.clone(),
                text: outcome.text.clone(),
            },
        }
    }
}

/// The parts of the created check run worth logging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRun {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// GitHub REST client scoped to the Check Runs endpoint
pub struct ChecksClient {
    http: Client,
    api_url: String,
    initial_backoff: Duration,
}

impl ChecksClient {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, GithubError> {
        debug!("ChecksClient::new: api_url={} timeout={:?}", api_url, timeout);

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("taskcheck/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Override the first retry delay (doubles on each further attempt)
    pub fn with_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Create a check run, retrying transient failures
    pub async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        request: &CheckRunRequest,
    ) -> Result<CheckRun, GithubError> {
        let url = format!("{}/repos/{}/{}/check-runs", self.api_url, owner, repo);
        let mut backoff = self.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.post_once(&url, request).await {
                Ok(run) => return Ok(run),
                Err(e) if e.is_retryable() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    warn!(
                        "create_check_run: attempt {} failed ({}), retrying in {:?}",
                        attempt, e, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_once(&self, url: &str, request: &CheckRunRequest) -> Result<CheckRun, GithubError> {
        debug!("post_once: POST {}", url);
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status().as_u16();

        if status != 201 {
            let body = response.text().await?;
            return Err(GithubError::CheckRunRejected { status, body });
        }

        // Created; an unreadable body does not change that
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!("post_once: check run created but response body did not parse: {}", e);
            CheckRun::default()
        }))
    }
}
