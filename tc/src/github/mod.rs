//! GitHub collaborator: event payload and Check Runs API

mod client;
mod error;
mod event;

pub use client::{CheckRun, CheckRunOutput, CheckRunRequest, ChecksClient};
pub use error::GithubError;
pub use event::{ActionContext, EventPayload, Head, Owner, PullRequest, Repository};

/// Default REST endpoint when `GITHUB_API_URL` is unset
pub const DEFAULT_API_URL: &str = "https://api.github.com";
