//! GitHub REST payloads the bot reads and writes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::RepositoryRef;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GithubUser {
    pub login: String,
    pub html_url: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub name: Option<String>,
}

/// Marker GitHub attaches to issues that are really pull requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequestMarker {
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<GithubUser>,
    pub repository_url: String,
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.state == "open"
    }

    /// Repository the issue lives in, taken from the trailing `owner/name` of `repository_url`
    pub fn repository(&self) -> Option<RepositoryRef> {
        let mut parts = self.repository_url.trim_end_matches('/').rsplit('/');
        let name = parts.next().filter(|s| !s.is_empty())?;
        let owner = parts.next().filter(|s| !s.is_empty())?;
        Some(RepositoryRef::new(owner, name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_by: Option<GithubUser>,
    #[serde(default)]
    pub commits: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<GithubUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub owner: RepositoryOwner,
    #[serde(default)]
    pub archived: bool,
}

impl Repository {
    pub fn to_ref(&self) -> RepositoryRef {
        RepositoryRef::new(&self.owner.login, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitDetails {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitItem {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetails,
}

impl CommitItem {
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn subject(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResults<T> {
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

pub type CommitSearch = SearchResults<CommitItem>;

/// Markdown source of a man page and where it lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManPage {
    pub url: String,
    pub section: String,
    pub page: String,
    pub markdown: String,
}

/// One entry of the fortunes database
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Fortune {
    pub quote: String,
    pub author: String,
    pub utc_time: i64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Recently updated issues and pull requests opened by one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserActivity {
    pub issues: Vec<Issue>,
    pub pulls: Vec<Issue>,
}

impl UserActivity {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.pulls.is_empty()
    }
}
