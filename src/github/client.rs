//! GitHub REST client
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Fortunes pull requests via git trees/commits/refs (no base64 round trip)
//! - 1.1.0: Commit and user activity searches
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::manpage::ManPageLocator;
use super::models::{
    CommitSearch, Fortune, GithubUser, Issue, ManPage, PullRequest, Repository, SearchResults,
    UserActivity,
};
use super::SourceHost;
use crate::core::RepositoryRef;

const API_BASE: &str = "https://api.github.com";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
const FORTUNES_PATH: &str = "Base/res/fortunes.json";
const FORTUNE_COMMIT_TITLE: &str = "Base: Add a quote to the fortunes database";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_ACTIVITY_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    repository: RepositoryRef,
    api_base: String,
}

#[derive(Deserialize)]
struct ShaRef {
    sha: String,
}

#[derive(Deserialize)]
struct GitRef {
    object: ShaRef,
}

#[derive(Deserialize)]
struct GitCommit {
    tree: ShaRef,
}

#[derive(Deserialize)]
struct RepositoryInfo {
    default_branch: String,
}

#[derive(Deserialize)]
struct CreatedPull {
    number: u64,
}

impl GithubClient {
    pub fn new(token: Option<&str>, repository: RepositoryRef) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("BuggieBot"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("GitHub token contains invalid header characters")?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            repository,
            api_base: API_BASE.to_string(),
        })
    }

    /// Point the client at another API host (GitHub Enterprise, test servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn repo_path(&self, repository: &RepositoryRef, rest: &str) -> String {
        format!("/repos/{}/{}{rest}", repository.owner, repository.name)
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        debug!("GET {path}");
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .with_context(|| format!("GitHub request to {path} failed"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .with_context(|| format!("GitHub returned an error for {path}"))?
            .json()
            .await
            .with_context(|| format!("Malformed GitHub response for {path}"))?;
        Ok(Some(body))
    }

    async fn get_required<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.get_optional(path, query)
            .await?
            .ok_or_else(|| anyhow!("GitHub returned 404 for {path}"))
    }

    async fn get_raw(&self, path: &str) -> Result<Option<String>> {
        debug!("GET {path} (raw)");
        let response = self
            .http
            .get(self.url(path))
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await
            .with_context(|| format!("GitHub request to {path} failed"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let text = response
            .error_for_status()
            .with_context(|| format!("GitHub returned an error for {path}"))?
            .text()
            .await?;
        Ok(Some(text))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("POST {path}");
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("GitHub request to {path} failed"))?
            .error_for_status()
            .with_context(|| format!("GitHub returned an error for {path}"))?
            .json()
            .await
            .with_context(|| format!("Malformed GitHub response for {path}"))
    }

    async fn search_issues(
        &self,
        query: String,
        per_page: u32,
    ) -> Result<SearchResults<Issue>> {
        let params = [
            ("q", query),
            ("per_page", per_page.to_string()),
            ("sort", "updated".to_string()),
            ("order", "desc".to_string()),
        ];
        self.get_required("/search/issues", &params).await
    }
}

#[async_trait]
impl SourceHost for GithubClient {
    fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    async fn get_issue_or_pull(&self, number: u64) -> Result<Option<Issue>> {
        let path = self.repo_path(&self.repository, &format!("/issues/{number}"));
        self.get_optional(&path, &[]).await
    }

    async fn get_pull(
        &self,
        repository: &RepositoryRef,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        let path = self.repo_path(repository, &format!("/pulls/{number}"));
        self.get_optional(&path, &[]).await
    }

    async fn search_issues_or_pulls(&self, query: &str) -> Result<Option<Issue>> {
        let query = format!("{query} repo:{}", self.repository.full_name());
        let results = self.search_issues(query, 1).await?;
        Ok(results.items.into_iter().next())
    }

    async fn fetch_manpage(&self, locator: &ManPageLocator) -> Result<Option<ManPage>> {
        let path = self.repo_path(
            &self.repository,
            &format!("/contents/{}", locator.source_path()),
        );
        let Some(markdown) = self.get_raw(&path).await? else {
            return Ok(None);
        };

        Ok(Some(ManPage {
            url: locator.github_url(&self.repository),
            section: locator.section.clone(),
            page: locator.page.clone(),
            markdown,
        }))
    }

    async fn fetch_fortunes(&self) -> Result<Vec<Fortune>> {
        let path = self.repo_path(&self.repository, &format!("/contents/{FORTUNES_PATH}"));
        let json = self
            .get_raw(&path)
            .await?
            .ok_or_else(|| anyhow!("{FORTUNES_PATH} does not exist"))?;
        serde_json::from_str(&json).context("Fortunes file is not valid JSON")
    }

    async fn open_fortunes_pull_request(
        &self,
        fortunes: &[Fortune],
        triggered_by: &str,
    ) -> Result<u64> {
        let repo = &self.repository;
        let mut content = serde_json::to_string_pretty(fortunes)?;
        content.push('\n');

        let info: RepositoryInfo = self.get_required(&self.repo_path(repo, ""), &[]).await?;
        let base = info.default_branch;

        let head: GitRef = self
            .get_required(&self.repo_path(repo, &format!("/git/ref/heads/{base}")), &[])
            .await?;
        let base_commit: GitCommit = self
            .get_required(
                &self.repo_path(repo, &format!("/git/commits/{}", head.object.sha)),
                &[],
            )
            .await?;

        let tree: ShaRef = self
            .post(
                &self.repo_path(repo, "/git/trees"),
                &json!({
                    "base_tree": base_commit.tree.sha,
                    "tree": [{
                        "path": FORTUNES_PATH,
                        "mode": "100644",
                        "type": "blob",
                        "content": content,
                    }],
                }),
            )
            .await?;

        let commit: ShaRef = self
            .post(
                &self.repo_path(repo, "/git/commits"),
                &json!({
                    "message": format!("{FORTUNE_COMMIT_TITLE}\n\n[skip ci]"),
                    "tree": tree.sha,
                    "parents": [head.object.sha],
                }),
            )
            .await?;

        let branch = format!("add-quote-{}", chrono::Utc::now().timestamp());
        let _: serde_json::Value = self
            .post(
                &self.repo_path(repo, "/git/refs"),
                &json!({ "ref": format!("refs/heads/{branch}"), "sha": commit.sha }),
            )
            .await?;

        let pull: CreatedPull = self
            .post(
                &self.repo_path(repo, "/pulls"),
                &json!({
                    "title": FORTUNE_COMMIT_TITLE,
                    "body": format!("Triggered by {triggered_by} on Discord."),
                    "head": branch,
                    "base": base,
                }),
            )
            .await?;

        info!("Opened fortunes pull request #{} on {}", pull.number, repo.full_name());
        Ok(pull.number)
    }

    async fn get_user(&self, login: &str) -> Result<Option<GithubUser>> {
        self.get_optional(&format!("/users/{login}"), &[]).await
    }

    async fn list_org_repositories(&self) -> Result<Vec<Repository>> {
        let path = format!("/orgs/{}/repos", self.repository.owner);
        let params = [("type", "public".to_string()), ("per_page", "100".to_string())];
        self.get_required(&path, &params).await
    }

    async fn search_commits(
        &self,
        author: &str,
        repository: &RepositoryRef,
    ) -> Result<CommitSearch> {
        let params = [
            ("q", format!("author:{author} repo:{}", repository.full_name())),
            ("per_page", "3".to_string()),
        ];
        self.get_required("/search/commits", &params).await
    }

    async fn fetch_user_activity(&self, login: &str) -> Result<UserActivity> {
        let repo = self.repository.full_name();
        let issues = self
            .search_issues(format!("author:{login} repo:{repo} is:issue"), USER_ACTIVITY_LIMIT)
            .await?;
        let pulls = self
            .search_issues(format!("author:{login} repo:{repo} is:pr"), USER_ACTIVITY_LIMIT)
            .await?;

        Ok(UserActivity {
            issues: issues.items,
            pulls: pulls.items,
        })
    }
}
