//! # GitHub Integration
//!
//! The bot's view of the source-hosting service. Commands talk to the
//! [`SourceHost`] trait; [`GithubClient`] implements it over the REST API.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Open fortunes pull requests through the git data API
//! - 1.1.0: Commit search and organization repository listing for /commit-stats
//! - 1.0.0: Issue, pull request, and man page lookups

pub mod client;
pub mod embed;
pub mod manpage;
pub mod models;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::RepositoryRef;

pub use client::GithubClient;
pub use embed::{embed_from_issue, embed_from_issue_or_pull, embed_from_pull};
pub use manpage::{ManPageLocator, MAN_PATH};
pub use models::{
    CommitItem, CommitSearch, Fortune, GithubUser, Issue, ManPage, PullRequest, Repository,
    UserActivity,
};

/// Operations the commands need from the source-hosting service
///
/// "Not found" is `Ok(None)`; transport and payload problems are errors.
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Repository that number lookups, searches, and man pages refer to
    fn repository(&self) -> &RepositoryRef;

    async fn get_issue_or_pull(&self, number: u64) -> Result<Option<Issue>>;

    async fn get_pull(&self, repository: &RepositoryRef, number: u64)
        -> Result<Option<PullRequest>>;

    /// Most recently updated issue or pull request matching `query`
    async fn search_issues_or_pulls(&self, query: &str) -> Result<Option<Issue>>;

    async fn fetch_manpage(&self, locator: &ManPageLocator) -> Result<Option<ManPage>>;

    async fn fetch_fortunes(&self) -> Result<Vec<Fortune>>;

    /// Open a pull request replacing the fortunes file; returns the PR number
    async fn open_fortunes_pull_request(
        &self,
        fortunes: &[Fortune],
        triggered_by: &str,
    ) -> Result<u64>;

    async fn get_user(&self, login: &str) -> Result<Option<GithubUser>>;

    /// Repositories of the organization owning [`SourceHost::repository`]
    async fn list_org_repositories(&self) -> Result<Vec<Repository>>;

    async fn search_commits(&self, author: &str, repository: &RepositoryRef)
        -> Result<CommitSearch>;

    async fn fetch_user_activity(&self, login: &str) -> Result<UserActivity>;

    /// Fetch a man page from a website or GitHub URL
    async fn fetch_manpage_by_url(&self, url: &str) -> Result<Option<ManPage>> {
        match ManPageLocator::parse(url, self.repository()) {
            Some(locator) => self.fetch_manpage(&locator).await,
            None => Ok(None),
        }
    }
}
