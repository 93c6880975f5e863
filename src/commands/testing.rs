//! Test doubles for handlers: a recording responder, an in-memory source
//! host, and a fixed emoji list.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::context::CommandContext;
use super::interaction::{Interaction, InteractionKind, InteractionUser};
use super::responder::{Reply, Responder};
use crate::core::{Config, EmojiCache, EmojiSource, GuildEmoji, RepositoryRef};
use crate::github::models::{Label, SearchResults};
use crate::github::{
    CommitItem, CommitSearch, Fortune, GithubUser, Issue, ManPage, ManPageLocator, PullRequest,
    Repository, SourceHost, UserActivity,
};

pub const QUOTE_ROLE: u64 = 500;
pub const PRIVILEGED_ROLE: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Reply(Reply),
    Defer(bool),
    Edit(Reply),
    FollowUp(Reply),
    Update(Reply),
}

#[derive(Default)]
pub struct RecordingResponder {
    calls: Mutex<Vec<Recorded>>,
    responded: AtomicBool,
    fail: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responder whose every call errors
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Recorded, initial: bool) -> Result<()> {
        if self.fail {
            return Err(anyhow!("Unknown interaction"));
        }
        if initial && self.responded.swap(true, Ordering::SeqCst) {
            return Err(anyhow!("Interaction has already been acknowledged"));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(&self, reply: Reply) -> Result<()> {
        self.record(Recorded::Reply(reply), true)
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.record(Recorded::Defer(ephemeral), true)
    }

    async fn edit_reply(&self, reply: Reply) -> Result<()> {
        self.record(Recorded::Edit(reply), false)
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        self.record(Recorded::FollowUp(reply), false)
    }

    async fn update_message(&self, reply: Reply) -> Result<()> {
        self.record(Recorded::Update(reply), true)
    }

    fn has_responded(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }
}

pub struct StaticEmojis(pub Vec<GuildEmoji>);

#[async_trait]
impl EmojiSource for StaticEmojis {
    async fn list_emojis(&self) -> Result<Vec<GuildEmoji>> {
        Ok(self.0.clone())
    }
}

/// Guild with sadcaret (1), maximize (2), and minimize (3)
pub fn test_emojis() -> EmojiCache {
    let emoji = |id, name: &str| GuildEmoji {
        id,
        name: name.to_string(),
        animated: false,
    };
    EmojiCache::new(Arc::new(StaticEmojis(vec![
        emoji(1, "sadcaret"),
        emoji(2, "maximize"),
        emoji(3, "minimize"),
    ])))
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, String> = [
        ("DISCORD_TOKEN", "token".to_string()),
        ("QUOTE_ROLE_ID", QUOTE_ROLE.to_string()),
        ("PRIVILEGED_ROLE_IDS", PRIVILEGED_ROLE.to_string()),
        ("EXCLUDED_REPOSITORIES", "artwork".to_string()),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn test_context() -> Arc<CommandContext> {
    context_with(Arc::new(MemoryHost::default()))
}

pub fn context_with(host: Arc<MemoryHost>) -> Arc<CommandContext> {
    Arc::new(CommandContext::new(
        Arc::new(test_config()),
        host,
        test_emojis(),
    ))
}

pub fn user(id: u64) -> InteractionUser {
    InteractionUser {
        id,
        tag: format!("user{id}#0001"),
        ..InteractionUser::default()
    }
}

pub fn chat_input(name: &str) -> Interaction {
    Interaction::new(InteractionKind::ChatInput, name, user(1))
}

pub fn github_user(login: &str) -> GithubUser {
    GithubUser {
        login: login.to_string(),
        html_url: format!("https://github.com/{login}"),
        avatar_url: format!("https://avatars.example/{login}.png"),
    }
}

pub fn sample_issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: Some("It crashes".to_string()),
        html_url: format!("https://github.com/SerenityOS/serenity/issues/{number}"),
        state: "open".to_string(),
        comments: 2,
        labels: vec![Label {
            name: Some("bug".to_string()),
        }],
        created_at: Utc.timestamp_opt(1_650_000_000, 0).unwrap(),
        closed_at: None,
        user: Some(github_user("buggie")),
        repository_url: "https://api.github.com/repos/SerenityOS/serenity".to_string(),
        pull_request: None,
    }
}

pub fn sample_pull(number: u64, title: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        body: Some("Makes it faster".to_string()),
        html_url: format!("https://github.com/SerenityOS/serenity/pull/{number}"),
        state: "open".to_string(),
        draft: false,
        merged: false,
        merged_at: None,
        merged_by: None,
        commits: 3,
        additions: 10,
        deletions: 2,
        comments: 1,
        labels: Vec::new(),
        created_at: Utc.timestamp_opt(1_650_000_000, 0).unwrap(),
        user: Some(github_user("buggie")),
    }
}

pub fn sample_commit(sha: &str, message: &str) -> CommitItem {
    serde_json::from_value(serde_json::json!({
        "sha": sha,
        "html_url": format!("https://github.com/SerenityOS/serenity/commit/{sha}"),
        "commit": { "message": message },
    }))
    .unwrap()
}

/// In-memory [`SourceHost`]
pub struct MemoryHost {
    pub repository: RepositoryRef,
    pub issues: HashMap<u64, Issue>,
    pub pulls: HashMap<u64, PullRequest>,
    pub search_results: Vec<Issue>,
    pub manpages: HashMap<ManPageLocator, String>,
    pub fortunes: Vec<Fortune>,
    pub opened_pulls: Mutex<Vec<(Vec<Fortune>, String)>>,
    pub users: HashMap<String, GithubUser>,
    pub repositories: Vec<Repository>,
    pub commits: HashMap<String, CommitSearch>,
    pub activity: HashMap<String, UserActivity>,
    /// Every call errors
    pub fail: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            repository: RepositoryRef::new("SerenityOS", "serenity"),
            issues: HashMap::new(),
            pulls: HashMap::new(),
            search_results: Vec::new(),
            manpages: HashMap::new(),
            fortunes: Vec::new(),
            opened_pulls: Mutex::new(Vec::new()),
            users: HashMap::new(),
            repositories: Vec::new(),
            commits: HashMap::new(),
            activity: HashMap::new(),
            fail: false,
        }
    }
}

impl MemoryHost {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.number, issue);
        self
    }

    pub fn with_pull(mut self, pull: PullRequest) -> Self {
        self.pulls.insert(pull.number, pull);
        self
    }

    pub fn with_search_result(mut self, issue: Issue) -> Self {
        self.search_results.push(issue);
        self
    }

    pub fn with_manpage(mut self, locator: ManPageLocator, markdown: &str) -> Self {
        self.manpages.insert(locator, markdown.to_string());
        self
    }

    pub fn with_user(mut self, user: GithubUser) -> Self {
        self.users.insert(user.login.clone(), user);
        self
    }

    pub fn with_repository(mut self, name: &str, archived: bool) -> Self {
        self.repositories.push(
            serde_json::from_value(serde_json::json!({
                "name": name,
                "owner": { "login": self.repository.owner },
                "archived": archived,
            }))
            .unwrap(),
        );
        self
    }

    pub fn with_commits(mut self, repository: &str, total_count: u64, items: Vec<CommitItem>) -> Self {
        let full_name = format!("{}/{repository}", self.repository.owner);
        self.commits
            .insert(full_name, SearchResults { total_count, items });
        self
    }

    pub fn with_activity(mut self, login: &str, activity: UserActivity) -> Self {
        self.activity.insert(login.to_string(), activity);
        self
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(anyhow!("GitHub returned an error for /test"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SourceHost for MemoryHost {
    fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    async fn get_issue_or_pull(&self, number: u64) -> Result<Option<Issue>> {
        self.check()?;
        Ok(self.issues.get(&number).cloned())
    }

    async fn get_pull(
        &self,
        _repository: &RepositoryRef,
        number: u64,
    ) -> Result<Option<PullRequest>> {
        self.check()?;
        Ok(self.pulls.get(&number).cloned())
    }

    async fn search_issues_or_pulls(&self, _query: &str) -> Result<Option<Issue>> {
        self.check()?;
        Ok(self.search_results.first().cloned())
    }

    async fn fetch_manpage(&self, locator: &ManPageLocator) -> Result<Option<ManPage>> {
        self.check()?;
        Ok(self.manpages.get(locator).map(|markdown| ManPage {
            url: locator.github_url(&self.repository),
            section: locator.section.clone(),
            page: locator.page.clone(),
            markdown: markdown.clone(),
        }))
    }

    async fn fetch_fortunes(&self) -> Result<Vec<Fortune>> {
        self.check()?;
        Ok(self.fortunes.clone())
    }

    async fn open_fortunes_pull_request(
        &self,
        fortunes: &[Fortune],
        triggered_by: &str,
    ) -> Result<u64> {
        self.check()?;
        let mut opened = self.opened_pulls.lock().unwrap();
        opened.push((fortunes.to_vec(), triggered_by.to_string()));
        Ok(1000 + opened.len() as u64)
    }

    async fn get_user(&self, login: &str) -> Result<Option<GithubUser>> {
        self.check()?;
        Ok(self.users.get(login).cloned())
    }

    async fn list_org_repositories(&self) -> Result<Vec<Repository>> {
        self.check()?;
        Ok(self.repositories.clone())
    }

    async fn search_commits(
        &self,
        _author: &str,
        repository: &RepositoryRef,
    ) -> Result<CommitSearch> {
        self.check()?;
        Ok(self
            .commits
            .get(&repository.full_name())
            .cloned()
            .unwrap_or(SearchResults {
                total_count: 0,
                items: Vec::new(),
            }))
    }

    async fn fetch_user_activity(&self, login: &str) -> Result<UserActivity> {
        self.check()?;
        Ok(self.activity.get(login).cloned().unwrap_or_default())
    }
}
