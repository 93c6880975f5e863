//! Commit statistics across the organization
//!
//! Handles: commit-stats
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.6.0
//!
//! ## Changelog
//! - 1.1.0: Per-repository searches run concurrently; overflow goes through the block chunker
//! - 1.0.0: Initial implementation

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};
use crate::core::response::char_len;
use crate::core::{chunk_for_message, RepositoryRef, MESSAGE_LIMIT};
use crate::github::{CommitItem, GithubUser};

const SHOWN_COMMITS: usize = 3;

/// Handler for /commit-stats
pub struct CommitStatsHandler;

#[derive(Debug, Clone)]
pub struct RepositoryCommits {
    pub repository: RepositoryRef,
    pub total_count: u64,
    pub commits: Vec<CommitItem>,
}

/// One block per repository with commits; top commits and a "View All" link
pub fn format_repository(login: &str, stats: &RepositoryCommits) -> Option<String> {
    if stats.total_count == 0 {
        return None;
    }

    let full_name = stats.repository.full_name();
    let mut lines = vec![format!(
        "**[{full_name}](<https://github.com/{full_name}>)** - **{} commits**",
        stats.total_count
    )];

    for commit in stats.commits.iter().take(SHOWN_COMMITS) {
        lines.push(format!(
            "    - {} ([{}]({})).",
            commit.subject(),
            commit.short_sha(),
            commit.html_url
        ));
    }

    if stats.commits.is_empty() {
        lines.push("    - `Commits failed to load`".to_string());
    }

    if stats.total_count > SHOWN_COMMITS as u64 {
        lines.push(format!(
            "    - [*View All...*](<https://github.com/{full_name}/commits?author={login}>)"
        ));
    }

    lines.push(String::new());
    Some(lines.join("\n"))
}

pub fn format_header(user: &GithubUser, project: &str, total: u64, decoration: Option<&str>) -> String {
    let plural = if total == 1 { "" } else { "s" };
    let decoration = decoration.map(|d| format!(" {d}")).unwrap_or_default();
    format!(
        "**__[{}](<{}>)__ has landed a total of {total} commit{plural} across the {project} project{decoration}**\n",
        user.login, user.html_url
    )
}

#[async_trait]
impl CommandHandler for CommitStatsHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["commit-stats"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::chat_input("commit-stats", "Show user's total amount of commits")
                .option(
                    OptionDeclaration::string("author", "Username or email of the commit author")
                        .required(),
                )
                .option(OptionDeclaration::boolean(
                    "silent",
                    "Set this to `false` to broadcast the output",
                )),
        ]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let Some(author) = interaction
            .string_option("author")
            .map(str::trim)
            .filter(|a| !a.is_empty())
        else {
            return Ok(());
        };
        let silent = interaction.boolean_option("silent").unwrap_or(true);

        let Some(user) = ctx.github.get_user(author).await? else {
            return responder
                .reply(
                    Reply::text(format!(
                        "We looked everywhere; but we couldn't find `{author}` :^("
                    ))
                    .ephemeral(),
                )
                .await;
        };

        responder.defer(silent).await?;

        let stats = self.collect(&ctx, &user.login).await?;
        let total: u64 = stats.iter().map(|s| s.total_count).sum();
        if total == 0 {
            return responder
                .edit_reply(Reply::text(format!(
                    "Couldn't find any contributions from {} :^(",
                    user.login
                )))
                .await;
        }

        let decoration = ctx.emojis.get("catdog").await.map(|e| e.to_string());
        let header = format_header(&user, &ctx.github.repository().owner, total, decoration.as_deref());
        let sections: Vec<String> = stats
            .iter()
            .filter_map(|s| format_repository(&user.login, s))
            .collect();

        let complete = std::iter::once(header.as_str())
            .chain(sections.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "commit-stats for {}: {total} commits across {} repositories",
            user.login,
            sections.len()
        );

        if char_len(&complete) <= MESSAGE_LIMIT {
            return responder.edit_reply(Reply::text(complete)).await;
        }

        responder.edit_reply(Reply::text(header)).await?;
        for chunk in chunk_for_message(&sections) {
            responder
                .follow_up(Reply::text(chunk).with_ephemeral(silent))
                .await?;
        }
        Ok(())
    }
}

impl CommitStatsHandler {
    /// Commit counts for every non-archived, non-excluded repository, most commits first
    async fn collect(&self, ctx: &CommandContext, login: &str) -> Result<Vec<RepositoryCommits>> {
        let repositories = ctx.github.list_org_repositories().await?;

        let mut searches = JoinSet::new();
        for repository in repositories {
            if repository.archived || ctx.config.excluded_repositories.contains(&repository.name) {
                debug!("Skipping repository {}", repository.name);
                continue;
            }

            let host = Arc::clone(&ctx.github);
            let login = login.to_string();
            let repository = repository.to_ref();
            searches.spawn(async move {
                let result = host.search_commits(&login, &repository).await;
                (repository, result)
            });
        }

        let mut stats = Vec::new();
        while let Some(joined) = searches.join_next().await {
            let (repository, result) = joined.context("Commit search task failed")?;
            let search = result
                .with_context(|| format!("Commit search in {} failed", repository.full_name()))?;
            stats.push(RepositoryCommits {
                repository,
                total_count: search.total_count,
                commits: search.items,
            });
        }

        stats.sort_by(|a, b| {
            b.total_count
                .cmp(&a.total_count)
                .then_with(|| a.repository.name.cmp(&b.repository.name))
        });
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::interaction::OptionValue;
    use crate::commands::testing::{
        chat_input, context_with, github_user, sample_commit, MemoryHost, Recorded,
        RecordingResponder,
    };

    fn command(author: &str) -> Interaction {
        chat_input("commit-stats").with_option("author", OptionValue::String(author.to_string()))
    }

    async fn run(host: MemoryHost, interaction: Interaction) -> Vec<Recorded> {
        let responder = RecordingResponder::new();
        CommitStatsHandler
            .handle(context_with(Arc::new(host)), &responder, &interaction)
            .await
            .unwrap();
        responder.calls()
    }

    #[test]
    fn test_format_repository() {
        let stats = RepositoryCommits {
            repository: RepositoryRef::new("SerenityOS", "serenity"),
            total_count: 5,
            commits: vec![
                sample_commit("aaaaaaaaaa", "AK: One\n\nbody"),
                sample_commit("bbbbbbbbbb", "AK: Two"),
                sample_commit("cccccccccc", "AK: Three"),
                sample_commit("dddddddddd", "AK: Four"),
            ],
        };
        let block = format_repository("kling", &stats).unwrap();
        let lines: Vec<_> = block.lines().collect();

        assert_eq!(
            lines[0],
            "**[SerenityOS/serenity](<https://github.com/SerenityOS/serenity>)** - **5 commits**"
        );
        assert!(lines[1].starts_with("    - AK: One ([aaaaaaa]("));
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains("commits?author=kling"));

        let empty = RepositoryCommits {
            total_count: 0,
            ..stats
        };
        assert!(format_repository("kling", &empty).is_none());
    }

    #[test]
    fn test_header_pluralization() {
        let user = github_user("kling");
        assert!(format_header(&user, "SerenityOS", 1, None).contains("total of 1 commit across"));
        assert!(format_header(&user, "SerenityOS", 2, Some(":catdog:"))
            .contains("2 commits across the SerenityOS project :catdog:**"));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let calls = run(MemoryHost::default(), command("ghost")).await;
        assert_eq!(
            calls,
            vec![Recorded::Reply(
                Reply::text("We looked everywhere; but we couldn't find `ghost` :^(").ephemeral()
            )]
        );
    }

    #[tokio::test]
    async fn test_no_contributions() {
        let host = MemoryHost::default()
            .with_user(github_user("kling"))
            .with_repository("serenity", false);
        let calls = run(host, command("kling")).await;
        assert_eq!(
            calls,
            vec![
                Recorded::Defer(true),
                Recorded::Edit(Reply::text("Couldn't find any contributions from kling :^(")),
            ]
        );
    }

    #[tokio::test]
    async fn test_short_report_is_single_edit() {
        let host = MemoryHost::default()
            .with_user(github_user("kling"))
            .with_repository("serenity", false)
            .with_repository("jakt", false)
            .with_repository("artwork", false)
            .with_repository("old", true)
            .with_commits("serenity", 10, vec![sample_commit("aaaaaaaaaa", "AK: One")])
            .with_commits("jakt", 2, vec![sample_commit("bbbbbbbbbb", "Jakt: Two")])
            .with_commits("artwork", 50, vec![sample_commit("cccccccccc", "Art")])
            .with_commits("old", 50, vec![sample_commit("dddddddddd", "Old")]);

        let interaction = command("kling").with_option("silent", OptionValue::Boolean(false));
        let calls = run(host, interaction).await;

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Recorded::Defer(false));
        let Recorded::Edit(edit) = &calls[1] else {
            panic!("expected edit");
        };
        let content = edit.content.as_deref().unwrap();
        assert!(content.contains("total of 12 commits"));
        let serenity = content.find("SerenityOS/serenity").unwrap();
        let jakt = content.find("SerenityOS/jakt").unwrap();
        assert!(serenity < jakt);
        assert!(!content.contains("artwork"));
        assert!(!content.contains("SerenityOS/old"));
    }

    #[tokio::test]
    async fn test_long_report_is_chunked_into_follow_ups() {
        let mut host = MemoryHost::default().with_user(github_user("kling"));
        for i in 0..40 {
            let name = format!("repository-with-a-long-name-{i:02}");
            host = host.with_repository(&name, false).with_commits(
                &name,
                100 - i as u64,
                vec![
                    sample_commit("aaaaaaaaaa", "LibSomething: A fairly long commit subject line"),
                    sample_commit("bbbbbbbbbb", "LibSomething: Another long commit subject line"),
                ],
            );
        }

        let calls = run(host, command("kling")).await;
        assert_eq!(calls[0], Recorded::Defer(true));
        let Recorded::Edit(header) = &calls[1] else {
            panic!("expected header edit");
        };
        assert!(header.content.as_deref().unwrap().starts_with("**__[kling]"));

        let follow_ups: Vec<_> = calls[2..]
            .iter()
            .map(|call| match call {
                Recorded::FollowUp(reply) => reply,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert!(follow_ups.len() > 1);
        for reply in &follow_ups {
            assert!(reply.ephemeral);
            assert!(reply.content.as_deref().unwrap().chars().count() <= MESSAGE_LIMIT);
        }
    }
}
