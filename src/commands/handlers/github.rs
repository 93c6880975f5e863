//! Issue and pull request lookup
//!
//! Handles: github, issue, pull
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: URL matching follows the configured repository
//! - 1.0.0: Number, URL, and search lookups

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use regex::Regex;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};
use crate::core::{Embed, RepositoryRef};
use crate::github::embed_from_issue_or_pull;

const DESCRIPTION: &str = "Link an issue or pull request";

/// Handler for github, issue, and pull
pub struct GithubHandler;

/// Issue or pull request number from a GitHub URL into `repository`
pub fn number_from_url(url: &str, repository: &RepositoryRef) -> Option<u64> {
    let pattern = format!(
        r"github\.com/{}/{}/(?:issues|pull)/(\d+)",
        regex::escape(&repository.owner),
        regex::escape(&repository.name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(url)?.get(1)?.as_str().parse().ok()
}

/// Reply used when a lookup finds nothing
pub async fn no_matching_reply(ctx: &CommandContext) -> Reply {
    Reply::text(format!(
        "No matching issues or pull requests found {}",
        ctx.sad_caret().await
    ))
    .ephemeral()
}

#[async_trait]
impl CommandHandler for GithubHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["github", "issue", "pull"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        self.command_names()
            .iter()
            .map(|name| {
                CommandDeclaration::chat_input(name, DESCRIPTION)
                    .option(OptionDeclaration::integer(
                        "number",
                        "The issue or pull request number",
                    ))
                    .option(OptionDeclaration::string(
                        "query",
                        "A string to query issues and pull requests with",
                    ))
                    .option(OptionDeclaration::string(
                        "url",
                        "The full url to an issue or pull request",
                    ))
            })
            .collect()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        match self.lookup(&ctx, interaction).await? {
            Some(embed) => responder.reply(Reply::embed(embed)).await,
            None => responder.reply(no_matching_reply(&ctx).await).await,
        }
    }
}

impl GithubHandler {
    /// Try number, then URL, then free-text search
    async fn lookup(&self, ctx: &CommandContext, interaction: &Interaction) -> Result<Option<Embed>> {
        let host = ctx.github.as_ref();

        if let Some(number) = interaction.integer_option("number") {
            if let Ok(number) = u64::try_from(number) {
                let found = host.get_issue_or_pull(number).await?;
                if let Some(embed) = embed_from_issue_or_pull(host, found).await? {
                    return Ok(Some(embed));
                }
            }
        }

        if let Some(url) = interaction.string_option("url") {
            if let Some(number) = number_from_url(url, host.repository()) {
                let found = host.get_issue_or_pull(number).await?;
                if let Some(embed) = embed_from_issue_or_pull(host, found).await? {
                    return Ok(Some(embed));
                }
            }
        }

        if let Some(query) = interaction.string_option("query") {
            let found = host.search_issues_or_pulls(query).await?;
            if let Some(embed) = embed_from_issue_or_pull(host, found).await? {
                return Ok(Some(embed));
            }
        }

        debug!("No issue or pull request matched for {}", interaction.user.tag);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::interaction::OptionValue;
    use crate::commands::testing::{
        chat_input, context_with, sample_issue, Recorded, RecordingResponder, MemoryHost,
    };

    fn serenity() -> RepositoryRef {
        RepositoryRef::new("SerenityOS", "serenity")
    }

    async fn run(host: MemoryHost, interaction: Interaction) -> Vec<Recorded> {
        let responder = RecordingResponder::new();
        GithubHandler
            .handle(context_with(Arc::new(host)), &responder, &interaction)
            .await
            .unwrap();
        responder.calls()
    }

    fn embed_title(calls: &[Recorded]) -> Option<String> {
        match calls {
            [Recorded::Reply(reply)] => reply.embeds.first().and_then(|e| e.title.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_number_from_url() {
        assert_eq!(
            number_from_url("https://github.com/SerenityOS/serenity/pull/12345", &serenity()),
            Some(12345)
        );
        assert_eq!(
            number_from_url("https://github.com/SerenityOS/serenity/issues/7#issuecomment-1", &serenity()),
            Some(7)
        );
        assert_eq!(
            number_from_url("https://github.com/LadybirdBrowser/ladybird/pull/1", &serenity()),
            None
        );
        assert_eq!(number_from_url("not a url", &serenity()), None);
    }

    #[test]
    fn test_declares_all_aliases() {
        let names: Vec<_> = GithubHandler
            .declarations()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["github", "issue", "pull"]);
    }

    #[tokio::test]
    async fn test_lookup_by_number() {
        let host = MemoryHost::default().with_issue(sample_issue(42, "Kernel: Panic"));
        let interaction = chat_input("issue").with_option("number", OptionValue::Integer(42));

        let calls = run(host, interaction).await;
        assert_eq!(embed_title(&calls).as_deref(), Some("serenity #42: Kernel: Panic"));
    }

    #[tokio::test]
    async fn test_falls_back_from_number_to_url_to_query() {
        let host = MemoryHost::default()
            .with_issue(sample_issue(7, "From url"))
            .with_search_result(sample_issue(9, "From search"));

        let by_url = chat_input("github")
            .with_option("number", OptionValue::Integer(1))
            .with_option(
                "url",
                OptionValue::String("https://github.com/SerenityOS/serenity/issues/7".to_string()),
            );
        let host = Arc::new(host);
        let responder = RecordingResponder::new();
        GithubHandler
            .handle(context_with(host.clone()), &responder, &by_url)
            .await
            .unwrap();
        assert_eq!(embed_title(&responder.calls()).as_deref(), Some("serenity #7: From url"));

        let by_query = chat_input("github")
            .with_option("query", OptionValue::String("crash".to_string()));
        let responder = RecordingResponder::new();
        GithubHandler
            .handle(context_with(host), &responder, &by_query)
            .await
            .unwrap();
        assert_eq!(embed_title(&responder.calls()).as_deref(), Some("serenity #9: From search"));
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let calls = run(MemoryHost::default(), chat_input("pull")).await;
        assert_eq!(
            calls,
            vec![Recorded::Reply(
                Reply::text("No matching issues or pull requests found <:sadcaret:1>").ephemeral()
            )]
        );
    }

    #[tokio::test]
    async fn test_host_failure_propagates() {
        let responder = RecordingResponder::new();
        let interaction = chat_input("issue").with_option("number", OptionValue::Integer(1));
        let result = GithubHandler
            .handle(context_with(Arc::new(MemoryHost::failing())), &responder, &interaction)
            .await;
        assert!(result.is_err());
        assert!(responder.calls().is_empty());
    }
}
