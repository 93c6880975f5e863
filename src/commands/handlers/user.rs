//! Recent GitHub activity picker
//!
//! Handles: user, plus the issue and pull request menus on its replies
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.7.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::github::no_matching_reply;
use crate::commands::context::CommandContext;
use crate::commands::handler::{
    CommandDeclaration, CommandHandler, OptionDeclaration, SelectMenuHandler,
};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};
use crate::core::{github_color, trim_title, Embed};
use crate::github::{embed_from_issue_or_pull, Issue};
use crate::message_components::{ActionRow, SelectMenu, SelectOption};

pub const ISSUES_MENU_ID: &str = "issues";
pub const PULLS_MENU_ID: &str = "pulls";

/// Handler for /user
pub struct UserHandler;

fn issue_emoji_name(issue: &Issue) -> &'static str {
    if issue.is_open() {
        "open_issue"
    } else {
        "closed_issue"
    }
}

fn pull_emoji_name(pull: &Issue) -> &'static str {
    let merged = pull
        .pull_request
        .as_ref()
        .is_some_and(|marker| marker.merged_at.is_some());
    if pull.is_open() {
        "open_pull"
    } else if merged {
        "merged_pull"
    } else {
        "closed_pull"
    }
}

async fn menu(
    ctx: &CommandContext,
    custom_id: &str,
    placeholder: &str,
    items: &[Issue],
    emoji_name: fn(&Issue) -> &'static str,
) -> SelectMenu {
    let mut options = Vec::with_capacity(items.len());
    for item in items {
        options.push(SelectOption {
            label: trim_title(&item.title),
            value: item.number.to_string(),
            emoji: ctx.emojis.get(emoji_name(item)).await,
        });
    }

    SelectMenu {
        custom_id: custom_id.to_string(),
        placeholder: placeholder.to_string(),
        options,
    }
}

#[async_trait]
impl CommandHandler for UserHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["user"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::chat_input("user", "Show recent GitHub activity of a user").option(
                OptionDeclaration::string("username", "GitHub username").required(),
            ),
        ]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let username = interaction.string_option("username").unwrap_or_default().trim();

        responder.defer(true).await?;

        let activity = ctx.github.fetch_user_activity(username).await?;
        if activity.is_empty() {
            let mut reply = no_matching_reply(&ctx).await;
            reply.ephemeral = false;
            return responder.edit_reply(reply).await;
        }

        let mut rows = Vec::new();
        if !activity.issues.is_empty() {
            rows.push(ActionRow::new().select_menu(
                menu(&ctx, ISSUES_MENU_ID, "Issues", &activity.issues, issue_emoji_name).await,
            ));
        }
        if !activity.pulls.is_empty() {
            rows.push(ActionRow::new().select_menu(
                menu(&ctx, PULLS_MENU_ID, "Pull Requests", &activity.pulls, pull_emoji_name).await,
            ));
        }

        let embed = Embed::new().color(github_color::OPEN).title(format!(
            "Select a Pull Request or Issue to display from {username}'s recent github activity."
        ));
        responder
            .edit_reply(Reply::embed(embed).with_components(rows))
            .await
    }

    fn select_menu(&self) -> Option<&dyn SelectMenuHandler> {
        Some(self)
    }
}

#[async_trait]
impl SelectMenuHandler for UserHandler {
    async fn handle_select_menu(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let number = interaction
            .values
            .first()
            .and_then(|value| value.parse::<u64>().ok());

        let embed = match number {
            Some(number) => {
                let host = ctx.github.as_ref();
                let found = host.get_issue_or_pull(number).await?;
                embed_from_issue_or_pull(host, found).await?
            }
            None => None,
        };

        match embed {
            Some(embed) => {
                responder
                    .update_message(Reply::embed(embed).with_components(Vec::new()))
                    .await
            }
            None => responder.reply(no_matching_reply(&ctx).await).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::interaction::{InteractionKind, OptionValue};
    use crate::commands::testing::{
        chat_input, context_with, sample_issue, user, MemoryHost, Recorded, RecordingResponder,
    };
    use crate::github::models::PullRequestMarker;
    use crate::github::UserActivity;
    use crate::message_components::Component;
    use chrono::Utc;

    fn pull_marker(merged: bool) -> Option<PullRequestMarker> {
        Some(PullRequestMarker {
            merged_at: merged.then(Utc::now),
        })
    }

    fn activity() -> UserActivity {
        let mut merged = sample_issue(20, "LibWeb: Merged");
        merged.state = "closed".to_string();
        merged.pull_request = pull_marker(true);
        let mut closed = sample_issue(21, "LibWeb: Closed");
        closed.state = "closed".to_string();
        closed.pull_request = pull_marker(false);

        UserActivity {
            issues: vec![sample_issue(10, &"Long title ".repeat(20))],
            pulls: vec![merged, closed],
        }
    }

    fn command(username: &str) -> Interaction {
        chat_input("user").with_option("username", OptionValue::String(username.to_string()))
    }

    #[test]
    fn test_pull_emoji_names() {
        let activity = activity();
        assert_eq!(pull_emoji_name(&activity.pulls[0]), "merged_pull");
        assert_eq!(pull_emoji_name(&activity.pulls[1]), "closed_pull");
        assert_eq!(issue_emoji_name(&activity.issues[0]), "open_issue");
    }

    #[tokio::test]
    async fn test_menus_for_recent_activity() {
        let host = MemoryHost::default().with_activity("kling", activity());
        let responder = RecordingResponder::new();
        UserHandler
            .handle(context_with(Arc::new(host)), &responder, &command("kling"))
            .await
            .unwrap();

        let calls = responder.calls();
        assert_eq!(calls[0], Recorded::Defer(true));
        let Recorded::Edit(edit) = &calls[1] else {
            panic!("expected edit");
        };
        assert_eq!(
            edit.embeds[0].title.as_deref(),
            Some("Select a Pull Request or Issue to display from kling's recent github activity.")
        );

        let rows = edit.components.as_ref().unwrap();
        assert_eq!(rows.len(), 2);
        let Component::SelectMenu(issues) = &rows[0].components[0] else {
            panic!("expected select menu");
        };
        assert_eq!(issues.custom_id, "issues");
        assert_eq!(issues.options[0].value, "10");
        assert_eq!(issues.options[0].label.chars().count(), 100);

        let Component::SelectMenu(pulls) = &rows[1].components[0] else {
            panic!("expected select menu");
        };
        assert_eq!(pulls.placeholder, "Pull Requests");
        assert_eq!(pulls.options.len(), 2);
    }

    #[tokio::test]
    async fn test_no_activity() {
        let responder = RecordingResponder::new();
        UserHandler
            .handle(context_with(Arc::new(MemoryHost::default())), &responder, &command("ghost"))
            .await
            .unwrap();
        assert_eq!(
            responder.calls(),
            vec![
                Recorded::Defer(true),
                Recorded::Edit(Reply::text(
                    "No matching issues or pull requests found <:sadcaret:1>"
                )),
            ]
        );
    }

    #[tokio::test]
    async fn test_selection_replaces_menu_with_embed() {
        let host = MemoryHost::default().with_issue(sample_issue(10, "Kernel: Panic"));
        let mut interaction = Interaction::new(InteractionKind::SelectMenu, "issues", user(1));
        interaction.values = vec!["10".to_string()];

        let responder = RecordingResponder::new();
        UserHandler
            .handle_select_menu(context_with(Arc::new(host)), &responder, &interaction)
            .await
            .unwrap();

        let calls = responder.calls();
        let Recorded::Update(update) = &calls[0] else {
            panic!("expected update");
        };
        assert_eq!(update.embeds[0].title.as_deref(), Some("serenity #10: Kernel: Panic"));
        assert_eq!(update.components, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_selection_of_missing_issue() {
        let mut interaction = Interaction::new(InteractionKind::SelectMenu, "pulls", user(1));
        interaction.values = vec!["99".to_string()];

        let responder = RecordingResponder::new();
        UserHandler
            .handle_select_menu(context_with(Arc::new(MemoryHost::default())), &responder, &interaction)
            .await
            .unwrap();
        assert_eq!(
            responder.calls(),
            vec![Recorded::Reply(
                Reply::text("No matching issues or pull requests found <:sadcaret:1>").ephemeral()
            )]
        );
    }
}
