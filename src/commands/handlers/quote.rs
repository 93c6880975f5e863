//! Fortunes database submissions
//!
//! Handles: Add Quote (message context menu)
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.5.0
//!
//! ## Changelog
//! - 1.1.0: Context menu instead of reply/link/id lookup
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, ContextMenuHandler};
use crate::commands::interaction::{Interaction, InteractionUser, TargetMessage};
use crate::commands::responder::{Reply, Responder};
use crate::core::Config;
use crate::github::Fortune;

pub const ADD_QUOTE: &str = "Add Quote";

/// Handler for the "Add Quote" context menu
pub struct QuoteHandler;

fn may_quote(config: &Config, user: &InteractionUser) -> bool {
    config
        .quote_role_id
        .is_some_and(|role| user.roles.contains(&role))
}

/// Fortune entry for a quoted message, stamped with the current time
pub fn fortune_from_message(message: &TargetMessage) -> Fortune {
    Fortune {
        quote: message.content.clone(),
        author: message.author_name.clone(),
        utc_time: Utc::now().timestamp(),
        url: message.link(),
        context: None,
    }
}

#[async_trait]
impl CommandHandler for QuoteHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &[ADD_QUOTE]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![CommandDeclaration::message_context_menu(ADD_QUOTE)]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        self.handle_context_menu(ctx, responder, interaction).await
    }

    fn context_menu(&self) -> Option<&dyn ContextMenuHandler> {
        Some(self)
    }
}

#[async_trait]
impl ContextMenuHandler for QuoteHandler {
    async fn handle_context_menu(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        if !may_quote(&ctx.config, &interaction.user) {
            return responder
                .reply(Reply::text("Insufficient permission").ephemeral())
                .await;
        }

        let Some(message) = interaction
            .target_message
            .as_ref()
            .filter(|message| !message.content.trim().is_empty())
        else {
            return responder
                .reply(Reply::text("There is nothing to quote in that message").ephemeral())
                .await;
        };

        responder.defer(true).await?;

        let host = ctx.github.as_ref();
        let opened = async {
            let mut fortunes = host.fetch_fortunes().await?;
            fortunes.push(fortune_from_message(message));
            host.open_fortunes_pull_request(&fortunes, interaction.user.display_name())
                .await
        }
        .await;

        let content = match opened {
            Ok(number) => {
                info!(
                    "{} quoted message {} in pull request #{number}",
                    interaction.user.tag, message.id
                );
                format!(
                    "Pull Request opened! https://github.com/{}/pull/{number}",
                    host.repository().full_name()
                )
            }
            Err(e) => {
                warn!("Failed to open fortunes pull request: {e:#}");
                format!("Failed creating a pull request {}", ctx.sad_caret().await)
            }
        };
        responder.edit_reply(Reply::text(content)).await
    }
}
