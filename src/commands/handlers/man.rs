//! Man page viewer
//!
//! Handles: man, plus the maximize/minimize buttons on its replies
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Toggles go through the collapsible view; reactions and buttons share one path
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{
    ButtonHandler, CommandDeclaration, CommandHandler, OptionDeclaration,
};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};
use crate::features::collapsible::{
    apply_toggle, render_man_embed, RenderedView, ToggleDirection, ToggleEvent, ToggleOutcome,
    ViewMode, MAXIMIZE_BUTTON_ID, MAXIMIZE_EMOJI, MINIMIZE_BUTTON_ID, MINIMIZE_EMOJI,
};
use crate::github::ManPageLocator;
use crate::message_components::ActionRow;

/// Handler for /man
pub struct ManHandler;

/// Maximize and minimize buttons, decorated with guild emoji when available
pub async fn toggle_buttons(ctx: &CommandContext) -> ActionRow {
    ActionRow::new()
        .button(
            MAXIMIZE_BUTTON_ID,
            "Maximize",
            ctx.emojis.get(MAXIMIZE_EMOJI).await,
        )
        .button(
            MINIMIZE_BUTTON_ID,
            "Minimize",
            ctx.emojis.get(MINIMIZE_EMOJI).await,
        )
}

/// View state carried by the message a component or reaction belongs to
pub fn rendered_view(interaction: &Interaction) -> RenderedView {
    match &interaction.source_message {
        Some(message) => RenderedView::from_message(
            &message.embeds,
            message
                .origin_user
                .as_ref()
                .map(|user| (user.id, user.tag.clone())),
        ),
        None => RenderedView::default(),
    }
}

#[async_trait]
impl CommandHandler for ManHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["man"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![CommandDeclaration::chat_input("man", "Show a particular program's man page")
            .option(
                OptionDeclaration::integer("section", "The section in which the page to display is")
                    .required(),
            )
            .option(OptionDeclaration::string("page", "The name of the page to display").required())]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let section = interaction
            .integer_option("section")
            .map(|section| section.to_string())
            .unwrap_or_default();
        let page = interaction.string_option("page").unwrap_or_default().trim();

        let locator = ManPageLocator::new(&section, page);
        if let Some(man) = ctx.github.fetch_manpage(&locator).await? {
            let reply = Reply::embed(render_man_embed(&man, ViewMode::default()))
                .with_components(vec![toggle_buttons(&ctx).await]);
            return responder.reply(reply).await;
        }

        info!("No man page {page}({section}) for {}", interaction.user.tag);
        responder
            .reply(
                Reply::text(format!(
                    "No matching man page found for {page}({section}) {}",
                    ctx.sad_caret().await
                ))
                .ephemeral(),
            )
            .await
    }

    fn button(&self) -> Option<&dyn ButtonHandler> {
        Some(self)
    }

    fn button_ids(&self) -> &'static [&'static str] {
        &[MAXIMIZE_BUTTON_ID, MINIMIZE_BUTTON_ID]
    }
}

#[async_trait]
impl ButtonHandler for ManHandler {
    async fn handle_button(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let Some(direction) = ToggleDirection::from_button_id(&interaction.name) else {
            return Ok(());
        };
        let event = ToggleEvent {
            direction,
            requester_id: interaction.user.id,
        };

        match apply_toggle(ctx.github.as_ref(), &rendered_view(interaction), &event).await? {
            ToggleOutcome::Updated(embed) => responder.update_message(Reply::embed(embed)).await,
            ToggleOutcome::Rejected(notice) => responder.reply(Reply::text(notice).ephemeral()).await,
            ToggleOutcome::Unchanged => Ok(()),
        }
    }
}
