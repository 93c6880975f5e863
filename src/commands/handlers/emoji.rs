//! Handles: emoji

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};

/// Handler for /emoji
pub struct EmojiHandler;

#[async_trait]
impl CommandHandler for EmojiHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["emoji"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![CommandDeclaration::chat_input("emoji", "Make Buggie post an emoji")
            .option(OptionDeclaration::string("name", "The name of the emoji").required())]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let name = interaction
            .string_option("name")
            .unwrap_or_default()
            .trim()
            .trim_matches(':');

        match ctx.emojis.get(name).await {
            Some(emoji) => responder.reply(Reply::text(emoji.to_string())).await,
            None => {
                responder
                    .reply(Reply::text(ctx.emoji("thonk").await).ephemeral())
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::interaction::OptionValue;
    use crate::commands::testing::{chat_input, test_context, Recorded, RecordingResponder};

    async fn run(name: &str) -> Vec<Recorded> {
        let responder = RecordingResponder::new();
        let interaction =
            chat_input("emoji").with_option("name", OptionValue::String(name.to_string()));
        EmojiHandler
            .handle(test_context(), &responder, &interaction)
            .await
            .unwrap();
        responder.calls()
    }

    #[tokio::test]
    async fn test_posts_known_emoji() {
        assert_eq!(
            run(":maximize:").await,
            vec![Recorded::Reply(Reply::text("<:maximize:2>"))]
        );
    }

    #[tokio::test]
    async fn test_unknown_emoji_thonks() {
        assert_eq!(
            run("yakslice").await,
            vec![Recorded::Reply(Reply::text(":thonk:").ephemeral())]
        );
    }
}
