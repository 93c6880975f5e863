//! Handles: slap

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};

/// Handler for /slap
pub struct SlapHandler;

pub fn slap_line(user: &str, target: Option<&str>) -> String {
    format!(
        "*{user} slaps {} around a bit with a large trout*",
        target.unwrap_or("Someone")
    )
}

#[async_trait]
impl CommandHandler for SlapHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["slap"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        vec![
            CommandDeclaration::chat_input("slap", "Slap someone around a bit with a large trout")
                .option(OptionDeclaration::user("target", "The user to slap")),
        ]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let target = interaction
            .user_option("target")
            .map(|target| target.display_name.as_str());
        let content = slap_line(interaction.user.display_name(), target);
        responder.reply(Reply::text(content)).await
    }
}
