//! Handles: plan, wen

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};

const PLACEHOLDER: &str = "`$THING`";
const BASE_REPLY: &str = "> Will SerenityOS support `$THING`?\nMaybe. Maybe not. There is no plan.\n\nSee: [FAQ](<https://github.com/SerenityOS/serenity/blob/master/Documentation/FAQ.md>)";

/// Handler for /plan and /wen
pub struct PlanHandler;

pub fn plan_reply(feature: Option<&str>) -> String {
    match feature.map(str::trim).filter(|f| !f.is_empty()) {
        Some(feature) => BASE_REPLY.replacen(PLACEHOLDER, feature, 1),
        None => BASE_REPLY.to_string(),
    }
}

#[async_trait]
impl CommandHandler for PlanHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["plan", "wen"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        self.command_names()
            .iter()
            .map(|name| {
                CommandDeclaration::chat_input(name, "Check if a feature is part of the plan")
                    .option(OptionDeclaration::string("feature", "The feature to check"))
            })
            .collect()
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        let content = plan_reply(interaction.string_option("feature"));
        responder.reply(Reply::text(content)).await
    }
}
