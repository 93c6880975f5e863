//! Runtime log level control
//!
//! Handles: log (get, set)
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.8.0

use anyhow::Result;
use async_trait::async_trait;
use log::{info, LevelFilter};
use std::str::FromStr;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler, OptionDeclaration};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Handler for /log
pub struct LogHandler;

fn level_name(level: LevelFilter) -> String {
    level.to_string().to_lowercase()
}

pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(raw.trim()).ok()
}

/// Reply for `/log get`; a level changed since startup is highlighted
pub fn current_level_message(current: LevelFilter, configured: LevelFilter) -> String {
    let name = level_name(current);
    if current == configured {
        format!("The logging level is currently set to `{name}`!")
    } else {
        format!("The logging level is currently set to **`{name}` (modified)**!")
    }
}

pub fn changed_level_message(previous: LevelFilter, next: LevelFilter) -> String {
    format!(
        "The logging level was successfully changed from `{}` to `{}`",
        level_name(previous),
        level_name(next)
    )
}

#[async_trait]
impl CommandHandler for LogHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["log"]
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        let level = LEVELS.iter().fold(
            OptionDeclaration::string("level", "The logging level").required(),
            |option, level| option.choice(level, level),
        );

        vec![CommandDeclaration::chat_input("log", "Manage BuggieBot's logging")
            .option(OptionDeclaration::subcommand("get", "Get the current logging value"))
            .option(
                OptionDeclaration::subcommand("set", "Temporarily set the logging level")
                    .option(level),
            )]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        if interaction.guild_id.is_none() {
            return responder
                .reply(
                    Reply::text("Command only available on the SerenityOS Discord Server")
                        .ephemeral(),
                )
                .await;
        }

        match interaction.subcommand.as_deref() {
            Some("get") => {
                let content = current_level_message(log::max_level(), ctx.config.log_level);
                responder.reply(Reply::text(content)).await
            }
            Some("set") => {
                if !ctx.config.is_privileged(&interaction.user.roles) {
                    return responder
                        .reply(Reply::text("Insufficient permission").ephemeral())
                        .await;
                }

                let Some(next) = interaction.string_option("level").and_then(parse_level) else {
                    return responder
                        .reply(Reply::text("Invalid logging level").ephemeral())
                        .await;
                };

                let previous = log::max_level();
                log::set_max_level(next);
                info!(
                    "{} changed the logging level from {previous} to {next}",
                    interaction.user.tag
                );
                responder
                    .reply(Reply::text(changed_level_message(previous, next)))
                    .await
            }
            _ => {
                responder
                    .reply(Reply::text("Invalid subcommand").ephemeral())
                    .await
            }
        }
    }
}
