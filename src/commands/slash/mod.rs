//! # Application Command Registration
//!
//! Builds serenity application commands from handler declarations and
//! registers them with Discord.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Commands are built from handler declarations instead of per-command builders
//! - 2.0.0: Consolidate context menu and slash registration
//! - 1.0.0: Reorganized from monolithic slash_commands.rs

use anyhow::Result;
use log::info;
use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::model::application::command::{Command, CommandOptionType, CommandType};
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use super::handler::{CommandDeclaration, DeclarationKind, OptionDeclaration, OptionKind};

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::SubCommand => CommandOptionType::SubCommand,
    }
}

fn create_option(declaration: &OptionDeclaration) -> CreateApplicationCommandOption {
    let mut option = CreateApplicationCommandOption::default();
    option
        .name(&declaration.name)
        .description(&declaration.description)
        .kind(option_type(declaration.kind));

    if declaration.kind != OptionKind::SubCommand {
        option.required(declaration.required);
    }
    for (name, value) in &declaration.choices {
        option.add_string_choice(name, value);
    }
    for sub_option in &declaration.options {
        option.add_sub_option(create_option(sub_option));
    }
    option
}

/// Build one application command from a handler declaration
pub fn create_command(declaration: &CommandDeclaration) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name(&declaration.name);

    match declaration.kind {
        DeclarationKind::ChatInput => {
            command
                .kind(CommandType::ChatInput)
                .description(&declaration.description);
        }
        DeclarationKind::MessageContextMenu => {
            command.kind(CommandType::Message);
        }
        DeclarationKind::UserContextMenu => {
            command.kind(CommandType::User);
        }
    }

    for option in &declaration.options {
        command.add_option(create_option(option));
    }
    command
}

pub fn create_commands(declarations: &[CommandDeclaration]) -> Vec<CreateApplicationCommand> {
    declarations.iter().map(create_command).collect()
}

/// Registers all commands globally
pub async fn register_global_commands(
    ctx: &Context,
    declarations: &[CommandDeclaration],
) -> Result<()> {
    let commands = create_commands(declarations);
    let count = commands.len();

    Command::set_global_application_commands(&ctx.http, |builder| {
        for command in commands {
            builder.add_application_command(command);
        }
        builder
    })
    .await?;

    info!("Global application commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all commands for a specific guild (faster for testing)
pub async fn register_guild_commands(
    ctx: &Context,
    guild_id: GuildId,
    declarations: &[CommandDeclaration],
) -> Result<()> {
    let commands = create_commands(declarations);
    let count = commands.len();

    guild_id
        .set_application_commands(&ctx.http, |builder| {
            for command in commands {
                builder.add_application_command(command);
            }
            builder
        })
        .await?;

    info!("Guild application commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}
