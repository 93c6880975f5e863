//! serenity interactions to [`Interaction`]

use serenity::model::application::command::{CommandOptionType, CommandType};
use serenity::model::application::component::ComponentType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption, CommandDataOptionValue,
};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::channel::Message;
use serenity::model::guild::Member;
use serenity::model::user::User;

use crate::commands::interaction::{
    CommandOption, Interaction, InteractionKind, InteractionUser, OptionValue, ResolvedUser,
    SourceMessage, TargetMessage,
};
use crate::core::Embed;

pub fn interaction_user(user: &User, member: Option<&Member>) -> InteractionUser {
    InteractionUser {
        id: user.id.0,
        tag: user.tag(),
        bot: user.bot,
        roles: member
            .map(|member| member.roles.iter().map(|role| role.0).collect())
            .unwrap_or_default(),
        nick: member.and_then(|member| member.nick.clone()),
    }
}

fn option_value(option: &CommandDataOption) -> Option<OptionValue> {
    if let Some(CommandDataOptionValue::User(user, member)) = &option.resolved {
        let display_name = member
            .as_ref()
            .and_then(|member| member.nick.clone())
            .unwrap_or_else(|| user.name.clone());
        return Some(OptionValue::User(ResolvedUser {
            id: user.id.0,
            display_name,
        }));
    }

    let value = option.value.as_ref()?;
    match option.kind {
        CommandOptionType::String => value.as_str().map(|s| OptionValue::String(s.to_string())),
        CommandOptionType::Integer => value.as_i64().map(OptionValue::Integer),
        CommandOptionType::Number => value.as_f64().map(OptionValue::Number),
        CommandOptionType::Boolean => value.as_bool().map(OptionValue::Boolean),
        _ => None,
    }
}

/// Subcommand name (if any) and the options that apply to it
fn flatten_options(options: &[CommandDataOption]) -> (Option<String>, Vec<CommandOption>) {
    if let [sub] = options {
        if matches!(
            sub.kind,
            CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup
        ) {
            let (nested, options) = flatten_options(&sub.options);
            return (nested.or_else(|| Some(sub.name.clone())), options);
        }
    }

    let options = options
        .iter()
        .filter_map(|option| {
            option_value(option).map(|value| CommandOption {
                name: option.name.clone(),
                value,
            })
        })
        .collect();
    (None, options)
}

pub fn target_message(message: &Message) -> TargetMessage {
    let author_name = message
        .member
        .as_ref()
        .and_then(|member| member.nick.clone())
        .unwrap_or_else(|| message.author.name.clone());

    TargetMessage {
        id: message.id.0,
        channel_id: message.channel_id.0,
        guild_id: message.guild_id.map(|id| id.0),
        content: message.content.clone(),
        author_name,
        author_bot: message.author.bot,
        timestamp: message.timestamp.unix_timestamp(),
    }
}

pub fn source_message(message: &Message) -> SourceMessage {
    let origin = message.interaction.as_ref();
    SourceMessage {
        id: message.id.0,
        embeds: message.embeds.iter().map(Embed::from_serenity).collect(),
        origin_command: origin.map(|interaction| interaction.name.clone()),
        origin_user: origin.map(|interaction| interaction_user(&interaction.user, None)),
    }
}

pub fn from_command(command: &ApplicationCommandInteraction) -> Interaction {
    let kind = match command.data.kind {
        CommandType::ChatInput => InteractionKind::ChatInput,
        CommandType::Message | CommandType::User => InteractionKind::ContextMenu,
        _ => InteractionKind::Other,
    };

    let mut interaction = Interaction::new(
        kind,
        command.data.name.clone(),
        interaction_user(&command.user, command.member.as_ref()),
    );
    let (subcommand, options) = flatten_options(&command.data.options);
    interaction.subcommand = subcommand;
    interaction.options = options;
    interaction.target_message = command.data.resolved.messages.values().next().map(target_message);
    interaction.guild_id = command.guild_id.map(|id| id.0);
    interaction.channel_id = command.channel_id.0;
    interaction
}

pub fn from_component(component: &MessageComponentInteraction) -> Interaction {
    let kind = match component.data.component_type {
        ComponentType::Button => InteractionKind::Button,
        ComponentType::SelectMenu => InteractionKind::SelectMenu,
        _ => InteractionKind::Other,
    };

    let mut interaction = Interaction::new(
        kind,
        component.data.custom_id.clone(),
        interaction_user(&component.user, component.member.as_ref()),
    );
    interaction.values = component.data.values.clone();
    interaction.source_message = Some(source_message(&component.message));
    interaction.guild_id = component.guild_id.map(|id| id.0);
    interaction.channel_id = component.channel_id.0;
    interaction
}
