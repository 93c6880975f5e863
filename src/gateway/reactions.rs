//! Maximize/minimize reactions on man page replies

use anyhow::{Context as _, Result};
use log::{debug, warn};
use serenity::model::channel::{Reaction, ReactionType};
use serenity::prelude::Context;

use super::convert::source_message;
use crate::commands::CommandContext;
use crate::features::collapsible::{
    apply_toggle, RenderedView, ToggleDirection, ToggleEvent, ToggleOutcome,
};

/// Facts about a reaction needed to decide whether it is a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionFacts {
    pub bot_user_id: u64,
    pub reactor_id: u64,
    pub message_author_id: u64,
    pub emoji_name: Option<String>,
}

/// Toggle requested by a reaction, if any
///
/// Only reactions by other users on the bot's own messages count.
pub fn toggle_event(facts: &ReactionFacts) -> Option<ToggleEvent> {
    if facts.message_author_id != facts.bot_user_id || facts.reactor_id == facts.bot_user_id {
        return None;
    }

    let direction = ToggleDirection::from_emoji_name(facts.emoji_name.as_deref()?)?;
    Some(ToggleEvent {
        direction,
        requester_id: facts.reactor_id,
    })
}

/// Rejection notice addressed to the user who reacted
pub fn rejection_notice(reactor_id: u64, notice: &str) -> String {
    format!("<@{reactor_id}> {notice}")
}

fn emoji_name(emoji: &ReactionType) -> Option<String> {
    match emoji {
        ReactionType::Custom { name, .. } => name.clone(),
        ReactionType::Unicode(name) => Some(name.clone()),
        _ => None,
    }
}

/// Apply a reaction toggle to the message it was added to
pub async fn handle_reaction(
    ctx: &Context,
    command_ctx: &CommandContext,
    bot_user_id: u64,
    reaction: &Reaction,
) -> Result<()> {
    let Some(reactor) = reaction.user_id else {
        return Ok(());
    };
    let name = emoji_name(&reaction.emoji);
    // Skip the message fetch for reactions that can never toggle
    let toggles = name.as_deref().and_then(ToggleDirection::from_emoji_name).is_some();
    if reactor.0 == bot_user_id || !toggles {
        return Ok(());
    }

    let mut message = reaction
        .message(&ctx.http)
        .await
        .context("Failed to fetch reacted message")?;

    let facts = ReactionFacts {
        bot_user_id,
        reactor_id: reactor.0,
        message_author_id: message.author.id.0,
        emoji_name: name,
    };
    let Some(event) = toggle_event(&facts) else {
        return Ok(());
    };

    let source = source_message(&message);
    let view = RenderedView::from_message(
        &source.embeds,
        source.origin_user.map(|user| (user.id, user.tag)),
    );

    match apply_toggle(command_ctx.github.as_ref(), &view, &event).await? {
        ToggleOutcome::Updated(embed) => {
            message
                .edit(ctx, |edit| edit.set_embeds(vec![embed.to_create_embed()]))
                .await
                .context("Failed to update man page embed")?;
        }
        ToggleOutcome::Rejected(notice) => {
            reaction
                .channel_id
                .say(&ctx.http, rejection_notice(reactor.0, &notice))
                .await
                .context("Failed to send toggle rejection")?;
        }
        ToggleOutcome::Unchanged => {
            debug!("Reaction on message {} changed nothing", message.id);
            return Ok(());
        }
    }

    if reaction.guild_id.is_some() {
        if let Err(e) = reaction.delete(ctx).await {
            warn!("Failed to remove toggle reaction: {e}");
        }
    }
    Ok(())
}
