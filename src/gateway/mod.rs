//! # Gateway Adapter
//!
//! Glue between serenity events and the command system: interaction
//! conversion, the interaction responder, guild emojis, and reaction toggles.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod convert;
pub mod emoji_source;
pub mod reactions;
pub mod responder;

pub use emoji_source::GuildEmojiSource;
pub use reactions::handle_reaction;
pub use responder::{GatewayInteraction, SerenityResponder};

use log::{error, trace};
use serenity::model::application::interaction::Interaction as SerenityInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::{CommandContext, InteractionRouter, RouteOutcome};

/// Convert and route one gateway interaction
///
/// Autocomplete and modal interactions are not used and are dropped.
pub async fn dispatch_interaction(
    ctx: &Context,
    command_ctx: Arc<CommandContext>,
    router: &InteractionRouter,
    interaction: SerenityInteraction,
) -> Option<RouteOutcome> {
    let (converted, gateway) = match interaction {
        SerenityInteraction::ApplicationCommand(command) => {
            (convert::from_command(&command), GatewayInteraction::Command(command))
        }
        SerenityInteraction::MessageComponent(component) => (
            convert::from_component(&component),
            GatewayInteraction::Component(component),
        ),
        other => {
            trace!("Dropping unsupported interaction {}", other.id());
            return None;
        }
    };

    let name = converted.name.clone();
    let responder = Arc::new(SerenityResponder::new(Arc::clone(&ctx.http), gateway));
    match router.route(command_ctx, converted, responder).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!("Routing '{name}' failed: {e:?}");
            None
        }
    }
}
