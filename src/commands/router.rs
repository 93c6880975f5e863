//! Interaction router
//!
//! Classifies inbound interactions, resolves the owning handler, and hands
//! the call to the invocation guard.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Select menus resolve through the command that sent the menu
//! - 1.0.0: Initial implementation

use log::{debug, error, trace};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use super::context::CommandContext;
use super::guard::{invoke, HandlerMethod, InvocationOutcome};
use super::interaction::{Interaction, InteractionKind};
use super::registry::CommandRegistry;
use super::responder::{Reply, Responder};

pub const UNRECOGNIZED_COMMAND: &str = "I don't recognize that command.";

#[derive(Debug, Error)]
pub enum RouteError {
    /// A handler owns the name or button but lacks the capability to answer it
    #[error("handler for '{name}' does not implement the {capability} capability")]
    MissingCapability {
        name: String,
        capability: &'static str,
    },
    #[error("failed to answer '{name}'")]
    Reply {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Sent by the bot or a filtered account, or not a routable kind
    Ignored,
    Help,
    Unrecognized,
    /// Component with no owning handler
    Unhandled,
    Invoked(InvocationOutcome),
}

pub struct InteractionRouter {
    registry: CommandRegistry,
    bot_user_id: OnceLock<u64>,
    ignore_bots: bool,
}

impl InteractionRouter {
    pub fn new(registry: CommandRegistry, ignore_bots: bool) -> Self {
        Self {
            registry,
            bot_user_id: OnceLock::new(),
            ignore_bots,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Record our own user id once the gateway reports it
    pub fn set_bot_user_id(&self, id: u64) {
        if self.bot_user_id.set(id).is_err() {
            trace!("Bot user id already recorded");
        }
    }

    pub fn bot_user_id(&self) -> Option<u64> {
        self.bot_user_id.get().copied()
    }

    fn should_ignore(&self, interaction: &Interaction) -> bool {
        self.bot_user_id() == Some(interaction.user.id) || (self.ignore_bots && interaction.user.bot)
    }

    pub async fn route(
        &self,
        ctx: Arc<CommandContext>,
        interaction: Interaction,
        responder: Arc<dyn Responder>,
    ) -> Result<RouteOutcome, RouteError> {
        if self.should_ignore(&interaction) {
            trace!("Ignoring interaction from {}", interaction.user.tag);
            return Ok(RouteOutcome::Ignored);
        }

        let (handler, method) = match interaction.kind {
            InteractionKind::ChatInput | InteractionKind::ContextMenu => {
                if CommandRegistry::is_help(&interaction.name) {
                    let reply = Reply::text(self.registry.help_text()).ephemeral();
                    self.answer(&interaction, responder.as_ref(), reply).await?;
                    return Ok(RouteOutcome::Help);
                }

                let Some(handler) = self.registry.resolve(&interaction.name) else {
                    let reply = Reply::text(UNRECOGNIZED_COMMAND).ephemeral();
                    self.answer(&interaction, responder.as_ref(), reply).await?;
                    return Ok(RouteOutcome::Unrecognized);
                };

                let method = if interaction.kind == InteractionKind::ChatInput {
                    HandlerMethod::Command
                } else {
                    HandlerMethod::ContextMenu
                };
                (handler, method)
            }
            InteractionKind::Button => match self.registry.resolve_button(&interaction.name) {
                Some(handler) => (handler, HandlerMethod::Button),
                None => {
                    debug!("No handler owns button '{}'", interaction.name);
                    return Ok(RouteOutcome::Unhandled);
                }
            },
            InteractionKind::SelectMenu => {
                let origin = interaction
                    .source_message
                    .as_ref()
                    .and_then(|message| message.origin_command.as_deref());
                match origin.and_then(|name| self.registry.resolve(name)) {
                    Some(handler) => (handler, HandlerMethod::SelectMenu),
                    None => {
                        debug!(
                            "No handler owns select menu '{}' (sent by {origin:?})",
                            interaction.name
                        );
                        return Ok(RouteOutcome::Unhandled);
                    }
                }
            }
            InteractionKind::Other => return Ok(RouteOutcome::Ignored),
        };

        if !method.is_supported_by(handler.as_ref()) {
            let err = RouteError::MissingCapability {
                name: interaction.name.clone(),
                capability: method.capability_name(),
            };
            error!("{err}");
            return Err(err);
        }

        let outcome = invoke(handler, method, ctx, Arc::new(interaction), responder).await;
        Ok(RouteOutcome::Invoked(outcome))
    }

    async fn answer(
        &self,
        interaction: &Interaction,
        responder: &dyn Responder,
        reply: Reply,
    ) -> Result<(), RouteError> {
        responder
            .reply(reply)
            .await
            .map_err(|source| RouteError::Reply {
                name: interaction.name.clone(),
                source,
            })
    }
}
