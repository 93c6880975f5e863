//! Handler invocation guard
//!
//! Runs each handler call in its own task so an error or panic stays
//! contained to the interaction that caused it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use log::{debug, error, warn};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use super::handler::CommandHandler;
use super::interaction::Interaction;
use super::responder::{Reply, Responder};
use crate::core::truncate_for_message;

/// Shown in place of an already visible reply when its handler fails
pub const REDACTED_FAILURE_NOTICE: &str = "Something went wrong while handling this command.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerMethod {
    Command,
    ContextMenu,
    SelectMenu,
    Button,
}

impl HandlerMethod {
    pub fn capability_name(self) -> &'static str {
        match self {
            HandlerMethod::Command => "command",
            HandlerMethod::ContextMenu => "context menu",
            HandlerMethod::SelectMenu => "select menu",
            HandlerMethod::Button => "button",
        }
    }

    /// Whether `handler` implements this method
    pub fn is_supported_by(self, handler: &dyn CommandHandler) -> bool {
        match self {
            HandlerMethod::Command => true,
            HandlerMethod::ContextMenu => handler.context_menu().is_some(),
            HandlerMethod::SelectMenu => handler.select_menu().is_some(),
            HandlerMethod::Button => handler.button().is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    Completed,
    Failed,
    Panicked,
}

async fn dispatch(
    handler: &dyn CommandHandler,
    method: HandlerMethod,
    ctx: Arc<CommandContext>,
    responder: &dyn Responder,
    interaction: &Interaction,
) -> Result<()> {
    let missing = || anyhow!("handler has no {} capability", method.capability_name());

    match method {
        HandlerMethod::Command => handler.handle(ctx, responder, interaction).await,
        HandlerMethod::ContextMenu => {
            let capability = handler.context_menu().ok_or_else(missing)?;
            capability.handle_context_menu(ctx, responder, interaction).await
        }
        HandlerMethod::SelectMenu => {
            let capability = handler.select_menu().ok_or_else(missing)?;
            capability.handle_select_menu(ctx, responder, interaction).await
        }
        HandlerMethod::Button => {
            let capability = handler.button().ok_or_else(missing)?;
            capability.handle_button(ctx, responder, interaction).await
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run one handler method isolated in a spawned task
///
/// Failures are logged with a request id and reported to the user once;
/// a failure to report is only logged.
pub async fn invoke(
    handler: Arc<dyn CommandHandler>,
    method: HandlerMethod,
    ctx: Arc<CommandContext>,
    interaction: Arc<Interaction>,
    responder: Arc<dyn Responder>,
) -> InvocationOutcome {
    let request_id = Uuid::new_v4();
    debug!(
        "[{request_id}] {} is executing {} ({})",
        interaction.user.tag,
        interaction.name,
        method.capability_name()
    );

    let task = tokio::spawn({
        let interaction = Arc::clone(&interaction);
        let responder = Arc::clone(&responder);
        async move {
            dispatch(
                handler.as_ref(),
                method,
                ctx,
                responder.as_ref(),
                interaction.as_ref(),
            )
            .await
        }
    });

    let (outcome, diagnostic) = match task.await {
        Ok(Ok(())) => {
            debug!("[{request_id}] {} completed", interaction.name);
            return InvocationOutcome::Completed;
        }
        Ok(Err(e)) => {
            error!(
                "[{request_id}] {} failed for {}: {e:?}",
                interaction.name, interaction.user.tag
            );
            (InvocationOutcome::Failed, format!("{e:#}"))
        }
        Err(join_error) if join_error.is_panic() => {
            let message = panic_message(join_error.into_panic().as_ref());
            error!(
                "[{request_id}] {} panicked for {}: {message}",
                interaction.name, interaction.user.tag
            );
            (InvocationOutcome::Panicked, format!("panic: {message}"))
        }
        Err(join_error) => {
            error!("[{request_id}] {} was cancelled: {join_error}", interaction.name);
            (InvocationOutcome::Failed, join_error.to_string())
        }
    };

    if let Err(e) = notify_failure(responder.as_ref(), &diagnostic).await {
        warn!("[{request_id}] Could not report failure to {}: {e}", interaction.user.tag);
    }

    outcome
}

async fn notify_failure(responder: &dyn Responder, diagnostic: &str) -> Result<()> {
    if responder.has_responded() {
        responder.edit_reply(Reply::text(REDACTED_FAILURE_NOTICE)).await
    } else {
        let content = truncate_for_message(&format!("Failed because of {diagnostic}"));
        responder.reply(Reply::text(content).ephemeral()).await
    }
}
