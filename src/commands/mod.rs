//! # Command System
//!
//! Application command, context menu, and component handling for Discord
//! interactions.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Transport-independent interactions, router, and invocation guard
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 2.0.0: Slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod guard;
pub mod handler;
pub mod handlers;
pub mod interaction;
pub mod registry;
pub mod responder;
pub mod router;
pub mod slash;

#[cfg(test)]
pub mod testing;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use guard::{invoke, HandlerMethod, InvocationOutcome};
pub use handler::{
    ButtonHandler, CommandDeclaration, CommandHandler, ContextMenuHandler, SelectMenuHandler,
};
pub use interaction::{Interaction, InteractionKind, InteractionUser};
pub use registry::{CommandRegistry, RegistryError};
pub use responder::{Reply, Responder};
pub use router::{InteractionRouter, RouteError, RouteOutcome};

pub use slash::{register_global_commands, register_guild_commands};
