//! Command handler trait and command declarations
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Transport-independent handlers with optional context menu, select menu, and button capabilities
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::interaction::Interaction;
use super::responder::Responder;

/// Trait for command handlers
///
/// A handler owns one or more command names (its aliases) and may opt into
/// extra interaction types by returning `Some` from the capability accessors.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn declarations(&self) -> Vec<CommandDeclaration> {
///         vec![CommandDeclaration::chat_input("ping", "Check the bot is alive")]
///     }
///
///     async fn handle(
///         &self,
///         _ctx: Arc<CommandContext>,
///         responder: &dyn Responder,
///         _interaction: &Interaction,
///     ) -> Result<()> {
///         responder.reply(Reply::text("Pong!")).await
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Aliases this handler answers to, compared case-insensitively
    fn command_names(&self) -> &'static [&'static str];

    /// Commands to register with the platform
    fn declarations(&self) -> Vec<CommandDeclaration>;

    /// Handle a chat input command
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()>;

    fn context_menu(&self) -> Option<&dyn ContextMenuHandler> {
        None
    }

    fn select_menu(&self) -> Option<&dyn SelectMenuHandler> {
        None
    }

    fn button(&self) -> Option<&dyn ButtonHandler> {
        None
    }

    /// Custom ids of buttons this handler answers
    fn button_ids(&self) -> &'static [&'static str] {
        &[]
    }
}

#[async_trait]
pub trait ContextMenuHandler: Send + Sync {
    async fn handle_context_menu(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()>;
}

#[async_trait]
pub trait SelectMenuHandler: Send + Sync {
    async fn handle_select_menu(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()>;
}

#[async_trait]
pub trait ButtonHandler: Send + Sync {
    async fn handle_button(
        &self,
        ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    ChatInput,
    MessageContextMenu,
    UserContextMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    SubCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDeclaration {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
    /// (display name, value) pairs
    pub choices: Vec<(String, String)>,
    /// Nested options of a subcommand
    pub options: Vec<OptionDeclaration>,
}

impl OptionDeclaration {
    pub fn new(kind: OptionKind, name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(OptionKind::String, name, description)
    }

    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(OptionKind::Integer, name, description)
    }

    pub fn boolean(name: &str, description: &str) -> Self {
        Self::new(OptionKind::Boolean, name, description)
    }

    pub fn user(name: &str, description: &str) -> Self {
        Self::new(OptionKind::User, name, description)
    }

    pub fn subcommand(name: &str, description: &str) -> Self {
        Self::new(OptionKind::SubCommand, name, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choice(mut self, name: &str, value: &str) -> Self {
        self.choices.push((name.to_string(), value.to_string()));
        self
    }

    pub fn option(mut self, option: OptionDeclaration) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDeclaration {
    pub name: String,
    pub description: String,
    pub kind: DeclarationKind,
    pub options: Vec<OptionDeclaration>,
}

impl CommandDeclaration {
    pub fn chat_input(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: DeclarationKind::ChatInput,
            options: Vec::new(),
        }
    }

    /// Context menu entries carry no description
    pub fn message_context_menu(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            kind: DeclarationKind::MessageContextMenu,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionDeclaration) -> Self {
        self.options.push(option);
        self
    }

    pub fn is_chat_input(&self) -> bool {
        self.kind == DeclarationKind::ChatInput
    }
}
