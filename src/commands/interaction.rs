//! Transport-independent interaction model
//!
//! The gateway converts serenity interactions into [`Interaction`] so the
//! router and handlers can be driven directly in tests.

use crate::core::Embed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    ChatInput,
    ContextMenu,
    Button,
    SelectMenu,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionUser {
    pub id: u64,
    pub tag: String,
    pub bot: bool,
    pub roles: Vec<u64>,
    pub nick: Option<String>,
}

impl InteractionUser {
    /// Guild nickname when set, else the account tag
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(ResolvedUser),
}

/// User picked in a user option, with the name to show for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub id: u64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

/// Message a context menu command was run on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMessage {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub content: String,
    pub author_name: String,
    pub author_bot: bool,
    /// Unix seconds
    pub timestamp: i64,
}

impl TargetMessage {
    pub fn link(&self) -> String {
        let guild = self
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "@me".to_string());
        format!(
            "https://discord.com/channels/{guild}/{}/{}",
            self.channel_id, self.id
        )
    }
}

/// Snapshot of the message carrying a clicked component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMessage {
    pub id: u64,
    pub embeds: Vec<Embed>,
    /// Command that produced the message
    pub origin_command: Option<String>,
    pub origin_user: Option<InteractionUser>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub user: InteractionUser,
    /// Command name, or custom id for components
    pub name: String,
    pub subcommand: Option<String>,
    pub options: Vec<CommandOption>,
    pub values: Vec<String>,
    pub target_message: Option<TargetMessage>,
    pub source_message: Option<SourceMessage>,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
}

impl Interaction {
    pub fn new(kind: InteractionKind, name: impl Into<String>, user: InteractionUser) -> Self {
        Self {
            kind,
            user,
            name: name.into(),
            subcommand: None,
            options: Vec::new(),
            values: Vec::new(),
            target_message: None,
            source_message: None,
            guild_id: None,
            channel_id: 0,
        }
    }

    pub fn with_option(mut self, name: &str, value: OptionValue) -> Self {
        self.options.push(CommandOption {
            name: name.to_string(),
            value,
        });
        self
    }

    fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        match self.option(name)? {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn integer_option(&self, name: &str) -> Option<i64> {
        match self.option(name)? {
            OptionValue::Integer(value) => Some(*value),
            OptionValue::Number(value) => Some(*value as i64),
            _ => None,
        }
    }

    pub fn boolean_option(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            OptionValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn user_option(&self, name: &str) -> Option<&ResolvedUser> {
        match self.option(name)? {
            OptionValue::User(user) => Some(user),
            _ => None,
        }
    }
}
