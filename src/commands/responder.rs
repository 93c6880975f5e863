//! Reply channel for one interaction

use anyhow::Result;
use async_trait::async_trait;

use crate::core::Embed;
use crate::message_components::ActionRow;

/// Message payload for replies, edits, and follow-ups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    /// `None` leaves existing components untouched on edits
    pub components: Option<Vec<ActionRow>>,
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn with_components(mut self, rows: Vec<ActionRow>) -> Self {
        self.components = Some(rows);
        self
    }
}

/// Operations a handler may perform on its interaction
///
/// `reply` and `defer` are the initial response and may happen once;
/// `edit_reply` and `follow_up` need one of them first.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, reply: Reply) -> Result<()>;

    async fn defer(&self, ephemeral: bool) -> Result<()>;

    async fn edit_reply(&self, reply: Reply) -> Result<()>;

    async fn follow_up(&self, reply: Reply) -> Result<()>;

    /// Replace the message carrying the clicked component
    async fn update_message(&self, reply: Reply) -> Result<()>;

    /// Whether an initial response (reply, defer, or update) was sent
    fn has_responded(&self) -> bool;
}
