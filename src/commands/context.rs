//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Source host and emoji cache join the shared context
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, EmojiCache};
use crate::github::SourceHost;

/// Shared context for all command handlers
///
/// Contains the services most handlers need:
/// - Config for repository and role settings
/// - SourceHost for GitHub lookups
/// - EmojiCache for guild emoji decorations
/// - Bot start time for uptime tracking
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub github: Arc<dyn SourceHost>,
    pub emojis: EmojiCache,
    pub start_time: Instant,
}

impl CommandContext {
    pub fn new(config: Arc<Config>, github: Arc<dyn SourceHost>, emojis: EmojiCache) -> Self {
        Self {
            config,
            github,
            emojis,
            start_time: Instant::now(),
        }
    }

    /// Guild emoji text, or `:name:` when the guild lacks it
    pub async fn emoji(&self, name: &str) -> String {
        self.emojis.display_or(name, &format!(":{name}:")).await
    }

    pub async fn sad_caret(&self) -> String {
        self.emojis.sad_caret().await
    }
}
