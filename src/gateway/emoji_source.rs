use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::GuildId;
use std::sync::Arc;

use crate::core::{EmojiSource, GuildEmoji};

/// Custom emojis of the home guild
pub struct GuildEmojiSource {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl GuildEmojiSource {
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild_id: GuildId(guild_id),
        }
    }
}

#[async_trait]
impl EmojiSource for GuildEmojiSource {
    async fn list_emojis(&self) -> Result<Vec<GuildEmoji>> {
        let emojis = self
            .guild_id
            .emojis(&self.http)
            .await
            .with_context(|| format!("Failed to list emojis of guild {}", self.guild_id))?;

        Ok(emojis
            .into_iter()
            .map(|emoji| GuildEmoji {
                id: emoji.id.0,
                name: emoji.name,
                animated: emoji.animated,
            })
            .collect())
    }
}
