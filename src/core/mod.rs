//! # Core Module
//!
//! Configuration, response chunking, embeds, and emoji lookups shared by every command.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Block chunker, embed model, emoji cache
//! - 1.1.0: Add response module with Discord message chunking utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod emoji;
pub mod response;

// Re-export commonly used items
pub use config::{Config, RepositoryRef};
pub use embeds::{github_color, Embed, EmbedAuthor, EmbedField};
pub use emoji::{EmojiCache, EmojiSource, GuildEmoji};
pub use response::{
    chunk_blocks, chunk_for_message, trim_title, truncate_chars, truncate_for_message,
    EMBED_FIELD_COUNT_LIMIT, EMBED_FIELD_LIMIT, EMBED_TOTAL_LIMIT, MESSAGE_LIMIT, TITLE_LIMIT,
};
