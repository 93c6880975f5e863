//! Response chunking and Discord message utilities
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Replace line splitting with atomic block chunking; oversized blocks pass through
//! - 1.0.0: Extracted from duplicate implementations in command handlers

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field value limit
pub const EMBED_FIELD_LIMIT: usize = 1024;
/// Discord limit on the combined text of one embed
pub const EMBED_TOTAL_LIMIT: usize = 6000;
/// Discord limit on fields per embed
pub const EMBED_FIELD_COUNT_LIMIT: usize = 25;
/// Discord title and select-menu label limit
pub const TITLE_LIMIT: usize = 100;

const BLOCK_SEPARATOR: char = '\n';

/// Pack blocks into the fewest messages that fit `limit` characters
///
/// Blocks are joined with a line break and never split. A block that is
/// longer than `limit` on its own is emitted unchanged as its own chunk;
/// trimming it is the producer's job. Chunk order follows block order.
pub fn chunk_blocks<S: AsRef<str>>(blocks: &[S], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for block in blocks {
        let block = block.as_ref();
        let block_len = char_len(block);

        current = match current.take() {
            Some((mut buffer, len)) if len + 1 + block_len <= limit => {
                buffer.push(BLOCK_SEPARATOR);
                buffer.push_str(block);
                Some((buffer, len + 1 + block_len))
            }
            Some((buffer, _)) => {
                chunks.push(buffer);
                Some((block.to_string(), block_len))
            }
            None => Some((block.to_string(), block_len)),
        };
    }

    if let Some((buffer, _)) = current {
        chunks.push(buffer);
    }

    chunks
}

/// Chunk blocks for plain message content (2000 character limit)
pub fn chunk_for_message<S: AsRef<str>>(blocks: &[S]) -> Vec<String> {
    chunk_blocks(blocks, MESSAGE_LIMIT)
}

/// Truncate to at most `max_chars` characters, ending with "..." when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_chars(text, MESSAGE_LIMIT)
}

/// Trim a title or label to Discord's 100 character limit
pub fn trim_title(text: &str) -> String {
    if char_len(text) >= TITLE_LIMIT {
        let mut trimmed: String = text.chars().take(TITLE_LIMIT - 3).collect();
        trimmed.push_str("...");
        trimmed
    } else {
        text.to_string()
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
