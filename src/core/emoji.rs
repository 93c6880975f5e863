//! Guild emoji lookups with a shared read-through cache
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Cache the whole guild listing and remember absent names
//! - 1.0.0: Initial implementation
//!
//! Concurrent tasks may populate the same name at once; the last write wins
//! and every write carries the same value, so no coordination is needed.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A custom guild emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildEmoji {
    pub id: u64,
    pub name: String,
    pub animated: bool,
}

impl fmt::Display for GuildEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.animated {
            write!(f, "<a:{}:{}>", self.name, self.id)
        } else {
            write!(f, "<:{}:{}>", self.name, self.id)
        }
    }
}

/// Where emojis come from (the home guild's emoji list in production)
#[async_trait]
pub trait EmojiSource: Send + Sync {
    async fn list_emojis(&self) -> Result<Vec<GuildEmoji>>;
}

#[derive(Clone)]
pub struct EmojiCache {
    source: Arc<dyn EmojiSource>,
    cache: Arc<DashMap<String, GuildEmoji>>,
    /// Names the guild did not have at the last listing
    missing: Arc<DashSet<String>>,
}

impl EmojiCache {
    pub fn new(source: Arc<dyn EmojiSource>) -> Self {
        Self {
            source,
            cache: Arc::new(DashMap::new()),
            missing: Arc::new(DashSet::new()),
        }
    }

    /// Find an emoji by name, consulting the guild only on a cache miss
    ///
    /// A listing caches every emoji it returns and remembers the requested
    /// name when absent. Lookup failures are logged and reported as "no such
    /// emoji" so a missing decoration never fails the command using it.
    pub async fn get(&self, name: &str) -> Option<GuildEmoji> {
        if let Some(cached) = self.cache.get(name) {
            return Some(cached.clone());
        }
        if self.missing.contains(name) {
            return None;
        }

        let emojis = match self.source.list_emojis().await {
            Ok(emojis) => emojis,
            Err(e) => {
                warn!("Failed to list guild emojis while looking up '{name}': {e}");
                return None;
            }
        };

        debug!("Caching {} guild emojis", emojis.len());
        let mut found = None;
        for emoji in emojis {
            if emoji.name == name {
                found = Some(emoji.clone());
            }
            self.cache.insert(emoji.name.clone(), emoji);
        }
        if found.is_none() {
            self.missing.insert(name.to_string());
        }
        found
    }

    /// Emoji as message text, or `fallback` when the guild lacks it
    pub async fn display_or(&self, name: &str, fallback: &str) -> String {
        self.get(name)
            .await
            .map(|emoji| emoji.to_string())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub async fn sad_caret(&self) -> String {
        self.display_or("sadcaret", ":^(").await
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        emojis: Vec<GuildEmoji>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmojiSource for CountingSource {
        async fn list_emojis(&self) -> Result<Vec<GuildEmoji>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.emojis.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl EmojiSource for FailingSource {
        async fn list_emojis(&self) -> Result<Vec<GuildEmoji>> {
            Err(anyhow::anyhow!("guild unavailable"))
        }
    }

    fn emoji(id: u64, name: &str) -> GuildEmoji {
        GuildEmoji {
            id,
            name: name.to_string(),
            animated: false,
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(emoji(1, "yak").to_string(), "<:yak:1>");
        let animated = GuildEmoji {
            animated: true,
            ..emoji(2, "yakslice")
        };
        assert_eq!(animated.to_string(), "<a:yakslice:2>");
    }

    #[tokio::test]
    async fn test_hit_skips_source() {
        let source = Arc::new(CountingSource {
            emojis: vec![emoji(1, "sadcaret")],
            calls: AtomicUsize::new(0),
        });
        let cache = EmojiCache::new(source.clone());

        assert_eq!(cache.get("sadcaret").await, Some(emoji(1, "sadcaret")));
        assert_eq!(cache.get("sadcaret").await, Some(emoji(1, "sadcaret")));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_one_listing_serves_other_names() {
        let source = Arc::new(CountingSource {
            emojis: vec![emoji(1, "maximize"), emoji(2, "minimize"), emoji(3, "pr_open")],
            calls: AtomicUsize::new(0),
        });
        let cache = EmojiCache::new(source.clone());

        assert_eq!(cache.get("maximize").await, Some(emoji(1, "maximize")));
        assert_eq!(cache.get("minimize").await, Some(emoji(2, "minimize")));
        assert_eq!(cache.get("pr_open").await, Some(emoji(3, "pr_open")));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_absent_names_are_remembered() {
        let source = Arc::new(CountingSource {
            emojis: vec![emoji(1, "sadcaret")],
            calls: AtomicUsize::new(0),
        });
        let cache = EmojiCache::new(source.clone());

        for _ in 0..5 {
            assert!(cache.get("catdog").await.is_none());
            assert!(cache.get("merged_pull").await.is_none());
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get("sadcaret").await, Some(emoji(1, "sadcaret")));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_population_is_harmless() {
        let source = Arc::new(CountingSource {
            emojis: vec![emoji(9, "maximize")],
            calls: AtomicUsize::new(0),
        });
        let cache = EmojiCache::new(source);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get("maximize").await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(emoji(9, "maximize")));
        }
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back() {
        let cache = EmojiCache::new(Arc::new(FailingSource));
        assert!(cache.get("sadcaret").await.is_none());
        assert_eq!(cache.sad_caret().await, ":^(");
    }
}
