//! Environment-backed bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add `from_lookup` so parsing can be exercised without the process environment
//! - 1.0.0: Initial release with Discord, GitHub, and role settings

use anyhow::{anyhow, Result};
use log::{warn, LevelFilter};
use std::str::FromStr;

/// Guild used for emoji lookups and development command registration when none is configured
pub const DEFAULT_GUILD_ID: u64 = 830522505605283862;

const DEFAULT_REPOSITORY: &str = "SerenityOS/serenity";
const DEFAULT_EXCLUDED_REPOSITORIES: &[&str] = &[
    "serenity-fuzz-corpora",
    "user-map",
    "setup-jakt",
    "artwork",
    "manpages-website",
];

/// `owner/name` pair of the repository the bot works against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(anyhow!("Repository must be in owner/name form, got '{s}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub github_token: Option<String>,
    pub guild_id: u64,
    pub production: bool,
    pub log_level: LevelFilter,
    pub quote_role_id: Option<u64>,
    pub privileged_role_ids: Vec<u64>,
    pub ignore_bots: bool,
    pub repository: RepositoryRef,
    pub excluded_repositories: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first so `.env` values are visible.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token =
            get("DISCORD_TOKEN").ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let github_token = get("GITHUB_TOKEN");
        if github_token.is_none() {
            warn!("No GITHUB_TOKEN provided, the GitHub rate limit will be greatly reduced!");
        }

        let guild_id = match get("GUILD_ID") {
            Some(id) => id
                .trim()
                .parse()
                .map_err(|e| anyhow!("GUILD_ID is not a valid id: {e}"))?,
            None => {
                warn!("No GUILD_ID provided, using {DEFAULT_GUILD_ID}");
                DEFAULT_GUILD_ID
            }
        };

        let production = get("BOT_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let log_level = match get("LOG_LEVEL") {
            Some(level) => level
                .trim()
                .parse()
                .map_err(|_| anyhow!("LOG_LEVEL '{level}' is not a valid log level"))?,
            None => LevelFilter::Info,
        };

        let quote_role_id = get("QUOTE_ROLE_ID")
            .map(|id| {
                id.trim()
                    .parse()
                    .map_err(|e| anyhow!("QUOTE_ROLE_ID is not a valid id: {e}"))
            })
            .transpose()?;

        let privileged_role_ids = parse_id_list(get("PRIVILEGED_ROLE_IDS").as_deref())?;

        let ignore_bots = match get("IGNORE_BOTS") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| anyhow!("IGNORE_BOTS must be true or false, got '{value}'"))?,
            None => true,
        };

        let repository = get("GITHUB_REPOSITORY")
            .as_deref()
            .unwrap_or(DEFAULT_REPOSITORY)
            .parse()?;

        let excluded_repositories = match get("EXCLUDED_REPOSITORIES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_EXCLUDED_REPOSITORIES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        };

        Ok(Self {
            discord_token,
            github_token,
            guild_id,
            production,
            log_level,
            quote_role_id,
            privileged_role_ids,
            ignore_bots,
            repository,
            excluded_repositories,
        })
    }

    /// Whether any of the given roles may change privileged settings
    pub fn is_privileged(&self, roles: &[u64]) -> bool {
        roles.iter().any(|role| self.privileged_role_ids.contains(role))
    }
}

fn parse_id_list(raw: Option<&str>) -> Result<Vec<u64>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .map_err(|e| anyhow!("'{id}' is not a valid role id: {e}"))
        })
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
