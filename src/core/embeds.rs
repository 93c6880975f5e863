//! Embed model and serenity embed builders
//!
//! Handlers describe embeds with the plain [`Embed`] value so renders can be
//! compared and serialized; the gateway converts them with
//! [`Embed::to_create_embed`] right before sending.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.5.0
//!
//! ## Changelog
//! - 2.0.0: Transport-independent embed model with serenity conversion
//! - 1.0.0: Extracted from duplicate implementations across handlers

use serde::{Deserialize, Serialize};
use serenity::builder::CreateEmbed;

use super::response::char_len;

/// Accent colors matching GitHub's issue and pull request states
pub mod github_color {
    pub const OPEN: u32 = 0x57AB5A;
    pub const CLOSED: u32 = 0xE5534B;
    pub const MERGED: u32 = 0x6E40C9;
    pub const DRAFT: u32 = 0x768390;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub color: Option<u32>,
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Look up a field value by its name
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Characters Discord counts against the embed total
    pub fn char_count(&self) -> usize {
        let text = |value: &Option<String>| value.as_deref().map_or(0, char_len);
        text(&self.title)
            + text(&self.description)
            + text(&self.footer)
            + self.author.as_ref().map_or(0, |author| char_len(&author.name))
            + self
                .fields
                .iter()
                .map(|field| char_len(&field.name) + char_len(&field.value))
                .sum::<usize>()
    }

    /// Build the serenity embed for sending
    pub fn to_create_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        if let Some(title) = &self.title {
            embed.title(title);
        }
        if let Some(description) = &self.description {
            embed.description(description);
        }
        if let Some(url) = &self.url {
            embed.url(url);
        }
        if let Some(color) = self.color {
            embed.color(color);
        }
        if let Some(author) = &self.author {
            embed.author(|a| {
                a.name(&author.name);
                if let Some(icon_url) = &author.icon_url {
                    a.icon_url(icon_url);
                }
                if let Some(url) = &author.url {
                    a.url(url);
                }
                a
            });
        }
        for field in &self.fields {
            embed.field(&field.name, &field.value, field.inline);
        }
        if let Some(footer) = &self.footer {
            embed.footer(|f| f.text(footer));
        }
        embed
    }

    /// Snapshot a received serenity embed
    pub fn from_serenity(embed: &serenity::model::channel::Embed) -> Self {
        Self {
            title: embed.title.clone(),
            description: embed.description.clone(),
            url: embed.url.clone(),
            color: embed.colour.map(|c| c.0),
            author: embed.author.as_ref().map(|author| EmbedAuthor {
                name: author.name.clone(),
                icon_url: author.icon_url.clone(),
                url: author.url.clone(),
            }),
            fields: embed
                .fields
                .iter()
                .map(|field| EmbedField {
                    name: field.name.clone(),
                    value: field.value.clone(),
                    inline: field.inline,
                })
                .collect(),
            footer: embed.footer.as_ref().map(|footer| footer.text.clone()),
        }
    }
}
