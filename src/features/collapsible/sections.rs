//! Man page section splitting and embed rendering
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Keep expanded embeds within Discord's total size and field count
//! - 1.1.0: Keep the final section; reserve room for the clip marker
//! - 1.0.0: Initial implementation

use super::ViewMode;
use crate::core::response::char_len;
use crate::core::{Embed, EMBED_FIELD_COUNT_LIMIT, EMBED_TOTAL_LIMIT};
use crate::github::{ManPage, ManPageLocator};

const HEADING_PREFIX: &str = "## ";
const NAME_SECTION: &str = "Name";
const COLLAPSED_SECTION: &str = "Description";
const CLIP_MARKER: &str = "\n...";
pub const COLLAPSED_FOOTER: &str = "React with maximize to expand sections";
const TRUNCATED_FOOTER_PREFIX: &str = "The following paragraphs have been truncated: ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub content: String,
    /// Lines were dropped to stay under the mode's cap
    pub clipped: bool,
}

impl Section {
    fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    fn push_line(&mut self, line: &str, cap: usize) {
        if self.clipped {
            return;
        }

        let used = self.content.chars().count();
        if used + line.chars().count() + 1 + CLIP_MARKER.len() > cap {
            self.content.push_str(CLIP_MARKER);
            self.clipped = true;
            return;
        }

        if line.starts_with("```") {
            self.content.push_str(&line.replace('*', ""));
        } else {
            self.content.push_str(line);
        }
        self.content.push('\n');
    }
}

/// Split man page markdown at `## ` headings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManSections {
    /// One-line summary from the "Name" section
    pub name: Option<String>,
    pub sections: Vec<Section>,
}

impl ManSections {
    pub fn parse(markdown: &str, mode: ViewMode) -> Self {
        let cap = mode.section_cap();
        let mut parsed = Self::default();
        let mut current = Section::default();

        for line in markdown.split('\n') {
            if let Some(title) = line.strip_prefix(HEADING_PREFIX) {
                parsed.finish(std::mem::replace(&mut current, Section::titled(title.trim())));
            } else {
                current.push_line(line, cap);
            }
        }
        parsed.finish(current);

        parsed
    }

    fn finish(&mut self, section: Section) {
        if section.content.is_empty() {
            return;
        }
        if section.title.as_deref() == Some(NAME_SECTION) {
            self.name = Some(section.content.replace(['\r', '\n'], ""));
        } else {
            self.sections.push(section);
        }
    }
}

fn truncated_footer(titles: &[&str]) -> Option<String> {
    if titles.is_empty() {
        return None;
    }
    Some(format!("{TRUNCATED_FOOTER_PREFIX}{}", titles.join(", ")))
}

/// Render the man page embed for a view mode
///
/// Carries no timestamp, so re-rendering the same page in the same mode
/// yields an equal embed. Fields stop once the next one would push the embed
/// past Discord's total or field count limits; sections left out that way
/// are named in the expanded footer along with clipped ones.
pub fn render_man_embed(page: &ManPage, mode: ViewMode) -> Embed {
    let parsed = ManSections::parse(&page.markdown, mode);
    let website = ManPageLocator::new(&page.section, &page.page).website_url();

    let mut embed = Embed::new()
        .title(format!("{}({})", page.page, page.section))
        .description(format!(
            "{}\n\n[View on GitHub]({}) - [View on man.serenityos.org]({website})",
            parsed.name.as_deref().unwrap_or("Name not found"),
            page.url
        ))
        .url(&website);

    let shown: Vec<(&str, &str, bool)> = parsed
        .sections
        .iter()
        .filter_map(|section| {
            let title = section.title.as_deref()?;
            if mode == ViewMode::Collapsed && title != COLLAPSED_SECTION {
                return None;
            }
            let value = section.content.trim();
            (!value.is_empty()).then_some((title, value, section.clipped))
        })
        .collect();

    // Room for a footer that names every shown section
    let footer_reserve = match mode {
        ViewMode::Collapsed => char_len(COLLAPSED_FOOTER),
        ViewMode::Expanded => {
            let titles: Vec<&str> = shown.iter().map(|(title, _, _)| *title).collect();
            truncated_footer(&titles).map_or(0, |footer| char_len(&footer))
        }
    };
    let mut used = embed.char_count() + footer_reserve;
    let mut truncated = Vec::new();
    let mut full = false;

    for (title, value, clipped) in shown {
        let size = char_len(title) + char_len(value);
        if full
            || embed.fields.len() == EMBED_FIELD_COUNT_LIMIT
            || used + size > EMBED_TOTAL_LIMIT
        {
            full = true;
            truncated.push(title);
            continue;
        }
        used += size;
        if clipped {
            truncated.push(title);
        }
        embed = embed.field(title, value, false);
    }

    match mode {
        ViewMode::Collapsed => embed.footer(COLLAPSED_FOOTER),
        ViewMode::Expanded => match truncated_footer(&truncated) {
            Some(footer) => embed.footer(footer),
            None => embed,
        },
    }
}
