//! # Collapsible View
//!
//! Expand/collapse state for man page embeds. The rendered message is the
//! only state: its embed URL locates the page and its originating command
//! records who may toggle it. Every toggle re-fetches and re-renders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Unify button and reaction toggles; owner check for reactions
//! - 1.0.0: Initial implementation

pub mod sections;

pub use sections::{render_man_embed, ManSections, Section, COLLAPSED_FOOTER};

use anyhow::Result;
use log::debug;

use crate::core::Embed;
use crate::github::SourceHost;

pub const MAXIMIZE_BUTTON_ID: &str = "/man:maximize";
pub const MINIMIZE_BUTTON_ID: &str = "/man:minimize";
pub const MAXIMIZE_EMOJI: &str = "maximize";
pub const MINIMIZE_EMOJI: &str = "minimize";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Collapsed,
    Expanded,
}

impl ViewMode {
    /// Per-section character cap
    pub fn section_cap(self) -> usize {
        match self {
            ViewMode::Collapsed => 512,
            ViewMode::Expanded => 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDirection {
    Expand,
    Collapse,
}

impl ToggleDirection {
    pub fn from_button_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            MAXIMIZE_BUTTON_ID => Some(Self::Expand),
            MINIMIZE_BUTTON_ID => Some(Self::Collapse),
            _ => None,
        }
    }

    pub fn from_emoji_name(name: &str) -> Option<Self> {
        match name {
            MAXIMIZE_EMOJI => Some(Self::Expand),
            MINIMIZE_EMOJI => Some(Self::Collapse),
            _ => None,
        }
    }

    pub fn target_mode(self) -> ViewMode {
        match self {
            Self::Expand => ViewMode::Expanded,
            Self::Collapse => ViewMode::Collapsed,
        }
    }
}

/// A button press or reaction asking to change a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEvent {
    pub direction: ToggleDirection,
    pub requester_id: u64,
}

/// What a previously sent view message tells us
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub owner_id: Option<u64>,
    pub owner_tag: Option<String>,
    /// Embed URL of the single embed on the message
    pub locator_url: Option<String>,
}

impl RenderedView {
    /// Read the view from a message's embeds and originating command user
    ///
    /// Only messages with exactly one embed are views.
    pub fn from_message(embeds: &[Embed], owner: Option<(u64, String)>) -> Self {
        let locator_url = match embeds {
            [embed] => embed.url.clone(),
            _ => None,
        };
        let (owner_id, owner_tag) = match owner {
            Some((id, tag)) => (Some(id), Some(tag)),
            None => (None, None),
        };

        Self {
            owner_id,
            owner_tag,
            locator_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleDecision {
    Rerender { mode: ViewMode, locator_url: String },
    Rejected { notice: String },
    /// Not a view this machine manages
    Ignored,
}

/// Decide how a toggle event affects a rendered view
///
/// Only the original requester may toggle; a view with no recorded
/// requester cannot be toggled by anyone.
pub fn decide(view: &RenderedView, event: &ToggleEvent) -> ToggleDecision {
    let Some(locator_url) = &view.locator_url else {
        return ToggleDecision::Ignored;
    };

    if view.owner_id != Some(event.requester_id) {
        return ToggleDecision::Rejected {
            notice: format!(
                "Only {} can update this embed",
                view.owner_tag.as_deref().unwrap_or("the original requester")
            ),
        };
    }

    ToggleDecision::Rerender {
        mode: event.direction.target_mode(),
        locator_url: locator_url.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Updated(Embed),
    Rejected(String),
    Unchanged,
}

/// Run a toggle end to end: decide, re-fetch, and re-render
pub async fn apply_toggle(
    host: &dyn SourceHost,
    view: &RenderedView,
    event: &ToggleEvent,
) -> Result<ToggleOutcome> {
    match decide(view, event) {
        ToggleDecision::Rerender { mode, locator_url } => {
            match host.fetch_manpage_by_url(&locator_url).await? {
                Some(page) => Ok(ToggleOutcome::Updated(render_man_embed(&page, mode))),
                None => {
                    debug!("No man page behind {locator_url}, leaving view as is");
                    Ok(ToggleOutcome::Unchanged)
                }
            }
        }
        ToggleDecision::Rejected { notice } => Ok(ToggleOutcome::Rejected(notice)),
        ToggleDecision::Ignored => Ok(ToggleOutcome::Unchanged),
    }
}
