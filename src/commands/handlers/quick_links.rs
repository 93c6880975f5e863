//! Documentation shortcuts
//!
//! Handles: faq, build, wsl, install, bot-src

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandDeclaration, CommandHandler};
use crate::commands::interaction::Interaction;
use crate::commands::responder::{Reply, Responder};

const DOCUMENTATION: &str = "https://github.com/SerenityOS/serenity/blob/master/Documentation";

struct QuickLink {
    name: &'static str,
    title: &'static str,
    /// Path under the documentation directory, or a full URL
    target: &'static str,
    description: &'static str,
}

const LINKS: &[QuickLink] = &[
    QuickLink {
        name: "faq",
        title: "FAQ",
        target: "FAQ.md",
        description: "Get a link to the SerenityOS FAQ",
    },
    QuickLink {
        name: "build",
        title: "How To Build",
        target: "BuildInstructions.md",
        description: "Get a link to the build docs",
    },
    QuickLink {
        name: "wsl",
        title: "WSL Specific Notes",
        target: "NotesOnWSL.md",
        description: "Get a link to the wsl specific notes",
    },
    QuickLink {
        name: "install",
        title: "Installing on real hardware",
        target: "INSTALL.md",
        description: "Get a link to the directions for installing SerenityOS on real hardware",
    },
    QuickLink {
        name: "bot-src",
        title: "Bot Source",
        target: "https://github.com/SerenityOS/discord-bot/tree/master/src/commands",
        description: "Get a link to the source code for bot commands",
    },
];

const NAMES: &[&str] = &["faq", "build", "wsl", "install", "bot-src"];

impl QuickLink {
    fn response(&self) -> String {
        if self.target.starts_with("https://") {
            format!("{}: {}", self.title, self.target)
        } else {
            format!("{}: {DOCUMENTATION}/{}", self.title, self.target)
        }
    }
}

pub fn link_response(name: &str) -> Option<String> {
    LINKS
        .iter()
        .find(|link| link.name == name)
        .map(QuickLink::response)
}

/// Handler for the documentation link commands
pub struct QuickLinksHandler;

#[async_trait]
impl CommandHandler for QuickLinksHandler {
    fn command_names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn declarations(&self) -> Vec<CommandDeclaration> {
        LINKS
            .iter()
            .map(|link| CommandDeclaration::chat_input(link.name, link.description))
            .collect()
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        responder: &dyn Responder,
        interaction: &Interaction,
    ) -> Result<()> {
        match link_response(&interaction.name.to_lowercase()) {
            Some(content) => responder.reply(Reply::text(content)).await,
            None => Ok(()),
        }
    }
}
