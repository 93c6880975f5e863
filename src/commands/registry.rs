//! Command handler registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Alias sets with case-insensitive resolution, button ids, help listing; built once and immutable
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::handler::{CommandDeclaration, CommandHandler};

/// Built-in command answered by the router itself
pub const HELP_COMMAND: &str = "help";
const HELP_DESCRIPTION: &str = "List all available commands";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command alias '{alias}' is claimed by more than one handler")]
    DuplicateAlias { alias: String },
    #[error("command alias '{alias}' is reserved")]
    ReservedAlias { alias: String },
    #[error("button id '{id}' is claimed by more than one handler")]
    DuplicateButton { id: String },
}

struct Entry {
    aliases: Vec<String>,
    handler: Arc<dyn CommandHandler>,
}

/// Immutable table from alias sets to handlers
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::new(create_all_handlers())?;
///
/// if let Some(handler) = registry.resolve("GitHub") {
///     // same handler as "issue" and "pull"
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    entries: Arc<Vec<Entry>>,
    help: Arc<str>,
}

impl CommandRegistry {
    /// Build the registry, rejecting alias and button id collisions
    pub fn new(handlers: Vec<Arc<dyn CommandHandler>>) -> Result<Self, RegistryError> {
        let mut seen_aliases: HashMap<String, usize> = HashMap::new();
        let mut seen_buttons: HashMap<&'static str, usize> = HashMap::new();
        let mut entries = Vec::with_capacity(handlers.len());

        for (index, handler) in handlers.into_iter().enumerate() {
            let aliases: Vec<String> = handler
                .command_names()
                .iter()
                .map(|name| name.to_lowercase())
                .collect();

            for alias in &aliases {
                if alias == HELP_COMMAND {
                    return Err(RegistryError::ReservedAlias {
                        alias: alias.clone(),
                    });
                }
                if let Some(owner) = seen_aliases.insert(alias.clone(), index) {
                    if owner != index {
                        return Err(RegistryError::DuplicateAlias {
                            alias: alias.clone(),
                        });
                    }
                }
            }

            for id in handler.button_ids() {
                if let Some(owner) = seen_buttons.insert(*id, index) {
                    if owner != index {
                        return Err(RegistryError::DuplicateButton { id: id.to_string() });
                    }
                }
            }

            entries.push(Entry { aliases, handler });
        }

        let help = build_help(&entries);

        Ok(Self {
            entries: Arc::new(entries),
            help: help.into(),
        })
    }

    /// Handler owning `name`, compared case-insensitively
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.aliases.iter().any(|alias| *alias == name))
            .map(|entry| Arc::clone(&entry.handler))
    }

    /// Handler listing `custom_id` among its button ids (exact match)
    pub fn resolve_button(&self, custom_id: &str) -> Option<Arc<dyn CommandHandler>> {
        self.entries
            .iter()
            .find(|entry| entry.handler.button_ids().contains(&custom_id))
            .map(|entry| Arc::clone(&entry.handler))
    }

    pub fn is_help(name: &str) -> bool {
        name.eq_ignore_ascii_case(HELP_COMMAND)
    }

    /// "Available commands:" followed by every chat input command
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Every declaration plus the built-in help command
    pub fn declarations(&self) -> Vec<CommandDeclaration> {
        let mut declarations: Vec<CommandDeclaration> = self
            .entries
            .iter()
            .flat_map(|entry| entry.handler.declarations())
            .collect();
        declarations.push(CommandDeclaration::chat_input(HELP_COMMAND, HELP_DESCRIPTION));
        declarations
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All aliases in registration order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.aliases.iter().map(String::as_str))
    }
}

fn build_help(entries: &[Entry]) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for entry in entries {
        for declaration in entry.handler.declarations() {
            if declaration.is_chat_input() {
                lines.push(format!(
                    "**{}** - {}",
                    declaration.name, declaration.description
                ));
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use crate::commands::interaction::Interaction;
    use crate::commands::responder::Responder;
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        names: &'static [&'static str],
        buttons: &'static [&'static str],
    }

    impl MockHandler {
        fn named(names: &'static [&'static str]) -> Arc<dyn CommandHandler> {
            Arc::new(Self { names, buttons: &[] })
        }
    }

    #[async_trait]
    impl CommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        fn declarations(&self) -> Vec<CommandDeclaration> {
            let mut declarations: Vec<_> = self
                .names
                .iter()
                .map(|name| CommandDeclaration::chat_input(name, &format!("Run {name}")))
                .collect();
            declarations.push(CommandDeclaration::message_context_menu("Menu Entry"));
            declarations
        }

        fn button_ids(&self) -> &'static [&'static str] {
            self.buttons
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _responder: &dyn Responder,
            _interaction: &Interaction,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn same(a: &Arc<dyn CommandHandler>, b: &Arc<dyn CommandHandler>) -> bool {
        a.command_names() == b.command_names()
    }

    #[test]
    fn test_aliases_resolve_case_insensitively() {
        let github = MockHandler::named(&["github", "issue", "pull"]);
        let registry =
            CommandRegistry::new(vec![MockHandler::named(&["man"]), github.clone()]).unwrap();

        for name in ["github", "issue", "pull", "GitHub", "PULL"] {
            let resolved = registry.resolve(name).unwrap();
            assert!(same(&resolved, &github), "{name} did not resolve");
        }
        assert!(registry.resolve("GH").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let result = CommandRegistry::new(vec![
            MockHandler::named(&["github", "issue"]),
            MockHandler::named(&["Issue"]),
        ]);
        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateAlias {
                alias: "issue".to_string()
            })
        );
    }

    #[test]
    fn test_help_alias_reserved() {
        let result = CommandRegistry::new(vec![MockHandler::named(&["Help"])]);
        assert!(matches!(result, Err(RegistryError::ReservedAlias { .. })));
        assert!(CommandRegistry::is_help("HELP"));
        assert!(!CommandRegistry::is_help("helper"));
    }

    #[test]
    fn test_duplicate_button_rejected() {
        let result = CommandRegistry::new(vec![
            Arc::new(MockHandler {
                names: &["man"],
                buttons: &["/man:maximize"],
            }),
            Arc::new(MockHandler {
                names: &["other"],
                buttons: &["/man:maximize"],
            }),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateButton { .. })));
    }

    #[test]
    fn test_resolve_button_is_exact() {
        let registry = CommandRegistry::new(vec![Arc::new(MockHandler {
            names: &["man"],
            buttons: &["/man:maximize", "/man:minimize"],
        })])
        .unwrap();

        assert!(registry.resolve_button("/man:maximize").is_some());
        assert!(registry.resolve_button("/MAN:maximize").is_none());
        assert!(registry.resolve_button("/man").is_none());
    }

    #[test]
    fn test_help_lists_chat_input_only() {
        let registry = CommandRegistry::new(vec![
            MockHandler::named(&["man"]),
            MockHandler::named(&["plan"]),
        ])
        .unwrap();

        assert_eq!(
            registry.help_text(),
            "Available commands:\n**man** - Run man\n**plan** - Run plan"
        );
    }

    #[test]
    fn test_declarations_include_help() {
        let registry = CommandRegistry::new(vec![MockHandler::named(&["man"])]).unwrap();
        let declarations = registry.declarations();

        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations.last().map(|d| d.name.as_str()), Some("help"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.command_names().collect::<Vec<_>>(), vec!["man"]);
    }
}
