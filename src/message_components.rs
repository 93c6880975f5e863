//! Message component model (buttons and select menus)
//!
//! Handlers return plain [`ActionRow`] values; the gateway turns them into
//! serenity builders with [`to_create_components`].

use serde::{Deserialize, Serialize};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::channel::ReactionType;
use serenity::model::id::EmojiId;

use crate::core::GuildEmoji;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub emoji: Option<GuildEmoji>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub emoji: Option<GuildEmoji>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMenu {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Button(Button),
    SelectMenu(SelectMenu),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(mut self, custom_id: &str, label: &str, emoji: Option<GuildEmoji>) -> Self {
        self.components.push(Component::Button(Button {
            custom_id: custom_id.to_string(),
            label: label.to_string(),
            emoji,
        }));
        self
    }

    pub fn select_menu(mut self, menu: SelectMenu) -> Self {
        self.components.push(Component::SelectMenu(menu));
        self
    }
}

fn reaction_type(emoji: &GuildEmoji) -> ReactionType {
    ReactionType::Custom {
        animated: emoji.animated,
        id: EmojiId(emoji.id),
        name: Some(emoji.name.clone()),
    }
}

/// Build serenity components from action rows
pub fn to_create_components(rows: &[ActionRow]) -> CreateComponents {
    let mut components = CreateComponents::default();

    for action_row in rows {
        components.create_action_row(|row| {
            for component in &action_row.components {
                match component {
                    Component::Button(button) => {
                        row.create_button(|btn| {
                            btn.custom_id(&button.custom_id)
                                .label(&button.label)
                                .style(ButtonStyle::Primary);
                            if let Some(emoji) = &button.emoji {
                                btn.emoji(reaction_type(emoji));
                            }
                            btn
                        });
                    }
                    Component::SelectMenu(menu) => {
                        row.create_select_menu(|select| {
                            select
                                .custom_id(&menu.custom_id)
                                .placeholder(&menu.placeholder)
                                .options(|options| {
                                    for option in &menu.options {
                                        options.create_option(|opt| {
                                            opt.label(&option.label).value(&option.value);
                                            if let Some(emoji) = &option.emoji {
                                                opt.emoji(reaction_type(emoji));
                                            }
                                            opt
                                        });
                                    }
                                    options
                                })
                        });
                    }
                }
            }
            row
        });
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_row_builder() {
        let row = ActionRow::new()
            .button("/man:maximize", "Maximize", None)
            .button("/man:minimize", "Minimize", None);

        assert_eq!(row.components.len(), 2);
        match &row.components[1] {
            Component::Button(button) => assert_eq!(button.custom_id, "/man:minimize"),
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn test_to_create_components_builds_rows() {
        let rows = vec![
            ActionRow::new().button(
                "/man:maximize",
                "Maximize",
                Some(GuildEmoji {
                    id: 1,
                    name: "maximize".to_string(),
                    animated: false,
                }),
            ),
            ActionRow::new().select_menu(SelectMenu {
                custom_id: "issues".to_string(),
                placeholder: "Issues".to_string(),
                options: vec![SelectOption {
                    label: "Kernel: Fix a thing".to_string(),
                    value: "42".to_string(),
                    emoji: None,
                }],
            }),
        ];

        let built = to_create_components(&rows);
        assert_eq!(built.0.len(), 2);
    }

    #[test]
    fn test_reaction_type_is_custom() {
        let emoji = GuildEmoji {
            id: 7,
            name: "minimize".to_string(),
            animated: true,
        };
        match reaction_type(&emoji) {
            ReactionType::Custom { animated, id, name } => {
                assert!(animated);
                assert_eq!(id, EmojiId(7));
                assert_eq!(name.as_deref(), Some("minimize"));
            }
            other => panic!("expected custom emoji, got {other:?}"),
        }
    }
}
