//! [`Responder`] backed by the Discord interaction endpoints

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateInteractionResponseData};
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::commands::responder::{Reply, Responder};
use crate::message_components::to_create_components;

pub enum GatewayInteraction {
    Command(ApplicationCommandInteraction),
    Component(MessageComponentInteraction),
}

pub struct SerenityResponder {
    http: Arc<Http>,
    interaction: GatewayInteraction,
    responded: AtomicBool,
}

fn embeds(reply: &Reply) -> Vec<CreateEmbed> {
    reply.embeds.iter().map(|embed| embed.to_create_embed()).collect()
}

fn fill_data<'a, 'b>(
    data: &'b mut CreateInteractionResponseData<'a>,
    reply: &Reply,
) -> &'b mut CreateInteractionResponseData<'a> {
    if let Some(content) = &reply.content {
        data.content(content);
    }
    if !reply.embeds.is_empty() {
        data.set_embeds(embeds(reply));
    }
    if let Some(rows) = &reply.components {
        data.components(|c| {
            *c = to_create_components(rows);
            c
        });
    }
    data.ephemeral(reply.ephemeral)
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, interaction: GatewayInteraction) -> Self {
        Self {
            http,
            interaction,
            responded: AtomicBool::new(false),
        }
    }

    async fn respond(&self, kind: InteractionResponseType, reply: &Reply) -> Result<()> {
        match &self.interaction {
            GatewayInteraction::Command(command) => {
                command
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(kind)
                            .interaction_response_data(|data| fill_data(data, reply))
                    })
                    .await?
            }
            GatewayInteraction::Component(component) => {
                component
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(kind)
                            .interaction_response_data(|data| fill_data(data, reply))
                    })
                    .await?
            }
        }
        self.responded.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Responder for SerenityResponder {
    async fn reply(&self, reply: Reply) -> Result<()> {
        self.respond(InteractionResponseType::ChannelMessageWithSource, &reply)
            .await
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        let reply = Reply::default().with_ephemeral(ephemeral);
        self.respond(InteractionResponseType::DeferredChannelMessageWithSource, &reply)
            .await
    }

    async fn edit_reply(&self, reply: Reply) -> Result<()> {
        let embeds = embeds(&reply);
        let components = reply.components.as_deref().map(to_create_components);

        macro_rules! edit {
            ($interaction:expr) => {
                $interaction
                    .edit_original_interaction_response(&self.http, |edit| {
                        if let Some(content) = &reply.content {
                            edit.content(content);
                        }
                        if !embeds.is_empty() {
                            edit.set_embeds(embeds);
                        }
                        if let Some(components) = components {
                            edit.components(|c| {
                                *c = components;
                                c
                            });
                        }
                        edit
                    })
                    .await?
            };
        }

        match &self.interaction {
            GatewayInteraction::Command(command) => edit!(command),
            GatewayInteraction::Component(component) => edit!(component),
        };
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        let embeds = embeds(&reply);
        let components = reply.components.as_deref().map(to_create_components);

        macro_rules! follow_up {
            ($interaction:expr) => {
                $interaction
                    .create_followup_message(&self.http, |message| {
                        if let Some(content) = &reply.content {
                            message.content(content);
                        }
                        if !embeds.is_empty() {
                            message.add_embeds(embeds);
                        }
                        if let Some(components) = components {
                            message.components(|c| {
                                *c = components;
                                c
                            });
                        }
                        message.ephemeral(reply.ephemeral)
                    })
                    .await?
            };
        }

        match &self.interaction {
            GatewayInteraction::Command(command) => follow_up!(command),
            GatewayInteraction::Component(component) => follow_up!(component),
        };
        Ok(())
    }

    async fn update_message(&self, reply: Reply) -> Result<()> {
        match &self.interaction {
            GatewayInteraction::Component(_) => {
                self.respond(InteractionResponseType::UpdateMessage, &reply)
                    .await
            }
            GatewayInteraction::Command(command) => Err(anyhow!(
                "/{} is not a component interaction and has no message to update",
                command.data.name
            )),
        }
    }

    fn has_responded(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }
}
