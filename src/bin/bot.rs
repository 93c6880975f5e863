use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Reaction;
use serenity::model::gateway::{Activity, Ready};
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use buggie::commands::handlers::create_all_handlers;
use buggie::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry,
    InteractionRouter,
};
use buggie::core::{Config, EmojiCache};
use buggie::gateway::{dispatch_interaction, handle_reaction, GuildEmojiSource};
use buggie::github::GithubClient;

const PRESENCE: &str = "Type /help to list commands.";

struct Handler {
    command_ctx: Arc<CommandContext>,
    router: Arc<InteractionRouter>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        self.router.set_bot_user_id(ready.user.id.0);
        ctx.set_activity(Activity::playing(PRESENCE)).await;

        let declarations = self.router.registry().declarations();
        let config = &self.command_ctx.config;
        let registered = if config.production {
            register_global_commands(&ctx, &declarations).await
        } else {
            register_guild_commands(&ctx, GuildId(config.guild_id), &declarations).await
        };
        if let Err(e) = registered {
            error!("Failed to register application commands: {e:?}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let outcome =
            dispatch_interaction(&ctx, Arc::clone(&self.command_ctx), &self.router, interaction)
                .await;
        debug!("Interaction outcome: {outcome:?}");
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(bot_user_id) = self.router.bot_user_id() else {
            return;
        };
        if let Err(e) = handle_reaction(&ctx, &self.command_ctx, bot_user_id, &reaction).await {
            warn!("Failed to handle reaction on message {}: {e:?}", reaction.message_id);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();

    let config = Arc::new(Config::from_env()?);
    log::set_max_level(config.log_level);

    info!("Starting Buggie...");
    info!(
        "Working against {} ({})",
        config.repository.full_name(),
        if config.production { "production" } else { "development" }
    );

    let github = Arc::new(GithubClient::new(
        config.github_token.as_deref(),
        config.repository.clone(),
    )?);
    let registry = CommandRegistry::new(create_all_handlers())?;
    info!("📋 {} command handlers registered", registry.len());
    let router = Arc::new(InteractionRouter::new(registry, config.ignore_bots));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    // Emoji lookups go through their own REST handle
    let http = Arc::new(serenity::http::Http::new(&config.discord_token));
    let emojis = EmojiCache::new(Arc::new(GuildEmojiSource::new(http, config.guild_id)));
    let command_ctx = Arc::new(CommandContext::new(Arc::clone(&config), github, emojis));

    let handler = Handler {
        command_ctx,
        router,
    };

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
