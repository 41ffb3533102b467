use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use ember::commands::{register_global_commands, register_guild_commands, CommandHandler};
use ember::core::Config;
use ember::features::get_bot_version;
use ember::features::reminders::{DiscordTransport, PromptTransport, ReminderScheduler, ReminderService};
use ember::message_components::MessageComponentHandler;

struct Handler {
    command_handler: Arc<CommandHandler>,
    component_handler: Arc<MessageComponentHandler>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        let registration = match self.guild_id {
            Some(guild_id) => {
                info!("🔧 Registering slash commands in guild {guild_id}");
                register_guild_commands(&ctx, guild_id).await
            }
            None => {
                info!("🌐 Registering global slash commands");
                register_global_commands(&ctx).await
            }
        };

        if let Err(e) = registration {
            error!("Failed to register slash commands: {e:#}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {:#}",
                        command.data.name, e
                    );

                    let error_message =
                        "❌ Sorry, I encountered an error processing your command. Please try again.";

                    #[allow(clippy::redundant_pattern_matching)]
                    if let Err(_) = command
                        .edit_original_interaction_response(&ctx.http, |response| {
                            response.content(error_message)
                        })
                        .await
                    {
                        let _ = command
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content(error_message)
                                    })
                            })
                            .await;
                    }
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {:#}",
                        component.data.custom_id, e
                    );

                    let error_message =
                        "❌ Sorry, I encountered an error processing your answer. Please try again.";

                    let _ = component
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message).ephemeral(true)
                                })
                        })
                        .await;
                }
            }
            other => {
                debug!("Ignoring interaction of kind {:?}", other.kind());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Ember check-in bot v{}...", get_bot_version());
    info!(
        "👥 {} allowed user(s), quiet hours {} ({}), reminders every {}h",
        config.allowed_users.len(),
        config.schedule.quiet_window.describe(),
        config.schedule.timezone,
        config.schedule.interval_hours()
    );

    let reminders = Arc::new(ReminderService::new(config.schedule.clone()));
    let command_handler = CommandHandler::new(Arc::clone(&reminders), config.allowed_users.clone());

    let intents = GatewayIntents::GUILDS | GatewayIntents::DIRECT_MESSAGES;

    // Shared by the scheduler and the component handler for prompt delivery
    let http = Arc::new(serenity::http::Http::new(&config.discord_token));
    let transport: Arc<dyn PromptTransport> = Arc::new(DiscordTransport::new(Arc::clone(&http)));

    let component_handler = MessageComponentHandler::new(
        Arc::clone(&reminders),
        config.allowed_users.clone(),
        Arc::clone(&transport),
    );

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        component_handler: Arc::new(component_handler),
        guild_id: config.discord_guild_id.map(GuildId),
    };

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    let scheduler = ReminderScheduler::new(reminders, config.allowed_users.clone(), transport);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
