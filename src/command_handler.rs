//! Slash command dispatcher
//!
//! - **Version**: 4.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 4.0.0: Registry-only dispatch with allow-list enforcement
//! - 3.38.0: Modular handlers behind a registry
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::{respond_ephemeral, respond_with_content};
use crate::commands::{CommandContext, CommandRegistry, SlashCommandHandler};
use crate::features::access::{AccessList, ACCESS_DENIED_MESSAGE};
use crate::features::reminders::{ReminderService, UserId};

const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command. Use `/start` to see what I can do.";

/// Outcome of routing a command name for a caller
enum Route {
    Run(Arc<dyn SlashCommandHandler>),
    Denied,
    Unknown,
}

#[derive(Clone)]
pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
}

impl CommandHandler {
    pub fn new(reminders: Arc<ReminderService>, access: AccessList) -> Self {
        Self {
            registry: CommandRegistry::with_all_handlers(),
            context: Arc::new(CommandContext::new(reminders, access)),
        }
    }

    fn route(&self, name: &str, user_id: UserId) -> Route {
        match self.registry.get(name) {
            Some(handler) if !handler.requires_authorization() => Route::Run(handler),
            _ if !self.context.access.is_allowed(user_id) => Route::Denied,
            Some(handler) => Route::Run(handler),
            None => Route::Unknown,
        }
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.0;
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Channel: {} | Guild: {}",
            request_id, command.data.name, user_id, command.channel_id, guild_id
        );

        match self.route(&command.data.name, user_id) {
            Route::Unknown => {
                warn!("[{}] ❓ Unknown command: {}", request_id, command.data.name);
                respond_with_content(ctx, command, UNKNOWN_COMMAND_MESSAGE).await?;
            }
            Route::Denied => {
                warn!(
                    "[{}] 🚫 User {} is not allowed to use /{}",
                    request_id, user_id, command.data.name
                );
                respond_ephemeral(ctx, command, ACCESS_DENIED_MESSAGE).await?;
            }
            Route::Run(handler) => {
                debug!("[{}] 🎯 Dispatching /{}", request_id, command.data.name);
                handler
                    .handle(Arc::clone(&self.context), ctx, command)
                    .await?;
                info!("[{}] ✅ /{} completed", request_id, command.data.name);
            }
        }

        Ok(())
    }
}
