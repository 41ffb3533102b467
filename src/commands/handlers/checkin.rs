//! Check-in command handlers
//!
//! Handles: start, stop, status, revive
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::{respond_with_content, CommandContext};
use crate::commands::handler::SlashCommandHandler;

/// Handler for the reminder state commands
pub struct CheckinHandler;

#[async_trait]
impl SlashCommandHandler for CheckinHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "stop", "status", "revive"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.0;
        let reply = match command.data.name.as_str() {
            "start" => {
                ctx.reminders.reset(user_id, Utc::now());
                info!("🔄 Reminder state reset for user {user_id}");
                ctx.reminders.overview()
            }
            "stop" => {
                ctx.reminders.stop(user_id);
                info!("⏹️ Reminders stopped manually by user {user_id}");
                "⏹️ Reminders stopped manually. Use `/revive` to resume them.".to_string()
            }
            "status" => ctx.reminders.status(user_id, Utc::now()),
            "revive" => {
                ctx.reminders.revive(user_id);
                info!("🔥 Flame revived by user {user_id}");
                "🔥 The flame is revived! Reminders have resumed.".to_string()
            }
            _ => return Ok(()),
        };

        respond_with_content(serenity_ctx, command, reply).await
    }
}
