//! Utility command handlers
//!
//! Handles: whoami
//!
//! - **Version**: 2.0.0
//! - **Since**: 3.38.0
//!
//! ## Changelog
//! - 2.0.0: Replace ping/help/version/uptime with whoami
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::{respond_ephemeral, CommandContext};
use crate::commands::handler::SlashCommandHandler;
use crate::features::access::AccessList;
use crate::features::reminders::UserId;

/// Handler for /whoami
///
/// Open to everyone so operators can look up ids for `ALLOWED_USER_IDS`.
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["whoami"]
    }

    fn requires_authorization(&self) -> bool {
        false
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.0;
        let reply = whoami_text(user_id, &command.user.name, &ctx.access);

        respond_ephemeral(serenity_ctx, command, reply).await?;
        info!("Whoami command completed for user {user_id}");
        Ok(())
    }
}

fn whoami_text(user_id: UserId, username: &str, access: &AccessList) -> String {
    let access_line = if access.is_allowed(user_id) {
        "✅ You are on the allow-list."
    } else {
        "⛔ You are not on the allow-list yet."
    };
    format!("👤 **{username}**\n🆔 User id: `{user_id}`\n{access_line}")
}
