//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 3.38.0
//!
//! ## Changelog
//! - 2.0.0: Reminder service and allow-list replace the AI services
//! - 1.0.0: Initial implementation with core shared state

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::features::access::AccessList;
use crate::features::reminders::ReminderService;

/// Shared context for all command handlers
#[derive(Clone)]
pub struct CommandContext {
    pub reminders: Arc<ReminderService>,
    pub access: AccessList,
}

impl CommandContext {
    pub fn new(reminders: Arc<ReminderService>, access: AccessList) -> Self {
        Self { reminders, access }
    }
}

/// Reply to a slash command with plain content
pub async fn respond_with_content(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString + Send,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content))
        })
        .await?;
    Ok(())
}

/// Reply visible only to the invoking user
pub async fn respond_ephemeral(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: impl ToString + Send,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(true))
        })
        .await?;
    Ok(())
}
