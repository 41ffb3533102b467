//! Button interactions on check-in prompts
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 2.0.0: Check-in answer buttons, prompt edited in place after an answer
//! - 1.0.0: Persona, confirmation and pagination buttons

use anyhow::Result;
use chrono::Utc;
use log::{error, info, warn};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::features::access::{AccessList, ACCESS_DENIED_MESSAGE};
use crate::features::reminders::{
    Answer, MessageRef, PromptTransport, ReminderService, UserId, CHECKIN_PREFIX,
    UNRECOGNIZED_ANSWER_MESSAGE,
};

/// How a button click is handled
#[derive(Debug, PartialEq, Eq)]
enum ComponentRoute {
    Answer(Answer),
    Unrecognized,
    Denied,
    Unknown,
}

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    reminders: Arc<ReminderService>,
    access: AccessList,
    transport: Arc<dyn PromptTransport>,
}

impl MessageComponentHandler {
    pub fn new(
        reminders: Arc<ReminderService>,
        access: AccessList,
        transport: Arc<dyn PromptTransport>,
    ) -> Self {
        Self {
            reminders,
            access,
            transport,
        }
    }

    fn route(&self, custom_id: &str, user_id: UserId) -> ComponentRoute {
        if !self.access.is_allowed(user_id) {
            return ComponentRoute::Denied;
        }
        if !custom_id.starts_with(CHECKIN_PREFIX) {
            return ComponentRoute::Unknown;
        }
        match Answer::from_custom_id(custom_id) {
            Ok(answer) => ComponentRoute::Answer(answer),
            Err(_) => ComponentRoute::Unrecognized,
        }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id.0;

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        match self.route(custom_id, user_id) {
            ComponentRoute::Answer(answer) => {
                self.handle_answer(ctx, interaction, answer).await?;
            }
            ComponentRoute::Denied => {
                warn!("🚫 User {user_id} pressed {custom_id} but is not allowed");
                reply(ctx, interaction, ACCESS_DENIED_MESSAGE, true).await?;
            }
            ComponentRoute::Unrecognized => {
                warn!("Unrecognized check-in answer '{custom_id}' from user {user_id}");
                reply(ctx, interaction, UNRECOGNIZED_ANSWER_MESSAGE, true).await?;
            }
            ComponentRoute::Unknown => {
                reply(ctx, interaction, "Unknown component interaction.", false).await?;
            }
        }

        Ok(())
    }

    async fn handle_answer(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        answer: Answer,
    ) -> Result<()> {
        let user_id = interaction.user.id.0;

        // Acknowledge first; the edit below goes through the transport
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await?;

        let reply = self.reminders.respond(user_id, answer, Utc::now());
        info!("✅ User {user_id} answered '{answer}'");

        let message = MessageRef {
            channel_id: interaction.message.channel_id.0,
            message_id: interaction.message.id.0,
        };
        let text = append_response(&interaction.message.content, &reply);

        if let Err(e) = self.transport.edit_message(&message, &text).await {
            error!("Failed to update prompt for user {user_id}: {e:#}");
        }

        Ok(())
    }
}

async fn reply(
    ctx: &Context,
    interaction: &MessageComponentInteraction,
    content: &str,
    ephemeral: bool,
) -> Result<()> {
    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(ephemeral))
        })
        .await?;
    Ok(())
}

/// Prompt text with the bot's reply appended below it
pub fn append_response(original: &str, response: &str) -> String {
    format!("{original}\n\n💬 {response}")
}
