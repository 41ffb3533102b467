//! Outbound delivery of prompts and prompt edits
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::debug;
use serenity::builder::CreateComponents;
use serenity::http::Http;
use serenity::model::application::component::ButtonStyle;
use serenity::model::id::{ChannelId, MessageId, UserId as DiscordUserId};
use std::sync::Arc;

use super::response::Answer;
use super::state::UserId;

/// Location of a delivered prompt, used to edit it later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Delivers prompts to users and edits them after an answer
///
/// Calls are fire-and-forget from the caller's perspective: every call may
/// fail independently and callers log and move on.
#[async_trait]
pub trait PromptTransport: Send + Sync {
    /// Send `text` with one button per option
    async fn send_prompt(&self, user_id: UserId, text: &str, options: &[Answer])
        -> Result<MessageRef>;

    /// Replace the text of a previously sent prompt and drop its buttons
    async fn edit_message(&self, message: &MessageRef, text: &str) -> Result<()>;
}

/// Build one action row with a button per answer
pub fn create_answer_buttons(options: &[Answer]) -> CreateComponents {
    let mut components = CreateComponents::default();
    components.create_action_row(|row| {
        for answer in options {
            row.create_button(|btn| {
                btn.custom_id(answer.custom_id())
                    .label(answer.label())
                    .style(button_style(*answer))
            });
        }
        row
    });
    components
}

fn button_style(answer: Answer) -> ButtonStyle {
    match answer {
        Answer::Dead => ButtonStyle::Danger,
        Answer::Alive => ButtonStyle::Success,
        Answer::Unsure => ButtonStyle::Secondary,
    }
}

/// Discord transport: prompts go out as direct messages
#[derive(Clone)]
pub struct DiscordTransport {
    http: Arc<Http>,
}

impl DiscordTransport {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PromptTransport for DiscordTransport {
    async fn send_prompt(
        &self,
        user_id: UserId,
        text: &str,
        options: &[Answer],
    ) -> Result<MessageRef> {
        let dm = DiscordUserId(user_id)
            .create_dm_channel(&*self.http)
            .await
            .with_context(|| format!("Failed to open DM channel with user {user_id}"))?;

        let message = dm
            .send_message(&*self.http, |m| {
                m.content(text)
                    .set_components(create_answer_buttons(options))
            })
            .await
            .with_context(|| format!("Failed to send prompt to user {user_id}"))?;

        debug!(
            "Prompt delivered to user {user_id} as message {} in channel {}",
            message.id, message.channel_id
        );

        Ok(MessageRef {
            channel_id: message.channel_id.0,
            message_id: message.id.0,
        })
    }

    async fn edit_message(&self, message: &MessageRef, text: &str) -> Result<()> {
        ChannelId(message.channel_id)
            .edit_message(&*self.http, MessageId(message.message_id), |m| {
                m.content(text).set_components(CreateComponents::default())
            })
            .await
            .with_context(|| format!("Failed to edit message {}", message.message_id))?;
        Ok(())
    }
}
