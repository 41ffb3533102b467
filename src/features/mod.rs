//! # Features
//!
//! Feature modules of the bot. Each module documents its own version.

pub mod access;
pub mod reminders;

pub use access::{AccessList, ACCESS_DENIED_MESSAGE};
pub use reminders::{
    Answer, DiscordTransport, PromptTransport, ReminderScheduler, ReminderService, Schedule,
};

/// Bot version from Cargo.toml
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
