// Core layer - shared types and configuration
pub mod core;

// Features layer - reminder state machine and access control
pub mod features;

// UI components
pub mod message_components;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::Config;

pub use features::{
    // Access
    AccessList,
    // Reminders
    DiscordTransport, PromptTransport, ReminderScheduler, ReminderService,
};
