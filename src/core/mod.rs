//! # Core Module
//!
//! Configuration shared by the bot binary and the feature modules.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Reminder schedule and allow-list settings; drop message chunking helpers
//! - 1.0.0: Initial creation with config module

pub mod config;

pub use config::Config;
