//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 3.38.0
//!
//! ## Changelog
//! - 3.0.0: Replace AI and admin handlers with CheckinHandler and UtilityHandler
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod checkin;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(checkin::CheckinHandler),
        Arc::new(utility::UtilityHandler),
    ]
}
