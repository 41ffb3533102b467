//! # Reminders Feature
//!
//! Periodic check-in prompts with a per-user state machine. Each tick asks
//! every authorized user whether the flame went out; the answer decides
//! whether reminders stop, pause until the next morning, or keep coming.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Per-user state store, quiet window, daily reset pauses, button answers
//! - 1.0.0: Initial release with a single global reminder

pub mod gate;
pub mod response;
pub mod schedule;
pub mod scheduler;
pub mod service;
pub mod state;
pub mod transport;

pub use gate::{should_send, GateDecision};
pub use response::{apply_response, Answer, CHECKIN_PREFIX, UNRECOGNIZED_ANSWER_MESSAGE};
pub use schedule::{QuietWindow, Schedule};
pub use scheduler::{ReminderScheduler, TickReport, PROMPT_TEXT};
pub use service::{format_status, ReminderService};
pub use state::{StateStore, UserId, UserState};
pub use transport::{create_answer_buttons, DiscordTransport, MessageRef, PromptTransport};
