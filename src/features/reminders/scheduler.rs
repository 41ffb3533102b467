//! Tick loop that prompts every authorized user whose gate is open
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Per-user gate with pause and stop states, transport abstraction
//! - 1.0.0: Initial fixed-interval reminder loop

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use uuid::Uuid;

use super::response::Answer;
use super::service::ReminderService;
use super::transport::PromptTransport;
use crate::features::access::AccessList;

/// Question sent on every prompt
pub const PROMPT_TEXT: &str = "🔥 I hope you didn't let the flame go out. Did it?";

/// Counts for one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub sent: usize,
    pub suppressed: usize,
    pub failed: usize,
}

/// Drives the reminder cadence
pub struct ReminderScheduler {
    service: Arc<ReminderService>,
    access: AccessList,
    transport: Arc<dyn PromptTransport>,
}

impl ReminderScheduler {
    pub fn new(
        service: Arc<ReminderService>,
        access: AccessList,
        transport: Arc<dyn PromptTransport>,
    ) -> Self {
        Self {
            service,
            access,
            transport,
        }
    }

    /// Run forever, one tick per interval; the first tick fires immediately
    ///
    /// Ticks are awaited in sequence, so a slow tick delays the next one
    /// instead of overlapping it.
    pub async fn run(self) {
        let period = self.service.schedule().interval;
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "⏰ Reminder scheduler started: every {}h for {} user(s)",
            self.service.schedule().interval_hours(),
            self.access.len()
        );

        loop {
            ticker.tick().await;
            self.tick(Utc::now()).await;
        }
    }

    /// Evaluate every authorized user at `now` and send the due prompts
    pub async fn tick(&self, now: DateTime<Utc>) -> TickReport {
        let tick_id = Uuid::new_v4();
        let mut report = TickReport::default();

        debug!("[{tick_id}] Tick at {now}");

        for user_id in self.access.iter() {
            let decision = self.service.evaluate(user_id, now);
            if !decision.should_send() {
                debug!("[{tick_id}] Skipping user {user_id}: {decision:?}");
                report.suppressed += 1;
                continue;
            }

            match self
                .transport
                .send_prompt(user_id, PROMPT_TEXT, &Answer::ALL)
                .await
            {
                Ok(message) => {
                    info!(
                        "[{tick_id}] 📨 Prompt sent to user {user_id} (message {})",
                        message.message_id
                    );
                    report.sent += 1;
                }
                Err(e) => {
                    error!("[{tick_id}] ❌ Failed to deliver prompt to user {user_id}: {e:#}");
                    report.failed += 1;
                }
            }
        }

        info!(
            "[{tick_id}] Tick complete: {} sent, {} suppressed, {} failed",
            report.sent, report.suppressed, report.failed
        );
        report
    }
}
