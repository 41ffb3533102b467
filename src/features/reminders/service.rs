//! Reminder service: the state store plus the schedule, behind one API
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;

use super::gate::{self, GateDecision};
use super::response::{apply_response, Answer};
use super::schedule::Schedule;
use super::state::{StateStore, UserId, UserState};

/// Owns all per-user reminder state
///
/// Shared between the scheduler and the command layer behind an `Arc`.
#[derive(Debug, Default)]
pub struct ReminderService {
    store: StateStore,
    schedule: Schedule,
}

impl ReminderService {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            store: StateStore::new(),
            schedule,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Current state for a user (created on first access)
    pub fn state(&self, user_id: UserId) -> UserState {
        self.store.get_or_create(user_id)
    }

    /// Run the gate for one user at `now`
    pub fn evaluate(&self, user_id: UserId, now: DateTime<Utc>) -> GateDecision {
        let decision = self
            .store
            .update(user_id, |state| gate::evaluate(now, state, &self.schedule));
        debug!("Gate for user {user_id} at {now}: {decision:?}");
        decision
    }

    /// Apply a button answer and return the reply text
    pub fn respond(&self, user_id: UserId, answer: Answer, now: DateTime<Utc>) -> String {
        let mut rng = rand::rng();
        self.respond_with_rng(user_id, answer, now, &mut rng)
    }

    pub fn respond_with_rng<R: Rng + ?Sized>(
        &self,
        user_id: UserId,
        answer: Answer,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> String {
        self.store.update(user_id, |state| {
            apply_response(now, state, answer, &self.schedule, rng)
        })
    }

    /// /start: back to defaults
    pub fn reset(&self, user_id: UserId, now: DateTime<Utc>) {
        self.store.update(user_id, |state| state.reset(now));
    }

    /// /stop: manual stop
    pub fn stop(&self, user_id: UserId) {
        self.store.update(user_id, UserState::stop);
    }

    /// /revive
    pub fn revive(&self, user_id: UserId) {
        self.store.update(user_id, UserState::revive);
    }

    /// /status summary for one user
    pub fn status(&self, user_id: UserId, now: DateTime<Utc>) -> String {
        format_status(&self.state(user_id), &self.schedule, now)
    }

    /// Introduction shown on /start, derived from the live schedule
    pub fn overview(&self) -> String {
        let schedule = &self.schedule;
        let window = &schedule.quiet_window;
        format!(
            "🔥 Bot started! Here's how it works:\n\n\
             ⏰ **Schedule:** {active} (every {interval} hours)\n\
             🌙 **Quiet hours:** {quiet} (no reminders)\n\n\
             📋 **Answers:**\n\
             • **Yes** → the flame went out, reminders stop for good\n\
             • **No** → the flame is alive, reminders pause until tomorrow at {reset:02}:00\n\
             • **Not yet** → the flame is at risk, reminders keep coming every {interval} hours\n\n\
             🛠️ **Commands:**\n\
             /start - restart the bot\n\
             /stop - stop reminders\n\
             /status - check the status\n\
             /revive - revive the flame\n\
             /whoami - show your user id",
            active = window.describe_active(),
            quiet = window.describe(),
            interval = schedule.interval_hours(),
            reset = schedule.reset_hour,
        )
    }
}

/// Render a user's state for /status
///
/// The quiet-hours line uses the same window check as the gate.
pub fn format_status(state: &UserState, schedule: &Schedule, now: DateTime<Utc>) -> String {
    let mut text = String::from("🔥 **Flame status:**\n");

    if state.alive {
        text.push_str("✅ The flame is alive\n");
    } else {
        text.push_str("💀 The flame is out\n");
    }

    match state.last_response_at {
        Some(at) => text.push_str(&format!("🕐 Last response: {}\n", schedule.format_local(at))),
        None => text.push_str("🕐 No responses yet\n"),
    }

    let paused = state.is_paused_at(now);
    if let Some(until) = state.paused_until.filter(|_| paused) {
        text.push_str(&format!(
            "⏸️ Reminders paused until: {}\n",
            schedule.format_local(until)
        ));
    }

    let window = &schedule.quiet_window;
    if schedule.is_quiet(now) {
        text.push_str(&format!(
            "🌙 Quiet hours right now ({}), no reminders are sent",
            window.describe()
        ));
    } else if paused {
        text.push_str("⏸️ Reminders are paused until the next day");
    } else if state.alive {
        text.push_str(&format!(
            "☀️ Active hours ({}), reminders are running",
            window.describe_active()
        ));
    } else {
        text.push_str("💀 The flame is out, reminders are stopped");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const USER: UserId = 1001;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
    }

    fn service() -> ReminderService {
        ReminderService::new(Schedule::default())
    }

    #[test]
    fn test_alive_answer_pauses_then_resumes_next_morning() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(service.evaluate(USER, at(10, 10, 0)), GateDecision::Send);

        service.respond_with_rng(USER, Answer::Alive, at(10, 10, 5), &mut rng);
        assert_eq!(service.state(USER).paused_until, Some(at(11, 9, 0)));

        assert!(!service.evaluate(USER, at(10, 13, 0)).should_send());
        assert!(!service.evaluate(USER, at(10, 22, 0)).should_send());

        assert_eq!(service.evaluate(USER, at(11, 9, 30)), GateDecision::Send);
        let state = service.state(USER);
        assert!(state.paused_until.is_none());
        assert!(state.alive);
    }

    #[test]
    fn test_dead_answer_suppresses_until_revive() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(2);
        service.respond_with_rng(USER, Answer::Dead, at(10, 11, 0), &mut rng);

        // ten ticks, three hours apart, spanning several days
        let start = at(10, 12, 0);
        for i in 0..10 {
            let tick = start + chrono::Duration::hours(3 * i);
            assert!(!service.evaluate(USER, tick).should_send(), "tick {i} at {tick}");
        }

        service.revive(USER);
        assert!(service.evaluate(USER, at(14, 12, 0)).should_send());
    }

    #[test]
    fn test_stop_and_reset() {
        let service = service();
        service.stop(USER);
        assert_eq!(service.evaluate(USER, at(10, 12, 0)), GateDecision::Stopped);

        service.reset(USER, at(10, 12, 5));
        let state = service.state(USER);
        assert!(state.alive);
        assert!(state.paused_until.is_none());
        assert_eq!(state.last_response_at, Some(at(10, 12, 5)));
        assert!(service.evaluate(USER, at(10, 15, 0)).should_send());
    }

    #[test]
    fn test_users_are_independent() {
        let service = service();
        service.stop(USER);
        assert!(service.evaluate(USER + 1, at(10, 12, 0)).should_send());
    }

    #[test]
    fn test_status_for_fresh_user() {
        let status = service().status(USER, at(10, 12, 0));
        assert!(status.contains("The flame is alive"));
        assert!(status.contains("No responses yet"));
        assert!(status.contains("Active hours (09:00-00:59)"));
        assert!(!status.contains("paused until:"));
    }

    #[test]
    fn test_status_during_quiet_hours() {
        let status = service().status(USER, at(10, 3, 0));
        assert!(status.contains("Quiet hours right now (01:00-08:59)"));
    }

    #[test]
    fn test_status_while_paused() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(3);
        service.respond_with_rng(USER, Answer::Alive, at(10, 10, 5), &mut rng);

        let status = service.status(USER, at(10, 14, 0));
        assert!(status.contains("Last response: 10.03.2025 10:05"));
        assert!(status.contains("paused until: 11.03.2025 09:00"));
        assert!(status.contains("paused until the next day"));
    }

    #[test]
    fn test_status_does_not_clear_expired_pause() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(4);
        service.respond_with_rng(USER, Answer::Alive, at(10, 10, 5), &mut rng);

        let status = service.status(USER, at(11, 12, 0));
        assert!(status.contains("reminders are running"));
        assert!(service.state(USER).paused_until.is_some());
    }

    #[test]
    fn test_status_when_stopped() {
        let service = service();
        service.stop(USER);
        let status = service.status(USER, at(10, 12, 0));
        assert!(status.contains("The flame is out\n"));
        assert!(status.contains("reminders are stopped"));
    }

    #[test]
    fn test_overview_reflects_schedule() {
        let schedule = Schedule::new(
            super::super::schedule::QuietWindow::new(0, 7).unwrap(),
            8,
            std::time::Duration::from_secs(2 * 3600),
            chrono_tz::Tz::UTC,
        )
        .unwrap();
        let overview = ReminderService::new(schedule).overview();

        assert!(overview.contains("08:00-23:59 (every 2 hours)"));
        assert!(overview.contains("00:00-07:59"));
        assert!(overview.contains("tomorrow at 08:00"));
        assert!(overview.contains("/whoami"));
    }
}
