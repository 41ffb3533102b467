//! Reminder gate: decides whether a user gets a prompt on a tick

use chrono::{DateTime, Utc};

use super::schedule::Schedule;
use super::state::UserState;

/// Outcome of evaluating the gate for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Send,
    QuietHours,
    Paused { until: DateTime<Utc> },
    Stopped,
}

impl GateDecision {
    pub fn should_send(&self) -> bool {
        matches!(self, GateDecision::Send)
    }
}

/// Evaluate the gate, clearing an expired pause as a side effect
///
/// Checks run in a fixed order: quiet window, active pause, pause expiry,
/// stopped. The expiry clear precedes the stopped check so a user whose pause
/// just ran out is still suppressed when stopped.
pub fn evaluate(now: DateTime<Utc>, state: &mut UserState, schedule: &Schedule) -> GateDecision {
    if schedule.is_quiet(now) {
        return GateDecision::QuietHours;
    }

    if let Some(until) = state.paused_until {
        if now < until {
            return GateDecision::Paused { until };
        }
        state.paused_until = None;
    }

    if !state.alive {
        return GateDecision::Stopped;
    }

    GateDecision::Send
}

pub fn should_send(now: DateTime<Utc>, state: &mut UserState, schedule: &Schedule) -> bool {
    evaluate(now, state, schedule).should_send()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_default_state_sends_outside_quiet_hours() {
        let schedule = Schedule::default();
        let mut state = UserState::default();
        assert_eq!(evaluate(at(10, 10, 0), &mut state, &schedule), GateDecision::Send);
        assert!(should_send(at(10, 0, 0), &mut state, &schedule));
        assert!(should_send(at(10, 23, 59), &mut state, &schedule));
    }

    #[test]
    fn test_quiet_hours_suppress_every_state() {
        let schedule = Schedule::default();
        let states = [
            UserState::default(),
            UserState {
                alive: false,
                ..UserState::default()
            },
            UserState {
                paused_until: Some(at(1, 0, 0)),
                ..UserState::default()
            },
        ];

        for hour in 1..=8 {
            for state in &states {
                let mut state = state.clone();
                assert_eq!(
                    evaluate(at(10, hour, 30), &mut state, &schedule),
                    GateDecision::QuietHours,
                    "hour {hour} should be quiet"
                );
            }
        }
    }

    #[test]
    fn test_stopped_user_never_receives_prompts() {
        let schedule = Schedule::default();
        let mut state = UserState {
            alive: false,
            ..UserState::default()
        };

        for day in 10..13 {
            for hour in 0..24 {
                assert!(!should_send(at(day, hour, 0), &mut state, &schedule));
            }
        }
    }

    #[test]
    fn test_active_pause_suppresses() {
        let schedule = Schedule::default();
        let until = at(11, 9, 0);
        let mut state = UserState {
            paused_until: Some(until),
            ..UserState::default()
        };

        assert_eq!(
            evaluate(at(10, 13, 0), &mut state, &schedule),
            GateDecision::Paused { until }
        );
        assert_eq!(state.paused_until, Some(until));
    }

    #[test]
    fn test_expired_pause_is_cleared_then_sends() {
        let schedule = Schedule::default();
        let mut state = UserState {
            paused_until: Some(at(11, 9, 0)),
            ..UserState::default()
        };

        assert_eq!(evaluate(at(11, 9, 0), &mut state, &schedule), GateDecision::Send);
        assert!(state.paused_until.is_none());
    }

    #[test]
    fn test_expired_pause_cleared_but_stopped_user_suppressed() {
        let schedule = Schedule::default();
        let mut state = UserState {
            alive: false,
            last_response_at: None,
            paused_until: Some(at(11, 9, 0)),
        };

        assert_eq!(evaluate(at(11, 9, 30), &mut state, &schedule), GateDecision::Stopped);
        assert!(state.paused_until.is_none());
    }

    #[test]
    fn test_quiet_hours_leave_expired_pause_untouched() {
        let schedule = Schedule::default();
        let until = at(11, 2, 0);
        let mut state = UserState {
            paused_until: Some(until),
            ..UserState::default()
        };

        assert_eq!(evaluate(at(11, 3, 0), &mut state, &schedule), GateDecision::QuietHours);
        assert_eq!(state.paused_until, Some(until));
    }
}
