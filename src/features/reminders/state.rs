//! Per-user reminder state and the in-memory store that owns it
//!
//! State is volatile: it lives for the process lifetime and is rebuilt lazily
//! after a restart.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Discord user identifier
pub type UserId = u64;

/// Reminder state for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserState {
    /// Reminders are active (`true`) or stopped until revived (`false`)
    pub alive: bool,
    /// Last time the user answered a prompt or reset the bot
    pub last_response_at: Option<DateTime<Utc>>,
    /// Prompts are suppressed until this instant
    pub paused_until: Option<DateTime<Utc>>,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            alive: true,
            last_response_at: None,
            paused_until: None,
        }
    }
}

impl UserState {
    /// Reinitialize to defaults, recording the reset as a response
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self {
            last_response_at: Some(now),
            ..Self::default()
        };
    }

    /// Stop reminders until an explicit revive
    pub fn stop(&mut self) {
        self.alive = false;
        self.paused_until = None;
    }

    pub fn revive(&mut self) {
        self.alive = true;
        self.paused_until = None;
    }

    /// Whether a pause is set and still in the future at `now`
    pub fn is_paused_at(&self, now: DateTime<Utc>) -> bool {
        self.paused_until.is_some_and(|until| now < until)
    }
}

/// Store mapping user ids to their reminder state
///
/// Entries are created on first access. Every read-modify-write goes through
/// [`StateStore::update`], which holds the entry guard for the duration of the
/// closure, so updates to one user never interleave. Different users live in
/// independent entries.
#[derive(Debug, Default)]
pub struct StateStore {
    users: DashMap<UserId, UserState>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the user's state, creating the default entry if unseen
    pub fn get_or_create(&self, user_id: UserId) -> UserState {
        self.users.entry(user_id).or_default().value().clone()
    }

    /// Atomically mutate the user's state, creating it if unseen
    ///
    /// The closure runs while the entry is locked; it must not block.
    pub fn update<F, R>(&self, user_id: UserId, f: F) -> R
    where
        F: FnOnce(&mut UserState) -> R,
    {
        let mut entry = self.users.entry(user_id).or_default();
        f(entry.value_mut())
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
