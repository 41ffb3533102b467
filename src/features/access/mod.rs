//! # Feature: Access Control
//!
//! Static allow-list of Discord user ids supplied at startup. Every command
//! and button press from a user outside the list is refused without touching
//! reminder state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{anyhow, Result};

use crate::features::reminders::UserId;

/// Reply for users outside the allow-list
pub const ACCESS_DENIED_MESSAGE: &str = "⛔ Access denied. You are not on this bot's allow-list.";

/// Ordered, de-duplicated set of authorized users
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    users: Vec<UserId>,
}

impl AccessList {
    /// Build from ids in order, dropping repeats
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        let mut users = Vec::new();
        for id in ids {
            if !users.contains(&id) {
                users.push(id);
            }
        }
        Self { users }
    }

    /// Parse a comma-separated list of ids, e.g. `"1234, 5678"`
    ///
    /// Empty entries are ignored; any non-numeric entry is an error, and so is
    /// a list with no ids at all.
    pub fn parse(raw: &str) -> Result<Self> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<UserId>()
                    .map_err(|_| anyhow!("'{entry}' is not a valid Discord user id"))
            })
            .collect::<Result<Vec<_>>>()?;

        if ids.is_empty() {
            anyhow::bail!("no user ids given");
        }

        Ok(Self::new(ids))
    }

    pub fn is_allowed(&self, user_id: UserId) -> bool {
        self.users.contains(&user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order_and_drops_duplicates() {
        let list = AccessList::parse("30, 10,20,10 , 30").unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![30, 10, 20]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_parse_ignores_empty_entries() {
        let list = AccessList::parse("1,,2,").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = AccessList::parse("123,abc").unwrap_err();
        assert!(err.to_string().contains("abc"));
        assert!(AccessList::parse("-5").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        assert!(AccessList::parse("").is_err());
        assert!(AccessList::parse(" , ").is_err());
    }

    #[test]
    fn test_is_allowed() {
        let list = AccessList::new([1, 2]);
        assert!(list.is_allowed(1));
        assert!(!list.is_allowed(3));
        assert!(!AccessList::default().is_allowed(1));
    }
}
