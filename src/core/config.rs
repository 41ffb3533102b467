//! Environment-based configuration
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Allow-list and reminder schedule settings, validation at startup
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::time::Duration;

use crate::features::access::AccessList;
use crate::features::reminders::schedule::{
    QuietWindow, Schedule, DEFAULT_INTERVAL_HOURS, DEFAULT_QUIET_END_HOUR,
    DEFAULT_QUIET_START_HOUR, DEFAULT_RESET_HOUR,
};

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register slash commands in this guild only (instant updates while developing)
    pub discord_guild_id: Option<u64>,
    pub allowed_users: AccessList,
    pub schedule: Schedule,
    pub log_level: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Every error names the variable at fault.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?
            .trim()
            .to_string();
        validate_token(&discord_token).context("Invalid DISCORD_TOKEN")?;

        let discord_guild_id = match lookup("DISCORD_GUILD_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| anyhow!("DISCORD_GUILD_ID must be a numeric id, got '{raw}'"))?,
            ),
            None => None,
        };

        let allowed_raw = lookup("ALLOWED_USER_IDS")
            .ok_or_else(|| anyhow!("ALLOWED_USER_IDS must be set (comma-separated user ids)"))?;
        let allowed_users =
            AccessList::parse(&allowed_raw).context("Invalid ALLOWED_USER_IDS")?;

        let quiet_start = parse_hour(&lookup, "QUIET_START_HOUR", DEFAULT_QUIET_START_HOUR)?;
        let quiet_end = parse_hour(&lookup, "QUIET_END_HOUR", DEFAULT_QUIET_END_HOUR)?;
        let quiet_window = QuietWindow::new(quiet_start, quiet_end)
            .context("Invalid QUIET_START_HOUR/QUIET_END_HOUR")?;

        let reset_hour = parse_hour(&lookup, "RESET_HOUR", DEFAULT_RESET_HOUR)?;

        let interval_secs = match lookup("REMINDER_INTERVAL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|hours| *hours > 0)
                .and_then(|hours| hours.checked_mul(3600))
                .ok_or_else(|| {
                    anyhow!("REMINDER_INTERVAL_HOURS must be a positive whole number of hours, got '{raw}'")
                })?,
            None => DEFAULT_INTERVAL_HOURS * 3600,
        };

        let timezone = match lookup("BOT_TIMEZONE") {
            Some(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| anyhow!("BOT_TIMEZONE must be an IANA timezone name, got '{raw}'"))?,
            None => Tz::UTC,
        };

        let schedule = Schedule::new(
            quiet_window,
            reset_hour,
            Duration::from_secs(interval_secs),
            timezone,
        )?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            discord_token,
            discord_guild_id,
            allowed_users,
            schedule,
            log_level,
        })
    }
}

fn parse_hour<F>(lookup: &F, key: &str, default: u32) -> Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|hour| *hour < 24)
            .ok_or_else(|| anyhow!("{key} must be an hour between 0 and 23, got '{raw}'")),
        None => Ok(default),
    }
}

/// Bot tokens are three dot-separated, non-empty segments
fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        anyhow::bail!("token is empty");
    }
    if token.chars().any(char::is_whitespace) {
        anyhow::bail!("token contains whitespace");
    }
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        anyhow::bail!("token is not in the expected <id>.<timestamp>.<hmac> format");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TOKEN: &str = "MTA5.GxYz12.abcdefghijklmnop";

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    fn error_text(vars: &[(&str, &str)]) -> String {
        format!("{:#}", load(vars).unwrap_err())
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&[("DISCORD_TOKEN", TOKEN), ("ALLOWED_USER_IDS", "1,2")]).unwrap();

        assert_eq!(config.allowed_users.len(), 2);
        assert_eq!(config.schedule.quiet_window, QuietWindow::default());
        assert_eq!(config.schedule.reset_hour, 9);
        assert_eq!(config.schedule.interval, Duration::from_secs(3 * 3600));
        assert_eq!(config.schedule.timezone, Tz::UTC);
        assert_eq!(config.discord_guild_id, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config = load(&[
            ("DISCORD_TOKEN", TOKEN),
            ("ALLOWED_USER_IDS", "42"),
            ("DISCORD_GUILD_ID", "123456"),
            ("QUIET_START_HOUR", "0"),
            ("QUIET_END_HOUR", "7"),
            ("RESET_HOUR", "8"),
            ("REMINDER_INTERVAL_HOURS", "2"),
            ("BOT_TIMEZONE", "Europe/Moscow"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.discord_guild_id, Some(123456));
        assert_eq!(config.schedule.quiet_window, QuietWindow::new(0, 7).unwrap());
        assert_eq!(config.schedule.reset_hour, 8);
        assert_eq!(config.schedule.interval_hours(), 2);
        assert_eq!(config.schedule.timezone, chrono_tz::Europe::Moscow);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        assert!(error_text(&[("ALLOWED_USER_IDS", "1")]).contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let text = error_text(&[("DISCORD_TOKEN", "not-a-token"), ("ALLOWED_USER_IDS", "1")]);
        assert!(text.contains("DISCORD_TOKEN"));

        let text = error_text(&[("DISCORD_TOKEN", "a..c"), ("ALLOWED_USER_IDS", "1")]);
        assert!(text.contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_allow_list_errors_name_the_variable() {
        assert!(error_text(&[("DISCORD_TOKEN", TOKEN)]).contains("ALLOWED_USER_IDS"));

        let text = error_text(&[("DISCORD_TOKEN", TOKEN), ("ALLOWED_USER_IDS", "12,bob")]);
        assert!(text.contains("ALLOWED_USER_IDS"));
        assert!(text.contains("bob"));
    }

    #[test]
    fn test_bad_hours_are_rejected() {
        let base = [("DISCORD_TOKEN", TOKEN), ("ALLOWED_USER_IDS", "1")];

        let text = error_text(&[base[0], base[1], ("RESET_HOUR", "25")]);
        assert!(text.contains("RESET_HOUR"));

        let text = error_text(&[base[0], base[1], ("QUIET_START_HOUR", "night")]);
        assert!(text.contains("QUIET_START_HOUR"));

        let text = error_text(&[base[0], base[1], ("QUIET_START_HOUR", "0"), ("QUIET_END_HOUR", "23")]);
        assert!(text.contains("QUIET_END_HOUR"));
    }

    #[test]
    fn test_bad_interval_and_timezone_are_rejected() {
        let base = [("DISCORD_TOKEN", TOKEN), ("ALLOWED_USER_IDS", "1")];

        let text = error_text(&[base[0], base[1], ("REMINDER_INTERVAL_HOURS", "0")]);
        assert!(text.contains("REMINDER_INTERVAL_HOURS"));

        let text = error_text(&[base[0], base[1], ("REMINDER_INTERVAL_HOURS", "6000000000000000")]);
        assert!(text.contains("REMINDER_INTERVAL_HOURS"));

        let text = error_text(&[base[0], base[1], ("BOT_TIMEZONE", "Mars/Olympus")]);
        assert!(text.contains("BOT_TIMEZONE"));
    }

    #[test]
    fn test_bad_guild_id_is_rejected() {
        let text = error_text(&[
            ("DISCORD_TOKEN", TOKEN),
            ("ALLOWED_USER_IDS", "1"),
            ("DISCORD_GUILD_ID", "guild"),
        ]);
        assert!(text.contains("DISCORD_GUILD_ID"));
    }
}
