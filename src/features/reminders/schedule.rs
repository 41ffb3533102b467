//! Reminder schedule: quiet window, daily reset hour, tick interval and timezone
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Quiet window may wrap past midnight
//! - 1.0.0: Initial implementation

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::time::Duration;

/// Default first hour of the quiet window
pub const DEFAULT_QUIET_START_HOUR: u32 = 1;
/// Default last hour of the quiet window (inclusive)
pub const DEFAULT_QUIET_END_HOUR: u32 = 8;
/// Default hour at which an "alive" pause ends on the following day
pub const DEFAULT_RESET_HOUR: u32 = 9;
/// Default time between reminder ticks
pub const DEFAULT_INTERVAL_HOURS: u64 = 3;

/// Display format for timestamps shown to users
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Inclusive range of hours during which no prompts are sent
///
/// When `start_hour > end_hour` the window wraps past midnight,
/// e.g. 22..=6 covers 22:00-06:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietWindow {
    start_hour: u32,
    end_hour: u32,
}

impl QuietWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour > 23 || end_hour > 23 {
            anyhow::bail!(
                "Quiet window hours must be between 0 and 23 (got {start_hour}-{end_hour})"
            );
        }
        if (end_hour + 1) % 24 == start_hour {
            anyhow::bail!(
                "Quiet window {start_hour}-{end_hour} covers the whole day, no reminder could ever be sent"
            );
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether the given hour of day falls inside the window
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour <= self.end_hour
        } else {
            hour >= self.start_hour || hour <= self.end_hour
        }
    }

    /// Human-readable range, e.g. "01:00-08:59"
    pub fn describe(&self) -> String {
        format!("{:02}:00-{:02}:59", self.start_hour, self.end_hour)
    }

    /// The complement of the window, e.g. "09:00-00:59"
    pub fn describe_active(&self) -> String {
        format!(
            "{:02}:00-{:02}:59",
            (self.end_hour + 1) % 24,
            (self.start_hour + 23) % 24
        )
    }
}

impl Default for QuietWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_QUIET_START_HOUR,
            end_hour: DEFAULT_QUIET_END_HOUR,
        }
    }
}

/// Timing configuration shared by the gate, the response processor and /status
#[derive(Debug, Clone)]
pub struct Schedule {
    pub quiet_window: QuietWindow,
    pub reset_hour: u32,
    pub interval: Duration,
    pub timezone: Tz,
}

impl Schedule {
    pub fn new(
        quiet_window: QuietWindow,
        reset_hour: u32,
        interval: Duration,
        timezone: Tz,
    ) -> Result<Self> {
        if reset_hour > 23 {
            anyhow::bail!("Reset hour must be between 0 and 23 (got {reset_hour})");
        }
        if interval.is_zero() {
            anyhow::bail!("Reminder interval must be greater than zero");
        }
        Ok(Self {
            quiet_window,
            reset_hour,
            interval,
            timezone,
        })
    }

    /// Hour of day of `now` in the schedule timezone
    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.timezone).hour()
    }

    pub fn is_quiet(&self, now: DateTime<Utc>) -> bool {
        self.quiet_window.contains(self.local_hour(now))
    }

    /// Tomorrow (local calendar) at the reset hour, minutes and seconds zeroed
    pub fn next_reset_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let tomorrow = now.with_timezone(&self.timezone).date_naive() + chrono::Days::new(1);
        let reset_time = NaiveTime::from_hms_opt(self.reset_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let naive = tomorrow.and_time(reset_time);

        // A DST gap can swallow the reset hour; fall forward to the next valid hour.
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(naive + ChronoDuration::hours(1)))
                    .earliest()
            })
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }

    /// Format a timestamp in the schedule timezone for display
    pub fn format_local(&self, timestamp: DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.timezone)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    pub fn interval_hours(&self) -> u64 {
        self.interval.as_secs() / 3600
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            quiet_window: QuietWindow::default(),
            reset_hour: DEFAULT_RESET_HOUR,
            interval: Duration::from_secs(DEFAULT_INTERVAL_HOURS * 3600),
            timezone: Tz::UTC,
        }
    }
}
