//! Answer handling: turns a button press into the next user state and a reply

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::info;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::schedule::Schedule;
use super::state::UserState;

/// Button custom_id prefix for check-in answers
pub const CHECKIN_PREFIX: &str = "checkin_";

/// Pool the "not yet" encouragement draws from
pub const EMOJI_POOL: [&str; 12] = [
    "🌟", "✨", "💫", "🎈", "🎊", "🎉", "🌈", "🦄", "🎪", "🎭", "🎨", "🎯",
];

/// How many distinct emoji the encouragement message carries
pub const EMOJI_SAMPLE_SIZE: usize = 3;

/// Reply sent when a button payload is not one of the known answers
pub const UNRECOGNIZED_ANSWER_MESSAGE: &str =
    "🤔 I don't recognize that answer. Please use one of the buttons on the latest reminder.";

/// The three answers a prompt offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    /// The flame went out
    Dead,
    /// The flame is alive and well
    Alive,
    /// Not yet, but it is at risk
    Unsure,
}

impl Answer {
    /// Every answer in button order
    pub const ALL: [Answer; 3] = [Answer::Dead, Answer::Alive, Answer::Unsure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Dead => "dead",
            Answer::Alive => "alive",
            Answer::Unsure => "unsure",
        }
    }

    /// Button label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Dead => "Yes 😢",
            Answer::Alive => "No 🎉",
            Answer::Unsure => "Not yet 🤞",
        }
    }

    pub fn custom_id(&self) -> String {
        format!("{}{}", CHECKIN_PREFIX, self.as_str())
    }

    /// Parse a button custom_id such as `checkin_alive`
    pub fn from_custom_id(custom_id: &str) -> Result<Self> {
        custom_id
            .strip_prefix(CHECKIN_PREFIX)
            .ok_or_else(|| anyhow!("Not a check-in button: '{custom_id}'"))?
            .parse()
    }
}

impl FromStr for Answer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dead" => Ok(Answer::Dead),
            "alive" => Ok(Answer::Alive),
            "unsure" => Ok(Answer::Unsure),
            other => Err(anyhow!("Unrecognized answer: '{other}'")),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick [`EMOJI_SAMPLE_SIZE`] distinct emoji from [`EMOJI_POOL`]
pub fn sample_emojis<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    EMOJI_POOL
        .choose_multiple(rng, EMOJI_SAMPLE_SIZE)
        .copied()
        .collect()
}

/// Apply an answer to the user's state and build the reply text
pub fn apply_response<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    state: &mut UserState,
    answer: Answer,
    schedule: &Schedule,
    rng: &mut R,
) -> String {
    state.last_response_at = Some(now);

    match answer {
        Answer::Dead => {
            state.alive = false;
            state.paused_until = None;
            info!("💀 Flame reported dead, reminders stopped until revived");
            "😭 Such a short life... Rest in peace, little flame 🕯️💔\n\n\
             ⏹️ Reminders are stopped for good. Use `/revive` to bring them back."
                .to_string()
        }
        Answer::Alive => {
            let resume_at = schedule.next_reset_after(now);
            state.alive = true;
            state.paused_until = Some(resume_at);
            info!("🔥 Flame alive, reminders paused until {resume_at}");
            format!(
                "🎉 HOORAY! The flame is alive and well! 🔥✨ Great job!\n\n\
                 ⏸️ Reminders are paused until tomorrow at {:02}:00 ({})",
                schedule.reset_hour,
                schedule.format_local(resume_at)
            )
        }
        Answer::Unsure => {
            state.alive = true;
            let emojis = sample_emojis(rng).join(" ");
            info!("🤞 Flame at risk, reminders continue");
            format!(
                "🙏 Please don't let it go out {emojis}\n\n\
                 ⏰ Reminders continue every {} hours",
                schedule.interval_hours()
            )
        }
    }
}
