//! Check-in slash commands: /start, /stop, /status, /revive

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    [
        ("start", "Restart the bot and reset your reminder state"),
        ("stop", "Stop reminders until you revive them"),
        ("status", "Show your reminder status"),
        ("revive", "Revive the flame and resume reminders"),
    ]
    .into_iter()
    .map(|(name, description)| {
        let mut command = CreateApplicationCommand::default();
        command.name(name).description(description);
        command
    })
    .collect()
}
