//! # Utility Commands
//!
//! /whoami for discovering the id to put on the allow-list.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_whoami_command()]
}

fn create_whoami_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("whoami")
        .description("Show your Discord user id and whether you can use this bot");
    command
}
