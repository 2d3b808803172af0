//! Bot command definitions
//!
//! Defines all Telegram bot commands and their parsing logic

use teloxide::utils::command::BotCommands;

/// All bot commands
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Guess-the-song bot commands:")]
pub enum Command {
    #[command(description = "Start the bot and see the welcome message")]
    Start,

    #[command(description = "Show help")]
    Help,
}
