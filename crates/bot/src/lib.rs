//! Trackquiz Bot - Telegram front end for the guess-the-song game
//!
//! Dispatches /start and /help plus the inline-keyboard callbacks that
//! drive the game loop.

mod commands;
pub mod config;
mod handlers;
mod keyboards;
mod messages;
pub mod state;

use anyhow::Result;
use commands::Command;
use sqlx::SqlitePool;
use state::BotState;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::dptree;
use teloxide::prelude::*;

/// Run the Telegram bot service
///
/// This function initializes the bot dispatcher and runs until it exits or
/// encounters an error. It does not handle Ctrl+C signals - that should be
/// handled by the caller.
pub async fn run_bot(pool: SqlitePool, bot_token: String) -> Result<()> {
    let state = BotState::new(pool);

    let bot = Bot::new(bot_token);
    tracing::info!("Bot initialized, starting dispatcher");

    // Note: NOT using enable_ctrlc_handler() - shutdown is managed by the caller
    Dispatcher::builder(bot, build_handler_tree())
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Build the update handler schema. Exposed for dispatcher tests.
pub fn build_handler_tree() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

/// Route commands to their handlers
async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> ResponseResult<()> {
    tracing::info!("Handling command: {:?}", cmd);

    let result = match cmd {
        Command::Start => handlers::handle_start(bot, msg, state).await,
        Command::Help => handlers::handle_help(bot, msg).await,
    };

    if let Err(e) = result {
        tracing::error!("Error handling command: {}", e);
    }

    Ok(())
}

/// Route inline keyboard presses
async fn handle_callback(bot: Bot, q: CallbackQuery, state: BotState) -> ResponseResult<()> {
    if let Err(e) = handlers::handle_callback(bot, q, state).await {
        tracing::error!("Error handling callback: {}", e);
    }

    Ok(())
}
