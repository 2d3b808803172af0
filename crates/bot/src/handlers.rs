//! Command and callback handlers
//!
//! Implementation of all bot command handlers and the inline-keyboard game
//! loop.

use crate::keyboards;
use crate::messages;
use crate::state::BotState;
use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html::escape;
use trackquiz_core::GameError;
use trackquiz_core::models::Track;

/// Handle the /start command
pub async fn handle_start(bot: Bot, msg: Message, state: BotState) -> Result<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No user in message"))?;
    let user_id = user.id.0 as i64;
    let username = user.username.as_deref();

    if let Err(e) = state.users.upsert(user_id, username).await {
        tracing::error!("Failed to register user {}: {}", user_id, e);
    }

    bot.send_message(msg.chat.id, messages::WELCOME_TEXT)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::start_keyboard())
        .await?;

    tracing::info!("User {} started the bot", user_id);

    Ok(())
}

/// Handle the /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, messages::HELP_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

/// Handle inline keyboard presses: the game loop lives here.
pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: BotState) -> Result<()> {
    let user_id = q.from.id.0 as i64;
    let username = q.from.username.as_deref();
    // The game is played in private chats, so the user id doubles as the
    // chat id.
    let chat_id = ChatId(user_id);

    match q.data.as_deref() {
        Some("help") => {
            bot.send_message(chat_id, messages::HELP_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Some("go" | "next") => {
            if let Err(e) = state.users.upsert(user_id, username).await {
                tracing::error!("Failed to register user {}: {}", user_id, e);
            }
            serve_track(&bot, chat_id, user_id, &state).await?;
        }
        Some("restart") => {
            // Explicit "start over": wipe the play cycle, then serve a
            // fresh track. Distinct from the automatic exhaustion reset.
            match state.selector.start_over(user_id).await {
                Ok(()) => {
                    bot.send_message(chat_id, messages::RESTARTED_TEXT).await?;
                    serve_track(&bot, chat_id, user_id, &state).await?;
                    tracing::info!("User {} restarted their play cycle", user_id);
                }
                Err(e) => {
                    tracing::error!("Failed to reset history for user {}: {}", user_id, e);
                    bot.send_message(chat_id, messages::GENERIC_ERROR_TEXT)
                        .await?;
                }
            }
        }
        other => {
            tracing::warn!("Unknown callback data from user {}: {:?}", user_id, other);
        }
    }

    bot.answer_callback_query(q.id).await?;

    Ok(())
}

/// Pick the next track for the user and send it.
async fn serve_track(bot: &Bot, chat_id: ChatId, user_id: i64, state: &BotState) -> Result<()> {
    match state.selector.select_next(user_id).await {
        Ok(track) => {
            bot.send_message(chat_id, format_track(&track))
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::game_keyboard())
                .await?;

            tracing::info!("Served track {} to user {}", track.id, user_id);
        }
        Err(GameError::NoTracksAvailable) => {
            bot.send_message(chat_id, messages::NO_TRACKS_TEXT).await?;
        }
        Err(e) => {
            tracing::error!("Track selection failed for user {}: {}", user_id, e);
            bot.send_message(chat_id, messages::GENERIC_ERROR_TEXT)
                .await?;
        }
    }

    Ok(())
}

/// Render a track reply: artist/title, points, hint behind a spoiler.
pub fn format_track(track: &Track) -> String {
    let mut text = format!(
        "🎵 <b>{} — {}</b>",
        escape(&track.artist),
        escape(&track.title)
    );

    if track.points > 0 {
        text.push_str(&format!("\n🏆 {} point(s)", track.points));
    }

    if let Some(hint) = &track.hint {
        text.push_str(&format!("\n\n💡 <tg-spoiler>{}</tg-spoiler>", escape(hint)));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn track(points: i64, hint: Option<&str>) -> Track {
        Track {
            id: 1,
            artist: "AC/DC".to_string(),
            title: "Back in <Black>".to_string(),
            points,
            hint: hint.map(String::from),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_track_escapes_html() {
        let text = format_track(&track(3, Some("album <b>1980</b>")));

        assert!(text.contains("AC/DC — Back in &lt;Black&gt;"));
        assert!(text.contains("3 point(s)"));
        assert!(text.contains("<tg-spoiler>album &lt;b&gt;1980&lt;/b&gt;</tg-spoiler>"));
    }

    #[test]
    fn test_format_track_omits_empty_parts() {
        let text = format_track(&track(0, None));

        assert!(!text.contains("point"));
        assert!(!text.contains("tg-spoiler"));
    }
}
