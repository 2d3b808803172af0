//! Inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Keyboard shown with the welcome message.
pub fn start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("▶️ Let's go", "go"),
        InlineKeyboardButton::callback("❓ Help", "help"),
    ]])
}

/// Keyboard attached to every served track.
pub fn game_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback("⏭ Next song", "next")],
        vec![InlineKeyboardButton::callback("🔁 Start over", "restart")],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_keyboard_callbacks() {
        assert_eq!(callback_data(&start_keyboard()), vec!["go", "help"]);
    }

    #[test]
    fn test_game_keyboard_callbacks() {
        assert_eq!(callback_data(&game_keyboard()), vec!["next", "restart"]);
    }
}
