//! User-facing bot texts

pub const WELCOME_TEXT: &str = "👋 <b>Welcome to the guess-the-song game!</b>\n\n\
     I'll show you a track, you try to guess it before peeking at the hint.\n\
     Hints are hidden behind a spoiler, points are listed with each song.\n\n\
     Press ▶️ to get your first track!";

pub const HELP_TEXT: &str = "<b>How to play</b>\n\n\
     /start - Show the welcome message and the game keyboard\n\
     /help - Show this help\n\n\
     ▶️ Let's go - Get a track\n\
     ⏭ Next song - Get another track (no repeats until you've seen them all)\n\
     🔁 Start over - Forget what you've been shown and start a fresh round";

pub const NO_TRACKS_TEXT: &str =
    "😔 No tracks are configured yet. Check back a bit later!";

pub const RESTARTED_TEXT: &str = "🔁 Starting over, your play history is cleared.";

pub const GENERIC_ERROR_TEXT: &str = "Something went wrong, please try again later.";
