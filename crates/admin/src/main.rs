//! Standalone admin panel binary
//!
//! Runs only the web admin panel. The unified `server` binary is the usual
//! entry point; this one is handy for development.

use anyhow::Result;
use trackquiz_core::config::CoreConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,admin=debug,sqlx=warn".into()),
        )
        .init();

    let core = CoreConfig::from_env()?;
    let config = admin::config::Config::from_env(core.database_path())?;

    let pool = trackquiz_db::connect(&core.database_url, core.db_max_connections).await?;
    trackquiz_db::migrate(&pool).await?;

    let bot = teloxide::Bot::new(core.telegram_bot_token);
    let state = admin::AppState::new(pool, bot, config);

    admin::run_admin(state).await?;

    Ok(())
}
