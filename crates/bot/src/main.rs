//! Standalone bot binary
//!
//! Runs only the Telegram bot against an existing database. The unified
//! `server` binary is the usual entry point; this one is handy for
//! development.

use anyhow::Result;
use bot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bot=debug,sqlx=warn".into()),
        )
        .init();

    let config = Config::from_env()?;

    let pool = trackquiz_db::connect(&config.database_url, 5).await?;
    trackquiz_db::migrate(&pool).await?;

    bot::run_bot(pool, config.bot_token).await
}
