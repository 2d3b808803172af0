use anyhow::Result;
use sqlx::SqlitePool;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize tracing once for entire process
    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let _guard = init_tracing()?;

    tracing::info!("🚀 Starting trackquiz unified server");

    let config = config::UnifiedConfig::from_env()?;
    tracing::info!("✓ Configuration loaded");

    let pool =
        trackquiz_db::connect(&config.core.database_url, config.core.db_max_connections).await?;
    trackquiz_db::migrate(&pool).await?;

    // Shutdown coordination
    let shutdown = CancellationToken::new();

    let admin_handle = spawn_admin(pool.clone(), config.clone(), shutdown.clone());
    let bot_handle = spawn_bot(pool.clone(), config.clone(), shutdown.clone());

    tracing::info!("✓ All services started");

    wait_for_shutdown().await;
    tracing::info!("📡 Shutdown signal received");

    shutdown.cancel();

    let _ = tokio::join!(admin_handle, bot_handle);

    tracing::info!("✓ All services stopped gracefully");
    Ok(())
}

fn spawn_admin(
    pool: SqlitePool,
    config: config::UnifiedConfig,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let bot = teloxide::Bot::new(&config.core.telegram_bot_token);
        let state = admin::AppState::new(pool, bot, config.admin);

        tokio::select! {
            result = admin::run_admin(state) => {
                tracing::error!("Admin service exited: {:?}", result);
                result.map_err(|e| anyhow::anyhow!(e))
            }
            _ = shutdown.cancelled() => {
                tracing::info!("Admin service shutting down");
                Ok(())
            }
        }
    })
}

fn spawn_bot(
    pool: SqlitePool,
    config: config::UnifiedConfig,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let bot_token = config.core.telegram_bot_token.clone();

        tokio::select! {
            result = bot::run_bot(pool, bot_token) => {
                tracing::error!("Bot service exited: {:?}", result);
                result
            }
            _ = shutdown.cancelled() => {
                tracing::info!("Bot service shutting down");
                Ok(())
            }
        }
    })
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_tracing() -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,admin=debug,bot=debug,sqlx=warn".into());

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let enable_file_logging = std::env::var("ENABLE_FILE_LOGGING")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true);

    if enable_file_logging {
        let file_appender = tracing_appender::rolling::daily("logs", "trackquiz.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .json();

        registry.with(file_layer).init();

        Ok(Some(guard))
    } else {
        registry.init();
        Ok(None)
    }
}
