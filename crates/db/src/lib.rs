//! Trackquiz persistence layer
//!
//! SQLite-backed stores for tracks, play history, users and broadcasts.
//! Each store is a cheap cloneable handle around the shared pool; every
//! call is a single atomic read or write, nothing here spans a multi-store
//! transaction.

mod broadcasts;
mod history;
mod tracks;
mod users;

pub use broadcasts::BroadcastStore;
pub use history::PlayHistoryStore;
pub use tracks::TrackStore;
pub use users::UserStore;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Connection, SqliteConnection, SqlitePool};
use std::str::FromStr;
use trackquiz_core::error::GameResult;

/// Open the SQLite pool, creating the database file if it is missing.
pub async fn connect(database_url: &str, max_connections: u32) -> GameResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("✓ Database pool established (max_connections: {max_connections})");

    Ok(pool)
}

/// Run pending migrations.
pub async fn migrate(pool: &SqlitePool) -> GameResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| trackquiz_core::GameError::StorageUnavailable(e.to_string()))?;

    tracing::info!("✓ Migrations completed");

    Ok(())
}

/// Tables copied by [`restore_from_file`], in insert order.
const RESTORED_TABLES: [&str; 4] = ["users", "tracks", "play_history", "broadcasts"];

/// Replace the live data with the contents of another database file.
///
/// The copy runs through the open pool (ATTACH plus a transactional
/// per-table copy), so every service sharing the pool sees the restored
/// data immediately. A source that is not a valid database with the
/// expected schema fails the transaction and leaves the current data
/// untouched.
pub async fn restore_from_file(pool: &SqlitePool, source_path: &str) -> GameResult<()> {
    let mut conn = pool.acquire().await?;

    // ATTACH cannot run inside a transaction, so it brackets the copy.
    sqlx::query("ATTACH DATABASE ? AS restore_src")
        .bind(source_path)
        .execute(&mut *conn)
        .await?;

    let copied = copy_restored_tables(&mut conn).await;

    let detached = sqlx::query("DETACH DATABASE restore_src")
        .execute(&mut *conn)
        .await;

    copied?;
    detached?;

    tracing::warn!("Database restored from {source_path}, previous contents replaced");

    Ok(())
}

async fn copy_restored_tables(conn: &mut SqliteConnection) -> GameResult<()> {
    let mut tx = conn.begin().await?;

    for table in RESTORED_TABLES {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!(
            "INSERT INTO {table} SELECT * FROM restore_src.{table}"
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}
