//! Whole-file database backup and restore
//!
//! Backup streams a copy of the SQLite file. Restore stages the upload in a
//! temp file and imports it through the live pool, so the bot and the admin
//! panel pick up the restored data without a restart. Restore is
//! destructive and requires an explicit confirmation field.

use crate::error::AdminError;
use crate::{AppState, templates};
use axum::Router;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use std::io::Write;

#[derive(Debug, Deserialize)]
pub struct BackupQuery {
    pub restore: Option<String>,
}

async fn backup_page(Query(query): Query<BackupQuery>) -> Html<String> {
    Html(templates::backup_page(query.restore.as_deref()))
}

async fn download(State(state): State<AppState>) -> Result<Response, AdminError> {
    let bytes = tokio::fs::read(&state.config.database_path)
        .await
        .map_err(|e| AdminError::Unavailable(format!("Failed to read database file: {e}")))?;

    tracing::info!("Database backup downloaded ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"trackquiz-backup.sqlite3\"".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn restore(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AdminError> {
    let mut data: Option<Vec<u8>> = None;
    let mut confirmed = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AdminError::Validation(format!("Malformed upload: {e}")))?
    {
        match field.name() {
            Some("database") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AdminError::Validation(format!("Malformed upload: {e}")))?;
                if !bytes.is_empty() {
                    data = Some(bytes.to_vec());
                }
            }
            Some("confirm") => {
                let value = field.text().await.unwrap_or_default();
                confirmed = value == "yes";
            }
            _ => {}
        }
    }

    let Some(data) = data else {
        return Ok(Redirect::to("/admin/backup?restore=missing"));
    };
    if !confirmed {
        return Ok(Redirect::to("/admin/backup?restore=missing"));
    }

    let staged = stage_upload(&data)
        .map_err(|e| AdminError::Internal(format!("Failed to stage upload: {e}")))?;
    let staged_path = staged
        .path()
        .to_str()
        .ok_or_else(|| AdminError::Internal("Staged upload path is not UTF-8".to_string()))?;

    if let Err(e) = trackquiz_db::restore_from_file(&state.pool, staged_path).await {
        tracing::error!("Restore failed: {}", e);
        return Ok(Redirect::to("/admin/backup?restore=failed"));
    }

    tracing::warn!("Database restored from upload ({} bytes)", data.len());

    Ok(Redirect::to("/admin/backup?restore=ok"))
}

/// Write the upload to a temp file so SQLite can ATTACH it by path. The
/// file is removed when the handle drops.
fn stage_upload(data: &[u8]) -> std::io::Result<tempfile::NamedTempFile> {
    let mut tmp = tempfile::NamedTempFile::new()?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(tmp)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/backup", get(backup_page))
        .route("/admin/backup/download", get(download))
        .route("/admin/restore", post(restore))
}
