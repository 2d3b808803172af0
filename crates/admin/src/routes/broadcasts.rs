//! Broadcast pages: compose a message and deliver it to every known user

use crate::error::AdminError;
use crate::{AppState, templates};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use teloxide::prelude::*;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sent: Option<u64>,
    pub failed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastForm {
    pub body: String,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AdminError> {
    let broadcasts = state.broadcasts.list().await?;
    let status = query.sent.map(|s| (s, query.failed.unwrap_or(0)));

    Ok(Html(templates::broadcasts_page(&broadcasts, status)))
}

async fn new_form() -> Html<String> {
    Html(templates::broadcast_new_page(None))
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<BroadcastForm>,
) -> Result<Response, AdminError> {
    let body = form.body.trim().to_string();
    if body.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(templates::broadcast_new_page(Some("Message text is empty"))),
        )
            .into_response());
    }

    let users = state.users.all_ids().await?;
    if users.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(templates::broadcast_new_page(Some(
                "No users to broadcast to",
            ))),
        )
            .into_response());
    }

    let broadcast = state.broadcasts.create(&body).await?;

    // Best-effort delivery. Blocked bots and deleted accounts only count
    // as failures, they never abort the run.
    let mut sent: u64 = 0;
    let mut failed: u64 = 0;
    for user_id in users {
        match state.bot.send_message(ChatId(user_id), body.as_str()).await {
            Ok(_) => sent += 1,
            Err(e) => {
                tracing::warn!("Broadcast {} to user {} failed: {}", broadcast.id, user_id, e);
                failed += 1;
            }
        }
    }

    state.broadcasts.mark_sent(broadcast.id).await?;

    tracing::info!(
        "Broadcast {} delivered: {} sent, {} failed",
        broadcast.id,
        sent,
        failed
    );

    Ok(Redirect::to(&format!("/admin/broadcasts?sent={sent}&failed={failed}")).into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/broadcasts", get(list).post(create))
        .route("/admin/broadcasts/new", get(new_form))
}
