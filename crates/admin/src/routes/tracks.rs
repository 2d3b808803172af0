//! Track CRUD pages

use crate::error::AdminError;
use crate::{AppState, templates};
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use trackquiz_core::GameError;
use trackquiz_core::models::{NewTrack, TrackUpdate};

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub flash: Option<String>,
    pub error: Option<String>,
}

/// Track form fields. Points come in as text so that a malformed value
/// falls back to 1 instead of failing form extraction.
#[derive(Debug, Deserialize)]
pub struct TrackForm {
    pub artist: String,
    pub title: String,
    pub points: Option<String>,
    pub hint: Option<String>,
    pub is_active: Option<String>,
}

impl TrackForm {
    fn points_or_default(&self) -> i64 {
        self.points
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

fn redirect_with_error(error: &str) -> Redirect {
    Redirect::to(&format!("/admin?error={}", urlencoding::encode(error)))
}

fn redirect_with_flash(flash: &str) -> Redirect {
    Redirect::to(&format!("/admin?flash={}", urlencoding::encode(flash)))
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AdminError> {
    let tracks = state.tracks.list_all().await?;

    Ok(Html(templates::tracks_page(
        &tracks,
        query.flash.as_deref(),
        query.error.as_deref(),
    )))
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<TrackForm>,
) -> Result<Redirect, AdminError> {
    let new = NewTrack {
        artist: form.artist.clone(),
        title: form.title.clone(),
        points: form.points_or_default(),
        hint: form.hint.clone(),
    };

    match state.tracks.create(new).await {
        Ok(track) => Ok(redirect_with_flash(&format!("Track {} added", track.id))),
        Err(GameError::Validation(msg)) => Ok(redirect_with_error(&msg)),
        Err(e) => Err(e.into()),
    }
}

async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TrackForm>,
) -> Result<Redirect, AdminError> {
    let update = TrackUpdate {
        artist: form.artist.clone(),
        title: form.title.clone(),
        points: form.points_or_default(),
        hint: form.hint.clone(),
        is_active: form.is_active.is_some(),
    };

    match state.tracks.update(id, update).await {
        Ok(track) => Ok(redirect_with_flash(&format!("Track {} saved", track.id))),
        Err(GameError::Validation(msg)) => Ok(redirect_with_error(&msg)),
        Err(GameError::TrackNotFound(id)) => {
            Ok(redirect_with_error(&format!("Track {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AdminError> {
    match state.tracks.deactivate(id).await {
        Ok(()) => Ok(redirect_with_flash(&format!("Track {id} deactivated"))),
        Err(GameError::TrackNotFound(id)) => {
            Ok(redirect_with_error(&format!("Track {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AdminError> {
    match state.tracks.delete(id).await {
        Ok(true) => Ok(redirect_with_flash(&format!("Track {id} deleted"))),
        Ok(false) => Ok(redirect_with_flash(&format!(
            "Track {id} is referenced by play history, deactivated instead"
        ))),
        Err(GameError::TrackNotFound(id)) => {
            Ok(redirect_with_error(&format!("Track {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(index))
        .route("/admin/tracks", post(create))
        .route("/admin/tracks/{id}/edit", post(edit))
        .route("/admin/tracks/{id}/deactivate", post(deactivate))
        .route("/admin/tracks/{id}/delete", post(delete))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(points: Option<&str>) -> TrackForm {
        TrackForm {
            artist: "A".to_string(),
            title: "T".to_string(),
            points: points.map(String::from),
            hint: None,
            is_active: None,
        }
    }

    #[test]
    fn test_points_fall_back_to_one() {
        assert_eq!(form(None).points_or_default(), 1);
        assert_eq!(form(Some("abc")).points_or_default(), 1);
        assert_eq!(form(Some(" 7 ")).points_or_default(), 7);
    }
}
