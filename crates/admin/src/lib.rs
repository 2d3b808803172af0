//! Trackquiz admin panel
//!
//! Session-protected web UI for track CRUD, broadcasts and database
//! backup/restore.

pub mod config;
mod error;
mod routes;
mod session;
mod templates;

use axum::extract::FromRef;
use axum::{Router, middleware as axum_middleware};
use sqlx::SqlitePool;
use std::sync::Arc;
use teloxide::Bot;
use tower_http::trace::TraceLayer;
use trackquiz_db::{BroadcastStore, TrackStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tracks: TrackStore,
    pub users: UserStore,
    pub broadcasts: BroadcastStore,
    pub bot: Bot,
    pub config: Arc<config::Config>,
}

impl AppState {
    /// Wire the stores from a shared pool.
    pub fn new(pool: SqlitePool, bot: Bot, config: config::Config) -> Self {
        Self {
            tracks: TrackStore::new(pool.clone()),
            users: UserStore::new(pool.clone()),
            broadcasts: BroadcastStore::new(pool.clone()),
            pool,
            bot,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let protected = routes::tracks::routes()
        .merge(routes::broadcasts::routes())
        .merge(routes::backup::routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session::require_admin,
        ));

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .merge(protected)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Run the admin panel server
///
/// This function starts the HTTP server and blocks until it exits.
pub async fn run_admin(state: AppState) -> Result<(), std::io::Error> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);

    tracing::info!("Admin panel listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
