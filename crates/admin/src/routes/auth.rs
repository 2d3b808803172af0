//! Login/logout for the admin panel

use crate::{AppState, session, templates};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

async fn login_form() -> Html<String> {
    Html(templates::login_page(None))
}

async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if form.password == state.config.admin_password {
        let value = session::issue(&state.config.session_secret, state.config.session_ttl_secs);
        let cookie = session::set_cookie(&value, state.config.session_ttl_secs);

        tracing::info!("Admin logged in");

        ([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response()
    } else {
        tracing::warn!("Failed admin login attempt");

        (
            StatusCode::UNAUTHORIZED,
            Html(templates::login_page(Some("Wrong password"))),
        )
            .into_response()
    }
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, session::clear_cookie())],
        Redirect::to("/admin/login"),
    )
        .into_response()
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_form).post(login_submit))
        .route("/admin/logout", get(logout))
}
