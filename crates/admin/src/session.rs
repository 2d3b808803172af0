//! Session cookie handling
//!
//! Stateless sessions: the cookie carries an expiry timestamp and an
//! HMAC-SHA256 tag over it, signed with `SESSION_SECRET`. No server-side
//! session store.

use crate::AppState;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "trackquiz_admin";

fn mac_for(secret: &str, expires_at: i64) -> HmacSha256 {
    // HMAC accepts keys of any length, new_from_slice cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key of any length");
    mac.update(format!("admin:{expires_at}").as_bytes());
    mac
}

/// Produce a signed session value: `"{expiry}:{hex tag}"`.
pub fn issue(secret: &str, ttl_secs: i64) -> String {
    let expires_at = Utc::now().timestamp() + ttl_secs;
    let tag = mac_for(secret, expires_at).finalize().into_bytes();
    format!("{expires_at}:{}", hex::encode(tag))
}

/// Check a session value: signature must match and the expiry must be in
/// the future.
pub fn verify(secret: &str, value: &str, now: i64) -> bool {
    let Some((expiry_str, tag_hex)) = value.split_once(':') else {
        return false;
    };
    let Ok(expires_at) = expiry_str.parse::<i64>() else {
        return false;
    };
    if expires_at <= now {
        return false;
    }
    let Ok(tag) = hex::decode(tag_hex) else {
        return false;
    };

    mac_for(secret, expires_at).verify_slice(&tag).is_ok()
}

/// `Set-Cookie` value establishing the session.
pub fn set_cookie(value: &str, ttl_secs: i64) -> String {
    format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

/// `Set-Cookie` value clearing the session.
pub fn clear_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull a cookie value out of a `Cookie` request header.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Middleware guarding the admin pages: unauthenticated requests are
/// redirected to the login form.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authenticated = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| cookie_value(cookies, COOKIE_NAME))
        .is_some_and(|value| {
            verify(
                &state.config.session_secret,
                value,
                Utc::now().timestamp(),
            )
        });

    if authenticated {
        next.run(request).await
    } else {
        Redirect::to("/admin/login").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_verify_round_trip() {
        let value = issue(SECRET, 600);
        assert!(verify(SECRET, &value, Utc::now().timestamp()));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let value = issue(SECRET, 600);
        assert!(!verify("other-secret", &value, Utc::now().timestamp()));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let value = issue(SECRET, 600);
        let far_future = Utc::now().timestamp() + 601;
        assert!(!verify(SECRET, &value, far_future));
    }

    #[test]
    fn test_tampered_expiry_is_rejected() {
        let value = issue(SECRET, 600);
        let (_, tag) = value.split_once(':').unwrap();
        let forged = format!("{}:{}", i64::MAX, tag);
        assert!(!verify(SECRET, &forged, Utc::now().timestamp()));
    }

    #[test]
    fn test_garbage_values_are_rejected() {
        let now = Utc::now().timestamp();
        assert!(!verify(SECRET, "", now));
        assert!(!verify(SECRET, "no-colon", now));
        assert!(!verify(SECRET, "123:not-hex", now));
        assert!(!verify(SECRET, "abc:00ff", now));
    }

    #[test]
    fn test_cookie_value_parsing() {
        let header = "foo=bar; trackquiz_admin=123:abcd; other=x";
        assert_eq!(cookie_value(header, COOKIE_NAME), Some("123:abcd"));
        assert_eq!(cookie_value(header, "foo"), Some("bar"));
        assert_eq!(cookie_value(header, "missing"), None);
    }
}
