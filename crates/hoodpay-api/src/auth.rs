//! # Admin Gate
//!
//! Every `/admin` route requires the admin token, presented either as
//! `Authorization: Bearer <token>` or as an `admin_token` cookie.
//! The settings form additionally carries a nonce derived from that token.

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap, StatusCode,
    },
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

/// Action name the settings nonce is bound to
pub const SAVE_SETTINGS_ACTION: &str = "hoodpay_save_settings";

/// Cookie carrying the admin token for browser sessions
pub const ADMIN_COOKIE: &str = "admin_token";

type HmacSha256 = Hmac<Sha256>;

/// Reject requests that do not present the admin token
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.config.admin_token.as_deref() else {
        warn!("Admin request refused: ADMIN_TOKEN is not configured");
        return forbidden();
    };

    match presented_token(request.headers()) {
        Some(token) if constant_time_compare(&token, expected) => next.run(request).await,
        _ => {
            warn!("Admin request refused: {} {}", request.method(), request.uri().path());
            forbidden()
        }
    }
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Html("<p>Sorry, you are not allowed to access this page.</p>"),
    )
        .into_response()
}

/// Bearer token first, then the cookie
fn presented_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.trim().to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ADMIN_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Hex HMAC-SHA256 of the save-settings action keyed by the admin token
pub fn settings_nonce(admin_token: &str) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(admin_token.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(SAVE_SETTINGS_ACTION.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a submitted nonce against the admin token
pub fn verify_settings_nonce(admin_token: &str, nonce: &str) -> bool {
    constant_time_compare(nonce, &settings_nonce(admin_token))
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
