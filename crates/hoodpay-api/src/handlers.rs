//! # Request Handlers
//!
//! Axum request handlers: admin pages, the payment endpoint, and the
//! public pages that embed the payment button.

use crate::auth;
use crate::shortcode::{expand_shortcodes, PAYMENT_SHORTCODE};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Form, Json,
};
use hoodpay_core::{
    sanitize_text_field, save_credentials, PaymentError, PaymentReply, GENERIC_FAILURE_MESSAGE,
    NOT_CONFIGURED_MESSAGE, PAYMENT_FAILED_MESSAGE,
};
use serde::Deserialize;
use std::cell::Cell;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Path of the server-side payment endpoint
pub const PAYMENTS_ENDPOINT: &str = "/api/v1/payments";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Settings form submission
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub business_id: String,
    #[serde(default, rename = "_nonce")]
    pub nonce: String,
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<PaymentReply>) {
    let message = match &err {
        PaymentError::Configuration(_) => NOT_CONFIGURED_MESSAGE.to_string(),
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    };
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(PaymentReply {
            payment_url: None,
            message: Some(message),
        }),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hoodpay-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Admin: list payments from HoodPay
#[instrument(skip(state))]
pub async fn transactions_page(State(state): State<AppState>) -> Html<String> {
    let result = match state.credentials() {
        Ok(credentials) => state.gateway.fetch_transactions(&credentials).await,
        Err(e) => Err(e),
    };

    match &result {
        Ok(transactions) => info!("Rendering {} transactions", transactions.len()),
        Err(e) => warn!("Transactions unavailable: {}", e),
    }

    Html(views::transactions_page(&result))
}

/// Admin: settings form
pub async fn settings_page(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, Html<String>)> {
    render_settings(&state, None)
}

/// Admin: save settings
#[instrument(skip(state, form))]
pub async fn save_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let nonce_ok = state
        .config
        .admin_token
        .as_deref()
        .map(|token| auth::verify_settings_nonce(token, &form.nonce))
        .unwrap_or(false);

    if !nonce_ok {
        warn!("Settings save refused: bad nonce");
        return Err((
            StatusCode::FORBIDDEN,
            Html("<p>The link you followed has expired.</p>".to_string()),
        ));
    }

    let api_key = sanitize_text_field(&form.api_key);
    let business_id = sanitize_text_field(&form.business_id);

    let store = state.settings.clone();
    let (key, id) = (api_key.clone(), business_id.clone());
    tokio::task::spawn_blocking(move || save_credentials(store.as_ref(), &key, &id))
        .await
        .unwrap_or_else(|e| Err(PaymentError::Internal(format!("Settings save task failed: {}", e))))
        .map_err(|e| {
            error!("Failed to save settings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<p>{}</p>", hoodpay_core::escape_html(&e.user_message()))),
            )
        })?;

    info!(
        "HoodPay settings saved: business_id={}, key={}",
        business_id,
        hoodpay_client::key_fingerprint(&api_key)
    );

    render_settings(&state, Some("Settings saved."))
}

fn render_settings(
    state: &AppState,
    notice: Option<&str>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let credentials = state.credentials().map_err(|e| {
        error!("Failed to read settings: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<p>{}</p>", hoodpay_core::escape_html(&e.user_message()))),
        )
    })?;

    let nonce = state.settings_nonce().unwrap_or_default();

    Ok(Html(views::settings_page(
        &credentials.api_key,
        &credentials.business_id,
        &nonce,
        notice,
    )))
}

/// Create a payment on behalf of the browser
///
/// Responds `{"paymentUrl": ...}` on success and `{"message": ...}` otherwise.
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
pub async fn create_payment(
    State(state): State<AppState>,
) -> Result<Json<PaymentReply>, (StatusCode, Json<PaymentReply>)> {
    let credentials = state.credentials().map_err(|e| {
        error!("Failed to read settings: {}", e);
        payment_error_to_response(e)
    })?;

    let request = state.payment_request();

    let reply = state
        .gateway
        .create_payment(&credentials, &request)
        .await
        .map_err(|e| {
            error!("Failed to create payment: {}", e);
            payment_error_to_response(e)
        })?;

    match reply.payment_url {
        Some(url) if !url.is_empty() => {
            info!("Payment created, redirecting visitor");
            Ok(Json(PaymentReply {
                payment_url: Some(url),
                message: None,
            }))
        }
        _ => {
            let message = reply
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_string());
            warn!("Payment not created: {}", message);
            Err((
                StatusCode::PAYMENT_REQUIRED,
                Json(PaymentReply {
                    payment_url: None,
                    message: Some(message),
                }),
            ))
        }
    }
}

/// The button snippet for embedding in other pages
pub async fn payment_button(State(state): State<AppState>) -> Html<String> {
    let id = format!("{}-{}", views::BUTTON_CLASS, Uuid::new_v4().simple());
    Html(views::payment_button(&id, &state.config.url_for(PAYMENTS_ENDPOINT)))
}

/// Configured checkout page with shortcodes expanded
///
/// Each tag becomes its own button; the click script is added once.
pub async fn checkout_page(State(state): State<AppState>) -> Html<String> {
    let endpoint = state.config.url_for(PAYMENTS_ENDPOINT);
    let buttons = Cell::new(0usize);
    let mut content = expand_shortcodes(&state.config.checkout_page, |name| {
        (name == PAYMENT_SHORTCODE).then(|| {
            buttons.set(buttons.get() + 1);
            let id = format!("{}-{}", views::BUTTON_CLASS, buttons.get());
            views::payment_button_markup(&id, &endpoint)
        })
    });
    if buttons.get() > 0 {
        content.push('\n');
        content.push_str(&views::payment_script());
    }
    Html(views::public_page("Checkout", &content))
}

/// Landing page for the provider redirect
pub async fn payment_success() -> Html<String> {
    Html(views::payment_success_page())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_response() {
        let (status, Json(body)) = payment_error_to_response(PaymentError::not_configured());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message.as_deref(), Some(NOT_CONFIGURED_MESSAGE));
        assert_eq!(body.payment_url, None);
    }

    #[test]
    fn test_network_error_response_is_generic() {
        let (status, Json(body)) =
            payment_error_to_response(PaymentError::NetworkError("refused".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }
}
