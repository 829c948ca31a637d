//! # Routes
//!
//! Axum router configuration for the HoodPay gateway.

use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Admin (admin token required):
///   - GET  /admin/transactions - Payments listed from HoodPay
///   - GET  /admin/settings - Credentials form
///   - POST /admin/settings - Save credentials
///
/// - Public:
///   - POST /api/v1/payments - Create a payment, returns the hosted URL
///   - GET  /embed/payment-button - Button snippet for other pages
///   - GET  /pay - Checkout page with shortcodes expanded
///   - GET  /payment-success - Provider redirect landing page
///   - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/transactions", get(handlers::transactions_page))
        .route(
            "/settings",
            get(handlers::settings_page).post(handlers::save_settings),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    // The button may be embedded on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        .route(handlers::PAYMENTS_ENDPOINT, post(handlers::create_payment))
        .route("/embed/payment-button", get(handlers::payment_button))
        .layer(cors);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/pay", get(handlers::checkout_page))
        .route("/payment-success", get(handlers::payment_success))
        .nest("/admin", admin_routes)
        .merge(public_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
