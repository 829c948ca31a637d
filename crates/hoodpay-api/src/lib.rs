//! # hoodpay-api
//!
//! HTTP layer for the HoodPay gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Admin pages for credentials and transactions
//! - A server-side payment endpoint, so the API key never reaches a browser
//! - The embeddable payment button and `[hoodpay_payment]` shortcode
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/admin/transactions` | Transactions list (admin) |
//! | GET/POST | `/admin/settings` | Credentials form (admin) |
//! | POST | `/api/v1/payments` | Create payment |
//! | GET | `/embed/payment-button` | Button snippet |
//! | GET | `/pay` | Checkout page |
//! | GET | `/payment-success` | Redirect landing page |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod shortcode;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
