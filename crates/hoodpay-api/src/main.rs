//! # HoodPay Gateway
//!
//! Accept HoodPay payments from any website.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export ADMIN_TOKEN=...
//! export BASE_URL=https://shop.example
//!
//! # Run the server, then save credentials at /admin/settings
//! hoodpay-gateway
//! ```

use hoodpay_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    if state.config.admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set; admin pages will refuse every request");
    }
    match state.credentials() {
        Ok(credentials) if credentials.is_complete() => {
            info!("HoodPay business: {}", credentials.business_id)
        }
        Ok(_) => warn!("HoodPay credentials not configured yet"),
        Err(e) => warn!("Could not read settings: {}", e),
    }

    let app = routes::create_router(state);

    info!("HoodPay gateway starting on http://{}", addr);

    if !is_prod {
        info!("Settings: http://{}/admin/settings", addr);
        info!("Transactions: http://{}/admin/transactions", addr);
        info!("Checkout: http://{}/pay", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  HoodPay Gateway
  ━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
