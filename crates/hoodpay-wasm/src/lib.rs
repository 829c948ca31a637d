//! # hoodpay-wasm
//!
//! WebAssembly payment button for the HoodPay gateway.
//!
//! The button talks only to the gateway's own `/api/v1/payments` endpoint;
//! the HoodPay API key stays on the server. One request may be in flight at
//! a time; extra clicks resolve to `false` without sending anything.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { HoodPayButton } from 'hoodpay-wasm';
//!
//! await init();
//!
//! const button = new HoodPayButton('https://shop.example/api/v1/payments');
//! document.querySelectorAll('.hoodpay-initiate-payment')
//!   .forEach((el) => el.addEventListener('click', () => button.click()));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use hoodpay_core::{ButtonAction, PaymentButton};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Request, RequestInit, Response};

/// Payment button bound to a gateway endpoint
#[wasm_bindgen]
pub struct HoodPayButton {
    state: PaymentButton,
    endpoint: String,
}

#[wasm_bindgen]
impl HoodPayButton {
    #[wasm_bindgen(constructor)]
    pub fn new(endpoint: String) -> Self {
        Self {
            state: PaymentButton::new(),
            endpoint,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    /// True while a request is running or a redirect is under way
    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Handle a click.
    ///
    /// Resolves to `true` once the request settled (redirect issued or alert
    /// shown), `false` if the click was ignored because one is in flight.
    pub fn click(&self) -> Promise {
        let Some(guard) = self.state.begin() else {
            return Promise::resolve(&JsValue::FALSE);
        };
        let endpoint = self.endpoint.clone();

        future_to_promise(async move {
            let action = match post_payment(&endpoint).await {
                Ok(body) => guard.resolve(&body),
                Err(err) => {
                    web_sys::console::error_2(&JsValue::from_str("Error:"), &err);
                    guard.fail()
                }
            };
            apply(&action)?;
            Ok(JsValue::TRUE)
        })
    }
}

/// POST to the payment endpoint and return the body text
async fn post_payment(endpoint: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let init = RequestInit::new();
    init.set_method("POST");

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    request.headers().set("Accept", "application/json")?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

fn apply(action: &ButtonAction) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    match action {
        ButtonAction::Redirect(url) => window.location().set_href(url),
        ButtonAction::Alert(message) => window.alert_with_message(message),
    }
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_button_is_idle() {
        let button = HoodPayButton::new("https://shop.example/api/v1/payments".to_string());
        assert!(!button.busy());
        assert_eq!(button.endpoint(), "https://shop.example/api/v1/payments");
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
