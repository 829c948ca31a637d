//! # Payment Button
//!
//! Click handling for the embeddable payment button, independent of any
//! browser API so it can be unit tested. One request may be in flight at a
//! time; further clicks are ignored until it settles.

use crate::error::GENERIC_FAILURE_MESSAGE;
use crate::payment::{PaymentOutcome, PaymentReply};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the page should do once a request settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Full-page navigation (same tab)
    Redirect(String),
    /// Show an alert and stay
    Alert(String),
}

/// Button state shared between the click handler and its continuation
#[derive(Debug, Clone, Default)]
pub struct PaymentButton {
    in_flight: Arc<AtomicBool>,
}

impl PaymentButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Returns `None` while another one is running.
    pub fn begin(&self) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: Arc::clone(&self.in_flight),
                release: true,
            })
    }

    /// True while a request is running (or after a redirect was issued)
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of one payment request. Dropping it re-enables the
/// button.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
    release: bool,
}

impl InFlightGuard {
    /// Settle with the payment endpoint's JSON body.
    ///
    /// A redirect leaves the button disabled while the page navigates away.
    pub fn resolve(mut self, body: &str) -> ButtonAction {
        match serde_json::from_str::<PaymentReply>(body) {
            Ok(reply) => match reply.outcome() {
                PaymentOutcome::Redirect(url) => {
                    self.release = false;
                    ButtonAction::Redirect(url)
                }
                PaymentOutcome::Rejected(message) => ButtonAction::Alert(message),
            },
            Err(_) => ButtonAction::Alert(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }

    /// Settle after a transport failure
    pub fn fail(self) -> ButtonAction {
        ButtonAction::Alert(GENERIC_FAILURE_MESSAGE.to_string())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.release {
            self.flag.store(false, Ordering::Release);
        }
    }
}
