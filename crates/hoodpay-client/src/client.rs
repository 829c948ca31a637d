//! # HoodPay Payments API
//!
//! List and create payments under `/v1/businesses/{businessId}/payments`.

use crate::config::{key_fingerprint, HoodPayConfig};
use async_trait::async_trait;
use hoodpay_core::{
    Credentials, PaymentError, PaymentGateway, PaymentReply, PaymentRequest, PaymentResult,
    Transaction,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// HoodPay REST client
#[derive(Debug, Clone)]
pub struct HoodPayClient {
    config: HoodPayConfig,
    client: Client,
}

impl HoodPayClient {
    /// Create a new client
    pub fn new(config: HoodPayConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(HoodPayConfig::from_env()?)
    }

    pub fn config(&self) -> &HoodPayConfig {
        &self.config
    }

    /// `{base}/v1/businesses/{businessId}/payments`, with the ID percent-encoded
    pub fn payments_url(&self, business_id: &str) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!(
                "Invalid HoodPay API base URL {}: {}",
                self.config.api_base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration(format!(
                    "HoodPay API base URL cannot carry a path: {}",
                    self.config.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "businesses", business_id, "payments"]);

        Ok(url)
    }

    /// Read the body as JSON, mapping body-read failures to transport errors
    async fn read_json(response: reqwest::Response) -> PaymentResult<(StatusCode, Value)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let value = serde_json::from_str(&body).map_err(|e| {
            error!("HoodPay returned non-JSON body: status={}, body={}", status, body);
            PaymentError::Serialization(format!("Failed to parse HoodPay response: {}", e))
        })?;

        Ok((status, value))
    }
}

/// Text of a provider-reported error field
fn error_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// The `error` field, unless absent or null
fn provider_error(body: &Value) -> Option<&Value> {
    body.get("error").filter(|err| !err.is_null())
}

/// Accept a bare list or a `{ "data": [...] }` envelope
fn transaction_list(value: Value) -> PaymentResult<Vec<Transaction>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => {
                return Err(PaymentError::Serialization(
                    "Expected a list of payments".to_string(),
                ))
            }
        },
        _ => {
            return Err(PaymentError::Serialization(
                "Expected a list of payments".to_string(),
            ))
        }
    };

    serde_json::from_value(list)
        .map_err(|e| PaymentError::Serialization(format!("Malformed payment in list: {}", e)))
}

#[async_trait]
impl PaymentGateway for HoodPayClient {
    #[instrument(
        skip(self, credentials),
        fields(business_id = %credentials.business_id, key = %key_fingerprint(&credentials.api_key))
    )]
    async fn fetch_transactions(&self, credentials: &Credentials) -> PaymentResult<Vec<Transaction>> {
        credentials.require_complete()?;

        let url = self.payments_url(&credentials.business_id)?;
        debug!("Fetching HoodPay payments: {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, credentials.auth_header())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("HoodPay transport error: {}", e);
                PaymentError::NetworkError(e.to_string())
            })?;

        let (status, body) = Self::read_json(response).await?;

        if let Some(err) = provider_error(&body) {
            let message = error_text(err);
            error!("HoodPay API error: status={}, error={}", status, message);
            return Err(PaymentError::provider(message));
        }

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status));
            error!("HoodPay API error: status={}, message={}", status, message);
            return Err(PaymentError::provider(message));
        }

        let transactions = transaction_list(body)?;
        info!("Fetched {} HoodPay payments", transactions.len());
        Ok(transactions)
    }

    #[instrument(
        skip(self, credentials, request),
        fields(business_id = %credentials.business_id, amount = request.amount, currency = %request.currency)
    )]
    async fn create_payment(
        &self,
        credentials: &Credentials,
        request: &PaymentRequest,
    ) -> PaymentResult<PaymentReply> {
        credentials.require_complete()?;

        let url = self.payments_url(&credentials.business_id)?;
        debug!("Creating HoodPay payment: {}", url);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, credentials.auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("HoodPay transport error: {}", e);
                PaymentError::NetworkError(e.to_string())
            })?;

        let (status, body) = Self::read_json(response).await?;

        let reply = PaymentReply {
            payment_url: body
                .get("paymentUrl")
                .and_then(Value::as_str)
                .map(String::from),
            message: body
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .or_else(|| provider_error(&body).map(error_text)),
        };

        match &reply.payment_url {
            Some(payment_url) => info!("Created HoodPay payment: url={}", payment_url),
            None => error!(
                "HoodPay did not return a payment URL: status={}, message={:?}",
                status, reply.message
            ),
        }

        Ok(reply)
    }

    fn provider_name(&self) -> &'static str {
        "hoodpay"
    }
}
