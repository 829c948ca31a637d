//! HTTP-level tests for the HoodPay client against a mock provider.

use hoodpay_client::{HoodPayClient, HoodPayConfig};
use hoodpay_core::{Credentials, PaymentError, PaymentGateway, PaymentReply, PaymentRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HoodPayClient {
    HoodPayClient::new(HoodPayConfig::default().with_api_base_url(server.uri())).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("k1", "b1")
}

#[tokio::test]
async fn fetch_without_credentials_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for creds in [
        Credentials::default(),
        Credentials::new("k1", ""),
        Credentials::new("", "b1"),
    ] {
        let err = client.fetch_transactions(&creds).await.unwrap_err();
        assert!(matches!(err, PaymentError::Configuration(_)), "{:?}", err);
        assert_eq!(
            err.user_message(),
            "API Key or Business ID is not configured."
        );
    }
}

#[tokio::test]
async fn fetch_returns_exact_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/businesses/b1/payments"))
        .and(header("authorization", "Bearer k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "pay_1",
                "amount": 100,
                "currency": "USD",
                "status": "COMPLETED",
                "createdAt": "2024-05-06T07:08:09Z"
            },
            {
                "id": "pay_2",
                "amount": "12.50",
                "currency": "EUR",
                "status": "PENDING",
                "createdAt": "2024-05-07 10:11:12"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let transactions = client_for(&server)
        .fetch_transactions(&credentials())
        .await
        .unwrap();

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].id, "pay_1");
    assert_eq!(transactions[0].amount, "100");
    assert_eq!(transactions[0].created_at_display(), "2024-05-06 07:08:09");
    assert_eq!(transactions[1].id, "pay_2");
    assert_eq!(transactions[1].amount, "12.50");
    assert_eq!(transactions[1].currency, "EUR");
    assert_eq!(transactions[1].created_at_display(), "2024-05-07 10:11:12");
}

#[tokio::test]
async fn fetch_passes_provider_error_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/businesses/b1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "x" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_transactions(&credentials())
        .await
        .unwrap_err();

    match err {
        PaymentError::ProviderError { ref message, .. } => assert_eq!(message, "x"),
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_ignores_null_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/businesses/b1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": null,
            "data": [{ "id": "p1" }]
        })))
        .mount(&server)
        .await;

    let transactions = client_for(&server)
        .fetch_transactions(&credentials())
        .await
        .unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, "p1");
}

#[tokio::test]
async fn fetch_non_success_uses_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_transactions(&credentials())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Unauthorized");
}

#[tokio::test]
async fn fetch_transport_failure_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HoodPayClient::new(
        HoodPayConfig::default()
            .with_api_base_url(uri)
            .with_timeout_secs(2),
    )
    .unwrap();

    let err = client.fetch_transactions(&credentials()).await.unwrap_err();
    assert!(matches!(err, PaymentError::NetworkError(_)), "{:?}", err);
    assert!(err.is_retryable());
    assert_eq!(
        err.user_message(),
        "Failed to fetch transactions. Please try again later."
    );
}

#[tokio::test]
async fn fetch_non_json_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_transactions(&credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Serialization(_)), "{:?}", err);
}

#[tokio::test]
async fn create_payment_posts_fixed_payload() {
    let server = MockServer::start().await;
    let request = PaymentRequest::fixed_order("https://shop.example");

    Mock::given(method("POST"))
        .and(path("/v1/businesses/b1/payments"))
        .and(header("authorization", "Bearer k1"))
        .and(body_json(json!({
            "name": "Payment for Order",
            "description": "Order description",
            "currency": "USD",
            "amount": 100,
            "redirectUrl": "https://shop.example/payment-success"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "paymentUrl": "https://pay/xyz" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .create_payment(&credentials(), &request)
        .await
        .unwrap();

    assert_eq!(
        reply,
        PaymentReply {
            payment_url: Some("https://pay/xyz".into()),
            message: None,
        }
    );
}

#[tokio::test]
async fn create_payment_declined_keeps_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "declined" })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .create_payment(&credentials(), &PaymentRequest::fixed_order("https://shop.example"))
        .await
        .unwrap();

    assert_eq!(reply.payment_url, None);
    assert_eq!(reply.message.as_deref(), Some("declined"));
}

#[tokio::test]
async fn create_payment_null_error_is_not_a_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": null })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .create_payment(&credentials(), &PaymentRequest::fixed_order("https://shop.example"))
        .await
        .unwrap();

    assert_eq!(reply, PaymentReply::default());
}

#[tokio::test]
async fn create_payment_without_credentials_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_payment(
            &Credentials::default(),
            &PaymentRequest::fixed_order("https://shop.example"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::Configuration(_)));
}
