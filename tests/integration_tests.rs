//! Integration tests for the snapscan client against a mock API

use async_trait::async_trait;
use base64::Engine;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use snapscan::{
    ApiRequest, QrCodeOptions, QueryParams, ResolvedRequest, SnapScanClient, SnapScanConfig,
    SnapScanError, Transport,
};

const API_KEY: &str = "test-api-key";

fn expected_auth_header() -> String {
    let credentials = base64::engine::general_purpose::STANDARD.encode(format!("{}:", API_KEY));
    format!("Basic {}", credentials)
}

fn client_for(server: &Server) -> SnapScanClient {
    let config = SnapScanConfig::new(API_KEY, "m1").with_api_base_url(server.url());
    SnapScanClient::new(config).unwrap()
}

#[tokio::test]
async fn test_get_payments_passes_body_through() {
    let mut server = Server::new_async().await;
    let body = json!([
        {"id": 1, "status": "completed", "totalAmount": 1050},
        {"id": 2, "status": "pending", "totalAmount": 300}
    ]);
    let m = server
        .mock("GET", "/payments")
        .match_header("authorization", expected_auth_header().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".to_string(), "2".to_string()),
            Matcher::UrlEncoded("status".to_string(), "completed".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .get_payments(
            QueryParams::new()
                .with("page", 2)
                .with("status", "completed"),
        )
        .await
        .unwrap();

    assert_eq!(response, body);
    m.assert_async().await;
}

#[tokio::test]
async fn test_get_payment() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/payments/42")
        .match_header("authorization", expected_auth_header().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": 42, "status": "completed"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let payment = client.get_payment("42").await.unwrap();

    assert_eq!(payment["id"], 42);
    assert_eq!(payment["status"], "completed");
    m.assert_async().await;
}

#[tokio::test]
async fn test_get_cash_up_payments() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/payments/cash_ups/cu-2024-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"id": 5}]).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let payments = client.get_cash_up_payments("cu-2024-01").await.unwrap();

    assert_eq!(payments, json!([{"id": 5}]));
    m.assert_async().await;
}

#[tokio::test]
async fn test_cash_up_posts() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/cash_ups")
        .match_header("authorization", expected_auth_header().as_str())
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"reference": "cu-1", "totalAmount": 10000}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let cash_up = client.cash_up().await.unwrap();

    assert_eq!(cash_up["reference"], "cu-1");
    m.assert_async().await;
}

#[tokio::test]
async fn test_get_cash_ups() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/cash_ups")
        .match_query(Matcher::UrlEncoded("perPage".to_string(), "5".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([]).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let cash_ups = client
        .get_cash_ups(QueryParams::new().with("perPage", 5))
        .await
        .unwrap();

    assert_eq!(cash_ups, json!([]));
    m.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_not_an_error() {
    let mut server = Server::new_async().await;
    let body = json!({"status": "error", "message": "Payment not found"});
    let _m = server
        .mock("GET", "/payments/999")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client.get_payment("999").await.unwrap();

    assert_eq!(response, body);
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/cash_ups")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.cash_up().await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_request_with_absolute_url() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/elsewhere")
        .match_header("authorization", expected_auth_header().as_str())
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    // Base URL points nowhere; the override must win.
    let config = SnapScanConfig::new(API_KEY, "m1").with_api_base_url("http://127.0.0.1:1");
    let client = SnapScanClient::new(config).unwrap();
    let response = client
        .request(ApiRequest::default().with_url(format!("{}/elsewhere", server.url())))
        .await
        .unwrap();

    assert_eq!(response, json!({}));
    m.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    let config = SnapScanConfig::new(API_KEY, "m1").with_api_base_url("http://127.0.0.1:1");
    let client = SnapScanClient::new(config).unwrap();

    let err = client.get_payments(QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, SnapScanError::Http(_)));
    assert!(!err.is_local());
}

/// Counts calls and fails every one of them
#[derive(Clone, Default)]
struct FailingTransport {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: &ResolvedRequest) -> snapscan::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SnapScanError::config("transport offline"))
    }
}

#[tokio::test]
async fn test_transport_error_propagates_unchanged() {
    let transport = FailingTransport::default();
    let calls = transport.calls.clone();
    let client =
        SnapScanClient::with_transport(SnapScanConfig::new(API_KEY, "m1"), transport).unwrap();

    let err = client.get_payments(QueryParams::new()).await.unwrap_err();
    match err {
        SnapScanError::Config { message } => assert_eq!(message, "transport offline"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_validation_errors_skip_the_transport() {
    let transport = FailingTransport::default();
    let calls = transport.calls.clone();
    let client =
        SnapScanClient::with_transport(SnapScanConfig::new(API_KEY, "m1"), transport).unwrap();

    let err = client.get_cash_up_payments("").await.unwrap_err();
    assert!(matches!(err, SnapScanError::Validation { .. }));

    let err = client.request(None::<ApiRequest>).await.unwrap_err();
    assert!(matches!(err, SnapScanError::MissingRequest));

    let err = client
        .get_qr_code(&QrCodeOptions::new().with_snap_code_size(10))
        .await
        .unwrap_err();
    assert!(matches!(err, SnapScanError::Validation { .. }));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_qr_code_from_untyped_options() {
    let client = SnapScanClient::new(SnapScanConfig::new(API_KEY, "m1")).unwrap();
    let options = QrCodeOptions::from_pairs([
        ("id", "42"),
        ("amount", "10.50"),
        ("strict", "true"),
        ("custom", "x"),
    ])
    .unwrap();

    let qr = client.get_qr_code(&options).await.unwrap();
    assert_eq!(
        qr.url_link,
        "https://pos.snapscan.io/qr/m1?id=42&amount=10.50&strict=true&custom=x"
    );
    assert_eq!(
        qr.image_link,
        "https://pos.snapscan.io/qr/m1.svg?id=42&amount=10.50&strict=true&snap_code_size=125&custom=x"
    );
}

#[test]
fn test_construction_fails_synchronously() {
    for (api_key, merchant) in [("", "m1"), ("key", ""), ("", "")] {
        let result = SnapScanClient::new(SnapScanConfig::new(api_key, merchant));
        assert!(
            matches!(result, Err(SnapScanError::Config { .. })),
            "expected config error for ({:?}, {:?})",
            api_key,
            merchant
        );
    }
}
