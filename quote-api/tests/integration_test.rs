use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use quote_api::{app, AppState};
use quote_catalog::SelectionField;
use quote_core::notifier::{NotifyError, SalesNotifier};
use quote_core::repository::QuoteRepository;
use quote_core::QuoteService;
use quote_form::{HttpQuoteBackend, QuoteSession, StatusKind};
use quote_shared::QuoteSubmittedEvent;
use quote_store::{MemoryCatalogRepository, MemoryQuoteRepository};
use serde_json::{json, Value};
use std::sync::Mutex;
use tower::ServiceExt;

const SEED: &str = r#"{
    "options": {
        "aluminums": [{ "id": 1, "name": "Xingfa" }, { "id": 5, "name": "Viet Phap" }],
        "handles": [{ "id": 2, "name": "Bar" }],
        "glasses": [{ "id": 3, "name": "Clear" }],
        "parts": [{ "id": 4, "name": "Door" }]
    },
    "products": [{
        "product_id": "1234",
        "standard_width": 600,
        "standard_height": 2000,
        "standard_depth": 300,
        "price": 1000000,
        "unit": "bộ",
        "material_percentage": 70
    }]
}"#;

#[derive(Default)]
struct CapturingNotifier {
    events: Mutex<Vec<QuoteSubmittedEvent>>,
    fail: bool,
}

#[async_trait]
impl SalesNotifier for CapturingNotifier {
    async fn notify(&self, event: &QuoteSubmittedEvent) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            return Err(NotifyError::Transport("relay offline".to_string()));
        }
        Ok(())
    }
}

struct TestApp {
    router: Router,
    quotes: Arc<MemoryQuoteRepository>,
    notifier: Arc<CapturingNotifier>,
}

fn test_app_with(notifier: CapturingNotifier) -> TestApp {
    let catalog = Arc::new(MemoryCatalogRepository::from_json(SEED).unwrap());
    let quotes = Arc::new(MemoryQuoteRepository::new());
    let notifier = Arc::new(notifier);
    let service = QuoteService::new(catalog, quotes.clone(), notifier.clone());
    TestApp {
        router: app(AppState::new(service)),
        quotes,
        notifier,
    }
}

fn test_app() -> TestApp {
    test_app_with(CapturingNotifier::default())
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn quote_payload() -> Value {
    json!({
        "customerName": "Nguyen Van A",
        "customerPhone": "0901234567",
        "productId": "1234",
        "actualWidth": 600,
        "actualHeight": 2200,
        "actualDepth": 300,
        "quantity": 2,
        "totalPrice": 2127272.73,
        "aluminum_id": 1,
        "aluminum_name": "Xingfa",
        "handle_id": 2,
        "handle_name": "Bar",
        "glass_id": 3,
        "glass_name": "Clear",
        "part_id": 4,
        "part_name": "Door"
    })
}

#[tokio::test]
async fn test_lists_options() {
    let app = test_app();
    let (status, body) = send(&app.router, "GET", "/api/options", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aluminums"].as_array().unwrap().len(), 2);
    assert_eq!(body["aluminums"][0]["id"], "1");
    assert_eq!(body["parts"][0]["name"], "Door");
}

#[tokio::test]
async fn test_product_details_found() {
    let app = test_app();
    let selection = json!({ "aluminum_id": 1, "handle_id": 2, "glass_id": 3, "part_id": "4" });
    let (status, body) = send(&app.router, "POST", "/api/product-details", Some(selection)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_id"], "1234");
    assert_eq!(body["price"], 1000000.0);
    assert_eq!(body["material_percentage"], 70.0);
}

#[tokio::test]
async fn test_product_details_missing_selection_is_bad_request() {
    let app = test_app();
    let selection = json!({ "aluminum_id": 1, "handle_id": null, "glass_id": 3, "part_id": 4 });
    let (status, body) = send(&app.router, "POST", "/api/product-details", Some(selection)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("handle_id"));
}

#[tokio::test]
async fn test_product_details_unknown_combination_is_not_found() {
    let app = test_app();
    let selection = json!({ "aluminum_id": 5, "handle_id": 2, "glass_id": 3, "part_id": 4 });
    let (status, body) = send(&app.router, "POST", "/api/product-details", Some(selection)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_with_error_body() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/product-details")
        .header("content-type", "application/json")
        .body(Body::from("{ nope"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_submit_quote_persists_and_notifies() {
    let app = test_app();
    let (status, body) = send(&app.router, "POST", "/api/quotes", Some(quote_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    let quote_id: uuid::Uuid = serde_json::from_value(body["quote_id"].clone()).unwrap();

    let stored = app.quotes.get_quote(quote_id).await.unwrap().unwrap();
    assert_eq!(stored.quote.customer_phone.expose(), "0901234567");
    assert_eq!(stored.quote.quantity, 2);

    let (status, notifications) = send(&app.router, "GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifications[0]["message"], "Customer Nguyen Van A requested a quote.");
    assert_eq!(notifications[0]["quote_id"], quote_id.to_string());

    let events = app.notifier.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].options.handle, "Bar");
    assert_eq!(events[0].options.part, "Door");
}

#[tokio::test]
async fn test_submit_quote_missing_fields_is_bad_request() {
    let app = test_app();
    let mut payload = quote_payload();
    payload["customerPhone"] = json!("");
    payload["totalPrice"] = json!(0);

    let (status, body) = send(&app.router, "POST", "/api/quotes", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("customerPhone"));
    assert!(error.contains("totalPrice"));
    assert!(app.quotes.list_notifications().await.unwrap().is_empty());
    assert!(app.notifier.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_quantity_is_bad_request() {
    let app = test_app();
    let mut payload = quote_payload();
    payload["quantity"] = json!(3_000_000_000u64);

    let (status, body) = send(&app.router, "POST", "/api/quotes", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("quantity"));
    assert!(app.quotes.list_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_submission() {
    let app = test_app_with(CapturingNotifier {
        fail: true,
        ..Default::default()
    });
    let (status, _) = send(&app.router, "POST", "/api/quotes", Some(quote_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.quotes.list_notifications().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_quote_session_against_running_server() {
    let app = test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let backend = HttpQuoteBackend::new(format!("http://{}", addr)).unwrap();
    let session = QuoteSession::new(Arc::new(backend));

    session.load_options().await;
    assert_eq!(session.snapshot().await.options().aluminums.len(), 2);

    session.select(SelectionField::Aluminum, "1").await;
    session.select(SelectionField::Handle, "2").await;
    session.select(SelectionField::Glass, "3").await;
    assert!(session.select(SelectionField::Part, "4").await);

    let form = session.snapshot().await;
    assert_eq!(form.product().unwrap().product_id, "1234");
    assert_eq!(form.adjusted().height, "2000");

    // Unknown combination surfaces as an advisory, not an error.
    assert!(session.select(SelectionField::Aluminum, "5").await);
    let form = session.snapshot().await;
    assert!(form.product().is_none());
    assert_eq!(form.advisory(), Some(&quote_form::Advisory::ProductNotFound));

    assert!(session.select(SelectionField::Aluminum, "1").await);
    session
        .update(|form| {
            form.set_adjusted_height("2200");
            form.set_quantity("2");
            form.set_customer_name("Nguyen Van A");
            form.set_customer_phone("0901234567");
        })
        .await;

    let status = session.submit().await.unwrap();
    assert_eq!(status.kind, StatusKind::Success);

    let notifications = app.quotes.list_notifications().await.unwrap();
    assert_eq!(notifications.len(), 1);
    let stored = app
        .quotes
        .get_quote(notifications[0].quote_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quote.actual_height, 2200.0);
    assert!((stored.quote.total_price - 2_127_272.7273).abs() < 0.01);
    assert_eq!(app.notifier.events.lock().unwrap()[0].options.aluminum, "Xingfa");
}
