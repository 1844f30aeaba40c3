//! Integration tests for `Dashboard` refresh and submit behaviour.
//!
//! Each test stands up a wiremock server for the backend. Mocks with
//! `.expect(n)` are verified when the server is dropped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use stockr_client::{ClientError, Dashboard, InventoryClient, SubmitOutcome};
use stockr_core::{Category, ItemForm, ProductStatus};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard_for(server: &MockServer) -> Dashboard {
    let client = InventoryClient::new(&server.uri(), 5, "stockr-test/0.1")
        .expect("client construction should not fail");
    Dashboard::new(client)
}

fn kpis_json(sold_count: u64) -> serde_json::Value {
    json!({
        "total_investment": 500,
        "total_value": 650,
        "realized_profit": 90,
        "roi": 18,
        "sold_count": sold_count
    })
}

fn products_json(ids: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Item {id}"),
                "category": "Sneaker",
                "purchase_price": 100,
                "purchase_date": "2025-01-01T00:00:00Z",
                "status": "In Stock"
            })
        })
        .collect();
    serde_json::Value::Array(items)
}

async fn mount_reads(server: &MockServer, sold_count: u64, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/analytics/kpis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kpis_json(sold_count)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(ids)))
        .mount(server)
        .await;
}

fn filled_form() -> ItemForm {
    ItemForm {
        name: "Air Max 1 Patta".to_string(),
        sku: "DH1348-001".to_string(),
        variant: "EU 42".to_string(),
        category: Category::Sneaker,
        purchase_price: "180".to_string(),
        purchase_date: "2025-05-05".to_string(),
        status: ProductStatus::InStock,
        image_url: String::new(),
    }
}

// ---------------------------------------------------------------------------
// refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_applies_kpis_and_products_together() {
    let server = MockServer::start().await;
    mount_reads(&server, 4, &["a", "b", "c"]).await;

    let mut dashboard = dashboard_for(&server);
    assert!(!dashboard.has_loaded());

    dashboard.refresh().await.expect("refresh should succeed");

    assert!(dashboard.has_loaded());
    assert_eq!(dashboard.kpis().map(|k| k.sold_count), Some(4));
    let ids: Vec<&str> = dashboard.products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert!(dashboard.last_error().is_none());
    assert!(!dashboard.is_stale());
}

#[tokio::test]
async fn failed_first_refresh_is_not_an_empty_inventory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/kpis"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["a"])))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    let err = dashboard.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus { status: 500, .. }));
    assert!(!dashboard.has_loaded());
    assert!(dashboard.kpis().is_none());
    assert!(dashboard.products().is_empty());
    assert!(dashboard.last_error().is_some());
}

#[tokio::test]
async fn partial_failure_keeps_last_known_good_data() {
    let server = MockServer::start().await;
    mount_reads(&server, 1, &["old"]).await;

    let mut dashboard = dashboard_for(&server);
    dashboard.refresh().await.expect("initial refresh should succeed");
    let loaded_at = dashboard.last_refreshed_at();

    // Products now answer quickly with new data; KPIs fail after a delay.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["new-1", "new-2"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/kpis"))
        .respond_with(ResponseTemplate::new(502).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    assert!(dashboard.refresh().await.is_err());

    let ids: Vec<&str> = dashboard.products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["old"], "product list must not be applied on its own");
    assert_eq!(dashboard.kpis().map(|k| k.sold_count), Some(1));
    assert_eq!(dashboard.last_refreshed_at(), loaded_at);
    assert!(dashboard.is_stale());
}

#[tokio::test]
async fn slow_kpis_still_apply_both_once_complete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/kpis"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(kpis_json(7))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["x"])))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.refresh().await.expect("refresh should succeed");

    assert_eq!(dashboard.kpis().map(|k| k.sold_count), Some(7));
    assert_eq!(dashboard.products().len(), 1);
}

#[tokio::test]
async fn successful_refresh_clears_previous_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    assert!(dashboard.refresh().await.is_err());
    assert!(dashboard.last_error().is_some());

    server.reset().await;
    mount_reads(&server, 0, &[]).await;

    dashboard.refresh().await.expect("second refresh should succeed");
    assert!(dashboard.last_error().is_none());
    assert!(dashboard.has_loaded());
}

// ---------------------------------------------------------------------------
// submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_submit_resets_form_and_refreshes_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "p9"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/kpis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kpis_json(0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["p9"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    let mut form = filled_form();

    let outcome = dashboard.submit(&mut form).await.expect("submit should succeed");

    assert!(matches!(outcome, SubmitOutcome::Refreshed));
    assert_eq!(form, ItemForm::default());
    assert_eq!(dashboard.products().len(), 1);
    assert_eq!(dashboard.products()[0].id, "p9");
}

#[tokio::test]
async fn submit_payload_omits_blank_optionals_and_stamps_now() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    mount_reads(&server, 0, &[]).await;

    let mut dashboard = dashboard_for(&server);
    let mut form = ItemForm {
        name: "Pokemon 151 ETB".to_string(),
        category: Category::Tcg,
        ..ItemForm::default()
    };

    let before = Utc::now();
    dashboard.submit(&mut form).await.expect("submit should succeed");
    let after = Utc::now();

    let requests = server.received_requests().await.expect("recording is on");
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("a POST was sent");
    let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    let obj = body.as_object().unwrap();

    assert!(!obj.contains_key("sku"));
    assert!(!obj.contains_key("variant"));
    assert!(!obj.contains_key("image_url"));
    assert_eq!(obj["purchase_price"], json!(0.0));
    assert_eq!(obj["category"], "TCG");

    let stamped: DateTime<Utc> = obj["purchase_date"]
        .as_str()
        .unwrap()
        .parse()
        .expect("purchase_date should be RFC 3339");
    assert!(stamped >= before - chrono::Duration::seconds(1));
    assert!(stamped <= after + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn failed_submit_retains_form_and_skips_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    let mut form = filled_form();
    let entered = form.clone();

    let err = dashboard.submit(&mut form).await.unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus { status: 500, .. }));
    assert_eq!(form, entered);
    let message = dashboard.submit_error().expect("failure must be visible");
    assert!(message.contains("Air Max 1 Patta"), "got: {message}");
}

#[tokio::test]
async fn failed_submit_does_not_mark_loaded_data_stale() {
    let server = MockServer::start().await;
    mount_reads(&server, 2, &["1", "2"]).await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    dashboard.refresh().await.unwrap();

    let mut form = filled_form();
    dashboard.submit(&mut form).await.unwrap_err();

    assert!(dashboard.submit_error().is_some());
    assert!(dashboard.last_error().is_none());
    assert!(!dashboard.is_stale());
    assert_eq!(dashboard.products().len(), 2);
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    let mut form = filled_form();
    form.name = String::new();
    let entered = form.clone();

    let err = dashboard.submit(&mut form).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(form, entered);
}

#[tokio::test]
async fn refresh_failure_after_create_still_resets_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut dashboard = dashboard_for(&server);
    let mut form = filled_form();

    let outcome = dashboard.submit(&mut form).await.expect("create succeeded");

    assert!(matches!(outcome, SubmitOutcome::RefreshFailed(_)));
    assert_eq!(form, ItemForm::default());
    assert!(dashboard.last_error().is_some());
}
