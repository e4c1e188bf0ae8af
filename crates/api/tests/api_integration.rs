//! Integration tests for the API server.
//!
//! Drive the full router over the in-memory store, covering the
//! registration/login flow, the auth gate, order placement, and the
//! order summary.

use std::sync::{Arc, OnceLock};

use api::AppState;
use auth::TokenService;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use common::{MenuId, Money, RestaurantId};
use metrics_exporter_prometheus::PrometheusHandle;
use store::InMemoryStore;
use tower::ServiceExt;

const SECRET: &str = "test-secret";
const MENU_PRICE_CENTS: i64 = 1200;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct TestApp {
    app: Router,
    store: InMemoryStore,
    restaurant_id: RestaurantId,
    menu_id: MenuId,
    tokens: TokenService,
}

async fn setup() -> TestApp {
    let store = InMemoryStore::new();
    let restaurant_id = store.seed_restaurant("Noodle House").await;
    let menu_id = store
        .seed_menu(restaurant_id, "Pad Thai", Money::from_cents(MENU_PRICE_CENTS))
        .await;

    let tokens = TokenService::new(SECRET, Duration::hours(1));
    let state = Arc::new(AppState {
        store: store.clone(),
        tokens: tokens.clone(),
    });
    let app = api::create_app(state, get_metrics_handle());

    TestApp {
        app,
        store,
        restaurant_id,
        menu_id,
        tokens,
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn register(app: &Router, username: &str, password: &str, fullname: &str) {
    let (status, json) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "password": password,
            "fullname": fullname,
            "email": format!("{username}@example.com"),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Register success");
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().expect("token missing").to_string()
}

#[tokio::test]
async fn test_ping() {
    let t = setup().await;

    let (status, json) = send(&t.app, "GET", "/ping", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["time"].as_str().is_some());
}

#[tokio::test]
async fn test_register_then_login() {
    let t = setup().await;

    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    // The issued token is verifiable and carries the display name.
    let claims = t.tokens.verify(&token).unwrap();
    assert_eq!(claims.fullname, "Ann A");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;

    let (status, json) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "username": "ann", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Password incorrect");
}

#[tokio::test]
async fn test_login_unknown_username() {
    let t = setup().await;

    let (status, json) = send(
        &t.app,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "username": "nobody", "password": "pw1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Username not found");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;

    let (status, json) = send(
        &t.app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "username": "ann",
            "password": "pw2",
            "fullname": "Ann B",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Username already taken");
}

#[tokio::test]
async fn test_register_requires_username_and_password() {
    let t = setup().await;

    let (status, _) = send(
        &t.app,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "username": "",
            "password": "pw1",
            "fullname": "Ann A",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let t = setup().await;

    let (status, json) = send(&t.app, "GET", "/customers", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "No token");
}

#[tokio::test]
async fn test_protected_route_with_malformed_header() {
    let t = setup().await;

    let request = Request::builder()
        .uri("/customers")
        .header("authorization", "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "Invalid Authorization header");
}

#[tokio::test]
async fn test_protected_route_with_foreign_token() {
    let t = setup().await;

    let foreign = TokenService::new("other-secret", Duration::hours(1))
        .issue(common::CustomerId::new(), "Mallory")
        .unwrap();
    let (status, json) = send(&t.app, "GET", "/customers", Some(&foreign), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid token");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let t = setup().await;

    // Correct secret, expiry in the past.
    let expired = TokenService::new(SECRET, Duration::seconds(-120))
        .issue(common::CustomerId::new(), "Ann A")
        .unwrap();
    let (status, json) = send(&t.app, "GET", "/orders/summary", Some(&expired), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Token expired");
}

#[tokio::test]
async fn test_place_order_computes_total() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    let (status, json) = send(
        &t.app,
        "POST",
        "/orders",
        Some(&token),
        Some(serde_json::json!({
            "restaurant_id": t.restaurant_id,
            "menu_id": t.menu_id,
            "quantity": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Order success");
    assert_eq!(json["total"], MENU_PRICE_CENTS * 3);
}

#[tokio::test]
async fn test_place_order_unknown_menu_persists_nothing() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    let (status, json) = send(
        &t.app,
        "POST",
        "/orders",
        Some(&token),
        Some(serde_json::json!({
            "restaurant_id": t.restaurant_id,
            "menu_id": MenuId::new(),
            "quantity": 1,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Menu not found");
    assert_eq!(t.store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_rejects_nonpositive_quantity() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    for quantity in [0, -2] {
        let (status, _) = send(
            &t.app,
            "POST",
            "/orders",
            Some(&token),
            Some(serde_json::json!({
                "restaurant_id": t.restaurant_id,
                "menu_id": t.menu_id,
                "quantity": quantity,
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    assert_eq!(t.store.order_count().await, 0);
}

#[tokio::test]
async fn test_summary_with_no_orders_is_zero() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    let (status, json) = send(&t.app, "GET", "/orders/summary", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["customer_name"], "Ann A");
    assert_eq!(json["total_amount"], 0);
}

#[tokio::test]
async fn test_summary_sums_order_totals() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    for quantity in [1, 2] {
        let (status, _) = send(
            &t.app,
            "POST",
            "/orders",
            Some(&token),
            Some(serde_json::json!({
                "restaurant_id": t.restaurant_id,
                "menu_id": t.menu_id,
                "quantity": quantity,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = send(&t.app, "GET", "/orders/summary", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_amount"], MENU_PRICE_CENTS * 3);
}

#[tokio::test]
async fn test_menus_listing_is_public() {
    let t = setup().await;

    let (status, json) = send(&t.app, "GET", "/menus", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let menus = json.as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["menu_name"], "Pad Thai");
    assert_eq!(menus[0]["restaurant_name"], "Noodle House");
    assert_eq!(menus[0]["price"], MENU_PRICE_CENTS);
}

#[tokio::test]
async fn test_customers_listing_hides_credentials() {
    let t = setup().await;
    register(&t.app, "ann", "pw1", "Ann A").await;
    let token = login(&t.app, "ann", "pw1").await;

    let (status, json) = send(&t.app, "GET", "/customers", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let customers = json.as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["username"], "ann");
    assert_eq!(customers[0]["fullname"], "Ann A");
    assert!(customers[0].get("password_hash").is_none());
}
