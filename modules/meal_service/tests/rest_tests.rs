//! REST API tests: the module's router over an in-memory SQLite database

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use meal_service::{Config, MealServiceModule};
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const ADMIN: &str = "admin";

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Arc::new(Database::connect(options).await.unwrap());

    let module = MealServiceModule::new(Config {
        login_url: "/auth/login".to_string(),
        ..Config::default()
    });
    module.migrate(&db).await.unwrap();
    module.init(db).unwrap();
    module.register_rest(Router::new()).unwrap()
}

struct Caller {
    customer_id: Option<Uuid>,
    role: Option<&'static str>,
}

impl Caller {
    fn anonymous() -> Self {
        Self {
            customer_id: None,
            role: None,
        }
    }

    fn customer(id: Uuid) -> Self {
        Self {
            customer_id: Some(id),
            role: None,
        }
    }

    fn admin() -> Self {
        Self {
            customer_id: Some(Uuid::new_v4()),
            role: Some(ADMIN),
        }
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: &Caller,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, caller, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    caller: &Caller,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(build_request(method, uri, caller, body))
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn build_request(method: &str, uri: &str, caller: &Caller, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = caller.customer_id {
        builder = builder.header("x-customer-id", id.to_string());
    }
    if let Some(role) = caller.role {
        builder = builder.header("x-user-role", role);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Seed a tier and a small default menu, returning (tier id, main id, snack id)
async fn seed(app: &Router) -> (String, String, String) {
    let admin = Caller::admin();
    let (status, tier) = send(
        app,
        "POST",
        "/tiers",
        &admin,
        Some(json!({
            "name": "Standard",
            "calorie_target": 1800,
            "protein_target_g": 120,
            "price_cents": 8900,
            "sort_order": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tier["data"]["price_display"], "89.00");

    let (status, main) = send(
        app,
        "POST",
        "/menu/items",
        &admin,
        Some(json!({
            "name": "Peanut Satay Bowl",
            "category": "main",
            "allergens": ["Peanuts"],
            "always_available": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(main["data"]["allergens"], json!(["peanuts"]));
    assert_eq!(main["data"]["availability"], "both");

    let (_, snack) = send(
        app,
        "POST",
        "/menu/items",
        &admin,
        Some(json!({
            "name": "Protein Bar",
            "category": "snack",
            "price_cents": 350,
            "always_available": true
        })),
    )
    .await;

    (
        tier["data"]["id"].as_str().unwrap().to_string(),
        main["data"]["id"].as_str().unwrap().to_string(),
        snack["data"]["id"].as_str().unwrap().to_string(),
    )
}

async fn register(app: &Router, email: &str, tier_id: &str, allergies: Value) -> Uuid {
    let id = Uuid::new_v4();
    let caller = Caller::customer(id);
    let (status, body) = send(
        app,
        "POST",
        "/customers",
        &caller,
        Some(json!({ "email": email, "first_name": "Sam", "last_name": "Ortiz" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], id.to_string());

    let (status, _) = send(
        app,
        "PUT",
        "/customers/me/preferences",
        &caller,
        Some(json!({
            "tier_id": tier_id,
            "plan": { "days_per_week": 5, "meals_per_day": 2, "include_breakfast": false },
            "allergies": allergies
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    id
}

#[tokio::test]
async fn test_anonymous_caller_gets_login_url() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/customers/me", &Caller::anonymous(), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 401);
    assert_eq!(body["login_url"], "/auth/login");
}

#[tokio::test]
async fn test_admin_endpoints_reject_customers() {
    let app = app().await;
    let customer = Caller::customer(Uuid::new_v4());

    let (status, body) = send(
        &app,
        "POST",
        "/tiers",
        &customer,
        Some(json!({ "name": "Sneaky", "calorie_target": 1, "price_cents": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/kitchen/report", &customer, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/kitchen/report", &Caller::anonymous(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_catalog() {
    let app = app().await;
    let (tier_id, main_id, _) = seed(&app).await;

    let (status, tiers) = send(&app, "GET", "/tiers", &Caller::anonymous(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tiers["success"], true);
    assert_eq!(tiers["data"][0]["id"], tier_id);

    let (status, menu) = send(&app, "GET", "/menu", &Caller::anonymous(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["data"]["source"], "default");
    assert_eq!(menu["data"]["first_half"][0]["id"], main_id);
    assert_eq!(menu["data"]["second_half"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/menu/items/{}", Uuid::new_v4()),
        &Caller::anonymous(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_order_flow() {
    let app = app().await;
    let (tier_id, main_id, snack_id) = seed(&app).await;
    let customer_id = register(&app, "sam@example.com", &tier_id, json!(["peanuts"])).await;
    let caller = Caller::customer(customer_id);

    let (status, current) = send(&app, "GET", "/orders/current", &caller, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(current["data"].is_null());

    let lines = json!({
        "lines": [
            { "menu_item_id": main_id, "week_half": "first", "quantity": 4 },
            { "menu_item_id": main_id, "week_half": "second", "quantity": 6 },
            { "menu_item_id": snack_id, "week_half": "second", "quantity": 2 }
        ]
    });

    let (status, quote) = send(&app, "POST", "/orders/quote", &caller, Some(lines.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["data"]["totals"]["total_cents"], 8900 + 700 + 500);
    assert_eq!(quote["data"]["totals"]["total_display"], "101.00");
    assert_eq!(quote["data"]["conflicting_allergens"], json!(["peanuts"]));

    let (status, order) = send(&app, "POST", "/orders", &caller, Some(lines)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["data"]["status"], "pending");
    let order_id = order["data"]["id"].as_str().unwrap().to_string();

    let (status, over) = send(
        &app,
        "POST",
        "/orders",
        &caller,
        Some(json!({
            "lines": [{ "menu_item_id": main_id, "week_half": "first", "quantity": 11 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(over["success"], false);

    let (status, allowance) = send(&app, "GET", "/customers/me/allowance", &caller, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowance["data"]["mains_used"], 10);
    assert_eq!(allowance["data"]["mains_remaining"], 0);

    // Other customers cannot see the order
    let stranger = Caller::customer(Uuid::new_v4());
    let (status, _) = send(&app, "GET", &format!("/orders/{}", order_id), &stranger, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/orders/{}/status", order_id),
        &Caller::admin(),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/orders/{}/status", order_id),
        &Caller::admin(),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, listed) = send(&app, "GET", "/orders", &caller, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"][0]["status"], "confirmed");
}

#[tokio::test]
async fn test_kitchen_report_endpoints() {
    let app = app().await;
    let (tier_id, main_id, _) = seed(&app).await;
    let customer_id = register(&app, "kitchen@example.com", &tier_id, json!([])).await;
    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        &Caller::customer(customer_id),
        Some(json!({
            "lines": [{ "menu_item_id": main_id, "week_half": "first", "quantity": 3 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let admin = Caller::admin();
    let (status, report) = send(&app, "GET", "/kitchen/report", &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["order_count"], 1);
    assert_eq!(report["data"]["tiers"][0]["tier_name"], "Standard");

    let (status, lines) = send(&app, "GET", "/kitchen/prep-lines", &admin, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lines["data"][0]["quantity"], 3);

    let response = app
        .clone()
        .oneshot(build_request("GET", "/kitchen/report.csv", &admin, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    assert!(csv.starts_with("tier,meal,category,first_half,second_half,total,allergen_flagged\n"));
    assert!(csv.contains("Standard,Peanut Satay Bowl,main,3,0,3,0"));
}

#[tokio::test]
async fn test_challenge_registration() {
    let app = app().await;
    let (tier_id, _, _) = seed(&app).await;
    let customer_id = register(&app, "challenge@example.com", &tier_id, json!([])).await;
    let today = Utc::now().date_naive();

    let (status, challenge) = send(
        &app,
        "POST",
        "/challenges",
        &Caller::admin(),
        Some(json!({
            "name": "Winter Cut",
            "starts_on": today - Duration::days(1),
            "ends_on": today + Duration::days(27)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let path = format!(
        "/challenges/{}/participants",
        challenge["data"]["id"].as_str().unwrap()
    );

    let caller = Caller::customer(customer_id);
    let (status, joined) = send(&app, "POST", &path, &caller, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(joined["data"]["tier_id"], tier_id);

    let (status, _) = send(&app, "POST", &path, &caller, Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, participants) = send(&app, "GET", &path, &Caller::admin(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participants["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;
    let (status, doc) = send(&app, "GET", "/openapi.json", &Caller::anonymous(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["components"]["schemas"]["OrderDto"].is_object());
}

#[tokio::test]
async fn test_unreadable_requests_return_problem_bodies() {
    let app = app().await;
    let (tier_id, main_id, _) = seed(&app).await;
    let customer_id = register(&app, "lee@example.com", &tier_id, json!([])).await;
    let caller = Caller::customer(customer_id);

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        &caller,
        Some(json!({
            "lines": [{ "menu_item_id": main_id, "week_half": "first", "quantity": -1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("quantity"));

    let (status, body) = send(
        &app,
        "GET",
        "/menu?week=not-a-date",
        &Caller::anonymous(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["title"], "Invalid Query Parameters");

    let (status, body) = send(
        &app,
        "GET",
        "/menu/items/not-a-uuid",
        &Caller::anonymous(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_out_of_range_nutrition_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/tiers",
        &Caller::admin(),
        Some(json!({
            "name": "Huge",
            "calorie_target": 3_000_000_000u64,
            "price_cents": 9900
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("calorie_target"));

    let (_, tiers) = send(&app, "GET", "/tiers", &Caller::anonymous(), None).await;
    assert!(tiers["data"].as_array().unwrap().is_empty());
}
