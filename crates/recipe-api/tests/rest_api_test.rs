//! REST surface tests driven through the router with an in-memory store.

mod common;

use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use tower::ServiceExt;

use common::{app, get, send, FakeStore};
use recipe_core::{Bound, NumericField, SortColumn, SortOrder, DIRECT_SEARCH_LIMIT};

#[tokio::test]
async fn test_search_applies_known_preset_and_reports_it() {
    let store = Arc::new(FakeStore::with_recipes(3));
    let (status, body) = send(
        app(store.clone(), None),
        get("/api/recipes/search?diet=vegan&include_ingredients=tofu"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 3);
    assert_eq!(body["diet_plan"]["name"], "Vegan Diet");
    assert!(body["diet_plan"]["filters"]["exclude_ingredients"].is_array());

    let call = store.last_call();
    assert_eq!(call.preset.as_deref(), Some("vegan"));
    assert_eq!(call.filter.include_ingredients, vec!["tofu"]);
    assert_eq!(call.filter.row_limit, DIRECT_SEARCH_LIMIT);
}

#[tokio::test]
async fn test_search_with_unknown_diet_has_no_diet_plan() {
    let store = Arc::new(FakeStore::with_recipes(1));
    let (status, body) = send(app(store.clone(), None), get("/api/recipes/search?diet=carnivore")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("diet_plan").is_none());
    assert_eq!(store.last_call().preset, None);
}

#[tokio::test]
async fn test_malformed_filters_are_dropped_not_rejected() {
    let store = Arc::new(FakeStore::with_recipes(2));
    let (status, body) = send(
        app(store.clone(), None),
        get("/api/recipes/search?min_calories=abc&sort_by=1%3D1%3BDROP%20TABLE%20recipes&max_fat=12.5&colour=red"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let filter = store.last_call().filter;
    assert!(!filter.ranges.contains_key(&NumericField::Calories));
    assert_eq!(filter.ranges[&NumericField::Fat].max, Some(Bound::Real(12.5)));
    assert_eq!(filter.sort_by, None);
}

#[tokio::test]
async fn test_sort_parameters_reach_the_store() {
    let store = Arc::new(FakeStore::with_recipes(1));
    send(
        app(store.clone(), None),
        get("/api/recipes/search?sort_by=rating&sort_order=DESC"),
    )
    .await;

    let filter = store.last_call().filter;
    assert_eq!(filter.sort_by, Some(SortColumn::Field(NumericField::Rating)));
    assert_eq!(filter.sort_order, SortOrder::Desc);
}

#[tokio::test]
async fn test_search_never_exceeds_direct_cap() {
    let store = Arc::new(FakeStore::with_recipes(150));
    let (status, body) = send(app(store, None), get("/api/recipes/search")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 100);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_store_failure_is_a_server_error() {
    let store = Arc::new(FakeStore::unavailable());
    let (status, body) = send(app(store, None), get("/api/recipes/search?search=soup")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "store_unavailable");
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));
}

#[tokio::test]
async fn test_get_recipe() {
    let store = Arc::new(FakeStore::with_recipes(3));
    let (status, body) = send(app(store, None), get("/api/recipe/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["ingredients"], serde_json::json!(["tofu", "rice"]));
}

#[tokio::test]
async fn test_get_missing_recipe_is_404() {
    let store = Arc::new(FakeStore::with_recipes(3));
    let (status, body) = send(app(store, None), get("/api/recipe/999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["error"], "Recipe with ID 999999 not found");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_get_recipe_with_non_integer_id_is_400() {
    let store = Arc::new(FakeStore::with_recipes(3));
    let (status, body) = send(app(store, None), get("/api/recipe/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid recipe ID");
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn test_diet_plans_lists_every_preset() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store, None), get("/api/diet-plans")).await;

    assert_eq!(status, StatusCode::OK);
    let plans = body["diet_plans"].as_object().unwrap();
    assert_eq!(plans.len(), 10);
    assert_eq!(plans["keto"]["name"], "Ketogenic Diet");
    assert_eq!(plans["keto"]["filters"]["sort_by"], "fat");
}

#[tokio::test]
async fn test_health() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store, None), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_cors_headers() {
    let store = Arc::new(FakeStore::default());
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app(store, None).oneshot(request).await.unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    let request_id = uuid::Uuid::parse_str(request_id.to_str().unwrap()).unwrap();
    assert_eq!(request_id.get_version_num(), 7);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
