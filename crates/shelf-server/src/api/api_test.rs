use axum::body::{to_bytes, Body};
use axum::http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

fn catalog() -> Vec<CatalogItem> {
    serde_json::from_value(json!([
        {"_id": "64f0a1", "name": "A", "category": "Fiction", "discountPrice": "$10.00", "ratings": 4.2},
        {"id": 7, "name": "B", "category": "Myth", "oldPrice": 20, "ratings": 2}
    ]))
    .expect("catalog")
}

fn app_with_limit(max_requests: usize) -> Router {
    build_app(
        AppState {
            books: Arc::new(catalog()),
        },
        RateLimitState::new(max_requests, Duration::from_secs(60)),
    )
}

fn app() -> Router {
    app_with_limit(120)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[tokio::test]
async fn health_reports_book_count() {
    let response = app().oneshot(get("/api/v1/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"], json!({"status": "ok", "books": 2}));
    assert!(json["meta"]["request_id"].is_string());
    assert!(json["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn books_are_served_in_envelope_and_order() {
    let response = app().oneshot(get("/api/v1/books")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["count"], 2);
    let names: Vec<&str> = json["data"]["books"]
        .as_array()
        .expect("books array")
        .iter()
        .filter_map(|book| book["name"].as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn books_keep_raw_field_values() {
    let response = app().oneshot(get("/api/v1/books")).await.expect("response");
    let json = json_body(response).await;
    let first = &json["data"]["books"][0];
    assert_eq!(first["_id"], "64f0a1");
    assert_eq!(first["discountPrice"], "$10.00");
    assert_eq!(first["ratings"], 4.2);
}

#[tokio::test]
async fn book_lookup_by_string_and_numeric_id() {
    let response = app().oneshot(get("/api/v1/books/64f0a1")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["name"], "A");

    let response = app().oneshot(get("/api/v1/books/7")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["name"], "B");
}

#[tokio::test]
async fn unknown_book_is_not_found() {
    let response = app().oneshot(get("/api/v1/books/nope")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "book nope not found");
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let response = app().oneshot(get("/api/v1/authors")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "not_found");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .header(REQUEST_ID_HEADER, "req-abc")
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    assert_eq!(json_body(response).await["meta"]["request_id"], "req-abc");
}

#[tokio::test]
async fn request_id_is_generated_when_missing() {
    let response = app().oneshot(get("/api/v1/health")).await.expect("response");
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_owned();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}

#[tokio::test]
async fn catalog_routes_are_rate_limited() {
    let app = app_with_limit(2);
    for _ in 0..2 {
        let response = app.clone().oneshot(get("/api/v1/books")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get("/api/v1/books")).await.expect("response");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["error"]["code"], "rate_limited");

    // Health stays outside the limiter.
    let response = app.oneshot(get("/api/v1/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("not_found", StatusCode::NOT_FOUND),
        ("bad_request", StatusCode::BAD_REQUEST),
        ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        assert_eq!(ApiError::new("req-1", code, "msg").into_response().status(), status);
    }
}
