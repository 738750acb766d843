//! End-to-end tests for the Cat resource over the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use catrest::{app, AppState, Backend, Cat, Store};
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BASE: &str = "catREST";

fn router_with(store: Arc<dyn Store<Cat>>) -> Router {
    app(BASE, AppState::new(store), 64 * 1024)
}

fn fresh() -> (Router, Arc<dyn Store<Cat>>) {
    let backend = Backend::<Cat>::memory();
    (router_with(backend.store.clone()), backend.store)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, b.len());
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    let res = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn whiskers_walkthrough() {
    let (router, _) = fresh();

    let (status, body) = send(
        &router,
        Method::POST,
        "/catREST",
        Some(r#"{"name":"Whiskers","breed":"Tabby","snack":"Tuna"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "id": 1, "name": "Whiskers", "breed": "Tabby", "snack": "Tuna"})
    );

    let (status, body) = send(&router, Method::GET, "/catREST/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Whiskers", "breed": "Tabby", "snack": "Tuna"})
    );

    let (status, body) = send(&router, Method::GET, "/catREST", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 1, "name": "Whiskers", "breed": "Tabby", "snack": "Tuna"}])
    );
}

#[tokio::test]
async fn index_is_empty_before_any_create() {
    let (router, _) = fresh();
    let (status, body) = send(&router, Method::GET, "/catREST", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn n_creates_list_n_distinct_ids() {
    let (router, _) = fresh();
    for i in 0..5 {
        let payload = json!({"name": format!("cat-{}", i), "breed": "Siamese", "snack": "Kibble"}).to_string();
        let (status, _) = send(&router, Method::POST, "/catREST", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, body) = send(&router, Method::GET, "/catREST", None).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    let mut ids: Vec<i64> = items.iter().map(|c| c["id"].as_i64().unwrap()).collect();
    ids.dedup();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
}

#[rstest]
#[case(r#"{"breed":"Tabby","snack":"Tuna"}"#)]
#[case(r#"{"name":"Whiskers","snack":"Tuna"}"#)]
#[case(r#"{"name":"Whiskers","breed":"Tabby"}"#)]
#[case(r#"{"name":"Whiskers","breed":null,"snack":"Tuna"}"#)]
#[case(r#"{"name":7,"breed":"Tabby","snack":"Tuna"}"#)]
#[tokio::test]
async fn incomplete_payload_is_rejected_and_not_stored(#[case] payload: &str) {
    let (router, store) = fresh();
    let (status, body) = send(&router, Method::POST, "/catREST", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (router, store) = fresh();
    let (status, body) = send(&router, Method::POST, "/catREST", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (router, _) = fresh();
    send(
        &router,
        Method::POST,
        "/catREST",
        Some(r#"{"name":"a","breed":"b","snack":"c"}"#),
    )
    .await;
    let (status, body) = send(&router, Method::GET, "/catREST/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn non_integer_id_is_a_validation_error() {
    let (router, _) = fresh();
    let (status, body) = send(&router, Method::GET, "/catREST/whiskers", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let (router, _) = fresh();
    let (status, _) = send(&router, Method::DELETE, "/catREST/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_route_falls_back_to_json_404() {
    let (router, _) = fresh();
    let (status, body) = send(&router, Method::GET, "/dogREST", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn health_ready_and_version() {
    let (router, _) = fresh();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (status, body) = send(&router, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "catrest");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let backend = Backend::<Cat>::memory();
    let router = app(BASE, AppState::new(backend.store.clone()), 32);
    let payload = json!({"name": "x".repeat(100), "breed": "b", "snack": "c"}).to_string();
    let (status, _) = send(&router, Method::POST, "/catREST", Some(&payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // No Content-Length: the limit trips while the handler buffers the body.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/catREST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap();
    let res = router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "payload_too_large");

    assert!(backend.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn base_path_is_configurable() {
    let backend = Backend::<Cat>::memory();
    let router = app("kittens", AppState::new(backend.store), 1024);
    let (status, _) = send(&router, Method::GET, "/kittens", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, "/catREST", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
