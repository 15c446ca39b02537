//! Router tests driven in process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use wirespool_api::{build_router, AppState, ScopeMode, ServerConfig};
use wirespool_core::{categorize, default_wire_types, WireCategory};
use wirespool_db::MemCatalogStore;

/// 12/2 NM-B (Romex), ratio 21.30, leads the default table.
const ROMEX_12_2_ID: i64 = 1;

fn app(mode: ScopeMode) -> Router {
    let config = ServerConfig::from_lookup(|_| None).expect("default config");
    let state = AppState::new(Arc::new(MemCatalogStore::new()), mode);
    build_router(state, &config)
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, req: Request<Body>) -> Reply {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    Reply {
        status,
        headers,
        body,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_cookie(mut req: Request<Body>, cookie: &str) -> Request<Body> {
    req.headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    req
}

async fn list(app: &Router) -> Vec<Value> {
    let reply = send(app, get("/api/wire-types")).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.body.as_array().cloned().expect("array body")
}

// =============================================================================
// SYSTEM
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = app(ScopeMode::Shared);
    let reply = send(&app, get("/health")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");
    assert!(reply.body["version"].is_string());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app(ScopeMode::Shared);
    let reply = send(&app, get("/health")).await;
    assert!(reply.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app(ScopeMode::Shared);
    let reply = send(&app, get("/openapi.json")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["paths"]["/api/calculate"].is_object());
}

// =============================================================================
// CATALOG
// =============================================================================

#[tokio::test]
async fn test_list_returns_seeded_defaults() {
    let app = app(ScopeMode::Shared);
    let listed = list(&app).await;
    assert_eq!(listed.len(), default_wire_types().len());

    let romex = listed
        .iter()
        .find(|w| w["id"] == ROMEX_12_2_ID)
        .expect("12/2 Romex seeded");
    assert_eq!(romex["name"], "12/2 NM-B (Romex)");
    assert_eq!(romex["ratio"], json!(21.3));
    assert_eq!(romex["isDefault"], 1);
}

#[tokio::test]
async fn test_create_returns_201_with_custom_record() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json(
            "POST",
            "/api/wire-types",
            json!({"name": "X", "ratio": 10, "isDefault": 1}),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["name"], "X");
    assert_eq!(reply.body["ratio"], json!(10.0));
    assert_eq!(reply.body["isDefault"], 0);

    let id = reply.body["id"].as_i64().unwrap();
    assert!(default_wire_types().iter().all(|w| w.id != id));

    let fetched = send(&app, get(&format!("/api/wire-types/{}", id))).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, reply.body);
}

#[tokio::test]
async fn test_create_accepts_decimal_string_ratio() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json(
            "POST",
            "/api/wire-types",
            json!({"name": "4/3 SER", "ratio": "72.35"}),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["ratio"], json!(72.35));
}

#[tokio::test]
async fn test_create_with_negative_ratio_is_rejected() {
    let app = app(ScopeMode::Shared);
    let before = list(&app).await;

    let reply = send(
        &app,
        with_json("POST", "/api/wire-types", json!({"name": "Bad", "ratio": -1})),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["message"].is_string());
    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn test_create_with_blank_name_is_rejected() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json("POST", "/api/wire-types", json!({"name": "  ", "ratio": 5})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "name must not be empty");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app(ScopeMode::Shared);
    let req = Request::builder()
        .method("POST")
        .uri("/api/wire-types")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let reply = send(&app, req).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_and_invalid_ids() {
    let app = app(ScopeMode::Shared);

    let reply = send(&app, get("/api/wire-types/999999")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["message"], "Wire type not found");

    let reply = send(&app, get("/api/wire-types/abc")).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "Invalid wire type ID");
}

#[tokio::test]
async fn test_delete_unknown_id_is_404_and_catalog_unchanged() {
    let app = app(ScopeMode::Shared);
    let before = list(&app).await;

    let reply = send(&app, delete("/api/wire-types/999999")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn test_delete_default_is_rejected_and_catalog_unchanged() {
    let app = app(ScopeMode::Shared);
    let before = list(&app).await;

    let reply = send(&app, delete(&format!("/api/wire-types/{}", ROMEX_12_2_ID))).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "Wire type not found or cannot be deleted (default wire type)"
    );
    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn test_update_default_is_rejected_and_unchanged() {
    let app = app(ScopeMode::Shared);
    let uri = format!("/api/wire-types/{}", ROMEX_12_2_ID);
    let before = send(&app, get(&uri)).await.body;

    let reply = send(
        &app,
        with_json("PUT", &uri, json!({"name": "hijacked", "ratio": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "Cannot modify default wire type");
    assert_eq!(send(&app, get(&uri)).await.body, before);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json("PUT", "/api/wire-types/999999", json!({"name": "Y", "ratio": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_custom_record() {
    let app = app(ScopeMode::Shared);
    let created = send(
        &app,
        with_json("POST", "/api/wire-types", json!({"name": "Temp", "ratio": 5})),
    )
    .await;
    let id = created.body["id"].as_i64().unwrap();
    let uri = format!("/api/wire-types/{}", id);

    let updated = send(
        &app,
        with_json("PUT", &uri, json!({"name": "Temp 2", "ratio": "6.25"})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], id);
    assert_eq!(updated.body["name"], "Temp 2");
    assert_eq!(updated.body["ratio"], json!(6.25));
    assert_eq!(updated.body["isDefault"], 0);

    let deleted = send(&app, delete(&uri)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Wire type deleted successfully");

    assert_eq!(send(&app, get(&uri)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_sorted_by_category() {
    let app = app(ScopeMode::Shared);
    for name in ["Speaker wire", "2 AWG THHN"] {
        let reply = send(
            &app,
            with_json("POST", "/api/wire-types", json!({"name": name, "ratio": 3})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    let reply = send(&app, get("/api/wire-types?sort=category")).await;
    assert_eq!(reply.status, StatusCode::OK);
    let names: Vec<String> = reply
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(names.first().map(String::as_str), Some("6/3 NM-B (Romex)"));
    assert_eq!(names.last().map(String::as_str), Some("Speaker wire"));
    let categories: Vec<WireCategory> = names.iter().map(|n| categorize(n)).collect();
    assert!(categories.windows(2).all(|pair| pair[0] <= pair[1]));

    let reply = send(&app, get("/api/wire-types?sort=bogus")).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// CALCULATOR
// =============================================================================

#[tokio::test]
async fn test_calculate_in_pounds() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json(
            "POST",
            "/api/calculate",
            json!({"wireTypeId": ROMEX_12_2_ID, "weight": 10.65, "weightUnit": "lbs"}),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let length = reply.body["length"].as_f64().unwrap();
    assert!((length - 125.0).abs() < 1e-6, "length = {}", length);
    assert_eq!(reply.body["wireType"]["id"], ROMEX_12_2_ID);
    assert_eq!(reply.body["weight"], json!(10.65));
    assert_eq!(reply.body["weightUnit"], "lbs");
    assert_eq!(reply.body["referenceLength"], json!(250.0));
    let remaining = reply.body["remainingFromFullRoll"].as_f64().unwrap();
    assert!((remaining - 125.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_calculate_in_ounces() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json(
            "POST",
            "/api/calculate",
            json!({"wireTypeId": ROMEX_12_2_ID, "weight": 10, "weightUnit": "oz"}),
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let length = reply.body["length"].as_f64().unwrap();
    assert!((length - 7.34).abs() < 0.01, "length = {}", length);
    assert_eq!(reply.body["weightUnit"], "oz");
}

#[tokio::test]
async fn test_calculate_defaults_to_pounds() {
    let app = app(ScopeMode::Shared);
    let reply = send(
        &app,
        with_json(
            "POST",
            "/api/calculate",
            json!({"wireTypeId": ROMEX_12_2_ID, "weight": 21.3}),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["weightUnit"], "lbs");
    assert!((reply.body["length"].as_f64().unwrap() - 250.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_calculate_rejections() {
    let app = app(ScopeMode::Shared);

    let unknown = send(
        &app,
        with_json(
            "POST",
            "/api/calculate",
            json!({"wireTypeId": 999999, "weight": 1, "weightUnit": "lbs"}),
        ),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    for body in [
        json!({"wireTypeId": ROMEX_12_2_ID, "weight": 0, "weightUnit": "lbs"}),
        json!({"wireTypeId": ROMEX_12_2_ID, "weight": -3, "weightUnit": "lbs"}),
        json!({"wireTypeId": ROMEX_12_2_ID, "weight": 1, "weightUnit": "kg"}),
        json!({"weight": 1, "weightUnit": "lbs"}),
    ] {
        let reply = send(&app, with_json("POST", "/api/calculate", body.clone())).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{}", body);
        assert!(reply.body["message"].is_string());
    }
}

// =============================================================================
// CALLER SCOPES
// =============================================================================

fn issued_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

#[tokio::test]
async fn test_per_user_mode_issues_cookie_once() {
    let app = app(ScopeMode::PerUser);

    let first = send(&app, get("/api/wire-types")).await;
    let cookie = issued_cookie(&first.headers).expect("cookie issued on first contact");
    assert!(cookie.starts_with("userId="));
    let set_cookie = first.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));

    let second = send(&app, with_cookie(get("/api/wire-types"), &cookie)).await;
    assert!(issued_cookie(&second.headers).is_none());
}

#[tokio::test]
async fn test_per_user_mode_isolates_custom_records() {
    let app = app(ScopeMode::PerUser);

    let alice = issued_cookie(&send(&app, get("/health")).await.headers).unwrap();
    let bob = issued_cookie(&send(&app, get("/health")).await.headers).unwrap();
    assert_ne!(alice, bob);

    let created = send(
        &app,
        with_cookie(
            with_json("POST", "/api/wire-types", json!({"name": "Mine", "ratio": 4})),
            &alice,
        ),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created.body["ownerId"].is_string());
    let uri = format!("/api/wire-types/{}", created.body["id"]);

    let alice_get = send(&app, with_cookie(get(&uri), &alice)).await;
    assert_eq!(alice_get.status, StatusCode::OK);

    let bob_get = send(&app, with_cookie(get(&uri), &bob)).await;
    assert_eq!(bob_get.status, StatusCode::NOT_FOUND);

    let bob_list = send(&app, with_cookie(get("/api/wire-types"), &bob)).await;
    let bob_names: Vec<&str> = bob_list
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w["name"].as_str())
        .collect();
    assert!(!bob_names.contains(&"Mine"));
    assert!(bob_names.contains(&"12/2 NM-B (Romex)"));

    let bob_delete = send(&app, with_cookie(delete(&uri), &bob)).await;
    assert_eq!(bob_delete.status, StatusCode::NOT_FOUND);
    assert_eq!(
        send(&app, with_cookie(get(&uri), &alice)).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_shared_mode_issues_no_cookie() {
    let app = app(ScopeMode::Shared);
    let reply = send(&app, get("/api/wire-types")).await;
    assert!(reply.headers.get(header::SET_COOKIE).is_none());
}
