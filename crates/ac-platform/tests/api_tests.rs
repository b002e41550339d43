//! HTTP-level tests for the access control API.

use ac_platform::{build_router, Database, HealthState, PasswordService, PlatformServices};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::in_memory().await.unwrap();
    db.init_schema().await.unwrap();
    let services = PlatformServices::new(db.clone(), PasswordService::for_testing());
    let health = HealthState::new(db, Some("test".to_string()));
    health.set_ready();
    build_router(&services, health)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, json) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create {} failed: {}", uri, json);
    json["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_user_details_include_organization() {
    let app = app().await;
    let acme = create(&app, "/organizations/", json!({"name": "Acme"})).await;
    let user = create(
        &app,
        "/users/",
        json!({"email": "a@b.com", "organization_id": acme, "password": "s3cret-pass"}),
    )
    .await;

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization"]["name"], "Acme");
    assert_eq!(body["roles"], json!([]));
    assert_eq!(body["is_active"], true);
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let (_, org) = send(&app, Method::GET, &format!("/organizations/{}", acme), None).await;
    assert_eq!(org["users"][0]["email"], "a@b.com");
}

#[tokio::test]
async fn test_duplicate_role_is_bad_request() {
    let app = app().await;
    create(&app, "/roles/", json!({"name": "admin"})).await;

    let (status, body) = send(&app, Method::POST, "/roles/", Some(json!({"name": "admin"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE");

    let (_, roles) = send(&app, Method::GET, "/roles/", None).await;
    assert_eq!(roles.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_conflicts_only_with_other_entities() {
    let app = app().await;
    let read = create(&app, "/rights/", json!({"name": "read"})).await;
    create(&app, "/rights/", json!({"name": "write"})).await;

    let (status, _) = send(&app, Method::PUT, &format!("/rights/{}", read), Some(json!({"name": "write"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/rights/{}", read),
        Some(json!({"name": "read", "description": "Read only"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Read only");
    assert!(body["modified_at"].is_string());
}

#[tokio::test]
async fn test_unknown_right_leaves_role_unchanged() {
    let app = app().await;
    let role = create(&app, "/roles/", json!({"name": "admin"})).await;
    let right = create(&app, "/rights/", json!({"name": "read"})).await;
    let uri = format!("/roles/{}/rights", role);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!([right, 9999]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Right 9999 does not exist");

    let (_, details) = send(&app, Method::GET, &format!("/roles/{}", role), None).await;
    assert_eq!(details["rights"], json!([]));

    let (status, details) = send(&app, Method::PUT, &uri, Some(json!([right]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["rights"][0]["name"], "read");
}

#[tokio::test]
async fn test_detaching_unattached_ids_is_noop() {
    let app = app().await;
    let acme = create(&app, "/organizations/", json!({"name": "Acme"})).await;
    let user = create(&app, "/users/", json!({"email": "a@b.com", "organization_id": acme})).await;
    let admin = create(&app, "/roles/", json!({"name": "admin"})).await;
    let viewer = create(&app, "/roles/", json!({"name": "viewer"})).await;
    let uri = format!("/users/{}/roles", user);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!([admin]))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(json!([viewer]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"][0]["id"], admin);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(json!([admin]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!([]));
}

#[tokio::test]
async fn test_missing_entities_are_bad_request() {
    let app = app().await;
    for uri in ["/organizations/42", "/users/42", "/roles/42", "/rights/42"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "NOT_FOUND");

        let (status, _) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/",
        Some(json!({"email": "a@b.com", "organization_id": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Organization 7 does not exist");
}

#[tokio::test]
async fn test_delete_returns_success() {
    let app = app().await;
    let role = create(&app, "/roles/", json!({"name": "admin"})).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/roles/{}", role), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, roles) = send(&app, Method::GET, "/roles/", None).await;
    assert_eq!(roles, json!([]));
}

#[tokio::test]
async fn test_organization_with_users_cannot_be_deleted() {
    let app = app().await;
    let acme = create(&app, "/organizations/", json!({"name": "Acme"})).await;
    create(&app, "/users/", json!({"email": "a@b.com", "organization_id": acme})).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/organizations/{}", acme), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body_rejected_by_framework() {
    let app = app().await;
    let (status, _) = send(&app, Method::POST, "/roles/", Some(json!({"description": "no name"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_records_listing() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/records/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/docs/");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");

    let (status, doc) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/roles/{id}/rights").is_some());
    assert!(doc["paths"].get("/users/{id}/roles").is_some());
    assert!(doc["paths"].get("/records/").is_some());
}
