mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use trailtales::router::create_router;

use common::setup;

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(router: &Router, username: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": common::PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["resp_data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_me() {
    let app = setup().await;
    let router = create_router(app.state.clone());

    let token = register(&router, "anna").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "identifier": "anna@example.com", "password": common::PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["resp_data"]["user"]["username"], "anna");

    let (status, body) = send(&router, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["email"], "anna@example.com");
    assert_eq!(body["resp_data"]["roles"], json!(["ROLE_USER"]));
    assert!(body["resp_data"].get("password_hash").is_none());
}

#[tokio::test]
async fn rejects_missing_or_bad_credentials() {
    let app = setup().await;
    let router = create_router(app.state.clone());
    register(&router, "anna").await;

    let (status, body) = send(&router, Method::GET, "/journeys", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, _) = send(&router, Method::GET, "/journeys", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &router,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "identifier": "anna", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid identifier or password");
}

#[tokio::test]
async fn journey_errors_map_to_statuses() {
    let app = setup().await;
    let router = create_router(app.state.clone());
    let anna = register(&router, "anna").await;
    let bob = register(&router, "bob").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/journeys",
        Some(&anna),
        Some(json!({
            "name": "Baltic loop",
            "start_date": "2024-07-01",
            "end_date": "2024-07-10",
            "tag_names": ["sea", "bike"],
            "origin_location_name": "Riga",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let journey_id = body["resp_data"]["id"].as_i64().unwrap();
    assert_eq!(body["resp_data"]["origin_location"]["name"], "Riga");
    assert_eq!(body["resp_data"]["tags"].as_array().unwrap().len(), 2);

    let uri = format!("/journeys/{journey_id}");
    let (status, body) = send(
        &router,
        Method::PUT,
        &uri,
        Some(&bob),
        Some(json!({ "name": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1003);

    let (status, body) = send(&router, Method::GET, "/journeys/9999", Some(&anna), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);

    let (status, body) = send(
        &router,
        Method::POST,
        "/journeys",
        Some(&anna),
        Some(json!({ "name": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, body) = send(
        &router,
        Method::GET,
        "/journeys/search?keyword=riga",
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&router, Method::DELETE, &uri, Some(&anna), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, &uri, Some(&anna), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_tag_is_conflict() {
    let app = setup().await;
    let router = create_router(app.state.clone());
    let token = register(&router, "anna").await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/tags",
        Some(&token),
        Some(json!({ "name": "hiking" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["resp_data"]["name"], "hiking");

    let (status, body) = send(
        &router,
        Method::POST,
        "/tags",
        Some(&token),
        Some(json!({ "name": "hiking" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1001);

    let (status, body) = send(&router, Method::GET, "/tags/by-name/hiking", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["name"], "hiking");
}
