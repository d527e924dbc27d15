#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

/// In-memory database with the schema applied. A single long-lived connection
/// keeps the database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("Non-ascii location").to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    TestResponse {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not utf-8"),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POSTs an already urlencoded form body.
pub async fn post_form(app: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> TestResponse {
    let request = Request::post(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
