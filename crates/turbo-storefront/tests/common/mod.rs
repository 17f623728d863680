//! Shared harness for storefront HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use turbo_commerce::catalog::Viewer;
use turbo_storefront::prelude::*;

pub struct TestApp {
    pub router: Router,
    pub carts: Arc<InMemoryCartStore>,
}

pub fn fixtures() -> Fixtures {
    Fixtures::load(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog.json")).unwrap()
}

pub fn app() -> TestApp {
    app_with(Settings::default())
}

pub fn app_with(settings: Settings) -> TestApp {
    let carts = Arc::new(InMemoryCartStore::new());
    let state = AppState::new(
        Arc::new(InMemoryCatalog::new(fixtures())),
        carts.clone(),
        settings,
        Key::from(&[7u8; 64][..]),
    )
    .unwrap();
    TestApp {
        router: router(state),
        carts,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn ajax(mut request: Request<Body>) -> Request<Body> {
    request
        .headers_mut()
        .insert("X-Requested-With", "XMLHttpRequest".parse().unwrap());
    request
}

pub fn as_viewer(mut request: Request<Body>, viewer: Viewer) -> Request<Body> {
    request.extensions_mut().insert(viewer);
    request
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` pair of the first `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().split(';').next().unwrap().to_string())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
