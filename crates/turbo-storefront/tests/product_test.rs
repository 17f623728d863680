//! Product detail page tests.

mod common;

use axum::http::StatusCode;
use common::*;
use tower::ServiceExt;
use turbo_commerce::catalog::Viewer;
use turbo_commerce::UserId;

#[tokio::test]
async fn test_product_details_renders_form_and_structured_data() {
    let app = app();
    let response = app.router.oneshot(get("/products/crab-tee-1/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<title>Crab Tee | TurboCommerce</title>"));
    assert!(body.contains(r#"<select name="variant" id="id_variant">"#));
    assert!(body.contains(r#"id="variant-picker-data""#));
    assert!(body.contains(r#"<script type="application/ld+json">"#));
    assert!(body.contains(r#""@type":"Product""#));
    assert!(body.contains("You save"));
}

#[tokio::test]
async fn test_expired_sale_gives_no_discount() {
    let app = app();
    let response = app
        .router
        .oneshot(get("/products/the-rust-book-3/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("$39.99"));
    assert!(!body.contains("You save"));
}

#[tokio::test]
async fn test_images_are_shown_in_sort_order() {
    let app = app();
    let response = app.router.oneshot(get("/products/crab-tee-1/")).await.unwrap();
    let body = body_text(response).await;

    let front = body.find("crab-tee-front.jpg").unwrap();
    let back = body.find("crab-tee-back.jpg").unwrap();
    assert!(front < back);
}

#[tokio::test]
async fn test_single_variant_product_has_no_variant_select() {
    let app = app();
    let response = app
        .router
        .oneshot(get("/products/plain-white-tee-2/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(!body.contains(r#"name="variant""#));
    assert!(body.contains(r#"name="quantity""#));
}

#[tokio::test]
async fn test_stale_slug_redirects_permanently() {
    let app = app();
    let response = app.router.oneshot(get("/products/old-name-1/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/products/crab-tee-1/");
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = app();
    let response = app.router.oneshot(get("/products/crab-tee-99/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn test_malformed_segment_is_not_found() {
    let app = app();
    let response = app.router.oneshot(get("/products/crab-tee/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unpublished_product_is_hidden_from_shoppers() {
    let app = app();
    let response = app
        .router
        .clone()
        .oneshot(get("/products/upcoming-hoodie-4/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let customer = as_viewer(get("/products/upcoming-hoodie-4/"), Viewer::Customer(UserId::new(1)));
    let response = app.router.oneshot(customer).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_staff_can_preview_unpublished_product() {
    let app = app();
    let request = as_viewer(get("/products/upcoming-hoodie-4/"), Viewer::Staff(UserId::new(9)));
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("not published yet"));
    assert!(body.contains("This product is currently unavailable."));
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_uses_not_found_page() {
    let app = app();
    let response = app.router.oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}
