//! Add-to-cart submission and cart page tests.

mod common;

use axum::http::StatusCode;
use common::*;
use tower::ServiceExt;
use turbo_commerce::catalog::Viewer;
use turbo_commerce::UserId;
use turbo_storefront::config::Settings;

const ADD_URL: &str = "/products/crab-tee-1/add/";

#[tokio::test]
async fn test_get_redirects_to_product_without_creating_cart() {
    let app = app();
    let response = app.router.oneshot(get(ADD_URL)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/products/crab-tee-1/");
    assert!(set_cookie(&response).is_none());
    assert_eq!(app.carts.cart_count().await, 0);
}

#[tokio::test]
async fn test_ajax_add_returns_next_url_and_sets_cookie() {
    let app = app();
    let request = ajax(post_form(ADD_URL, "variant=101&quantity=2"));
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("cart="));
    assert_eq!(body_json(response).await["next"], "/cart/");
    assert_eq!(app.carts.cart_count().await, 1);
}

#[tokio::test]
async fn test_ajax_out_of_stock_returns_field_errors() {
    let app = app();
    let request = ajax(post_form(ADD_URL, "variant=103&quantity=1"));
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).unwrap().starts_with("cart="));
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["quantity"][0],
        "Sorry. This product is currently out of stock."
    );
}

#[tokio::test]
async fn test_ajax_missing_variant_is_required() {
    let app = app();
    let request = ajax(post_form(ADD_URL, "quantity=1"));
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["variant"][0], "This field is required.");
}

#[tokio::test]
async fn test_form_add_redirects_to_cart() {
    let app = app();
    let response = app
        .router
        .oneshot(post_form(ADD_URL, "variant=101&quantity=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/cart/");
}

#[tokio::test]
async fn test_invalid_form_rerenders_product_page() {
    let app = app();
    let response = app
        .router
        .oneshot(post_form(ADD_URL, "variant=101&quantity=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().starts_with("cart="));
    let body = body_text(response).await;
    assert!(body.contains("Ensure this value is greater than or equal to 1."));
    assert!(body.contains(r#"value="0""#));
}

#[tokio::test]
async fn test_single_variant_product_needs_no_variant() {
    let app = app();
    let request = ajax(post_form("/products/plain-white-tee-2/add/", "quantity=3"));
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cookie_keeps_adding_to_same_cart() {
    let app = app();
    let first = app
        .router
        .clone()
        .oneshot(ajax(post_form(ADD_URL, "variant=102&quantity=2")))
        .await
        .unwrap();
    let cookie = set_cookie(&first).unwrap();

    // Medium has three in stock; two are already in the cart.
    let request = with_cookie(ajax(post_form(ADD_URL, "variant=102&quantity=2")), &cookie);
    let second = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(set_cookie(&second).unwrap(), cookie);
    assert_eq!(
        body_json(second).await["error"]["quantity"][0],
        "Only 3 remaining in stock."
    );

    let request = with_cookie(ajax(post_form(ADD_URL, "variant=102&quantity=1")), &cookie);
    let third = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(third.status(), StatusCode::OK);
    assert_eq!(app.carts.cart_count().await, 1);

    let page = app.router.oneshot(with_cookie(get("/cart/"), &cookie)).await.unwrap();
    let body = body_text(page).await;
    assert!(body.contains("Crab Tee"));
    assert!(body.contains("Items: 3"));
}

#[tokio::test]
async fn test_tampered_cookie_starts_new_cart() {
    let app = app();
    let request = with_cookie(
        ajax(post_form(ADD_URL, "variant=101&quantity=1")),
        "cart=not-a-signed-token",
    );
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_ne!(set_cookie(&response).unwrap(), "cart=not-a-signed-token");
    assert_eq!(app.carts.cart_count().await, 1);
}

#[tokio::test]
async fn test_authenticated_viewer_gets_no_cookie() {
    let app = app();
    let viewer = Viewer::Customer(UserId::new(5));
    let request = as_viewer(post_form(ADD_URL, "variant=101&quantity=4"), viewer);
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(set_cookie(&response).is_none());

    let invalid = as_viewer(ajax(post_form(ADD_URL, "variant=103&quantity=1")), viewer);
    let rejected = app.router.clone().oneshot(invalid).await.unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&rejected).is_none());

    let page = app
        .router
        .oneshot(as_viewer(get("/cart/"), viewer))
        .await
        .unwrap();
    assert!(body_text(page).await.contains("Items: 4"));
}

#[tokio::test]
async fn test_cart_page_without_cart_is_empty() {
    let app = app();
    let response = app.router.oneshot(get("/cart/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Your cart is empty."));
    assert_eq!(app.carts.cart_count().await, 0);
}

#[tokio::test]
async fn test_oversized_cookie_lifetime_does_not_fail_add() {
    let app = app_with(Settings {
        cart_cookie_max_age_days: i64::MAX / 1000,
        ..Settings::default()
    });
    let request = ajax(post_form(ADD_URL, "variant=101&quantity=1"));
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().starts_with("cart="));
}
