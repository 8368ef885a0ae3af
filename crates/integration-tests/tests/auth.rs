//! Login, logout and dashboard access against a mock authentication API.

#![allow(clippy::unwrap_used)]

use nebula_integration_tests::{REJECTION_MESSAGE, TestContext, VALID_PASSWORD, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_login_page_renders() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/login\""));
}

#[tokio::test]
async fn test_login_success_redirects_to_dashboard() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/login",
            &[("email", "pilot@nebula.tech"), ("password", VALID_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/dashboard"));

    let (status, body) = ctx.get("/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("nebula-admin"));
}

#[tokio::test]
async fn test_login_rejection_shows_server_message() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/login",
            &[("email", "pilot@nebula.tech"), ("password", "wrong")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&resp).is_none());

    let body = resp.text().await.unwrap();
    assert!(body.contains(REJECTION_MESSAGE));
    // Email is kept for a retry
    assert!(body.contains("pilot@nebula.tech"));

    let (_, dashboard) = ctx.get("/dashboard").await;
    assert!(!dashboard.contains("nebula-admin"));
}

#[tokio::test]
async fn test_login_with_api_offline() {
    let ctx = TestContext::offline().await;

    let resp = ctx
        .post_form(
            "/login",
            &[("email", "pilot@nebula.tech"), ("password", VALID_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = resp.text().await.unwrap();
    assert!(body.contains("The authentication server is offline. Please try again later."));
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/login", &[("email", "not-an-email"), ("password", "x")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Enter a valid email address."));
}

#[tokio::test]
async fn test_login_requires_password() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/login", &[("email", "pilot@nebula.tech"), ("password", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Access key is required."));
}

#[tokio::test]
async fn test_logout_clears_login_but_keeps_cart() {
    let ctx = TestContext::new().await;
    let product = ctx.catalog.products().first().unwrap().clone();

    ctx.post_form("/cart/add", &[("product_id", &product.id.to_string())])
        .await;
    ctx.post_form(
        "/login",
        &[("email", "pilot@nebula.tech"), ("password", VALID_PASSWORD)],
    )
    .await;

    let resp = ctx.post_form("/logout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/login"));

    let (_, dashboard) = ctx.get("/dashboard").await;
    assert!(!dashboard.contains("nebula-admin"));

    let (_, count) = ctx.get("/cart/count").await;
    assert!(count.contains(">1<"));
}

#[tokio::test]
async fn test_login_is_rate_limited() {
    let ctx = TestContext::new().await;

    let mut limited = false;
    for _ in 0..20 {
        let resp = ctx
            .post_form("/login", &[("email", "pilot@nebula.tech"), ("password", "wrong")])
            .await;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            limited = true;
            break;
        }
    }
    assert!(limited);
}

#[tokio::test]
async fn test_login_sends_email_as_entered() {
    let ctx = TestContext::new().await;

    ctx.post_form(
        "/login",
        &[("email", "  Pilot@Nebula.tech "), ("password", VALID_PASSWORD)],
    )
    .await;

    assert_eq!(ctx.received_emails(), vec!["Pilot@Nebula.tech".to_string()]);
}

#[tokio::test]
async fn test_rate_limit_ignores_forwarded_for_from_untrusted_peer() {
    let ctx = TestContext::new().await;

    let mut limited = false;
    for i in 0..20 {
        let resp = ctx
            .client
            .post(ctx.url("/login"))
            .header("x-forwarded-for", format!("10.0.0.{i}"))
            .form(&[("email", "pilot@nebula.tech"), ("password", "wrong")])
            .send()
            .await
            .unwrap();
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            limited = true;
            break;
        }
    }
    assert!(limited);
}
