//! Landing page, catalog browsing, contact form and response headers.

#![allow(clippy::unwrap_used)]

use nebula_integration_tests::{TestContext, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_page() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"contact\""));
    assert!(body.contains("Nebula Tech. All Rights Reserved"));
}

#[tokio::test]
async fn test_explore_first_page_and_pagination() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/explore").await;
    assert_eq!(status, StatusCode::OK);

    // 50 generated products at 12 per page
    for label in ["01", "02", "03", "04", "05"] {
        assert!(body.contains(&format!(">{label}<")), "missing page {label}");
    }
    assert!(!body.contains(">06<"));
    assert!(body.contains("Watches Unit 100"));
    assert!(body.contains("Audio Unit 111"));
    assert!(!body.contains("Watches Unit 112"));
    assert!(body.contains("50 units indexed"));
}

#[tokio::test]
async fn test_explore_second_page() {
    let ctx = TestContext::new().await;
    let (_, body) = ctx.get("/explore?page=2").await;
    assert!(body.contains("Watches Unit 112"));
    assert!(!body.contains("Watches Unit 100"));
}

#[tokio::test]
async fn test_explore_category_filter() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/explore?category=Gaming").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gaming Unit 102"));
    assert!(!body.contains("Watches Unit"));
    assert!(body.contains("12 units indexed"));
    // A single page needs no pagination
    assert!(!body.contains("class=\"pagination\""));
}

#[tokio::test]
async fn test_explore_out_of_range_page_is_empty() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/explore?page=6").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No units in this sector."));
}

#[tokio::test]
async fn test_explore_unknown_category_is_empty() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/explore?category=Furniture").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No units in this sector."));
    assert!(body.contains("0 units indexed"));
}

#[tokio::test]
async fn test_contact_submission() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/contact",
            &[
                ("name", "Ada"),
                ("email", "ada@nebula.tech"),
                ("message", "Requesting access."),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/?contact=sent#contact")
    );

    let (_, body) = ctx.get("/?contact=sent").await;
    assert!(body.contains("Message received. Welcome to the void."));
}

#[tokio::test]
async fn test_contact_submission_invalid() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/contact",
            &[("name", " "), ("email", "nope"), ("message", "")],
        )
        .await;
    assert_eq!(
        location(&resp).as_deref(),
        Some("/?contact=invalid#contact")
    );
}

#[tokio::test]
async fn test_dashboard_tabs() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$2,409,102"));

    let (_, body) = ctx.get("/dashboard?tab=inventory").await;
    assert!(body.contains("pill-tag"));

    let (_, body) = ctx.get("/dashboard?tab=orders").await;
    assert!(body.contains("No records in this sector."));

    let (status, _) = ctx.get("/dashboard?tab=bogus").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
    let headers = resp.headers();

    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_request_id_echo() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "trace-abc.123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-abc.123");

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    let minted = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(minted.len(), 36);
}

#[tokio::test]
async fn test_static_assets_served() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/static/css/main.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}
