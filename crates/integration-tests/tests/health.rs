//! Integration tests for the health endpoints.

use reqwest::StatusCode;
use tradepost_integration_tests::TestContext;

#[tokio::test]
async fn test_health_returns_ok() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read response"), "ok");
}

#[tokio::test]
async fn test_readiness_pings_the_database() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");

    assert_eq!(resp.status(), StatusCode::OK);
}
