mod common;

use common::{closed_url, start_stub, StubConfig};
use site_builder::upstream::{validate_status, UpstreamClient, ValidationFailure};

fn expected_sources() -> Vec<String> {
    vec!["amazon".to_string(), "cabelas".to_string()]
}

#[tokio::test]
async fn healthy_server_reports_counts_and_sites() {
    let server = start_stub(StubConfig::healthy(12)).await;

    let status = UpstreamClient::new(server.url()).check_status().await;
    assert!(status.healthy);
    assert_eq!(status.products_count, 12);
    assert_eq!(status.available_sites, vec!["amazon", "cabelas"]);
    assert_eq!(status.error, None);
    assert!(validate_status(&status, &expected_sources()).is_ok());

    server.stop().await;
}

#[tokio::test]
async fn reported_count_wins_over_array_length() {
    let mut config = StubConfig::healthy(3);
    config.count = Some(250);
    let server = start_stub(config).await;

    let status = UpstreamClient::new(&format!("{}/", server.url())).check_status().await;
    assert_eq!(status.products_count, 250);
    assert_eq!(status.url, server.url());

    server.stop().await;
}

#[tokio::test]
async fn non_200_health_is_unhealthy_and_fails_validation() {
    let mut config = StubConfig::healthy(12);
    config.health_status = 503;
    let server = start_stub(config).await;

    let status = UpstreamClient::new(server.url()).check_status().await;
    assert!(!status.healthy);
    assert!(status.error.as_deref().unwrap_or_default().contains("503"));
    assert!(matches!(
        validate_status(&status, &expected_sources()),
        Err(ValidationFailure::Unhealthy { .. })
    ));

    server.stop().await;
}

#[tokio::test]
async fn unreachable_server_never_raises() {
    let url = closed_url().await;

    let status = UpstreamClient::new(&url).check_status().await;
    assert!(!status.healthy);
    assert_eq!(status.products_count, 0);
    assert!(status.available_sites.is_empty());
    assert!(status.error.is_some());

    let sample = UpstreamClient::new(&url).fetch_product_sample().await;
    assert_eq!(sample.total(), 0);
    assert!(sample.products.is_empty());
}

#[tokio::test]
async fn unknown_sources_fail_validation() {
    let mut config = StubConfig::healthy(4);
    config.sites = vec!["rei".to_string()];
    let server = start_stub(config).await;

    let status = UpstreamClient::new(server.url()).check_status().await;
    assert!(status.healthy);
    assert!(matches!(
        validate_status(&status, &expected_sources()),
        Err(ValidationFailure::MissingSources { .. })
    ));

    server.stop().await;
}

#[tokio::test]
async fn failing_products_endpoint_reports_zero_but_stays_healthy() {
    let mut config = StubConfig::healthy(12);
    config.products_status = 500;
    let server = start_stub(config).await;

    let status = UpstreamClient::new(server.url()).check_status().await;
    assert!(status.healthy);
    assert_eq!(status.products_count, 0);
    assert_eq!(status.available_sites, vec!["amazon", "cabelas"]);
    assert_eq!(
        validate_status(&status, &expected_sources()),
        Err(ValidationFailure::NoProducts { count: 0 })
    );

    server.stop().await;
}

#[tokio::test]
async fn failing_sites_endpoint_reports_no_sources() {
    let mut config = StubConfig::healthy(12);
    config.sites_status = 404;
    let server = start_stub(config).await;

    let status = UpstreamClient::new(server.url()).check_status().await;
    assert!(status.healthy);
    assert_eq!(status.products_count, 12);
    assert!(status.available_sites.is_empty());
    assert!(matches!(
        validate_status(&status, &expected_sources()),
        Err(ValidationFailure::MissingSources { .. })
    ));

    server.stop().await;
}
