// Tests for crawl orchestration

use std::sync::{Arc, Mutex};
use strider_core::crawl::{CrawlOptions, DEFAULT_STEP_BUDGET, execute_crawl};
use strider_core::report::{gather_report_data, generate_text_report};
use strider_scanner::{FailurePolicy, ScanError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_page(mock_server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(mock_server)
        .await;
}

// ============================================================================
// CrawlOptions Tests
// ============================================================================

#[test]
fn test_crawl_options_defaults() {
    let options = CrawlOptions::new("http://example.com/");

    assert_eq!(options.url, "http://example.com/");
    assert_eq!(options.step_budget, DEFAULT_STEP_BUDGET);
    assert_eq!(options.timeout_secs, 10);
    assert!(options.user_agent.is_none());
    assert_eq!(options.failure_policy, FailurePolicy::Abort);
    assert!(!options.show_progress_bars);
}

#[test]
fn test_fetcher_config_from_options() {
    let mut options = CrawlOptions::new("http://example.com/");
    options.timeout_secs = 3;
    options.user_agent = Some("custom-agent/1.0".to_string());

    let config = options.fetcher_config();
    assert_eq!(config.timeout_secs, 3);
    assert_eq!(config.user_agent, "custom-agent/1.0");
}

#[test]
fn test_fetcher_config_default_user_agent() {
    let config = CrawlOptions::new("http://example.com/").fetcher_config();
    assert!(config.user_agent.starts_with("strider/"));
}

// ============================================================================
// execute_crawl Tests
// ============================================================================

#[tokio::test]
async fn test_execute_crawl_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body><p>Hello world</p><a href="/about"></a><img src="a.png"></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        r#"<title>About</title><p>About us</p><img src="a.png"><img src="b.png">"#,
    )
    .await;

    let seed = format!("{}/", mock_server.uri());
    let mut options = CrawlOptions::new(seed.clone());
    options.step_budget = 1;

    let session = execute_crawl(options, None).await.unwrap();

    assert_eq!(session.len(), 2);
    assert_eq!(session.record(1).unwrap().url, format!("{}about", seed));

    let data = gather_report_data(&session);
    assert_eq!(data.stats.unique_images, 2);
    assert_eq!(data.stats.average_word_count, 4);
    assert_eq!(data.stats.average_title_length, 9);
}

#[tokio::test]
async fn test_execute_crawl_reports_progress() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<a href="/next"></a>"#).await;
    mount_page(&mock_server, "/next", "<p>next</p>").await;

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();

    let mut options = CrawlOptions::new(format!("{}/", mock_server.uri()));
    options.step_budget = 1;

    execute_crawl(
        options,
        Some(Arc::new(move |msg: String| {
            messages_clone.lock().unwrap().push(msg);
        })),
    )
    .await
    .unwrap();

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("[0] "));
    assert!(messages[1].starts_with("[1] ") && messages[1].ends_with("/next"));
}

#[tokio::test]
async fn test_execute_crawl_zero_budget_report() {
    let mut options = CrawlOptions::new("http://127.0.0.1:9/");
    options.step_budget = 0;

    let session = execute_crawl(options, None).await.unwrap();
    assert!(session.is_empty());

    let report = generate_text_report(&gather_report_data(&session));
    assert!(report.contains("Pages crawled:            0"));
}

#[tokio::test]
async fn test_execute_crawl_insufficient_links() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<a href="/one"></a>"#).await;
    mount_page(&mock_server, "/one", "<p>one</p>").await;

    let mut options = CrawlOptions::new(format!("{}/", mock_server.uri()));
    options.step_budget = 2;

    let err = execute_crawl(options, None).await.unwrap_err();
    assert!(matches!(
        err,
        ScanError::ItineraryExhausted {
            required: 2,
            available: 1
        }
    ));
    assert!(err.to_string().contains("Insufficient links to traverse"));
}

#[tokio::test]
async fn test_execute_crawl_degrade_policy() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<a href="/broken"></a>"#).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut options = CrawlOptions::new(format!("{}/", mock_server.uri()));
    options.step_budget = 1;
    options.timeout_secs = 1;
    options.failure_policy = FailurePolicy::Degrade;

    let session = execute_crawl(options, None).await.unwrap();

    assert_eq!(session.len(), 2);
    assert!(session.record(1).unwrap().is_degraded());
}
