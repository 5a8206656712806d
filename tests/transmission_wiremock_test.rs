mod common;

use common::{CapturedLogs, test_config};
use error_logger::buffer::Batch;
use error_logger::collector::{Collector, CollectorConfig, ErrorEvents, ErrorReport};
use error_logger::domain::{BrowserName, ErrorRecord};
use error_logger::parser::EnvironmentProbe;
use error_logger::sender::{BatchTransmitter, ClientConfig, HttpClient};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn firefox() -> EnvironmentProbe {
    EnvironmentProbe {
        install_trigger: true,
        ..EnvironmentProbe::default()
    }
}

fn endpoint_config(server: &MockServer) -> CollectorConfig {
    CollectorConfig {
        endpoint: Some(format!("{}/logs", server.uri())),
        ..test_config(Duration::from_secs(1))
    }
}

#[tokio::test]
async fn test_batch_is_posted_as_json_array_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collector =
        Collector::new(endpoint_config(&mock_server), &firefox(), &ErrorEvents::new()).unwrap();

    collector.log_error(
        &ErrorReport::new("first").with_stack("at foo (app.js:42:7)"),
        None,
    );
    collector.log_error(&ErrorReport::new("second"), None);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(collector.buffered_len(), 0);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let records: Vec<ErrorRecord> = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "first");
    assert_eq!(records[0].line, Some(42));
    assert_eq!(records[0].column, Some(7));
    assert_eq!(records[1].message, "second");
    for record in &records {
        assert_eq!(record.source, "app.js");
        assert_eq!(record.app_version, "1.0.0");
        assert_eq!(record.browser, BrowserName::Firefox);
    }
}

#[tokio::test]
async fn test_rejected_batch_is_dropped_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let collector =
        Collector::new(endpoint_config(&mock_server), &firefox(), &ErrorEvents::new()).unwrap();
    collector.log_error(&ErrorReport::new("will be lost"), None);

    // Two ticks: the second has nothing to resend.
    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(collector.buffered_len(), 0);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_slow_endpoint_does_not_block_capture_or_next_tick() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let collector =
        Collector::new(endpoint_config(&mock_server), &firefox(), &ErrorEvents::new()).unwrap();

    collector.log_error(&ErrorReport::new("first tick"), None);
    tokio::time::sleep(Duration::from_millis(1200)).await;

    // The first request is still in flight.
    collector.log_error(&ErrorReport::new("second tick"), None);
    assert_eq!(collector.buffered_len(), 1);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(collector.buffered_len(), 0);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_contained() {
    let config = CollectorConfig {
        // Discard port; nothing listens there.
        endpoint: Some("http://127.0.0.1:9/logs".to_string()),
        ..test_config(Duration::from_secs(1))
    };
    let collector = Collector::new(config, &firefox(), &ErrorEvents::new()).unwrap();
    collector.log_error(&ErrorReport::new("nobody listening"), None);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(collector.buffered_len(), 0);
}

fn direct_batch(message: &str) -> Batch {
    Batch::new(vec![ErrorRecord {
        message: message.to_string(),
        source: "app.js".to_string(),
        line: None,
        column: None,
        app_version: "1.0.0".to_string(),
        browser: BrowserName::Unknown,
        objects: None,
    }])
}

#[tokio::test]
async fn test_transmitter_reports_status_and_counts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(ClientConfig::new(format!("{}/logs", mock_server.uri()))).unwrap();
    let transmitter = BatchTransmitter::new(client);
    let batch = direct_batch("direct");
    let batch_id = batch.id().to_string();

    let result = transmitter.transmit(batch).await.unwrap();

    assert!(result.success);
    assert_eq!(result.status_code, 202);
    assert_eq!(result.records_sent, 1);
    assert_eq!(result.batch_id, batch_id);
    assert!(result.bytes_sent > 0);

    let stats = transmitter.client.connection_stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.successful_requests, 1);
}

#[tokio::test]
async fn test_rejected_batch_log_carries_request_counters() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(ClientConfig::new(format!("{}/logs", mock_server.uri()))).unwrap();
    let transmitter = BatchTransmitter::new(client);

    let result = transmitter.transmit(direct_batch("rejected")).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, 503);
    let output = logs.contents();
    assert!(output.contains("HTTP 503"));
    assert!(output.contains("requests=1"));
    assert!(output.contains("failed=1"));
}
