use anyhow::Result;
use pagerduty_lite::{
    clients::events::EventsClient,
    config::Config,
    error::{EXIT_FATAL, EXIT_REJECTED, EventError},
    models::{
        event::{Action, EventInput, EventRequest},
        status::DeliveryStatus,
    },
};
use serde_json::Value;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const SUCCESS_BODY: &str =
    r#"{"status":"success","message":"Event processed","dedup_key":"db01-disk"}"#;
const INVALID_BODY: &str = r#"{"status":"invalid event","message":"Event object is invalid","errors":["'routing_key' is missing or blank"]}"#;

fn config_for(server: &MockServer) -> Config {
    Config {
        events_url: format!("{}/v2/enqueue", server.uri()),
        ..Config::default()
    }
}

fn trigger_request() -> Result<EventRequest> {
    let input = EventInput::new("rk".into(), "db01-disk".into(), Action::Trigger)
        .with_summary("Disk full".into())
        .with_severity("error".into());

    Ok(EventRequest::build(&input)?)
}

/// Test: Accepted events are sent once with the JSON and versioned accept headers
#[tokio::test]
async fn test_accepted_event() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/enqueue"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(header("accept", "application/vnd.pagerduty+json;version=2"))
        .respond_with(ResponseTemplate::new(202).set_body_string(SUCCESS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = EventsClient::new(&config_for(&server))?;
    let response = client.send_event(&trigger_request()?).await?;

    assert_eq!(response.status_code, 202);
    assert_eq!(response.body, SUCCESS_BODY);
    assert_eq!(response.delivery, DeliveryStatus::Accepted);
    assert_eq!(response.delivery.exit_code(), 0);

    let requests = server.received_requests().await.unwrap_or_default();
    let sent: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(sent["event_action"], "trigger");
    assert_eq!(sent["dedup_key"], "db01-disk");
    assert_eq!(sent["payload"]["custom_details"], serde_json::json!({}));

    Ok(())
}

/// Test: A body without the success marker is a rejection, not an error
#[tokio::test]
async fn test_rejected_event() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(INVALID_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = EventsClient::new(&config_for(&server))?;
    let response = client.send_event(&trigger_request()?).await?;

    assert_eq!(response.delivery, DeliveryStatus::Rejected);
    assert_eq!(response.delivery.exit_code(), EXIT_REJECTED);

    let reply = response.reply().unwrap_or_default();
    assert_eq!(reply.status.as_deref(), Some("invalid event"));
    assert_eq!(reply.errors.len(), 1);

    Ok(())
}

/// Test: Classification looks only at the body text, not the HTTP status or JSON structure
#[tokio::test]
async fn test_classification_is_by_body_text() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"upstream said: {"status":"success","message":"ok"} (truncated"#),
        )
        .mount(&server)
        .await;

    let client = EventsClient::new(&config_for(&server))?;
    let response = client.send_event(&trigger_request()?).await?;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.delivery, DeliveryStatus::Accepted);
    assert!(response.reply().is_none());

    Ok(())
}

/// Test: Connection failures are fatal and never retried
#[tokio::test]
async fn test_connection_failure_is_fatal() -> Result<()> {
    let config = Config {
        events_url: "http://127.0.0.1:1/v2/enqueue".to_string(),
        request_timeout_seconds: Some(5),
        ..Config::default()
    };

    let client = EventsClient::new(&config)?;
    let err = client.send_event(&trigger_request()?).await.unwrap_err();

    assert!(matches!(err, EventError::Transport(_)));
    assert_eq!(err.exit_code(), EXIT_FATAL);

    Ok(())
}
