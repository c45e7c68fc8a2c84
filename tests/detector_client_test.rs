//! Integration tests for the HTTP detector client against a mock server

use mockito::Matcher;
use serde_json::json;
use veil::adapters::{EntityDetector, HttpDetectorClient};
use veil::config::{secret_string, ServiceConfig};

fn service_config() -> ServiceConfig {
    ServiceConfig {
        timeout_seconds: 1,
        ..ServiceConfig::default()
    }
}

#[tokio::test]
async fn test_detect_decodes_spans_and_keeps_extra_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/analyze")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "text": "John Doe called me",
            "language": "en"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{
                "start": 0,
                "end": 8,
                "entity_type": "PERSON",
                "score": 0.85,
                "recognition_metadata": {"recognizer_name": "SpacyRecognizer"}
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let client =
        HttpDetectorClient::new(format!("{}/analyze", server.url()), &service_config()).unwrap();
    let spans = client.detect("John Doe called me", "en").await.unwrap();

    mock.assert_async().await;
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].entity_type, "PERSON");
    assert_eq!((spans[0].start, spans[0].end), (0, 8));
    assert!(spans[0].extra.contains_key("recognition_metadata"));
}

#[tokio::test]
async fn test_detect_empty_array() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/analyze")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client =
        HttpDetectorClient::new(format!("{}/analyze", server.url()), &service_config()).unwrap();
    assert!(client.detect("nothing here", "en").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_detect_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/analyze")
        .with_status(500)
        .with_body("internal error: John Doe called me")
        .create_async()
        .await;

    let client =
        HttpDetectorClient::new(format!("{}/analyze", server.url()), &service_config()).unwrap();
    let err = client.detect("John Doe called me", "en").await.unwrap_err();

    assert_eq!(err.status, Some(500));
    // Upstream bodies may echo the submitted text and are never surfaced
    assert!(!err.cause.contains("John Doe"));
}

#[tokio::test]
async fn test_detect_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/analyze")
        .with_status(200)
        .with_body(r#"{"spans": []}"#)
        .create_async()
        .await;

    let client =
        HttpDetectorClient::new(format!("{}/analyze", server.url()), &service_config()).unwrap();
    let err = client.detect("John Doe called me", "en").await.unwrap_err();

    assert_eq!(err.status, None);
    assert!(err.cause.starts_with("malformed response"));
}

#[tokio::test]
async fn test_detect_sends_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/analyze")
        .match_header("authorization", "Bearer detector-token")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = ServiceConfig {
        api_key: Some(secret_string("detector-token".to_string())),
        ..service_config()
    };
    let client = HttpDetectorClient::new(format!("{}/analyze", server.url()), &config).unwrap();
    client.detect("hello", "en").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_detect_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpDetectorClient::new(format!("http://{address}/analyze"), &service_config()).unwrap();
    let err = client.detect("hello", "en").await.unwrap_err();

    assert_eq!(err.status, None);
    assert_eq!(err.cause, "connection failed");
}

#[tokio::test]
async fn test_detect_times_out_on_silent_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    // Accept connections and never answer
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client =
        HttpDetectorClient::new(format!("http://{address}/analyze"), &service_config()).unwrap();
    let err = client.detect("hello", "en").await.unwrap_err();

    assert_eq!(err.status, None);
    assert_eq!(err.cause, "timed out");
}
