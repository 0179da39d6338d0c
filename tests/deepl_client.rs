#![allow(clippy::unwrap_used)]
//! Translation client tests against a local one-shot HTTP server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use wikimerge::ErrorKind;
use wikimerge::translation::{MAX_TEXT_CHARS, TranslationClient};

/// Serves a single response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    serve_raw(format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
    .await
}

/// Writes `response` verbatim to the first connection.
async fn serve_raw(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (endpoint, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

/// An endpoint nothing is listening on.
async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    endpoint
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_translate_many_sends_one_request_and_keeps_order() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"translations":[{"detected_source_language":"ES","text":"Hello"},{"detected_source_language":"ES","text":"World"}]}"#,
    )
    .await;
    let client = TranslationClient::new(endpoint, "secret-key".to_string());

    let result = client
        .translate_many(&texts(&["Hola", "Mundo"]), "es", "en-us")
        .await
        .unwrap();

    assert_eq!(result, ["Hello", "World"]);

    let request = server.await.unwrap();
    let lowered = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /v2/translate "));
    assert!(lowered.contains("authorization: deepl-auth-key secret-key"));
    assert!(request.contains(r#""text":["Hola","Mundo"]"#));
    assert!(request.contains(r#""source_lang":"ES""#));
    assert!(request.contains(r#""target_lang":"EN-US""#));
}

#[tokio::test]
async fn test_translate_one_returns_single_text() {
    let (endpoint, server) = serve_once("200 OK", r#"{"translations":[{"text":"Good morning"}]}"#).await;
    let client = TranslationClient::new(format!("{endpoint}/"), "k".to_string());

    let result = client.translate_one("Buenos días", "es", "en-gb").await.unwrap();

    assert_eq!(result, "Good morning");
    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v2/translate "));
    assert!(request.contains(r#""target_lang":"EN-GB""#));
}

#[tokio::test]
async fn test_translate_many_opt_sends_missing_entries_as_empty() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"translations":[{"text":"Hello"},{"text":""}]}"#,
    )
    .await;
    let client = TranslationClient::new(endpoint, "k".to_string());

    let result = client
        .translate_many_opt(&[Some("Hola"), None], "es", "en-us")
        .await
        .unwrap();

    assert_eq!(result, ["Hello", ""]);
    let request = server.await.unwrap();
    assert!(request.contains(r#""text":["Hola",""]"#));
}

#[tokio::test]
async fn test_non_success_status_is_a_service_error() {
    let (endpoint, _server) = serve_once("456 Quota Exceeded", r#"{"message":"Quota exceeded"}"#).await;
    let client = TranslationClient::new(endpoint, "k".to_string());

    let err = client
        .translate_many(&texts(&["Hola"]), "es", "en-us")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    let message = err.to_string();
    assert!(message.contains("456"));
    assert!(message.contains("Quota exceeded"));
}

#[tokio::test]
async fn test_truncated_error_body_still_reports_the_status() {
    // The connection closes long before the announced body length.
    let (endpoint, _server) = serve_raw(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 500\r\nConnection: close\r\n\r\npartial"
            .to_string(),
    )
    .await;
    let client = TranslationClient::new(endpoint, "k".to_string());

    let err = client
        .translate_many(&texts(&["Hola"]), "es", "en-us")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("<unreadable body>"));
}

#[tokio::test]
async fn test_oversized_text_never_reaches_the_service() {
    let client = TranslationClient::new(closed_endpoint().await, "k".to_string());
    let texts = vec!["Hola".to_string(), "a".repeat(MAX_TEXT_CHARS + 1)];

    let err = client.translate_many(&texts, "es", "en-us").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputTooLarge);
}

#[tokio::test]
async fn test_forbidden_is_a_service_error() {
    let (endpoint, _server) = serve_once("403 Forbidden", "").await;
    let client = TranslationClient::new(endpoint, "bad-key".to_string());

    let err = client.translate_one("Hola", "es", "en-us").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
}

#[tokio::test]
async fn test_unexpected_body_is_a_decode_error() {
    let (endpoint, _server) = serve_once("200 OK", "not json at all").await;
    let client = TranslationClient::new(endpoint, "k".to_string());

    let err = client
        .translate_many(&texts(&["Hola"]), "es", "en-us")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_wrong_translation_count_is_a_decode_error() {
    let (endpoint, _server) = serve_once("200 OK", r#"{"translations":[{"text":"Hello"}]}"#).await;
    let client = TranslationClient::new(endpoint, "k".to_string());

    let err = client
        .translate_many(&texts(&["Hola", "Mundo"]), "es", "en-us")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_connection_error() {
    let client = TranslationClient::new(closed_endpoint().await, "k".to_string());

    let err = client.translate_one("Hola", "es", "en-us").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn test_short_circuits_never_reach_the_network() {
    let client = TranslationClient::new(closed_endpoint().await, "k".to_string());

    assert_eq!(client.translate_one(" \n ", "es", "en-us").await.unwrap(), "");
    assert_eq!(
        client.translate_one("", "es", "en-us").await.unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        client
            .translate_many(&texts(&["", "  "]), "es", "en-us")
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );
}
