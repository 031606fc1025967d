//! The HTTP predictor against a throwaway local server.
//!
//! Each test binds a listener on an ephemeral port, serves exactly one canned
//! response, and hands back the raw request it received.

use moodji_client::error::{CONNECTION_MESSAGE, GENERIC_SERVICE_MESSAGE};
use moodji_client::{HttpPredictor, PredictError, PredictionService, Sentiment};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct OneShotServer {
    endpoint: String,
    request: JoinHandle<String>,
}

async fn serve_once(status: &'static str, body: &'static str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let request = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        request
    });

    OneShotServer { endpoint, request }
}

/// Read headers, then as many body bytes as content-length announces.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

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

#[tokio::test]
async fn posts_word_as_json() {
    let server = serve_once(
        "200 OK",
        r#"{"emoji":"☀️","sentiment":"positive","confidence":0.92}"#,
    )
    .await;
    let predictor = HttpPredictor::new(&server.endpoint).unwrap();

    let result = predictor.predict("sunshine").await.unwrap();
    assert_eq!(result.emoji, "☀️");
    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.confidence, 0.92);

    let request = server.request.await.unwrap();
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST /predict HTTP/1.1\r\n"), "{request}");
    assert!(lower.contains("content-type: application/json"), "{request}");
    assert!(request.ends_with(r#"{"word":"sunshine"}"#), "{request}");
}

#[tokio::test]
async fn error_payload_becomes_service_error() {
    let server = serve_once("400 Bad Request", r#"{"error":"word too short"}"#).await;
    let predictor = HttpPredictor::new(&server.endpoint).unwrap();

    let err = predictor.predict("a").await.unwrap_err();
    assert_eq!(err, PredictError::Service("word too short".to_string()));
    assert_eq!(err.user_message(), "word too short");
}

#[tokio::test]
async fn unparsable_error_body_falls_back() {
    let server = serve_once("502 Bad Gateway", "upstream exploded").await;
    let predictor = HttpPredictor::new(&server.endpoint).unwrap();

    let err = predictor.predict("coffee").await.unwrap_err();
    assert_eq!(
        err,
        PredictError::Service(GENERIC_SERVICE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let server = serve_once("200 OK", r#"{"emoji":"☀️"}"#).await;
    let predictor = HttpPredictor::new(&server.endpoint).unwrap();

    let err = predictor.predict("sunshine").await.unwrap_err();
    assert!(matches!(err, PredictError::Transport(_)), "{err:?}");
    assert_eq!(err.user_message(), CONNECTION_MESSAGE);
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // bind then drop, so nothing is listening on the port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let predictor = HttpPredictor::new(&endpoint).unwrap();
    let err = predictor.predict("rain").await.unwrap_err();

    assert!(matches!(err, PredictError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn keeps_endpoint_path_prefix() {
    let predictor = HttpPredictor::new("http://localhost:5000/api/").unwrap();
    assert_eq!(predictor.url().as_str(), "http://localhost:5000/api/predict");
}
