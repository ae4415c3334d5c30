use crate::error::TransportError;
use aippt_common::ServiceConfig;
use aippt_protocol::{Deck, GenerationRequest};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::{debug, info, warn};

pub const API_KEY_HEADER: &str = "api-key";

/// Longest slice of an error body that ends up in the log.
const LOGGED_BODY_LIMIT: usize = 512;

/// HTTP client for the presentation generation service.
///
/// Built once from the service configuration; every request carries the
/// static `api-key` header.
#[derive(Clone, Debug)]
pub struct TransportClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TransportClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| TransportError::InvalidHeader(API_KEY_HEADER))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one generation request. No retries: a failure is reported as is.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Deck, TransportError> {
        let payload = request.payload();
        debug!(
            endpoint = %self.endpoint,
            topic = %request.topic,
            n_slides = request.slide_count,
            "sending generation request"
        );

        let resp = self.http.post(&self.endpoint).json(&payload).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate(&body), "generation service error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let deck: Deck = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate(&body), "undecodable generation response");
            TransportError::Decode(e)
        })?;
        deck.validate().map_err(|problem| {
            warn!(%problem, "rejecting generated deck");
            TransportError::InvalidDeck(problem)
        })?;

        info!(title = %deck.title, slides = deck.slides.len(), "deck received");
        Ok(deck)
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aippt_protocol::{FileType, Language};
    use std::io::Read;
    use std::sync::mpsc;
    use std::thread;
    use url::Url;

    struct Captured {
        method: String,
        path: String,
        api_key: Option<String>,
        body: serde_json::Value,
    }

    /// Serves exactly one request with the given status and body, reporting
    /// what the client sent.
    fn one_shot_server(status: u16, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let mut raw = String::new();
            request.as_reader().read_to_string(&mut raw).unwrap();
            let api_key = request
                .headers()
                .iter()
                .find(|h| h.field.equiv(API_KEY_HEADER))
                .map(|h| h.value.as_str().to_string());
            tx.send(Captured {
                method: request.method().to_string(),
                path: request.url().to_string(),
                api_key,
                body: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
            })
            .unwrap();
            let response = tiny_http::Response::from_string(body)
                .with_status_code(tiny_http::StatusCode(status));
            request.respond(response).unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    fn client_for(base: &str) -> TransportClient {
        TransportClient::new(&ServiceConfig {
            base_url: Url::parse(base).unwrap(),
            api_key: "test-key".to_string(),
        })
        .unwrap()
    }

    fn cats_request() -> GenerationRequest {
        GenerationRequest {
            topic: "Cats".to_string(),
            objective: "Inform".to_string(),
            target_audience: "Kids".to_string(),
            slide_count: 3,
            slide_breakdown: "intro,body,end".to_string(),
            language: Language::En,
            source_file_url: "https://x.com/a.pdf".to_string(),
            source_file_type: FileType::Pdf,
        }
    }

    #[tokio::test]
    async fn posts_payload_with_api_key() {
        let (base, rx) = one_shot_server(
            200,
            concat!(
                r#"{"title":"Cats","description":"d","slides":["#,
                r#"{"title":"A","content":"a"},{"title":"B","content":"b"}]}"#,
            ),
        );
        let deck = client_for(&base).generate(&cats_request()).await.unwrap();
        assert_eq!(deck.title, "Cats");
        assert_eq!(deck.slides.len(), 2);

        let seen = rx.recv().unwrap();
        assert_eq!(seen.method, "POST");
        assert_eq!(seen.path, "/generate-ppt");
        assert_eq!(seen.api_key.as_deref(), Some("test-key"));
        assert_eq!(seen.body, serde_json::to_value(cats_request().payload()).unwrap());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _rx) = one_shot_server(500, "boom");
        let err = client_for(&base).generate(&cats_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, _rx) = one_shot_server(200, r#"{"title":"Cats"}"#);
        let err = client_for(&base).generate(&cats_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_deck_is_rejected() {
        let (base, _rx) = one_shot_server(200, r#"{"title":"Cats","description":"","slides":[]}"#);
        let err = client_for(&base).generate(&cats_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidDeck(_)));
    }

    #[tokio::test]
    async fn blank_slide_title_is_delivered() {
        let (base, _rx) = one_shot_server(
            200,
            r#"{"title":"Cats","slides":[{"title":"  ","content":"body"}]}"#,
        );
        let deck = client_for(&base).generate(&cats_request()).await.unwrap();
        assert_eq!(deck.slides[0].title, "  ");
        assert_eq!(deck.slides[0].content, "body");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_request_error() {
        // Bind and drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = client_for(&format!("http://127.0.0.1:{port}"))
            .generate(&cats_request())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[test]
    fn rejects_api_key_that_is_not_a_header_value() {
        let err = TransportClient::new(&ServiceConfig {
            base_url: Url::parse("https://gen.example.com").unwrap(),
            api_key: "bad\nkey".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader(API_KEY_HEADER)));
    }

    #[test]
    fn endpoint_is_joined_onto_base() {
        let client = client_for("https://gen.example.com/");
        assert_eq!(client.endpoint(), "https://gen.example.com/generate-ppt");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(LOGGED_BODY_LIMIT + 10);
        assert_eq!(truncate(&long).chars().count(), LOGGED_BODY_LIMIT);
        assert_eq!(truncate("short"), "short");
    }
}
