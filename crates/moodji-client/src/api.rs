//! The remote sentiment classifier.

use std::sync::Once;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{GENERIC_SERVICE_MESSAGE, PredictError};
use crate::result::PredictionResult;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Anything that can turn a canonical word into a verdict.
///
/// One call, one attempt: implementations must not retry.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, word: &str) -> Result<PredictionResult, PredictError>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Talks to the classifier over HTTP: `POST {endpoint}/predict`.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    url: Url,
}

impl HttpPredictor {
    pub fn new(endpoint: &str) -> Result<Self, PredictError> {
        ensure_crypto_provider();

        let url = endpoint_url(endpoint, "/predict")?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("moodji/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PredictError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PredictionService for HttpPredictor {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn predict(&self, word: &str) -> Result<PredictionResult, PredictError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&PredictRequest { word })
            .send()
            .await
            .map_err(|e| PredictError::Transport(format!("failed to send request: {e}")))?;

        let status = response.status();
        debug!(%status, "prediction response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(service_error(status, &body));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| PredictError::Transport(format!("invalid prediction payload: {e}")))
    }
}

/// Turn a non-2xx response into the error the user will see.
///
/// Uses the `error` field of a JSON body when there is a non-empty one, and a
/// generic message otherwise.
pub fn service_error(status: StatusCode, body: &str) -> PredictError {
    let message = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty());

    match message {
        Some(message) => PredictError::Service(message),
        None => {
            debug!(%status, body, "error response without usable payload");
            PredictError::Service(GENERIC_SERVICE_MESSAGE.to_string())
        }
    }
}

/// Join `path` onto `base`, keeping any path prefix `base` already has.
pub fn endpoint_url(base: &str, path: &str) -> Result<Url, PredictError> {
    let base_with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    let stripped = path.strip_prefix('/').unwrap_or(path);

    Url::parse(&base_with_slash)
        .and_then(|url| url.join(stripped))
        .map_err(|e| PredictError::Transport(format!("invalid endpoint {base:?}: {e}")))
}

/// reqwest is built without a default TLS provider, so one has to be
/// installed before the first https request.
pub fn ensure_crypto_provider() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        // Err means another provider is already installed, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
