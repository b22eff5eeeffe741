//! reqwest-backed `Transport`.
//!
//! One attempt per call and no client timeout: a hung backend keeps the
//! caller pending. Non-2xx responses surface only their status in the error
//! message; the body is kept in `TransportError::Http::detail`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};

use mmsearch_core::config::{normalize_base_url, ClientConfig};
use mmsearch_core::error::{Error, TransportError};
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{BinaryPayload, FieldValue, FormField, Method, Payload, RawBody, RawResponse, TransportRequest};

pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(concat!("mmsearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { base_url: normalize_base_url(base_url), http })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> { Self::new(&config.backend_url) }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn url(&self, endpoint: &str) -> String { format!("{}{}", self.base_url, endpoint) }
}

fn network(err: &reqwest::Error) -> TransportError { TransportError::Network { message: err.to_string() } }

fn file_part(payload: BinaryPayload) -> Result<Part, TransportError> {
    let mime = mime_guess::from_path(&payload.file_name).first_or_octet_stream();
    Part::bytes(payload.bytes)
        .file_name(payload.file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| network(&e))
}

fn build_form(fields: Vec<FormField>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FieldValue::Text(text) => form.text(field.name, text),
            FieldValue::File(payload) => form.part(field.name, file_part(payload)?),
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        let url = self.url(request.endpoint);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        let builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = request.endpoint, error = %e, "request did not complete");
            network(&e)
        })?;
        let status = response.status();
        debug!(
            method = ?request.method,
            endpoint = request.endpoint,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "backend responded"
        );

        if !status.is_success() {
            let detail = response.text().await.ok().filter(|t| !t.trim().is_empty());
            return Err(TransportError::Http { status: status.as_u16(), detail });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response.text().await.map_err(|e| network(&e))?;
        let body = if content_type.contains("application/json") {
            match serde_json::from_str(&text) {
                Ok(value) => RawBody::Json(value),
                Err(e) => {
                    warn!(endpoint = request.endpoint, error = %e, "JSON-typed body did not parse");
                    RawBody::Text(text)
                }
            }
        } else {
            RawBody::Text(text)
        };
        Ok(RawResponse { content_type, body })
    }
}
