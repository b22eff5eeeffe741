//! Domain types shared by builders, transport, normalizer and panels.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Which combination of text/image input a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Text,
    Image,
    Multimodal,
}

/// An uploaded file: the name sent as the part's filename plus its raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl BinaryPayload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
}

impl fmt::Debug for BinaryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryPayload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw search input as the user typed it. `k` and `threshold` are free text
/// and get coerced by [`SearchRequest::from_form`].
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub mode: QueryMode,
    pub text: String,
    pub image: Option<BinaryPayload>,
    pub k: String,
    pub threshold: String,
}

impl SearchForm {
    pub fn new(mode: QueryMode) -> Self {
        Self { mode, text: String::new(), image: None, k: String::new(), threshold: String::new() }
    }
}

/// A typed search. Mode invariants are checked by the builders, not here.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub mode: QueryMode,
    pub text: Option<String>,
    pub image: Option<BinaryPayload>,
    pub top_k: i64,
    pub threshold: Option<f64>,
}

/// Canonical search result. Only the normalizer creates these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

impl ResultItem {
    pub(crate) fn new(url: String, score: Option<f64>) -> Self { Self { url, score } }

    pub fn url(&self) -> &str { &self.url }

    pub fn score(&self) -> Option<f64> { self.score }
}

/// Which VQA endpoint an answer came from; selects the probed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Question,
    Describe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerText(String);

impl AnswerText {
    pub(crate) fn new(text: String) -> Self { Self(text) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for AnswerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Index statistics exactly as the backend sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats(pub Value);

impl IndexStats {
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsText(pub String);

/// Acknowledgement of an index build/add. Holds the JSON body if there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAck(pub Option<Value>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Healthy,
    Unhealthy,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Checking => "Checking...",
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(BinaryPayload),
}

/// One named multipart field. Repeating a name sends repeated parts.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self { name: name.to_string(), value: FieldValue::Text(value.into()) }
    }

    pub fn file(name: &str, payload: BinaryPayload) -> Self {
        Self { name: name.to_string(), value: FieldValue::File(payload) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

impl Payload {
    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(Encoding::Json),
            Self::Multipart(_) => Some(Encoding::Multipart),
        }
    }
}

/// Everything the transport needs for one exchange.
///
/// - `endpoint`: path relative to the configured base URL, e.g. `/api/search/text`
/// - `payload`: body; its variant picks the encoding
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub endpoint: &'static str,
    pub payload: Payload,
}

impl TransportRequest {
    pub fn get(endpoint: &'static str) -> Self {
        Self { method: Method::Get, endpoint, payload: Payload::Empty }
    }

    pub fn post(endpoint: &'static str, payload: Payload) -> Self {
        Self { method: Method::Post, endpoint, payload }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Json(Value),
    Text(String),
}

/// A 2xx response. Non-2xx never gets this far; it is a `TransportError`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub content_type: String,
    pub body: RawBody,
}

impl RawResponse {
    pub fn json(value: Value) -> Self {
        Self { content_type: "application/json".to_string(), body: RawBody::Json(value) }
    }

    pub fn text(content_type: &str, text: impl Into<String>) -> Self {
        Self { content_type: content_type.to_string(), body: RawBody::Text(text.into()) }
    }

    pub fn is_json(&self) -> bool { self.content_type.contains("application/json") }
}
