//! Request builders: validated user input in, one `TransportRequest` out.
//!
//! Builders never touch the network. A missing image or question is reported
//! as `Error::Validation` before any request exists.

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::types::{BinaryPayload, FormField, Payload, QueryMode, SearchForm, SearchRequest, TransportRequest};

pub const DEFAULT_TOP_K: i64 = 12;

pub const HEALTH: &str = "/health";
pub const METRICS: &str = "/metrics";
pub const SEARCH_TEXT: &str = "/api/search/text";
pub const SEARCH_IMAGE: &str = "/api/search/image";
pub const SEARCH_MULTIMODAL: &str = "/api/search/multimodal";
pub const VQA_QUESTION: &str = "/api/vqa/question";
pub const VQA_DESCRIBE: &str = "/api/vqa/describe";
pub const INDEX_BUILD: &str = "/api/index/build";
pub const INDEX_ADD: &str = "/api/index/add";
pub const INDEX_STATS: &str = "/api/index/stats";

/// Coerce free-text `k` into an integer. Blank, non-numeric and zero fall
/// back to [`DEFAULT_TOP_K`]; fractions are truncated. No range clamping.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_top_k(input: &str) -> i64 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.trunc() != 0.0 => v.trunc() as i64,
        _ => DEFAULT_TOP_K,
    }
}

/// Blank means "no threshold"; anything else must be a finite number.
pub fn parse_threshold(input: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() { return Ok(None); }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::validation(format!("threshold must be a number, got '{trimmed}'"))),
    }
}

impl SearchRequest {
    pub fn from_form(form: SearchForm) -> Result<Self> {
        let threshold = match form.mode {
            QueryMode::Text => parse_threshold(&form.threshold)?,
            QueryMode::Image | QueryMode::Multimodal => None,
        };
        let text = Some(form.text).filter(|t| !t.trim().is_empty());
        Ok(Self { mode: form.mode, text, image: form.image, top_k: parse_top_k(&form.k), threshold })
    }
}

fn require_image(image: Option<&BinaryPayload>, what: &str) -> Result<BinaryPayload> {
    match image {
        Some(img) if !img.is_empty() => Ok(img.clone()),
        _ => Err(Error::validation(format!("{what} requires an image"))),
    }
}

pub fn search(req: &SearchRequest) -> Result<TransportRequest> {
    match req.mode {
        QueryMode::Text => {
            let query = req
                .text
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| Error::validation("text search requires a query"))?;
            let mut body = Map::new();
            body.insert("query".into(), Value::String(query.to_string()));
            body.insert("k".into(), json!(req.top_k));
            if let Some(t) = req.threshold { body.insert("threshold".into(), json!(t)); }
            Ok(TransportRequest::post(SEARCH_TEXT, Payload::Json(Value::Object(body))))
        }
        QueryMode::Image => {
            let image = require_image(req.image.as_ref(), "image search")?;
            let fields = vec![FormField::file("image", image), FormField::text("k", req.top_k.to_string())];
            Ok(TransportRequest::post(SEARCH_IMAGE, Payload::Multipart(fields)))
        }
        QueryMode::Multimodal => {
            let image = require_image(req.image.as_ref(), "multimodal search")?;
            let mut fields = vec![FormField::file("image", image)];
            if let Some(text) = req.text.as_deref().filter(|t| !t.trim().is_empty()) {
                fields.push(FormField::text("text", text));
            }
            fields.push(FormField::text("k", req.top_k.to_string()));
            Ok(TransportRequest::post(SEARCH_MULTIMODAL, Payload::Multipart(fields)))
        }
    }
}

pub fn vqa_question(image: Option<&BinaryPayload>, question: &str) -> Result<TransportRequest> {
    let image = require_image(image, "asking a question")?;
    if question.trim().is_empty() { return Err(Error::validation("a question is required")); }
    let fields = vec![FormField::file("image", image), FormField::text("question", question)];
    Ok(TransportRequest::post(VQA_QUESTION, Payload::Multipart(fields)))
}

pub fn vqa_describe(image: Option<&BinaryPayload>) -> Result<TransportRequest> {
    let image = require_image(image, "describing")?;
    Ok(TransportRequest::post(VQA_DESCRIBE, Payload::Multipart(vec![FormField::file("image", image)])))
}

/// `image_dir` is a server-side path; blank leaves the key out entirely.
pub fn index_build(image_dir: Option<&str>, train_index: bool) -> TransportRequest {
    let mut body = Map::new();
    if let Some(dir) = image_dir.map(str::trim).filter(|d| !d.is_empty()) {
        body.insert("image_dir".into(), Value::String(dir.to_string()));
    }
    body.insert("train_index".into(), Value::Bool(train_index));
    TransportRequest::post(INDEX_BUILD, Payload::Json(Value::Object(body)))
}

pub fn index_add(images: &[BinaryPayload]) -> Result<TransportRequest> {
    if images.is_empty() { return Err(Error::validation("select at least one image to add")); }
    let fields = images.iter().cloned().map(|img| FormField::file("images", img)).collect();
    Ok(TransportRequest::post(INDEX_ADD, Payload::Multipart(fields)))
}

pub fn index_stats() -> TransportRequest { TransportRequest::get(INDEX_STATS) }

pub fn health() -> TransportRequest { TransportRequest::get(HEALTH) }

pub fn metrics() -> TransportRequest { TransportRequest::get(METRICS) }
