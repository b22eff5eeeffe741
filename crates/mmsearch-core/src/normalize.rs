//! Maps loosely-shaped backend payloads onto `ResultItem` / `AnswerText`.
//!
//! Field probing is an ordered list of candidate names per target, first match
//! wins. The backend's result order is kept as-is.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{AnswerKind, AnswerText, IndexAck, IndexStats, MetricsText, RawBody, RawResponse, ResultItem};

pub const URL_FIELDS: [&str; 5] = ["image_url", "url", "path", "uri", "thumbnail_url"];
pub const SCORE_FIELDS: [&str; 3] = ["score", "similarity", "distance"];
pub const QUESTION_FIELDS: [&str; 2] = ["answer", "result"];
pub const DESCRIBE_FIELDS: [&str; 2] = ["caption", "description"];

/// Normalize a search response. A body that was not JSON-typed is a format
/// error, never an empty match list.
pub fn search_results(resp: &RawResponse) -> Result<Vec<ResultItem>> {
    match &resp.body {
        RawBody::Json(value) if resp.is_json() => Ok(results_from_value(value)),
        _ => Err(Error::unexpected_format()),
    }
}

pub fn results_from_value(value: &Value) -> Vec<ResultItem> {
    let elements: &[Value] = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    elements.iter().filter_map(result_item).collect()
}

fn result_item(element: &Value) -> Option<ResultItem> {
    match element {
        Value::String(url) if !url.is_empty() => Some(ResultItem::new(url.clone(), None)),
        Value::Object(map) => {
            let url = URL_FIELDS
                .iter()
                .find_map(|f| map.get(*f).and_then(Value::as_str).filter(|s| !s.is_empty()))?;
            // first non-null candidate decides; a non-numeric value means no score
            let score = SCORE_FIELDS
                .iter()
                .find_map(|f| map.get(*f).filter(|v| !v.is_null()))
                .and_then(Value::as_f64);
            Some(ResultItem::new(url.to_string(), score))
        }
        _ => None,
    }
}

pub fn answer(resp: &RawResponse, kind: AnswerKind) -> Result<AnswerText> {
    match &resp.body {
        RawBody::Text(text) => Ok(AnswerText::new(text.clone())),
        RawBody::Json(value) => answer_from_value(value, kind),
    }
}

/// A JSON `null` body carries no answer at all and is a format error.
pub fn answer_from_value(value: &Value, kind: AnswerKind) -> Result<AnswerText> {
    match value {
        Value::Null => return Err(Error::unexpected_format()),
        Value::String(s) => return Ok(AnswerText::new(s.clone())),
        _ => {}
    }
    let fields: &[&str] = match kind {
        AnswerKind::Question => &QUESTION_FIELDS,
        AnswerKind::Describe => &DESCRIBE_FIELDS,
    };
    let probed = value
        .as_object()
        .and_then(|map| fields.iter().find_map(|f| map.get(*f).filter(|v| is_meaningful(v))));
    let text = match probed {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => value.to_string(),
    };
    Ok(AnswerText::new(text))
}

// Empty strings, zero, false and null do not count as an answer.
fn is_meaningful(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn index_stats(resp: &RawResponse) -> Result<IndexStats> {
    match &resp.body {
        RawBody::Json(value) => Ok(IndexStats(value.clone())),
        RawBody::Text(_) => Err(Error::unexpected_format()),
    }
}

pub fn metrics(resp: &RawResponse) -> MetricsText {
    match &resp.body {
        RawBody::Text(text) => MetricsText(text.clone()),
        RawBody::Json(value) => MetricsText(value.to_string()),
    }
}

pub fn index_ack(resp: &RawResponse) -> IndexAck {
    match &resp.body {
        RawBody::Json(value) => IndexAck(Some(value.clone())),
        RawBody::Text(_) => IndexAck(None),
    }
}
