//! Prints a settled operation. Every printer returns whether the operation
//! succeeded so the binary can pick its exit code.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use mmsearch_core::state::OperationState;
use mmsearch_core::types::{AnswerText, IndexAck, IndexStats, MetricsText, ResultItem};

/// Spinner on stderr while `fut` runs. Hidden for JSON output.
pub async fn with_spinner<F: Future>(label: &str, quiet: bool, fut: F) -> F::Output {
    let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new_spinner() };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    pb.finish_and_clear();
    out
}

fn failed<T>(state: &OperationState<T>) -> bool {
    match state.error() {
        Some(msg) => {
            eprintln!("❌ {msg}");
            true
        }
        None => false,
    }
}

pub fn results(state: &OperationState<Vec<ResultItem>>, json: bool) -> bool {
    if failed(state) {
        return false;
    }
    let items = state.value().map(Vec::as_slice).unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string()));
        return true;
    }
    if items.is_empty() {
        println!("No results");
        return true;
    }
    for (i, item) in items.iter().enumerate() {
        match item.score() {
            Some(score) => println!("{:>3}. {:.4}  {}", i + 1, score, item.url()),
            None => println!("{:>3}. {:>6}  {}", i + 1, "-", item.url()),
        }
    }
    true
}

pub fn answer(state: &OperationState<AnswerText>, json: bool) -> bool {
    if failed(state) {
        return false;
    }
    if let Some(text) = state.value() {
        if json {
            println!("{}", serde_json::json!({ "answer": text.as_str() }));
        } else {
            println!("{text}");
        }
    }
    true
}

pub fn ack(state: &OperationState<IndexAck>, what: &str, json: bool) -> bool {
    if failed(state) {
        return false;
    }
    match state.value().and_then(|a| a.0.as_ref()) {
        Some(body) if json => println!("{body}"),
        Some(body) => println!("✅ {what}\n{}", serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())),
        None if json => println!("null"),
        None => println!("✅ {what}"),
    }
    true
}

pub fn stats(state: &OperationState<IndexStats>, json: bool) -> bool {
    if failed(state) {
        return false;
    }
    if let Some(stats) = state.value() {
        if json {
            println!("{}", stats.0);
        } else {
            println!("{}", stats.pretty());
        }
    }
    true
}

pub fn metrics(state: &OperationState<MetricsText>) -> bool {
    if failed(state) {
        return false;
    }
    if let Some(text) = state.value() {
        print!("{}", text.0);
        if !text.0.ends_with('\n') {
            println!();
        }
    }
    true
}
