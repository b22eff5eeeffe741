//! Turns CLI path arguments into upload payloads.

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use mmsearch_core::config::expand_path;
use mmsearch_core::types::BinaryPayload;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Files are taken as given; directories are walked for image files, sorted by path.
pub fn collect_paths(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for input in inputs {
        let path = expand_path(input);
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_image(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            tracing::debug!(dir = %path.display(), count = found.len(), "collected images");
            out.extend(found);
        } else {
            out.push(path);
        }
    }
    Ok(out)
}

pub fn load(input: &str) -> anyhow::Result<BinaryPayload> {
    let path = expand_path(input);
    BinaryPayload::from_path(&path).with_context(|| format!("reading image {}", path.display()))
}

pub fn load_all(inputs: &[String]) -> anyhow::Result<Vec<BinaryPayload>> {
    collect_paths(inputs)?
        .iter()
        .map(|p| BinaryPayload::from_path(p).with_context(|| format!("reading image {}", p.display())))
        .collect()
}
