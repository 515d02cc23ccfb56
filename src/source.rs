use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A source document staged for generation.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
    pub sha256: String,
    pub size_bytes: u64,
}

/// File extensions treated as source text
const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect source documents from a file or directory. A single file is
/// taken as-is; directories are walked for text files, sorted by path.
pub fn collect_documents(input: &Path) -> Result<Vec<SourceDocument>> {
    if input.is_file() {
        return Ok(vec![load_document(input)?]);
    }

    eprintln!("[source] Scanning directory: {}", input.display());
    let mut documents = Vec::new();

    for entry in WalkDir::new(input).follow_links(false) {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if !path.is_file() || !is_text_file(path) {
            continue;
        }
        match load_document(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => eprintln!("[source] Warning: skipping {}: {}", path.display(), e),
        }
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    eprintln!("[source] ✓ Found {} documents", documents.len());
    Ok(documents)
}

/// Read and hash a single document.
pub fn load_document(path: &Path) -> Result<SourceDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());

    Ok(SourceDocument {
        path: path.to_path_buf(),
        sha256: hex::encode(hasher.finalize()),
        size_bytes: text.len() as u64,
        text,
    })
}
