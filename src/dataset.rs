use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::{merge_interviews, PersonaInterview};
use crate::source::SourceDocument;

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    pub model: String,
    pub stats: ManifestStats,
    pub sources: Vec<SourceRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ManifestStats {
    pub source_count: u32,
    pub chunk_count: u32,
    pub question_count: u32,
    pub persona_count: u32,
    pub pair_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceRecord {
    pub path: String,
    pub sha256: String,
    pub size_bytes: u64,
}

/// Accumulates generated interviews and writes the training-set JSON
/// (the interview array consumed by fine-tuning) plus a sidecar manifest
/// recording provenance and stats.
pub struct TrainingSetWriter {
    interviews: Vec<PersonaInterview>,
    manifest: Manifest,
}

impl TrainingSetWriter {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            interviews: Vec::new(),
            manifest: Manifest {
                version: "1.0.0".to_string(),
                created_at: Utc::now().to_rfc3339(),
                generator: format!("personagen v{}", env!("CARGO_PKG_VERSION")),
                model: model.into(),
                stats: ManifestStats::default(),
                sources: Vec::new(),
            },
        }
    }

    /// Record a processed source document and its chunk count.
    pub fn add_source(&mut self, document: &SourceDocument, chunk_count: usize) {
        self.manifest.sources.push(SourceRecord {
            path: document.path.display().to_string(),
            sha256: document.sha256.clone(),
            size_bytes: document.size_bytes,
        });
        self.manifest.stats.source_count += 1;
        self.manifest.stats.chunk_count += chunk_count as u32;
    }

    /// Record questions parsed during generation. Counted separately
    /// from pairs: a question whose answer call failed still shows up
    /// here.
    pub fn add_questions(&mut self, count: usize) {
        self.manifest.stats.question_count += count as u32;
    }

    /// Merge a batch of interviews into the set, extending repeated
    /// personas rather than duplicating them.
    pub fn add_interviews(&mut self, interviews: Vec<PersonaInterview>) {
        merge_interviews(&mut self.interviews, interviews);
    }

    pub fn interviews(&self) -> &[PersonaInterview] {
        &self.interviews
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    fn update_stats(&mut self) {
        self.manifest.stats.persona_count = self.interviews.len() as u32;
        self.manifest.stats.pair_count = self
            .interviews
            .iter()
            .map(|i| i.interview.len() as u32)
            .sum();
    }

    /// Write the interview array and the sidecar manifest.
    pub fn write_to_file(&mut self, output_path: &Path) -> Result<()> {
        self.update_stats();

        eprintln!("[dataset] Writing training set to: {}", output_path.display());
        let json = serde_json::to_string_pretty(&self.interviews)
            .context("Failed to serialize interviews")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write training set: {}", output_path.display()))?;

        let manifest_path = manifest_path(output_path);
        let manifest_json = serde_json::to_string_pretty(&self.manifest)
            .context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json)
            .with_context(|| format!("Failed to write manifest: {}", manifest_path.display()))?;

        eprintln!(
            "[dataset] ✓ Wrote {} personas, {} pairs",
            self.manifest.stats.persona_count, self.manifest.stats.pair_count
        );
        Ok(())
    }
}

/// Sidecar manifest path for a training-set file.
pub fn manifest_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "training_set.json".to_string());
    name.push_str(".manifest.json");
    output_path.with_file_name(name)
}

/// Reads a training set back, with its manifest when present.
pub struct TrainingSetReader {
    pub interviews: Vec<PersonaInterview>,
    pub manifest: Option<Manifest>,
}

impl TrainingSetReader {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to open training set: {}", path.display()))?;
        let interviews: Vec<PersonaInterview> =
            serde_json::from_str(&raw).context("Failed to parse training set JSON")?;

        let manifest = fs::read_to_string(manifest_path(path))
            .ok()
            .and_then(|m| serde_json::from_str(&m).ok());

        Ok(Self {
            interviews,
            manifest,
        })
    }
}
