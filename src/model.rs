use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::compare::{Duplicate, Mismatch};

/// Top-level input document: a sequence of named rows. Keys other than
/// `rows` are preserved verbatim so a filtered copy keeps the input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub rows: Vec<Row>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub row_name: String,
    pub clips: Vec<Clip>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    pub qualifiers: Qualifiers,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualifiers {
    pub qualifiers_array: Vec<Qualifier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualifier {
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn clip_count(&self) -> usize {
        self.rows.iter().map(|row| row.clips.len()).sum()
    }

    pub fn qualifier_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.clips)
            .map(|clip| clip.qualifiers.qualifiers_array.len())
            .sum()
    }
}

/// One input file consumed by a validation run, fingerprinted for the
/// report manifest.
#[derive(Debug, Clone, Serialize)]
pub struct InputDescriptor {
    pub kind: String,
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub rows_checked: usize,
    pub clips_checked: usize,
    pub qualifiers_checked: usize,
    pub mismatch_count: usize,
    pub duplicate_count: usize,
}

/// Manifest written as `validation_report.json` after a validate run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub status: String,
    pub document: InputDescriptor,
    pub target: InputDescriptor,
    pub summary: ValidationSummary,
    pub mismatches: Vec<Mismatch>,
    pub duplicates: Vec<Duplicate>,
}
