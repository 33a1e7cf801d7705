use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::matrix::ConditionsMatrix;
use crate::model::Document;
use crate::parse;

pub mod filter;
pub mod matrix;
pub mod validate;

pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let document = parse::parse_document(&raw)
        .with_context(|| format!("failed to parse document {}", path.display()))?;
    Ok(document)
}

pub(crate) fn load_matrix(path: &Path) -> Result<ConditionsMatrix> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let records = parse::parse_matrix_records(&raw)
        .with_context(|| format!("failed to parse matrix records {}", path.display()))?;
    Ok(ConditionsMatrix::from_records(records))
}
