use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::matrix::{ConditionsMatrix, Table};
use crate::model::Document;

/// A disagreement between the reference document and the comparison target.
///
/// `NotPermitted` carries clip identity and is the only kind the
/// Filter/Rewriter acts on; the other kinds come out of the column-wise
/// comparison and describe the target as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    NotPermitted {
        row_name: String,
        clip_index: usize,
        category: String,
    },
    UnknownRow {
        row_name: String,
    },
    UnknownColumn {
        category: String,
    },
    CellDisagreement {
        row_name: String,
        category: String,
        reference: bool,
        target: bool,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPermitted {
                row_name,
                clip_index,
                category,
            } => write!(
                f,
                "row `{row_name}` clip #{clip_index}: category `{category}` is not permitted"
            ),
            Self::UnknownRow { row_name } => {
                write!(f, "row `{row_name}` is not present in the reference")
            }
            Self::UnknownColumn { category } => {
                write!(f, "category `{category}` is not present in the reference")
            }
            Self::CellDisagreement {
                row_name,
                category,
                reference,
                target,
            } => write!(
                f,
                "row `{row_name}` category `{category}`: reference says {reference}, target says {target}"
            ),
        }
    }
}

/// A category repeated within one clip's qualifier list. N occurrences of
/// the same category produce N−1 entries, one per excess occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    pub row_name: String,
    pub clip_index: usize,
    pub category: String,
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row `{}` clip #{}: duplicated category `{}`",
            self.row_name, self.clip_index, self.category
        )
    }
}

/// What the reference document is validated against.
#[derive(Debug, Clone)]
pub enum CompareTarget {
    /// An edited conditions matrix; compared by walking the document's clips.
    Matrix(ConditionsMatrix),
    /// A CSV-derived table; compared column-by-column against the matrix
    /// derived from the reference.
    Table(Table),
    /// A second document; converted to its presence matrix, then compared
    /// column-by-column.
    Document(Document),
}

#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub mismatches: Vec<Mismatch>,
    pub duplicates: Vec<Duplicate>,
}

/// Validate `reference` against `target`. Never mutates either side, always
/// returns both reports, and cannot fail for parsed input.
pub fn compare(reference: &Document, target: &CompareTarget) -> ValidationOutcome {
    let mismatches = match target {
        CompareTarget::Matrix(matrix) => compare_against_matrix(reference, matrix),
        CompareTarget::Table(table) => compare_against_table(reference, table),
        CompareTarget::Document(doc) => {
            compare_against_table(reference, &ConditionsMatrix::from_document(doc).to_table())
        }
    };

    ValidationOutcome {
        mismatches,
        duplicates: collect_duplicates(reference),
    }
}

/// Clip walk: every (row, clip, category) triple of the reference must be
/// permitted by the matrix. Mismatches come out in document traversal order;
/// matrix rows the reference never names are appended after.
fn compare_against_matrix(reference: &Document, matrix: &ConditionsMatrix) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for row in &reference.rows {
        for (index, clip) in row.clips.iter().enumerate() {
            let clip_index = index + 1;
            for qualifier in &clip.qualifiers.qualifiers_array {
                let permitted = matrix
                    .cell(&row.row_name, &qualifier.category)
                    .unwrap_or(false);
                if !permitted {
                    mismatches.push(Mismatch::NotPermitted {
                        row_name: row.row_name.clone(),
                        clip_index,
                        category: qualifier.category.clone(),
                    });
                }
            }
        }
    }

    let reference_rows = reference
        .rows
        .iter()
        .map(|row| row.row_name.as_str())
        .collect::<HashSet<&str>>();
    for row_name in matrix.row_names() {
        if !reference_rows.contains(row_name) {
            mismatches.push(Mismatch::UnknownRow {
                row_name: row_name.to_string(),
            });
        }
    }

    mismatches
}

/// Column-wise comparison against the matrix derived from the reference.
/// Blank target cells are excluded; filled cells must agree with presence.
fn compare_against_table(reference: &Document, table: &Table) -> Vec<Mismatch> {
    let derived = ConditionsMatrix::from_document(reference);
    let mut mismatches = Vec::new();

    for column in &table.columns {
        if !derived.has_column(column) {
            mismatches.push(Mismatch::UnknownColumn {
                category: column.clone(),
            });
        }
    }

    for row in &table.rows {
        if !derived.has_row(&row.row_name) {
            mismatches.push(Mismatch::UnknownRow {
                row_name: row.row_name.clone(),
            });
            continue;
        }

        for column in &table.columns {
            let Some(reference_value) = derived.cell(&row.row_name, column) else {
                continue;
            };
            let Some(Some(target_value)) = row.cells.get(column).copied() else {
                continue;
            };
            if target_value != reference_value {
                mismatches.push(Mismatch::CellDisagreement {
                    row_name: row.row_name.clone(),
                    category: column.clone(),
                    reference: reference_value,
                    target: target_value,
                });
            }
        }
    }

    mismatches
}

/// Clip-local duplicate detection; never consults the comparison target.
fn collect_duplicates(reference: &Document) -> Vec<Duplicate> {
    let mut duplicates = Vec::new();

    for row in &reference.rows {
        for (index, clip) in row.clips.iter().enumerate() {
            let mut seen = HashSet::new();
            for qualifier in &clip.qualifiers.qualifiers_array {
                if !seen.insert(qualifier.category.as_str()) {
                    duplicates.push(Duplicate {
                        row_name: row.row_name.clone(),
                        clip_index: index + 1,
                        category: qualifier.category.clone(),
                    });
                }
            }
        }
    }

    duplicates
}
