use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::Document;
use crate::vocabulary::Vocabulary;

/// One serialized matrix row in the editable-matrix file: `row_name` plus
/// one boolean cell per category column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRecord {
    pub row_name: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, bool>,
}

/// Boolean row × category presence matrix, the user's editing surface.
///
/// Rows and columns have set semantics; iteration is lexicographic so every
/// serialization of the same matrix is byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionsMatrix {
    columns: BTreeSet<String>,
    rows: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ConditionsMatrix {
    /// One row per row_name, one column per category, every cell false.
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let template = vocabulary
            .categories
            .iter()
            .map(|category| (category.clone(), false))
            .collect::<BTreeMap<String, bool>>();

        let rows = vocabulary
            .row_names
            .iter()
            .map(|row_name| (row_name.clone(), template.clone()))
            .collect();

        Self {
            columns: vocabulary.categories.clone(),
            rows,
        }
    }

    /// Presence-derived matrix: a cell is true when the category appears
    /// anywhere in that row's clips. Rows repeating a row_name union their
    /// categories.
    pub fn from_document(doc: &Document) -> Self {
        let vocabulary = crate::vocabulary::extract(doc);
        let mut matrix = Self::new(&vocabulary);

        for row in &doc.rows {
            for clip in &row.clips {
                for qualifier in &clip.qualifiers.qualifiers_array {
                    if let Some(cells) = matrix.rows.get_mut(&row.row_name) {
                        cells.insert(qualifier.category.clone(), true);
                    }
                }
            }
        }

        matrix
    }

    /// Reload an edited matrix file. Columns are the union of all record
    /// cells; cells a record omits default to false; later records win on a
    /// repeated row_name.
    pub fn from_records(records: Vec<MatrixRecord>) -> Self {
        let columns = records
            .iter()
            .flat_map(|record| record.cells.keys())
            .cloned()
            .collect::<BTreeSet<String>>();

        let mut rows = BTreeMap::new();
        for record in records {
            let mut cells = columns
                .iter()
                .map(|column| (column.clone(), false))
                .collect::<BTreeMap<String, bool>>();
            cells.extend(record.cells);
            rows.insert(record.row_name, cells);
        }

        Self { columns, rows }
    }

    pub fn row_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_row(&self, row_name: &str) -> bool {
        self.rows.contains_key(row_name)
    }

    pub fn has_column(&self, category: &str) -> bool {
        self.columns.contains(category)
    }

    /// Cell lookup; `None` when the row or column is unknown.
    pub fn cell(&self, row_name: &str, category: &str) -> Option<bool> {
        self.rows
            .get(row_name)
            .and_then(|cells| cells.get(category).copied())
    }

    /// Serialization form: a complete grid, one record per row carrying
    /// every column.
    pub fn to_records(&self) -> Vec<MatrixRecord> {
        self.rows
            .iter()
            .map(|(row_name, cells)| MatrixRecord {
                row_name: row_name.clone(),
                cells: cells.clone(),
            })
            .collect()
    }

    /// Column-wise comparison form; every cell present.
    pub fn to_table(&self) -> Table {
        Table {
            columns: self.columns.iter().cloned().collect(),
            rows: self
                .rows
                .iter()
                .map(|(row_name, cells)| TableRow {
                    row_name: row_name.clone(),
                    cells: cells
                        .iter()
                        .map(|(column, value)| (column.clone(), Some(*value)))
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Comparison-target table: rows in source order, cells optional so blank
/// CSV cells can be excluded from comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub row_name: String,
    pub cells: BTreeMap<String, Option<bool>>,
}
