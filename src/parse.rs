use std::io;

use csv::Trim;

use crate::error::{Error, Result};
use crate::matrix::{MatrixRecord, Table, TableRow};
use crate::model::Document;

pub const ROW_NAME_COLUMN: &str = "row_name";

/// Decode a raw JSON document. The typed model enforces the full structural
/// shape in this one pass, so a missing `rows`/`row_name`/`clips`/
/// `qualifiers_array`/`category` key fails here with the key named.
pub fn parse_document(raw: &str) -> Result<Document> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode an editable-matrix file (`tabla_editable.json` shape): a sequence
/// of records with `row_name` plus boolean category cells.
pub fn parse_matrix_records(raw: &str) -> Result<Vec<MatrixRecord>> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode a CSV comparison table. The header must contain a `row_name`
/// column; every other column is a category. Cell values follow the boolean
/// coercion rule, with blank cells kept out of comparison.
pub fn parse_csv_table<R: io::Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let row_name_index = headers
        .iter()
        .position(|header| header == ROW_NAME_COLUMN)
        .ok_or_else(|| {
            Error::Structure(format!("csv is missing required column `{ROW_NAME_COLUMN}`"))
        })?;

    let columns = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != row_name_index)
        .map(|(_, header)| header.to_string())
        .collect::<Vec<String>>();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row_name = record
            .get(row_name_index)
            .ok_or_else(|| Error::Format(format!("csv record lacks a `{ROW_NAME_COLUMN}` value")))?
            .to_string();

        let mut cells = std::collections::BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            if index == row_name_index {
                continue;
            }
            let token = record.get(index).unwrap_or_default();
            cells.insert(header.to_string(), coerce_bool_cell(token, header, &row_name)?);
        }

        rows.push(TableRow { row_name, cells });
    }

    Ok(Table { columns, rows })
}

/// The one boolean coercion rule, applied at parse time and nowhere else.
/// Blank means "cell not filled in" and is excluded from comparison.
fn coerce_bool_cell(token: &str, column: &str, row_name: &str) -> Result<Option<bool>> {
    match token.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "t" | "yes" | "y" | "1" => Ok(Some(true)),
        "false" | "f" | "no" | "n" | "0" => Ok(Some(false)),
        other => Err(Error::Format(format!(
            "unrecognized boolean value `{other}` in column `{column}` of row `{row_name}`"
        ))),
    }
}
