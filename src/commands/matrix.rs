use anyhow::Result;
use tracing::info;

use crate::cli::MatrixArgs;
use crate::matrix::ConditionsMatrix;
use crate::util::write_json_pretty;
use crate::vocabulary;

pub const MATRIX_FILE_NAME: &str = "tabla_editable.json";

pub fn run(args: MatrixArgs) -> Result<()> {
    let document = super::load_document(&args.document)?;

    let vocabulary = vocabulary::extract(&document);
    info!(
        rows = vocabulary.row_names.len(),
        categories = vocabulary.categories.len(),
        "extracted vocabulary"
    );

    let matrix = if args.seed_presence {
        ConditionsMatrix::from_document(&document)
    } else {
        ConditionsMatrix::new(&vocabulary)
    };

    let output_path = args.output_dir.join(MATRIX_FILE_NAME);
    write_json_pretty(&output_path, &matrix.to_records())?;

    info!(
        path = %output_path.display(),
        rows = matrix.row_count(),
        columns = matrix.column_count(),
        seeded = args.seed_presence,
        "wrote editable matrix"
    );

    Ok(())
}
