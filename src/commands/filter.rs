use anyhow::Result;
use tracing::info;

use crate::cli::FilterArgs;
use crate::compare::{CompareTarget, compare};
use crate::filter::remove_flagged;
use crate::util::write_json_pretty;

pub const FILTERED_FILE_NAME: &str = "filtered_data.json";

pub fn run(args: FilterArgs) -> Result<()> {
    let document = super::load_document(&args.document)?;
    let matrix = super::load_matrix(&args.matrix)?;

    let outcome = compare(&document, &CompareTarget::Matrix(matrix));
    let filtered = remove_flagged(&document, &outcome.mismatches);
    let clips_removed = document.clip_count() - filtered.clip_count();

    let output_path = args.output_dir.join(FILTERED_FILE_NAME);
    write_json_pretty(&output_path, &filtered)?;

    info!(
        path = %output_path.display(),
        clips_removed,
        clips_retained = filtered.clip_count(),
        duplicates_seen = outcome.duplicates.len(),
        "wrote filtered document"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{FILTERED_FILE_NAME, run};
    use crate::cli::FilterArgs;

    #[test]
    fn filter_command_drops_flagged_clips_and_keeps_rows() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let document_path = dir.path().join("doc.json");
        fs::write(
            &document_path,
            r#"{
              "rows": [
                {"row_name": "r1", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}]}},
                  {"qualifiers": {"qualifiers_array": [{"category": "y"}]}}
                ], "note": "kept"}
              ]
            }"#,
        )
        .expect("document should be written");

        // x permitted, y not: the second clip goes, the first stays
        let matrix_path = dir.path().join("tabla_editable.json");
        fs::write(&matrix_path, r#"[{"row_name": "r1", "x": true, "y": false}]"#)
            .expect("matrix should be written");

        run(FilterArgs {
            document: document_path,
            matrix: matrix_path,
            output_dir: dir.path().to_path_buf(),
        })
        .expect("filter command should succeed");

        let filtered: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(FILTERED_FILE_NAME))
                .expect("filtered file should exist"),
        )
        .expect("filtered file should be json");

        let clips = filtered["rows"][0]["clips"]
            .as_array()
            .expect("clips should be an array");
        assert_eq!(clips.len(), 1);
        assert_eq!(
            clips[0]["qualifiers"]["qualifiers_array"][0]["category"],
            "x"
        );
        // row survives and unknown keys ride along
        assert_eq!(filtered["rows"][0]["row_name"], "r1");
        assert_eq!(filtered["rows"][0]["note"], "kept");
    }
}
