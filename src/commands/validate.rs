use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::compare::{CompareTarget, compare};
use crate::model::{InputDescriptor, ValidationReport, ValidationSummary};
use crate::parse;
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

pub const REPORT_FILE_NAME: &str = "validation_report.json";

const REPORT_MANIFEST_VERSION: u32 = 1;

pub fn run(args: ValidateArgs) -> Result<()> {
    let run_id = format!("validate-{}", utc_compact_string(Utc::now()));

    let document = super::load_document(&args.document)?;
    let (target, target_descriptor) = resolve_target(&args)?;

    info!(
        run_id = %run_id,
        document = %args.document.display(),
        target_kind = %target_descriptor.kind,
        target = %target_descriptor.path,
        "starting validation"
    );

    let outcome = compare(&document, &target);

    for mismatch in &outcome.mismatches {
        warn!(detail = %mismatch, "mismatch");
    }
    for duplicate in &outcome.duplicates {
        warn!(detail = %duplicate, "duplicate qualifier");
    }

    let status = if !outcome.mismatches.is_empty() {
        "failed"
    } else if !outcome.duplicates.is_empty() {
        "partial"
    } else {
        "passed"
    };

    let report = ValidationReport {
        manifest_version: REPORT_MANIFEST_VERSION,
        run_id,
        generated_at: now_utc_string(),
        status: status.to_string(),
        document: describe_input("document", &args.document)?,
        target: target_descriptor,
        summary: ValidationSummary {
            rows_checked: document.row_count(),
            clips_checked: document.clip_count(),
            qualifiers_checked: document.qualifier_count(),
            mismatch_count: outcome.mismatches.len(),
            duplicate_count: outcome.duplicates.len(),
        },
        mismatches: outcome.mismatches,
        duplicates: outcome.duplicates,
    };

    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| args.output_dir.join(REPORT_FILE_NAME));
    write_json_pretty(&report_path, &report)?;

    info!(
        status = %report.status,
        mismatches = report.summary.mismatch_count,
        duplicates = report.summary.duplicate_count,
        report_path = %report_path.display(),
        "validation completed"
    );

    Ok(())
}

fn resolve_target(args: &ValidateArgs) -> Result<(CompareTarget, InputDescriptor)> {
    match (&args.matrix, &args.csv, &args.against) {
        (Some(path), None, None) => {
            let matrix = super::load_matrix(path)?;
            Ok((
                CompareTarget::Matrix(matrix),
                describe_input("matrix", path)?,
            ))
        }
        (None, Some(path), None) => {
            let raw =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            let table = parse::parse_csv_table(raw.as_slice())
                .with_context(|| format!("failed to parse csv table {}", path.display()))?;
            Ok((CompareTarget::Table(table), describe_input("csv", path)?))
        }
        (None, None, Some(path)) => {
            let other = super::load_document(path)?;
            Ok((
                CompareTarget::Document(other),
                describe_input("document", path)?,
            ))
        }
        _ => bail!("exactly one comparison target is required: --matrix, --csv, or --against"),
    }
}

fn describe_input(kind: &str, path: &Path) -> Result<InputDescriptor> {
    Ok(InputDescriptor {
        kind: kind.to_string(),
        path: path.display().to_string(),
        sha256: sha256_file(path)?,
    })
}
