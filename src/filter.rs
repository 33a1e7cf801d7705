use std::collections::HashSet;

use crate::compare::Mismatch;
use crate::model::{Document, Row};

/// Produce a copy of `doc` without the clips named by the mismatch report.
///
/// Only `NotPermitted` entries carry clip identity; the lookup key is
/// (row_name, 1-based clip position, category). A clip is dropped when any
/// of its qualifier categories hits the lookup set. Rows are never removed,
/// only emptied. The input document is untouched; the output is a fresh
/// reconstruction, no clip sequence is shared.
pub fn remove_flagged(doc: &Document, mismatches: &[Mismatch]) -> Document {
    let flagged = mismatches
        .iter()
        .filter_map(|mismatch| match mismatch {
            Mismatch::NotPermitted {
                row_name,
                clip_index,
                category,
            } => Some((row_name.as_str(), *clip_index, category.as_str())),
            _ => None,
        })
        .collect::<HashSet<(&str, usize, &str)>>();

    let rows = doc
        .rows
        .iter()
        .map(|row| {
            let clips = row
                .clips
                .iter()
                .enumerate()
                .filter(|(index, clip)| {
                    let clip_index = index + 1;
                    !clip.qualifiers.qualifiers_array.iter().any(|qualifier| {
                        flagged.contains(&(
                            row.row_name.as_str(),
                            clip_index,
                            qualifier.category.as_str(),
                        ))
                    })
                })
                .map(|(_, clip)| clip.clone())
                .collect();

            Row {
                row_name: row.row_name.clone(),
                clips,
                extra: row.extra.clone(),
            }
        })
        .collect();

    Document {
        rows,
        extra: doc.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::remove_flagged;
    use crate::compare::{CompareTarget, Mismatch, compare};
    use crate::matrix::ConditionsMatrix;
    use crate::parse::parse_document;
    use crate::vocabulary;

    fn two_clip_document() -> crate::model::Document {
        parse_document(
            r#"{
              "rows": [
                {"row_name": "r1", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}, {"category": "y"}]}},
                  {"qualifiers": {"qualifiers_array": [{"category": "y"}]}}
                ]},
                {"row_name": "r2", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}]}}
                ]}
              ]
            }"#,
        )
        .expect("document should parse")
    }

    #[test]
    fn flagged_clip_is_removed_and_row_retained() {
        let doc = parse_document(
            r#"{
              "rows": [
                {"row_name": "r1", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}, {"category": "y"}]}}
                ]}
              ]
            }"#,
        )
        .expect("document should parse");

        let flagged = vec![Mismatch::NotPermitted {
            row_name: "r1".to_string(),
            clip_index: 1,
            category: "x".to_string(),
        }];

        let filtered = remove_flagged(&doc, &flagged);
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].row_name, "r1");
        assert!(filtered.rows[0].clips.is_empty());

        // the source document is untouched
        assert_eq!(doc.rows[0].clips.len(), 1);
    }

    #[test]
    fn only_clips_named_in_the_report_are_removed() {
        let doc = two_clip_document();
        let flagged = vec![Mismatch::NotPermitted {
            row_name: "r1".to_string(),
            clip_index: 1,
            category: "x".to_string(),
        }];

        let filtered = remove_flagged(&doc, &flagged);
        assert_eq!(filtered.rows[0].clips.len(), 1);
        assert_eq!(
            filtered.rows[0].clips[0].qualifiers.qualifiers_array[0].category,
            "y"
        );
        assert_eq!(filtered.rows[1].clips.len(), 1);
    }

    #[test]
    fn clip_position_disambiguates_same_category_clips() {
        // Both clips of r1 carry `y`; flagging clip 2 must leave clip 1.
        let doc = two_clip_document();
        let flagged = vec![Mismatch::NotPermitted {
            row_name: "r1".to_string(),
            clip_index: 2,
            category: "y".to_string(),
        }];

        let filtered = remove_flagged(&doc, &flagged);
        assert_eq!(filtered.rows[0].clips.len(), 1);
        assert_eq!(
            filtered.rows[0].clips[0].qualifiers.qualifiers_array.len(),
            2
        );
    }

    #[test]
    fn fully_true_matrix_filtering_removes_nothing() {
        let doc = two_clip_document();
        let mut records = ConditionsMatrix::new(&vocabulary::extract(&doc)).to_records();
        for record in &mut records {
            for value in record.cells.values_mut() {
                *value = true;
            }
        }
        let matrix = ConditionsMatrix::from_records(records);

        let outcome = compare(&doc, &CompareTarget::Matrix(matrix));
        let filtered = remove_flagged(&doc, &outcome.mismatches);

        assert_eq!(filtered.clip_count(), doc.clip_count());
    }

    #[test]
    fn non_clip_mismatch_kinds_do_not_drive_removal() {
        let doc = two_clip_document();
        let flagged = vec![
            Mismatch::UnknownRow {
                row_name: "r1".to_string(),
            },
            Mismatch::UnknownColumn {
                category: "x".to_string(),
            },
            Mismatch::CellDisagreement {
                row_name: "r1".to_string(),
                category: "x".to_string(),
                reference: true,
                target: false,
            },
        ];

        let filtered = remove_flagged(&doc, &flagged);
        assert_eq!(filtered.clip_count(), doc.clip_count());
    }
}
