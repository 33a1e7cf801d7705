use std::collections::BTreeSet;

use crate::model::Document;

/// The unique row identifiers and qualifier categories of a document.
///
/// Both sets are deduplicated; sorted iteration keeps every artifact derived
/// from the same document byte-identical across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub row_names: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

pub fn extract(doc: &Document) -> Vocabulary {
    let row_names = doc
        .rows
        .iter()
        .map(|row| row.row_name.clone())
        .collect::<BTreeSet<String>>();

    let categories = doc
        .rows
        .iter()
        .flat_map(|row| &row.clips)
        .flat_map(|clip| &clip.qualifiers.qualifiers_array)
        .map(|qualifier| qualifier.category.clone())
        .collect::<BTreeSet<String>>();

    Vocabulary {
        row_names,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::extract;
    use crate::parse::parse_document;

    #[test]
    fn extract_deduplicates_row_names_and_categories() {
        let doc = parse_document(
            r#"{
              "rows": [
                {"row_name": "r1", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}, {"category": "y"}]}}
                ]},
                {"row_name": "r1", "clips": [
                  {"qualifiers": {"qualifiers_array": [{"category": "x"}]}}
                ]},
                {"row_name": "r2", "clips": []}
              ]
            }"#,
        )
        .expect("document should parse");

        let vocabulary = extract(&doc);
        assert_eq!(
            vocabulary.row_names.iter().collect::<Vec<_>>(),
            vec!["r1", "r2"]
        );
        assert_eq!(
            vocabulary.categories.iter().collect::<Vec<_>>(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn extract_handles_document_without_qualifier_occurrences() {
        let doc = parse_document(r#"{"rows": [{"row_name": "only", "clips": []}]}"#)
            .expect("document should parse");

        let vocabulary = extract(&doc);
        assert_eq!(vocabulary.row_names.len(), 1);
        assert!(vocabulary.categories.is_empty());
    }
}
