// target/source field reconciliation by exact name
use std::collections::HashSet;

use crate::core::types::{FieldName, MatchResult};

/// For every target field, in target order, record whether the source declares
/// a field with exactly the same name.
///
/// - one result per target field, duplicates included
/// - source order is irrelevant, only membership counts
/// - no case folding: `id` and `ID` are different fields
pub fn match_fields<S: AsRef<str>>(target_fields: &[FieldName], source_fields: &[S]) -> Vec<MatchResult> {
    let source: HashSet<&str> = source_fields.iter().map(|s| s.as_ref()).collect();

    target_fields
        .iter()
        .map(|field| MatchResult {
            field: field.clone(),
            has_source_match: source.contains(field.as_str()),
        })
        .collect()
}

/// Source fields no target field picks up. Reported, never generated.
pub fn unmatched_source_fields<'a>(target_fields: &[FieldName], source_fields: &'a [FieldName]) -> Vec<&'a str> {
    let target: HashSet<&str> = target_fields.iter().map(String::as_str).collect();
    source_fields
        .iter()
        .map(String::as_str)
        .filter(|f| !target.contains(f))
        .collect()
}
