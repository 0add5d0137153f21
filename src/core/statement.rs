// statement synthesis
use crate::core::matching::match_fields;
use crate::core::naming::capitalize_first;
use crate::core::types::{AccessorStyle, FieldName, GeneratedStatement, MatchResult, ObjectBinding};

/// Build the assignment for one target field.
///
/// Matched:   `target.setName(source.getName());`
/// Unmatched: `target.setName();` (left for the user to fill in)
pub fn generate(result: &MatchResult, binding: &ObjectBinding) -> GeneratedStatement {
    generate_with_style(result, binding, &AccessorStyle::default())
}

pub fn generate_with_style(result: &MatchResult, binding: &ObjectBinding, style: &AccessorStyle) -> GeneratedStatement {
    let suffix = capitalize_first(&result.field);
    let setter = format!("{}.{}{}", binding.target, style.setter_prefix, suffix);

    let text = if result.has_source_match {
        format!("{setter}({}.{}{}());", binding.source, style.getter_prefix, suffix)
    } else {
        format!("{setter}();")
    };
    GeneratedStatement::new(text)
}

/// Match then generate, one statement per target field in target order.
pub fn generate_all(
    target_fields: &[FieldName],
    source_fields: &[FieldName],
    binding: &ObjectBinding,
    style: &AccessorStyle,
) -> Vec<GeneratedStatement> {
    match_fields(target_fields, source_fields)
        .iter()
        .map(|result| generate_with_style(result, binding, style))
        .collect()
}
