// object/accessor naming heuristics
//
// Only the first character is ever touched. `UserDTO` becomes `userDTO`, not
// `userDto`; a full camel-case conversion is out of reach without type info.
use once_cell::sync::Lazy;
use regex::Regex;

/// Left-hand side of a plain assignment: an identifier, optional whitespace,
/// then a single `=` (so `==` is not an assignment).
static ASSIGNMENT_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)").expect("assignment pattern is valid")
});

/// Lowercase the first character if it is uppercase, leave everything else alone.
pub fn lowercase_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => input.to_string(),
    }
}

/// Uppercase the first character. Non-letters map to themselves.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `UserDto` -> `userDto`. Empty in, empty out; the caller rejects that earlier.
pub fn derive_source_object_name(source_type_name: &str) -> String {
    lowercase_first(source_type_name)
}

/// The variable assigned on `line`, e.g. `dto` for `UserDto dto = new UserDto();`.
/// The first assignment on the line wins.
pub fn derive_target_object_name(line: &str) -> Option<String> {
    ASSIGNMENT_TARGET
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name_lowercases_only_first_char() {
        assert_eq!(derive_source_object_name("UserDTO"), "userDTO");
        assert_eq!(derive_source_object_name("User"), "user");
        assert_eq!(derive_source_object_name("user"), "user");
        assert_eq!(derive_source_object_name("_Hidden"), "_Hidden");
        assert_eq!(derive_source_object_name(""), "");
    }

    #[test]
    fn source_name_is_idempotent_once_lowercase_or_non_alphabetic() {
        for input in ["order", "9Lives", "$Proxy", "Order", "ÉtatCivil"] {
            let once = derive_source_object_name(input);
            assert_eq!(derive_source_object_name(&once), once);
        }
    }

    #[test]
    fn capitalize_touches_first_char_only() {
        assert_eq!(capitalize_first("name"), "Name");
        assert_eq!(capitalize_first("nAME"), "NAME");
        assert_eq!(capitalize_first("_id"), "_id");
        assert_eq!(capitalize_first("1st"), "1st");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn target_name_from_declaration_line() {
        assert_eq!(
            derive_target_object_name("        UserDto dto = new UserDto();"),
            Some("dto".to_string())
        );
        assert_eq!(
            derive_target_object_name("Map<String, Long> counts=new HashMap<>();"),
            Some("counts".to_string())
        );
        assert_eq!(derive_target_object_name("dto = mapper.create();"), Some("dto".to_string()));
        assert_eq!(derive_target_object_name("target ="), Some("target".to_string()));
    }

    #[test]
    fn target_name_absent_without_assignment() {
        assert_eq!(derive_target_object_name("return dto;"), None);
        assert_eq!(derive_target_object_name(""), None);
        assert_eq!(derive_target_object_name("if (a == b) {"), None);
        assert_eq!(derive_target_object_name("while (a != b && c <= d) {"), None);
    }

    #[test]
    fn first_assignment_on_the_line_wins() {
        assert_eq!(derive_target_object_name("a = b = c;"), Some("a".to_string()));
        assert_eq!(
            derive_target_object_name("if (x == y) z = 1;"),
            Some("z".to_string())
        );
    }
}
