// bare name -> imported qualified name
use serde::Serialize;

/// Best import for a bare name, plus every other import that also qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportMatch {
    pub qualified: String,
    pub others: Vec<String>,
}

impl ImportMatch {
    pub fn is_ambiguous(&self) -> bool {
        !self.others.is_empty()
    }

    pub fn candidates(&self) -> Vec<String> {
        std::iter::once(self.qualified.clone())
            .chain(self.others.iter().cloned())
            .collect()
    }
}

fn has_segment(qualified: &str, name: &str) -> bool {
    qualified.split('.').any(|segment| segment == name)
}

/// Imports whose dot-separated segments contain `name`, in import order.
/// The first one is the best match; the rest make the lookup ambiguous.
///
/// Empty names and empty import entries never match.
pub fn lookup_import<S: AsRef<str>>(imports: &[S], name: &str) -> Option<ImportMatch> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut hits = imports
        .iter()
        .map(|s| s.as_ref())
        .filter(|q| !q.is_empty() && has_segment(q, name))
        .map(str::to_string);

    let qualified = hits.next()?;
    Some(ImportMatch {
        qualified,
        others: hits.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORTS: &[&str] = &[
        "java.util.List",
        "com.acme.user.User",
        "com.acme.user.dto.UserDto",
        "com.acme.legacy.User",
    ];

    #[test]
    fn single_hit() {
        let m = lookup_import(IMPORTS, "UserDto").unwrap();
        assert_eq!(m.qualified, "com.acme.user.dto.UserDto");
        assert!(!m.is_ambiguous());
    }

    #[test]
    fn first_hit_wins_and_others_are_flagged() {
        let m = lookup_import(IMPORTS, "User").unwrap();
        assert_eq!(m.qualified, "com.acme.user.User");
        assert!(m.is_ambiguous());
        assert_eq!(m.others, vec!["com.acme.legacy.User".to_string()]);
        assert_eq!(m.candidates().len(), 2);
    }

    #[test]
    fn segment_match_not_substring() {
        assert!(lookup_import(IMPORTS, "Use").is_none());
        assert!(lookup_import(IMPORTS, "List").is_some());
    }

    #[test]
    fn package_segments_count_too() {
        // "user" is a package segment of two imports
        let m = lookup_import(IMPORTS, "user").unwrap();
        assert_eq!(m.qualified, "com.acme.user.User");
        assert_eq!(m.others, vec!["com.acme.user.dto.UserDto".to_string()]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let m = lookup_import(IMPORTS, "  UserDto\n").unwrap();
        assert_eq!(m.qualified, "com.acme.user.dto.UserDto");
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(lookup_import(IMPORTS, "").is_none());
        assert!(lookup_import(&["", "a.b"], "").is_none());
        assert!(lookup_import(&Vec::<String>::new(), "User").is_none());
    }
}
