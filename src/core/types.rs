// value types shared by the matcher, the generator and the inserter
use std::fmt;

use serde::{Deserialize, Serialize};

/// A field identifier. Case-sensitive, never normalized.
pub type FieldName = String;

/// Ordered field names of one type. Order drives generation on the target side.
pub type FieldSet = Vec<FieldName>;

/// The two identifiers prefixing every generated call, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectBinding {
    pub source: String,
    pub target: String,
}

impl ObjectBinding {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Outcome of looking up one target field among the source fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub field: FieldName,
    pub has_source_match: bool,
}

/// Accessor name prefixes. The default is the bean convention `set`/`get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorStyle {
    pub setter_prefix: String,
    pub getter_prefix: String,
}

impl Default for AccessorStyle {
    fn default() -> Self {
        Self {
            setter_prefix: "set".to_string(),
            getter_prefix: "get".to_string(),
        }
    }
}

/// One line of generated code, without indentation or line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStatement(String);

impl GeneratedStatement {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GeneratedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for GeneratedStatement {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
