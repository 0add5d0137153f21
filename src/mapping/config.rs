use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::BridgeError;
use crate::core::types::AccessorStyle;
use crate::mapping::snapshot::{parse_document, DocumentFormat};

/// What to do when a bare name matches more than one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Take the first import in source order and warn about the rest.
    #[default]
    First,
    /// Stop and ask the user to disambiguate.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub accessors: AccessorStyle,
    pub ambiguous_imports: AmbiguityPolicy,
    /// Terminate an unterminated last anchor line instead of failing.
    pub append_missing_newline: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            accessors: AccessorStyle::default(),
            ambiguous_imports: AmbiguityPolicy::default(),
            append_missing_newline: true,
        }
    }
}

impl BridgeConfig {
    pub fn load(path: &Path, text: &str) -> Result<Self, BridgeError> {
        parse_document(text, DocumentFormat::from_path(path))
    }
}
