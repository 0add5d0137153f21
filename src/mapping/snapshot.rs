// host state captured as plain data, loadable from .toon or .json
use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::error::{BridgeError, ClipboardError};
use crate::core::types::FieldSet;
use crate::mapping::host::{Clipboard, ImportIndex, TypeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toon,
    Json,
}

impl DocumentFormat {
    /// `.json` is JSON, anything else is read as TOON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Toon,
        }
    }
}

pub fn parse_document<T: DeserializeOwned>(text: &str, format: DocumentFormat) -> Result<T, BridgeError> {
    match format {
        DocumentFormat::Toon => toon_format::decode_default(text).map_err(|e| BridgeError::Snapshot(e.to_string())),
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| BridgeError::Snapshot(e.to_string())),
    }
}

pub fn render_document<T: Serialize>(value: &T, format: DocumentFormat) -> Result<String, BridgeError> {
    match format {
        DocumentFormat::Toon => toon_format::encode_default(value).map_err(|e| BridgeError::Snapshot(e.to_string())),
        DocumentFormat::Json => serde_json::to_string_pretty(value).map_err(|e| BridgeError::Snapshot(e.to_string())),
    }
}

/// Everything the action needs from the host, frozen at invocation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSnapshot {
    /// Qualified names from the file's import list, in source order.
    pub imports: Vec<String>,
    /// Qualified type name -> declared field names.
    pub types: BTreeMap<String, Vec<String>>,
    /// `None` models a clipboard that could not be read.
    pub clipboard: Option<String>,
    pub selection: Option<String>,
    pub caret_line: usize,
}

impl HostSnapshot {
    pub fn with_type(mut self, qualified: &str, fields: &[&str]) -> Self {
        self.imports.push(qualified.to_string());
        self.types
            .insert(qualified.to_string(), fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

/// Serves clipboard, imports and types out of a snapshot.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    snapshot: HostSnapshot,
}

impl InMemoryHost {
    pub fn new(snapshot: HostSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }
}

impl Clipboard for InMemoryHost {
    fn read_text(&self) -> Result<String, ClipboardError> {
        self.snapshot.clipboard.clone().ok_or(ClipboardError::Unavailable)
    }
}

impl ImportIndex for InMemoryHost {
    fn imported_qualified_names(&self) -> Vec<String> {
        self.snapshot.imports.clone()
    }
}

impl TypeIndex for InMemoryHost {
    type Handle = String;

    /// Exact qualified name first, then a unique simple-name hit.
    fn resolve_type(&self, name: &str) -> Option<String> {
        if self.snapshot.types.contains_key(name) {
            return Some(name.to_string());
        }
        let mut simple = self
            .snapshot
            .types
            .keys()
            .filter(|q| q.rsplit('.').next() == Some(name));
        match (simple.next(), simple.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }

    fn fields_of(&self, handle: &String) -> FieldSet {
        self.snapshot.types.get(handle).cloned().unwrap_or_default()
    }
}

pub fn load_snapshot(path: &Path, text: &str) -> Result<HostSnapshot, BridgeError> {
    parse_document(text, DocumentFormat::from_path(path))
}
