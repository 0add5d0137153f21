use thiserror::Error;

/// Failures of the line-addressable buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is past the end of the buffer (len {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("line {line} does not exist (buffer has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable")]
    Unavailable,

    #[error("{0}")]
    Read(String),
}

/// Which precondition the user has to fix before re-triggering the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingInput {
    #[error("the clipboard is empty")]
    ClipboardEmpty,

    #[error("no class name is selected")]
    SelectionEmpty,

    #[error("no import matches `{name}`")]
    NoImportMatch { name: String },

    #[error("`{name}` matches several imports: {}", .candidates.join(", "))]
    AmbiguousImport { name: String, candidates: Vec<String> },

    #[error("line {line} has no assignment to take the target object name from")]
    NoAssignmentTarget { line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error(transparent)]
    UserInputMissing(#[from] MissingInput),

    #[error("cannot resolve fields of `{name}`")]
    TypeResolution { name: String },

    #[error("Error: {0}")]
    ClipboardAccess(#[from] ClipboardError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

impl BridgeError {
    /// Missing input is reported as a warning, everything else as an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, BridgeError::UserInputMissing(_))
    }
}
