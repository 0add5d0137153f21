// collaborators the action talks to; the engine itself never touches them
use std::cell::RefCell;

use log::{error, info, warn};

use crate::core::error::{BufferError, ClipboardError};
use crate::core::insert::{LineBuffer, TextBuffer};
use crate::core::types::FieldSet;

pub trait Clipboard {
    fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Type lookup by qualified or simple name.
pub trait TypeIndex {
    type Handle;

    fn resolve_type(&self, name: &str) -> Option<Self::Handle>;

    /// Declared field names in declaration order.
    fn fields_of(&self, handle: &Self::Handle) -> FieldSet;
}

pub trait ImportIndex {
    fn imported_qualified_names(&self) -> Vec<String>;
}

/// Open document plus caret/selection state.
pub trait Editor {
    type Buffer: TextBuffer;

    fn buffer(&self) -> &Self::Buffer;

    fn buffer_mut(&mut self) -> &mut Self::Buffer;

    fn caret_line(&self) -> usize;

    fn move_caret_to(&mut self, offset: usize) -> Result<(), BufferError>;

    fn selected_text(&self) -> Option<String>;

    /// Tell the document owner that the content changed.
    fn commit(&mut self);
}

pub trait Notifier {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifications routed to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn info(&self, message: &str) {
        info!("[Tips] {message}");
    }

    fn warn(&self, message: &str) {
        warn!("[Warn] {message}");
    }

    fn error(&self, message: &str) {
        error!("[Error] {message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Keeps every notification in order; used by tests and by hosts that render
/// notifications themselves.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.borrow().clone()
    }

    pub fn of(&self, severity: Severity) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, severity: Severity, message: &str) {
        self.messages.borrow_mut().push((severity, message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}

/// Editor over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct BufferEditor {
    buffer: LineBuffer,
    caret_line: usize,
    caret_offset: usize,
    selection: Option<String>,
    commits: usize,
}

impl BufferEditor {
    pub fn new(buffer: LineBuffer, caret_line: usize, selection: Option<String>) -> Self {
        let caret_offset = buffer.line_start_offset(caret_line).unwrap_or(0);
        Self {
            buffer,
            caret_line,
            caret_offset,
            selection,
            commits: 0,
        }
    }

    pub fn caret_offset(&self) -> usize {
        self.caret_offset
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn into_buffer(self) -> LineBuffer {
        self.buffer
    }
}

impl Editor for BufferEditor {
    type Buffer = LineBuffer;

    fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    fn caret_line(&self) -> usize {
        self.caret_line
    }

    fn move_caret_to(&mut self, offset: usize) -> Result<(), BufferError> {
        if offset > self.buffer.len() {
            return Err(BufferError::OffsetOutOfRange {
                offset,
                len: self.buffer.len(),
            });
        }
        self.caret_offset = offset;
        self.caret_line = self.buffer.line_of_offset(offset);
        Ok(())
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn commit(&mut self) {
        self.commits += 1;
    }
}
