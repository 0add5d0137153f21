// indentation-preserving insertion below the anchor line
/*
Contract:

    statements land immediately below the anchor line, in input order

    every inserted line gets the anchor line's indentation, captured once

    the insertion offset only moves forward; nothing is rolled back, so callers
    validate everything before the first insert and hold the buffer exclusively
    for the whole sequence
*/
use crate::core::error::BufferError;
use crate::core::types::GeneratedStatement;

/// A text document addressed by byte offsets and zero-based line indices.
/// Lines end in `\n` or `\r\n`; the terminator is not part of the line text.
pub trait TextBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn line_count(&self) -> usize;

    fn line_start_offset(&self, line: usize) -> Result<usize, BufferError>;

    /// Offset just past the last character of `line`, before its terminator.
    fn line_end_offset(&self, line: usize) -> Result<usize, BufferError>;

    /// Length of the terminator starting at `line_end_offset`, 0 if there is none.
    fn terminator_len_at(&self, line_end_offset: usize) -> usize;

    /// Terminator for newly inserted lines.
    fn line_terminator(&self) -> &'static str {
        "\n"
    }

    fn text_of_line(&self, line: usize) -> Result<&str, BufferError>;

    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), BufferError>;
}

/// In-memory buffer. Text is kept byte for byte, line endings included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    //start offset of every line, always non-empty
    line_starts: Vec<usize>,
}

impl LineBuffer {
    pub fn new(text: &str) -> Self {
        let text = text.to_string();
        let line_starts = Self::index_lines(&text);
        Self { text, line_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Line index holding `offset`. Offsets past the end map to the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    fn index_lines(text: &str) -> Vec<usize> {
        std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect()
    }

    fn check_line(&self, line: usize) -> Result<(), BufferError> {
        if line >= self.line_starts.len() {
            return Err(BufferError::LineOutOfRange {
                line,
                line_count: self.line_starts.len(),
            });
        }
        Ok(())
    }
}

impl TextBuffer for LineBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_start_offset(&self, line: usize) -> Result<usize, BufferError> {
        self.check_line(line)?;
        Ok(self.line_starts[line])
    }

    fn line_end_offset(&self, line: usize) -> Result<usize, BufferError> {
        self.check_line(line)?;
        match self.line_starts.get(line + 1) {
            Some(&next) => {
                let newline = next - 1;
                let crlf = newline > self.line_starts[line] && self.text.as_bytes()[newline - 1] == b'\r';
                Ok(if crlf { newline - 1 } else { newline })
            }
            None => Ok(self.text.len()),
        }
    }

    fn terminator_len_at(&self, line_end_offset: usize) -> usize {
        match self.text.as_bytes().get(line_end_offset..) {
            Some(rest) if rest.starts_with(b"\r\n") => 2,
            Some(rest) if rest.starts_with(b"\n") => 1,
            _ => 0,
        }
    }

    //the first line decides; a buffer without any line break gets `\n`
    fn line_terminator(&self) -> &'static str {
        match self.line_starts.get(1) {
            Some(&next) if next >= 2 && self.text.as_bytes()[next - 2] == b'\r' => "\r\n",
            _ => "\n",
        }
    }

    fn text_of_line(&self, line: usize) -> Result<&str, BufferError> {
        let start = self.line_start_offset(line)?;
        let end = self.line_end_offset(line)?;
        Ok(&self.text[start..end])
    }

    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        if offset > self.text.len() {
            return Err(BufferError::OffsetOutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(BufferError::NotCharBoundary { offset });
        }
        self.text.insert_str(offset, text);
        self.line_starts = Self::index_lines(&self.text);
        Ok(())
    }
}

/// Leading whitespace of `line`, copied verbatim (tabs stay tabs).
pub fn leading_indent(line: &str) -> &str {
    let indent_len = line.len() - line.trim_start().len();
    &line[..indent_len]
}

/// Where the first statement goes: the start of the line after the anchor.
/// Fails when the anchor line has no terminator to insert after.
pub fn insertion_start<B: TextBuffer + ?Sized>(buffer: &B, anchor_line_end_offset: usize) -> Result<usize, BufferError> {
    let start = next_line_start(buffer, anchor_line_end_offset)?;
    if start > buffer.len() {
        return Err(BufferError::OffsetOutOfRange {
            offset: start,
            len: buffer.len(),
        });
    }
    Ok(start)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Start of the last inserted line, `None` if nothing was inserted.
    pub cursor: Option<usize>,
    /// Offset right after the last inserted line.
    pub next_offset: usize,
    pub inserted: usize,
}

fn next_line_start<B: TextBuffer + ?Sized>(buffer: &B, anchor_line_end_offset: usize) -> Result<usize, BufferError> {
    let terminator = buffer.terminator_len_at(anchor_line_end_offset).max(1);
    anchor_line_end_offset
        .checked_add(terminator)
        .ok_or(BufferError::OffsetOutOfRange {
            offset: anchor_line_end_offset,
            len: buffer.len(),
        })
}

/// Insert every statement on its own line below the anchor, indented like it.
/// New lines end with the buffer's own terminator.
pub fn insert_all<B: TextBuffer + ?Sized>(
    statements: &[GeneratedStatement],
    anchor_indent: &str,
    buffer: &mut B,
    anchor_line_end_offset: usize,
) -> Result<InsertOutcome, BufferError> {
    let mut offset = next_line_start(buffer, anchor_line_end_offset)?;
    let mut cursor = None;
    let terminator = buffer.line_terminator();

    for statement in statements {
        let line = format!("{anchor_indent}{statement}{terminator}");
        buffer.insert_text(offset, &line)?;
        cursor = Some(offset);
        offset += line.len();
    }

    Ok(InsertOutcome {
        cursor,
        next_offset: offset,
        inserted: statements.len(),
    })
}
