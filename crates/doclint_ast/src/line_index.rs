//! Conversion between byte offsets and line/column positions.

use crate::Position;

/// Line table for one source text.
///
/// Lines are separated by `\n` only; a trailing `\r` stays part of the line
/// content so that offsets and positions always round-trip exactly. Columns
/// are 1-indexed and counted in characters.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset of the first byte of each line.
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    /// Builds the line table for `source`.
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Returns the content of `line` (1-indexed), without its `\n`.
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = match self.line_starts.get(idx + 1) {
            Some(next) => *next as usize - 1,
            None => self.source.len(),
        };
        Some(&self.source[start..end])
    }

    /// Converts a byte offset into a position.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let idx = self
            .line_starts
            .partition_point(|start| *start as usize <= offset)
            - 1;
        let line_start = self.line_starts[idx] as usize;
        let column = self.source[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .count();
        Position::new(idx as u32 + 1, column as u32 + 1)
    }

    /// Converts a position into a byte offset.
    ///
    /// A column one past the last character of the line addresses the line
    /// end. Returns `None` for line 0, column 0, or coordinates outside the
    /// source.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let text = self.line_text(position.line)?;
        let line_start = self.line_starts[position.line as usize - 1] as usize;
        let col = (position.column as usize).checked_sub(1)?;

        let mut chars = text.char_indices().map(|(i, _)| i);
        match chars.nth(col) {
            Some(byte) => Some(line_start + byte),
            None if col == text.chars().count() => Some(line_start + text.len()),
            None => None,
        }
    }
}
