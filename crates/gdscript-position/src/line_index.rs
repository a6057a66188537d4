//! Line start cache for converting byte offsets to 1-based line / 0-based
//! column positions.

use crate::LineCol;

/// Precomputed byte offsets of every line start in a source text.
///
/// Built once per file; every subsequent offset-to-position conversion is
/// `O(log n)` via binary search rather than re-scanning the source.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first character of each line; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    source_len: usize,
}

impl LineIndex {
    /// Build the index by scanning `source` once for `\n` bytes.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts, source_len: source.len() }
    }

    /// Convert a byte offset into a 1-based line, 0-based column position.
    ///
    /// Offsets past the end of the source clamp to the last valid position.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let offset = offset.min(self.source_len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let column = offset - self.line_starts[line_idx];
        LineCol::new((line_idx + 1) as u32, column as u32)
    }

    /// Convert a 1-based line, 0-based column position back into a byte offset.
    ///
    /// Returns `None` if the line is out of range.
    pub fn offset(&self, pos: LineCol) -> Option<usize> {
        let line_idx = pos.line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(line_idx)?;
        Some((start + pos.column as usize).min(self.source_len))
    }

    /// Number of lines in the indexed source (always at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_positions() {
        let idx = LineIndex::new("hello");
        assert_eq!(idx.line_col(0), LineCol::new(1, 0));
        assert_eq!(idx.line_col(5), LineCol::new(1, 5));
    }

    #[test]
    fn multi_line_positions() {
        let idx = LineIndex::new("abc\ndef\nghi");
        assert_eq!(idx.line_col(0), LineCol::new(1, 0));
        assert_eq!(idx.line_col(4), LineCol::new(2, 0));
        assert_eq!(idx.line_col(6), LineCol::new(2, 2));
        assert_eq!(idx.line_col(8), LineCol::new(3, 0));
    }

    #[test]
    fn offset_round_trips() {
        let idx = LineIndex::new("abc\ndef\nghi");
        for offset in [0usize, 2, 4, 7, 10] {
            let pos = idx.line_col(offset);
            assert_eq!(idx.offset(pos), Some(offset));
        }
    }

    #[test]
    fn line_count_counts_newlines_plus_one() {
        assert_eq!(LineIndex::new("a\nb\nc").line_count(), 3);
        assert_eq!(LineIndex::new("a").line_count(), 1);
    }
}
