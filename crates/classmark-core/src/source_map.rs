use crate::span::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// Bytes between two stored char counts.
const CHAR_CHECKPOINT: usize = 64;

/// Maps byte offsets of a text onto zero-based line/character positions.
#[derive(Clone, Debug)]
pub struct SourceMap {
    source: String,
    line_starts: Vec<usize>,
    /// `char_counts[i]` is the number of chars before byte `i * CHAR_CHECKPOINT`.
    char_counts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::new();
        line_starts.push(0);
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        let mut char_counts = vec![0];
        let mut chars = 0;
        for chunk in source.as_bytes().chunks(CHAR_CHECKPOINT) {
            chars += count_chars(chunk);
            char_counts.push(chars);
        }
        Self {
            source: source.to_string(),
            line_starts,
            char_counts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        Position {
            line,
            // Counted in chars: authored notes are mostly non-ASCII.
            character: self.chars_before(offset) - self.chars_before(line_start),
        }
    }

    fn chars_before(&self, offset: usize) -> usize {
        let block = offset / CHAR_CHECKPOINT;
        let block_start = block * CHAR_CHECKPOINT;
        self.char_counts[block] + count_chars(&self.source.as_bytes()[block_start..offset])
    }

    pub fn range(&self, span: Span) -> Range {
        Range {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }
}

/// Chars starting inside `bytes`: every byte that is not a UTF-8
/// continuation byte starts one.
fn count_chars(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&byte| byte & 0xC0 != 0x80).count()
}
