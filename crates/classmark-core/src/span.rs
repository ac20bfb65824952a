use std::ops::Range;

/// A byte range in the decoded document text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) fn at(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn at_covers_the_token() {
        assert_eq!(Span::at(4, 2), Span { start: 4, end: 6 });
        assert_eq!(Span::from(3..9), Span { start: 3, end: 9 });
    }
}
