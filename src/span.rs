use std::ops::Range;

/// Where a token or diagnostic sits in the source: a byte range plus the line
/// the scanner was on when it finished the lexeme.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Span {
    pub range: Range<usize>,
    pub line: usize,
}

impl Span {
    pub const fn new(range: Range<usize>, line: usize) -> Self {
        Self { range, line }
    }

    /// Zero-width span at `offset`, used for the end-of-input marker.
    pub const fn empty(offset: usize, line: usize) -> Self {
        Self {
            range: offset..offset,
            line,
        }
    }
}
