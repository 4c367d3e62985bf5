// SPDX-License-Identifier: Apache-2.0

//! Shared components for the scanner and tree builder

use crate::token::{IgnoreId, PairId};

/// Half-open byte range `[start, end)` into the parsed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True if `other` lies entirely within this span
    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub const fn range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<core::ops::Range<usize>> for Span {
    fn from(range: core::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Structural events produced by the scanner.
///
/// Each event is reported together with a [`Span`]: the delimiter for the
/// region/ignore events, the text run for `Literal`, and an empty span at the
/// end of input for `EndDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An opening delimiter of a pair.
    EnterRegion(PairId),
    /// The closing delimiter of the innermost open region.
    ExitRegion(PairId),
    /// The start delimiter of an ignore span.
    EnterIgnore(IgnoreId),
    /// The end delimiter closing the active ignore span.
    ExitIgnore(IgnoreId),
    /// A maximal run of text outside any delimiter and outside ignore spans.
    Literal,
    /// Input fully consumed; the implicit close of the root region.
    EndDocument,
}

/// Inconsistencies between the scanner's event stream and the tree under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedState {
    /// `ExitRegion` did not match the region on top of the construction stack.
    RegionMismatch,
    /// `ExitIgnore` without a preceding `EnterIgnore`.
    IgnoreMismatch,
    /// An event arrived after `EndDocument`, or the stream ended without one.
    DocumentState,
}

impl core::fmt::Display for UnexpectedState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            UnexpectedState::RegionMismatch => "region exit does not match the open region",
            UnexpectedState::IgnoreMismatch => "ignore exit without ignore start",
            UnexpectedState::DocumentState => "event stream not terminated by end of document",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(2, 7);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 2..7);
        assert!(span.contains(Span::new(2, 7)));
        assert!(span.contains(Span::new(3, 4)));
        assert!(!span.contains(Span::new(1, 4)));
        assert!(!span.contains(Span::new(6, 8)));
    }

    #[test]
    fn test_span_edge_cases() {
        // Inverted spans are treated as empty instead of underflowing
        let span = Span::new(5, 3);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
        assert_eq!(Span::from(4..4), Span::new(4, 4));
    }
}
