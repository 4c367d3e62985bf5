// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use crate::token::PairId;

/// One open, not yet closed region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenRegion {
    pub pair: PairId,
    /// Offset of the opening delimiter
    pub offset: usize,
}

/// The scanner's stack of open regions, innermost last.
///
/// NOTE: the stack only tracks depth against the optional limit. Whether a
/// close is legal is decided by the caller through [`NestingStack::top`].
#[derive(Debug, Clone, Default)]
pub(crate) struct NestingStack {
    entries: Vec<OpenRegion>,
    limit: Option<usize>,
}

/// Push refused because the depth limit was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DepthExceeded(pub usize);

impl NestingStack {
    pub fn new(limit: Option<usize>) -> Self {
        NestingStack {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, pair: PairId, offset: usize) -> Result<(), DepthExceeded> {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                return Err(DepthExceeded(limit));
            }
        }
        self.entries.push(OpenRegion { pair, offset });
        Ok(())
    }

    pub fn pop(&mut self) -> Option<OpenRegion> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<OpenRegion> {
        self.entries.last().copied()
    }

    /// The outermost open region
    pub fn bottom(&self) -> Option<OpenRegion> {
        self.entries.first().copied()
    }

    /// True if the innermost open region belongs to `pair`
    pub fn is_top(&self, pair: PairId) -> bool {
        self.top().is_some_and(|open| open.pair == pair)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
