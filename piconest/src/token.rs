// SPDX-License-Identifier: Apache-2.0

//! Delimiter definitions: structural token pairs and ignore pairs.

use alloc::string::String;

/// A named pair of opening/closing delimiters that defines a structural region.
///
/// `open` may equal `close`, e.g. a quote character. Such a pair is *symmetric*
/// and toggles instead of nesting into itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPair {
    name: String,
    open: String,
    close: String,
}

impl TokenPair {
    /// Creates a new pair. Emptiness is checked when the pair is registered.
    ///
    /// # Example
    /// ```
    /// use piconest::TokenPair;
    /// let parens = TokenPair::new("paren", "(", ")");
    /// assert!(!parens.is_symmetric());
    /// ```
    pub fn new(
        name: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// True when the same delimiter both opens and closes the region.
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// A start/end pair marking a span in which no [`TokenPair`] is recognized.
///
/// Inside the span only `end` is recognized, and its first occurrence closes
/// the span. A repeated `start` is plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IgnorePair {
    start: String,
    end: String,
}

impl IgnorePair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn is_symmetric(&self) -> bool {
        self.start == self.end
    }
}

/// Identity of a [`TokenPair`] inside the registry it was registered with.
///
/// This is the registration index, which is also the pair's matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub(crate) usize);

impl PairId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of an [`IgnorePair`] inside the registry it was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IgnoreId(pub(crate) usize);

impl IgnoreId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_detection() {
        assert!(TokenPair::new("quote", "\"", "\"").is_symmetric());
        assert!(!TokenPair::new("angle", "<", ">").is_symmetric());
        assert!(IgnorePair::new("'", "'").is_symmetric());
        assert!(!IgnorePair::new("/*", "*/").is_symmetric());
    }

    #[test]
    fn test_accessors() {
        let pair = TokenPair::new("block", "begin", "end");
        assert_eq!(pair.name(), "block");
        assert_eq!(pair.open(), "begin");
        assert_eq!(pair.close(), "end");

        let ignore = IgnorePair::new("<!--", "-->");
        assert_eq!(ignore.start(), "<!--");
        assert_eq!(ignore.end(), "-->");
    }
}
