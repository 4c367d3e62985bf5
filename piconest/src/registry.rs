// SPDX-License-Identifier: Apache-2.0

//! Validated, immutable set of delimiters used by the scanner.
//!
//! Matching priority is fixed when the registry is built:
//! 1. every ignore-pair start, in registration order;
//! 2. the tokens of every token pair, in registration order, longer token first
//!    within one pair.
//!
//! The first candidate that matches at an input position wins, so an earlier
//! registration shadows a later one that shares a prefix with it. The one
//! exception is decided by the scanner: the close token of the innermost open
//! region outranks every other pair token.

use alloc::vec::Vec;

use crate::config_error::{ConfigError, Slot};
use crate::token::{IgnoreId, IgnorePair, PairId, TokenPair};

/// What a matched delimiter means to the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenRole {
    IgnoreStart(IgnoreId),
    /// Open and close of a symmetric pair
    Toggle(PairId),
    Close(PairId),
    Open(PairId),
}

/// A delimiter that matched at some input position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub role: TokenRole,
    pub len: usize,
}

/// An immutable, validated set of [`TokenPair`]s and [`IgnorePair`]s.
///
/// Build once, then share it (it is `Send + Sync`) across any number of parses.
#[derive(Debug, Clone)]
pub struct Registry {
    pairs: Vec<TokenPair>,
    ignores: Vec<IgnorePair>,
    /// Roles in matching priority order
    candidates: Vec<TokenRole>,
    max_depth: Option<usize>,
}

impl Registry {
    /// Validates and indexes the given pairs.
    ///
    /// # Example
    /// ```
    /// use piconest::{IgnorePair, Registry, TokenPair};
    /// let registry = Registry::build(
    ///     [TokenPair::new("paren", "(", ")")],
    ///     [IgnorePair::new("\"", "\"")],
    /// ).unwrap();
    /// assert_eq!(registry.pairs().len(), 1);
    /// ```
    pub fn build<P, I>(pairs: P, ignores: I) -> Result<Self, ConfigError>
    where
        P: IntoIterator<Item = TokenPair>,
        I: IntoIterator<Item = IgnorePair>,
    {
        Self::with_max_depth(pairs.into_iter().collect(), ignores.into_iter().collect(), None)
    }

    /// Starts a fluent [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    fn with_max_depth(
        pairs: Vec<TokenPair>,
        ignores: Vec<IgnorePair>,
        max_depth: Option<usize>,
    ) -> Result<Self, ConfigError> {
        validate_pairs(&pairs)?;
        validate_ignores(&ignores)?;

        let mut candidates = Vec::with_capacity(ignores.len() + pairs.len() * 2);
        candidates.extend((0..ignores.len()).map(|i| TokenRole::IgnoreStart(IgnoreId(i))));
        for (i, pair) in pairs.iter().enumerate() {
            let id = PairId(i);
            if pair.is_symmetric() {
                candidates.push(TokenRole::Toggle(id));
            } else if pair.open().len() > pair.close().len() {
                candidates.push(TokenRole::Open(id));
                candidates.push(TokenRole::Close(id));
            } else {
                candidates.push(TokenRole::Close(id));
                candidates.push(TokenRole::Open(id));
            }
        }

        log::debug!(
            "Registry built: {} pairs, {} ignore pairs, max depth {:?}",
            pairs.len(),
            ignores.len(),
            max_depth
        );
        Ok(Registry {
            pairs,
            ignores,
            candidates,
            max_depth,
        })
    }

    /// All token pairs, in registration (priority) order.
    pub fn pairs(&self) -> &[TokenPair] {
        &self.pairs
    }

    /// All ignore pairs, in registration order.
    pub fn ignores(&self) -> &[IgnorePair] {
        &self.ignores
    }

    /// Looks up a pair. `None` if the id comes from a different, larger registry.
    pub fn pair(&self, id: PairId) -> Option<&TokenPair> {
        self.pairs.get(id.0)
    }

    pub fn ignore(&self, id: IgnoreId) -> Option<&IgnorePair> {
        self.ignores.get(id.0)
    }

    /// Finds a pair by its name.
    pub fn id_of(&self, name: &str) -> Option<PairId> {
        self.pairs.iter().position(|p| p.name() == name).map(PairId)
    }

    /// Maximum nesting depth, `None` when unbounded.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The delimiter string a role stands for
    pub(crate) fn token(&self, role: TokenRole) -> &str {
        match role {
            TokenRole::IgnoreStart(id) => self.ignores[id.0].start(),
            TokenRole::Toggle(id) | TokenRole::Open(id) => self.pairs[id.0].open(),
            TokenRole::Close(id) => self.pairs[id.0].close(),
        }
    }

    /// The close token of `pair` if it is a prefix of `rest`.
    pub(crate) fn close_at(&self, pair: PairId, rest: &str) -> Option<Candidate> {
        let token = self.pairs.get(pair.0)?;
        let role = if token.is_symmetric() {
            TokenRole::Toggle(pair)
        } else {
            TokenRole::Close(pair)
        };
        rest.starts_with(token.close()).then_some(Candidate {
            role,
            len: token.close().len(),
        })
    }

    /// Returns the highest-priority delimiter that is a prefix of `rest`.
    pub(crate) fn match_at(&self, rest: &str) -> Option<Candidate> {
        self.candidates.iter().find_map(|&role| {
            let token = self.token(role);
            rest.starts_with(token).then_some(Candidate {
                role,
                len: token.len(),
            })
        })
    }
}

fn validate_pairs(pairs: &[TokenPair]) -> Result<(), ConfigError> {
    for (index, pair) in pairs.iter().enumerate() {
        let empty = [
            (pair.name(), Slot::Name),
            (pair.open(), Slot::Open),
            (pair.close(), Slot::Close),
        ]
        .into_iter()
        .find(|(s, _)| s.is_empty());
        if let Some((_, slot)) = empty {
            return Err(ConfigError::EmptyDelimiter {
                index,
                pair: pair.clone(),
                slot,
            });
        }

        for (first, earlier) in pairs[..index].iter().enumerate() {
            if earlier.open() == pair.open() && earlier.close() == pair.close() {
                return Err(ConfigError::DuplicatePair {
                    first,
                    second: index,
                    pair: pair.clone(),
                });
            }
            if earlier.name() == pair.name() {
                return Err(ConfigError::DuplicateName {
                    first,
                    second: index,
                    pair: pair.clone(),
                });
            }
        }
    }
    Ok(())
}

fn validate_ignores(ignores: &[IgnorePair]) -> Result<(), ConfigError> {
    for (index, ignore) in ignores.iter().enumerate() {
        let slot = if ignore.start().is_empty() {
            Some(Slot::Start)
        } else if ignore.end().is_empty() {
            Some(Slot::End)
        } else {
            None
        };
        if let Some(slot) = slot {
            return Err(ConfigError::EmptyIgnoreDelimiter {
                index,
                ignore: ignore.clone(),
                slot,
            });
        }

        if let Some(first) = ignores[..index].iter().position(|earlier| earlier == ignore) {
            return Err(ConfigError::DuplicateIgnore {
                first,
                second: index,
                ignore: ignore.clone(),
            });
        }
    }
    Ok(())
}

/// Fluent construction of a [`Registry`].
///
/// # Example
/// ```
/// use piconest::Registry;
/// let registry = Registry::builder()
///     .pair("paren", "(", ")")
///     .pair("bracket", "[", "]")
///     .ignore("'", "'")
///     .max_depth(32)
///     .build()
///     .unwrap();
/// assert_eq!(registry.max_depth(), Some(32));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    pairs: Vec<TokenPair>,
    ignores: Vec<IgnorePair>,
    max_depth: Option<usize>,
}

impl RegistryBuilder {
    /// Registers a token pair. Earlier registrations take priority.
    pub fn pair(
        mut self,
        name: impl Into<alloc::string::String>,
        open: impl Into<alloc::string::String>,
        close: impl Into<alloc::string::String>,
    ) -> Self {
        self.pairs.push(TokenPair::new(name, open, close));
        self
    }

    pub fn token_pair(mut self, pair: TokenPair) -> Self {
        self.pairs.push(pair);
        self
    }

    /// Registers an ignore pair.
    pub fn ignore(
        mut self,
        start: impl Into<alloc::string::String>,
        end: impl Into<alloc::string::String>,
    ) -> Self {
        self.ignores.push(IgnorePair::new(start, end));
        self
    }

    pub fn ignore_pair(mut self, ignore: IgnorePair) -> Self {
        self.ignores.push(ignore);
        self
    }

    /// Bounds the nesting stack; deeper input fails with `MaxDepthReached`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn build(self) -> Result<Registry, ConfigError> {
        Registry::with_max_depth(self.pairs, self.ignores, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn parens() -> TokenPair {
        TokenPair::new("paren", "(", ")")
    }

    #[test]
    fn test_rejects_empty_delimiters() {
        let res = Registry::build([TokenPair::new("bad", "", ")")], []);
        assert_eq!(
            res.unwrap_err(),
            ConfigError::EmptyDelimiter {
                index: 0,
                pair: TokenPair::new("bad", "", ")"),
                slot: Slot::Open,
            }
        );

        let res = Registry::build([parens(), TokenPair::new("", "[", "]")], []);
        assert!(matches!(
            res,
            Err(ConfigError::EmptyDelimiter {
                index: 1,
                slot: Slot::Name,
                ..
            })
        ));

        let res = Registry::build([parens()], [IgnorePair::new("\"", "")]);
        assert!(matches!(
            res,
            Err(ConfigError::EmptyIgnoreDelimiter {
                index: 0,
                slot: Slot::End,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let res = Registry::build([parens(), TokenPair::new("again", "(", ")")], []);
        assert!(matches!(
            res,
            Err(ConfigError::DuplicatePair {
                first: 0,
                second: 1,
                ..
            })
        ));

        let res = Registry::build([parens(), TokenPair::new("paren", "[", "]")], []);
        assert!(matches!(
            res,
            Err(ConfigError::DuplicateName {
                first: 0,
                second: 1,
                ..
            })
        ));

        let res = Registry::build(
            [],
            [IgnorePair::new("'", "'"), IgnorePair::new("'", "'")],
        );
        assert!(matches!(
            res,
            Err(ConfigError::DuplicateIgnore {
                first: 0,
                second: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_same_open_different_close_is_allowed() {
        let res = Registry::build([parens(), TokenPair::new("odd", "(", "]")], []);
        assert!(res.is_ok());
    }

    #[test]
    fn test_priority_is_registration_order() {
        let registry = Registry::build(
            [
                TokenPair::new("angle", "<", ">"),
                TokenPair::new("double", "<<", ">>"),
            ],
            [],
        )
        .unwrap();
        assert_eq!(
            registry.match_at("<<x"),
            Some(Candidate {
                role: TokenRole::Open(PairId(0)),
                len: 1
            })
        );
        assert_eq!(
            registry.match_at(">>"),
            Some(Candidate {
                role: TokenRole::Close(PairId(0)),
                len: 1
            })
        );

        let reversed = Registry::build(
            [
                TokenPair::new("double", "<<", ">>"),
                TokenPair::new("angle", "<", ">"),
            ],
            [],
        )
        .unwrap();
        assert_eq!(
            reversed.match_at("<<x"),
            Some(Candidate {
                role: TokenRole::Open(PairId(0)),
                len: 2
            })
        );
        assert_eq!(
            reversed.match_at("<x"),
            Some(Candidate {
                role: TokenRole::Open(PairId(1)),
                len: 1
            })
        );
    }

    #[test]
    fn test_longer_token_first_within_a_pair() {
        let registry = Registry::build([TokenPair::new("quote3", "'", "'''")], []).unwrap();
        assert_eq!(
            registry.match_at("'''"),
            Some(Candidate {
                role: TokenRole::Close(PairId(0)),
                len: 3
            })
        );
        assert_eq!(
            registry.match_at("'a"),
            Some(Candidate {
                role: TokenRole::Open(PairId(0)),
                len: 1
            })
        );
    }

    #[test]
    fn test_ignore_start_outranks_pairs() {
        let registry = Registry::build(
            [TokenPair::new("quote", "\"", "\"")],
            [IgnorePair::new("\"", "\"")],
        )
        .unwrap();
        assert_eq!(
            registry.match_at("\"x\""),
            Some(Candidate {
                role: TokenRole::IgnoreStart(IgnoreId(0)),
                len: 1
            })
        );
    }

    #[test]
    fn test_symmetric_pair_has_one_candidate() {
        let registry = Registry::build([TokenPair::new("quote", "\"", "\"")], []).unwrap();
        assert_eq!(registry.candidates, [TokenRole::Toggle(PairId(0))]);
        assert_eq!(registry.match_at("a\""), None);
    }

    #[test]
    fn test_close_at() {
        let registry = Registry::builder()
            .pair("block", "begin", "end")
            .pair("cond", "if", "end")
            .pair("pipe", "|", "|")
            .build()
            .unwrap();
        assert_eq!(
            registry.close_at(PairId(1), "end end"),
            Some(Candidate {
                role: TokenRole::Close(PairId(1)),
                len: 3
            })
        );
        assert_eq!(
            registry.close_at(PairId(2), "|x"),
            Some(Candidate {
                role: TokenRole::Toggle(PairId(2)),
                len: 1
            })
        );
        assert_eq!(registry.close_at(PairId(0), "if"), None);
        assert_eq!(registry.close_at(PairId(9), "end"), None);
    }

    #[test]
    fn test_lookup() {
        let registry = Registry::builder()
            .pair("paren", "(", ")")
            .pair("brace", "{", "}")
            .max_depth(4)
            .build()
            .unwrap();
        assert_eq!(registry.id_of("brace"), Some(PairId(1)));
        assert_eq!(registry.id_of("nope"), None);
        assert_eq!(registry.pair(PairId(0)).map(TokenPair::open), Some("("));
        assert_eq!(registry.pair(PairId(7)), None);
        assert_eq!(registry.ignore(IgnoreId(0)), None);
        assert_eq!(registry.max_depth(), Some(4));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
