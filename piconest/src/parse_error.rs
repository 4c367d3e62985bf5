// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use crate::scanner;
use crate::shared::UnexpectedState;
use crate::token::{IgnoreId, PairId};

/// Errors that can occur during parsing.
///
/// Every error is final: no partial tree is returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closing delimiter whose pair is not the innermost open region.
    UnmatchedClose {
        offset: usize,
        pair: PairId,
        token: String,
    },
    /// Input ended with this region still open (the outermost one is reported).
    UnterminatedOpen { offset: usize, pair: PairId },
    /// Input ended inside an ignore span started at `offset`.
    UnterminatedIgnore { offset: usize, ignore: IgnoreId },
    /// Opening one more region would exceed the registry's depth limit.
    MaxDepthReached {
        offset: usize,
        pair: PairId,
        limit: usize,
    },
    /// The parser entered an unexpected internal state.
    Unexpected(UnexpectedState),
}

impl ParseError {
    /// Byte offset the error points at, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnmatchedClose { offset, .. }
            | ParseError::UnterminatedOpen { offset, .. }
            | ParseError::UnterminatedIgnore { offset, .. }
            | ParseError::MaxDepthReached { offset, .. } => Some(*offset),
            ParseError::Unexpected(_) => None,
        }
    }
}

impl From<scanner::Error> for ParseError {
    fn from(err: scanner::Error) -> Self {
        let offset = err.position();
        match err.kind() {
            scanner::ErrKind::UnmatchedClose(pair) => ParseError::UnmatchedClose {
                offset,
                pair,
                token: err.token().into(),
            },
            scanner::ErrKind::UnterminatedOpen(pair) => {
                ParseError::UnterminatedOpen { offset, pair }
            }
            scanner::ErrKind::UnterminatedIgnore(ignore) => {
                ParseError::UnterminatedIgnore { offset, ignore }
            }
            scanner::ErrKind::MaxDepthReached { pair, limit } => ParseError::MaxDepthReached {
                offset,
                pair,
                limit,
            },
        }
    }
}

impl From<UnexpectedState> for ParseError {
    fn from(info: UnexpectedState) -> Self {
        ParseError::Unexpected(info)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnmatchedClose { offset, token, .. } => write!(
                f,
                "{token:?} at offset {offset} closes a region that is not open"
            ),
            ParseError::UnterminatedOpen { offset, pair } => write!(
                f,
                "region of pair #{} opened at offset {offset} is never closed",
                pair.index()
            ),
            ParseError::UnterminatedIgnore { offset, ignore } => write!(
                f,
                "ignore span of pair #{} started at offset {offset} is never closed",
                ignore.index()
            ),
            ParseError::MaxDepthReached { offset, limit, .. } => {
                write!(f, "nesting deeper than {limit} at offset {offset}")
            }
            ParseError::Unexpected(state) => write!(f, "unexpected parser state: {state}"),
        }
    }
}

impl core::error::Error for ParseError {}
