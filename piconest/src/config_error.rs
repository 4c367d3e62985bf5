// SPDX-License-Identifier: Apache-2.0

use crate::token::{IgnorePair, TokenPair};

/// Which part of a delimiter definition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Name,
    Open,
    Close,
    Start,
    End,
}

/// Errors that can occur while building a [`Registry`](crate::Registry).
///
/// Indices refer to positions in the order the pairs were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A token pair has an empty name, opening or closing delimiter.
    EmptyDelimiter {
        index: usize,
        pair: TokenPair,
        slot: Slot,
    },
    /// An ignore pair has an empty start or end delimiter.
    EmptyIgnoreDelimiter {
        index: usize,
        ignore: IgnorePair,
        slot: Slot,
    },
    /// Two token pairs use the same opening and closing delimiters.
    DuplicatePair {
        first: usize,
        second: usize,
        pair: TokenPair,
    },
    /// Two token pairs were registered under the same name.
    DuplicateName {
        first: usize,
        second: usize,
        pair: TokenPair,
    },
    /// Two ignore pairs use the same start and end delimiters.
    DuplicateIgnore {
        first: usize,
        second: usize,
        ignore: IgnorePair,
    },
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Slot::Name => "name",
            Slot::Open => "opening delimiter",
            Slot::Close => "closing delimiter",
            Slot::Start => "start delimiter",
            Slot::End => "end delimiter",
        };
        f.write_str(s)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyDelimiter { index, pair, slot } => write!(
                f,
                "token pair #{index} ({:?}) has an empty {slot}",
                pair.name()
            ),
            ConfigError::EmptyIgnoreDelimiter {
                index,
                ignore,
                slot,
            } => write!(
                f,
                "ignore pair #{index} ({:?} .. {:?}) has an empty {slot}",
                ignore.start(),
                ignore.end()
            ),
            ConfigError::DuplicatePair {
                first,
                second,
                pair,
            } => write!(
                f,
                "token pairs #{first} and #{second} both use {:?} .. {:?}",
                pair.open(),
                pair.close()
            ),
            ConfigError::DuplicateName {
                first,
                second,
                pair,
            } => write!(
                f,
                "token pairs #{first} and #{second} are both named {:?}",
                pair.name()
            ),
            ConfigError::DuplicateIgnore {
                first,
                second,
                ignore,
            } => write!(
                f,
                "ignore pairs #{first} and #{second} both use {:?} .. {:?}",
                ignore.start(),
                ignore.end()
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
