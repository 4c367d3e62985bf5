// SPDX-License-Identifier: Apache-2.0

//! Single-pass delimiter scanner.
//!
//! The scanner walks the input once, left to right, and reports structural
//! [`Event`]s through a callback. At every position it either
//! - looks only for the active ignore pair's end delimiter (inside an ignore span), or
//! - takes the highest-priority registry candidate that matches, or
//! - extends the current literal run by one character.
//!
//! A close token of the innermost open region outranks every pair candidate,
//! so pairs sharing a close delimiter each close their own regions.

use alloc::string::String;

use crate::registry::{Candidate, Registry, TokenRole};
use crate::shared::{Event, Span};
use crate::token::{IgnoreId, PairId};

mod nesting;
use nesting::{DepthExceeded, NestingStack};

#[derive(Debug, Clone, Copy)]
struct ActiveIgnore {
    id: IgnoreId,
    /// Offset of the start delimiter
    start: usize,
}

pub struct Scanner<'r> {
    registry: &'r Registry,
    stack: NestingStack,
    ignore: Option<ActiveIgnore>,
    /// Start of the pending literal run
    literal: Option<usize>,
}

#[derive(PartialEq, Clone)]
pub struct Error {
    kind: ErrKind,
    token: String,
    position: usize,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ErrKind {
    UnmatchedClose(PairId),
    UnterminatedOpen(PairId),
    UnterminatedIgnore(IgnoreId),
    MaxDepthReached { pair: PairId, limit: usize },
}

impl Error {
    pub fn new<T>(kind: ErrKind, token: &str, position: usize) -> Result<T, Self> {
        Err(Self {
            kind,
            token: token.into(),
            position,
        })
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The offending delimiter
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Byte offset where the problem was detected
    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}({:?}) at {}", self.kind, self.token, self.position)
    }
}

fn emit<F>(callback: &mut F, event: Event, span: Span)
where
    F: FnMut(Event, Span) + ?Sized,
{
    log::trace!("Event: {:?} {:?}", event, span);
    callback(event, span);
}

fn char_len(rest: &str) -> usize {
    rest.chars().next().map_or(1, char::len_utf8)
}

impl<'r> Scanner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Scanner {
            registry,
            stack: NestingStack::new(registry.max_depth()),
            ignore: None,
            literal: None,
        }
    }

    /// Scans the whole of `text`, reporting every event to `callback`.
    ///
    /// Returns the number of bytes consumed, which is always `text.len()` on
    /// success. The last event of a successful scan is `EndDocument`. The scanner
    /// can be reused; each call starts from a clean state.
    pub fn scan<F>(&mut self, text: &str, callback: &mut F) -> Result<usize, Error>
    where
        F: FnMut(Event, Span) + ?Sized,
    {
        self.stack = NestingStack::new(self.registry.max_depth());
        self.ignore = None;
        self.literal = None;

        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            if let Some(active) = self.ignore {
                pos += self.step_ignored(active, rest, pos, callback);
                continue;
            }
            match self.registry.match_at(rest) {
                Some(candidate) => {
                    let candidate = self.prefer_top_close(candidate, rest);
                    self.flush_literal(pos, callback);
                    self.apply(candidate, pos, callback)?;
                    pos += candidate.len;
                }
                None => {
                    self.literal.get_or_insert(pos);
                    pos += char_len(rest);
                }
            }
        }
        self.flush_literal(pos, callback);
        self.finish(pos, callback)
    }

    fn finish<F>(&mut self, len: usize, callback: &mut F) -> Result<usize, Error>
    where
        F: FnMut(Event, Span) + ?Sized,
    {
        if let Some(active) = self.ignore {
            let start = self.registry.ignores()[active.id.0].start();
            return Error::new(ErrKind::UnterminatedIgnore(active.id), start, active.start);
        }
        // Outermost unclosed region is reported
        if let Some(open) = self.stack.bottom() {
            let token = self.registry.token(TokenRole::Open(open.pair));
            return Error::new(ErrKind::UnterminatedOpen(open.pair), token, open.offset);
        }

        debug_assert!(self.stack.is_empty());
        log::debug!("--finished-- {}", len);
        emit(callback, Event::EndDocument, Span::new(len, len));
        Ok(len)
    }

    fn flush_literal<F>(&mut self, pos: usize, callback: &mut F)
    where
        F: FnMut(Event, Span) + ?Sized,
    {
        if let Some(start) = self.literal.take() {
            emit(callback, Event::Literal, Span::new(start, pos));
        }
    }

    /// Advances inside an ignore span, returns the number of bytes consumed.
    ///
    /// Only the end delimiter is recognized; the first one closes the span.
    fn step_ignored<F>(
        &mut self,
        active: ActiveIgnore,
        rest: &str,
        pos: usize,
        callback: &mut F,
    ) -> usize
    where
        F: FnMut(Event, Span) + ?Sized,
    {
        let end = self.registry.ignores()[active.id.0].end();
        if rest.starts_with(end) {
            self.ignore = None;
            emit(callback, Event::ExitIgnore(active.id), Span::new(pos, pos + end.len()));
            end.len()
        } else {
            char_len(rest)
        }
    }

    /// Swaps a pair candidate for the innermost region's close token when that
    /// token also matches here. Ignore starts keep their precedence.
    fn prefer_top_close(&self, candidate: Candidate, rest: &str) -> Candidate {
        if matches!(candidate.role, TokenRole::IgnoreStart(_)) {
            return candidate;
        }
        self.stack
            .top()
            .and_then(|open| self.registry.close_at(open.pair, rest))
            .unwrap_or(candidate)
    }

    fn apply<F>(&mut self, candidate: Candidate, pos: usize, callback: &mut F) -> Result<(), Error>
    where
        F: FnMut(Event, Span) + ?Sized,
    {
        let span = Span::new(pos, pos + candidate.len);
        match candidate.role {
            TokenRole::IgnoreStart(id) => {
                self.ignore = Some(ActiveIgnore { id, start: pos });
                emit(callback, Event::EnterIgnore(id), span);
            }
            // Symmetric delimiters never nest directly into themselves
            TokenRole::Toggle(pair) | TokenRole::Close(pair) if self.stack.is_top(pair) => {
                self.stack.pop();
                emit(callback, Event::ExitRegion(pair), span);
            }
            TokenRole::Close(pair) => {
                return Error::new(
                    ErrKind::UnmatchedClose(pair),
                    self.registry.token(candidate.role),
                    pos,
                );
            }
            TokenRole::Toggle(pair) | TokenRole::Open(pair) => {
                if let Err(DepthExceeded(limit)) = self.stack.push(pair, pos) {
                    return Error::new(
                        ErrKind::MaxDepthReached { pair, limit },
                        self.registry.token(candidate.role),
                        pos,
                    );
                }
                log::trace!("Depth: {}", self.stack.depth());
                emit(callback, Event::EnterRegion(pair), span);
            }
        }
        Ok(())
    }
}
