// SPDX-License-Identifier: Apache-2.0

//! Turns the scanner's event stream into a [`Node`] tree.
//!
//! The construction stack mirrors the scanner's nesting stack: its bottom entry
//! is the root, and every `EnterRegion`/`ExitRegion` pushes/pops exactly one
//! node. Nesting is never re-derived from the text.

use alloc::vec::Vec;

use crate::node::{Node, NodeKind};
use crate::parse_error::ParseError;
use crate::shared::{Event, Span, UnexpectedState};

pub(crate) struct TreeBuilder<'i> {
    input: &'i str,
    /// Partially built nodes, root first
    stack: Vec<Node>,
    /// Offset of the active ignore span's start delimiter
    ignore_start: Option<usize>,
    finished: Option<Node>,
    /// First inconsistency seen; later events are dropped
    fault: Option<UnexpectedState>,
}

impl<'i> TreeBuilder<'i> {
    pub fn new(input: &'i str) -> Self {
        let whole = Span::new(0, input.len());
        TreeBuilder {
            input,
            stack: alloc::vec![Node::new(NodeKind::Root, whole, whole)],
            ignore_start: None,
            finished: None,
            fault: None,
        }
    }

    /// Feeds one scanner event. Errors are latched and reported by [`Self::finish`].
    pub fn handle(&mut self, event: Event, span: Span) {
        if self.fault.is_some() {
            return;
        }
        if let Err(state) = self.apply(event, span) {
            log::trace!("TreeBuilder: fault {:?} on {:?} {:?}", state, event, span);
            self.fault = Some(state);
        }
    }

    fn apply(&mut self, event: Event, span: Span) -> Result<(), UnexpectedState> {
        if self.finished.is_some() {
            return Err(UnexpectedState::DocumentState);
        }
        match event {
            Event::EnterRegion(pair) => {
                // End offsets are fixed up on exit
                let node = Node::new(
                    NodeKind::Region(pair),
                    Span::new(span.start, span.end),
                    Span::new(span.end, span.end),
                );
                self.stack.push(node);
            }
            Event::Literal => {
                let input = self.input;
                self.top()?.push_content(&input[span.range()]);
            }
            Event::EnterIgnore(_) => {
                self.ignore_start = Some(span.start);
            }
            Event::ExitIgnore(_) => {
                let start = self
                    .ignore_start
                    .take()
                    .ok_or(UnexpectedState::IgnoreMismatch)?;
                let input = self.input;
                self.top()?.push_content(&input[start..span.end]);
            }
            Event::ExitRegion(pair) => {
                // The root is never popped by a region exit
                if self.stack.len() < 2 {
                    return Err(UnexpectedState::RegionMismatch);
                }
                let mut node = self.stack.pop().ok_or(UnexpectedState::RegionMismatch)?;
                if node.kind() != NodeKind::Region(pair) {
                    return Err(UnexpectedState::RegionMismatch);
                }
                node.close(span);
                log::trace!("TreeBuilder: closed {:?} {:?}", pair, node.span());
                self.top()?.push_child(node);
            }
            Event::EndDocument => {
                if self.stack.len() != 1 || self.ignore_start.is_some() {
                    return Err(UnexpectedState::DocumentState);
                }
                self.finished = self.stack.pop();
            }
        }
        Ok(())
    }

    fn top(&mut self) -> Result<&mut Node, UnexpectedState> {
        self.stack.last_mut().ok_or(UnexpectedState::DocumentState)
    }

    /// Returns the root once `EndDocument` has been seen.
    pub fn finish(self) -> Result<Node, ParseError> {
        if let Some(state) = self.fault {
            return Err(state.into());
        }
        self.finished
            .ok_or(ParseError::Unexpected(UnexpectedState::DocumentState))
    }
}
