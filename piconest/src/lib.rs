// SPDX-License-Identifier: Apache-2.0

//! Nested-delimiter parsing.
//!
//! Register token pairs (and optionally ignore pairs) once in a [`Registry`],
//! then [`parse`] any number of inputs into a tree of [`Node`]s.
//!
//! ```
//! use piconest::{parse, NodeKind, Registry};
//!
//! let registry = Registry::builder()
//!     .pair("paren", "(", ")")
//!     .ignore("\"", "\"")
//!     .build()
//!     .unwrap();
//! let input = r#"f(a, "b)", (c))"#;
//! let root = parse(input, &registry).unwrap();
//!
//! let call = &root[0];
//! assert_eq!(call.text(input), r#"(a, "b)", (c))"#);
//! assert_eq!(call.content(), r#"a, "b)", "#);
//! assert_eq!(call[0].kind(), NodeKind::Region(registry.id_of("paren").unwrap()));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;

mod config_error;
pub use config_error::{ConfigError, Slot};

mod token;
pub use token::{IgnoreId, IgnorePair, PairId, TokenPair};

mod registry;
pub use registry::{Registry, RegistryBuilder};

mod shared;
pub use shared::{Event, Span, UnexpectedState};

pub mod scanner;
pub use scanner::Scanner;

mod tree_builder;
use tree_builder::TreeBuilder;

mod node;
pub use node::{Descendants, Find, Node, NodeKind, Segment, Segments, TreeDisplay};

mod parse_error;
pub use parse_error::ParseError;

/// Parses `text` into a tree of regions delimited by the pairs in `registry`.
///
/// The returned root spans the whole input. Structural violations end the parse
/// with a [`ParseError`]; no partial tree is produced.
pub fn parse(text: &str, registry: &Registry) -> Result<Node, ParseError> {
    let mut builder = TreeBuilder::new(text);
    Scanner::new(registry).scan(text, &mut |event, span| builder.handle(event, span))?;
    builder.finish()
}

/// Scans `text` and collects the raw event stream, ending with [`Event::EndDocument`].
///
/// # Example
/// ```
/// use piconest::{scan, Event, Registry, Span};
/// let registry = Registry::builder().pair("paren", "(", ")").build().unwrap();
/// let events = scan("(x)", &registry).unwrap();
/// assert_eq!(events.len(), 4);
/// assert_eq!(events[1], (Event::Literal, Span::new(1, 2)));
/// ```
pub fn scan(text: &str, registry: &Registry) -> Result<Vec<(Event, Span)>, ParseError> {
    let mut events = Vec::new();
    Scanner::new(registry).scan(text, &mut |event, span| events.push((event, span)))?;
    Ok(events)
}
