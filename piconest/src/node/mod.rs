// SPDX-License-Identifier: Apache-2.0

//! The region tree produced by [`parse`](crate::parse).

use alloc::string::String;
use alloc::vec::Vec;

use crate::shared::Span;
use crate::token::PairId;

mod display;
mod traverse;

pub use display::TreeDisplay;
pub use traverse::{Descendants, Find, Segment, Segments};

/// What delimited a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The whole input.
    Root,
    /// A region opened and closed by the delimiters of a registered pair.
    Region(PairId),
}

impl NodeKind {
    pub fn pair(self) -> Option<PairId> {
        match self {
            NodeKind::Root => None,
            NodeKind::Region(pair) => Some(pair),
        }
    }
}

/// A node of the region tree.
///
/// Children are owned exclusively by their parent and kept in document order.
/// Spans are byte offsets into the text the tree was parsed from; pass that same
/// text to the methods taking an `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    /// Delimiters included
    span: Span,
    /// Between the delimiters
    inner: Span,
    content: String,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, span: Span, inner: Span) -> Self {
        Node {
            kind,
            span,
            inner,
            content: String::new(),
            children: Vec::new(),
        }
    }

    /// Fixes up the end offsets once the closing delimiter is known
    pub(crate) fn close(&mut self, close_delimiter: Span) {
        self.inner.end = close_delimiter.start;
        self.span.end = close_delimiter.end;
    }

    pub(crate) fn push_content(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The pair that delimits this node, `None` for the root.
    pub fn pair(&self) -> Option<PairId> {
        self.kind.pair()
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// True if this node is a region of `pair`.
    pub fn is_pair(&self, pair: PairId) -> bool {
        self.kind == NodeKind::Region(pair)
    }

    /// Span covering the delimiters and everything between them.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Span strictly between the opening and closing delimiters.
    pub fn inner_span(&self) -> Span {
        self.inner
    }

    /// Text that belongs to this node and to none of its descendants.
    ///
    /// The gaps between children are concatenated in document order; ignore
    /// spans are included verbatim, delimiters and all.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The exact text this node was parsed from, delimiters included.
    ///
    /// Returns an empty string if `input` is not the text the tree was parsed from
    /// and the span does not fit it.
    pub fn text<'i>(&self, input: &'i str) -> &'i str {
        input.get(self.span.range()).unwrap_or_default()
    }

    /// The text between the delimiters.
    pub fn inner_text<'i>(&self, input: &'i str) -> &'i str {
        input.get(self.inner.range()).unwrap_or_default()
    }

    pub fn open_delimiter<'i>(&self, input: &'i str) -> &'i str {
        input
            .get(self.span.start..self.inner.start)
            .unwrap_or_default()
    }

    pub fn close_delimiter<'i>(&self, input: &'i str) -> &'i str {
        input.get(self.inner.end..self.span.end).unwrap_or_default()
    }

    /// Pre-order iterator over this node and all of its descendants.
    ///
    /// Every call starts a fresh traversal.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }

    /// Nodes of this subtree, this node included, for which `predicate` holds.
    pub fn find<P>(&self, predicate: P) -> Find<'_, P>
    where
        P: FnMut(&Node) -> bool,
    {
        Find::new(self.descendants(), predicate)
    }

    /// Regions of `pair` anywhere in this subtree.
    pub fn find_pair(&self, pair: PairId) -> Find<'_, impl FnMut(&Node) -> bool> {
        self.find(move |node| node.is_pair(pair))
    }

    /// The inner text split into literal gaps and children, in document order.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self)
    }

    /// Rebuilds the node's text from its delimiters, literal gaps and children.
    ///
    /// For a tree parsed from `input` this equals [`Node::text`].
    pub fn rebuild(&self, input: &str) -> String {
        self.fold_outward(input, |node, inner| {
            let mut out = String::with_capacity(node.span.len());
            out.push_str(node.open_delimiter(input));
            out.push_str(&inner);
            out.push_str(node.close_delimiter(input));
            out
        })
    }

    /// Rewrites the tree innermost-first.
    ///
    /// Each region's inner text, with every child region replaced by that child's
    /// result, is passed to `f`; the value returned replaces the region,
    /// delimiters included. The root is processed last and its result returned.
    ///
    /// Delimiters never reach `f`: a child's open and close tokens are dropped
    /// along with the rest of the child's text when its result is spliced in.
    /// This also holds for multi-character delimiters and for delimiter text
    /// that `f` itself produces, which is kept as is.
    ///
    /// # Example
    /// ```
    /// use piconest::{parse, Registry};
    /// let registry = Registry::builder().pair("paren", "(", ")").build().unwrap();
    /// let input = "1 + (2 * (3 - 4))";
    /// let root = parse(input, &registry).unwrap();
    /// let out = root.apply_outward(input, |text| format!("<{text}>"));
    /// assert_eq!(out, "<1 + <2 * <3 - 4>>>");
    /// ```
    pub fn apply_outward<F>(&self, input: &str, mut f: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        self.fold_outward(input, |_, inner| f(&inner))
    }

    /// Post-order fold over the subtree without recursion.
    ///
    /// `finish` receives a node and its inner text with every child already
    /// replaced by the child's own result.
    fn fold_outward<F>(&self, input: &str, mut finish: F) -> String
    where
        F: FnMut(&Node, String) -> String,
    {
        struct Frame<'n> {
            node: &'n Node,
            segments: Segments<'n>,
            acc: String,
        }
        impl<'n> Frame<'n> {
            fn new(node: &'n Node) -> Self {
                Frame {
                    node,
                    segments: node.segments(),
                    acc: String::new(),
                }
            }
        }

        let mut stack = alloc::vec![Frame::new(self)];
        loop {
            let Some(top) = stack.last_mut() else {
                return String::new();
            };
            match top.segments.next() {
                Some(Segment::Text(span)) => {
                    top.acc.push_str(input.get(span.range()).unwrap_or_default());
                }
                Some(Segment::Node(child)) => stack.push(Frame::new(child)),
                None => {
                    let Some(done) = stack.pop() else {
                        return String::new();
                    };
                    let out = finish(done.node, done.acc);
                    match stack.last_mut() {
                        Some(parent) => parent.acc.push_str(&out),
                        None => return out,
                    }
                }
            }
        }
    }

    /// A [`Display`](core::fmt::Display) adapter printing the tree one node per
    /// line, indented by depth, labelled with pair names from `registry`.
    pub fn display<'a>(
        &'a self,
        input: &'a str,
        registry: &'a crate::Registry,
    ) -> TreeDisplay<'a> {
        TreeDisplay::new(self, input, registry)
    }
}

impl core::ops::Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.children[index]
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
