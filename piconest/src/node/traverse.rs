// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use super::Node;
use crate::shared::Span;

/// Pre-order traversal of a subtree, starting with its root.
///
/// Uses an explicit stack, so depth is bounded by memory only.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    start: Option<&'a Node>,
    stack: Vec<core::slice::Iter<'a, Node>>,
}

impl<'a> Descendants<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        Descendants {
            start: Some(node),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        if let Some(node) = self.start.take() {
            self.stack.push(node.children.iter());
            return Some(node);
        }
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) => {
                    self.stack.push(node.children.iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Subtree nodes matching a predicate, in pre-order
#[derive(Debug, Clone)]
pub struct Find<'a, P> {
    descendants: Descendants<'a>,
    predicate: P,
}

impl<'a, P> Find<'a, P> {
    pub(super) fn new(descendants: Descendants<'a>, predicate: P) -> Self {
        Find {
            descendants,
            predicate,
        }
    }
}

impl<'a, P> Iterator for Find<'a, P>
where
    P: FnMut(&Node) -> bool,
{
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let predicate = &mut self.predicate;
        self.descendants.find(|&node| predicate(node))
    }
}

/// A piece of a node's inner text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text between children (may contain ignore spans).
    Text(Span),
    /// A child region.
    Node(&'a Node),
}

/// Literal gaps and children of a node in document order.
///
/// Empty gaps are skipped.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    children: core::slice::Iter<'a, Node>,
    next_child: Option<&'a Node>,
    cursor: usize,
    end: usize,
}

impl<'a> Segments<'a> {
    pub(super) fn new(node: &'a Node) -> Self {
        let mut children = node.children.iter();
        Segments {
            next_child: children.next(),
            children,
            cursor: node.inner.start,
            end: node.inner.end,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        match self.next_child {
            Some(child) if self.cursor < child.span.start => {
                let gap = Span::new(self.cursor, child.span.start);
                self.cursor = child.span.start;
                Some(Segment::Text(gap))
            }
            Some(child) => {
                self.cursor = child.span.end;
                self.next_child = self.children.next();
                Some(Segment::Node(child))
            }
            None if self.cursor < self.end => {
                let gap = Span::new(self.cursor, self.end);
                self.cursor = self.end;
                Some(Segment::Text(gap))
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::token::PairId;

    // (a(b)) built by hand: root 0..6, outer 0..6, inner 2..5
    fn tree() -> Node {
        let mut inner = Node::new(NodeKind::Region(PairId(0)), Span::new(2, 3), Span::new(3, 3));
        inner.push_content("b");
        inner.close(Span::new(4, 5));

        let mut outer = Node::new(NodeKind::Region(PairId(0)), Span::new(0, 1), Span::new(1, 1));
        outer.push_content("a");
        outer.push_child(inner);
        outer.close(Span::new(5, 6));

        let mut root = Node::new(NodeKind::Root, Span::new(0, 6), Span::new(0, 6));
        root.push_child(outer);
        root
    }

    #[test]
    fn test_descendants_clone_is_independent() {
        let root = tree();
        let mut first = root.descendants();
        first.next();
        let second = first.clone();
        assert_eq!(first.count(), 2);
        assert_eq!(second.count(), 2);
    }

    #[test]
    fn test_segments_of_hand_built_tree() {
        let root = tree();
        let segments: Vec<_> = root[0].segments().collect();
        assert_eq!(
            segments,
            [Segment::Text(Span::new(1, 2)), Segment::Node(&root[0][0])]
        );
        assert_eq!(
            root.segments().collect::<Vec<_>>(),
            [Segment::Node(&root[0])]
        );
    }

    #[test]
    fn test_find_stops_at_end() {
        let root = tree();
        let mut found = root.find(|n| n.content() == "b");
        assert_eq!(found.next().map(Node::span), Some(Span::new(2, 5)));
        assert_eq!(found.next(), None);
        assert_eq!(found.next(), None);
    }
}
