// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use super::{Node, NodeKind};
use crate::registry::Registry;

/// Renders a tree one node per line:
///
/// ```text
/// root 0..9 "a(b[c]d)e"
///   paren 1..8 "(b[c]d)"
///     bracket 3..6 "[c]"
/// ```
///
/// Created by [`Node::display`].
pub struct TreeDisplay<'a> {
    node: &'a Node,
    input: &'a str,
    registry: &'a Registry,
}

impl<'a> TreeDisplay<'a> {
    pub(super) fn new(node: &'a Node, input: &'a str, registry: &'a Registry) -> Self {
        TreeDisplay {
            node,
            input,
            registry,
        }
    }
}

impl core::fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // (node, depth), children pushed in reverse to pop in document order
        let mut pending: Vec<(&Node, usize)> = alloc::vec![(self.node, 0)];
        while let Some((node, depth)) = pending.pop() {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            match node.kind() {
                NodeKind::Root => f.write_str("root")?,
                NodeKind::Region(pair) => match self.registry.pair(pair) {
                    Some(pair) => f.write_str(pair.name())?,
                    None => write!(f, "#{}", pair.index())?,
                },
            }
            let span = node.span();
            writeln!(f, " {}..{} {:?}", span.start, span.end, node.text(self.input))?;
            pending.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, Registry};
    use alloc::string::ToString;

    #[test]
    fn test_renders_indented_tree() {
        let registry = Registry::builder()
            .pair("paren", "(", ")")
            .pair("bracket", "[", "]")
            .build()
            .unwrap();
        let input = "a(b[c]d)e[]";
        let root = parse(input, &registry).unwrap();
        assert_eq!(
            root.display(input, &registry).to_string(),
            "root 0..11 \"a(b[c]d)e[]\"\n\
             \x20 paren 1..8 \"(b[c]d)\"\n\
             \x20   bracket 3..6 \"[c]\"\n\
             \x20 bracket 9..11 \"[]\"\n"
        );
    }

    #[test]
    fn test_unknown_pair_falls_back_to_index() {
        let registry = Registry::builder().pair("paren", "(", ")").build().unwrap();
        let other = Registry::build([], []).unwrap();
        let input = "(x)";
        let root = parse(input, &registry).unwrap();
        assert_eq!(
            root[0].display(input, &other).to_string(),
            "#0 0..3 \"(x)\"\n"
        );
    }
}
