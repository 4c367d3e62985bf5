// SPDX-License-Identifier: Apache-2.0

// Structural invariants checked over a corpus of valid inputs

use piconest::{parse, Node, Registry, Segment};

fn registry() -> Registry {
    Registry::builder()
        .pair("paren", "(", ")")
        .pair("bracket", "[", "]")
        .pair("brace", "{", "}")
        .pair("quote", "`", "`")
        .pair("block", "begin", "end")
        .ignore("\"", "\"")
        .ignore("/*", "*/")
        .build()
        .unwrap()
}

fn check_invariants(input: &str) {
    let registry = registry();
    let root = parse(input, &registry)
        .unwrap_or_else(|e| panic!("{:?} should parse but failed: {}", input, e));

    assert!(root.is_root());
    assert_eq!(root.text(input), input);

    for node in root.descendants() {
        // Round trip from the parts
        assert_eq!(node.rebuild(input), node.text(input));

        // Children contained in the inner span, disjoint and ordered
        let inner = node.inner_span();
        assert!(node.span().contains(inner));
        let mut cursor = inner.start;
        for child in node.children() {
            assert!(inner.contains(child.span()), "{:?} outside {:?}", child.span(), inner);
            assert!(child.span().start >= cursor, "children overlap in {:?}", input);
            cursor = child.span().end;
        }

        // Content is exactly the literal gaps
        let gaps: String = node
            .segments()
            .filter_map(|segment| match segment {
                Segment::Text(span) => Some(&input[span.range()]),
                Segment::Node(_) => None,
            })
            .collect();
        assert_eq!(node.content(), gaps);

        if let Some(pair) = node.pair() {
            let pair = registry.pair(pair).expect("pair from this registry");
            assert_eq!(node.open_delimiter(input), pair.open());
            assert_eq!(node.close_delimiter(input), pair.close());
        }
    }

    // Removing every delimiter leaves exactly the root's content plus all descendants' content
    let total: usize = root.descendants().map(|n| n.content().len()).sum();
    let stripped = root.apply_outward(input, |s| s.to_string());
    assert_eq!(stripped.len(), total);
}

fn count_regions(root: &Node) -> usize {
    root.descendants().filter(|n| !n.is_root()).count()
}

macro_rules! generate_round_trip_tests {
    ($($name:ident: $input:expr, $regions:expr;)*) => {
        $(
            paste::paste! {
                #[test_log::test]
                fn [<test_round_trip_ $name>]() {
                    let input: &str = $input;
                    check_invariants(input);
                    let root = parse(input, &registry()).unwrap();
                    assert_eq!(
                        count_regions(&root),
                        $regions,
                        "region count for {:?}",
                        input
                    );
                }
            }
        )*
    };
}

generate_round_trip_tests! {
    empty: "", 0;
    plain_text: "no delimiters here", 0;
    single: "(x)", 1;
    empty_region: "()", 1;
    siblings: "(a)[b]{c}", 3;
    deep: "((((((((x))))))))", 8;
    mixed: "f(a, [b, {c: d}], e)", 3;
    symmetric_inside: "(`a` `b`)", 3;
    symmetric_around: "`(a)[b]`", 3;
    keyword_blocks: "begin x begin y end (z) end", 3;
    quoted_closer: "(a \")\" b)", 1;
    quoted_opener: "\"(\" (x)", 1;
    comment: "{a /* } { */ b}", 1;
    comment_in_quote: "(\"/*\" x) /* \" */", 1;
    unicode: "«(ü[é])»", 2;
    adjacent_ignores: "\"a\"\"b\"(c)", 1;
    repeated_comment_start: "(/* /* */ x)", 1;
    keyword_block_inside_toggle: "`begin x end` `y`", 3;
}
