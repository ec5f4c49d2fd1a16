//! Inner text extraction.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Concatenated text of every descendant text node, whitespace-normalized.
///
/// Element boundaries are transparent; comments and other markup contribute
/// nothing.
pub fn inner_text(dom: &ArenaDom, id: ArenaNodeId) -> String {
    let mut buf = String::new();

    let mut stack: Vec<ArenaNodeId> = dom.children(id).collect();
    stack.reverse();
    while let Some(current) = stack.pop() {
        let Some(node) = dom.get(current) else {
            continue;
        };
        match &node.data {
            ArenaNodeData::Text(text) => buf.push_str(text),
            ArenaNodeData::Element { .. } => {
                let mut children: Vec<_> = dom.children(current).collect();
                children.reverse();
                stack.extend(children);
            }
            _ => {}
        }
    }

    normalize_whitespace(&buf)
}

/// Collapse runs of ASCII whitespace to one space and trim both ends.
///
/// U+00A0 and other non-ASCII spaces are content, as in HTML.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dom::parse_xml;

    fn text_of(source: &str, tag: &str) -> String {
        let dom = parse_xml(source).unwrap();
        let id = dom.find_by_tag(tag).unwrap();
        inner_text(&dom, id)
    }

    #[test]
    fn test_concatenates_descendants_in_order() {
        assert_eq!(
            text_of("<dfn>Hyper<b>Text</b> <i>Markup <u>Lang</u></i>uage</dfn>", "dfn"),
            "HyperText Markup Language"
        );
    }

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(text_of("<p>\n   lots\t of \r\n  space   </p>", "p"), "lots of space");
        assert_eq!(text_of("<p>   </p>", "p"), "");
        assert_eq!(text_of("<p/>", "p"), "");
    }

    #[test]
    fn test_skips_comments() {
        assert_eq!(text_of("<p>a<!-- hidden -->b</p>", "p"), "ab");
    }

    #[test]
    fn test_non_breaking_space_is_content() {
        assert_eq!(text_of("<p>a&nbsp;&nbsp;b</p>", "p"), "a\u{a0}\u{a0}b");
    }

    proptest! {
        #[test]
        fn prop_normalized_text_has_no_whitespace_runs(s in "[ \t\r\na-zA-Z\u{e9}]{0,64}") {
            let out = normalize_whitespace(&s);
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains(|c: char| c.is_ascii_whitespace() && c != ' '));
            prop_assert_eq!(out.trim(), out.as_str());
        }

        #[test]
        fn prop_normalize_is_idempotent(s in "[ \ta-z]{0,32}") {
            let once = normalize_whitespace(&s);
            prop_assert_eq!(normalize_whitespace(&once), once);
        }
    }
}
