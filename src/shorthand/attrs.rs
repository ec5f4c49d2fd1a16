//! Attribute normalization for markers.

use std::sync::LazyLock;

use regex::Regex;

use super::text::inner_text;
use crate::dom::{ArenaDom, ArenaNodeId};

/// Characters that may not appear in a generated identifier.
static INVALID_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_-]+").unwrap());

/// Make sure the element carries a term attribute and return its value.
///
/// An existing attribute wins, even when empty. Otherwise the normalized
/// inner text is stored.
pub fn ensure_term(dom: &mut ArenaDom, id: ArenaNodeId, term_attribute: &str) -> String {
    if let Some(term) = dom.get_attr(id, term_attribute) {
        return term.to_string();
    }
    let term = inner_text(dom, id);
    dom.set_attr(id, term_attribute, term.as_str());
    term
}

/// Give the element an `id` of the form `<tag>-<sanitized term>` unless it
/// already has a non-empty one.
///
/// Reads the term attribute, so [`ensure_term`] must run first.
pub fn ensure_identifier(dom: &mut ArenaDom, id: ArenaNodeId, term_attribute: &str) {
    if dom.get_attr(id, "id").is_some_and(|v| !v.is_empty()) {
        return;
    }
    let Some(tag) = dom.local_name(id) else {
        return;
    };
    let term = dom.get_attr(id, term_attribute).unwrap_or_default();
    let identifier = format!("{tag}-{}", sanitize_identifier(term));
    dom.set_attr(id, "id", identifier);
}

/// Drop everything but letters, numbers, `_` and `-`.
pub fn sanitize_identifier(term: &str) -> String {
    INVALID_ID_RE.replace_all(term, "").into_owned()
}

/// Append a token to the element's class list unless it is already there.
pub fn add_class(dom: &mut ArenaDom, id: ArenaNodeId, token: &str) {
    let current = dom.get_attr(id, "class").unwrap_or_default();
    let mut classes: Vec<&str> = current.split_ascii_whitespace().collect();
    if classes.contains(&token) {
        return;
    }
    classes.push(token);
    let joined = classes.join(" ");
    dom.set_attr(id, "class", joined);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dom::{ElementName, parse_xml};

    fn element(dom: &mut ArenaDom, tag: &str) -> ArenaNodeId {
        let id = dom.create_element(ElementName::local(tag), vec![]);
        dom.append(dom.document(), id);
        id
    }

    #[test]
    fn test_ensure_term_from_text() {
        let mut dom = parse_xml("<dfn>  Widget\n factory </dfn>").unwrap();
        let dfn = dom.find_by_tag("dfn").unwrap();

        assert_eq!(ensure_term(&mut dom, dfn, "w"), "Widget factory");
        assert_eq!(dom.get_attr(dfn, "w"), Some("Widget factory"));
    }

    #[test]
    fn test_ensure_term_keeps_explicit_value() {
        let mut dom = parse_xml("<dfn w=\"gadget\">Widget</dfn>").unwrap();
        let dfn = dom.find_by_tag("dfn").unwrap();

        assert_eq!(ensure_term(&mut dom, dfn, "w"), "gadget");

        let mut dom = parse_xml("<dfn w=\"\">Widget</dfn>").unwrap();
        let dfn = dom.find_by_tag("dfn").unwrap();
        assert_eq!(ensure_term(&mut dom, dfn, "w"), "");
    }

    #[test]
    fn test_ensure_identifier_sanitizes() {
        let mut dom = ArenaDom::new();
        let dfn = element(&mut dom, "dfn");
        dom.set_attr(dfn, "w", "Widget's <big> façade 2.0_x-y");

        ensure_identifier(&mut dom, dfn, "w");
        assert_eq!(dom.get_attr(dfn, "id"), Some("dfn-Widgetsbigfaçade20_x-y"));
    }

    #[test]
    fn test_ensure_identifier_keeps_existing_id() {
        let mut dom = ArenaDom::new();
        let dfn = element(&mut dom, "dfn");
        dom.set_attr(dfn, "id", "custom");
        dom.set_attr(dfn, "w", "Widget");

        ensure_identifier(&mut dom, dfn, "w");
        assert_eq!(dom.get_attr(dfn, "id"), Some("custom"));
    }

    #[test]
    fn test_ensure_identifier_replaces_empty_id() {
        let mut dom = ArenaDom::new();
        let dfn = element(&mut dom, "dfn");
        dom.set_attr(dfn, "id", "");
        dom.set_attr(dfn, "w", "Widget");

        ensure_identifier(&mut dom, dfn, "w");
        assert_eq!(dom.get_attr(dfn, "id"), Some("dfn-Widget"));
    }

    #[test]
    fn test_ensure_identifier_is_idempotent() {
        let mut dom = ArenaDom::new();
        let dfn = element(&mut dom, "dfn");
        dom.set_attr(dfn, "w", "two words");

        ensure_identifier(&mut dom, dfn, "w");
        let first = dom.get_attr(dfn, "id").map(str::to_string);
        ensure_identifier(&mut dom, dfn, "w");
        assert_eq!(dom.get_attr(dfn, "id").map(str::to_string), first);
        assert_eq!(first.as_deref(), Some("dfn-twowords"));
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters_and_numbers() {
        assert_eq!(sanitize_identifier("Ελληνικά ١٢٣"), "Ελληνικά١٢٣");
        assert_eq!(sanitize_identifier("a.b/c?d"), "abcd");
        assert_eq!(sanitize_identifier(""), "");
    }

    #[test]
    fn test_add_class() {
        let mut dom = ArenaDom::new();
        let a = element(&mut dom, "a");

        add_class(&mut dom, a, "dfn");
        assert_eq!(dom.get_attr(a, "class"), Some("dfn"));

        dom.set_attr(a, "class", "term important");
        add_class(&mut dom, a, "dfn");
        assert_eq!(dom.get_attr(a, "class"), Some("term important dfn"));

        add_class(&mut dom, a, "term");
        assert_eq!(dom.get_attr(a, "class"), Some("term important dfn"));
    }

    #[test]
    fn test_add_class_to_empty_attribute() {
        let mut dom = ArenaDom::new();
        let a = element(&mut dom, "a");
        dom.set_attr(a, "class", "");

        add_class(&mut dom, a, "dfn");
        assert_eq!(dom.get_attr(a, "class"), Some("dfn"));
    }

    proptest! {
        #[test]
        fn prop_add_class_never_duplicates(
            existing in proptest::collection::vec("[a-d]{1,2}", 0..6),
            token in "[a-d]{1,2}",
        ) {
            let mut dom = ArenaDom::new();
            let a = element(&mut dom, "a");
            let mut seen = Vec::new();
            for class in existing {
                if !seen.contains(&class) {
                    seen.push(class);
                }
            }
            dom.set_attr(a, "class", seen.join(" "));

            add_class(&mut dom, a, &token);
            let once = dom.get_attr(a, "class").unwrap_or_default().to_string();
            add_class(&mut dom, a, &token);
            let twice = dom.get_attr(a, "class").unwrap_or_default().to_string();

            prop_assert_eq!(&once, &twice);
            let tokens: Vec<_> = once.split(' ').collect();
            let mut deduped = tokens.clone();
            deduped.sort_unstable();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), tokens.len());
            prop_assert!(tokens.contains(&token.as_str()));
        }
    }
}
