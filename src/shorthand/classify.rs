//! Marker classification.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// The recognized marker tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `<dfn>`: references become links to the definition.
    Dfn,
    /// `<abbr>`: references copy the expansion and its title.
    Abbr,
}

impl Marker {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dfn" => Some(Marker::Dfn),
            "abbr" => Some(Marker::Abbr),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Marker::Dfn => "dfn",
            Marker::Abbr => "abbr",
        }
    }

    /// Whether definitions of this kind get a generated `id`.
    pub fn has_identifier(self) -> bool {
        matches!(self, Marker::Dfn)
    }
}

/// What a node means to the expansion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Definition(Marker),
    Reference(Marker),
    Irrelevant,
}

/// Classify a node.
///
/// Unqualified `dfn`/`abbr` elements are markers. Any child at all, even a
/// single whitespace text node or a comment, makes a marker a definition.
pub fn classify(dom: &ArenaDom, id: ArenaNodeId) -> Classification {
    let Some(node) = dom.get(id) else {
        return Classification::Irrelevant;
    };
    let ArenaNodeData::Element { name, .. } = &node.data else {
        return Classification::Irrelevant;
    };
    if name.space.is_some() {
        return Classification::Irrelevant;
    }
    match Marker::from_tag(&name.local) {
        Some(marker) if node.first_child.is_some() => Classification::Definition(marker),
        Some(marker) => Classification::Reference(marker),
        None => Classification::Irrelevant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, parse_xml};

    fn classify_first(source: &str, tag: &str) -> Classification {
        let dom = parse_xml(source).unwrap();
        let id = dom.find_by_tag(tag).unwrap();
        classify(&dom, id)
    }

    #[test]
    fn test_definitions_and_references() {
        assert_eq!(
            classify_first("<dfn>Widget</dfn>", "dfn"),
            Classification::Definition(Marker::Dfn)
        );
        assert_eq!(
            classify_first("<abbr><b>HTML</b></abbr>", "abbr"),
            Classification::Definition(Marker::Abbr)
        );
        assert_eq!(
            classify_first("<dfn/>", "dfn"),
            Classification::Reference(Marker::Dfn)
        );
        assert_eq!(
            classify_first("<abbr w=\"HTML\"></abbr>", "abbr"),
            Classification::Reference(Marker::Abbr)
        );
    }

    #[test]
    fn test_whitespace_only_marker_is_a_definition() {
        assert_eq!(
            classify_first("<dfn>   </dfn>", "dfn"),
            Classification::Definition(Marker::Dfn)
        );
        assert_eq!(
            classify_first("<abbr><!-- x --></abbr>", "abbr"),
            Classification::Definition(Marker::Abbr)
        );
    }

    #[test]
    fn test_other_nodes_are_irrelevant() {
        assert_eq!(classify_first("<p>text</p>", "p"), Classification::Irrelevant);
        assert_eq!(classify_first("<DFN/>", "DFN"), Classification::Irrelevant);

        let dom = parse_xml("<p>text</p>").unwrap();
        let p = dom.find_by_tag("p").unwrap();
        let text = dom.children(p).next().unwrap();
        assert_eq!(classify(&dom, text), Classification::Irrelevant);
        assert_eq!(classify(&dom, dom.document()), Classification::Irrelevant);
    }

    #[test]
    fn test_namespaced_markers_are_irrelevant() {
        assert_eq!(
            classify_first("<x:dfn xmlns:x=\"urn:x\">Widget</x:dfn>", "dfn"),
            Classification::Irrelevant
        );
        assert_eq!(classify_first("<m:abbr/>", "abbr"), Classification::Irrelevant);

        let dom = parse_html("<body><math><dfn></dfn></math></body>");
        let dfn = dom.find_by_tag("dfn").unwrap();
        assert_eq!(classify(&dom, dfn), Classification::Irrelevant);
    }
}
