//! Document tree, parsers and serializer.
//!
//! Two front ends build the same [`ArenaDom`]:
//!
//! - [`parse_xml`] reads well-formed XML/XHTML and resolves HTML named
//!   entities. Prefixed elements (`svg:dfn`) carry their prefix as the
//!   namespace qualifier.
//! - [`parse_html`] runs the html5ever tree builder, which never fails and
//!   places SVG/MathML content in its own namespace.
//!
//! # Example
//!
//! ```
//! use hdoc::dom::{Syntax, parse_xml, to_string};
//!
//! let dom = parse_xml("<p>Fish &amp; chips</p>").unwrap();
//! assert_eq!(to_string(&dom, Syntax::Xml), "<p>Fish &amp; chips</p>");
//! ```

mod arena;
mod serialize;
mod tree_sink;
mod xml;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ElementName};
pub use serialize::{node_to_string, serialize, to_string};
pub use xml::parse_xml;

use std::borrow::Cow;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Which parser reads the source document, and how it is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Syntax {
    /// Well-formed XML/XHTML with HTML named entities. Childless elements
    /// are written as `<tag/>`.
    #[default]
    Xml,
    /// Lenient HTML5 parsing; output gains the implied `html`/`head`/`body`
    /// and follows HTML serialization rules.
    Html,
}

/// Parse HTML with the html5ever tree builder.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}

/// Decode raw document bytes to text.
///
/// Honors a byte order mark, then the encoding named in an XML declaration,
/// falling back to Windows-1252 for legacy files.
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let hint_encoding = crate::util::extract_xml_encoding(bytes);
    crate::util::decode_text(bytes, hint_encoding)
}
