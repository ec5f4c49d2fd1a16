//! Markup writer for ArenaDom.
//!
//! XML output closes childless elements as `<tag/>`. HTML output follows the
//! HTML serialization rules instead: only void elements go without an end
//! tag, and the text of raw-text elements such as `script` and `style` is
//! written unescaped.

use std::io::{self, Write};

use quick_xml::escape::{escape, partial_escape};

use super::Syntax;
use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// HTML elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// HTML elements whose text content is not entity-escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "plaintext", "script", "style", "xmp",
];

/// Write the whole document to `out`.
pub fn serialize<W: Write>(dom: &ArenaDom, syntax: Syntax, out: &mut W) -> io::Result<()> {
    write_subtree(dom, dom.document(), syntax, out)
}

/// Serialize the whole document into a string.
pub fn to_string(dom: &ArenaDom, syntax: Syntax) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = serialize(dom, syntax, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serialize a single node and its subtree.
pub fn node_to_string(dom: &ArenaDom, id: ArenaNodeId, syntax: Syntax) -> String {
    let mut buf = Vec::new();
    let _ = write_subtree(dom, id, syntax, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

enum Step {
    Open(ArenaNodeId),
    Close(String),
}

fn write_subtree<W: Write>(
    dom: &ArenaDom,
    root: ArenaNodeId,
    syntax: Syntax,
    out: &mut W,
) -> io::Result<()> {
    let mut stack = vec![Step::Open(root)];
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(tag) => {
                write!(out, "</{tag}>")?;
                continue;
            }
        };
        let Some(node) = dom.get(id) else {
            continue;
        };

        match &node.data {
            ArenaNodeData::Document => {}
            ArenaNodeData::Element { name, attrs } => {
                let tag = name.qualified();
                write!(out, "<{tag}")?;
                for attr in attrs {
                    write!(out, " {}=\"{}\"", attr.name, escape(attr.value.as_str()))?;
                }
                let empty = node.first_child.is_none();
                match syntax {
                    Syntax::Xml if empty => {
                        out.write_all(b"/>")?;
                        continue;
                    }
                    Syntax::Html if name.space.is_none() && is_void(&name.local) => {
                        out.write_all(b">")?;
                        continue;
                    }
                    _ => {
                        out.write_all(b">")?;
                        stack.push(Step::Close(tag));
                    }
                }
            }
            ArenaNodeData::Text(text) => {
                if syntax == Syntax::Html && in_raw_text_element(dom, node.parent) {
                    out.write_all(text.as_bytes())?;
                } else {
                    out.write_all(partial_escape(text.as_str()).as_bytes())?;
                }
            }
            ArenaNodeData::Comment(text) => write!(out, "<!--{text}-->")?,
            ArenaNodeData::Doctype(content) => write!(out, "<!DOCTYPE {content}>")?,
            ArenaNodeData::ProcessingInstruction(content) => write!(out, "<?{content}?>")?,
        }

        // Push children in reverse order for left-to-right output
        let mut children: Vec<_> = dom.children(id).map(Step::Open).collect();
        children.reverse();
        stack.extend(children);
    }
    Ok(())
}

fn is_void(local: &str) -> bool {
    VOID_ELEMENTS.contains(&local)
}

fn in_raw_text_element(dom: &ArenaDom, parent: ArenaNodeId) -> bool {
    dom.element_name(parent)
        .is_some_and(|name| name.space.is_none() && RAW_TEXT_ELEMENTS.contains(&name.local.as_str()))
}
