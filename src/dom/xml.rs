//! quick-xml reader for ArenaDom.
//!
//! Documents are read as XML, but entity references resolve against the full
//! HTML5 named entity table so hand-written HTML sources parse without a DTD.
//! Whitespace, comments and declarations are kept so the serialized output
//! stays close to the input.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};

use super::arena::{ArenaDom, ArenaNodeId, Attribute, ElementName};
use crate::error::{Error, Result};

/// Parse an XML/XHTML document into an arena.
pub fn parse_xml(source: &str) -> Result<ArenaDom> {
    let mut reader = Reader::from_str(source);
    let mut dom = ArenaDom::new();
    let mut open: Vec<ArenaNodeId> = vec![dom.document()];

    loop {
        let parent = *open.last().unwrap_or(&dom.document());
        match reader.read_event()? {
            Event::Start(e) => {
                let element = create_element(&mut dom, &e)?;
                dom.append(parent, element);
                open.push(element);
            }
            Event::Empty(e) => {
                let element = create_element(&mut dom, &e)?;
                dom.append(parent, element);
            }
            Event::End(e) => {
                if open.len() <= 1 {
                    return Err(Error::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                open.pop();
            }
            Event::Text(e) => {
                dom.append_text(parent, &String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) => {
                let text = resolve_reference(&String::from_utf8_lossy(&e))?;
                dom.append_text(parent, &text);
            }
            Event::CData(e) => {
                dom.append_text(parent, &String::from_utf8_lossy(&e));
            }
            Event::Comment(e) => {
                let comment = dom.create_comment(String::from_utf8_lossy(&e).into_owned());
                dom.append(parent, comment);
            }
            Event::DocType(e) => {
                let content = String::from_utf8_lossy(&e).trim().to_string();
                let doctype = dom.create_doctype(content);
                dom.append(parent, doctype);
            }
            Event::Decl(e) => {
                let decl = dom.create_processing_instruction(String::from_utf8_lossy(&e).into_owned());
                dom.append(parent, decl);
            }
            Event::PI(e) => {
                let pi = dom.create_processing_instruction(String::from_utf8_lossy(&e).into_owned());
                dom.append(parent, pi);
            }
            Event::Eof => break,
        }
    }

    if let Some(&unclosed) = open.get(1) {
        let name = dom
            .element_name(unclosed)
            .map(ElementName::qualified)
            .unwrap_or_default();
        return Err(Error::Malformed(format!("unclosed element <{name}>")));
    }

    Ok(dom)
}

fn create_element(dom: &mut ArenaDom, start: &BytesStart<'_>) -> Result<ArenaNodeId> {
    let qname = start.name();
    let local = String::from_utf8_lossy(qname.local_name().as_ref()).into_owned();
    let name = match qname.prefix() {
        Some(prefix) => ElementName::prefixed(String::from_utf8_lossy(prefix.as_ref()), local),
        None => ElementName::local(local),
    };

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let raw = String::from_utf8_lossy(&attr.value);
        attrs.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: unescape_with(&raw, resolve_entity)?.into_owned(),
        });
    }

    Ok(dom.create_element(name, attrs))
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| resolve_html5_entity(name))
}

/// Resolve the body of a `&...;` reference, character references included.
fn resolve_reference(name: &str) -> Result<Cow<'static, str>> {
    let raw = format!("&{name};");
    let resolved = unescape_with(&raw, resolve_entity)?;
    Ok(Cow::Owned(resolved.into_owned()))
}
