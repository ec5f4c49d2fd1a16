//! The expansion pass.

use tracing::debug;

use super::ExpandOptions;
use super::attrs::{add_class, ensure_identifier, ensure_term};
use super::classify::{Classification, Marker, classify};
use super::registry::{Registry, TermKey};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::{Error, Result};

/// Counts from one expansion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandReport {
    pub definitions: usize,
    pub references: usize,
}

/// Register every definition and expand every reference, in document order.
///
/// Elements are visited pre-order. A rewritten reference's new children are
/// visited next, so markers inside copied content are handled too. The first
/// reference to an unknown term aborts the pass; the tree is then partially
/// rewritten and should be discarded.
pub fn expand(dom: &mut ArenaDom, options: &ExpandOptions) -> Result<ExpandReport> {
    let mut registry = Registry::new();
    let mut report = ExpandReport::default();

    let mut stack = vec![dom.document()];
    while let Some(id) = stack.pop() {
        match classify(dom, id) {
            Classification::Definition(marker) => {
                define(dom, id, marker, options, &mut registry);
                report.definitions += 1;
            }
            Classification::Reference(marker) => {
                rewrite_reference(dom, id, marker, options, &registry)?;
                report.references += 1;
            }
            Classification::Irrelevant => {}
        }

        // Push children in reverse order for left-to-right traversal
        let mut children: Vec<_> = dom.children(id).filter(|&c| dom.is_element(c)).collect();
        children.reverse();
        stack.extend(children);
    }

    debug!(
        definitions = report.definitions,
        references = report.references,
        terms = registry.len(),
        "expansion finished"
    );
    Ok(report)
}

fn define(
    dom: &mut ArenaDom,
    id: ArenaNodeId,
    marker: Marker,
    options: &ExpandOptions,
    registry: &mut Registry,
) {
    let term = ensure_term(dom, id, &options.term_attribute);
    if marker.has_identifier() {
        ensure_identifier(dom, id, &options.term_attribute);
    }

    let key = TermKey::new(marker.tag(), &term);
    debug!(%key, "definition");
    if let Some(previous) = registry.register(key.clone(), id) {
        debug!(%key, previous = previous.0, "definition replaces an earlier one");
    }
    dom.remove_attr(id, &options.term_attribute);
}

fn rewrite_reference(
    dom: &mut ArenaDom,
    id: ArenaNodeId,
    marker: Marker,
    options: &ExpandOptions,
    registry: &Registry,
) -> Result<()> {
    let term = ensure_term(dom, id, &options.term_attribute);
    let key = TermKey::new(marker.tag(), &term);

    let Some(definition) = registry.lookup(&key) else {
        return Err(Error::UndefinedReference {
            tag: marker.tag().to_string(),
            term,
        });
    };
    if dom.is_ancestor_or_self(definition, id) {
        return Err(Error::RecursiveReference {
            tag: marker.tag().to_string(),
            term,
        });
    }
    debug!(%key, "reference");

    let sources: Vec<_> = dom.children(definition).collect();
    let copies: Vec<_> = sources.into_iter().map(|c| dom.deep_clone(c)).collect();

    match marker {
        Marker::Dfn => {
            let href = format!("#{}", dom.get_attr(definition, "id").unwrap_or_default());
            dom.set_local_name(id, &options.link_tag);
            dom.set_attr(id, "href", href);
            replace_children(dom, id, copies);
            add_class(dom, id, &options.link_class);
        }
        Marker::Abbr => {
            let title = dom
                .get_attr(definition, "title")
                .unwrap_or_default()
                .to_string();
            replace_children(dom, id, copies);
            dom.set_attr(id, "title", title);
        }
    }

    dom.remove_attr(id, &options.term_attribute);
    Ok(())
}

fn replace_children(dom: &mut ArenaDom, parent: ArenaNodeId, children: Vec<ArenaNodeId>) {
    dom.clear_children(parent);
    for child in children {
        dom.append(parent, child);
    }
}
