//! html5ever TreeSink implementation for ArenaDom.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName, ns};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId, Attribute, ElementName};

/// Handle used by TreeSink to reference nodes.
///
/// Element handles carry their parsed name so `elem_name` can lend it out
/// without reaching into the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHandle {
    pub id: ArenaNodeId,
    name: Option<Rc<QualName>>,
}

impl NodeHandle {
    fn node(id: ArenaNodeId) -> Self {
        Self { id, name: None }
    }
}

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle::node(ArenaNodeId::NONE)
    }
}

/// TreeSink implementation that builds an ArenaDom.
///
/// Uses interior mutability (RefCell) because html5ever's TreeSink trait
/// requires methods to take `&self` but we need to mutate the DOM.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }
}

/// HTML-namespace elements are unqualified; foreign content keeps its
/// namespace URL so it never classifies as a marker.
fn element_name(name: &QualName) -> ElementName {
    let space = if name.ns == ns!(html) || name.ns == ns!() {
        None
    } else {
        Some(name.ns.to_string())
    };
    ElementName {
        prefix: name.prefix.as_ref().map(|p| p.to_string()),
        space,
        local: name.local.to_string(),
    }
}

fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        // Lenient like browsers; recovered errors are only traced.
        tracing::trace!(%msg, "html parse error");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle::node(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        target.name.as_deref().unwrap_or(&EMPTY)
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let converted_attrs: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute {
                name: attribute_name(&a.name),
                value: a.value.to_string(),
            })
            .collect();

        let id = self
            .dom
            .borrow_mut()
            .create_element(element_name(&name), converted_attrs);
        NodeHandle {
            id,
            name: Some(Rc::new(name)),
        }
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        let id = self.dom.borrow_mut().create_comment(text.to_string());
        NodeHandle::node(id)
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle {
        let content = format!("{target} {data}");
        NodeHandle::node(self.dom.borrow_mut().create_processing_instruction(content))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                dom.append(parent.id, node.id);
            }
            NodeOrText::AppendText(text) => {
                dom.append_text(parent.id, &text);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        // If element has parent, append there; otherwise use prev_element
        let parent = self.dom.borrow().get(element.id).map(|n| n.parent);
        if let Some(parent) = parent
            && parent.is_some()
        {
            let mut dom = self.dom.borrow_mut();
            match child {
                NodeOrText::AppendNode(node) => {
                    dom.append(parent, node.id);
                }
                NodeOrText::AppendText(text) => {
                    dom.append_text(parent, &text);
                }
            }
            return;
        }
        self.append(prev_element, child);
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut content = name.to_string();
        if !public_id.is_empty() {
            content.push_str(&format!(" PUBLIC \"{public_id}\""));
            if !system_id.is_empty() {
                content.push_str(&format!(" \"{system_id}\""));
            }
        } else if !system_id.is_empty() {
            content.push_str(&format!(" SYSTEM \"{system_id}\""));
        }

        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_doctype(content);
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are kept inline under the template element
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => {
                dom.insert_before(sibling.id, node.id);
            }
            NodeOrText::AppendText(text) => {
                let text_node = dom.create_text(text.to_string());
                dom.insert_before(sibling.id, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        if let Some(node) = dom.get_mut(target.id)
            && let ArenaNodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                let name = attribute_name(&attr.name);
                if !existing.iter().any(|a| a.name == name) {
                    existing.push(Attribute {
                        name,
                        value: attr.value.to_string(),
                    });
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.id);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(node.id).collect();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.id, child);
        }
    }
}
