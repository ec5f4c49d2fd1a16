//! Arena-based document tree.
//!
//! Nodes live in one contiguous vector and refer to each other by index, so
//! the expansion pass can rewrite a node's children while it still holds the
//! ids of the nodes it has yet to visit.

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Qualified element name.
///
/// `space` is the namespace qualifier used for classification: the element
/// prefix for XML input, the namespace URL of foreign content for HTML input,
/// and `None` for ordinary (X)HTML elements. `prefix` is only used when
/// writing the name back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementName {
    pub prefix: Option<String>,
    pub space: Option<String>,
    pub local: String,
}

impl ElementName {
    /// An unqualified name.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            space: None,
            local: local.into(),
        }
    }

    /// A prefixed XML name, where the prefix is also the namespace qualifier.
    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            space: Some(prefix.clone()),
            prefix: Some(prefix),
            local: local.into(),
        }
    }

    /// Name as written in markup (`prefix:local` or `local`).
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

/// Element attribute. Names are kept as written, including any prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: ElementName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    Comment(String),
    /// Document type declaration, stored without the `<!DOCTYPE` wrapper.
    Doctype(String),
    /// Processing instruction or XML declaration, stored without `<?`/`?>`.
    ProcessingInstruction(String),
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    /// Create a new node with the given data.
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based document tree.
///
/// Parent/child/sibling links use indices into the node vector. Detached
/// nodes stay allocated until the arena is dropped.
#[derive(Debug)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new, detached element node.
    pub fn create_element(&mut self, name: ElementName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, content: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype(content)))
    }

    /// Create a processing instruction node.
    pub fn create_processing_instruction(&mut self, content: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::ProcessingInstruction(
            content,
        )))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = ArenaNodeId::NONE;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let parent = self
            .get(sibling)
            .map(|n| n.parent)
            .unwrap_or(ArenaNodeId::NONE);
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to an existing text node, or create new if last child isn't text.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let ArenaNodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. Its own subtree is kept.
    pub fn detach(&mut self, target: ArenaNodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Detach every child of `parent`, leaving it empty.
    pub fn clear_children(&mut self, parent: ArenaNodeId) {
        let children: Vec<_> = self.children(parent).collect();
        for child in children {
            self.detach(child);
        }
    }

    /// Copy a subtree into freshly allocated nodes and return the detached copy.
    ///
    /// The copy shares nothing with the original, so later edits to either
    /// side are independent.
    pub fn deep_clone(&mut self, source: ArenaNodeId) -> ArenaNodeId {
        let mut root = ArenaNodeId::NONE;
        let mut stack = vec![(source, ArenaNodeId::NONE)];

        while let Some((original, parent)) = stack.pop() {
            let Some(node) = self.get(original) else {
                continue;
            };
            let data = node.data.clone();
            let copy = self.alloc(ArenaNode::new(data));
            if parent.is_some() {
                self.append(parent, copy);
            } else {
                root = copy;
            }

            // Reverse so siblings are appended in document order
            let mut children: Vec<_> = self.children(original).map(|c| (c, copy)).collect();
            children.reverse();
            stack.extend(children);
        }
        root
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: ArenaNodeId, node: ArenaNodeId) -> bool {
        let mut current = node;
        while current.is_some() {
            if current == ancestor {
                return true;
            }
            current = self
                .get(current)
                .map(|n| n.parent)
                .unwrap_or(ArenaNodeId::NONE);
        }
        false
    }

    /// Get the number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Check whether a node has at least one child of any kind.
    pub fn has_children(&self, id: ArenaNodeId) -> bool {
        self.get(id).is_some_and(|n| n.first_child.is_some())
    }

    /// Find the first node matching a predicate (document order).
    pub fn find<F>(&self, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if predicate(node) {
                    return Some(id);
                }
                // Push children in reverse order for left-to-right traversal
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    /// Find element by local tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find(|node| {
            matches!(&node.data, ArenaNodeData::Element { name, .. } if name.local == tag)
        })
    }

    /// Find element by `id` attribute (first match).
    pub fn find_by_id(&self, id: &str) -> Option<ArenaNodeId> {
        self.find(|node| match &node.data {
            ArenaNodeData::Element { attrs, .. } => {
                attrs.iter().any(|a| a.name == "id" && a.value == id)
            }
            _ => false,
        })
    }

    /// The first element child of the document.
    pub fn root_element(&self) -> Option<ArenaNodeId> {
        self.children(self.document).find(|&c| self.is_element(c))
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl<'a> Iterator for ChildrenIter<'a> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl ArenaDom {
    /// Get element's qualified name.
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&ElementName> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(name),
            _ => None,
        })
    }

    /// Get element's local name (tag).
    pub fn local_name(&self, id: ArenaNodeId) -> Option<&str> {
        self.element_name(id).map(|n| n.local.as_str())
    }

    /// Rename an element, keeping its prefix and namespace qualifier.
    pub fn set_local_name(&mut self, id: ArenaNodeId, local: &str) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { name, .. } = &mut node.data
        {
            name.local = local.to_string();
        }
    }

    /// Get an element's attributes.
    pub fn attributes(&self, id: ArenaNodeId) -> &[Attribute] {
        static EMPTY: &[Attribute] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                ArenaNodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, id: ArenaNodeId, attr_name: &str, value: impl Into<String>) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { attrs, .. } = &mut node.data
        {
            let value = value.into();
            match attrs.iter_mut().find(|a| a.name == attr_name) {
                Some(existing) => existing.value = value,
                None => attrs.push(Attribute {
                    name: attr_name.to_string(),
                    value,
                }),
            }
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attr(&mut self, id: ArenaNodeId, attr_name: &str) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { attrs, .. } = &mut node.data
        {
            attrs.retain(|a| a.name != attr_name);
        }
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Element { .. }))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
