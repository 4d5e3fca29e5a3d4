//! Arena-backed document tree.
//!
//! [`DomTree`] stores all nodes in a contiguous vector, using [`NodeId`]
//! indices for every relationship. Detaching a node never frees it; a moved
//! node keeps its id.

use crate::adapter::TreeAdapter;
use crate::node::{Attribute, Namespace, NodeLocation, QuirksMode};

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,

    /// Source span, present only when the parser tracked locations.
    pub location: Option<NodeLocation>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    DocumentFragment,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    DocumentType(DocumentTypeData),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTypeData {
    /// The doctype name (usually `html`).
    pub name: String,
    /// Public identifier, empty when missing.
    pub public_id: String,
    /// System identifier, empty when missing.
    pub system_id: String,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name, ..."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element's namespace"
    pub namespace: Namespace,
    /// "An element has an associated attribute list", kept in source order.
    pub attrs: Vec<Attribute>,
    /// [§ 4.12.3 The template element](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    /// "Each template element has an associated DocumentFragment object that
    /// is its template contents."
    pub template_contents: Option<NodeId>,
}

impl ElementData {
    /// Value of the attribute named `name`, if present.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,

    /// [§ 4.5](https://dom.spec.whatwg.org/#concept-document-mode)
    mode: QuirksMode,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::detached(NodeType::Document)],
            mode: QuirksMode::NoQuirks,
        }
    }

    const fn detached(node_type: NodeType) -> Node {
        Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            location: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The document's quirks mode.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.mode
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the Document).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Self::detached(node_type));
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// A node that is still attached elsewhere is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove_from_parent(child);
        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Insert `child` into `parent` immediately before `reference`. Falls back
    /// to appending if `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.remove_from_parent(child);
        let Some(index) = self.index_in_parent(parent, reference) else {
            self.append_child(parent, child);
            return;
        };

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);

        let prev = index
            .checked_sub(1)
            .map(|i| self.nodes[parent.0].children[i]);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Remove `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.remove_from_parent(child);
        }
    }

    /// Detach `id` from whatever parent it has.
    pub fn detach(&mut self, id: NodeId) {
        self.remove_from_parent(id);
    }

    fn remove_from_parent(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent else {
            return;
        };
        if let Some(index) = self.index_in_parent(parent, child) {
            let _ = self.nodes[parent.0].children.remove(index);
        }

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
        self.nodes[child.0].parent = None;
    }

    fn index_in_parent(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|&c| c == child)
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.nodes[from.0].children.clone();
        for child in children {
            self.append_child(to, child);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get doctype data if this node is a document type node.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&DocumentTypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::DocumentType(data) => Some(data),
            _ => None,
        })
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|data| data.tag_name.as_str())
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| matches!(self.tag_name(id), Some("body" | "frameset")))
            .copied()
    }

    /// Concatenated data of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(id, &mut result);
        result
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.as_text(id) {
            out.push_str(text);
            return;
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Where text inserted before `reference` (or at the end) would merge.
    fn text_node_before(&self, parent: NodeId, reference: Option<NodeId>) -> Option<NodeId> {
        let candidate = match reference {
            Some(reference) => self.prev_sibling(reference),
            None => self.last_child(parent),
        }?;
        self.as_text(candidate).map(|_| candidate)
    }

    fn insert_text_at(&mut self, parent: NodeId, text: &str, reference: Option<NodeId>) {
        if let Some(existing) = self.text_node_before(parent, reference)
            && let NodeType::Text(data) = &mut self.nodes[existing.0].node_type
        {
            data.push_str(text);
            return;
        }
        let text_id = self.alloc(NodeType::Text(text.to_string()));
        match reference {
            Some(reference) => self.insert_before(parent, text_id, reference),
            None => self.append_child(parent, text_id),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

impl TreeAdapter for DomTree {
    type Handle = NodeId;

    fn create_document(&mut self) -> NodeId {
        NodeId::ROOT
    }

    fn create_document_fragment(&mut self) -> NodeId {
        self.alloc(NodeType::DocumentFragment)
    }

    fn create_element(&mut self, tag_name: &str, namespace: Namespace, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(NodeType::Element(ElementData {
            tag_name: tag_name.to_string(),
            namespace,
            attrs,
            template_contents: None,
        }))
    }

    fn create_comment_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        Self::append_child(self, *parent, *child);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        Self::insert_before(self, *parent, *child, *reference);
    }

    fn set_template_content(&mut self, template: &NodeId, content: &NodeId) {
        if let Some(data) = self.as_element_mut(*template) {
            data.template_contents = Some(*content);
        }
    }

    fn get_template_content(&self, template: &NodeId) -> Option<NodeId> {
        self.as_element(*template).and_then(|data| data.template_contents)
    }

    fn set_document_type(&mut self, document: &NodeId, name: &str, public_id: &str, system_id: &str) {
        let data = DocumentTypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        };
        let existing = self
            .children(*document)
            .iter()
            .copied()
            .find(|&id| self.as_doctype(id).is_some());
        match existing {
            Some(id) => self.nodes[id.0].node_type = NodeType::DocumentType(data),
            None => {
                let id = self.alloc(NodeType::DocumentType(data));
                Self::append_child(self, *document, id);
            }
        }
    }

    fn set_document_mode(&mut self, _document: &NodeId, mode: QuirksMode) {
        self.mode = mode;
    }

    fn get_document_mode(&self, _document: &NodeId) -> QuirksMode {
        self.mode
    }

    fn detach_node(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn insert_text(&mut self, parent: &NodeId, text: &str) {
        self.insert_text_at(*parent, text, None);
    }

    fn insert_text_before(&mut self, parent: &NodeId, text: &str, reference: &NodeId) {
        self.insert_text_at(*parent, text, Some(*reference));
    }

    fn adopt_attributes(&mut self, recipient: &NodeId, attrs: &[Attribute]) {
        if let Some(data) = self.as_element_mut(*recipient) {
            for attr in attrs {
                if !data.attrs.iter().any(|existing| existing.name == attr.name) {
                    data.attrs.push(attr.clone());
                }
            }
        }
    }

    fn get_first_child(&self, node: &NodeId) -> Option<NodeId> {
        self.first_child(*node)
    }

    fn get_child_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        self.children(*node).to_vec()
    }

    fn get_parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn get_attr_list(&self, element: &NodeId) -> Vec<Attribute> {
        self.as_element(*element)
            .map(|data| data.attrs.clone())
            .unwrap_or_default()
    }

    fn get_tag_name(&self, element: &NodeId) -> String {
        self.tag_name(*element).unwrap_or_default().to_string()
    }

    fn get_namespace_uri(&self, element: &NodeId) -> Namespace {
        self.as_element(*element)
            .map_or(Namespace::Html, |data| data.namespace)
    }

    fn get_text_node_content(&self, text_node: &NodeId) -> String {
        self.as_text(*text_node).unwrap_or_default().to_string()
    }

    fn get_comment_node_content(&self, comment_node: &NodeId) -> String {
        match self.get(*comment_node).map(|n| &n.node_type) {
            Some(NodeType::Comment(data)) => data.clone(),
            _ => String::new(),
        }
    }

    fn get_document_type_node_name(&self, doctype_node: &NodeId) -> String {
        self.as_doctype(*doctype_node)
            .map(|d| d.name.clone())
            .unwrap_or_default()
    }

    fn get_document_type_node_public_id(&self, doctype_node: &NodeId) -> String {
        self.as_doctype(*doctype_node)
            .map(|d| d.public_id.clone())
            .unwrap_or_default()
    }

    fn get_document_type_node_system_id(&self, doctype_node: &NodeId) -> String {
        self.as_doctype(*doctype_node)
            .map(|d| d.system_id.clone())
            .unwrap_or_default()
    }

    fn is_text_node(&self, node: &NodeId) -> bool {
        self.as_text(*node).is_some()
    }

    fn is_comment_node(&self, node: &NodeId) -> bool {
        matches!(self.get(*node).map(|n| &n.node_type), Some(NodeType::Comment(_)))
    }

    fn is_document_type_node(&self, node: &NodeId) -> bool {
        self.as_doctype(*node).is_some()
    }

    fn is_element_node(&self, node: &NodeId) -> bool {
        self.as_element(*node).is_some()
    }

    fn set_node_location(&mut self, node: &NodeId, location: NodeLocation) {
        if let Some(n) = self.get_mut(*node) {
            n.location = Some(location);
        }
    }

    fn get_node_location(&self, node: &NodeId) -> Option<NodeLocation> {
        self.get(*node).and_then(|n| n.location)
    }
}
