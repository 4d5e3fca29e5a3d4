//! Linked node tree in the shape used by DOM-handler style consumers.
//!
//! Every node is a reference-counted cell carrying `type`, `name`,
//! `attribs`, `children`, `parent`, `prev`, `next` and `data`. Parent and
//! sibling links are weak so that dropping the document drops the tree.
//! Doctypes are stored as a `!doctype` directive, and the root records the
//! document mode.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::adapter::TreeAdapter;
use crate::node::{Attribute, Namespace, NodeLocation, QuirksMode};

/// The `type` field of a handler node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerNodeKind {
    /// The document (`root`).
    Root,
    /// A document fragment (also `root`).
    Fragment,
    /// An ordinary element (`tag`).
    Tag,
    /// A `<script>` element (`script`).
    Script,
    /// A `<style>` element (`style`).
    Style,
    /// A text node.
    Text,
    /// A comment node.
    Comment,
    /// A directive; only `!doctype` is produced.
    Directive,
}

impl HandlerNodeKind {
    /// The string used for the `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root | Self::Fragment => "root",
            Self::Tag => "tag",
            Self::Script => "script",
            Self::Style => "style",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Directive => "directive",
        }
    }

    const fn is_element(self) -> bool {
        matches!(self, Self::Tag | Self::Script | Self::Style)
    }
}

/// The contents of a handler node.
#[derive(Debug)]
pub struct HandlerNode {
    /// Node type.
    pub kind: HandlerNodeKind,
    /// Tag name for elements, `!doctype` for the doctype directive.
    pub name: String,
    /// Element namespace.
    pub namespace: Option<Namespace>,
    /// Attributes, in source order.
    pub attribs: Vec<Attribute>,
    /// Child nodes.
    pub children: Vec<NodeRef>,
    /// Parent node.
    pub parent: Option<Weak<RefCell<HandlerNode>>>,
    /// Previous sibling.
    pub prev: Option<Weak<RefCell<HandlerNode>>>,
    /// Next sibling.
    pub next: Option<Weak<RefCell<HandlerNode>>>,
    /// Character data of text, comment and directive nodes.
    pub data: Option<String>,
    /// Document mode, meaningful on the root only.
    pub mode: QuirksMode,
    /// Doctype fields, meaningful on the directive only.
    pub doctype: Option<(String, String, String)>,
    /// Template contents for `<template>` elements.
    pub template_content: Option<NodeRef>,
    /// Source span.
    pub location: Option<NodeLocation>,
}

impl HandlerNode {
    const fn new(kind: HandlerNodeKind) -> Self {
        Self {
            kind,
            name: String::new(),
            namespace: None,
            attribs: Vec::new(),
            children: Vec::new(),
            parent: None,
            prev: None,
            next: None,
            data: None,
            mode: QuirksMode::NoQuirks,
            doctype: None,
            template_content: None,
            location: None,
        }
    }

    /// `x-attribsNamespace`: namespaces of the namespaced attributes.
    #[must_use]
    pub fn attribs_namespace(&self) -> BTreeMap<String, Namespace> {
        self.attribs
            .iter()
            .filter_map(|attr| attr.namespace.map(|ns| (attr.name.clone(), ns)))
            .collect()
    }

    /// `x-attribsPrefix`: prefixes of the prefixed attributes.
    #[must_use]
    pub fn attribs_prefix(&self) -> BTreeMap<String, String> {
        self.attribs
            .iter()
            .filter_map(|attr| attr.prefix.clone().map(|p| (attr.name.clone(), p)))
            .collect()
    }
}

/// Shared handle to a [`HandlerNode`]. Equality is identity.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<HandlerNode>>);

impl NodeRef {
    fn new(node: HandlerNode) -> Self {
        Self(Rc::new(RefCell::new(node)))
    }

    /// Borrow the node contents.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, HandlerNode> {
        self.0.borrow()
    }

    fn downgrade(&self) -> Weak<RefCell<HandlerNode>> {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: Option<&Weak<RefCell<HandlerNode>>>) -> Option<Self> {
        weak.and_then(Weak::upgrade).map(Self)
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        Self::upgrade(self.0.borrow().parent.as_ref())
    }

    /// Previous sibling.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        Self::upgrade(self.0.borrow().prev.as_ref())
    }

    /// Next sibling.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::upgrade(self.0.borrow().next.as_ref())
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        match node.kind {
            HandlerNodeKind::Text | HandlerNodeKind::Comment | HandlerNodeKind::Directive => {
                write!(f, "{}({:?})", node.kind.as_str(), node.data)
            }
            _ => write!(f, "{}<{}>", node.kind.as_str(), node.name),
        }
    }
}

/// Tree builder producing [`NodeRef`] nodes.
#[derive(Debug, Default)]
pub struct HandlerTree {
    document: Option<NodeRef>,
}

impl HandlerTree {
    /// Create an empty builder. The document is created on first request.
    #[must_use]
    pub const fn new() -> Self {
        Self { document: None }
    }

    /// The document node, if it has been created.
    #[must_use]
    pub const fn document(&self) -> Option<&NodeRef> {
        self.document.as_ref()
    }

    fn detach(node: &NodeRef) {
        let Some(parent) = node.parent() else {
            return;
        };
        let prev = node.prev();
        let next = node.next();
        parent.0.borrow_mut().children.retain(|child| child != node);
        if let Some(prev) = &prev {
            prev.0.borrow_mut().next = next.as_ref().map(NodeRef::downgrade);
        }
        if let Some(next) = &next {
            next.0.borrow_mut().prev = prev.as_ref().map(NodeRef::downgrade);
        }
        let mut inner = node.0.borrow_mut();
        inner.parent = None;
        inner.prev = None;
        inner.next = None;
    }

    fn insert_at(parent: &NodeRef, child: &NodeRef, reference: Option<&NodeRef>) {
        Self::detach(child);
        let index = {
            let inner = parent.0.borrow();
            reference
                .and_then(|r| inner.children.iter().position(|c| c == r))
                .unwrap_or(inner.children.len())
        };
        let (prev, next) = {
            let inner = parent.0.borrow();
            let prev = index.checked_sub(1).map(|i| inner.children[i].clone());
            (prev, inner.children.get(index).cloned())
        };
        parent.0.borrow_mut().children.insert(index, child.clone());
        {
            let mut inner = child.0.borrow_mut();
            inner.parent = Some(parent.downgrade());
            inner.prev = prev.as_ref().map(NodeRef::downgrade);
            inner.next = next.as_ref().map(NodeRef::downgrade);
        }
        if let Some(prev) = prev {
            prev.0.borrow_mut().next = Some(child.downgrade());
        }
        if let Some(next) = next {
            next.0.borrow_mut().prev = Some(child.downgrade());
        }
    }

    fn insert_text_at(parent: &NodeRef, text: &str, reference: Option<&NodeRef>) {
        let before = match reference {
            Some(reference) => reference.prev(),
            None => parent.0.borrow().children.last().cloned(),
        };
        if let Some(existing) = before {
            let mut inner = existing.0.borrow_mut();
            if inner.kind == HandlerNodeKind::Text {
                inner.data.get_or_insert_with(String::new).push_str(text);
                return;
            }
        }
        let mut node = HandlerNode::new(HandlerNodeKind::Text);
        node.data = Some(text.to_string());
        Self::insert_at(parent, &NodeRef::new(node), reference);
    }
}

impl TreeAdapter for HandlerTree {
    type Handle = NodeRef;

    fn create_document(&mut self) -> NodeRef {
        self.document
            .get_or_insert_with(|| NodeRef::new(HandlerNode::new(HandlerNodeKind::Root)))
            .clone()
    }

    fn create_document_fragment(&mut self) -> NodeRef {
        NodeRef::new(HandlerNode::new(HandlerNodeKind::Fragment))
    }

    fn create_element(&mut self, tag_name: &str, namespace: Namespace, attrs: Vec<Attribute>) -> NodeRef {
        let kind = match (tag_name, namespace) {
            ("script", Namespace::Html) => HandlerNodeKind::Script,
            ("style", Namespace::Html) => HandlerNodeKind::Style,
            _ => HandlerNodeKind::Tag,
        };
        let mut node = HandlerNode::new(kind);
        node.name = tag_name.to_string();
        node.namespace = Some(namespace);
        node.attribs = attrs;
        NodeRef::new(node)
    }

    fn create_comment_node(&mut self, data: &str) -> NodeRef {
        let mut node = HandlerNode::new(HandlerNodeKind::Comment);
        node.data = Some(data.to_string());
        NodeRef::new(node)
    }

    fn append_child(&mut self, parent: &NodeRef, child: &NodeRef) {
        Self::insert_at(parent, child, None);
    }

    fn insert_before(&mut self, parent: &NodeRef, child: &NodeRef, reference: &NodeRef) {
        Self::insert_at(parent, child, Some(reference));
    }

    fn set_template_content(&mut self, template: &NodeRef, content: &NodeRef) {
        template.0.borrow_mut().template_content = Some(content.clone());
    }

    fn get_template_content(&self, template: &NodeRef) -> Option<NodeRef> {
        template.0.borrow().template_content.clone()
    }

    fn set_document_type(&mut self, document: &NodeRef, name: &str, public_id: &str, system_id: &str) {
        let mut data = format!("!DOCTYPE {name}");
        if !public_id.is_empty() {
            data.push_str(&format!(" PUBLIC \"{public_id}\""));
        }
        if !system_id.is_empty() {
            if public_id.is_empty() {
                data.push_str(" SYSTEM");
            }
            data.push_str(&format!(" \"{system_id}\""));
        }
        let fields = (name.to_string(), public_id.to_string(), system_id.to_string());

        let existing = document
            .children()
            .into_iter()
            .find(|child| child.borrow().kind == HandlerNodeKind::Directive);
        if let Some(existing) = existing {
            let mut inner = existing.0.borrow_mut();
            inner.data = Some(data);
            inner.doctype = Some(fields);
            return;
        }
        let mut node = HandlerNode::new(HandlerNodeKind::Directive);
        node.name = "!doctype".to_string();
        node.data = Some(data);
        node.doctype = Some(fields);
        Self::insert_at(document, &NodeRef::new(node), None);
    }

    fn set_document_mode(&mut self, document: &NodeRef, mode: QuirksMode) {
        document.0.borrow_mut().mode = mode;
    }

    fn get_document_mode(&self, document: &NodeRef) -> QuirksMode {
        document.0.borrow().mode
    }

    fn detach_node(&mut self, node: &NodeRef) {
        Self::detach(node);
    }

    fn insert_text(&mut self, parent: &NodeRef, text: &str) {
        Self::insert_text_at(parent, text, None);
    }

    fn insert_text_before(&mut self, parent: &NodeRef, text: &str, reference: &NodeRef) {
        Self::insert_text_at(parent, text, Some(reference));
    }

    fn adopt_attributes(&mut self, recipient: &NodeRef, attrs: &[Attribute]) {
        let mut inner = recipient.0.borrow_mut();
        for attr in attrs {
            if !inner.attribs.iter().any(|existing| existing.name == attr.name) {
                inner.attribs.push(attr.clone());
            }
        }
    }

    fn get_first_child(&self, node: &NodeRef) -> Option<NodeRef> {
        node.0.borrow().children.first().cloned()
    }

    fn get_child_nodes(&self, node: &NodeRef) -> Vec<NodeRef> {
        node.children()
    }

    fn get_parent_node(&self, node: &NodeRef) -> Option<NodeRef> {
        node.parent()
    }

    fn get_attr_list(&self, element: &NodeRef) -> Vec<Attribute> {
        element.0.borrow().attribs.clone()
    }

    fn get_tag_name(&self, element: &NodeRef) -> String {
        element.0.borrow().name.clone()
    }

    fn get_namespace_uri(&self, element: &NodeRef) -> Namespace {
        element.0.borrow().namespace.unwrap_or(Namespace::Html)
    }

    fn get_text_node_content(&self, text_node: &NodeRef) -> String {
        text_node.0.borrow().data.clone().unwrap_or_default()
    }

    fn get_comment_node_content(&self, comment_node: &NodeRef) -> String {
        comment_node.0.borrow().data.clone().unwrap_or_default()
    }

    fn get_document_type_node_name(&self, doctype_node: &NodeRef) -> String {
        doctype_node
            .0
            .borrow()
            .doctype
            .as_ref()
            .map(|(name, _, _)| name.clone())
            .unwrap_or_default()
    }

    fn get_document_type_node_public_id(&self, doctype_node: &NodeRef) -> String {
        doctype_node
            .0
            .borrow()
            .doctype
            .as_ref()
            .map(|(_, public_id, _)| public_id.clone())
            .unwrap_or_default()
    }

    fn get_document_type_node_system_id(&self, doctype_node: &NodeRef) -> String {
        doctype_node
            .0
            .borrow()
            .doctype
            .as_ref()
            .map(|(_, _, system_id)| system_id.clone())
            .unwrap_or_default()
    }

    fn is_text_node(&self, node: &NodeRef) -> bool {
        node.0.borrow().kind == HandlerNodeKind::Text
    }

    fn is_comment_node(&self, node: &NodeRef) -> bool {
        node.0.borrow().kind == HandlerNodeKind::Comment
    }

    fn is_document_type_node(&self, node: &NodeRef) -> bool {
        node.0.borrow().kind == HandlerNodeKind::Directive
    }

    fn is_element_node(&self, node: &NodeRef) -> bool {
        node.0.borrow().kind.is_element()
    }

    fn set_node_location(&mut self, node: &NodeRef, location: NodeLocation) {
        node.0.borrow_mut().location = Some(location);
    }

    fn get_node_location(&self, node: &NodeRef) -> Option<NodeLocation> {
        node.0.borrow().location
    }
}
