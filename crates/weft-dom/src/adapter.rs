//! The tree adapter contract.
//!
//! The tree constructor never touches nodes directly. Every node it creates,
//! moves or inspects goes through a [`TreeAdapter`], so the same parser can
//! build an arena [`DomTree`](crate::DomTree), a reference-counted
//! [`HandlerTree`](crate::HandlerTree), or any caller-defined structure.

use core::fmt::Debug;

use crate::node::{Attribute, Namespace, NodeLocation, QuirksMode};

/// Node factory, mutator and accessor used by the tree constructor.
///
/// Handles are opaque to the parser: it clones them, compares them and hands
/// them back, nothing more. Implementations must keep single-parent
/// ownership, so [`append_child`](Self::append_child) and
/// [`insert_before`](Self::insert_before) are only ever called with nodes
/// that are currently detached.
pub trait TreeAdapter {
    /// Reference to a node of this tree.
    type Handle: Clone + PartialEq + Debug;

    // ---------------------------------------------------------------------
    // Node creation
    // ---------------------------------------------------------------------

    /// Create (or return) the document node.
    fn create_document(&mut self) -> Self::Handle;

    /// Create an empty document fragment (template contents, fragment roots).
    fn create_document_fragment(&mut self) -> Self::Handle;

    /// Create a detached element.
    fn create_element(
        &mut self,
        tag_name: &str,
        namespace: Namespace,
        attrs: Vec<Attribute>,
    ) -> Self::Handle;

    /// Create a detached comment node.
    fn create_comment_node(&mut self, data: &str) -> Self::Handle;

    // ---------------------------------------------------------------------
    // Tree mutation
    // ---------------------------------------------------------------------

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Handle, child: &Self::Handle);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(
        &mut self,
        parent: &Self::Handle,
        child: &Self::Handle,
        reference: &Self::Handle,
    );

    /// Associate a template element with its contents fragment.
    fn set_template_content(&mut self, template: &Self::Handle, content: &Self::Handle);

    /// The contents fragment of a template element.
    fn get_template_content(&self, template: &Self::Handle) -> Option<Self::Handle>;

    /// Create or update the document type node of `document`.
    fn set_document_type(
        &mut self,
        document: &Self::Handle,
        name: &str,
        public_id: &str,
        system_id: &str,
    );

    /// Record the document's quirks mode.
    fn set_document_mode(&mut self, document: &Self::Handle, mode: QuirksMode);

    /// The document's quirks mode.
    fn get_document_mode(&self, document: &Self::Handle) -> QuirksMode;

    /// Remove `node` from its parent, if it has one.
    fn detach_node(&mut self, node: &Self::Handle);

    /// Append text to `parent`, merging with a trailing text node.
    fn insert_text(&mut self, parent: &Self::Handle, text: &str);

    /// Insert text before `reference`, merging with the text node preceding it.
    fn insert_text_before(&mut self, parent: &Self::Handle, text: &str, reference: &Self::Handle);

    /// Add every attribute of `attrs` that `recipient` does not already carry.
    fn adopt_attributes(&mut self, recipient: &Self::Handle, attrs: &[Attribute]);

    // ---------------------------------------------------------------------
    // Tree traversal
    // ---------------------------------------------------------------------

    /// First child of `node`.
    fn get_first_child(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// All children of `node`, in document order.
    fn get_child_nodes(&self, node: &Self::Handle) -> Vec<Self::Handle>;

    /// Parent of `node`.
    fn get_parent_node(&self, node: &Self::Handle) -> Option<Self::Handle>;

    // ---------------------------------------------------------------------
    // Node data
    // ---------------------------------------------------------------------

    /// Attributes of an element, in source order.
    fn get_attr_list(&self, element: &Self::Handle) -> Vec<Attribute>;

    /// Local name of an element.
    fn get_tag_name(&self, element: &Self::Handle) -> String;

    /// Namespace of an element.
    fn get_namespace_uri(&self, element: &Self::Handle) -> Namespace;

    /// Data of a text node.
    fn get_text_node_content(&self, text_node: &Self::Handle) -> String;

    /// Data of a comment node.
    fn get_comment_node_content(&self, comment_node: &Self::Handle) -> String;

    /// Name of a document type node.
    fn get_document_type_node_name(&self, doctype_node: &Self::Handle) -> String;

    /// Public identifier of a document type node.
    fn get_document_type_node_public_id(&self, doctype_node: &Self::Handle) -> String;

    /// System identifier of a document type node.
    fn get_document_type_node_system_id(&self, doctype_node: &Self::Handle) -> String;

    // ---------------------------------------------------------------------
    // Node types
    // ---------------------------------------------------------------------

    /// Whether `node` is a text node.
    fn is_text_node(&self, node: &Self::Handle) -> bool;

    /// Whether `node` is a comment node.
    fn is_comment_node(&self, node: &Self::Handle) -> bool;

    /// Whether `node` is a document type node.
    fn is_document_type_node(&self, node: &Self::Handle) -> bool;

    /// Whether `node` is an element.
    fn is_element_node(&self, node: &Self::Handle) -> bool;

    // ---------------------------------------------------------------------
    // Source locations
    // ---------------------------------------------------------------------

    /// Attach a source location to `node`.
    fn set_node_location(&mut self, node: &Self::Handle, location: NodeLocation);

    /// The source location of `node`, if one was recorded.
    fn get_node_location(&self, node: &Self::Handle) -> Option<NodeLocation>;
}
