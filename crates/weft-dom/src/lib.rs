//! Node trees for the weft HTML parser.
//!
//! This crate provides:
//! - the shared node vocabulary ([`Namespace`], [`Attribute`], [`QuirksMode`],
//!   [`NodeLocation`]),
//! - the [`TreeAdapter`] contract the tree constructor builds through,
//! - [`DomTree`], an arena tree addressed by [`NodeId`] following the
//!   [DOM Living Standard](https://dom.spec.whatwg.org/),
//! - [`HandlerTree`], a reference-counted linked tree in DOM-handler shape.

/// The tree adapter trait.
pub mod adapter;
/// Reference-counted linked tree.
pub mod handler;
/// Namespaces, attributes, document modes, locations.
pub mod node;
/// Arena tree.
pub mod tree;

pub use adapter::TreeAdapter;
pub use handler::{HandlerNode, HandlerNodeKind, HandlerTree, NodeRef};
pub use node::{Attribute, Location, Namespace, NodeLocation, QuirksMode};
pub use tree::{AncestorIterator, DocumentTypeData, DomTree, ElementData, Node, NodeId, NodeType};
