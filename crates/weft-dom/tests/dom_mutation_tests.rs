//! Tests for tree mutation: `remove_child`, `insert_before`, `move_children`,
//! and the `TreeAdapter` implementations of both trees.

use weft_dom::{
    Attribute, DomTree, HandlerNodeKind, HandlerTree, Namespace, NodeId, QuirksMode, TreeAdapter,
};

/// Helper to create an HTML element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(tag, Namespace::Html, Vec::new())
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);
    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_ignores_non_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let other = alloc_element(&mut tree, "span");
    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.remove_child(other, child);

    assert_eq!(tree.parent(child), Some(parent));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(parent, b);

    let a = alloc_element(&mut tree, "a");
    tree.insert_before(parent, a, b);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_append_moves_attached_node() {
    let mut tree = DomTree::new();
    let first = alloc_element(&mut tree, "div");
    let second = alloc_element(&mut tree, "section");
    let child = alloc_element(&mut tree, "p");
    tree.append_child(first, child);

    tree.append_child(second, child);

    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second), &[child]);
    assert_eq!(tree.parent(child), Some(second));
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");
    let existing = alloc_element(&mut tree, "i");
    tree.append_child(to, existing);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(from, a);
    tree.append_child(from, b);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, a, b]);
    assert_eq!(tree.prev_sibling(a), Some(existing));
}

// ========== TreeAdapter: DomTree ==========

#[test]
fn test_insert_text_merges_adjacent_text() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.insert_text(&div, "Hello, ");
    tree.insert_text(&div, "world");

    assert_eq!(tree.children(div).len(), 1);
    assert_eq!(tree.text_content(div), "Hello, world");
}

#[test]
fn test_insert_text_before_merges_with_preceding_text() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let table = alloc_element(&mut tree, "table");
    tree.insert_text(&div, "a");
    tree.append_child(div, table);

    tree.insert_text_before(&div, "b", &table);

    assert_eq!(tree.children(div).len(), 2);
    assert_eq!(tree.as_text(tree.children(div)[0]), Some("ab"));
}

#[test]
fn test_adopt_attributes_keeps_existing_values() {
    let mut tree = DomTree::new();
    let html = tree.create_element(
        "html",
        Namespace::Html,
        vec![Attribute::new("lang".into(), "en".into())],
    );
    tree.adopt_attributes(
        &html,
        &[
            Attribute::new("lang".into(), "fr".into()),
            Attribute::new("dir".into(), "ltr".into()),
        ],
    );

    let attrs = tree.get_attr_list(&html);
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs[0].value, "en");
    assert_eq!(attrs[1].name, "dir");
}

#[test]
fn test_set_document_type_replaces_existing_doctype() {
    let mut tree = DomTree::new();
    let doc = tree.create_document();
    tree.set_document_type(&doc, "html", "", "");
    tree.set_document_type(&doc, "svg", "-//W3C//DTD SVG 1.1//EN", "");

    let children = tree.get_child_nodes(&doc);
    assert_eq!(children.len(), 1);
    assert!(tree.is_document_type_node(&children[0]));
    assert_eq!(tree.get_document_type_node_name(&children[0]), "svg");
    assert_eq!(
        tree.get_document_type_node_public_id(&children[0]),
        "-//W3C//DTD SVG 1.1//EN"
    );
}

#[test]
fn test_document_mode_round_trips() {
    let mut tree = DomTree::new();
    let doc = tree.create_document();
    assert_eq!(tree.get_document_mode(&doc), QuirksMode::NoQuirks);
    tree.set_document_mode(&doc, QuirksMode::LimitedQuirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::LimitedQuirks);
}

// ========== TreeAdapter: HandlerTree ==========

#[test]
fn test_handler_tree_links_siblings() {
    let mut tree = HandlerTree::new();
    let doc = tree.create_document();
    let a = tree.create_element("a", Namespace::Html, Vec::new());
    let c = tree.create_element("c", Namespace::Html, Vec::new());
    tree.append_child(&doc, &a);
    tree.append_child(&doc, &c);

    let b = tree.create_element("b", Namespace::Html, Vec::new());
    tree.insert_before(&doc, &b, &c);

    assert_eq!(tree.get_child_nodes(&doc), vec![a.clone(), b.clone(), c.clone()]);
    assert_eq!(b.prev(), Some(a.clone()));
    assert_eq!(b.next(), Some(c.clone()));
    assert_eq!(b.parent(), Some(doc.clone()));

    tree.detach_node(&b);
    assert_eq!(a.next(), Some(c.clone()));
    assert_eq!(c.prev(), Some(a));
    assert_eq!(b.parent(), None);
}

#[test]
fn test_handler_tree_node_kinds() {
    let mut tree = HandlerTree::new();
    let doc = tree.create_document();
    let script = tree.create_element("script", Namespace::Html, Vec::new());
    let svg_script = tree.create_element("script", Namespace::Svg, Vec::new());
    tree.set_document_type(&doc, "html", "", "");

    assert_eq!(doc.borrow().kind, HandlerNodeKind::Root);
    assert_eq!(script.borrow().kind, HandlerNodeKind::Script);
    assert_eq!(svg_script.borrow().kind, HandlerNodeKind::Tag);

    let doctype = tree.get_first_child(&doc).expect("doctype");
    assert_eq!(doctype.borrow().name, "!doctype");
    assert_eq!(doctype.borrow().data.as_deref(), Some("!DOCTYPE html"));
    assert!(tree.is_document_type_node(&doctype));
}

#[test]
fn test_handler_tree_namespaced_attribute_maps() {
    let mut tree = HandlerTree::new();
    let mut href = Attribute::new("href".into(), "#a".into());
    href.prefix = Some("xlink".into());
    href.namespace = Some(Namespace::XLink);
    let element = tree.create_element(
        "use",
        Namespace::Svg,
        vec![Attribute::new("x".into(), "1".into()), href],
    );

    let node = element.borrow();
    assert_eq!(node.attribs_prefix().get("href").map(String::as_str), Some("xlink"));
    assert_eq!(node.attribs_namespace().get("href"), Some(&Namespace::XLink));
    assert!(!node.attribs_namespace().contains_key("x"));
}

#[test]
fn test_namespace_urls() {
    assert_eq!(Namespace::Html.url(), "http://www.w3.org/1999/xhtml");
    assert_eq!(Namespace::Svg.to_string(), "http://www.w3.org/2000/svg");
    assert_eq!(QuirksMode::LimitedQuirks.to_string(), "limited-quirks");
    assert_eq!(
        serde_json::to_string(&QuirksMode::NoQuirks).expect("serialize"),
        "\"no-quirks\""
    );
}
