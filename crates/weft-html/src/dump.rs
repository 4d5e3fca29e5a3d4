//! Indented tree dump in the html5lib tree-construction test format.
//!
//! ```text
//! | <!DOCTYPE html>
//! | <html>
//! |   <head>
//! |   <body>
//! |     <p>
//! |       class="a"
//! |       "text"
//! ```

use std::fmt::Write as _;

use weft_dom::{Attribute, Namespace, TreeAdapter};

/// Dump the children of `node`, one `| `-prefixed line per node or
/// attribute.
///
/// ```
/// use weft_html::{dump_tree, parse_document};
///
/// let tree = parse_document("<svg viewbox='0 0 1 1'>");
/// assert_eq!(
///     dump_tree(&tree, &tree.root()),
///     "| <html>\n|   <head>\n|   <body>\n|     <svg svg>\n|       viewBox=\"0 0 1 1\"\n"
/// );
/// ```
#[must_use]
pub fn dump_tree<A: TreeAdapter>(adapter: &A, node: &A::Handle) -> String {
    let mut output = String::new();
    // Pending (node, depth) pairs, last child at the bottom.
    let mut stack: Vec<(A::Handle, usize)> = Vec::new();
    push_children(adapter, node, 0, &mut stack);

    while let Some((node, depth)) = stack.pop() {
        match dump_node(adapter, &node, depth, &mut output) {
            NodeChildren::Own => push_children(adapter, &node, depth + 1, &mut stack),
            NodeChildren::TemplateContent(content) => {
                push_children(adapter, &content, depth + 2, &mut stack);
            }
        }
    }
    output
}

/// Where the children printed below a node come from.
enum NodeChildren<H> {
    Own,
    TemplateContent(H),
}

fn push_children<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    depth: usize,
    stack: &mut Vec<(A::Handle, usize)>,
) {
    stack.extend(
        adapter
            .get_child_nodes(node)
            .into_iter()
            .rev()
            .map(|child| (child, depth)),
    );
}

/// Write the line for `node` and its attributes.
fn dump_node<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    depth: usize,
    output: &mut String,
) -> NodeChildren<A::Handle> {
    let indent = "  ".repeat(depth);

    if adapter.is_element_node(node) {
        let tag_name = adapter.get_tag_name(node);
        let namespace = adapter.get_namespace_uri(node);
        let _ = match namespace {
            Namespace::Html => writeln!(output, "| {indent}<{tag_name}>"),
            other => writeln!(output, "| {indent}<{} {tag_name}>", other.short_name()),
        };

        let mut attributes: Vec<(String, String)> = adapter
            .get_attr_list(node)
            .iter()
            .map(|attr| (dumped_attribute_name(attr), attr.value.clone()))
            .collect();
        attributes.sort();
        for (name, value) in attributes {
            let _ = writeln!(output, "| {indent}  {name}=\"{value}\"");
        }

        if namespace == Namespace::Html
            && tag_name == "template"
            && let Some(content) = adapter.get_template_content(node)
        {
            let _ = writeln!(output, "| {indent}  content");
            return NodeChildren::TemplateContent(content);
        }
    } else if adapter.is_text_node(node) {
        let text = adapter.get_text_node_content(node);
        let _ = writeln!(output, "| {indent}\"{text}\"");
    } else if adapter.is_comment_node(node) {
        let data = adapter.get_comment_node_content(node);
        let _ = writeln!(output, "| {indent}<!-- {data} -->");
    } else if adapter.is_document_type_node(node) {
        let name = adapter.get_document_type_node_name(node);
        let public_id = adapter.get_document_type_node_public_id(node);
        let system_id = adapter.get_document_type_node_system_id(node);
        if public_id.is_empty() && system_id.is_empty() {
            let _ = writeln!(output, "| {indent}<!DOCTYPE {name}>");
        } else {
            let _ = writeln!(
                output,
                "| {indent}<!DOCTYPE {name} \"{public_id}\" \"{system_id}\">"
            );
        }
    }
    NodeChildren::Own
}

/// Namespaced attributes dump as `prefix name`, e.g. `xlink href`.
fn dumped_attribute_name(attr: &Attribute) -> String {
    match &attr.prefix {
        Some(prefix) => format!("{prefix} {}", attr.name),
        None => attr.name.clone(),
    }
}
