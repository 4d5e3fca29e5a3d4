//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Turns any tree reachable through a [`TreeAdapter`] back into markup.

use weft_dom::{Attribute, Namespace, TreeAdapter};

/// "If current node is an area, base, basefont, bgsound, br, col, embed,
/// frame, hr, img, input, keygen, link, meta, param, source, track or wbr
/// element, then continue on to the next child node at this point."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element, or if the parent of current node is a
/// noscript element and scripting is enabled for the node, then append the
/// value of current node's data literally."
const RAW_TEXT_PARENTS: &[&str] = &[
    "style",
    "script",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
    "noscript",
];

/// One unit of pending work. Nodes are walked with an explicit stack so that
/// deeply nested trees cannot exhaust the call stack.
enum Step<H> {
    /// Serialize a node; `parent_name` is the tag name of its parent element.
    Node {
        node: H,
        parent_name: Option<String>,
    },
    EndTag(String),
}

/// Serialize the children of `node`. For a `<template>` the template
/// contents are serialized instead.
///
/// ```
/// use weft_html::{parse_document, serialize};
///
/// let tree = parse_document("<p class=a>x &amp; y");
/// assert_eq!(
///     serialize(&tree, &tree.root()),
///     "<html><head></head><body><p class=\"a\">x &amp; y</p></body></html>"
/// );
/// ```
#[must_use]
pub fn serialize<A: TreeAdapter>(adapter: &A, node: &A::Handle) -> String {
    let mut stack = Vec::new();
    push_children(adapter, node, &mut stack);
    run(adapter, stack)
}

/// Serialize `node` itself, start and end tag included.
#[must_use]
pub fn serialize_outer<A: TreeAdapter>(adapter: &A, node: &A::Handle) -> String {
    run(
        adapter,
        vec![Step::Node {
            node: node.clone(),
            parent_name: None,
        }],
    )
}

fn run<A: TreeAdapter>(adapter: &A, mut stack: Vec<Step<A::Handle>>) -> String {
    let mut output = String::new();
    while let Some(step) = stack.pop() {
        match step {
            Step::EndTag(tag_name) => {
                output.push_str("</");
                output.push_str(&tag_name);
                output.push('>');
            }
            Step::Node { node, parent_name } => {
                serialize_node(adapter, &node, parent_name.as_deref(), &mut stack, &mut output);
            }
        }
    }
    output
}

/// Queue the children of `node` so that the first child is popped first.
fn push_children<A: TreeAdapter>(adapter: &A, node: &A::Handle, stack: &mut Vec<Step<A::Handle>>) {
    // "If the node is a template element, then let the node instead be the
    // template element's template contents (a DocumentFragment node)."
    let container = if is_html_element(adapter, node, "template") {
        adapter
            .get_template_content(node)
            .unwrap_or_else(|| node.clone())
    } else {
        node.clone()
    };

    let parent_name = adapter
        .is_element_node(node)
        .then(|| adapter.get_tag_name(node));
    stack.extend(
        adapter
            .get_child_nodes(&container)
            .into_iter()
            .rev()
            .map(|child| Step::Node {
                node: child,
                parent_name: parent_name.clone(),
            }),
    );
}

fn serialize_node<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    parent_name: Option<&str>,
    stack: &mut Vec<Step<A::Handle>>,
    output: &mut String,
) {
    if adapter.is_element_node(node) {
        serialize_element(adapter, node, stack, output);
    } else if adapter.is_text_node(node) {
        let text = adapter.get_text_node_content(node);
        if parent_name.is_some_and(|name| RAW_TEXT_PARENTS.contains(&name)) {
            output.push_str(&text);
        } else {
            escape_into(&text, false, output);
        }
    } else if adapter.is_comment_node(node) {
        output.push_str("<!--");
        output.push_str(&adapter.get_comment_node_content(node));
        output.push_str("-->");
    } else if adapter.is_document_type_node(node) {
        serialize_doctype(adapter, node, output);
    } else {
        // Documents and fragments only contribute their children.
        push_children(adapter, node, stack);
    }
}

/// Write the start tag and queue the children followed by the end tag.
fn serialize_element<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    stack: &mut Vec<Step<A::Handle>>,
    output: &mut String,
) {
    let tag_name = adapter.get_tag_name(node);
    let namespace = adapter.get_namespace_uri(node);

    output.push('<');
    output.push_str(&tag_name);
    for attr in adapter.get_attr_list(node) {
        output.push(' ');
        output.push_str(&serialized_attribute_name(&attr));
        output.push_str("=\"");
        escape_into(&attr.value, true, output);
        output.push('"');
    }
    output.push('>');

    if namespace == Namespace::Html && VOID_ELEMENTS.contains(&tag_name.as_str()) {
        return;
    }

    // A parser drops one leading newline in these elements, so a text child
    // that starts with one needs another in front of it.
    if namespace == Namespace::Html
        && matches!(tag_name.as_str(), "pre" | "textarea" | "listing")
        && adapter
            .get_first_child(node)
            .is_some_and(|child| {
                adapter.is_text_node(&child) && adapter.get_text_node_content(&child).starts_with('\n')
            })
    {
        output.push('\n');
    }

    stack.push(Step::EndTag(tag_name));
    push_children(adapter, node, stack);
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#attribute's-serialized-name)
///
/// "An attribute's serialized name for the purposes of the previous paragraph
/// must be determined as follows:"
fn serialized_attribute_name(attr: &Attribute) -> String {
    match attr.namespace {
        // "If the attribute has no namespace: The attribute's serialized name
        // is the attribute's local name."
        None => attr.name.clone(),
        // "If the attribute is in the XML namespace: The attribute's serialized
        // name is the string "xml:" followed by the attribute's local name."
        Some(Namespace::Xml) => format!("xml:{}", attr.name),
        // "If the attribute is in the XMLNS namespace and the attribute's local
        // name is xmlns: The attribute's serialized name is the string "xmlns"."
        // "If the attribute is in the XMLNS namespace and the attribute's local
        // name is not xmlns: The attribute's serialized name is the string
        // "xmlns:" followed by the attribute's local name."
        Some(Namespace::Xmlns) if attr.name == "xmlns" => "xmlns".to_string(),
        Some(Namespace::Xmlns) => format!("xmlns:{}", attr.name),
        // "If the attribute is in the XLink namespace: The attribute's
        // serialized name is the string "xlink:" followed by the attribute's
        // local name."
        Some(Namespace::XLink) => format!("xlink:{}", attr.name),
        // "If the attribute is in some other namespace: The attribute's
        // serialized name is the attribute's qualified name."
        Some(_) => attr.qualified_name(),
    }
}

/// `<!DOCTYPE name>`, with the public and system identifiers when present.
fn serialize_doctype<A: TreeAdapter>(adapter: &A, node: &A::Handle, output: &mut String) {
    let name = adapter.get_document_type_node_name(node);
    let public_id = adapter.get_document_type_node_public_id(node);
    let system_id = adapter.get_document_type_node_system_id(node);

    output.push_str("<!DOCTYPE ");
    output.push_str(&name);
    if !public_id.is_empty() {
        output.push_str(" PUBLIC \"");
        output.push_str(&public_id);
        output.push('"');
    } else if !system_id.is_empty() {
        output.push_str(" SYSTEM");
    }
    if !system_id.is_empty() {
        output.push_str(" \"");
        output.push_str(&system_id);
        output.push('"');
    }
    output.push('>');
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Replace any occurrence of the "&" character by the string "&amp;".
/// Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the
/// string "&nbsp;". If the algorithm was invoked in the attribute mode,
/// replace any occurrences of the """ character by the string "&quot;". If
/// the algorithm was not invoked in the attribute mode, replace any
/// occurrences of the "<" character by the string "&lt;", and any
/// occurrences of the ">" character by the string "&gt;"."
fn escape_into(text: &str, attribute_mode: bool, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{A0}' => output.push_str("&nbsp;"),
            '"' if attribute_mode => output.push_str("&quot;"),
            '<' if !attribute_mode => output.push_str("&lt;"),
            '>' if !attribute_mode => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

fn is_html_element<A: TreeAdapter>(adapter: &A, node: &A::Handle, name: &str) -> bool {
    adapter.is_element_node(node)
        && adapter.get_namespace_uri(node) == Namespace::Html
        && adapter.get_tag_name(node) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping_modes() {
        let mut text = String::new();
        escape_into("a<b>&\"c\u{A0}", false, &mut text);
        assert_eq!(text, "a&lt;b&gt;&amp;\"c&nbsp;");

        let mut attr = String::new();
        escape_into("a<b>&\"c", true, &mut attr);
        assert_eq!(attr, "a<b>&amp;&quot;c");
    }

    #[test]
    fn namespaced_attribute_names() {
        let mut href = Attribute::new("href".into(), "#x".into());
        href.prefix = Some("xlink".into());
        href.namespace = Some(Namespace::XLink);
        assert_eq!(serialized_attribute_name(&href), "xlink:href");

        let mut xmlns = Attribute::new("xmlns".into(), String::new());
        xmlns.namespace = Some(Namespace::Xmlns);
        assert_eq!(serialized_attribute_name(&xmlns), "xmlns");

        let mut lang = Attribute::new("lang".into(), "en".into());
        lang.namespace = Some(Namespace::Xml);
        assert_eq!(serialized_attribute_name(&lang), "xml:lang");
    }
}
