//! Integration tests for serialization back to markup.

use std::thread;

use weft_dom::{DomTree, Namespace, TreeAdapter};
use weft_html::{dump_tree, parse_document, parse_fragment, serialize, serialize_outer};

/// Helper to parse and serialize a whole document.
fn round_trip(html: &str) -> String {
    let tree = parse_document(html);
    serialize(&tree, &tree.root())
}

/// Helper to build `depth` nested `<div>` elements under the document root.
fn nested_divs(depth: usize) -> DomTree {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    for _ in 0..depth {
        let div = tree.create_element("div", Namespace::Html, Vec::new());
        tree.append_child(parent, div);
        parent = div;
    }
    tree
}

/// Helper to run `f` on a thread with a small stack.
fn on_small_stack<F: FnOnce() + Send + 'static>(f: F) {
    thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

/// Helper to parse a fragment in a `<div>` and serialize it.
fn round_trip_fragment(html: &str) -> String {
    let (tree, fragment) = parse_fragment(html, "div");
    serialize(&tree, &fragment)
}

#[test]
fn test_document_with_doctype() {
    assert_eq!(
        round_trip("<!DOCTYPE html><title>t</title><p>a"),
        "<!DOCTYPE html><html><head><title>t</title></head><body><p>a</p></body></html>"
    );
}

#[test]
fn test_void_elements_have_no_end_tag() {
    assert_eq!(
        round_trip_fragment("a<br>b<img src=x.png><input>"),
        "a<br>b<img src=\"x.png\"><input>"
    );
}

#[test]
fn test_text_escaping() {
    assert_eq!(
        round_trip_fragment("a &lt;b&gt; &amp;&nbsp;"),
        "a &lt;b&gt; &amp;&nbsp;"
    );
}

#[test]
fn test_attribute_escaping() {
    assert_eq!(
        round_trip_fragment(r#"<p title='say "x" & <y>'></p>"#),
        r#"<p title="say &quot;x&quot; &amp; <y>"></p>"#
    );
}

#[test]
fn test_raw_text_is_not_escaped() {
    assert_eq!(
        round_trip_fragment("<script>if (a < b && c) {}</script><style>p > a {}</style>"),
        "<script>if (a < b && c) {}</script><style>p > a {}</style>"
    );
}

#[test]
fn test_comments() {
    assert_eq!(round_trip_fragment("a<!-- b -->c"), "a<!-- b -->c");
}

#[test]
fn test_leading_newline_in_pre_survives() {
    // The parser drops one newline after `<pre>`, so the second one must be
    // written back with an extra newline in front of it.
    assert_eq!(round_trip_fragment("<pre>\n\nx</pre>"), "<pre>\n\nx</pre>");
    assert_eq!(round_trip_fragment("<pre>\nx</pre>"), "<pre>x</pre>");
}

#[test]
fn test_template_serializes_its_contents() {
    let (tree, fragment) = parse_fragment("<template><b>x</b></template>", "div");
    let template = tree.get_first_child(&fragment).unwrap();
    assert_eq!(serialize(&tree, &template), "<b>x</b>");
    assert_eq!(
        serialize_outer(&tree, &template),
        "<template><b>x</b></template>"
    );
}

#[test]
fn test_foreign_attributes_keep_their_prefix() {
    assert_eq!(
        round_trip_fragment(r##"<svg viewbox="0 0 1 1" xlink:href="#a"><path d="M0"/></svg>"##),
        r##"<svg viewBox="0 0 1 1" xlink:href="#a"><path d="M0"></path></svg>"##
    );
}

#[test]
fn test_misnested_markup_serializes_repaired() {
    assert_eq!(
        round_trip_fragment("<b>1<p>2</b>3</p>"),
        "<b>1</b><p><b>2</b>3</p>"
    );
}

#[test]
fn test_doctype_identifiers() {
    let html = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;
    let output = round_trip(html);
    assert!(output.starts_with(html), "{output}");
}

#[test]
fn test_serialized_output_reparses_to_the_same_tree() {
    let inputs = [
        "<table><tr><td>a<td>b</table>",
        "<ul><li>a<li>b</ul><p>c",
        "<p>1<b>2<i>3</p>4</i>5</b>6",
        "<select><option>a<option selected>b</select>",
    ];
    for input in inputs {
        let once = round_trip(input);
        let twice = round_trip(&once);
        assert_eq!(once, twice, "input: {input}");
    }
}

// ========== deep trees ==========

#[test]
fn test_deeply_nested_tree_serializes() {
    on_small_stack(|| {
        let depth = 50_000;
        let tree = nested_divs(depth);
        let output = serialize(&tree, &tree.root());
        assert_eq!(output.len(), depth * "<div></div>".len());
        assert!(output.starts_with("<div><div>"));
        assert!(output.ends_with("</div></div>"));

        let first = tree.first_child(tree.root()).unwrap();
        assert_eq!(serialize_outer(&tree, &first), output);
    });
}

#[test]
fn test_deeply_nested_tree_dumps() {
    on_small_stack(|| {
        let depth = 3_000;
        let tree = nested_divs(depth);
        let dump = dump_tree(&tree, &tree.root());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), depth);
        assert_eq!(lines[0], "| <div>");
        assert_eq!(lines[depth - 1], format!("| {}<div>", "  ".repeat(depth - 1)));
    });
}
