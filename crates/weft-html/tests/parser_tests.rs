//! Integration tests for tree construction.
//!
//! Expected trees use the html5lib dump format produced by [`dump_tree`].

use weft_dom::{DomTree, QuirksMode, TreeAdapter};
use weft_html::{ErrorCode, Parser, ParserOptions, dump_tree, parse_document, parse_fragment};

/// Helper to parse a document and dump the whole tree.
fn dump(html: &str) -> String {
    let tree = parse_document(html);
    dump_tree(&tree, &tree.root())
}

/// Helper to parse a fragment and dump its nodes.
fn dump_fragment(html: &str, context: &str) -> String {
    let (tree, fragment) = parse_fragment(html, context);
    dump_tree(&tree, &fragment)
}

/// Helper to build the expected dump from one line per node.
fn lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

// ========== document structure ==========

#[test]
fn test_empty_document_gets_html_head_body() {
    assert_eq!(
        dump(""),
        lines(&["| <html>", "|   <head>", "|   <body>"])
    );
}

#[test]
fn test_doctype_and_title() {
    assert_eq!(
        dump("<!DOCTYPE html><title>Hi</title><p>x"),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|     <title>",
            "|       \"Hi\"",
            "|   <body>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_comment_after_html_goes_to_document() {
    assert_eq!(
        dump("<!DOCTYPE html><html></html><!--x-->"),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "| <!-- x -->",
        ])
    );
}

#[test]
fn test_void_elements_are_not_left_open() {
    assert_eq!(
        dump("<p>a<br>b<img>c<hr>d"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"a\"",
            "|       <br>",
            "|       \"b\"",
            "|       <img>",
            "|       \"c\"",
            "|     <hr>",
            "|     \"d\"",
        ])
    );
}

#[test]
fn test_duplicate_attribute_keeps_first_value() {
    assert_eq!(
        dump("<p a=1 a=2>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       a=\"1\"",
        ])
    );
}

#[test]
fn test_end_br_becomes_br_element() {
    let result = Parser::new(DomTree::new(), ParserOptions::default()).parse("<!DOCTYPE html>a</br>b");
    assert_eq!(
        dump_tree(&result.adapter, &result.root),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"a\"",
            "|     <br>",
            "|     \"b\"",
        ])
    );
    assert!(
        result
            .errors
            .iter()
            .any(|error| error.code == ErrorCode::UnexpectedEndTag)
    );
}

#[test]
fn test_stray_end_p_creates_empty_paragraph() {
    assert_eq!(
        dump("<body></p>x"),
        lines(&["| <html>", "|   <head>", "|   <body>", "|     <p>", "|     \"x\""])
    );
}

#[test]
fn test_list_items_close_each_other() {
    assert_eq!(
        dump("<ul><li>a<li>b</ul>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <ul>",
            "|       <li>",
            "|         \"a\"",
            "|       <li>",
            "|         \"b\"",
        ])
    );
}

#[test]
fn test_ruby_annotations_close_each_other() {
    assert_eq!(
        dump("<ruby>a<rb>b<rt>c<rtc>d<rp>e</ruby>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <ruby>",
            "|       \"a\"",
            "|       <rb>",
            "|         \"b\"",
            "|       <rt>",
            "|         \"c\"",
            "|       <rtc>",
            "|         \"d\"",
            "|         <rp>",
            "|           \"e\"",
        ])
    );
}

#[test]
fn test_pre_drops_leading_newline() {
    assert_eq!(
        dump("<pre>\nx</pre>"),
        lines(&["| <html>", "|   <head>", "|   <body>", "|     <pre>", "|       \"x\""])
    );
}

#[test]
fn test_null_characters_are_dropped_in_body() {
    assert_eq!(
        dump("<p>a\0b"),
        lines(&["| <html>", "|   <head>", "|   <body>", "|     <p>", "|       \"ab\""])
    );
}

#[test]
fn test_frameset() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        lines(&["| <html>", "|   <head>", "|   <frameset>", "|     <frame>"])
    );
}

// ========== formatting elements ==========

#[test]
fn test_misnested_formatting_across_paragraph() {
    assert_eq!(
        dump("<p>1<b>2<i>3</p>4</i>5</b>6"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"1\"",
            "|       <b>",
            "|         \"2\"",
            "|         <i>",
            "|           \"3\"",
            "|     <b>",
            "|       <i>",
            "|         \"4\"",
            "|       \"5\"",
            "|     \"6\"",
        ])
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       \"1\"",
            "|     <p>",
            "|       <b>",
            "|         \"2\"",
            "|       \"3\"",
        ])
    );
}

#[test]
fn test_adoption_agency_without_furthest_block() {
    assert_eq!(
        dump("<b><i>x</b>y</i>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       <i>",
            "|         \"x\"",
            "|     <i>",
            "|       \"y\"",
        ])
    );
}

#[test]
fn test_nested_anchor_closes_outer() {
    assert_eq!(
        dump("<a>1<a>2"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <a>",
            "|       \"1\"",
            "|     <a>",
            "|       \"2\"",
        ])
    );
}

#[test]
fn test_noahs_ark_keeps_three_identical_entries() {
    assert_eq!(
        dump("<p><b><b><b><b>x</p>y"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       <b>",
            "|         <b>",
            "|           <b>",
            "|             <b>",
            "|               \"x\"",
            "|     <b>",
            "|       <b>",
            "|         <b>",
            "|           \"y\"",
        ])
    );
}

// ========== tables ==========

#[test]
fn test_table_gets_implied_tbody() {
    assert_eq!(
        dump("<table><tr><td>a<td>b</table>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"a\"",
            "|           <td>",
            "|             \"b\"",
        ])
    );
}

#[test]
fn test_foster_parented_formatting_element() {
    assert_eq!(
        dump("<table><b>text</table>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       \"text\"",
            "|     <table>",
        ])
    );
}

#[test]
fn test_foster_parented_text() {
    let result = Parser::new(DomTree::new(), ParserOptions::default())
        .parse("<!DOCTYPE html><table>x<tr><td>y</table>");
    assert_eq!(
        dump_tree(&result.adapter, &result.root),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"x\"",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"y\"",
        ])
    );
    assert!(
        result
            .errors
            .iter()
            .any(|error| error.code == ErrorCode::UnexpectedTextInTable)
    );
}

#[test]
fn test_whitespace_stays_in_table() {
    assert_eq!(
        dump("<table> <tr></tr></table>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       \" \"",
            "|       <tbody>",
            "|         <tr>",
        ])
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        dump("<select><option>a<option>b</select>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <select>",
            "|       <option>",
            "|         \"a\"",
            "|       <option>",
            "|         \"b\"",
        ])
    );
}

// ========== templates ==========

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<template><td>x</td></template>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <template>",
            "|       content",
            "|         <td>",
            "|           \"x\"",
            "|   <body>",
        ])
    );
}

// ========== foreign content ==========

#[test]
fn test_svg_names_are_adjusted() {
    assert_eq!(
        dump("<svg viewbox='0 0 1 1'><foreignobject><p>x</p></foreignobject></svg>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       viewBox=\"0 0 1 1\"",
            "|       <svg foreignObject>",
            "|         <p>",
            "|           \"x\"",
        ])
    );
}

#[test]
fn test_foreign_attributes_are_namespaced() {
    assert_eq!(
        dump("<svg xlink:href='#a'></svg>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       xlink href=\"#a\"",
        ])
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(
        dump("<svg><g><p>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg g>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_mathml_text_integration_point() {
    assert_eq!(
        dump("<math><mi>x<b>y</b></mi></math>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <math math>",
            "|       <math mi>",
            "|         \"x\"",
            "|         <b>",
            "|           \"y\"",
        ])
    );
}

#[test]
fn test_self_closing_foreign_element() {
    assert_eq!(
        dump("<svg><circle/>x</svg>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg circle>",
            "|       \"x\"",
        ])
    );
}

// ========== scripting ==========

#[test]
fn test_noscript_is_raw_text_with_scripting() {
    assert_eq!(
        dump("<body><noscript><p>a</p></noscript>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <noscript>",
            "|       \"<p>a</p>\"",
        ])
    );
}

#[test]
fn test_noscript_is_markup_without_scripting() {
    let options = ParserOptions::default().with_scripting_enabled(false);
    let result = Parser::new(DomTree::new(), options).parse("<body><noscript><p>a</p></noscript>");
    assert_eq!(
        dump_tree(&result.adapter, &result.root),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <noscript>",
            "|       <p>",
            "|         \"a\"",
        ])
    );
}

// ========== document mode ==========

fn quirks_mode(html: &str) -> QuirksMode {
    Parser::new(DomTree::new(), ParserOptions::default())
        .parse(html)
        .quirks_mode
}

#[test]
fn test_document_modes() {
    assert_eq!(quirks_mode("<!DOCTYPE html>"), QuirksMode::NoQuirks);
    assert_eq!(quirks_mode("<p>"), QuirksMode::Quirks);
    assert_eq!(quirks_mode("<!DOCTYPE svg>"), QuirksMode::Quirks);
    assert_eq!(
        quirks_mode(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#),
        QuirksMode::Quirks
    );
    assert_eq!(
        quirks_mode(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
        ),
        QuirksMode::LimitedQuirks
    );
    assert_eq!(
        quirks_mode(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN">"#),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_quirks_mode_keeps_paragraph_open_around_table() {
    assert_eq!(
        dump("<p><table></table>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       <table>",
        ])
    );
    assert_eq!(
        dump("<!DOCTYPE html><p><table></table>"),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|     <table>",
        ])
    );
}

// ========== errors ==========

#[test]
fn test_missing_doctype_is_reported_first() {
    let options = ParserOptions::default().with_location_info(true);
    let result = Parser::new(DomTree::new(), options).parse("<p>x");
    assert_eq!(result.errors[0].code, ErrorCode::MissingDoctype);
    assert_eq!(result.errors[0].offset, 0);
}

#[test]
fn test_well_formed_document_has_no_errors() {
    let result = Parser::new(DomTree::new(), ParserOptions::default())
        .parse("<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
}

#[test]
fn test_errors_are_in_input_order() {
    let result = Parser::new(DomTree::new(), ParserOptions::default())
        .parse("<!DOCTYPE html><p id=a id=b></span>");
    let offsets: Vec<usize> = result.errors.iter().map(|error| error.offset).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    assert_eq!(offsets, sorted);
    assert!(result.errors.len() >= 2);
}

// ========== fragments ==========

#[test]
fn test_fragment_in_row_context() {
    assert_eq!(
        dump_fragment("<td>cell", "tr"),
        lines(&["| <td>", "|   \"cell\""])
    );
}

#[test]
fn test_fragment_in_rcdata_context() {
    assert_eq!(
        dump_fragment("<b>x</b>", "title"),
        lines(&["| \"<b>x</b>\""])
    );
}

#[test]
fn test_fragment_in_body_context() {
    assert_eq!(
        dump_fragment("a<p>b", "div"),
        lines(&["| \"a\"", "| <p>", "|   \"b\""])
    );
}

#[test]
fn test_fragment_without_context_uses_template_rules() {
    let result = Parser::new(DomTree::new(), ParserOptions::default()).parse_fragment("<tr><td>x", None);
    assert_eq!(
        dump_tree(&result.adapter, &result.root),
        lines(&["| <tr>", "|   <td>", "|     \"x\""])
    );
}

#[test]
fn test_fragment_root_is_detached_from_document() {
    let (tree, fragment) = parse_fragment("<span>x</span>", "div");
    assert_eq!(tree.get_parent_node(&fragment), None);
    let span = tree.get_first_child(&fragment).unwrap();
    assert_eq!(tree.get_parent_node(&span), Some(fragment));
}
