//! Integration tests for the streaming parser API, source locations and the
//! handler tree adapter.

use weft_dom::{DomTree, HandlerNodeKind, HandlerTree, Location, NodeLocation, TreeAdapter};
use weft_html::{ParseStatus, Parser, ParserError, ParserOptions, dump_tree, serialize};

// ========== script suspension ==========

#[test]
fn test_parser_suspends_after_script() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let mut parser = Parser::new(DomTree::new(), options);

    let ParseStatus::Suspended { script } = parser.start("<script>w()</script><p>a") else {
        panic!("expected the parser to stop after </script>");
    };
    assert_eq!(parser.adapter().tag_name(script), Some("script"));
    assert_eq!(parser.adapter().text_content(script), "w()");

    parser.document_write("<b>w</b>").unwrap();
    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));

    let result = parser.finish();
    assert_eq!(
        serialize(&result.adapter, &result.root),
        "<html><head><script>w()</script></head><body><b>w</b><p>a</p></body></html>"
    );
}

#[test]
fn test_writes_during_one_suspension_keep_their_order() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let mut parser = Parser::new(DomTree::new(), options);

    assert!(matches!(
        parser.start("<script>w()</script>b"),
        ParseStatus::Suspended { .. }
    ));
    parser.document_write("1").unwrap();
    parser.document_write("<i>2</i>").unwrap();
    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));

    let result = parser.finish();
    let body = result.adapter.body().unwrap();
    assert_eq!(result.adapter.text_content(body), "12b");
    assert_eq!(serialize(&result.adapter, &body), "1<i>2</i>b");
}

#[test]
fn test_each_script_suspends() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let mut parser = Parser::new(DomTree::new(), options);

    assert!(matches!(
        parser.start("<script>1</script><script>2</script>"),
        ParseStatus::Suspended { .. }
    ));
    assert!(matches!(parser.resume(), Ok(ParseStatus::Suspended { .. })));
    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));
}

#[test]
fn test_finish_runs_through_pending_scripts() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let mut parser = Parser::new(DomTree::new(), options);
    let _ = parser.start("<script>1</script><p>x");
    let result = parser.finish();
    let body = result.adapter.body().unwrap();
    assert_eq!(result.adapter.text_content(body), "x");
}

#[test]
fn test_streaming_misuse_is_reported() {
    let mut parser = Parser::new(DomTree::new(), ParserOptions::default());
    assert_eq!(parser.document_write("x"), Err(ParserError::NotStarted));
    assert_eq!(parser.resume(), Err(ParserError::NotStarted));

    assert_eq!(parser.start("<p>x"), ParseStatus::Finished);
    assert_eq!(parser.resume(), Err(ParserError::NotSuspended));
    assert_eq!(parser.document_write("y"), Err(ParserError::AlreadyFinished));
}

#[test]
fn test_second_start_reports_current_status() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let mut parser = Parser::new(DomTree::new(), options);
    let ParseStatus::Suspended { script } = parser.start("<script>1</script>x") else {
        panic!("expected the parser to stop after </script>");
    };
    assert_eq!(parser.start("ignored"), ParseStatus::Suspended { script });
    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));
    assert_eq!(parser.start("ignored"), ParseStatus::Finished);
}

#[test]
fn test_parse_never_suspends() {
    let options = ParserOptions::default().with_suspend_on_script(true);
    let result = Parser::new(DomTree::new(), options).parse("<script>1</script><p>x");
    let body = result.adapter.body().unwrap();
    assert_eq!(result.adapter.text_content(body), "x");
}

// ========== locations ==========

#[test]
fn test_element_locations() {
    let options = ParserOptions::default().with_location_info(true);
    let result = Parser::new(DomTree::new(), options).parse("<p>Hi</p>");
    let tree = &result.adapter;
    let body = tree.body().unwrap();
    let p = tree.first_child(body).unwrap();
    let text = tree.first_child(p).unwrap();

    assert_eq!(
        tree.get_node_location(&p),
        Some(NodeLocation {
            start: 0,
            end: 9,
            start_tag: Some(Location::new(0, 3)),
            end_tag: Some(Location::new(5, 9)),
        })
    );
    assert_eq!(
        tree.get_node_location(&text),
        Some(NodeLocation::from(Location::new(3, 5)))
    );
}

#[test]
fn test_implied_elements_have_no_location() {
    let options = ParserOptions::default().with_location_info(true);
    let result = Parser::new(DomTree::new(), options).parse("<p>Hi</p>");
    let tree = &result.adapter;
    assert_eq!(tree.get_node_location(&tree.document_element().unwrap()), None);
    assert_eq!(tree.get_node_location(&tree.body().unwrap()), None);
}

#[test]
fn test_unclosed_element_ends_at_eof() {
    let options = ParserOptions::default().with_location_info(true);
    let result = Parser::new(DomTree::new(), options).parse("<div>abc");
    let tree = &result.adapter;
    let div = tree.first_child(tree.body().unwrap()).unwrap();
    let location = tree.get_node_location(&div).unwrap();
    assert_eq!(location.start_tag, Some(Location::new(0, 5)));
    assert_eq!(location.end_tag, None);
    assert_eq!(location.end, 8);
}

#[test]
fn test_comment_and_doctype_locations() {
    let options = ParserOptions::default().with_location_info(true);
    let result = Parser::new(DomTree::new(), options).parse("<!DOCTYPE html><!--c-->");
    let tree = &result.adapter;
    let children = tree.children(tree.root()).to_vec();
    assert_eq!(
        tree.get_node_location(&children[0]),
        Some(NodeLocation::from(Location::new(0, 15)))
    );
    assert_eq!(
        tree.get_node_location(&children[1]),
        Some(NodeLocation::from(Location::new(15, 23)))
    );
}

#[test]
fn test_locations_are_off_by_default() {
    let result = Parser::new(DomTree::new(), ParserOptions::default()).parse("<p>Hi</p>");
    let tree = &result.adapter;
    let p = tree.first_child(tree.body().unwrap()).unwrap();
    assert_eq!(tree.get_node_location(&p), None);
}

// ========== handler tree ==========

#[test]
fn test_handler_tree_matches_dom_tree() {
    let inputs = [
        "<!DOCTYPE html><title>t</title><p class=a>x",
        "<table><b>text</table>",
        "<p>1<b>2<i>3</p>4</i>5</b>6",
        "<template><td>x</td></template>",
        "<svg xlink:href='#a'><circle/></svg><math><mi>y</mi></math>",
        "<frameset><frame></frameset><!--after-->",
    ];
    for input in inputs {
        let dom = Parser::new(DomTree::new(), ParserOptions::default()).parse(input);
        let handler = Parser::new(HandlerTree::new(), ParserOptions::default()).parse(input);
        assert_eq!(
            dump_tree(&dom.adapter, &dom.root),
            dump_tree(&handler.adapter, &handler.root),
            "input: {input}"
        );
    }
}

#[test]
fn test_handler_node_kinds() {
    let result = Parser::new(HandlerTree::new(), ParserOptions::default())
        .parse("<!DOCTYPE html><style>a{}</style><script>1</script><p>x<!--c-->");
    let root = result.root;
    assert_eq!(root.borrow().kind, HandlerNodeKind::Root);

    let children = root.children();
    assert_eq!(children[0].borrow().kind, HandlerNodeKind::Directive);
    assert_eq!(children[0].borrow().data.as_deref(), Some("!DOCTYPE html"));

    let html = &children[1];
    let head = html.children()[0].clone();
    let kinds: Vec<HandlerNodeKind> = head
        .children()
        .iter()
        .map(|child| child.borrow().kind)
        .collect();
    assert_eq!(kinds, [HandlerNodeKind::Style, HandlerNodeKind::Script]);

    let body = html.children()[1].clone();
    let p = body.children()[0].clone();
    let p_kinds: Vec<HandlerNodeKind> = p.children().iter().map(|child| child.borrow().kind).collect();
    assert_eq!(p_kinds, [HandlerNodeKind::Text, HandlerNodeKind::Comment]);
}

#[test]
fn test_handler_sibling_links() {
    let result =
        Parser::new(HandlerTree::new(), ParserOptions::default()).parse("<ul><li>a<li>b<li>c</ul>");
    let ul = result
        .adapter
        .get_child_nodes(&result.root)[0]
        .children()[1]
        .children()[0]
        .clone();
    let items = ul.children();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].next(), Some(items[1].clone()));
    assert_eq!(items[2].prev(), Some(items[1].clone()));
    assert_eq!(items[0].prev(), None);
    assert_eq!(items[1].parent(), Some(ul));
}
