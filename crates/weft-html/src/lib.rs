//! HTML tokenizer and tree constructor for weft.
//!
//! # Scope
//!
//! This crate implements:
//! - **Input stream preprocessing** ([WHATWG § 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream))
//!   - CR/CRLF normalisation, surrogate and noncharacter diagnostics
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - All 80 tokenizer states, including script data escapes and CDATA
//!   - Named character references through a prefix trie
//!   - Optional source locations on every token
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Every insertion mode, including tables, templates and framesets
//!   - Foster parenting and the adoption agency algorithm
//!   - SVG and MathML foreign content
//!   - Fragment parsing and script suspension
//!
//! - **Serialization** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   and an html5lib-style tree dump.
//!
//! Trees are built through the [`TreeAdapter`](weft_dom::TreeAdapter) trait;
//! [`parse_document`] and [`parse_fragment`] are shortcuts that build a
//! [`DomTree`].

/// Tree dump.
pub mod dump;
/// Parse errors and API errors.
pub mod error;
/// HTML parser and tree construction.
pub mod parser;
/// Input stream preprocessing.
pub mod preprocessor;
/// HTML serializer.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use weft_dom::{DomTree, Namespace, NodeId, TreeAdapter};

pub use dump::dump_tree;
pub use error::{ErrorCode, ParseError, ParserError};
pub use parser::{InsertionMode, ParseResult, ParseStatus, Parser, ParserOptions};
pub use preprocessor::Preprocessor;
pub use serializer::{serialize, serialize_outer};
pub use tokenizer::{Attribute, Location, Token, Tokenizer, TokenizerOptions, TokenizerState, tokenize};

/// Parse a complete document into a [`DomTree`] with default options.
///
/// ```
/// let tree = weft_html::parse_document("<title>Hi</title>");
/// let html = tree.document_element().unwrap();
/// assert_eq!(tree.text_content(html), "Hi");
/// ```
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    Parser::new(DomTree::new(), ParserOptions::default())
        .parse(html)
        .adapter
}

/// Parse `html` as the contents of an HTML element named `context_tag`.
///
/// Returns the tree and the document fragment holding the parsed nodes.
///
/// ```
/// use weft_dom::TreeAdapter;
///
/// let (tree, fragment) = weft_html::parse_fragment("<td>cell", "tr");
/// let cell = tree.get_first_child(&fragment).unwrap();
/// assert_eq!(tree.tag_name(cell), Some("td"));
/// ```
#[must_use]
pub fn parse_fragment(html: &str, context_tag: &str) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let context = tree.create_element(context_tag, Namespace::Html, Vec::new());
    let result = Parser::new(tree, ParserOptions::default()).parse_fragment(html, Some(context));
    (result.adapter, result.root)
}
