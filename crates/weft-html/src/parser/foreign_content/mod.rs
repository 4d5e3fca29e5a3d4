//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

mod mathml;
mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjusted_svg_tag_name};

use weft_dom::{Namespace, TreeAdapter};

use super::core::Parser;
use crate::error::ErrorCode;
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "When the steps below require the user agent to adjust foreign attributes
/// for a token, then, if any of the attributes on the token match the strings
/// in the first column of the following table, let the attribute be a
/// namespaced attribute, with the prefix being the string in the second
/// column, the local name being the string in the third column, and the
/// namespace being the namespace in the fourth column."
///
/// Format: (`attribute_name`, prefix, `local_name`, namespace)
const FOREIGN_ATTRIBUTES: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// Split prefixed attributes into prefix, local name and namespace.
pub fn adjust_foreign_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        let Some(&(_, prefix, local_name, namespace)) = FOREIGN_ATTRIBUTES
            .iter()
            .find(|(from, ..)| *from == attr.name)
        else {
            continue;
        };
        attr.prefix = prefix.map(str::to_string);
        local_name.clone_into(&mut attr.name);
        attr.namespace = Some(namespace);
    }
}

/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1", "h2",
/// "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing", "menu",
/// "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong",
/// "strike", "sub", "sup", "table", "tt", "u", "ul", "var""
const BREAKOUT_TAGS: &[&str] = &[
    "b",
    "big",
    "blockquote",
    "body",
    "br",
    "center",
    "code",
    "dd",
    "div",
    "dl",
    "dt",
    "em",
    "embed",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "hr",
    "i",
    "img",
    "li",
    "listing",
    "menu",
    "meta",
    "nobr",
    "ol",
    "p",
    "pre",
    "ruby",
    "s",
    "small",
    "span",
    "strong",
    "strike",
    "sub",
    "sup",
    "table",
    "tt",
    "u",
    "ul",
    "var",
];

/// Whether a start tag leaves foreign content and goes back to HTML.
fn is_breakout_start_tag(token: &Token) -> bool {
    let Token::StartTag { name, .. } = token else {
        return false;
    };
    // "A start tag whose tag name is "font", if the token has any attributes
    // named "color", "face", or "size""
    if name == "font" {
        return ["color", "face", "size"]
            .iter()
            .any(|attr| token.get_attribute(attr).is_some());
    }
    BREAKOUT_TAGS.contains(&name.as_str())
}

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn process_in_foreign_content(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            Token::NullCharacter { data, .. } => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                let replacement: String = data.chars().map(|_| '\u{FFFD}').collect();
                self.insert_characters(&replacement);
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the token's character."
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),

            // "Any other character token"
            // "Insert the token's character. Set the frameset-ok flag to "not ok"."
            Token::Character { data, .. } => {
                self.insert_characters(data);
                self.frameset_ok = false;
            }

            // "A comment token"
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is one of: ..." and "An end tag whose
            // tag name is "br", "p""
            _ if is_breakout_start_tag(token) || token.is_end_tag("br") || token.is_end_tag("p") => {
                // "Parse error."
                self.parse_error(ErrorCode::UnexpectedContentInForeignContent);
                // "While the current node is not a MathML text integration
                // point, an HTML integration point, or an element in the HTML
                // namespace, pop elements from the stack of open elements."
                while self.current_node().is_some_and(|node| {
                    !node.mathml_text_integration_point
                        && !node.html_integration_point
                        && node.namespace != Namespace::Html
                }) {
                    let _ = self.open_elements.pop();
                }
                // "Reprocess the token according to the rules given in the
                // section corresponding to the current insertion mode in HTML
                // content."
                self.process_using_rules_for(self.insertion_mode, token);
            }

            // "Any other start tag"
            Token::StartTag { .. } => self.foreign_start_tag(token),

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element"
            // "Pop the current node off the stack of open elements."
            Token::EndTag { name, .. }
                if name == "script"
                    && self.current_node().is_some_and(|node| {
                        node.namespace == Namespace::Svg && node.tag_name == "script"
                    }) =>
            {
                let _ = self.open_elements.pop();
            }

            // "Any other end tag"
            Token::EndTag { name, .. } => self.foreign_end_tag(name, token),

            // End of file always takes the HTML path.
            Token::EndOfFile => self.process_using_rules_for(self.insertion_mode, token),
        }
    }

    /// "Any other start tag" in foreign content.
    fn foreign_start_tag(&mut self, token: &Token) {
        let namespace = self
            .adjusted_current_node()
            .map_or(Namespace::Html, |node| node.namespace);

        let mut adjusted = token.clone();
        let mut self_closing = false;
        if let Token::StartTag {
            name,
            attributes,
            self_closing: flag,
            ..
        } = &mut adjusted
        {
            match namespace {
                // "If the adjusted current node is an element in the MathML
                // namespace, adjust MathML attributes for the token."
                Namespace::MathMl => adjust_mathml_attributes(attributes),
                // "If the adjusted current node is an element in the SVG
                // namespace, and the token's tag name is one of the ones in the
                // first column of the following table, change the tag name to
                // the name given in the corresponding cell in the second column.
                // If the adjusted current node is an element in the SVG
                // namespace, adjust SVG attributes for the token."
                Namespace::Svg => {
                    if let Some(adjusted_name) = adjusted_svg_tag_name(name) {
                        adjusted_name.clone_into(name);
                    }
                    adjust_svg_attributes(attributes);
                }
                _ => {}
            }
            // "Adjust foreign attributes for the token."
            adjust_foreign_attributes(attributes);
            self_closing = *flag;
        }

        // "Insert a foreign element for the token, with adjusted current node's
        // namespace and false."
        let _ = self.insert_element_for_token(&adjusted, namespace);

        // "If the token has its self-closing flag set, then run the appropriate
        // steps from the following list: If the token's tag name is "script",
        // and the new current node is in the SVG namespace: Acknowledge the
        // token's self-closing flag, and then act as described in the steps
        // for a "script" end tag below. Otherwise: Pop the current node off the
        // stack of open elements and acknowledge the token's self-closing
        // flag."
        if self_closing {
            let _ = self.open_elements.pop();
            self.self_closing_acknowledged = true;
        }
    }

    /// "Any other end tag" in foreign content.
    fn foreign_end_tag(&mut self, name: &str, token: &Token) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //         of the stack)."
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //         same as the tag name of the token, then this is a parse error."
        if self
            .open_elements
            .get(index)
            .is_some_and(|node| !node.tag_name.eq_ignore_ascii_case(name))
        {
            self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of open
            //         elements, then return. (fragment case)"
            if index == 0 {
                return;
            }
            let Some(node) = self.open_elements.get(index).cloned() else {
                return;
            };

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //         same as the tag name of the token, pop elements from the
            //         stack of open elements until node has been popped from the
            //         stack, and then return."
            if node.tag_name.eq_ignore_ascii_case(name) {
                self.open_elements.pop_until_element_popped(&node.handle);
                return;
            }

            // STEP 5: "Set node to the previous entry in the stack of open
            //         elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            //         to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules given
            //         in the section corresponding to the current insertion mode
            //         in HTML content."
            if self
                .open_elements
                .get(index)
                .is_some_and(|node| node.namespace == Namespace::Html)
            {
                self.process_using_rules_for(self.insertion_mode, token);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_attributes_are_namespaced() {
        let mut attrs = vec![
            Attribute::new("xlink:href".into(), "#a".into()),
            Attribute::new("xmlns".into(), "http://www.w3.org/2000/svg".into()),
            Attribute::new("class".into(), "x".into()),
        ];
        adjust_foreign_attributes(&mut attrs);

        assert_eq!(attrs[0].name, "href");
        assert_eq!(attrs[0].prefix.as_deref(), Some("xlink"));
        assert_eq!(attrs[0].namespace, Some(Namespace::XLink));
        assert_eq!(attrs[0].qualified_name(), "xlink:href");

        assert_eq!(attrs[1].name, "xmlns");
        assert_eq!(attrs[1].prefix, None);
        assert_eq!(attrs[1].namespace, Some(Namespace::Xmlns));

        assert_eq!(attrs[2].namespace, None);
    }

    #[test]
    fn font_only_breaks_out_with_presentational_attributes() {
        let plain = Token::implied_start_tag("font");
        assert!(!is_breakout_start_tag(&plain));

        let Token::StartTag { name, .. } = plain else {
            unreachable!()
        };
        let colored = Token::StartTag {
            name,
            self_closing: false,
            attributes: vec![Attribute::new("color".into(), "red".into())],
            location: None,
        };
        assert!(is_breakout_start_tag(&colored));
        assert!(is_breakout_start_tag(&Token::implied_start_tag("div")));
        assert!(!is_breakout_start_tag(&Token::implied_start_tag("circle")));
    }
}
