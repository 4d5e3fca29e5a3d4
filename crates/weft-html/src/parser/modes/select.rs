//! [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
//! and "in select in table".

use weft_dom::TreeAdapter;

use super::super::core::{InsertionMode, Parser};
use crate::error::ErrorCode;
use crate::tokenizer::Token;

/// Table tags that break out of a select nested in a table.
const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => self.parse_error(ErrorCode::UnexpectedNullCharacter),

            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data, .. } | Token::WhitespaceCharacter { data, .. } => {
                self.insert_characters(data);
            }

            // "A comment token"
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                "html" => self.process_using_rules_for(InsertionMode::InBody, token),

                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node from
                // the stack of open elements. Insert an HTML element for the
                // token."
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    }
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "optgroup""
                // "If the current node is an option element, pop that node from
                // the stack of open elements. If the current node is an optgroup
                // element, pop that node from the stack of open elements. Insert
                // an HTML element for the token."
                "optgroup" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    }
                    if self.current_node_is("optgroup") {
                        let _ = self.open_elements.pop();
                    }
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "hr""
                // "If the current node is an option element, pop that node from
                // the stack of open elements. If the current node is an optgroup
                // element, pop that node from the stack of open elements. Insert
                // an HTML element for the token. Immediately pop the current
                // node off the stack of open elements. Acknowledge the token's
                // self-closing flag, if it is set."
                "hr" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    }
                    if self.current_node_is("optgroup") {
                        let _ = self.open_elements.pop();
                    }
                    self.insert_void_element(token);
                }

                // "A start tag whose tag name is "select""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately."
                "select" => {
                    self.parse_error(ErrorCode::MisplacedStartTagInSelect);
                    if self.open_elements.has_in_select_scope("select") {
                        self.close_select();
                    }
                }

                // "A start tag whose tag name is one of: "input", "keygen",
                // "textarea""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately. Reprocess the token."
                "input" | "keygen" | "textarea" => {
                    self.parse_error(ErrorCode::MisplacedStartTagInSelect);
                    if self.open_elements.has_in_select_scope("select") {
                        self.close_select();
                        self.process_token(token);
                    }
                }

                // "A start tag whose tag name is one of: "script", "template""
                // "Process the token using the rules for the "in head" insertion
                // mode."
                "script" | "template" => {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                }

                // "Anything else"
                // "Parse error. Ignore the token."
                _ => self.parse_error(ErrorCode::MisplacedStartTagInSelect),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and the
                    // node immediately before it in the stack of open elements
                    // is an optgroup element, then pop the current node from the
                    // stack of open elements."
                    let len = self.open_elements.len();
                    let parent_is_optgroup = len >= 2
                        && self
                            .open_elements
                            .get(len - 2)
                            .is_some_and(|entry| entry.is_html("optgroup"));
                    if self.current_node_is("option") && parent_is_optgroup {
                        let _ = self.open_elements.pop();
                    }
                    // "If the current node is an optgroup element, then pop that
                    // node from the stack of open elements. Otherwise, this is a
                    // parse error; ignore the token."
                    if self.current_node_is("optgroup") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    }
                }

                // "An end tag whose tag name is "option""
                // "If the current node is an option element, then pop that node
                // from the stack of open elements. Otherwise, this is a parse
                // error; ignore the token."
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    }
                }

                // "An end tag whose tag name is "select""
                // "If the stack of open elements does not have a select element
                // in select scope, this is a parse error; ignore the token.
                // (fragment case) Otherwise: Pop elements from the stack of open
                // elements until a select element has been popped from the
                // stack. Reset the insertion mode appropriately."
                "select" => {
                    if self.open_elements.has_in_select_scope("select") {
                        self.close_select();
                    } else {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    }
                }

                // "An end tag whose tag name is "template""
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),

                // "Anything else"
                _ => self.parse_error(ErrorCode::UnexpectedEndTag),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    fn close_select(&mut self) {
        self.open_elements.pop_until_tag_name_popped("select");
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the insertion
            // mode appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.parse_error(ErrorCode::MisplacedStartTagInSelect);
                self.close_select();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "caption", "table", "tbody",
            // "tfoot", "thead", "tr", "td", "th""
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token. Otherwise: Pop
            // elements from the stack of open elements until a select element
            // has been popped from the stack. Reset the insertion mode
            // appropriately. Reprocess the token."
            Token::EndTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.parse_error(ErrorCode::UnexpectedEndTag);
                if self.open_elements.has_in_table_scope(name) {
                    self.close_select();
                    self.process_token(token);
                }
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.handle_in_select_mode(token),
        }
    }
}
