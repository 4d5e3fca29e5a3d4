//! Document epilogue modes: "after body", "in frameset", "after frameset",
//! "after after body" and "after after frameset".

use weft_dom::TreeAdapter;

use super::super::core::{InsertionMode, Parser};
use crate::error::ErrorCode;
use crate::tokenizer::Token;

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Process the token using the rules for the "in body" insertion mode."
            Token::WhitespaceCharacter { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data, .. } => {
                if let Some(html) = self.open_elements.get(0).map(|entry| entry.handle.clone()) {
                    self.insert_comment_into(&html, data);
                }
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html""
            Token::EndTag { name, .. } if name == "html" => {
                // "If the parser was created as part of the HTML fragment
                // parsing algorithm, this is a parse error; ignore the token.
                // (fragment case)"
                if self.fragment_context.is_some() {
                    self.parse_error(ErrorCode::UnexpectedEndTag);
                    return;
                }
                // "Otherwise, switch the insertion mode to "after after body"."
                self.switch_to(InsertionMode::AfterAfterBody);
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.parse_error(ErrorCode::UnexpectedContentAfterBody);
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),

            // "A comment token"
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                "html" => self.process_using_rules_for(InsertionMode::InBody, token),

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "frame""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge the
                // token's self-closing flag, if it is set."
                "frame" => self.insert_void_element(token),

                // "A start tag whose tag name is "noframes""
                "noframes" => self.process_using_rules_for(InsertionMode::InHead, token),

                _ => self.parse_error(ErrorCode::UnexpectedContentInFrameset),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.open_elements.len() == 1 && self.current_node_is("html") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements."
                let _ = self.open_elements.pop();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm (fragment case), and the current node is no
                // longer a frameset element, then switch the insertion mode to
                // "after frameset"."
                if self.fragment_context.is_none() && !self.current_node_is("frameset") {
                    self.switch_to(InsertionMode::AfterFrameset);
                }
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error. Note: The current node can only be the root html
            // element in the fragment case. Stop parsing."
            Token::EndOfFile => {
                if self.open_elements.len() != 1 {
                    self.parse_error(ErrorCode::OpenElementsLeftAfterEof);
                }
                self.stop_parsing();
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error(ErrorCode::UnexpectedContentInFrameset),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),
            Token::Comment { data, .. } => self.insert_comment(data),
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag { name, .. } if name == "html" => {
                self.switch_to(InsertionMode::AfterAfterFrameset);
            }
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            _ => self.parse_error(ErrorCode::UnexpectedContentInFrameset),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data, .. } => {
                let document = self.document.clone();
                self.insert_comment_into(&document, data);
            }

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } | Token::WhitespaceCharacter { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "An end-of-file token"
            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.parse_error(ErrorCode::UnexpectedContentAfterBody);
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data, .. } => {
                let document = self.document.clone();
                self.insert_comment_into(&document, data);
            }
            Token::Doctype { .. } | Token::WhitespaceCharacter { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            _ => self.parse_error(ErrorCode::UnexpectedContentInFrameset),
        }
    }
}
