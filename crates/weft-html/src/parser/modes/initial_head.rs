//! Document prologue modes: "initial" through "after head", plus "text".

use weft_dom::{Namespace, QuirksMode, TreeAdapter};

use super::super::core::{InsertionMode, Parser};
use super::super::open_elements::StackEntry;
use super::super::quirks::{document_mode, is_conforming_doctype};
use crate::error::ErrorCode;
use crate::tokenizer::{Token, TokenizerState};

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::WhitespaceCharacter { .. } => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data, .. } => {
                let document = self.document.clone();
                self.insert_comment_into(&document, data);
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
                location,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's
                // public identifier is not missing, or the token's system
                // identifier is neither missing nor "about:legacy-compat",
                // then there is a parse error."
                if !is_conforming_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                ) {
                    self.parse_error(ErrorCode::NonConformingDoctype);
                }

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the
                // empty string if the name was missing; its public ID set to
                // the public identifier given in the DOCTYPE token, or the
                // empty string if the public identifier was missing; and its
                // system ID set to the system identifier given in the DOCTYPE
                // token, or the empty string if the system identifier was
                // missing."
                let document = self.document.clone();
                self.adapter.set_document_type(
                    &document,
                    name.as_deref().unwrap_or_default(),
                    public_identifier.as_deref().unwrap_or_default(),
                    system_identifier.as_deref().unwrap_or_default(),
                );
                self.set_doctype_location(*location);

                // "Then, if the document is not an iframe srcdoc document, and
                // the parser cannot change the mode flag is false, and the
                // DOCTYPE token matches one of the conditions in the following
                // list, then set the Document to quirks mode: ..."
                let mode = document_mode(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                );
                self.adapter.set_document_mode(&document, mode);

                // "Then, switch the insertion mode to "before html"."
                self.switch_to(InsertionMode::BeforeHtml);
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is
            // a parse error; if the parser cannot change the mode flag is
            // false, set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.parse_error(ErrorCode::MissingDoctype);
                let document = self.document.clone();
                self.adapter
                    .set_document_mode(&document, QuirksMode::Quirks);
                self.reprocess_in(InsertionMode::BeforeHtml, token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data, .. } => {
                let document = self.document.clone();
                self.insert_comment_into(&document, data);
            }

            // "A character token that is ... whitespace"
            // "Ignore the token."
            Token::WhitespaceCharacter { .. } => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document
            // object. Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            Token::StartTag { name, .. } if name == "html" => {
                self.insert_html_root(token);
                self.switch_to(InsertionMode::BeforeHead);
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.before_html_anything_else(token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error(ErrorCode::UnexpectedEndTag),

            _ => self.before_html_anything_else(token),
        }
    }

    /// "Anything else": "Create an html element whose node document is the
    /// Document object. Append it to the Document object. Put this element in
    /// the stack of open elements. Switch the insertion mode to "before head",
    /// then reprocess the token."
    fn before_html_anything_else(&mut self, token: &Token) {
        self.insert_html_root(&Token::implied_start_tag("html"));
        self.reprocess_in(InsertionMode::BeforeHead, token);
    }

    fn insert_html_root(&mut self, token: &Token) {
        let element = self.create_element_for_token(token, Namespace::Html);
        let document = self.document.clone();
        self.adapter.append_child(&document, &element);
        self.open_elements.push(StackEntry::new(
            element,
            "html",
            Namespace::Html,
            token.attributes(),
        ));
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is ... whitespace"
            // "Ignore the token."
            Token::WhitespaceCharacter { .. } => {}

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element = Some(head);
                self.switch_to(InsertionMode::InHead);
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.before_head_anything_else(token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error(ErrorCode::UnexpectedEndTag),

            _ => self.before_head_anything_else(token),
        }
    }

    /// "Anything else": "Insert an HTML element for a "head" start tag token
    /// with no attributes. Set the head element pointer to the newly created
    /// head element. Switch the insertion mode to "in head". Reprocess the
    /// current token."
    fn before_head_anything_else(&mut self, token: &Token) {
        let head = self.insert_html_element(&Token::implied_start_tag("head"));
        self.head_element = Some(head);
        self.reprocess_in(InsertionMode::InHead, token);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is ... whitespace"
            // "Insert the character."
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                // "Process the token using the rules for the "in body" insertion mode."
                "html" => self.process_using_rules_for(InsertionMode::InBody, token),

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                //
                // "A start tag whose tag name is "meta"" does the same; the
                // encoding steps do not apply to string input.
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    self.insert_void_element(token);
                }

                // "A start tag whose tag name is "title""
                // "Follow the generic RCDATA element parsing algorithm."
                "title" => self.parse_generic_text_element(token, TokenizerState::RCDATA),

                // "A start tag whose tag name is "noscript", if the scripting flag is enabled"
                // "A start tag whose tag name is one of: "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.options.scripting_enabled => {
                    self.parse_generic_text_element(token, TokenizerState::RAWTEXT);
                }
                "noframes" | "style" => {
                    self.parse_generic_text_element(token, TokenizerState::RAWTEXT);
                }

                // "A start tag whose tag name is "noscript", if the scripting flag is disabled"
                // "Insert an HTML element for the token."
                // "Switch the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InHeadNoscript);
                }

                // "A start tag whose tag name is "script""
                "script" => {
                    // STEP 1-8: "Let the adjusted insertion location be the
                    //           appropriate place for inserting a node. Create an
                    //           element for the token in the HTML namespace ...
                    //           Insert the newly created element at the adjusted
                    //           insertion location. Push the element onto the
                    //           stack of open elements so that it is the new
                    //           current node."
                    let _ = self.insert_html_element(token);
                    // STEP 9: "Switch the tokenizer to the script data state."
                    self.tokenizer.set_state(TokenizerState::ScriptData);
                    // STEP 10: "Let the original insertion mode be the current
                    //          insertion mode."
                    self.original_insertion_mode = self.insertion_mode;
                    // STEP 11: "Switch the insertion mode to "text"."
                    self.switch_to(InsertionMode::Text);
                }

                // "A start tag whose tag name is "template""
                "template" => {
                    // "Insert an HTML element for the token."
                    let _ = self.insert_html_element(token);
                    // "Insert a marker at the end of the list of active
                    // formatting elements."
                    self.active_formatting_elements.insert_marker();
                    // "Set the frameset-ok flag to "not ok"."
                    self.frameset_ok = false;
                    // "Switch the insertion mode to "in template"."
                    self.switch_to(InsertionMode::InTemplate);
                    // "Push "in template" onto the stack of template insertion
                    // modes so that it is the new current template insertion mode."
                    self.template_insertion_modes
                        .push(InsertionMode::InTemplate);
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.parse_error(ErrorCode::MisplacedStartTagForHeadElement),

                _ => self.in_head_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off the
                // stack of open elements."
                // "Switch the insertion mode to "after head"."
                "head" => {
                    let _ = self.open_elements.pop();
                    self.switch_to(InsertionMode::AfterHead);
                }

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.in_head_anything_else(token),

                // "An end tag whose tag name is "template""
                "template" => self.close_template_element(),

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement),
            },

            _ => self.in_head_anything_else(token),
        }
    }

    /// "Anything else": "Pop the current node (which will be the head element)
    /// off the stack of open elements. Switch the insertion mode to "after
    /// head". Reprocess the token."
    fn in_head_anything_else(&mut self, token: &Token) {
        let _ = self.open_elements.pop();
        self.reprocess_in(InsertionMode::AfterHead, token);
    }

    /// "An end tag whose tag name is "template"" in the "in head" mode.
    pub(in crate::parser) fn close_template_element(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.open_elements.has_template() {
            self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
            return;
        }
        // "1. Generate all implied end tags thoroughly."
        self.open_elements.generate_implied_end_tags_thoroughly();
        // "2. If the current node is not a template element, then this is a
        // parse error."
        if !self.current_node_is("template") {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // "3. Pop elements from the stack of open elements until a template
        // element has been popped from the stack."
        self.open_elements.pop_until_template_popped();
        // "4. Clear the list of active formatting elements up to the last marker."
        self.active_formatting_elements.clear_to_last_marker();
        // "5. Pop the current template insertion mode off the stack of template
        // insertion modes."
        let _ = self.template_insertion_modes.pop();
        // "6. Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element."
            // "Switch the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InHead);
            }

            // "A character token that is ... whitespace"
            // "A comment token"
            // "A start tag whose tag name is one of: "basefont", "bgsound",
            // "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::WhitespaceCharacter { .. } | Token::Comment { .. } => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if name == "br" => {
                self.in_head_noscript_anything_else(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.parse_error(ErrorCode::NestedNoscriptInHead);
            }
            Token::EndTag { .. } => self.parse_error(ErrorCode::UnexpectedEndTag),

            _ => self.in_head_noscript_anything_else(token),
        }
    }

    /// "Anything else": "Parse error. Pop the current node (which will be a
    /// noscript element) from the stack of open elements; the new current node
    /// will be a head element. Switch the insertion mode to "in head".
    /// Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: &Token) {
        self.parse_error(ErrorCode::DisallowedContentInNoscriptInHead);
        let _ = self.open_elements.pop();
        self.reprocess_in(InsertionMode::InHead, token);
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is ... whitespace"
            // "Insert the character."
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                "html" => self.process_using_rules_for(InsertionMode::InBody, token),

                // "A start tag whose tag name is "body""
                // "Insert an HTML element for the token."
                // "Set the frameset-ok flag to "not ok"."
                // "Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(token);
                    self.frameset_ok = false;
                    self.switch_to(InsertionMode::InBody);
                }

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                // "Switch the insertion mode to "in frameset"."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InFrameset);
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    // "Parse error."
                    self.parse_error(ErrorCode::AbandonedHeadElementChild);
                    // "Push the node pointed to by the head element pointer
                    // onto the stack of open elements."
                    let Some(head) = self.head_element.clone() else {
                        return;
                    };
                    self.open_elements
                        .push(StackEntry::new(head.clone(), "head", Namespace::Html, &[]));
                    // "Process the token using the rules for the "in head"
                    // insertion mode."
                    self.process_using_rules_for(InsertionMode::InHead, token);
                    // "Remove the node pointed to by the head element pointer
                    // from the stack of open elements. (It might not be the
                    // current node at this point.)"
                    self.open_elements.remove(&head);
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.parse_error(ErrorCode::MisplacedStartTagForHeadElement),

                _ => self.after_head_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "template""
                // "Process the token using the rules for the "in head" insertion mode."
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.after_head_anything_else(token),

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement),
            },

            _ => self.after_head_anything_else(token),
        }
    }

    /// "Anything else": "Insert an HTML element for a "body" start tag token
    /// with no attributes. Switch the insertion mode to "in body". Reprocess
    /// the current token."
    fn after_head_anything_else(&mut self, token: &Token) {
        let _ = self.insert_html_element(&Token::implied_start_tag("body"));
        self.reprocess_in(InsertionMode::InBody, token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::parser) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data, .. }
            | Token::WhitespaceCharacter { data, .. }
            | Token::NullCharacter { data, .. } => self.insert_characters(data),

            // "An end-of-file token"
            // "Parse error."
            // "If the current node is a script element, then set its already
            // started to true."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.parse_error(ErrorCode::EofInElementThatCanContainOnlyText);
                let _ = self.open_elements.pop();
                self.reprocess_in(self.original_insertion_mode, token);
            }

            // "An end tag whose tag name is "script""
            Token::EndTag { name, .. } if name == "script" => {
                // "Let script be the current node (which will be a script
                // element)."
                // "Pop the current node off the stack of open elements."
                let script = self.open_elements.pop();
                // "Switch the insertion mode to the original insertion mode."
                self.switch_to(self.original_insertion_mode);
                // "... If the parser's script nesting level is zero, ... the
                // user agent must run the following steps: ... spin the event
                // loop ..." The caller runs the script while the parser is
                // suspended.
                if self.options.suspend_on_script
                    && let Some(script) = script.filter(|entry| entry.is_html("script"))
                {
                    self.pending_script = Some(script.handle);
                }
            }

            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.open_elements.pop();
                self.switch_to(self.original_insertion_mode);
            }

            // The tokenizer only produces character, end tag and end-of-file
            // tokens in the text states.
            _ => {}
        }
    }
}
