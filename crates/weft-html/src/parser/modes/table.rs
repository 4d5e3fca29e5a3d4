//! Table modes: "in table", "in table text", "in caption", "in column group",
//! "in table body", "in row" and "in cell".

use weft_dom::TreeAdapter;

use super::super::core::{InsertionMode, Parser};
use crate::error::ErrorCode;
use crate::tokenizer::Token;

/// Tags that end a table section or row implicitly when seen in a cell,
/// caption or body context.
const TABLE_STRUCTURE_START_TAGS: &[&str] = &[
    "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl<A: TreeAdapter> Parser<A> {
    // =========================================================================
    // "in table"
    // =========================================================================

    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "in table text" and reprocess
            // the token."
            Token::Character { .. }
            | Token::WhitespaceCharacter { .. }
            | Token::NullCharacter { .. }
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                self.pending_table_characters.clear();
                self.original_insertion_mode = self.insertion_mode;
                self.reprocess_in(InsertionMode::InTableText, token);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                // "Clear the stack back to a table context. Insert a marker at
                // the end of the list of active formatting elements. Insert an
                // HTML element for the token, then switch the insertion mode to
                // "in caption"."
                "caption" => {
                    self.open_elements.clear_back_to_table_context();
                    self.active_formatting_elements.insert_marker();
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InCaption);
                }

                // "A start tag whose tag name is "colgroup""
                // "Clear the stack back to a table context. Insert an HTML
                // element for the token, then switch the insertion mode to "in
                // column group"."
                "colgroup" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InColumnGroup);
                }

                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "colgroup" start tag token with no attributes,
                // then switch the insertion mode to "in column group". Reprocess
                // the current token."
                "col" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(&Token::implied_start_tag("colgroup"));
                    self.reprocess_in(InsertionMode::InColumnGroup, token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                // "Clear the stack back to a table context. Insert an HTML
                // element for the token, then switch the insertion mode to "in
                // table body"."
                "tbody" | "tfoot" | "thead" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InTableBody);
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "tbody" start tag token with no attributes, then
                // switch the insertion mode to "in table body". Reprocess the
                // current token."
                "td" | "th" | "tr" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(&Token::implied_start_tag("tbody"));
                    self.reprocess_in(InsertionMode::InTableBody, token);
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    // "Parse error."
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token."
                    if !self.open_elements.has_in_table_scope("table") {
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately. Reprocess the token."
                    self.open_elements.pop_until_tag_name_popped("table");
                    self.reset_insertion_mode_appropriately();
                    self.process_token(token);
                }

                // "A start tag whose tag name is one of: "style", "script",
                // "template""
                // "Process the token using the rules for the "in head" insertion
                // mode."
                "style" | "script" | "template" => {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is "input""
                "input" => {
                    // "If the token does not have an attribute with the name
                    // "type", or if it does, but that attribute's value is not an
                    // ASCII case-insensitive match for the string "hidden", then:
                    // act as described in the "anything else" entry below."
                    let hidden = token
                        .get_attribute("type")
                        .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                    if !hidden {
                        self.in_table_anything_else(token);
                        return;
                    }
                    // "Otherwise: Parse error. Insert an HTML element for the
                    // token. Pop that input element off the stack of open
                    // elements. Acknowledge the token's self-closing flag, if it
                    // is set."
                    self.parse_error(ErrorCode::MisplacedContentInTable);
                    self.insert_void_element(token);
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    // "Parse error."
                    self.parse_error(ErrorCode::MisplacedContentInTable);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token."
                    if self.open_elements.has_template() || self.form_element.is_some() {
                        return;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set
                    // the form element pointer to point to the element created.
                    // Pop that form element off the stack of open elements."
                    let form = self.insert_html_element(token);
                    self.form_element = Some(form);
                    let _ = self.open_elements.pop();
                }

                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    // "If the stack of open elements does not have a table
                    // element in table scope, this is a parse error; ignore the
                    // token."
                    if !self.open_elements.has_in_table_scope("table") {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately."
                    self.open_elements.pop_until_tag_name_popped("table");
                    self.reset_insertion_mode_appropriately();
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                // "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.parse_error(ErrorCode::UnexpectedEndTag),

                // "An end tag whose tag name is "template""
                // "Process the token using the rules for the "in head"
                // insertion mode."
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),

                _ => self.in_table_anything_else(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),

            _ => self.in_table_anything_else(token),
        }
    }

    /// "Anything else": "Parse error. Enable foster parenting, process the
    /// token using the rules for the "in body" insertion mode, and then
    /// disable foster parenting."
    fn in_table_anything_else(&mut self, token: &Token) {
        self.parse_error(ErrorCode::MisplacedContentInTable);
        self.foster_parenting = true;
        self.process_using_rules_for(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    // =========================================================================
    // "in table text"
    // =========================================================================

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => self.parse_error(ErrorCode::UnexpectedNullCharacter),

            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character { .. } | Token::WhitespaceCharacter { .. } => {
                self.pending_table_characters.push(token.clone());
            }

            // "Anything else"
            _ => {
                self.flush_pending_table_characters();
                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                self.reprocess_in(self.original_insertion_mode, token);
            }
        }
    }

    /// "If any of the tokens in the pending table character tokens list are
    /// character tokens that are not ASCII whitespace, then this is a parse
    /// error: reprocess the character tokens in the pending table character
    /// tokens list using the rules given in the "anything else" entry in the
    /// "in table" insertion mode. Otherwise, insert the characters given by
    /// the pending table character tokens list."
    fn flush_pending_table_characters(&mut self) {
        let pending = std::mem::take(&mut self.pending_table_characters);
        if pending.is_empty() {
            return;
        }

        let location = self.current_location;
        let misplaced = pending
            .iter()
            .any(|token| matches!(token, Token::Character { .. }));

        if misplaced {
            self.parse_error(ErrorCode::UnexpectedTextInTable);
        }
        for pending_token in &pending {
            // Text spans follow the buffered token, not the one that ended the run.
            if let Some(span) = pending_token.location() {
                self.current_location = Some(span);
            }
            if misplaced {
                self.foster_parenting = true;
                self.process_using_rules_for(InsertionMode::InBody, pending_token);
                self.foster_parenting = false;
            } else if let Some(data) = pending_token.character_data() {
                self.insert_characters(data);
            }
        }
        self.current_location = location;
    }

    // =========================================================================
    // "in caption"
    // =========================================================================

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. } if TABLE_STRUCTURE_START_TAGS.contains(&name.as_str()) => {
                if self.close_caption() {
                    self.process_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.parse_error(ErrorCode::UnexpectedEndTag);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// "If the stack of open elements does not have a caption element in table
    /// scope, this is a parse error; ignore the token. (fragment case)
    ///
    /// Otherwise: Generate implied end tags. Now, if the current node is not a
    /// caption element, then this is a parse error. Pop elements from this
    /// stack until a caption element has been popped from the stack. Clear the
    /// list of active formatting elements up to the last marker. Switch the
    /// insertion mode to "in table"."
    ///
    /// Returns false when the token was ignored.
    fn close_caption(&mut self) -> bool {
        if !self.open_elements.has_in_table_scope("caption") {
            self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
            return false;
        }
        self.open_elements.generate_implied_end_tags();
        if !self.current_node_is("caption") {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until_tag_name_popped("caption");
        self.active_formatting_elements.clear_to_last_marker();
        self.switch_to(InsertionMode::InTable);
        true
    }

    // =========================================================================
    // "in column group"
    // =========================================================================

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::WhitespaceCharacter { data, .. } => self.insert_characters(data),

            // "A comment token"
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "col" => self.insert_void_element(token),

            // "An end tag whose tag name is "colgroup""
            Token::EndTag { name, .. } if name == "colgroup" => {
                // "If the current node is not a colgroup element, then this is
                // a parse error; ignore the token."
                if !self.current_node_is("colgroup") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. Switch the insertion mode to "in table"."
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InTable);
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. } if name == "col" => {
                self.parse_error(ErrorCode::UnexpectedEndTag);
            }

            // "A start tag whose tag name is "template""
            // "An end tag whose tag name is "template""
            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table". Reprocess the token."
            _ => {
                if !self.current_node_is("colgroup") {
                    self.parse_error(ErrorCode::MisplacedContentInTable);
                    return;
                }
                let _ = self.open_elements.pop();
                self.reprocess_in(InsertionMode::InTable, token);
            }
        }
    }

    // =========================================================================
    // "in table body"
    // =========================================================================

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "tr""
                // "Clear the stack back to a table body context. Insert an HTML
                // element for the token, then switch the insertion mode to "in
                // row"."
                "tr" => {
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InRow);
                }

                // "A start tag whose tag name is one of: "th", "td""
                // "Parse error. Clear the stack back to a table body context.
                // Insert an HTML element for a "tr" start tag token with no
                // attributes, then switch the insertion mode to "in row".
                // Reprocess the current token."
                "th" | "td" => {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.insert_html_element(&Token::implied_start_tag("tr"));
                    self.reprocess_in(InsertionMode::InRow, token);
                }

                // "A start tag whose tag name is one of: "caption", "col",
                // "colgroup", "tbody", "tfoot", "thead""
                "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" => {
                    self.leave_table_body(token);
                }

                _ => self.process_using_rules_for(InsertionMode::InTable, token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as the token, this is a parse error; ignore the token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                        return;
                    }
                    // "Otherwise: Clear the stack back to a table body context.
                    // Pop the current node from the stack of open elements.
                    // Switch the insertion mode to "in table"."
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.open_elements.pop();
                    self.switch_to(InsertionMode::InTable);
                }

                // "An end tag whose tag name is "table""
                "table" => self.leave_table_body(token),

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "td", "th", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr" => {
                    self.parse_error(ErrorCode::UnexpectedEndTag);
                }

                _ => self.process_using_rules_for(InsertionMode::InTable, token),
            },

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// "If the stack of open elements does not have a tbody, thead, or tfoot
    /// element in table scope, this is a parse error; ignore the token.
    ///
    /// Otherwise: Clear the stack back to a table body context. Pop the
    /// current node from the stack of open elements. Switch the insertion mode
    /// to "in table". Reprocess the token."
    fn leave_table_body(&mut self, token: &Token) {
        if !self.open_elements.has_table_body_context_in_table_scope() {
            self.parse_error(ErrorCode::UnexpectedStartTag);
            return;
        }
        self.open_elements.clear_back_to_table_body_context();
        let _ = self.open_elements.pop();
        self.reprocess_in(InsertionMode::InTable, token);
    }

    // =========================================================================
    // "in row"
    // =========================================================================

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is one of: "th", "td""
                // "Clear the stack back to a table row context. Insert an HTML
                // element for the token, then switch the insertion mode to "in
                // cell". Insert a marker at the end of the list of active
                // formatting elements."
                "th" | "td" => {
                    self.open_elements.clear_back_to_table_row_context();
                    let _ = self.insert_html_element(token);
                    self.switch_to(InsertionMode::InCell);
                    self.active_formatting_elements.insert_marker();
                }

                // "A start tag whose tag name is one of: "caption", "col",
                // "colgroup", "tbody", "tfoot", "thead", "tr""
                "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr" => {
                    if self.close_table_row() {
                        self.process_token(token);
                    }
                }

                _ => self.process_using_rules_for(InsertionMode::InTable, token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "tr""
                "tr" => {
                    let _ = self.close_table_row();
                }

                // "An end tag whose tag name is "table""
                "table" => {
                    if self.close_table_row() {
                        self.process_token(token);
                    }
                }

                // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as the token, this is a parse error; ignore the token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                        return;
                    }
                    // "If the stack of open elements does not have a tr element
                    // in table scope, ignore the token."
                    // "Otherwise: Clear the stack back to a table row context.
                    // Pop the current node (which will be a tr element) from the
                    // stack of open elements. Switch the insertion mode to "in
                    // table body". Reprocess the token."
                    if self.open_elements.has_in_table_scope("tr") && self.close_table_row() {
                        self.process_token(token);
                    }
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "td", "th""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" => {
                    self.parse_error(ErrorCode::UnexpectedEndTag);
                }

                _ => self.process_using_rules_for(InsertionMode::InTable, token),
            },

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token.
    ///
    /// Otherwise: Clear the stack back to a table row context. Pop the current
    /// node (which will be a tr element) from the stack of open elements.
    /// Switch the insertion mode to "in table body"."
    ///
    /// Returns false when the token was ignored.
    fn close_table_row(&mut self) -> bool {
        if !self.open_elements.has_in_table_scope("tr") {
            self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
            return false;
        }
        self.open_elements.clear_back_to_table_row_context();
        let _ = self.open_elements.pop();
        self.switch_to(InsertionMode::InTableBody);
        true
    }

    // =========================================================================
    // "in cell"
    // =========================================================================

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name, .. } if name == "td" || name == "th" => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the
                // token."
                if !self.open_elements.has_in_table_scope(name) {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise: Generate implied end tags. Now, if the current
                // node is not an HTML element with the same tag name as the
                // token, then this is a parse error. Pop elements from the stack
                // of open elements stack until an HTML element with the same tag
                // name as the token has been popped from the stack. Clear the
                // list of active formatting elements up to the last marker.
                // Switch the insertion mode to "in row"."
                self.open_elements.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until_tag_name_popped(name);
                self.active_formatting_elements.clear_to_last_marker();
                self.switch_to(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            Token::StartTag { name, .. } if TABLE_STRUCTURE_START_TAGS.contains(&name.as_str()) => {
                // "Assert: The stack of open elements has a td or th element in
                // table scope." The assertion fails in the fragment case.
                if !self.open_elements.has_in_table_scope("td")
                    && !self.open_elements.has_in_table_scope("th")
                {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    return;
                }
                // "Close the cell (see below) and reprocess the token."
                self.close_the_cell();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html"
                ) =>
            {
                self.parse_error(ErrorCode::UnexpectedEndTag);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, this is a parse error; ignore the token."
                if !self.open_elements.has_in_table_scope(name) {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, close the cell (see below) and reprocess the token."
                self.close_the_cell();
                self.process_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }
}
