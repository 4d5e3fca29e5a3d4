//! The "in body" insertion mode.
//!
//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use weft_dom::{Namespace, QuirksMode, TreeAdapter};

use super::super::core::{InsertionMode, Parser};
use super::super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use super::super::open_elements::is_special;
use crate::error::ErrorCode;
use crate::tokenizer::{Token, TokenizerState};

/// "A start tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main",
/// "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// "An end tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "button", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
/// "listing", "main", "menu", "nav", "ol", "pre", "search", "section",
/// "summary", "ul""
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

const NUMBERED_HEADERS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small",
/// "strike", "strong", "tt", "u"
const FORMATTING_END_TAGS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// Elements that may stay open at end of file without a parse error.
const ALLOWED_OPEN_AT_EOF: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => self.parse_error(ErrorCode::UnexpectedNullCharacter),

            // "A character token that is ... whitespace"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            Token::WhitespaceCharacter { data, .. } => {
                self.reconstruct_active_formatting_elements();
                self.insert_characters(data);
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data, .. } => {
                self.reconstruct_active_formatting_elements();
                self.insert_characters(data);
                self.frameset_ok = false;
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data, .. } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => self.in_body_start_tag(name, token),
            Token::EndTag { name, .. } => self.in_body_end_tag(name, token),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    self.process_using_rules_for(InsertionMode::InTemplate, token);
                    return;
                }
                // "Otherwise, follow these steps: 1. If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, ... the html element, then this is a parse error.
                // 2. Stop parsing."
                self.check_open_elements_at_end();
                self.stop_parsing();
            }
        }
    }

    fn check_open_elements_at_end(&mut self) {
        if self
            .open_elements
            .iter()
            .any(|entry| !entry.is_html_one_of(ALLOWED_OPEN_AT_EOF))
        {
            self.parse_error(ErrorCode::OpenElementsLeftAfterEof);
        }
    }

    fn in_body_start_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.parse_error(ErrorCode::UnexpectedStartTag);
                // "If there is a template element on the stack of open
                // elements, then ignore the token."
                if self.open_elements.has_template() {
                    return;
                }
                // "Otherwise, for each attribute on the token, check to see if
                // the attribute is already present on the top element of the
                // stack of open elements. If it is not, add the attribute and
                // its corresponding value to that element."
                if let Some(top) = self.open_elements.get(0).map(|entry| entry.handle.clone()) {
                    self.adapter.adopt_attributes(&top, token.attributes());
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
            | "style" | "template" | "title" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.parse_error(ErrorCode::UnexpectedStartTag);
                // "If the stack of open elements has only one node on it, if
                // the second element on the stack of open elements is not a
                // body element, or if there is a template element on the stack
                // of open elements, then ignore the token. (fragment case or
                // there is a template element on the stack)"
                if self.open_elements.has_template() {
                    return;
                }
                let Some(body) = self
                    .open_elements
                    .body_element()
                    .map(|entry| entry.handle.clone())
                else {
                    return;
                };
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                // each attribute on the token, check to see if the attribute is
                // already present on the body element (the second element) on
                // the stack of open elements, and if it is not, add the
                // attribute and its corresponding value to that element."
                self.frameset_ok = false;
                self.adapter.adopt_attributes(&body, token.attributes());
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.parse_error(ErrorCode::UnexpectedStartTag);
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a
                // body element, then ignore the token. (fragment case or there
                // is a template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                let Some(body) = self
                    .open_elements
                    .body_element()
                    .map(|entry| entry.handle.clone())
                else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                // "Otherwise, run the following steps:
                // 1. Remove the second element on the stack of open elements
                //    from its parent node, if it has one.
                // 2. Pop all the nodes from the bottom of the stack of open
                //    elements, from the current node up to, but not including,
                //    the root html element.
                // 3. Insert an HTML element for the token.
                // 4. Switch the insertion mode to "in frameset"."
                self.adapter.detach_node(&body);
                self.open_elements.pop_all_up_to_html_element();
                let _ = self.insert_html_element(token);
                self.switch_to(InsertionMode::InFrameset);
            }

            // "A start tag whose tag name is one of: "address", "article", ..."
            // "If the stack of open elements has a p element in button scope,
            // then close a p element."
            // "Insert an HTML element for the token."
            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            _ if NUMBERED_HEADERS.contains(&name) => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element."
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self.current_node_is_one_of(NUMBERED_HEADERS) {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    let _ = self.open_elements.pop();
                }
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element."
                self.close_p_element_in_button_scope();
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.skip_next_newline = true;
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is
                // a parse error; ignore the token."
                let has_template = self.open_elements.has_template();
                if self.form_element.is_some() && !has_template {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    return;
                }
                // "Otherwise: If the stack of open elements has a p element in
                // button scope, then close a p element. Insert an HTML element
                // for the token, and, if there is no template element on the
                // stack of open elements, set the form element pointer to point
                // to the element created."
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                if !has_template {
                    self.form_element = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.in_body_list_item_start_tag(token, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.in_body_list_item_start_tag(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            "plaintext" => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element."
                self.close_p_element_in_button_scope();
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.tokenizer.set_state(TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "1. If the stack of open elements has a button element in
                // scope, then run these substeps: Parse error. Generate implied
                // end tags. Pop elements from the stack of open elements until a
                // button element has been popped from the stack."
                if self.open_elements.has_in_scope("button") {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    self.open_elements.generate_implied_end_tags();
                    self.open_elements.pop_until_tag_name_popped("button");
                }
                // "2. Reconstruct the active formatting elements, if any.
                // 3. Insert an HTML element for the token.
                // 4. Set the frameset-ok flag to "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption agency
                // algorithm for the token, then remove that element from the
                // list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                if let Some(existing) = self
                    .active_formatting_elements
                    .element_entry_in_scope_with_tag_name("a")
                    .map(|entry| entry.handle.clone())
                {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    self.run_adoption_agency("a");
                    self.active_formatting_elements.remove_entry(&existing);
                    self.open_elements.remove(&existing);
                }
                // "Reconstruct the active formatting elements, if any."
                // "Insert an HTML element for the token. Push onto the list of
                // active formatting elements that element."
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
            | "tt" | "u" => {
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                // "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency algorithm
                // for the token, then once again reconstruct the active
                // formatting elements, if any."
                if self.open_elements.has_in_scope("nobr") {
                    self.parse_error(ErrorCode::UnexpectedStartTag);
                    self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                // "Insert an HTML element for the token. Push onto the list of
                // active formatting elements that element."
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Insert a marker at the end of the list of active formatting elements."
            // "Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.active_formatting_elements.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.adapter.get_document_mode(&self.document) != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                // "Insert an HTML element for the token."
                // "Set the frameset-ok flag to "not ok"."
                // "Switch the insertion mode to "in table"."
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            // "Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                // "Reconstruct the active formatting elements, if any."
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                let hidden = token
                    .get_attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            "param" | "source" | "track" => self.insert_void_element(token),

            // "A start tag whose tag name is "hr""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element."
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            // "Set the frameset-ok flag to "not ok"."
            "hr" => {
                self.close_p_element_in_button_scope();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            "image" => {
                self.parse_error(ErrorCode::UnexpectedStartTag);
                let mut renamed = token.clone();
                if let Token::StartTag { name, .. } = &mut renamed {
                    "img".clone_into(name);
                }
                self.process_token(&renamed);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // "1. Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // "2. If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.skip_next_newline = true;
                // "3. Switch the tokenizer to the RCDATA state."
                self.tokenizer.set_state(TokenizerState::RCDATA);
                // "4. Let the original insertion mode be the current insertion mode."
                self.original_insertion_mode = self.insertion_mode;
                // "5. Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // "6. Switch the insertion mode to "text"."
                self.switch_to(InsertionMode::Text);
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element."
                self.close_p_element_in_button_scope();
                // "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // "Follow the generic raw text element parsing algorithm."
                self.parse_generic_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            // "Set the frameset-ok flag to "not ok"."
            // "Follow the generic raw text element parsing algorithm."
            "iframe" => {
                self.frameset_ok = false;
                self.parse_generic_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag
            // is enabled"
            // "Follow the generic raw text element parsing algorithm."
            "noembed" => self.parse_generic_text_element(token, TokenizerState::RAWTEXT),
            "noscript" if self.options.scripting_enabled => {
                self.parse_generic_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                // "Reconstruct the active formatting elements, if any."
                // "Insert an HTML element for the token."
                // "Set the frameset-ok flag to "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                let mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                self.switch_to(mode);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current
            // node off the stack of open elements."
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags. If the current node is not now a ruby
            // element, this is a parse error."
            // "Insert an HTML element for the token."
            "rb" | "rtc" => {
                if self.open_elements.has_in_scope("ruby") {
                    self.open_elements.generate_implied_end_tags();
                    if !self.current_node_is("ruby") {
                        self.parse_error(ErrorCode::UnexpectedStartTag);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags, except for rtc elements. If the
            // current node is not now a rtc element or a ruby element, this is
            // a parse error."
            // "Insert an HTML element for the token."
            "rp" | "rt" => {
                if self.open_elements.has_in_scope("ruby") {
                    self.open_elements
                        .generate_implied_end_tags_with_exclusion("rtc");
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.parse_error(ErrorCode::UnexpectedStartTag);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math""
            "math" => self.in_body_foreign_start_tag(token, Namespace::MathMl),

            // "A start tag whose tag name is "svg""
            "svg" => self.in_body_foreign_start_tag(token, Namespace::Svg),

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.parse_error(ErrorCode::UnexpectedStartTag),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
    }

    /// The shared steps for "li" and "dd"/"dt" start tags. `closes` is the set
    /// of elements the new item implicitly closes.
    fn in_body_list_item_start_tag(&mut self, token: &Token, closes: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2-5: "Initialize node to be the current node (the bottommost
        //           node of the stack). Loop: If node is an li element, then
        //           run these substeps: Generate implied end tags, except for li
        //           elements. If the current node is not an li element, then
        //           this is a parse error. Pop elements from the stack of open
        //           elements until an li element has been popped from the
        //           stack. Jump to the step labeled done below. If node is in the
        //           special category, but is not an address, div, or p element,
        //           then jump to the step labeled done below. Otherwise, set
        //           node to the previous entry in the stack of open elements and
        //           return to the step labeled loop."
        let mut to_close = None;
        for entry in self.open_elements.iter().rev() {
            if entry.is_html_one_of(closes) {
                to_close = Some(entry.tag_name.clone());
                break;
            }
            if is_special(&entry.tag_name, entry.namespace)
                && !entry.is_html_one_of(&["address", "div", "p"])
            {
                break;
            }
        }
        if let Some(tag_name) = to_close {
            self.open_elements
                .generate_implied_end_tags_with_exclusion(&tag_name);
            if !self.current_node_is(&tag_name) {
                self.parse_error(ErrorCode::UnexpectedStartTag);
            }
            self.open_elements.pop_until_tag_name_popped(&tag_name);
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //         button scope, then close a p element."
        self.close_p_element_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(token);
    }

    /// "A start tag whose tag name is "math"" / ""svg"":
    /// "Reconstruct the active formatting elements, if any. Adjust MathML (SVG)
    /// attributes for the token. Adjust foreign attributes for the token.
    /// Insert a foreign element for the token, with MathML (SVG) namespace and
    /// false. If the token has its self-closing flag set, pop the current node
    /// off the stack of open elements and acknowledge the token's self-closing
    /// flag."
    fn in_body_foreign_start_tag(&mut self, token: &Token, namespace: Namespace) {
        self.reconstruct_active_formatting_elements();

        let mut adjusted = token.clone();
        let mut self_closing = false;
        if let Token::StartTag {
            attributes,
            self_closing: flag,
            ..
        } = &mut adjusted
        {
            if namespace == Namespace::MathMl {
                adjust_mathml_attributes(attributes);
            } else {
                adjust_svg_attributes(attributes);
            }
            adjust_foreign_attributes(attributes);
            self_closing = *flag;
        }

        let _ = self.insert_element_for_token(&adjusted, namespace);
        if self_closing {
            let _ = self.open_elements.pop();
            self.self_closing_acknowledged = true;
        }
    }

    fn in_body_end_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "template" => self.process_using_rules_for(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            "body" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope("body") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, if there is a node in the stack of open elements
                // that is not either a dd element, ... then this is a parse
                // error."
                self.check_open_elements_at_end();
                // "Switch the insertion mode to "after body"."
                self.switch_to(InsertionMode::AfterBody);
            }

            // "An end tag whose tag name is "html""
            "html" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope("body") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                self.check_open_elements_at_end();
                // "Switch the insertion mode to "after body"."
                // "Reprocess the token."
                self.reprocess_in(InsertionMode::AfterBody, token);
            }

            // "An end tag whose tag name is one of: "address", "article", ..."
            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as that
                // of the token, then this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, run these steps: 1. Generate implied end tags.
                // 2. If the current node is not an HTML element with the same
                // tag name as that of the token, then this is a parse error.
                // 3. Pop elements from the stack of open elements until an HTML
                // element with the same tag name as the token has been popped
                // from the stack."
                self.close_element_in_scope(name);
            }

            // "An end tag whose tag name is "form""
            "form" => {
                if self.open_elements.has_template() {
                    // "If there is a template element on the stack of open
                    // elements, then run these substeps instead: 1. If the stack
                    // of open elements does not have a form element in scope,
                    // then this is a parse error; return and ignore the token.
                    // 2. Generate implied end tags. 3. If the current node is
                    // not a form element, then this is a parse error. 4. Pop
                    // elements from the stack of open elements until a form
                    // element has been popped from the stack."
                    if !self.open_elements.has_in_scope("form") {
                        self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                        return;
                    }
                    self.close_element_in_scope("form");
                    return;
                }

                // "1. Let node be the element that the form element pointer is
                // set to, or null if it is not set to an element.
                // 2. Set the form element pointer to null.
                // 3. If node is null or if the stack of open elements does not
                // have node in scope, then this is a parse error; return and
                // ignore the token."
                let node = self.form_element.take();
                let Some(node) = node.filter(|node| self.open_elements.has_element_in_scope(node))
                else {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                };
                // "4. Generate implied end tags.
                // 5. If the current node is not node, then this is a parse error.
                // 6. Remove node from the stack of open elements."
                self.open_elements.generate_implied_end_tags();
                if self.current_node().is_none_or(|current| current.handle != node) {
                    self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.remove(&node);
            }

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML
                // element for a "p" start tag token with no attributes."
                if !self.open_elements.has_in_button_scope("p") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    let _ = self.insert_html_element(&Token::implied_start_tag("p"));
                }
                // "Close a p element."
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                // "If the stack of open elements does not have an li element in
                // list item scope, then this is a parse error; ignore the token."
                if !self.open_elements.has_in_list_item_scope("li") {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, run these steps: 1. Generate implied end tags,
                // except for li elements. 2. If the current node is not an li
                // element, then this is a parse error. 3. Pop elements from the
                // stack of open elements until an li element has been popped
                // from the stack."
                self.close_element_with_exclusion("li");
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                self.close_element_with_exclusion(name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            _ if NUMBERED_HEADERS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.open_elements.has_numbered_header_in_scope() {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, run these steps: 1. Generate implied end tags.
                // 2. If the current node is not an HTML element with the same
                // tag name as that of the token, then this is a parse error.
                // 3. Pop elements from the stack of open elements until an HTML
                // element whose tag name is one of "h1", "h2", "h3", "h4", "h5",
                // or "h6" has been popped from the stack."
                self.open_elements.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until_numbered_header_popped();
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            _ if FORMATTING_END_TAGS.contains(&name) => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            "applet" | "marquee" | "object" => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as that
                // of the token, then this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
                    return;
                }
                // "Otherwise, run these steps: 1. Generate implied end tags.
                // 2. If the current node is not an HTML element with the same
                // tag name as that of the token, then this is a parse error.
                // 3. Pop elements from the stack of open elements until an HTML
                // element with the same tag name as the token has been popped
                // from the stack. 4. Clear the list of active formatting
                // elements up to the last marker."
                self.close_element_in_scope(name);
                self.active_formatting_elements.clear_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that
            // it actually is."
            "br" => {
                self.parse_error(ErrorCode::UnexpectedEndTag);
                let mut br = Token::implied_start_tag("br");
                if let Some(span) = token.location() {
                    br.set_location(span);
                }
                self.in_body_start_tag("br", &br);
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
    }

    /// Generate implied end tags, check the current node and pop until an
    /// element named `tag_name` has been popped.
    fn close_element_in_scope(&mut self, tag_name: &str) {
        self.open_elements.generate_implied_end_tags();
        if !self.current_node_is(tag_name) {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until_tag_name_popped(tag_name);
    }

    /// Like [`close_element_in_scope`](Self::close_element_in_scope), but the
    /// implied end tags spare `tag_name` itself.
    fn close_element_with_exclusion(&mut self, tag_name: &str) {
        self.open_elements
            .generate_implied_end_tags_with_exclusion(tag_name);
        if !self.current_node_is(tag_name) {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until_tag_name_popped(tag_name);
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the stack)."
    /// 2. "Loop: If node is an HTML element with the same tag name as the token, then:"
    ///    a. "Generate implied end tags, except for HTML elements with the same tag name
    ///    as the token."
    ///    b. "If node is not the current node, then this is a parse error."
    ///    c. "Pop all the nodes from the current node up to node, including node, then stop
    ///    these steps."
    /// 3. "Otherwise, if node is in the special category, then this is a parse error;
    ///    ignore the token, and return."
    /// 4. "Set node to the previous entry in the stack of open elements and return to
    ///    the step labeled loop."
    pub(in crate::parser) fn any_other_end_tag(&mut self, tag_name: &str) {
        let mut target = None;
        for entry in self.open_elements.iter().rev() {
            if entry.is_html(tag_name) {
                target = Some(entry.handle.clone());
                break;
            }
            if is_special(&entry.tag_name, entry.namespace) {
                break;
            }
        }

        let Some(node) = target else {
            self.parse_error(ErrorCode::EndTagWithoutMatchingOpenElement);
            return;
        };
        self.open_elements
            .generate_implied_end_tags_with_exclusion(tag_name);
        if self.current_node().is_none_or(|current| current.handle != node) {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until_element_popped(&node);
    }
}
