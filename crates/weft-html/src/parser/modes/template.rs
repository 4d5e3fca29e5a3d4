//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use weft_dom::TreeAdapter;

use super::super::core::{InsertionMode, Parser};
use crate::error::ErrorCode;
use crate::tokenizer::Token;

impl<A: TreeAdapter> Parser<A> {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "A comment token"
            // "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { .. }
            | Token::WhitespaceCharacter { .. }
            | Token::NullCharacter { .. }
            | Token::Comment { .. }
            | Token::Doctype { .. } => self.process_using_rules_for(InsertionMode::InBody, token),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                // "Process the token using the rules for the "in head" insertion
                // mode."
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    self.process_using_rules_for(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is one of: "caption", "colgroup",
                // "tbody", "tfoot", "thead""
                "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => {
                    self.retarget_template_mode(InsertionMode::InTable, token);
                }

                // "A start tag whose tag name is "col""
                "col" => self.retarget_template_mode(InsertionMode::InColumnGroup, token),

                // "A start tag whose tag name is "tr""
                "tr" => self.retarget_template_mode(InsertionMode::InTableBody, token),

                // "A start tag whose tag name is one of: "td", "th""
                "td" | "th" => self.retarget_template_mode(InsertionMode::InRow, token),

                // "Any other start tag"
                _ => self.retarget_template_mode(InsertionMode::InBody, token),
            },

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error(ErrorCode::UnexpectedEndTag),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.open_elements.has_template() {
                    self.stop_parsing();
                    return;
                }
                // "Otherwise, this is a parse error."
                self.parse_error(ErrorCode::OpenElementsLeftAfterEof);
                // "Pop elements from the stack of open elements until a template
                // element has been popped from the stack. Clear the list of
                // active formatting elements up to the last marker. Pop the
                // current template insertion mode off the stack of template
                // insertion modes. Reset the insertion mode appropriately.
                // Reprocess the token."
                self.open_elements.pop_until_template_popped();
                self.active_formatting_elements.clear_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                self.process_token(token);
            }
        }
    }

    /// "Pop the current template insertion mode off the stack of template
    /// insertion modes. Push `mode` onto the stack of template insertion modes
    /// so that it is the new current template insertion mode. Switch the
    /// insertion mode to `mode`, and reprocess the token."
    fn retarget_template_mode(&mut self, mode: InsertionMode, token: &Token) {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.reprocess_in(mode, token);
    }
}
