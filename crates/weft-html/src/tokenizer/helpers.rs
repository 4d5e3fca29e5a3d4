//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token"), with character coalescing
//! - RCDATA/RAWTEXT/script data helpers for end tag detection
//! - Attribute helpers for duplicate detection
//! - Parse error reporting

use weft_common::warning::log_once;

use super::core::{PendingCharacters, Tokenizer, TokenizerState};
use super::token::{CharacterKind, Location, Token};
use crate::error::{ErrorCode, ParseError};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Reconsume in the return state."
    pub(super) const fn reconsume_in_return_state(&mut self) {
        self.reconsume_in(self.return_state);
    }

    /// "Switch to the return state."
    pub(super) const fn switch_to_return_state(&mut self) {
        self.switch_to(self.return_state);
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input. Input stream errors raised by the
    /// preprocessor are recorded here.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.preprocessor.advance();
        if let Some(code) = self.preprocessor.take_error() {
            self.parse_error(code);
        }
        c
    }

    /// Consume `count` further code points of a keyword already matched with
    /// [`Preprocessor::matches_at_current`](crate::preprocessor::Preprocessor::matches_at_current).
    pub(super) fn consume_matched(&mut self, count: usize) {
        for _ in 0..count {
            let _ = self.consume();
        }
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "If the next few characters are..."
    ///
    /// Compares starting at the current input character.
    pub(super) fn next_few_characters_are(&self, target: &str, case_insensitive: bool) -> bool {
        self.preprocessor.matches_at_current(target, case_insensitive)
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    ///
    /// CR never reaches the tokenizer; the preprocessor normalizes it.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token"
    ///
    /// Any pending character run is queued first so that tokens keep source
    /// order.
    pub(super) fn emit_current_token(&mut self) {
        self.drop_duplicate_attribute();
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        self.flush_pending_characters();

        match &mut token {
            Token::StartTag { name, .. } => {
                // "The last start tag token emitted" drives appropriate end tag
                // detection in the RCDATA, RAWTEXT and script data states.
                self.last_start_tag_name = Some(name.clone());
            }
            Token::EndTag {
                attributes,
                self_closing,
                ..
            } => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !attributes.is_empty() {
                    self.parse_error(ErrorCode::EndTagWithAttributes);
                }
                // "When an end tag token is emitted with its self-closing flag set,
                // that is an end-tag-with-trailing-solidus parse error."
                if *self_closing {
                    self.parse_error(ErrorCode::EndTagWithTrailingSolidus);
                }
            }
            _ => {}
        }

        if self.options.location_info {
            token.set_location(Location::new(
                self.token_start,
                self.preprocessor.end_offset(),
            ));
        }
        log::trace!(target: "weft::tokenizer", "emit {token}");
        self.token_queue.push_back(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_current_character(&mut self, c: char) {
        let end = self.preprocessor.end_offset();
        self.emit_character(c, end);
    }

    /// Emit characters that were consumed before the current input character
    /// (the temporary buffer, a pending `<`, ...). The current input character
    /// is about to be reconsumed, so the run ends where it starts.
    pub(super) fn emit_characters_before_current(&mut self, s: &str) {
        let end = self.preprocessor.offset();
        for c in s.chars() {
            self.emit_character(c, end);
        }
    }

    /// Emit characters that end with the current input character.
    pub(super) fn emit_characters_through_current(&mut self, s: &str) {
        let end = self.preprocessor.end_offset();
        for c in s.chars() {
            self.emit_character(c, end);
        }
    }

    /// Add `c` to the pending character run, starting a new run when its class
    /// differs from the pending one.
    fn emit_character(&mut self, c: char, end: usize) {
        let kind = CharacterKind::of(c);
        if let Some(pending) = &mut self.pending_characters
            && pending.kind == kind
        {
            pending.data.push(c);
            pending.end = end;
            return;
        }
        self.flush_pending_characters();
        self.pending_characters = Some(PendingCharacters {
            kind,
            data: String::from(c),
            start: self.token_start,
            end,
        });
    }

    /// Queue the pending character run as a single token.
    pub(super) fn flush_pending_characters(&mut self) {
        let Some(pending) = self.pending_characters.take() else {
            return;
        };
        let mut token = Token::new_characters(pending.kind, pending.data);
        if self.options.location_info {
            token.set_location(Location::new(pending.start, pending.end));
        }
        self.token_queue.push_back(token);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.flush_pending_characters();
        self.current_attribute_is_duplicate = false;
        self.token_queue.push_back(Token::new_eof());
        self.at_eof = true;
    }
}

// =============================================================================
// RCDATA/RAWTEXT/Script Data Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// X state."
    ///
    /// Shared by the RCDATA, RAWTEXT, script data and script data escaped end
    /// tag name states.
    pub(super) fn end_tag_name_anything_else(&mut self, state: TokenizerState) {
        let mut literal = String::from("</");
        literal.push_str(&self.temporary_buffer);
        self.emit_characters_before_current(&literal);
        self.current_token = None;
        self.reconsume_in(state);
    }

    /// The "ASCII alpha" and terminator branches common to the RCDATA, RAWTEXT
    /// and script data end tag name states. Returns true if the character was
    /// handled.
    ///
    /// "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED, U+0020 SPACE
    ///   If the current end tag token is an appropriate end tag token, then switch
    ///   to the before attribute name state. Otherwise, treat it as per the
    ///   "anything else" entry below.
    /// U+002F SOLIDUS (/)
    ///   ... switch to the self-closing start tag state ...
    /// U+003E GREATER-THAN SIGN (>)
    ///   ... switch to the data state and emit the current tag token ...
    /// ASCII upper alpha
    ///   Append the lowercase version of the current input character to the
    ///   current tag token's tag name. Append the current input character to the
    ///   temporary buffer.
    /// ASCII lower alpha
    ///   Append the current input character to the current tag token's tag name.
    ///   Append the current input character to the temporary buffer."
    pub(super) fn end_tag_name_common(&mut self, c: Option<char>) -> bool {
        match c {
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
                true
            }
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
                true
            }
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
                true
            }
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(token) = &mut self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting
    /// the tag token, if appropriate), the complete attribute's name must be
    /// compared to the other attributes on the same token; if there is already
    /// an attribute on the token with the exact same name, then this is a
    /// duplicate-attribute parse error and the new attribute must be removed
    /// from the token."
    ///
    /// The attribute stays on the token until its value has been consumed so
    /// the value has somewhere to go; it is dropped by
    /// [`drop_duplicate_attribute`](Self::drop_duplicate_attribute).
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.parse_error(ErrorCode::DuplicateAttribute);
            self.current_attribute_is_duplicate = true;
        }
    }

    /// Remove the current attribute if it was marked as a duplicate.
    pub(super) fn drop_duplicate_attribute(&mut self) {
        if !std::mem::take(&mut self.current_attribute_is_duplicate) {
            return;
        }
        if let Some(token) = &mut self.current_token {
            token.remove_current_attribute();
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.drop_duplicate_attribute();
        if let Some(token) = &mut self.current_token {
            token.start_new_attribute();
        }
    }

    /// "Append the current input character to the current attribute's value."
    ///
    /// A no-op while the current attribute is a duplicate.
    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if self.current_attribute_is_duplicate {
            return;
        }
        if let Some(token) = &mut self.current_token {
            token.append_to_current_attribute_value(s);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error at the current input character. Parse errors are
    /// not fatal; the tokenizer recovers and continues. Each distinct code is
    /// logged once.
    pub(super) fn parse_error(&mut self, code: ErrorCode) {
        let offset = self.preprocessor.offset();
        let _ = log_once(log::Level::Debug, "HTML Tokenizer", code.as_str());
        self.errors.push(ParseError::new(code, offset));
    }
}
