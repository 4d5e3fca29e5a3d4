//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! to [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
//!
//! Named references are matched against [`ENTITY_TRIE`]. The match needs
//! lookahead past the longest name, so code points read beyond the match are
//! handed back to the preprocessor with
//! [`Preprocessor::retreat`](crate::preprocessor::Preprocessor::retreat).

use super::core::{Tokenizer, TokenizerState};
use super::named_character_references::{ENTITY_TRIE, EntityTrie};
use crate::error::ErrorCode;
use crate::preprocessor::is_noncharacter;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Replacements for C1 control character references, as decoded by
/// windows-1252.
const C1_REPLACEMENTS: [(u32, u32); 27] = [
    (0x80, 0x20AC),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8E, 0x017D),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

const MAX_CODE_POINT: u32 = 0x10_FFFF;

impl Tokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self, c: Option<char>) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match c {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Flush code points consumed as a character reference. Reconsume in
            // the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference(false);
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the named character references
    /// table. Append each character to the temporary buffer when it's
    /// consumed."
    pub(super) fn handle_named_character_reference_state(&mut self, c: Option<char>) {
        let trie = &*ENTITY_TRIE;
        let mut node = EntityTrie::ROOT;
        let mut consumed = 0;
        // (code points, temporary buffer length, replacement) of the longest name.
        let mut matched: Option<(usize, usize, &'static str)> = None;
        let mut current = c;
        let mut current_in_buffer = false;

        while let Some(ch) = current {
            let Some(next) = trie.child(node, ch) else {
                break;
            };
            node = next;
            self.temporary_buffer.push(ch);
            consumed += 1;
            if let Some(value) = trie.value(node) {
                matched = Some((consumed, self.temporary_buffer.len(), value));
                if ch == ';' {
                    current_in_buffer = true;
                    break;
                }
            }
            current = self.consume();
        }

        let Some((matched_len, buffer_len, value)) = matched else {
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            // Nothing past the `&` belongs to a name.
            for _ in 0..=consumed {
                self.preprocessor.retreat();
            }
            self.temporary_buffer.truncate(1);
            self.flush_code_points_consumed_as_character_reference(true);
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // Hand back everything read past the matched name.
        let overshoot = consumed - matched_len + usize::from(!current_in_buffer);
        for _ in 0..overshoot {
            self.preprocessor.retreat();
        }
        let next_input_character = if consumed > matched_len {
            self.temporary_buffer[buffer_len..].chars().next()
        } else if current_in_buffer {
            None
        } else {
            current
        };
        self.temporary_buffer.truncate(buffer_len);
        let ends_with_semicolon = self.temporary_buffer.ends_with(';');

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=) or
        // an ASCII alphanumeric, then, for historical reasons, flush code points
        // consumed as a character reference and switch to the return state."
        if self.is_consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && next_input_character.is_some_and(|n| n == '=' || n.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference(true);
            self.switch_to_return_state();
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
        }
        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name (as given by
        // the second column of the named character references table) to the
        // temporary buffer. Flush code points consumed as a character reference.
        // Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(value);
        self.flush_code_points_consumed_as_character_reference(true);
        self.switch_to_return_state();
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self, c: Option<char>) {
        match c {
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    let mut buf = [0; 4];
                    self.append_to_attribute_value(c.encode_utf8(&mut buf));
                } else {
                    self.emit_current_character(c);
                }
            }
            Some(';') => {
                self.parse_error(ErrorCode::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            _ => self.reconsume_in_return_state(),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self, c: Option<char>) {
        self.character_reference_code = 0;
        match c {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self, c: Option<char>) {
        if c.is_some_and(|c| c.is_ascii_hexdigit()) {
            self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self, c: Option<char>) {
        if c.is_some_and(|c| c.is_ascii_digit()) {
            self.reconsume_in(TokenizerState::DecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse
    /// error. Flush code points consumed as a character reference. Reconsume in
    /// the return state."
    fn absence_of_digits(&mut self) {
        self.parse_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference(false);
        self.reconsume_in_return_state();
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self, c: Option<char>) {
        match c.and_then(|c| c.to_digit(16)) {
            Some(digit) => self.accumulate_character_reference_code(16, digit),
            None => self.finish_numeric_character_reference(c),
        }
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self, c: Option<char>) {
        match c.and_then(|c| c.to_digit(10)) {
            Some(digit) => self.accumulate_character_reference_code(10, digit),
            None => self.finish_numeric_character_reference(c),
        }
    }

    /// "Multiply the character reference code by 16 (or 10) ... Add a numeric
    /// version of the current input character ... to the character reference
    /// code."
    ///
    /// Once the code is out of range it stays out of range.
    const fn accumulate_character_reference_code(&mut self, radix: u32, digit: u32) {
        if self.character_reference_code <= MAX_CODE_POINT {
            self.character_reference_code = self.character_reference_code * radix + digit;
        }
    }

    /// "U+003B SEMICOLON
    ///   Switch to the numeric character reference end state.
    /// Anything else
    ///   This is a missing-semicolon-after-character-reference parse error.
    ///   Reconsume in the numeric character reference end state."
    fn finish_numeric_character_reference(&mut self, c: Option<char>) {
        if c == Some(';') {
            self.handle_numeric_character_reference_end_state(true);
            self.switch_to_return_state();
        } else {
            self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
            self.handle_numeric_character_reference_end_state(false);
            self.reconsume_in_return_state();
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Checks the character reference code and flushes the resulting code
    /// point. The caller picks the return state transition. `through_current`
    /// tells whether the current input character (a `;`) is part of the
    /// reference.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self, through_current: bool) {
        let mut code = self.character_reference_code;

        if code == 0 {
            // "This is a null-character-reference parse error."
            self.parse_error(ErrorCode::NullCharacterReference);
            code = 0xFFFD;
        } else if code > MAX_CODE_POINT {
            self.parse_error(ErrorCode::CharacterReferenceOutsideUnicodeRange);
            code = 0xFFFD;
        } else if (0xD800..=0xDFFF).contains(&code) {
            self.parse_error(ErrorCode::SurrogateCharacterReference);
            code = 0xFFFD;
        } else if char::from_u32(code).is_some_and(is_noncharacter) {
            self.parse_error(ErrorCode::NoncharacterCharacterReference);
        } else if code == 0x0D || (is_control_code(code) && !is_whitespace_code(code)) {
            // "If the number is one of the numbers in the first column of the
            // following table, then find the row with that number in the first
            // column, and set the character reference code to the number in the
            // second column of that row."
            self.parse_error(ErrorCode::ControlCharacterReference);
            if let Some(&(_, replacement)) = C1_REPLACEMENTS.iter().find(|&&(from, _)| from == code) {
                code = replacement;
            }
        }

        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        self.flush_code_points_consumed_as_character_reference(through_current);
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#charref-in-attribute)
    ///
    /// "A character reference is said to be consumed as part of an attribute if
    /// the return state is either attribute value (double-quoted) state,
    /// attribute value (single-quoted) state or attribute value (unquoted)
    /// state."
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "When a state says to flush code points consumed as a character
    /// reference, it means that for each code point in the temporary buffer (in
    /// the order they were added to the buffer) user agent must append the code
    /// point from the buffer to the current attribute's value if the character
    /// reference was consumed as part of an attribute, or emit the code point
    /// as a character token otherwise."
    pub(super) fn flush_code_points_consumed_as_character_reference(
        &mut self,
        through_current: bool,
    ) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            self.append_to_attribute_value(&buffer);
        } else if through_current {
            self.emit_characters_through_current(&buffer);
        } else {
            self.emit_characters_before_current(&buffer);
        }
    }
}

/// C0 controls and U+007F to U+009F.
const fn is_control_code(code: u32) -> bool {
    code <= 0x1F || matches!(code, 0x7F..=0x9F)
}

const fn is_whitespace_code(code: u32) -> bool {
    matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c1_table_is_sorted_and_unique() {
        assert!(C1_REPLACEMENTS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn whitespace_controls_are_not_reported() {
        assert!(is_control_code(0x09));
        assert!(is_whitespace_code(0x09));
        assert!(is_control_code(0x01));
        assert!(!is_whitespace_code(0x01));
        assert!(is_control_code(0x80));
        assert!(!is_control_code(0xA0));
    }
}
