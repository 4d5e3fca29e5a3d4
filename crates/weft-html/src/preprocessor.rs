//! Input stream preprocessing.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! The input is held as UTF-16 code units so that offsets reported to
//! location tracking match what a script would see, and so that lone
//! surrogates fed through [`Preprocessor::write_utf16`] can be detected.
//!
//! Two normalizations collapse input code units into a single code point:
//! a CR LF pair (the LF is swallowed) and a surrogate pair (the low half is
//! swallowed). Each swallowed unit is recorded as a *gap* so that
//! [`Preprocessor::retreat`] steps back over exactly one logical code point.

use crate::error::ErrorCode;

const BOM: u16 = 0xFEFF;
const CARRIAGE_RETURN: u16 = 0x0D;
const LINE_FEED: u16 = 0x0A;

const fn is_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDFFF)
}

const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive." ASCII whitespace and U+0000
/// are not reported.
const fn is_control(c: char) -> bool {
    matches!(c, '\x01'..='\x08' | '\x0B' | '\x0E'..='\x1F' | '\x7F'..='\u{9F}')
}

/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, ... U+10FFFE, or U+10FFFF."
pub(crate) const fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    matches!(cp, 0xFDD0..=0xFDEF) || (cp & 0xFFFE) == 0xFFFE
}

/// A cursor over the input that yields normalized code points.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    /// The input, as UTF-16 code units.
    html: Vec<u16>,
    /// Number of code units consumed so far. The current code point ends
    /// at `cursor`.
    cursor: usize,
    /// Offset where the current code point starts.
    current_start: usize,
    /// Cursor value at which the most recent gap was recorded.
    last_gap: Option<usize>,
    /// Earlier gaps, innermost last.
    gap_stack: Vec<Option<usize>>,
    /// Set after a CR was turned into an LF, so a following LF is dropped.
    skip_next_new_line: bool,
    /// Input stream error raised by the last [`advance`](Self::advance).
    pending_error: Option<ErrorCode>,
    /// Offset of the last reported error, so re-reading after a retreat
    /// does not report it twice.
    last_error_offset: Option<usize>,
    /// End of the text inserted by consecutive writes. Reading clears it,
    /// so the next write starts again at the cursor.
    insertion_point: Option<usize>,
}

impl Preprocessor {
    /// Create a preprocessor over `html`.
    ///
    /// A leading U+FEFF BYTE ORDER MARK is skipped.
    #[must_use]
    pub fn new(html: &str) -> Self {
        let units: Vec<u16> = html.encode_utf16().collect();
        Self::from_utf16(units)
    }

    /// Create a preprocessor over raw UTF-16 input, which may contain lone
    /// surrogates.
    #[must_use]
    pub fn from_utf16(units: Vec<u16>) -> Self {
        let cursor = usize::from(units.first() == Some(&BOM));
        Self {
            html: units,
            cursor,
            current_start: cursor,
            last_gap: None,
            gap_stack: Vec::new(),
            skip_next_new_line: false,
            pending_error: None,
            last_error_offset: None,
            insertion_point: None,
        }
    }

    /// Insert `html` immediately after the current code point, so that it is
    /// read next (`document.write()` semantics).
    ///
    /// Writes made without reading in between are queued in call order:
    /// each one lands after the text of the previous one.
    pub fn write(&mut self, html: &str) {
        let units: Vec<u16> = html.encode_utf16().collect();
        self.write_utf16(&units);
    }

    /// [`write`](Self::write) for raw UTF-16 input.
    pub fn write_utf16(&mut self, units: &[u16]) {
        let at = self
            .insertion_point
            .unwrap_or(self.cursor)
            .min(self.html.len());
        let _ = self.html.splice(at..at, units.iter().copied());
        self.insertion_point = Some(at + units.len());
    }

    /// Consume and return the next code point, or `None` at end of input.
    ///
    /// CR and CR LF become LF; a surrogate pair becomes one code point;
    /// lone surrogates become U+FFFD REPLACEMENT CHARACTER.
    pub fn advance(&mut self) -> Option<char> {
        self.insertion_point = None;
        self.current_start = self.cursor;
        self.cursor += 1;
        if self.cursor > self.html.len() {
            self.current_start = self.html.len();
            return None;
        }

        let mut unit = self.html[self.cursor - 1];

        // "U+000D CARRIAGE RETURN (CR) code points ... followed by a U+000A LINE FEED
        // (LF) code point" are removed along with the pair's CR normalized away.
        if self.skip_next_new_line && unit == LINE_FEED {
            self.skip_next_new_line = false;
            self.add_gap();
            self.current_start = self.cursor;
            self.cursor += 1;
            if self.cursor > self.html.len() {
                self.current_start = self.html.len();
                return None;
            }
            unit = self.html[self.cursor - 1];
        }

        // "... every remaining U+000D CARRIAGE RETURN code point [is replaced]
        // with a U+000A LINE FEED (LF) code point."
        if unit == CARRIAGE_RETURN {
            self.skip_next_new_line = true;
            return Some('\n');
        }
        self.skip_next_new_line = false;

        let c = if is_surrogate(unit) {
            self.process_surrogate(unit)
        } else {
            char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
        };
        if is_control(c) {
            self.report(ErrorCode::ControlCharacterInInputStream);
        } else if is_noncharacter(c) {
            self.report(ErrorCode::NoncharacterInInputStream);
        }
        Some(c)
    }

    fn report(&mut self, code: ErrorCode) {
        if self
            .last_error_offset
            .is_some_and(|last| self.current_start <= last)
        {
            return;
        }
        self.last_error_offset = Some(self.current_start);
        self.pending_error = Some(code);
    }

    /// Take the input stream error raised while reading the current code
    /// point, if any.
    pub fn take_error(&mut self) -> Option<ErrorCode> {
        self.pending_error.take()
    }

    fn process_surrogate(&mut self, high: u16) -> char {
        if is_high_surrogate(high)
            && let Some(&low) = self.html.get(self.cursor)
            && is_low_surrogate(low)
        {
            self.cursor += 1;
            self.add_gap();
            let code_point =
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
        // A lone surrogate cannot be represented and stands in as U+FFFD.
        self.report(ErrorCode::SurrogateInInputStream);
        char::REPLACEMENT_CHARACTER
    }

    fn add_gap(&mut self) {
        self.gap_stack.push(self.last_gap);
        self.last_gap = Some(self.cursor);
    }

    /// Unread the current code point. The next [`advance`](Self::advance)
    /// returns it again.
    pub fn retreat(&mut self) {
        self.insertion_point = None;
        if self.last_gap == Some(self.cursor) {
            self.last_gap = self.gap_stack.pop().flatten();
            self.cursor -= 1;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.skip_next_new_line = false;
    }

    /// Offset (in code units) where the current code point starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.current_start
    }

    /// Offset just past the current code point.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.cursor.min(self.html.len())
    }

    /// Total length of the buffered input in code units.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.html.len()
    }

    /// Whether the buffered input is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Whether the input starting at the current code point matches
    /// `pattern` (ASCII only).
    #[must_use]
    pub fn matches_at_current(&self, pattern: &str, case_insensitive: bool) -> bool {
        let start = self.current_start;
        pattern.bytes().enumerate().all(|(i, expected)| {
            self.html.get(start + i).is_some_and(|&unit| {
                let Ok(byte) = u8::try_from(unit) else {
                    return false;
                };
                if case_insensitive {
                    byte.eq_ignore_ascii_case(&expected)
                } else {
                    byte == expected
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(pre: &mut Preprocessor) -> String {
        let mut out = String::new();
        while let Some(c) = pre.advance() {
            out.push(c);
        }
        out
    }

    #[test]
    fn normalizes_newlines() {
        let mut pre = Preprocessor::new("a\r\nb\rc\n\rd");
        assert_eq!(drain(&mut pre), "a\nb\nc\n\nd");
    }

    #[test]
    fn skips_leading_bom_only() {
        let mut pre = Preprocessor::new("\u{FEFF}a\u{FEFF}");
        assert_eq!(drain(&mut pre), "a\u{FEFF}");
    }

    #[test]
    fn combines_surrogate_pairs() {
        let mut pre = Preprocessor::new("x\u{1F600}y");
        assert_eq!(pre.advance(), Some('x'));
        assert_eq!(pre.advance(), Some('\u{1F600}'));
        assert_eq!(pre.offset(), 1);
        assert_eq!(pre.end_offset(), 3);
        assert_eq!(pre.advance(), Some('y'));
        assert_eq!(pre.offset(), 3);
    }

    #[test]
    fn lone_surrogates_become_replacement_characters() {
        let mut pre = Preprocessor::from_utf16(vec![0x61, 0xD800, 0x62, 0xDC00]);
        assert_eq!(drain(&mut pre), "a\u{FFFD}b\u{FFFD}");
    }

    #[test]
    fn retreat_then_advance_is_symmetric() {
        let input = "a\r\n\u{1F600}\r\nb";
        let mut reference = Preprocessor::new(input);
        let expected = drain(&mut reference);

        // Advance k code points, retreat k, and read everything again.
        for k in 1..=expected.chars().count() {
            let mut pre = Preprocessor::new(input);
            let mut first = Vec::new();
            for _ in 0..k {
                first.push(pre.advance());
            }
            for _ in 0..k {
                pre.retreat();
            }
            let mut second = Vec::new();
            for _ in 0..k {
                second.push(pre.advance());
            }
            assert_eq!(first, second, "mismatch after retreating {k}");
        }
    }

    #[test]
    fn consecutive_writes_keep_their_order() {
        let mut pre = Preprocessor::new("ab");
        assert_eq!(pre.advance(), Some('a'));
        pre.write("1");
        pre.write("23");
        assert_eq!(drain(&mut pre), "123b");
    }

    #[test]
    fn write_after_reading_starts_at_the_cursor() {
        let mut pre = Preprocessor::new("ab");
        assert_eq!(pre.advance(), Some('a'));
        pre.write("12");
        assert_eq!(pre.advance(), Some('1'));
        pre.write("x");
        assert_eq!(drain(&mut pre), "x2b");
    }

    #[test]
    fn retreat_over_surrogate_pair_returns_same_code_point() {
        let mut pre = Preprocessor::new("\u{1F600}!");
        assert_eq!(pre.advance(), Some('\u{1F600}'));
        assert_eq!(pre.advance(), Some('!'));
        pre.retreat();
        pre.retreat();
        assert_eq!(pre.advance(), Some('\u{1F600}'));
        assert_eq!(pre.advance(), Some('!'));
        assert_eq!(pre.advance(), None);
    }

    #[test]
    fn reports_input_stream_errors_once() {
        let mut pre = Preprocessor::from_utf16(vec![0x01, 0xD800, 0xFDD0]);
        assert_eq!(pre.advance(), Some('\u{1}'));
        assert_eq!(pre.take_error(), Some(ErrorCode::ControlCharacterInInputStream));
        pre.retreat();
        let _ = pre.advance();
        assert_eq!(pre.take_error(), None);
        let _ = pre.advance();
        assert_eq!(pre.take_error(), Some(ErrorCode::SurrogateInInputStream));
        let _ = pre.advance();
        assert_eq!(pre.take_error(), Some(ErrorCode::NoncharacterInInputStream));
    }

    #[test]
    fn write_inserts_after_current_code_point() {
        let mut pre = Preprocessor::new("ad");
        assert_eq!(pre.advance(), Some('a'));
        pre.write("bc");
        assert_eq!(drain(&mut pre), "bcd");
    }

    #[test]
    fn matches_pattern_at_current_code_point() {
        let mut pre = Preprocessor::new("<!DocType html>");
        let _ = pre.advance();
        let _ = pre.advance();
        let _ = pre.advance();
        assert!(pre.matches_at_current("doctype", true));
        assert!(!pre.matches_at_current("doctype", false));
        assert!(!pre.matches_at_current("DOCTYPE html> and more", true));
    }
}
