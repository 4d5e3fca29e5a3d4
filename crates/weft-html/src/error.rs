//! Parse errors and API errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Markup problems are never fatal. They are recorded as [`ParseError`]s and
//! the parser recovers the way the algorithm prescribes. Only misuse of the
//! streaming API is reported as a [`ParserError`].

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// The WHATWG parse error codes, plus the tree construction errors the
/// parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ErrorCode {
    // Input stream
    ControlCharacterInInputStream,
    NoncharacterInInputStream,
    SurrogateInInputStream,

    // Tokenizer
    AbruptClosingOfEmptyComment,
    AbruptDoctypePublicIdentifier,
    AbruptDoctypeSystemIdentifier,
    AbsenceOfDigitsInNumericCharacterReference,
    CdataInHtmlContent,
    CharacterReferenceOutsideUnicodeRange,
    ControlCharacterReference,
    DuplicateAttribute,
    EndTagWithAttributes,
    EndTagWithTrailingSolidus,
    EofBeforeTagName,
    EofInCdata,
    EofInComment,
    EofInDoctype,
    EofInScriptHtmlCommentLikeText,
    EofInTag,
    IncorrectlyClosedComment,
    IncorrectlyOpenedComment,
    InvalidCharacterSequenceAfterDoctypeName,
    InvalidFirstCharacterOfTagName,
    MissingAttributeValue,
    MissingDoctypeName,
    MissingDoctypePublicIdentifier,
    MissingDoctypeSystemIdentifier,
    MissingEndTagName,
    MissingQuoteBeforeDoctypePublicIdentifier,
    MissingQuoteBeforeDoctypeSystemIdentifier,
    MissingSemicolonAfterCharacterReference,
    MissingWhitespaceAfterDoctypePublicKeyword,
    MissingWhitespaceAfterDoctypeSystemKeyword,
    MissingWhitespaceBeforeDoctypeName,
    MissingWhitespaceBetweenAttributes,
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    NestedComment,
    NoncharacterCharacterReference,
    NullCharacterReference,
    SurrogateCharacterReference,
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    UnexpectedCharacterInAttributeName,
    UnexpectedCharacterInUnquotedAttributeValue,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedNullCharacter,
    UnexpectedQuestionMarkInsteadOfTagName,
    UnexpectedSolidusInTag,
    UnknownNamedCharacterReference,

    // Tree construction
    NonConformingDoctype,
    MisplacedDoctype,
    MissingDoctype,
    UnexpectedStartTag,
    UnexpectedEndTag,
    EndTagWithoutMatchingOpenElement,
    ClosingOfElementWithOpenChildElements,
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    MisplacedStartTagForHeadElement,
    AbandonedHeadElementChild,
    DisallowedContentInNoscriptInHead,
    NestedNoscriptInHead,
    MisplacedContentInTable,
    UnexpectedTextInTable,
    OpenElementsLeftAfterEof,
    EofInElementThatCanContainOnlyText,
    UnexpectedContentAfterBody,
    FormattingElementNotOpen,
    FormattingElementNotInScope,
    UnexpectedContentInForeignContent,
    MisplacedStartTagInSelect,
    UnexpectedContentInFrameset,
}

impl ErrorCode {
    /// The kebab-case code, e.g. `eof-in-tag`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A recoverable markup error and where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// What went wrong.
    pub code: ErrorCode,
    /// Offset (UTF-16 code units) of the code point or token that caused it.
    pub offset: usize,
}

impl ParseError {
    /// Create a parse error.
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

/// Misuse of the streaming parser API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParserError {
    /// `resume()` was called while the parser was not paused on a script.
    #[error("parser is not suspended")]
    NotSuspended,
    /// Input was supplied after the parser reached end of file.
    #[error("parser has already finished")]
    AlreadyFinished,
    /// A streaming call was made before `start()`.
    #[error("parser has not been started")]
    NotStarted,
}
