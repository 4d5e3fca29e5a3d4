//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference parsing per § 13.2.5.72.
mod character_reference;
/// HTML tokenizer state machine implementation.
mod core;
/// Generated table of the named character references.
mod entities;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Markup declaration, DOCTYPE, comment and CDATA states.
mod markup;
/// Named character reference lookup trie per § 13.5.
pub mod named_character_references;
/// RCDATA, RAWTEXT, script data and PLAINTEXT states.
mod raw_text;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{Tokenizer, TokenizerOptions, TokenizerState};
pub use token::{Attribute, CharacterKind, Location, Token};

/// Run a tokenizer over `html` until end of file and collect every token,
/// the end-of-file token included.
///
/// A tokenizer on its own cannot know when a start tag opens raw text; this
/// switches the content model after `title`, `textarea`, `style`, `xmp`,
/// `iframe`, `noembed`, `noframes`, `script` and `plaintext` start tags the
/// way the tree constructor would.
///
/// ```
/// use weft_html::{Token, TokenizerOptions, tokenize};
///
/// let tokens = tokenize("<title>a<b></title>", TokenizerOptions::default());
/// assert!(tokens[0].is_start_tag("title"));
/// assert_eq!(tokens[1].character_data(), Some("a<b>"));
/// assert!(tokens[2].is_end_tag("title"));
/// assert_eq!(tokens[3], Token::EndOfFile);
/// ```
#[must_use]
pub fn tokenize(html: &str, options: TokenizerOptions) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(html, options);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        if let Token::StartTag { name, .. } = &token
            && let Some(state) = content_model_for(name)
        {
            tokenizer.set_state(state);
        }
        let eof = token.is_eof();
        tokens.push(token);
        if eof {
            return tokens;
        }
    }
}

/// The tokenizer state a start tag named `name` switches to, if any.
const fn content_model_for(name: &str) -> Option<TokenizerState> {
    match name.as_bytes() {
        b"title" | b"textarea" => Some(TokenizerState::RCDATA),
        b"style" | b"xmp" | b"iframe" | b"noembed" | b"noframes" => {
            Some(TokenizerState::RAWTEXT)
        }
        b"script" => Some(TokenizerState::ScriptData),
        b"plaintext" => Some(TokenizerState::PLAINTEXT),
        _ => None,
    }
}
