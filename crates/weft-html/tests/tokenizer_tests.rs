//! Integration tests for the HTML tokenizer.

use weft_html::{
    ErrorCode, Location, Token, Tokenizer, TokenizerOptions, TokenizerState, tokenize,
};

/// Helper to tokenize with default options.
fn tokens(html: &str) -> Vec<Token> {
    tokenize(html, TokenizerOptions::default())
}

/// Helper to join the data of every character token.
fn text(tokens: &[Token]) -> String {
    tokens.iter().filter_map(Token::character_data).collect()
}

/// Helper to collect the codes of every tokenizer error for `html`.
fn error_codes(html: &str) -> Vec<ErrorCode> {
    let mut tokenizer = Tokenizer::new(html, TokenizerOptions::default());
    while !tokenizer.next_token().is_eof() {}
    tokenizer.errors().iter().map(|error| error.code).collect()
}

// ========== tags ==========

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokens(r#"<DIV Class="a" id='b' hidden data-x=1>"#);
    let Token::StartTag {
        name,
        attributes,
        self_closing,
        ..
    } = &tokens[0]
    else {
        panic!("expected a start tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "div");
    assert!(!self_closing);
    let pairs: Vec<(&str, &str)> = attributes
        .iter()
        .map(|attr| (attr.name.as_str(), attr.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [("class", "a"), ("id", "b"), ("hidden", ""), ("data-x", "1")]
    );
    assert_eq!(tokens[1], Token::EndOfFile);
}

#[test]
fn test_self_closing_flag() {
    let tokens = tokens("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokens("<p id=a id=b>");
    assert_eq!(tokens[0].get_attribute("id"), Some("a"));
    assert_eq!(tokens[0].attributes().len(), 1);
    assert_eq!(error_codes("<p id=a id=b>"), [ErrorCode::DuplicateAttribute]);
}

#[test]
fn test_duplicate_attribute_value_is_discarded() {
    let tokens = tokens(r#"<p a=1 a="2&amp;3" b=4 a>"#);
    let pairs: Vec<(&str, &str)> = tokens[0]
        .attributes()
        .iter()
        .map(|attr| (attr.name.as_str(), attr.value.as_str()))
        .collect();
    assert_eq!(pairs, [("a", "1"), ("b", "4")]);
    assert_eq!(
        error_codes(r#"<p a=1 a="2&amp;3" b=4 a>"#),
        [ErrorCode::DuplicateAttribute, ErrorCode::DuplicateAttribute]
    );
}

#[test]
fn test_end_tag() {
    let tokens = tokens("</Span>");
    assert!(tokens[0].is_end_tag("span"));
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    assert_eq!(error_codes("</p class=x>"), [ErrorCode::EndTagWithAttributes]);
}

#[test]
fn test_less_than_before_non_letter_is_text() {
    let tokens = tokens("a < b");
    assert_eq!(text(&tokens), "a < b");
    assert_eq!(
        error_codes("a < b"),
        [ErrorCode::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokens("<div class=");
    assert_eq!(tokens, [Token::EndOfFile]);
    assert_eq!(error_codes("<div class="), [ErrorCode::EofInTag]);
}

// ========== character tokens ==========

#[test]
fn test_character_classes_are_separate_tokens() {
    let tokens = tokens("a b");
    assert!(matches!(&tokens[0], Token::Character { data, .. } if data == "a"));
    assert!(matches!(&tokens[1], Token::WhitespaceCharacter { data, .. } if data == " "));
    assert!(matches!(&tokens[2], Token::Character { data, .. } if data == "b"));
}

#[test]
fn test_null_character_in_data() {
    let tokens = tokens("a\0b");
    assert!(
        tokens
            .iter()
            .any(|token| matches!(token, Token::NullCharacter { data, .. } if data == "\0"))
    );
    assert_eq!(error_codes("a\0b"), [ErrorCode::UnexpectedNullCharacter]);
}

#[test]
fn test_crlf_is_normalized() {
    assert_eq!(text(&tokens("a\r\nb\rc")), "a\nb\nc");
}

// ========== comments and doctypes ==========

#[test]
fn test_comment() {
    let tokens = tokens("<!-- hi -->");
    assert!(matches!(&tokens[0], Token::Comment { data, .. } if data == " hi "));
}

#[test]
fn test_bogus_comment_from_question_mark() {
    let tokens = tokens("<?xml version?>");
    assert!(matches!(&tokens[0], Token::Comment { data, .. } if data == "?xml version?"));
    assert_eq!(
        error_codes("<?xml version?>"),
        [ErrorCode::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

#[test]
fn test_abrupt_empty_comment() {
    let tokens = tokens("<!-->");
    assert!(matches!(&tokens[0], Token::Comment { data, .. } if data.is_empty()));
    assert_eq!(error_codes("<!-->"), [ErrorCode::AbruptClosingOfEmptyComment]);
}

#[test]
fn test_doctype_html() {
    let tokens = tokens("<!DOCTYPE html>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
            location: None,
        }
    );
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokens(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    let Token::Doctype {
        name,
        public_identifier,
        system_identifier,
        force_quirks,
        ..
    } = &tokens[0]
    else {
        panic!("expected a doctype, got {:?}", tokens[0]);
    };
    assert_eq!(name.as_deref(), Some("html"));
    assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
    assert_eq!(
        system_identifier.as_deref(),
        Some("http://www.w3.org/TR/html4/strict.dtd")
    );
    assert!(!force_quirks);
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokens("<!DOCTYPE>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype { name: None, force_quirks: true, .. }
    ));
    assert_eq!(error_codes("<!DOCTYPE>"), [ErrorCode::MissingDoctypeName]);
}

// ========== character references ==========

#[test]
fn test_named_references() {
    assert_eq!(text(&tokens("&lt;&amp;&gt;&nbsp;")), "<&>\u{A0}");
}

#[test]
fn test_longest_named_reference_wins() {
    assert_eq!(text(&tokens("&notin;")), "\u{2209}");
}

#[test]
fn test_legacy_reference_without_semicolon() {
    assert_eq!(text(&tokens("&notit;")), "\u{AC}it;");
    assert_eq!(
        error_codes("&notit;"),
        [ErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_unknown_named_reference_is_literal() {
    assert_eq!(text(&tokens("&bogus;")), "&bogus;");
    assert_eq!(
        error_codes("&bogus;"),
        [ErrorCode::UnknownNamedCharacterReference]
    );
}

#[test]
fn test_legacy_reference_in_attribute_before_alphanumeric() {
    let tokens = tokens(r#"<a href="?x=1&not=2&amp;y">"#);
    assert_eq!(tokens[0].get_attribute("href"), Some("?x=1&not=2&y"));
}

#[test]
fn test_numeric_references() {
    assert_eq!(text(&tokens("&#65;&#x42;&#X43;")), "ABC");
}

#[test]
fn test_numeric_reference_replacements() {
    // C1 controls map through the Windows-1252 table.
    assert_eq!(text(&tokens("&#x80;")), "\u{20AC}");
    assert_eq!(text(&tokens("&#0;")), "\u{FFFD}");
    assert_eq!(text(&tokens("&#x110000;")), "\u{FFFD}");
    assert_eq!(error_codes("&#0;"), [ErrorCode::NullCharacterReference]);
    assert_eq!(
        error_codes("&#x110000;"),
        [ErrorCode::CharacterReferenceOutsideUnicodeRange]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(text(&tokens("&#;")), "&#;");
    assert_eq!(
        error_codes("&#;"),
        [ErrorCode::AbsenceOfDigitsInNumericCharacterReference]
    );
}

#[test]
fn test_entity_decoding_can_be_disabled() {
    let options = TokenizerOptions::default().with_decode_html_entities(false);
    let tokens = tokenize("a&amp;b", options);
    assert_eq!(text(&tokens), "a&amp;b");
}

// ========== text states ==========

#[test]
fn test_rcdata_only_ends_at_appropriate_end_tag() {
    let tokens = tokens("<textarea></div>&amp;</textarea>");
    assert!(tokens[0].is_start_tag("textarea"));
    assert_eq!(text(&tokens), "</div>&");
    assert!(tokens.iter().any(|token| token.is_end_tag("textarea")));
}

#[test]
fn test_rawtext_does_not_decode_references() {
    let tokens = tokens("<style>a &amp; <b></style>");
    assert_eq!(text(&tokens), "a &amp; <b>");
}

#[test]
fn test_script_data_escapes() {
    let html = "<script><!--<script></script>--></script>";
    let tokens = tokens(html);
    assert_eq!(text(&tokens), "<!--<script></script>-->");
    let end_tags = tokens.iter().filter(|token| token.is_end_tag("script")).count();
    assert_eq!(end_tags, 1);
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokens("<plaintext></plaintext><b>");
    assert_eq!(text(&tokens), "</plaintext><b>");
}

#[test]
fn test_state_can_be_set_directly() {
    let mut tokenizer = Tokenizer::new("x</title>y", TokenizerOptions::default());
    tokenizer.set_state(TokenizerState::RCDATA);
    tokenizer.set_last_start_tag_name("title");
    assert_eq!(tokenizer.next_token().character_data(), Some("x"));
    assert!(tokenizer.next_token().is_end_tag("title"));
    assert_eq!(tokenizer.state(), TokenizerState::Data);
}

#[test]
fn test_cdata_only_in_foreign_content() {
    assert_eq!(error_codes("<![CDATA[x]]>"), [ErrorCode::CdataInHtmlContent]);

    let mut tokenizer = Tokenizer::new("<![CDATA[a<b]]>", TokenizerOptions::default());
    tokenizer.set_allow_cdata(true);
    assert_eq!(tokenizer.next_token().character_data(), Some("a<b"));
}

// ========== locations ==========

#[test]
fn test_locations_cover_each_token() {
    let options = TokenizerOptions::default().with_location_info(true);
    let tokens = tokenize("<p>Hi</p>", options);
    assert_eq!(tokens[0].location(), Some(Location::new(0, 3)));
    assert_eq!(tokens[1].location(), Some(Location::new(3, 5)));
    assert_eq!(tokens[2].location(), Some(Location::new(5, 9)));
    assert_eq!(tokens[3].location(), None);
}

#[test]
fn test_locations_are_off_by_default() {
    assert!(tokens("<p>Hi").iter().all(|token| token.location().is_none()));
}

#[test]
fn test_document_write_inserts_at_cursor() {
    let mut tokenizer = Tokenizer::new("<a>z", TokenizerOptions::default());
    assert!(tokenizer.next_token().is_start_tag("a"));
    tokenizer.write("<b>");
    assert!(tokenizer.next_token().is_start_tag("b"));
    assert_eq!(tokenizer.next_token().character_data(), Some("z"));
}

#[test]
fn test_is_at_eof_after_end_of_file_token() {
    let mut tokenizer = Tokenizer::new("a", TokenizerOptions::default());
    assert!(!tokenizer.is_at_eof());
    assert_eq!(tokenizer.next_token().character_data(), Some("a"));
    assert!(tokenizer.next_token().is_eof());
    assert!(tokenizer.is_at_eof());
}

#[test]
fn test_tokens_serialize_as_tagged_json() {
    let tokens = tokens("<p>x");
    assert_eq!(
        serde_json::to_value(&tokens[0]).unwrap(),
        serde_json::json!({
            "type": "StartTag",
            "name": "p",
            "self_closing": false,
            "attributes": [],
            "location": null,
        })
    );
    assert_eq!(
        serde_json::to_value(&tokens[2]).unwrap(),
        serde_json::json!({ "type": "EndOfFile" })
    );
}
