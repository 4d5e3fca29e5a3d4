use serde::{Deserialize, Serialize};
use strum_macros::Display;

use weft_common::warning::log_once;
use weft_dom::{Location, Namespace, NodeLocation, QuirksMode, TreeAdapter};

use super::formatting_elements::FormattingElementList;
use super::open_elements::{OpenElementStack, StackEntry};
use crate::error::{ErrorCode, ParseError, ParserError};
use crate::tokenizer::{Token, Tokenizer, TokenizerOptions, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Tree construction options.
///
/// ```
/// use weft_html::ParserOptions;
///
/// let options = ParserOptions::default().with_location_info(true);
/// assert!(options.scripting_enabled);
/// assert!(!options.suspend_on_script);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated when the parser was created."
    ///
    /// Decides whether `<noscript>` is raw text.
    pub scripting_enabled: bool,
    /// Record a [`NodeLocation`] on every node.
    pub location_info: bool,
    /// Decode character references.
    pub decode_html_entities: bool,
    /// Pause after each `</script>` so the caller can run it and
    /// `document_write()` into the input.
    pub suspend_on_script: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            location_info: false,
            decode_html_entities: true,
            suspend_on_script: false,
        }
    }
}

impl ParserOptions {
    /// Set [`scripting_enabled`](Self::scripting_enabled).
    #[must_use]
    pub const fn with_scripting_enabled(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Set [`location_info`](Self::location_info).
    #[must_use]
    pub const fn with_location_info(mut self, location_info: bool) -> Self {
        self.location_info = location_info;
        self
    }

    /// Set [`decode_html_entities`](Self::decode_html_entities).
    #[must_use]
    pub const fn with_decode_html_entities(mut self, decode: bool) -> Self {
        self.decode_html_entities = decode;
        self
    }

    /// Set [`suspend_on_script`](Self::suspend_on_script).
    #[must_use]
    pub const fn with_suspend_on_script(mut self, suspend: bool) -> Self {
        self.suspend_on_script = suspend;
        self
    }

    /// The tokenizer options implied by these parser options.
    #[must_use]
    pub const fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions {
            decode_html_entities: self.decode_html_entities,
            location_info: self.location_info,
        }
    }
}

/// Where the token loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStatus<H> {
    /// A `</script>` was processed; the parser waits for
    /// [`Parser::resume`].
    Suspended {
        /// The script element that was just closed.
        script: H,
    },
    /// End of file was reached.
    Finished,
}

/// What a finished parse hands back.
#[derive(Debug)]
pub struct ParseResult<A: TreeAdapter> {
    /// The tree the nodes were built in.
    pub adapter: A,
    /// The document, or the fragment holding the parsed nodes.
    pub root: A::Handle,
    /// Every parse error, tokenizer and tree construction alike, in input order.
    pub errors: Vec<ParseError>,
    /// The document's mode.
    pub quirks_mode: QuirksMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lifecycle {
    NotStarted,
    Running,
    Suspended,
    Finished,
}

/// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
///
/// An adjusted insertion location: inside `parent`, before `before` or at
/// the end.
#[derive(Debug, Clone)]
pub(super) struct InsertionPlace<H> {
    pub(super) parent: H,
    pub(super) before: Option<H>,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser. It pulls tokens from its [`Tokenizer`] one at a time and
/// builds the tree through a [`TreeAdapter`].
///
/// ```
/// use weft_dom::DomTree;
/// use weft_html::{Parser, ParserOptions};
///
/// let result = Parser::new(DomTree::new(), ParserOptions::default()).parse("<p>Hi");
/// let body = result.adapter.body().unwrap();
/// assert_eq!(result.adapter.text_content(body), "Hi");
/// ```
pub struct Parser<A: TreeAdapter> {
    pub(super) adapter: A,
    pub(super) options: ParserOptions,
    pub(super) tokenizer: Tokenizer,
    pub(super) document: A::Handle,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set."
    pub(super) original_insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) open_elements: OpenElementStack<A::Handle>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: FormattingElementList<A::Handle>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element: Option<A::Handle>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element: Option<A::Handle>,

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    /// The context element when parsing a fragment.
    pub(super) fragment_context: Option<StackEntry<A::Handle>>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    /// "The pending table character tokens"
    pub(super) pending_table_characters: Vec<Token>,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: a newline right after
    /// the start tag is dropped.
    pub(super) skip_next_newline: bool,

    /// [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    /// Whether the self-closing flag of the token being processed was
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,

    pub(super) errors: Vec<ParseError>,
    pub(super) lifecycle: Lifecycle,
    pub(super) stopped: bool,

    /// The script element the parser is paused on.
    pub(super) pending_script: Option<A::Handle>,

    /// Span of the token being processed.
    pub(super) current_location: Option<Location>,
}

impl<A: TreeAdapter> Parser<A> {
    /// Create a parser that builds into `adapter`.
    #[must_use]
    pub fn new(mut adapter: A, options: ParserOptions) -> Self {
        let document = adapter.create_document();
        Self {
            adapter,
            options,
            tokenizer: Tokenizer::new("", options.tokenizer_options()),
            document,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: InsertionMode::Initial,
            template_insertion_modes: Vec::new(),
            open_elements: OpenElementStack::new(options.location_info),
            active_formatting_elements: FormattingElementList::new(),
            head_element: None,
            form_element: None,
            fragment_context: None,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_characters: Vec::new(),
            skip_next_newline: false,
            self_closing_acknowledged: false,
            errors: Vec::new(),
            lifecycle: Lifecycle::NotStarted,
            stopped: false,
            pending_script: None,
            current_location: None,
        }
    }

    /// The options this parser was built with.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The tree built so far.
    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse a complete document. Scripts never pause the parse.
    #[must_use]
    pub fn parse(mut self, html: &str) -> ParseResult<A> {
        self.options.suspend_on_script = false;
        let _ = self.start(html);
        self.finish()
    }

    /// [§ 13.2.10 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Parse `html` as the contents of `context`. Without a context the
    /// fragment is parsed as the contents of a `<template>`. The result's
    /// `root` is a document fragment holding the parsed nodes.
    #[must_use]
    pub fn parse_fragment(mut self, html: &str, context: Option<A::Handle>) -> ParseResult<A> {
        self.options.suspend_on_script = false;

        // STEP 1-3: "Create a new Document node, and mark it as being an HTML
        //           document. ... Create a new HTML parser..."
        let context = context.unwrap_or_else(|| {
            self.adapter
                .create_element("template", Namespace::Html, Vec::new())
        });
        let context = StackEntry::new(
            context.clone(),
            &self.adapter.get_tag_name(&context),
            self.adapter.get_namespace_uri(&context),
            &self.adapter.get_attr_list(&context),
        );

        self.tokenizer = Tokenizer::new(html, self.options.tokenizer_options());

        // STEP 4: "Set the state of the HTML parser's tokenization stage as
        //         follows, switching on the context element:"
        if context.namespace == Namespace::Html {
            let state = match context.tag_name.as_str() {
                "title" | "textarea" => Some(TokenizerState::RCDATA),
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                    Some(TokenizerState::RAWTEXT)
                }
                "noscript" if self.options.scripting_enabled => Some(TokenizerState::RAWTEXT),
                "script" => Some(TokenizerState::ScriptData),
                "plaintext" => Some(TokenizerState::PLAINTEXT),
                _ => None,
            };
            if let Some(state) = state {
                self.tokenizer.set_state(state);
            }
        }
        self.tokenizer.set_last_start_tag_name(&context.tag_name);

        // STEP 5-7: "Let root be a new html element with no attributes. Append
        //           the element root to the Document node created above. Set
        //           up the parser's stack of open elements so that it contains
        //           just the single element root."
        let root = self
            .adapter
            .create_element("html", Namespace::Html, Vec::new());
        self.adapter.append_child(&self.document, &root);
        self.open_elements
            .push(StackEntry::new(root.clone(), "html", Namespace::Html, &[]));

        // STEP 8: "If the context element is a template element, then push "in
        //         template" onto the stack of template insertion modes."
        if context.is_html("template") {
            self.template_insertion_modes
                .push(InsertionMode::InTemplate);
        }

        // STEP 10: "Reset the parser's insertion mode appropriately."
        self.fragment_context = Some(context.clone());
        self.reset_insertion_mode_appropriately();

        // STEP 11: "Set the parser's form element pointer to the nearest node
        //          to the context element that is a form element."
        let mut node = Some(context.handle);
        while let Some(current) = node {
            if self.adapter.is_element_node(&current)
                && self.adapter.get_namespace_uri(&current) == Namespace::Html
                && self.adapter.get_tag_name(&current) == "form"
            {
                self.form_element = Some(current);
                break;
            }
            node = self.adapter.get_parent_node(&current);
        }

        // STEP 12: "Start the parser and let it run until it has consumed all
        //          the characters just inserted into the input stream."
        let _ = self.run();

        // STEP 13: "Return root's children, in tree order."
        let fragment = self.adapter.create_document_fragment();
        for child in self.adapter.get_child_nodes(&root) {
            self.adapter.detach_node(&child);
            self.adapter.append_child(&fragment, &child);
        }
        self.into_result(fragment)
    }

    /// Start parsing `html`. Returns early, with the parser suspended, when
    /// `suspend_on_script` is set and a `</script>` is processed.
    pub fn start(&mut self, html: &str) -> ParseStatus<A::Handle> {
        match self.lifecycle {
            Lifecycle::NotStarted => {
                self.tokenizer = Tokenizer::new(html, self.options.tokenizer_options());
                self.run()
            }
            Lifecycle::Suspended | Lifecycle::Running => {
                let _ = log_once(log::Level::Warn, "Tree Builder", "start() called twice");
                self.pending_script
                    .clone()
                    .map_or(ParseStatus::Finished, |script| ParseStatus::Suspended { script })
            }
            Lifecycle::Finished => {
                let _ = log_once(log::Level::Warn, "Tree Builder", "start() called twice");
                ParseStatus::Finished
            }
        }
    }

    /// [§ 8.4.3 document.write()](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#document.write())
    ///
    /// "Insert input into the input stream just before the insertion point."
    ///
    /// The insertion point sits after the `</script>` that suspended the
    /// parser and moves past each write, so several writes during one
    /// suspension are parsed in the order they were made.
    ///
    /// # Errors
    ///
    /// [`ParserError::NotStarted`] before [`start`](Self::start),
    /// [`ParserError::AlreadyFinished`] after end of file.
    pub fn document_write(&mut self, html: &str) -> Result<(), ParserError> {
        match self.lifecycle {
            Lifecycle::NotStarted => Err(ParserError::NotStarted),
            Lifecycle::Finished => Err(ParserError::AlreadyFinished),
            Lifecycle::Running | Lifecycle::Suspended => {
                self.tokenizer.write(html);
                Ok(())
            }
        }
    }

    /// Continue after a [`ParseStatus::Suspended`].
    ///
    /// # Errors
    ///
    /// [`ParserError::NotSuspended`] unless the parser is paused on a
    /// script, [`ParserError::NotStarted`] before [`start`](Self::start).
    pub fn resume(&mut self) -> Result<ParseStatus<A::Handle>, ParserError> {
        match self.lifecycle {
            Lifecycle::NotStarted => Err(ParserError::NotStarted),
            Lifecycle::Suspended => {
                self.pending_script = None;
                Ok(self.run())
            }
            Lifecycle::Running | Lifecycle::Finished => Err(ParserError::NotSuspended),
        }
    }

    /// Run to end of file, resuming through any remaining scripts, and hand
    /// back the tree.
    #[must_use]
    pub fn finish(mut self) -> ParseResult<A> {
        if self.lifecycle == Lifecycle::NotStarted {
            let _ = self.start("");
        }
        self.options.suspend_on_script = false;
        while self.lifecycle == Lifecycle::Suspended {
            if self.resume().is_err() {
                break;
            }
        }
        let document = self.document.clone();
        self.into_result(document)
    }

    fn into_result(mut self, root: A::Handle) -> ParseResult<A> {
        self.errors.extend(self.tokenizer.take_errors());
        self.errors.sort_by_key(|error| error.offset);
        let quirks_mode = self.adapter.get_document_mode(&self.document);
        ParseResult {
            adapter: self.adapter,
            root,
            errors: self.errors,
            quirks_mode,
        }
    }

    // =========================================================================
    // Token loop
    // =========================================================================

    /// Pull and process tokens until end of file or a script pause.
    fn run(&mut self) -> ParseStatus<A::Handle> {
        self.lifecycle = Lifecycle::Running;
        while !self.stopped {
            // [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
            // "If there is an adjusted current node and it is not an element in
            // the HTML namespace, then ... CDATA section"
            let allow_cdata = self
                .adjusted_current_node()
                .is_some_and(|node| node.namespace != Namespace::Html);
            self.tokenizer.set_allow_cdata(allow_cdata);

            let token = self.tokenizer.next_token();
            self.errors.extend(self.tokenizer.take_errors());

            let Some(token) = self.drop_leading_newline(token) else {
                continue;
            };
            log::trace!(target: "weft::parser", "{}: {token:?}", self.insertion_mode);

            self.current_location = token.location();
            self.self_closing_acknowledged = false;
            self.process_token(&token);

            // "When a start tag token is emitted with its self-closing flag
            // set, if the flag is not acknowledged when it is processed by the
            // tree construction stage, that is a
            // non-void-html-element-start-tag-with-trailing-solidus parse error."
            if matches!(token, Token::StartTag { self_closing: true, .. })
                && !self.self_closing_acknowledged
            {
                self.parse_error(ErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus);
            }

            if token.is_eof() && !self.stopped {
                self.stop_parsing();
            }
            if self.options.location_info {
                self.close_popped_elements(&token);
            }

            if let Some(script) = self.pending_script.clone() {
                self.lifecycle = Lifecycle::Suspended;
                return ParseStatus::Suspended { script };
            }
        }
        self.lifecycle = Lifecycle::Finished;
        ParseStatus::Finished
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one. (Newlines at the start
    /// of pre blocks are ignored as an authoring convenience.)"
    fn drop_leading_newline(&mut self, token: Token) -> Option<Token> {
        if !std::mem::take(&mut self.skip_next_newline) {
            return Some(token);
        }
        match token {
            Token::WhitespaceCharacter { data, location } if data.starts_with('\n') => {
                let rest = data[1..].to_string();
                if rest.is_empty() {
                    return None;
                }
                Some(Token::WhitespaceCharacter {
                    data: rest,
                    location: location.map(|span| Location::new(span.start + 1, span.end)),
                })
            }
            token => Some(token),
        }
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list, known as the
    /// tree construction dispatcher:"
    pub(super) fn process_token(&mut self, token: &Token) {
        if self.should_use_html_rules(token) {
            self.process_using_rules_for(self.insertion_mode, token);
        } else {
            self.process_in_foreign_content(token);
        }
    }

    fn should_use_html_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        let Some(node) = self.adjusted_current_node() else {
            return true;
        };
        let is_character = matches!(
            token,
            Token::Character { .. } | Token::WhitespaceCharacter { .. } | Token::NullCharacter { .. }
        );
        let start_tag = match token {
            Token::StartTag { name, .. } => Some(name.as_str()),
            _ => None,
        };

        // "If the adjusted current node is an element in the HTML namespace"
        node.namespace == Namespace::Html
            // "If the adjusted current node is a MathML text integration point
            // and the token is a start tag whose tag name is neither "mglyph"
            // nor "malignmark"" / "... and the token is a character token"
            || (node.mathml_text_integration_point
                && (is_character
                    || start_tag.is_some_and(|name| name != "mglyph" && name != "malignmark")))
            // "If the adjusted current node is a MathML annotation-xml element
            // and the token is a start tag whose tag name is "svg""
            || (node.namespace == Namespace::MathMl
                && node.tag_name == "annotation-xml"
                && start_tag == Some("svg"))
            // "If the adjusted current node is an HTML integration point and
            // the token is a start tag" / "... and the token is a character token"
            || (node.html_integration_point && (is_character || start_tag.is_some()))
            // "If the token is an end-of-file token"
            || token.is_eof()
    }

    // =========================================================================
    // Errors and locations
    // =========================================================================

    /// Record a tree construction parse error at the current token.
    pub(super) fn parse_error(&mut self, code: ErrorCode) {
        let offset = self
            .current_location
            .map_or_else(|| self.tokenizer.offset(), |span| span.start);
        let _ = log_once(log::Level::Debug, "Tree Builder", code.as_str());
        self.errors.push(ParseError::new(code, offset));
    }

    /// Close the spans of the elements that left the stack while `token`
    /// was processed.
    fn close_popped_elements(&mut self, token: &Token) {
        let popped = self.open_elements.take_popped();
        if popped.is_empty() {
            return;
        }
        for entry in popped {
            let Some(mut location) = self.adapter.get_node_location(&entry.handle) else {
                continue;
            };
            match (token, token.location()) {
                (Token::EndTag { name, .. }, Some(span))
                    if name.eq_ignore_ascii_case(&entry.tag_name) =>
                {
                    location.end_tag = Some(span);
                    location.end = span.end;
                }
                (_, Some(span)) => location.end = span.start,
                (_, None) if token.is_eof() => location.end = self.tokenizer.input_len(),
                (_, None) => {}
            }
            self.adapter.set_node_location(&entry.handle, location);
        }
    }

    /// Attach a token's span to `node`. Elements also record it as their
    /// start tag.
    pub(super) fn set_start_location(
        &mut self,
        node: &A::Handle,
        span: Option<Location>,
        with_start_tag: bool,
    ) {
        if !self.options.location_info {
            return;
        }
        if let Some(span) = span {
            let mut location = NodeLocation::from(span);
            if with_start_tag {
                location.start_tag = Some(span);
            }
            self.adapter.set_node_location(node, location);
        }
    }

    // =========================================================================
    // Shared state transitions
    // =========================================================================

    pub(super) fn switch_to(&mut self, mode: InsertionMode) {
        log::trace!(target: "weft::parser", "mode {} -> {mode}", self.insertion_mode);
        self.insertion_mode = mode;
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) {
        while self.open_elements.pop().is_some() {}
        self.stopped = true;
    }

    /// [§ 13.2.6.4.5 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let len = self.open_elements.len();

        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..len).rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            let node = match (&self.fragment_context, last) {
                (Some(context), true) => context.clone(),
                _ => match self.open_elements.get(index) {
                    Some(entry) => entry.clone(),
                    None => continue,
                },
            };
            if node.namespace != Namespace::Html {
                if last {
                    self.switch_to(InsertionMode::InBody);
                    return;
                }
                continue;
            }

            let mode = match node.tag_name.as_str() {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => Some(self.select_insertion_mode(index, last)),
                // STEP 5: "If node is a td or th element and last is false,
                //          then switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => Some(InsertionMode::InCell),
                "tr" => Some(InsertionMode::InRow),
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                "caption" => Some(InsertionMode::InCaption),
                "colgroup" => Some(InsertionMode::InColumnGroup),
                "table" => Some(InsertionMode::InTable),
                // STEP 11: "If node is a template element, then switch the
                //          insertion mode to the current template insertion mode
                //          and return."
                "template" => self.template_insertion_modes.last().copied(),
                "head" if !last => Some(InsertionMode::InHead),
                "body" => Some(InsertionMode::InBody),
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 15: "If node is an html element, run these substeps:"
                "html" => Some(if self.head_element.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ => None,
            };

            if let Some(mode) = mode {
                self.switch_to(mode);
                return;
            }

            // STEP 16: "If last is true, then switch the insertion mode to
            //          "in body" and return."
            if last {
                self.switch_to(InsertionMode::InBody);
                return;
            }
        }
    }

    /// STEP 4 of resetting the insertion mode, for a `select` at `index`.
    fn select_insertion_mode(&self, index: usize, last: bool) -> InsertionMode {
        // "1. If last is true, jump to the step below labeled done."
        if !last {
            // "3. Loop: If ancestor is the first node in the stack of open
            //  elements, jump to the step below labeled done. 4. Let ancestor
            //  be the node before ancestor in the stack of open elements.
            //  5. If ancestor is a template node, jump to the step below
            //  labeled done. 6. If ancestor is a table node, switch the
            //  insertion mode to "in select in table" and return."
            for ancestor in (0..index).rev().filter_map(|i| self.open_elements.get(i)) {
                if ancestor.is_html("template") {
                    break;
                }
                if ancestor.is_html("table") {
                    return InsertionMode::InSelectInTable;
                }
            }
        }
        // "8. Done: Switch the insertion mode to "in select" and return."
        InsertionMode::InSelect
    }
}
