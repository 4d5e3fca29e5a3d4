use core::fmt;

use serde::Serialize;

pub use weft_dom::{Attribute, Location};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Character tokens are coalesced: a run of characters of the same class
/// (ordinary, whitespace, or U+0000 NULL) becomes a single token. The three
/// classes are separate variants because several insertion modes treat them
/// differently.
///
/// `location` is only filled in when location tracking is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string), and the force-quirks
    /// flag must be set to off (its other state is on)."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
        /// Source span.
        location: Option<Location>,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
        /// Source span.
        location: Option<Location>,
    },

    /// End tag token. Same structure as start tag; attributes and the
    /// self-closing flag are parse errors on end tags and are ignored.
    EndTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
        /// Source span.
        location: Option<Location>,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
        /// Source span.
        location: Option<Location>,
    },

    /// A run of ordinary characters.
    Character {
        /// "data"
        data: String,
        /// Source span.
        location: Option<Location>,
    },

    /// A run of U+0000 NULL characters.
    NullCharacter {
        /// "data"
        data: String,
        /// Source span.
        location: Option<Location>,
    },

    /// A run of ASCII whitespace (tab, LF, FF, CR, space).
    WhitespaceCharacter {
        /// "data"
        data: String,
        /// Source span.
        location: Option<Location>,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

/// Which character token variant a code point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    /// Ordinary characters.
    Character,
    /// U+0000 NULL.
    Null,
    /// ASCII whitespace.
    Whitespace,
}

impl CharacterKind {
    /// Classify `c`.
    #[must_use]
    pub const fn of(c: char) -> Self {
        match c {
            '\0' => Self::Null,
            '\t' | '\n' | '\x0C' | '\r' | ' ' => Self::Whitespace,
            _ => Self::Character,
        }
    }
}

impl Token {
    /// "When a DOCTYPE token is created, its name, public identifier, and system
    /// identifier must be marked as missing (which is a distinct state from the
    /// empty string), and the force-quirks flag must be set to off."
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
            location: None,
        }
    }

    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    /// Create a new end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    /// Create a new comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
            location: None,
        }
    }

    /// Create a character token of the given class.
    #[must_use]
    pub const fn new_characters(kind: CharacterKind, data: String) -> Self {
        match kind {
            CharacterKind::Character => Self::Character {
                data,
                location: None,
            },
            CharacterKind::Null => Self::NullCharacter {
                data,
                location: None,
            },
            CharacterKind::Whitespace => Self::WhitespaceCharacter {
                data,
                location: None,
            },
        }
    }

    /// Create an end-of-file token.
    #[must_use]
    pub const fn new_eof() -> Self {
        Self::EndOfFile
    }

    /// A start tag the tree constructor inserts on its own (`<html>`,
    /// `<head>`, `<tbody>`, ...).
    #[must_use]
    pub fn implied_start_tag(name: &str) -> Self {
        Self::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    /// An end tag the tree constructor acts on as if it had been seen.
    #[must_use]
    pub fn implied_end_tag(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
            self_closing: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attributes of a tag token (empty for other tokens).
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Value of the attribute named `name` on a tag token.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether this is a start tag with the given name.
    #[must_use]
    pub fn is_start_tag(&self, tag_name: &str) -> bool {
        matches!(self, Self::StartTag { name, .. } if name == tag_name)
    }

    /// Whether this is an end tag with the given name.
    #[must_use]
    pub fn is_end_tag(&self, tag_name: &str) -> bool {
        matches!(self, Self::EndTag { name, .. } if name == tag_name)
    }

    /// Character data of a character token of any class.
    #[must_use]
    pub fn character_data(&self) -> Option<&str> {
        match self {
            Self::Character { data, .. }
            | Self::NullCharacter { data, .. }
            | Self::WhitespaceCharacter { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Source span of the token, if tracked.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::Doctype { location, .. }
            | Self::StartTag { location, .. }
            | Self::EndTag { location, .. }
            | Self::Comment { location, .. }
            | Self::Character { location, .. }
            | Self::NullCharacter { location, .. }
            | Self::WhitespaceCharacter { location, .. } => *location,
            Self::EndOfFile => None,
        }
    }

    /// Set the source span (no effect on the end-of-file token).
    pub const fn set_location(&mut self, span: Location) {
        match self {
            Self::Doctype { location, .. }
            | Self::StartTag { location, .. }
            | Self::EndTag { location, .. }
            | Self::Comment { location, .. }
            | Self::Character { location, .. }
            | Self::NullCharacter { location, .. }
            | Self::WhitespaceCharacter { location, .. } => *location = Some(span),
            Self::EndOfFile => {}
        }
    }

    // Mutation helpers for use during tokenization. Calling one on the wrong
    // variant is a no-op.

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    ///
    /// "Append the current input character to the current DOCTYPE token's name."
    pub fn append_to_doctype_name(&mut self, c: char) {
        if let Self::Doctype { name, .. } = self {
            name.get_or_insert_with(String::new).push(c);
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    ///
    /// "Set the current DOCTYPE token's public identifier to the empty string (not missing)"
    pub fn init_public_identifier(&mut self) {
        if let Self::Doctype {
            public_identifier, ..
        } = self
        {
            *public_identifier = Some(String::new());
        }
    }

    /// "Append the current input character to the current DOCTYPE token's public identifier."
    pub fn append_to_public_identifier(&mut self, c: char) {
        if let Self::Doctype {
            public_identifier, ..
        } = self
        {
            public_identifier.get_or_insert_with(String::new).push(c);
        }
    }

    /// "Set the current DOCTYPE token's system identifier to the empty string (not missing)"
    pub fn init_system_identifier(&mut self) {
        if let Self::Doctype {
            system_identifier, ..
        } = self
        {
            *system_identifier = Some(String::new());
        }
    }

    /// "Append the current input character to the current DOCTYPE token's system identifier."
    pub fn append_to_system_identifier(&mut self, c: char) {
        if let Self::Doctype {
            system_identifier, ..
        } = self
        {
            system_identifier.get_or_insert_with(String::new).push(c);
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub const fn set_force_quirks(&mut self) {
        if let Self::Doctype { force_quirks, .. } = self {
            *force_quirks = true;
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name, .. } = self {
            name.push(c);
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token."
    pub const fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } | Self::EndTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// "Append the current input character to the comment token's data."
    pub fn append_to_comment(&mut self, c: char) {
        if let Self::Comment { data, .. } = self {
            data.push(c);
        }
    }

    /// Append a string to the comment token's data.
    pub fn append_str_to_comment(&mut self, s: &str) {
        if let Self::Comment { data, .. } = self {
            data.push_str(s);
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token."
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "Append the current input character to the current attribute's name."
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// "Append the current input character to the current attribute's value."
    pub fn append_to_current_attribute_value(&mut self, s: &str) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting the
    /// tag token, if appropriate), the complete attribute's name must be compared to
    /// the other attributes on the same token; if there is already an attribute on
    /// the token with the exact same name, then this is a duplicate-attribute parse
    /// error and the new attribute must be removed from the token."
    #[must_use]
    pub fn current_attribute_name_is_duplicate(&self) -> bool {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                attributes.split_last().is_some_and(|(current, earlier)| {
                    earlier.iter().any(|attr| attr.name == current.name)
                })
            }
            _ => false,
        }
    }

    /// Remove the current (last) attribute from the token.
    /// Used when a duplicate attribute is detected.
    pub fn remove_current_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            let _ = attributes.pop();
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
                ..
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
                ..
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data, .. } => write!(f, "<!--{data}-->"),
            Self::Character { data, .. } => write!(f, "Character({data:?})"),
            Self::NullCharacter { data, .. } => write!(f, "NullCharacter({})", data.len()),
            Self::WhitespaceCharacter { data, .. } => write!(f, "WhitespaceCharacter({data:?})"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
