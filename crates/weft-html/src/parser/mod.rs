//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

mod adoption_agency;
mod core;
mod foreign_content;
mod formatting_elements;
mod insertion;
mod modes;
mod open_elements;
mod quirks;

pub use self::core::{InsertionMode, ParseResult, ParseStatus, Parser, ParserOptions};
pub use foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
    adjusted_svg_tag_name,
};
pub use formatting_elements::{FormattingElement, FormattingElementList, FormattingEntry};
pub use open_elements::{OpenElementStack, StackEntry, is_special};
pub use quirks::{document_mode, is_conforming_doctype};
