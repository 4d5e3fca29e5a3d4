//! The stack of open elements.
//!
//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! "Initially, the stack of open elements is empty. The stack grows downwards;
//! the topmost node on the stack is the first one added to the stack, and the
//! bottommost node of the stack is the most recently added node in the stack."
//!
//! Entries cache the element's local name and namespace next to the handle,
//! so scope checks never have to go back to the tree.

use weft_dom::{Attribute, Namespace};

/// An element on the stack of open elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry<H> {
    /// The live node.
    pub handle: H,
    /// The element's local name.
    pub tag_name: String,
    /// The element's namespace.
    pub namespace: Namespace,
    /// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    pub html_integration_point: bool,
    /// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    pub mathml_text_integration_point: bool,
}

impl<H> StackEntry<H> {
    /// Create an entry, working out the integration point flags from the
    /// element's name, namespace and attributes.
    #[must_use]
    pub fn new(handle: H, tag_name: &str, namespace: Namespace, attributes: &[Attribute]) -> Self {
        // "A node is a MathML text integration point if it is one of the
        // following elements: A MathML mi element, mo, mn, ms, mtext."
        let mathml_text_integration_point = namespace == Namespace::MathMl
            && matches!(tag_name, "mi" | "mo" | "mn" | "ms" | "mtext");

        // "A node is an HTML integration point if it is one of the following
        // elements: A MathML annotation-xml element whose start tag token had an
        // attribute with the name "encoding" whose value was an ASCII
        // case-insensitive match for the string "text/html" or
        // "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
        // element; An SVG title element."
        let html_integration_point = match namespace {
            Namespace::MathMl => {
                tag_name == "annotation-xml"
                    && attributes.iter().any(|attr| {
                        attr.name == "encoding"
                            && (attr.value.eq_ignore_ascii_case("text/html")
                                || attr.value.eq_ignore_ascii_case("application/xhtml+xml"))
                    })
            }
            Namespace::Svg => matches!(tag_name, "foreignObject" | "desc" | "title"),
            _ => false,
        };

        Self {
            handle,
            tag_name: tag_name.to_string(),
            namespace,
            html_integration_point,
            mathml_text_integration_point,
        }
    }

    /// Whether this is an HTML element named `name`.
    #[must_use]
    pub fn is_html(&self, name: &str) -> bool {
        self.namespace == Namespace::Html && self.tag_name == name
    }

    /// Whether this is an HTML element whose name is in `names`.
    #[must_use]
    pub fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.namespace == Namespace::Html && names.contains(&self.tag_name.as_str())
    }
}

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// The special category.
#[must_use]
pub fn is_special(tag_name: &str, namespace: Namespace) -> bool {
    match namespace {
        Namespace::Html => matches!(
            tag_name,
            "address"
                | "applet"
                | "area"
                | "article"
                | "aside"
                | "base"
                | "basefont"
                | "bgsound"
                | "blockquote"
                | "body"
                | "br"
                | "button"
                | "caption"
                | "center"
                | "col"
                | "colgroup"
                | "dd"
                | "details"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "embed"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "frame"
                | "frameset"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "head"
                | "header"
                | "hgroup"
                | "hr"
                | "html"
                | "iframe"
                | "img"
                | "input"
                | "keygen"
                | "li"
                | "link"
                | "listing"
                | "main"
                | "marquee"
                | "menu"
                | "meta"
                | "nav"
                | "noembed"
                | "noframes"
                | "noscript"
                | "object"
                | "ol"
                | "p"
                | "param"
                | "plaintext"
                | "pre"
                | "script"
                | "search"
                | "section"
                | "select"
                | "source"
                | "style"
                | "summary"
                | "table"
                | "tbody"
                | "td"
                | "template"
                | "textarea"
                | "tfoot"
                | "th"
                | "thead"
                | "title"
                | "tr"
                | "track"
                | "ul"
                | "wbr"
                | "xmp"
        ),
        Namespace::MathMl => matches!(
            tag_name,
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(tag_name, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.6.2 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "... generate all implied end tags thoroughly ..."
const IMPLIED_END_TAGS_THOROUGH: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

const NUMBERED_HEADERS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// The kinds of scope of [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

impl Scope {
    /// Whether `entry` ends the search for this scope.
    fn is_boundary<H>(self, entry: &StackEntry<H>) -> bool {
        let name = entry.tag_name.as_str();
        match self {
            // "The stack of open elements is said to have a particular element in
            // select scope when it has that element in the specific scope
            // consisting of all element types except the following: optgroup in
            // the HTML namespace, option in the HTML namespace."
            Self::Select => !entry.is_html_one_of(&["optgroup", "option"]),
            Self::Table => entry.is_html_one_of(&["html", "table", "template"]),
            Self::Default | Self::ListItem | Self::Button => {
                let default = match entry.namespace {
                    Namespace::Html => matches!(
                        name,
                        "applet"
                            | "caption"
                            | "html"
                            | "table"
                            | "td"
                            | "th"
                            | "marquee"
                            | "object"
                            | "template"
                    ),
                    Namespace::MathMl => matches!(
                        name,
                        "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
                    ),
                    Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
                    _ => false,
                };
                default
                    || match self {
                        Self::ListItem => entry.is_html_one_of(&["ol", "ul"]),
                        Self::Button => entry.is_html("button"),
                        _ => false,
                    }
            }
        }
    }
}

/// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
#[derive(Debug, Clone)]
pub struct OpenElementStack<H> {
    entries: Vec<StackEntry<H>>,
    /// Record every entry that leaves the stack, for location tracking.
    track_popped: bool,
    popped: Vec<StackEntry<H>>,
}

impl<H: Clone + PartialEq> Default for OpenElementStack<H> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<H: Clone + PartialEq> OpenElementStack<H> {
    /// Create an empty stack. With `track_popped`, entries that leave the
    /// stack are kept until [`take_popped`](Self::take_popped).
    #[must_use]
    pub const fn new(track_popped: bool) -> Self {
        Self {
            entries: Vec::new(),
            track_popped,
            popped: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Basic access
    // -------------------------------------------------------------------------

    /// "The current node is the bottommost node in this stack of open elements."
    #[must_use]
    pub fn current(&self) -> Option<&StackEntry<H>> {
        self.entries.last()
    }

    /// Number of open elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no element is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, counted from the top (the `html` element).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StackEntry<H>> {
        self.entries.get(index)
    }

    /// Entries from the top of the stack down to the current node.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, StackEntry<H>> {
        self.entries.iter()
    }

    /// Position of `handle` in the stack.
    #[must_use]
    pub fn position(&self, handle: &H) -> Option<usize> {
        self.entries.iter().rposition(|entry| &entry.handle == handle)
    }

    /// Whether `handle` is on the stack.
    #[must_use]
    pub fn contains(&self, handle: &H) -> bool {
        self.position(handle).is_some()
    }

    /// Whether an HTML element named `tag_name` is on the stack.
    #[must_use]
    pub fn contains_tag(&self, tag_name: &str) -> bool {
        self.entries.iter().any(|entry| entry.is_html(tag_name))
    }

    /// Whether a `template` element is on the stack.
    #[must_use]
    pub fn has_template(&self) -> bool {
        self.contains_tag("template")
    }

    /// The element immediately above `handle`.
    #[must_use]
    pub fn common_ancestor(&self, handle: &H) -> Option<&StackEntry<H>> {
        let index = self.position(handle)?;
        index.checked_sub(1).and_then(|above| self.entries.get(above))
    }

    /// "If the second element on the stack of open elements is not a body
    /// element..." The body element, if it is second on the stack.
    #[must_use]
    pub fn body_element(&self) -> Option<&StackEntry<H>> {
        self.entries.get(1).filter(|entry| entry.is_html("body"))
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Push an element onto the stack; it becomes the current node.
    pub fn push(&mut self, entry: StackEntry<H>) {
        log::trace!(target: "weft::parser", "push <{}>", entry.tag_name);
        self.entries.push(entry);
    }

    /// Pop the current node.
    pub fn pop(&mut self) -> Option<StackEntry<H>> {
        let entry = self.entries.pop()?;
        log::trace!(target: "weft::parser", "pop <{}>", entry.tag_name);
        if self.track_popped {
            self.popped.push(entry.clone());
        }
        Some(entry)
    }

    /// Replace the entry for `old` with `entry`, in place.
    pub fn replace(&mut self, old: &H, entry: StackEntry<H>) {
        if let Some(index) = self.position(old) {
            self.entries[index] = entry;
        }
    }

    /// Insert `entry` immediately below `reference`.
    pub fn insert_after(&mut self, reference: &H, entry: StackEntry<H>) {
        if let Some(index) = self.position(reference) {
            self.entries.insert(index + 1, entry);
        }
    }

    /// Remove `handle` from wherever it is on the stack.
    pub fn remove(&mut self, handle: &H) {
        if let Some(index) = self.position(handle) {
            let entry = self.entries.remove(index);
            if self.track_popped {
                self.popped.push(entry);
            }
        }
    }

    /// Pop until an entry matching `done` has been popped.
    fn pop_until(&mut self, done: impl Fn(&StackEntry<H>) -> bool) {
        while let Some(entry) = self.pop() {
            if done(&entry) {
                break;
            }
        }
    }

    /// "Pop elements from the stack of open elements until an HTML element
    /// with the same tag name as the token has been popped from the stack."
    pub fn pop_until_tag_name_popped(&mut self, tag_name: &str) {
        self.pop_until(|entry| entry.is_html(tag_name));
    }

    /// Pop until `handle` has been popped.
    pub fn pop_until_element_popped(&mut self, handle: &H) {
        self.pop_until(|entry| &entry.handle == handle);
    }

    /// "... pop elements from the stack of open elements until an h1, h2, h3,
    /// h4, h5, or h6 element has been popped from the stack."
    pub fn pop_until_numbered_header_popped(&mut self) {
        self.pop_until(|entry| entry.is_html_one_of(NUMBERED_HEADERS));
    }

    /// "Pop elements from the stack of open elements stack until a td element
    /// or a th element has been popped from the stack."
    pub fn pop_until_table_cell_popped(&mut self) {
        self.pop_until(|entry| entry.is_html_one_of(&["td", "th"]));
    }

    /// Pop until a `template` element has been popped.
    pub fn pop_until_template_popped(&mut self) {
        self.pop_until_tag_name_popped("template");
    }

    /// "Pop all the nodes from the bottom of the stack of open elements, from
    /// the current node up to, but not including, the root html element."
    pub fn pop_all_up_to_html_element(&mut self) {
        while self.entries.len() > 1 {
            let _ = self.pop();
        }
    }

    /// Pop while the current node is not one of `names` (HTML namespace).
    fn clear_back_to(&mut self, names: &[&str]) {
        while let Some(current) = self.current() {
            if current.is_html_one_of(names) {
                break;
            }
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "... while the current node is not a table, template, or html element,
    /// pop elements from the stack of open elements."
    pub fn clear_back_to_table_context(&mut self) {
        self.clear_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub fn clear_back_to_table_body_context(&mut self) {
        self.clear_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub fn clear_back_to_table_row_context(&mut self) {
        self.clear_back_to(&["tr", "template", "html"]);
    }

    /// Entries that left the stack since the last call.
    pub fn take_popped(&mut self) -> Vec<StackEntry<H>> {
        std::mem::take(&mut self.popped)
    }

    // -------------------------------------------------------------------------
    // Implied end tags
    // -------------------------------------------------------------------------

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "... while the current node is a dd element, a dt element, an li
    /// element, an optgroup element, an option element, a p element, an rb
    /// element, an rp element, an rt element, or an rtc element, the user agent
    /// must pop the current node off the stack of open elements."
    pub fn generate_implied_end_tags(&mut self) {
        while self
            .current()
            .is_some_and(|current| current.is_html_one_of(IMPLIED_END_TAGS))
        {
            let _ = self.pop();
        }
    }

    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent must
    /// perform the above steps as if that element was not in the above list."
    pub fn generate_implied_end_tags_with_exclusion(&mut self, exclude: &str) {
        while self.current().is_some_and(|current| {
            current.is_html_one_of(IMPLIED_END_TAGS) && current.tag_name != exclude
        }) {
            let _ = self.pop();
        }
    }

    /// "When the steps below require the user agent to generate all implied
    /// end tags thoroughly, then, while the current node is a caption element,
    /// a colgroup element, ... the user agent must pop the current node off
    /// the stack of open elements."
    pub fn generate_implied_end_tags_thoroughly(&mut self) {
        while self
            .current()
            .is_some_and(|current| current.is_html_one_of(IMPLIED_END_TAGS_THOROUGH))
        {
            let _ = self.pop();
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -------------------------------------------------------------------------

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the
    /// stack). 2. If node is the target node, terminate in a match state.
    /// 3. Otherwise, if node is one of the element types in list, terminate
    /// in a failure state. 4. Otherwise, set node to the previous entry in the
    /// stack of open elements and return to step 2."
    fn has_in_specific_scope(&self, target: impl Fn(&StackEntry<H>) -> bool, scope: Scope) -> bool {
        for entry in self.entries.iter().rev() {
            if target(entry) {
                return true;
            }
            if scope.is_boundary(entry) {
                return false;
            }
        }
        false
    }

    /// "has an element in scope"
    #[must_use]
    pub fn has_in_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html(tag_name), Scope::Default)
    }

    /// Whether the element `handle` itself is in scope.
    #[must_use]
    pub fn has_element_in_scope(&self, handle: &H) -> bool {
        self.has_in_specific_scope(|entry| &entry.handle == handle, Scope::Default)
    }

    /// Whether an `h1`-`h6` element is in scope.
    #[must_use]
    pub fn has_numbered_header_in_scope(&self) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html_one_of(NUMBERED_HEADERS), Scope::Default)
    }

    /// "has an element in list item scope"
    #[must_use]
    pub fn has_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html(tag_name), Scope::ListItem)
    }

    /// "has an element in button scope"
    #[must_use]
    pub fn has_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html(tag_name), Scope::Button)
    }

    /// "has an element in table scope"
    #[must_use]
    pub fn has_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html(tag_name), Scope::Table)
    }

    /// Whether a `tbody`, `thead` or `tfoot` element is in table scope.
    #[must_use]
    pub fn has_table_body_context_in_table_scope(&self) -> bool {
        self.has_in_specific_scope(
            |entry| entry.is_html_one_of(&["tbody", "thead", "tfoot"]),
            Scope::Table,
        )
    }

    /// "has an element in select scope"
    #[must_use]
    pub fn has_in_select_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|entry| entry.is_html(tag_name), Scope::Select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(elements: &[(&str, Namespace)]) -> OpenElementStack<usize> {
        let mut stack = OpenElementStack::new(true);
        for (i, &(name, ns)) in elements.iter().enumerate() {
            stack.push(StackEntry::new(i, name, ns, &[]));
        }
        stack
    }

    fn html(names: &[&str]) -> OpenElementStack<usize> {
        let elements: Vec<_> = names.iter().map(|&n| (n, Namespace::Html)).collect();
        stack(&elements)
    }

    #[test]
    fn table_bounds_default_scope() {
        let s = html(&["html", "body", "p", "table", "tr"]);
        assert!(!s.has_in_scope("p"));
        assert!(s.has_in_table_scope("tr"));
        assert!(s.has_in_scope("tr"));
    }

    #[test]
    fn button_and_list_item_scopes() {
        let s = html(&["html", "body", "p", "button", "span"]);
        assert!(s.has_in_scope("p"));
        assert!(!s.has_in_button_scope("p"));

        let s = html(&["html", "body", "li", "ul", "span"]);
        assert!(s.has_in_scope("li"));
        assert!(!s.has_in_list_item_scope("li"));
    }

    #[test]
    fn foreign_boundaries_are_namespace_qualified() {
        let s = stack(&[
            ("html", Namespace::Html),
            ("body", Namespace::Html),
            ("p", Namespace::Html),
            ("svg", Namespace::Svg),
            ("title", Namespace::Svg),
        ]);
        assert!(!s.has_in_scope("p"));

        // An HTML title is not a boundary.
        let s = html(&["html", "body", "p", "title"]);
        assert!(s.has_in_scope("p"));
    }

    #[test]
    fn select_scope_only_passes_options() {
        let s = html(&["html", "body", "select", "optgroup", "option"]);
        assert!(s.has_in_select_scope("select"));
        let s = html(&["html", "body", "select", "div"]);
        assert!(!s.has_in_select_scope("select"));
    }

    #[test]
    fn implied_end_tags() {
        let mut s = html(&["html", "body", "ul", "li", "p"]);
        s.generate_implied_end_tags_with_exclusion("li");
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("li"));
        s.generate_implied_end_tags();
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("ul"));

        let mut s = html(&["html", "body", "table", "tbody", "tr", "td", "p"]);
        s.generate_implied_end_tags_thoroughly();
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("table"));
    }

    #[test]
    fn table_context_clearing() {
        let mut s = html(&["html", "body", "table", "tbody", "tr", "td"]);
        s.clear_back_to_table_row_context();
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("tr"));
        s.clear_back_to_table_body_context();
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("tbody"));
        s.clear_back_to_table_context();
        assert_eq!(s.current().map(|e| e.tag_name.as_str()), Some("table"));
    }

    #[test]
    fn popped_entries_are_recorded() {
        let mut s = html(&["html", "body", "div", "span"]);
        s.pop_until_tag_name_popped("div");
        let popped: Vec<_> = s.take_popped().into_iter().map(|e| e.tag_name).collect();
        assert_eq!(popped, ["span", "div"]);
        assert!(s.take_popped().is_empty());
    }

    #[test]
    fn insert_after_and_replace() {
        let mut s = html(&["html", "body", "div"]);
        s.insert_after(&1, StackEntry::new(7, "b", Namespace::Html, &[]));
        assert_eq!(s.position(&7), Some(2));
        s.replace(&7, StackEntry::new(8, "b", Namespace::Html, &[]));
        assert!(!s.contains(&7));
        assert_eq!(s.common_ancestor(&8).map(|e| e.handle), Some(1));
        assert_eq!(s.body_element().map(|e| e.handle), Some(1));
    }

    #[test]
    fn integration_points() {
        let encoding = [Attribute::new("encoding".into(), "Text/HTML".into())];
        assert!(StackEntry::new(0, "annotation-xml", Namespace::MathMl, &encoding).html_integration_point);
        assert!(!StackEntry::new(0, "annotation-xml", Namespace::MathMl, &[]).html_integration_point);
        assert!(StackEntry::new(0, "foreignObject", Namespace::Svg, &[]).html_integration_point);
        assert!(StackEntry::new(0, "mi", Namespace::MathMl, &[]).mathml_text_integration_point);
    }
}
