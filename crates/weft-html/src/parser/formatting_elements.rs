//! The list of active formatting elements.
//!
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! "Initially, the list of active formatting elements is empty. It is used to
//! handle mis-nested formatting element tags."
//!
//! "The list contains elements in the formatting category, and markers. The
//! markers are inserted when entering applet, object, marquee, template, td,
//! th, and caption elements, and are used to prevent formatting from
//! "leaking" into applet, object, marquee, template, td, th, and caption
//! elements."

use weft_dom::{Attribute, Namespace};

use crate::tokenizer::Token;

/// "In addition, each element in the list of active formatting elements is
/// associated with the token for which it was created, so that further
/// elements can be created for that token if necessary."
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingElement<H> {
    /// The element.
    pub handle: H,
    /// The element's namespace.
    pub namespace: Namespace,
    /// The start tag the element was created for.
    pub token: Token,
}

impl<H> FormattingElement<H> {
    /// The element's tag name.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.token.tag_name().unwrap_or_default()
    }
}

/// An entry of the list.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattingEntry<H> {
    /// A scope marker.
    Marker,
    /// A formatting element.
    Element(FormattingElement<H>),
}

impl<H> FormattingEntry<H> {
    /// The element, unless this is a marker.
    #[must_use]
    pub const fn as_element(&self) -> Option<&FormattingElement<H>> {
        match self {
            Self::Marker => None,
            Self::Element(element) => Some(element),
        }
    }

    /// Whether this is a marker.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }
}

/// Noah's Ark limit.
const NOAHS_ARK_CAPACITY: usize = 3;

/// Attribute lists are equal when they hold the same name/value pairs in any
/// order.
fn same_attributes(a: &[Attribute], b: &[Attribute]) -> bool {
    a.len() == b.len()
        && a.iter().all(|attr| {
            b.iter()
                .any(|other| other.name == attr.name && other.value == attr.value)
        })
}

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#list-of-active-formatting-elements)
#[derive(Debug, Clone)]
pub struct FormattingElementList<H> {
    entries: Vec<FormattingEntry<H>>,
}

impl<H> Default for FormattingElementList<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq> FormattingElementList<H> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, counted from the earliest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FormattingEntry<H>> {
        self.entries.get(index)
    }

    /// The last entry.
    #[must_use]
    pub fn last(&self) -> Option<&FormattingEntry<H>> {
        self.entries.last()
    }

    /// Position of the entry for `handle`.
    #[must_use]
    pub fn position(&self, handle: &H) -> Option<usize> {
        self.entries.iter().rposition(|entry| {
            entry
                .as_element()
                .is_some_and(|element| &element.handle == handle)
        })
    }

    /// Whether `handle` is in the list.
    #[must_use]
    pub fn contains(&self, handle: &H) -> bool {
        self.position(handle).is_some()
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub fn insert_marker(&mut self) {
        self.entries.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "1. If there are already three elements in the list of active formatting
    /// elements after the last marker, if any, or anywhere in the list if there
    /// are no markers, that have the same tag name, namespace, and attributes
    /// as element, then remove the earliest such element from the list of
    /// active formatting elements. For these purposes, the attributes must be
    /// compared as they were when the elements were created by the parser; two
    /// elements have the same attributes if all their parsed attributes can be
    /// paired such that the two attributes in each pair have identical names,
    /// namespaces, and values (the order of the attributes does not matter).
    ///
    /// 2. Add element to the list of active formatting elements."
    pub fn push_element(&mut self, handle: H, namespace: Namespace, token: Token) {
        let tag_name = token.tag_name().unwrap_or_default();
        let attributes = token.attributes();

        let mut identical = Vec::new();
        for (index, entry) in self.entries.iter().enumerate().rev() {
            let FormattingEntry::Element(element) = entry else {
                break;
            };
            if element.namespace == namespace
                && element.tag_name() == tag_name
                && same_attributes(element.token.attributes(), attributes)
            {
                identical.push(index);
            }
        }

        if identical.len() >= NOAHS_ARK_CAPACITY {
            // `identical` is in reverse order, so the last one is the earliest.
            if let Some(&earliest) = identical.last() {
                log::trace!(target: "weft::parser", "Noah's Ark drops <{tag_name}>");
                let _ = self.entries.remove(earliest);
            }
        }

        self.entries.push(FormattingEntry::Element(FormattingElement {
            handle,
            namespace,
            token,
        }));
    }

    /// Insert an element immediately after the entry for `bookmark`, the way
    /// step 4.19 of the adoption agency algorithm places the new element.
    pub fn insert_element_after_bookmark(
        &mut self,
        bookmark: &H,
        handle: H,
        namespace: Namespace,
        token: Token,
    ) {
        let index = self
            .position(bookmark)
            .map_or(self.entries.len(), |index| index + 1);
        self.entries.insert(
            index,
            FormattingEntry::Element(FormattingElement {
                handle,
                namespace,
                token,
            }),
        );
    }

    /// Remove the entry for `handle`.
    pub fn remove_entry(&mut self, handle: &H) {
        if let Some(index) = self.position(handle) {
            let _ = self.entries.remove(index);
        }
    }

    /// Point the entry for `old` at `new`, keeping its token.
    pub fn replace(&mut self, old: &H, new: H) {
        if let Some(index) = self.position(old)
            && let Some(FormattingEntry::Element(element)) = self.entries.get_mut(index)
        {
            element.handle = new;
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list of
    /// active formatting elements. 2. Remove entry from the list of active
    /// formatting elements. 3. If entry was a marker, then stop the algorithm
    /// at this point. 4. Go to step 1."
    pub fn clear_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    /// The entry for an element named `tag_name` between the end of the list
    /// and the last marker.
    #[must_use]
    pub fn element_entry_in_scope_with_tag_name(
        &self,
        tag_name: &str,
    ) -> Option<&FormattingElement<H>> {
        self.entries
            .iter()
            .rev()
            .map_while(FormattingEntry::as_element)
            .find(|element| element.tag_name() == tag_name)
    }

    /// The entry for `handle`.
    #[must_use]
    pub fn element_entry(&self, handle: &H) -> Option<&FormattingElement<H>> {
        self.position(handle)
            .and_then(|index| self.entries.get(index))
            .and_then(FormattingEntry::as_element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_tag(name: &str, attrs: &[(&str, &str)]) -> Token {
        let mut token = Token::implied_start_tag(name);
        if let Token::StartTag { attributes, .. } = &mut token {
            *attributes = attrs
                .iter()
                .map(|&(n, v)| Attribute::new(n.to_string(), v.to_string()))
                .collect();
        }
        token
    }

    #[test]
    fn noahs_ark_keeps_three() {
        let mut list = FormattingElementList::new();
        for handle in 0..5 {
            list.push_element(handle, Namespace::Html, start_tag("b", &[("x", "1"), ("y", "2")]));
        }
        assert_eq!(list.len(), 3);
        assert!(!list.contains(&0));
        assert!(!list.contains(&1));
        assert!(list.contains(&4));
    }

    #[test]
    fn noahs_ark_ignores_attribute_order_but_not_values() {
        let mut list = FormattingElementList::new();
        list.push_element(0, Namespace::Html, start_tag("b", &[("x", "1"), ("y", "2")]));
        list.push_element(1, Namespace::Html, start_tag("b", &[("y", "2"), ("x", "1")]));
        list.push_element(2, Namespace::Html, start_tag("b", &[("x", "1"), ("y", "2")]));
        list.push_element(3, Namespace::Html, start_tag("b", &[("x", "9"), ("y", "2")]));
        list.push_element(4, Namespace::Html, start_tag("b", &[("x", "1"), ("y", "2")]));
        assert_eq!(list.len(), 4);
        assert!(!list.contains(&0));
        assert!(list.contains(&3));
    }

    #[test]
    fn noahs_ark_stops_at_marker() {
        let mut list = FormattingElementList::new();
        for handle in 0..3 {
            list.push_element(handle, Namespace::Html, start_tag("i", &[]));
        }
        list.insert_marker();
        list.push_element(3, Namespace::Html, start_tag("i", &[]));
        assert_eq!(list.len(), 5);

        list.clear_to_last_marker();
        assert_eq!(list.len(), 3);
        assert!(list.last().is_some_and(|entry| !entry.is_marker()));
    }

    #[test]
    fn lookup_stops_at_marker() {
        let mut list = FormattingElementList::new();
        list.push_element(0, Namespace::Html, start_tag("a", &[]));
        list.insert_marker();
        list.push_element(1, Namespace::Html, start_tag("b", &[]));
        assert!(list.element_entry_in_scope_with_tag_name("a").is_none());
        assert_eq!(
            list.element_entry_in_scope_with_tag_name("b").map(|e| e.handle),
            Some(1)
        );
        assert_eq!(list.element_entry(&0).map(FormattingElement::tag_name), Some("a"));
    }

    #[test]
    fn bookmark_insertion_and_replace() {
        let mut list = FormattingElementList::new();
        list.push_element(0, Namespace::Html, start_tag("a", &[]));
        list.push_element(1, Namespace::Html, start_tag("b", &[]));
        list.insert_element_after_bookmark(&0, 7, Namespace::Html, start_tag("a", &[]));
        list.remove_entry(&0);
        assert_eq!(list.position(&7), Some(0));
        list.replace(&1, 9);
        assert_eq!(list.element_entry(&9).map(FormattingElement::tag_name), Some("b"));
    }
}
