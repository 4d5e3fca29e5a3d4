//! Creating and inserting nodes.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use weft_dom::{Location, Namespace, NodeLocation, TreeAdapter};

use super::core::{InsertionMode, InsertionPlace, Parser};
use super::formatting_elements::FormattingEntry;
use super::open_elements::StackEntry;
use crate::error::ErrorCode;
use crate::tokenizer::{Token, TokenizerState};

impl<A: TreeAdapter> Parser<A> {
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<&StackEntry<A::Handle>> {
        self.open_elements.current()
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<&StackEntry<A::Handle>> {
        match &self.fragment_context {
            Some(context) if self.open_elements.len() == 1 => Some(context),
            _ => self.current_node(),
        }
    }

    /// Whether the current node is an HTML element named `tag_name`.
    pub(super) fn current_node_is(&self, tag_name: &str) -> bool {
        self.current_node().is_some_and(|node| node.is_html(tag_name))
    }

    /// Whether the current node is an HTML element named one of `names`.
    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|node| node.is_html_one_of(names))
    }

    // =========================================================================
    // Insertion location
    // =========================================================================

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target, is the position in an element returned by
    /// running the following steps:"
    pub(super) fn appropriate_place(
        &self,
        override_target: Option<&StackEntry<A::Handle>>,
    ) -> InsertionPlace<A::Handle> {
        // STEP 1: "If there was an override target specified, then let target
        //         be the override target. Otherwise, let target be the current
        //         node."
        let Some(target) = override_target.or_else(|| self.current_node()) else {
            return InsertionPlace {
                parent: self.document.clone(),
                before: None,
            };
        };

        // STEP 2: "Determine the adjusted insertion location using the first
        //         matching steps from the following list:"
        //
        // "If foster parenting is enabled and target is a table, tbody, tfoot,
        // thead, or tr element"
        let (parent, before) = if self.foster_parenting
            && target.is_html_one_of(&["table", "tbody", "tfoot", "thead", "tr"])
        {
            self.foster_parent_location()
        } else {
            // "Otherwise: Let adjusted insertion location be inside target,
            // after its last child (if any)."
            (target.clone(), None)
        };

        // STEP 3: "If the adjusted insertion location is inside a template
        //         element, let it instead be inside the template element's
        //         template contents, after its last child (if any)."
        let parent_handle = if parent.is_html("template") {
            self.adapter
                .get_template_content(&parent.handle)
                .unwrap_or(parent.handle)
        } else {
            parent.handle
        };

        InsertionPlace {
            parent: parent_handle,
            before,
        }
    }

    /// The foster parenting branch of the appropriate place algorithm.
    fn foster_parent_location(&self) -> (StackEntry<A::Handle>, Option<A::Handle>) {
        let entries: Vec<_> = self.open_elements.iter().collect();

        // STEP 2.1: "Let last template be the last template element in the
        //           stack of open elements, if any."
        let last_template = entries.iter().rposition(|entry| entry.is_html("template"));
        // STEP 2.2: "Let last table be the last table element in the stack of
        //           open elements, if any."
        let last_table = entries.iter().rposition(|entry| entry.is_html("table"));

        // STEP 2.3: "If there is a last template and either there is no last
        //           table, or there is one, but last template is lower (more
        //           recently added) than last table in the stack of open
        //           elements, then: let adjusted insertion location be inside
        //           last template's template contents, after its last child (if
        //           any), and abort these steps."
        if let Some(template) = last_template
            && last_table.is_none_or(|table| template > table)
        {
            return ((*entries[template]).clone(), None);
        }

        // STEP 2.4: "If there is no last table, then let adjusted insertion
        //           location be inside the first element in the stack of open
        //           elements (the html element), after its last child (if any),
        //           and abort these steps. (fragment case)"
        let Some(table) = last_table else {
            return ((*entries[0]).clone(), None);
        };
        let table_entry = entries[table];

        // STEP 2.5: "If last table has a parent node, then let adjusted
        //           insertion location be inside last table's parent node,
        //           immediately before last table, and abort these steps."
        if let Some(parent) = self.adapter.get_parent_node(&table_entry.handle) {
            let parent_entry = if self.adapter.is_element_node(&parent) {
                StackEntry::new(
                    parent.clone(),
                    &self.adapter.get_tag_name(&parent),
                    self.adapter.get_namespace_uri(&parent),
                    &[],
                )
            } else {
                // A template contents fragment or the document.
                StackEntry::new(parent, "", Namespace::Html, &[])
            };
            return (parent_entry, Some(table_entry.handle.clone()));
        }

        // STEP 2.6: "Let previous element be the element immediately above
        //           last table in the stack of open elements."
        // STEP 2.7: "Let adjusted insertion location be inside previous
        //           element, after its last child (if any)."
        let previous = table.saturating_sub(1);
        ((*entries[previous]).clone(), None)
    }

    /// Put `node` at `place`.
    pub(super) fn insert_at(&mut self, place: &InsertionPlace<A::Handle>, node: &A::Handle) {
        match &place.before {
            Some(reference) => self.adapter.insert_before(&place.parent, node, reference),
            None => self.adapter.append_child(&place.parent, node),
        }
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token" in `namespace`. The element is not
    /// inserted anywhere.
    pub(super) fn create_element_for_token(
        &mut self,
        token: &Token,
        namespace: Namespace,
    ) -> A::Handle {
        let tag_name = token.tag_name().unwrap_or_default();
        let element = self
            .adapter
            .create_element(tag_name, namespace, token.attributes().to_vec());

        // [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
        // "When a template element is created, the user agent must ... let the
        // template element's template contents be the newly created
        // DocumentFragment object."
        if namespace == Namespace::Html && tag_name == "template" {
            let content = self.adapter.create_document_fragment();
            self.adapter.set_template_content(&element, &content);
        }

        self.set_start_location(&element, token.location(), true);
        element
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Insert a foreign element": create an element for the token in
    /// `namespace`, insert it at the appropriate place and push it onto the
    /// stack of open elements.
    pub(super) fn insert_element_for_token(
        &mut self,
        token: &Token,
        namespace: Namespace,
    ) -> A::Handle {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //         place for inserting a node."
        let place = self.appropriate_place(None);
        // STEP 2: "Let element be the result of creating an element for the
        //         token in the given namespace, with the intended parent being
        //         the element in which the adjusted insertion location finds
        //         itself."
        let element = self.create_element_for_token(token, namespace);
        // STEP 3: "If it is possible to insert element at the adjusted
        //         insertion location, then: ... Insert element at the adjusted
        //         insertion location."
        self.insert_at(&place, &element);
        // STEP 4: "Push element onto the stack of open elements so that it is
        //         the new current node."
        self.open_elements.push(StackEntry::new(
            element.clone(),
            token.tag_name().unwrap_or_default(),
            namespace,
            token.attributes(),
        ));
        element
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the token,
    /// in the HTML namespace."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> A::Handle {
        self.insert_element_for_token(token, Namespace::Html)
    }

    /// Insert an HTML element and immediately pop it (void elements).
    ///
    /// "Acknowledge the token's self-closing flag, if it is set."
    pub(super) fn insert_void_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        let _ = self.open_elements.pop();
        self.self_closing_acknowledged = true;
    }

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
    ///
    /// "The generic raw text element parsing algorithm and the generic RCDATA
    /// element parsing algorithm consist of the following steps."
    pub(super) fn parse_generic_text_element(&mut self, token: &Token, state: TokenizerState) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //         element parsing algorithm, switch the tokenizer to the
        //         RAWTEXT state; otherwise ... switch the tokenizer to the RCDATA
        //         state."
        self.tokenizer.set_state(state);
        // STEP 3: "Let the original insertion mode be the current insertion mode."
        self.original_insertion_mode = self.insertion_mode;
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.switch_to(InsertionMode::Text);
    }

    // =========================================================================
    // Text and comments
    // =========================================================================

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "Insert a character", for a whole run of characters.
    pub(super) fn insert_characters(&mut self, data: &str) {
        // STEP 2: "Let the adjusted insertion location be the appropriate place
        //         for inserting a node."
        let place = self.appropriate_place(None);

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //         then return."
        if place.parent == self.document {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //         insertion location, then append data to that Text node's
        //         data. Otherwise, create a new Text node whose data is data ...
        //         and insert the newly created node at the adjusted insertion
        //         location."
        match &place.before {
            Some(reference) => self.adapter.insert_text_before(&place.parent, data, reference),
            None => self.adapter.insert_text(&place.parent, data),
        }

        if self.options.location_info {
            self.extend_text_location(&place);
        }
    }

    /// Grow (or start) the span of the text node just written at `place`.
    fn extend_text_location(&mut self, place: &InsertionPlace<A::Handle>) {
        let Some(span) = self.current_location else {
            return;
        };
        let children = self.adapter.get_child_nodes(&place.parent);
        let text_node = match &place.before {
            Some(reference) => children
                .iter()
                .position(|child| child == reference)
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| children.get(index)),
            None => children.last(),
        };
        let Some(text_node) = text_node.filter(|node| self.adapter.is_text_node(node)) else {
            return;
        };
        let location = match self.adapter.get_node_location(text_node) {
            Some(mut location) => {
                location.end = span.end;
                location
            }
            None => NodeLocation::from(span),
        };
        self.adapter.set_node_location(text_node, location);
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "Insert a comment" at the appropriate place.
    pub(super) fn insert_comment(&mut self, data: &str) {
        let place = self.appropriate_place(None);
        self.insert_comment_at(&place, data);
    }

    /// "Insert a comment as the last child of" `parent`.
    pub(super) fn insert_comment_into(&mut self, parent: &A::Handle, data: &str) {
        let place = InsertionPlace {
            parent: parent.clone(),
            before: None,
        };
        self.insert_comment_at(&place, data);
    }

    fn insert_comment_at(&mut self, place: &InsertionPlace<A::Handle>, data: &str) {
        let comment = self.adapter.create_comment_node(data);
        self.insert_at(place, &comment);
        self.set_start_location(&comment, self.current_location, false);
    }

    /// Attach the DOCTYPE token's span to the document's doctype node.
    pub(super) fn set_doctype_location(&mut self, span: Option<Location>) {
        if !self.options.location_info {
            return;
        }
        let doctype = self
            .adapter
            .get_child_nodes(&self.document)
            .into_iter()
            .find(|node| self.adapter.is_document_type_node(node));
        if let Some(doctype) = doctype {
            self.set_start_location(&doctype, span, false);
        }
    }

    // =========================================================================
    // Active formatting elements
    // =========================================================================

    /// Push a just-inserted formatting element onto the list.
    pub(super) fn push_active_formatting_element(&mut self, element: A::Handle, token: &Token) {
        self.active_formatting_elements
            .push_element(element, Namespace::Html, token.clone());
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// "When the steps below require the UA to reconstruct the active
    /// formatting elements, the UA must perform the following steps:"
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //         elements, then there is nothing to reconstruct; stop this
        //         algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        //         active formatting elements is a marker, or if it is an element
        //         that is in the stack of open elements, then there is nothing
        //         to reconstruct; stop this algorithm."
        let is_open = |entry: &FormattingEntry<A::Handle>| match entry {
            FormattingEntry::Marker => true,
            FormattingEntry::Element(element) => self.open_elements.contains(&element.handle),
        };
        match self.active_formatting_elements.last() {
            None => return,
            Some(entry) if is_open(entry) => return,
            Some(_) => {}
        }

        // STEP 3-6: "Rewind: If there are no entries before entry in the list
        //           of active formatting elements, then jump to the step
        //           labeled create. Let entry be the entry one earlier than
        //           entry in the list of active formatting elements. If entry is
        //           neither a marker nor an element that is also in the stack of
        //           open elements, go to the step labeled rewind."
        let len = self.active_formatting_elements.len();
        let mut index = len - 1;
        while index > 0 {
            let earlier = self.active_formatting_elements.get(index - 1);
            if earlier.is_some_and(|entry| is_open(entry)) {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: "Advance ... Create: Insert an HTML element for the token
        //            for which the element entry was created, to obtain new
        //            element. Replace the entry for entry in the list with an
        //            entry for new element. If the entry for new element in the
        //            list of active formatting elements is not the last entry in
        //            the list, return to the step labeled advance."
        for index in index..len {
            let Some(FormattingEntry::Element(element)) = self.active_formatting_elements.get(index)
            else {
                continue;
            };
            let old = element.handle.clone();
            let token = element.token.clone();
            let new = self.insert_html_element(&token);
            self.active_formatting_elements.replace(&old, new);
        }
    }

    // =========================================================================
    // Closing elements
    // =========================================================================

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must generate implied end tags, except for p
    /// elements. If the current node is not a p element, then this is a parse
    /// error. Pop elements from the stack of open elements until a p element
    /// has been popped from the stack."
    pub(super) fn close_p_element(&mut self) {
        self.open_elements.generate_implied_end_tags_with_exclusion("p");
        if !self.current_node_is("p") {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until_tag_name_popped("p");
    }

    /// Close a `p` element if one is in button scope.
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.open_elements.has_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Where the steps above say to close the cell, they mean to run the
    /// following algorithm:"
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.open_elements.generate_implied_end_tags();
        // STEP 2: "If the current node is not now a td element or a th element,
        //         then this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a td
        //         element or a th element has been popped from the stack."
        self.open_elements.pop_until_table_cell_popped();
        // STEP 4: "Clear the list of active formatting elements up to the last
        //         marker."
        self.active_formatting_elements.clear_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_to(InsertionMode::InRow);
    }
}
