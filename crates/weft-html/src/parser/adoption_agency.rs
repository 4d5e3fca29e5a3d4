//! [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs mis-nested formatting elements such as `<b><i></b></i>` by
//! cloning the formatting element around the content that was left inside
//! it.

use weft_dom::{Namespace, TreeAdapter};

use super::core::Parser;
use super::open_elements::{StackEntry, is_special};
use crate::error::ErrorCode;

/// "Outer loop: If outer loop counter is greater than or equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of active
/// formatting elements, then remove node from the list of active formatting
/// elements."
const INNER_LOOP_KEEP: usize = 3;

impl<A: TreeAdapter> Parser<A> {
    /// "The adoption agency algorithm, which takes as its only argument a
    /// token token for which the algorithm is being run, consists of the
    /// following steps:"
    ///
    /// `subject` is the token's tag name.
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //         subject, and the current node is not in the list of active
        //         formatting elements, then pop the current node off the stack
        //         of open elements and return."
        if let Some(current) = self.current_node()
            && current.is_html(subject)
            && !self.active_formatting_elements.contains(&current.handle)
        {
            let _ = self.open_elements.pop();
            return;
        }

        // STEP 3-4: "Let outer loop counter be 0. Outer loop: If outer loop
        //           counter is greater than or equal to 8, then return.
        //           Increment outer loop counter by 1."
        for _ in 0..OUTER_LOOP_LIMIT {
            // STEP 4.3: "Let formatting element be the last element in the list
            //           of active formatting elements that: is between the end
            //           of the list and the last marker in the list, if any, or
            //           the start of the list otherwise, and has the tag name
            //           subject. If there is no such element, then return and
            //           instead act as described in the "any other end tag"
            //           entry above."
            let Some(formatting) = self
                .active_formatting_elements
                .element_entry_in_scope_with_tag_name(subject)
                .cloned()
            else {
                self.any_other_end_tag(subject);
                return;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //           elements, then this is a parse error; remove the element
            //           from the list, and return."
            let Some(fe_index) = self.open_elements.position(&formatting.handle) else {
                self.parse_error(ErrorCode::FormattingElementNotOpen);
                self.active_formatting_elements
                    .remove_entry(&formatting.handle);
                return;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //           but the element is not in scope, then this is a parse
            //           error; return."
            if !self.open_elements.has_element_in_scope(&formatting.handle) {
                self.parse_error(ErrorCode::FormattingElementNotInScope);
                return;
            }

            // STEP 4.6: "If formatting element is not the current node, this is
            //           a parse error. (But do not return.)"
            if self
                .current_node()
                .is_some_and(|current| current.handle != formatting.handle)
            {
                self.parse_error(ErrorCode::ClosingOfElementWithOpenChildElements);
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //           open elements that is lower in the stack than formatting
            //           element, and is an element in the special category. There
            //           might not be one."
            let furthest_block = self
                .open_elements
                .iter()
                .skip(fe_index + 1)
                .find(|entry| is_special(&entry.tag_name, entry.namespace))
                .cloned();

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //           pop all the nodes from the bottom of the stack of open
            //           elements, from the current node up to and including
            //           formatting element, then remove formatting element from
            //           the list of active formatting elements, and finally
            //           return."
            let Some(furthest_block) = furthest_block else {
                self.open_elements
                    .pop_until_element_popped(&formatting.handle);
                self.active_formatting_elements
                    .remove_entry(&formatting.handle);
                return;
            };

            // STEP 4.9: "Let common ancestor be the element immediately above
            //           formatting element in the stack of open elements."
            let Some(common_ancestor) = self
                .open_elements
                .common_ancestor(&formatting.handle)
                .cloned()
            else {
                return;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //            in the list of active formatting elements relative to
            //            the elements on either side of it in the list."
            let mut bookmark = formatting.handle.clone();

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = self
                .open_elements
                .position(&furthest_block.handle)
                .unwrap_or(fe_index + 1);
            let mut last_node = furthest_block.handle.clone();

            // STEP 4.12-4.13: "Let inner loop counter be 0. Inner loop:
            //                 Increment inner loop counter by 1."
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //              in the stack of open elements, or if node is no
                //              longer in the stack of open elements (e.g.
                //              because it got removed by this algorithm), the
                //              element that was immediately above node in the
                //              stack of open elements before node was removed."
                node_index -= 1;
                let Some(node) = self.open_elements.get(node_index).cloned() else {
                    break;
                };

                // STEP 4.13.3: "If node is formatting element, then break."
                if node.handle == formatting.handle {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node
                //              is in the list of active formatting elements,
                //              then remove node from the list of active
                //              formatting elements."
                if inner_loop_counter > INNER_LOOP_KEEP {
                    self.active_formatting_elements.remove_entry(&node.handle);
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //              elements, then remove node from the stack of open
                //              elements and continue."
                let Some(node_entry) = self
                    .active_formatting_elements
                    .element_entry(&node.handle)
                    .cloned()
                else {
                    self.open_elements.remove(&node.handle);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //              element node was created, in the HTML namespace,
                //              with common ancestor as the intended parent;
                //              replace the entry for node in the list of active
                //              formatting elements with an entry for the new
                //              element, replace the entry for node in the stack
                //              of open elements with an entry for the new
                //              element, and let node be the new element."
                let new_element = self.create_element_for_token(&node_entry.token, Namespace::Html);
                self.active_formatting_elements
                    .replace(&node.handle, new_element.clone());
                self.open_elements.replace(
                    &node.handle,
                    StackEntry::new(
                        new_element.clone(),
                        node_entry.tag_name(),
                        Namespace::Html,
                        node_entry.token.attributes(),
                    ),
                );

                // STEP 4.13.7: "If last node is furthest block, then move the
                //              aforementioned bookmark to be immediately after
                //              the new node in the list of active formatting
                //              elements."
                if last_node == furthest_block.handle {
                    bookmark = new_element.clone();
                }

                // STEP 4.13.8: "Append last node to node."
                self.adapter.detach_node(&last_node);
                self.adapter.append_child(&new_element, &last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //            previous step at the appropriate place for inserting a
            //            node, but using common ancestor as the override target."
            self.adapter.detach_node(&last_node);
            let place = self.appropriate_place(Some(&common_ancestor));
            self.insert_at(&place, &last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //            element was created, in the HTML namespace, with
            //            furthest block as the intended parent."
            let new_element = self.create_element_for_token(&formatting.token, Namespace::Html);

            // STEP 4.16: "Take all of the child nodes of furthest block and
            //            append them to the element created in the last step."
            for child in self.adapter.get_child_nodes(&furthest_block.handle) {
                self.adapter.detach_node(&child);
                self.adapter.append_child(&new_element, &child);
            }

            // STEP 4.17: "Append that new element to furthest block."
            self.adapter
                .append_child(&furthest_block.handle, &new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //            formatting elements, and insert the new element into
            //            the list of active formatting elements at the position
            //            of the aforementioned bookmark."
            self.active_formatting_elements.insert_element_after_bookmark(
                &bookmark,
                new_element.clone(),
                Namespace::Html,
                formatting.token.clone(),
            );
            self.active_formatting_elements
                .remove_entry(&formatting.handle);

            // STEP 4.19: "Remove formatting element from the stack of open
            //            elements, and insert the new element into the stack of
            //            open elements immediately below the position of furthest
            //            block in that stack."
            self.open_elements.remove(&formatting.handle);
            self.open_elements.insert_after(
                &furthest_block.handle,
                StackEntry::new(
                    new_element,
                    formatting.tag_name(),
                    Namespace::Html,
                    formatting.token.attributes(),
                ),
            );
        }
    }
}
