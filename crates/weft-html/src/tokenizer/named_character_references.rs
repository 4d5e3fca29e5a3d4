//! Named character reference trie.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! "Consume the maximum number of characters possible, where the consumed
//! characters are one of the identifiers in the named character references
//! table."
//!
//! The tokenizer walks this trie one code point at a time, remembering the
//! deepest node that carries a value. The trie is built once from the
//! generated [`ENTITIES`] table.

use std::sync::LazyLock;

use super::entities::ENTITIES;

/// Index of a trie node.
pub type TrieIndex = usize;

#[derive(Debug, Default)]
struct TrieNode {
    /// Children sorted by code point.
    children: Vec<(char, TrieIndex)>,
    /// Replacement text if the path to this node is a complete reference name.
    value: Option<&'static str>,
}

/// A trie over named character reference names (without the leading `&`).
#[derive(Debug)]
pub struct EntityTrie {
    nodes: Vec<TrieNode>,
}

impl EntityTrie {
    /// The root node; the empty name.
    pub const ROOT: TrieIndex = 0;

    fn build(entries: &[(&'static str, &'static str)]) -> Self {
        let mut nodes = vec![TrieNode::default()];
        for &(name, value) in entries {
            let mut at = Self::ROOT;
            for c in name.chars() {
                at = match nodes[at].children.binary_search_by_key(&c, |&(k, _)| k) {
                    Ok(i) => nodes[at].children[i].1,
                    Err(i) => {
                        let next = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[at].children.insert(i, (c, next));
                        next
                    }
                };
            }
            nodes[at].value = Some(value);
        }
        Self { nodes }
    }

    /// Step from `node` along `c`.
    #[must_use]
    pub fn child(&self, node: TrieIndex, c: char) -> Option<TrieIndex> {
        let children = &self.nodes.get(node)?.children;
        children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| children[i].1)
    }

    /// Replacement text for the name ending at `node`.
    #[must_use]
    pub fn value(&self, node: TrieIndex) -> Option<&'static str> {
        self.nodes.get(node).and_then(|n| n.value)
    }

    /// Number of nodes in the trie.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the trie holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// The trie of every named character reference.
pub static ENTITY_TRIE: LazyLock<EntityTrie> = LazyLock::new(|| EntityTrie::build(ENTITIES));

/// Look up a complete reference name (without the leading `&`).
///
/// ```
/// use weft_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz;"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    let trie = &*ENTITY_TRIE;
    let mut at = EntityTrie::ROOT;
    for c in name.chars() {
        at = trie.child(at, c)?;
    }
    trie.value(at)
}

/// Longest reference name that prefixes `input`, with matching stopped at
/// the first name ending in `;`.
///
/// Returns the number of bytes of `input` the name covers and its
/// replacement text.
#[must_use]
pub fn longest_match(input: &str) -> Option<(usize, &'static str)> {
    let trie = &*ENTITY_TRIE;
    let mut at = EntityTrie::ROOT;
    let mut best = None;
    for (i, c) in input.char_indices() {
        let Some(next) = trie.child(at, c) else {
            break;
        };
        at = next;
        if let Some(value) = trie.value(at) {
            best = Some((i + c.len_utf8(), value));
            if c == ';' {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_every_entity() {
        for &(name, value) in ENTITIES {
            assert_eq!(lookup_entity(name), Some(value), "{name}");
        }
    }

    #[test]
    fn prefixes_are_not_values() {
        assert_eq!(lookup_entity("no"), None);
        assert_eq!(lookup_entity(""), None);
    }

    #[test]
    fn longest_match_prefers_semicolon_form() {
        assert_eq!(longest_match("notin;"), Some((6, "\u{2209}")));
        assert_eq!(longest_match("notit"), Some((3, "\u{AC}")));
        assert_eq!(longest_match("amp;lt;"), Some((4, "&")));
        assert_eq!(longest_match("zzz"), None);
    }

    #[test]
    fn two_code_point_values() {
        assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{338}"));
    }
}
