//! Compressed prefix tree (radix trie) with single-typo fuzzy search.
//!
//! Each edge carries a multi-character label; chains of single-child nodes
//! are merged at insertion time, so the tree never holds a non-terminal node
//! with exactly one child below the root.

use super::distance::{distance_chars, within_one, MAX_EDITS};
use std::collections::{BTreeMap, BTreeSet};
use std::mem;

#[derive(Debug, Clone, Default)]
struct Node {
    /// Edge segment consumed to reach this node from its parent.
    label: String,
    /// Keyed by the first char of each child's label.
    children: BTreeMap<char, Node>,
    /// The root-to-node concatenation of labels is a stored word.
    terminal: bool,
}

impl Node {
    fn leaf(label: &str) -> Self {
        Self {
            label: label.to_string(),
            children: BTreeMap::new(),
            terminal: true,
        }
    }

    /// Inserts `word`, read relative to this node's position in the tree.
    /// Returns `true` if the word was not stored yet.
    fn insert(&mut self, word: &str) -> bool {
        let (at, diverging) = mismatch(&self.label, word);

        let Some(label_char) = diverging else {
            // The whole label is a prefix of `word`: descend.
            let rest = &word[at..];
            let Some(first) = rest.chars().next() else {
                let added = !self.terminal;
                self.terminal = true;
                return added;
            };

            return match self.children.get_mut(&first) {
                Some(child) => child.insert(rest),
                None => {
                    self.children.insert(first, Node::leaf(rest));
                    true
                }
            };
        };

        self.split(at, label_char, &word[at..]);
        true
    }

    /// Splits this node after the first `at` bytes of its label.
    ///
    /// The label tail (starting with `label_char`), the current children and
    /// terminal flag move into a new child; `rest` is the part of the word
    /// being inserted that follows the shared prefix. Empty `rest` means the
    /// shared prefix itself is the new word.
    fn split(&mut self, at: usize, label_char: char, rest: &str) {
        let tail = Node {
            label: self.label.split_off(at),
            children: mem::take(&mut self.children),
            terminal: self.terminal,
        };
        self.children.insert(label_char, tail);

        match rest.chars().next() {
            None => self.terminal = true,
            Some(first) => {
                self.terminal = false;
                self.children.insert(first, Node::leaf(rest));
            }
        }
    }

    /// Depth-first collection of words within one edit of `target`.
    ///
    /// `collected` is the root-to-node spelling including this node's label.
    /// A child subtree is skipped when no prefix of `target` whose length is
    /// within one of the child's spelling is itself within one edit of it:
    /// every word below would then need at least two edits as well.
    fn collect_similar(&self, target: &[char], collected: Vec<char>, found: &mut BTreeSet<String>) {
        if self.terminal && distance_chars(target, &collected) <= MAX_EDITS {
            found.insert(collected.iter().collect());
        }

        for child in self.children.values() {
            let mut candidate = collected.clone();
            candidate.extend(child.label.chars());

            if may_lead_to_match(target, &candidate) {
                child.collect_similar(target, candidate, found);
            }
        }
    }

    fn collect_words(&self, prefix: &mut String, out: &mut Vec<String>) {
        let len = prefix.len();
        prefix.push_str(&self.label);

        if self.terminal {
            out.push(prefix.clone());
        }
        for child in self.children.values() {
            child.collect_words(prefix, out);
        }

        prefix.truncate(len);
    }
}

/// Length in bytes of the common prefix of `label` and `word`, plus the
/// label char at which they diverge (`None` when `label` is exhausted).
fn mismatch(label: &str, word: &str) -> (usize, Option<char>) {
    let mut word_chars = word.chars();

    for (offset, label_char) in label.char_indices() {
        if word_chars.next() != Some(label_char) {
            return (offset, Some(label_char));
        }
    }

    (label.len(), None)
}

/// Pruning test for the subtree spelled by `candidate`.
///
/// The three prefix lengths cover net deletion, pure substitution and net
/// insertion in the part of `target` aligned with `candidate` so far.
fn may_lead_to_match(target: &[char], candidate: &[char]) -> bool {
    let len = candidate.len();

    [len.saturating_sub(1), len, len + 1]
        .into_iter()
        .any(|end| distance_chars(&target[..end.min(target.len())], candidate) <= MAX_EDITS)
}

/// A set of words stored as a compressed prefix tree.
///
/// Built once, then queried; the tree is never modified during a search.
#[derive(Debug, Clone, Default)]
pub struct CompressedTrie {
    root: Option<Node>,
    len: usize,
}

impl CompressedTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `word` to the set. Empty words are ignored, duplicates are no-ops.
    ///
    /// Complexity: O(L) for a word of length L; every step either descends
    /// one edge or performs a single split.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let added = match &mut self.root {
            Some(root) => root.insert(word),
            None => {
                self.root = Some(Node::leaf(word));
                true
            }
        };

        if added {
            self.len += 1;
        }
        added
    }

    /// Exact membership test.
    ///
    /// Complexity: O(L); each node's label is compared once and the next
    /// child is picked by its first char.
    pub fn contains(&self, word: &str) -> bool {
        let Some(mut node) = self.root.as_ref() else {
            return false;
        };
        let mut rest = word;

        loop {
            let Some(tail) = rest.strip_prefix(node.label.as_str()) else {
                return false;
            };
            let Some(first) = tail.chars().next() else {
                return node.terminal;
            };
            match node.children.get(&first) {
                Some(child) => {
                    node = child;
                    rest = tail;
                }
                None => return false,
            }
        }
    }

    /// Stored words within one edit of `word`.
    ///
    /// An exact hit short-circuits to `{word}`. Otherwise the tree is walked
    /// depth first, pruning every subtree whose spelling already needs two
    /// edits against every plausible alignment with a prefix of `word`.
    ///
    /// Complexity: O(s * L^2) in the worst case, where L is the length of
    /// `word` and s the number of branches that survive pruning.
    pub fn fuzzy_find(&self, word: &str) -> BTreeSet<String> {
        let Some(root) = self.root.as_ref() else {
            return BTreeSet::new();
        };

        if root.children.is_empty() {
            return if root.terminal && within_one(word, &root.label) {
                BTreeSet::from([root.label.clone()])
            } else {
                BTreeSet::new()
            };
        }

        if self.contains(word) {
            return BTreeSet::from([word.to_string()]);
        }

        let target: Vec<char> = word.chars().collect();
        let mut found = BTreeSet::new();
        root.collect_similar(&target, root.label.chars().collect(), &mut found);
        found
    }

    /// All stored words in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            root.collect_words(&mut String::new(), &mut out);
        }
        out
    }

    /// Checks the structural invariants of the tree.
    #[cfg(test)]
    fn assert_well_formed(&self) {
        fn walk(node: &Node, is_root: bool) {
            if !is_root {
                assert!(!node.label.is_empty(), "empty edge label below root");
                assert!(
                    node.terminal || node.children.len() >= 2,
                    "non-terminal node {:?} does not branch",
                    node.label
                );
            }
            for (key, child) in &node.children {
                assert_eq!(child.label.chars().next(), Some(*key));
                walk(child, false);
            }
        }
        if let Some(root) = &self.root {
            walk(root, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn trie_of(words: &[&str]) -> CompressedTrie {
        let mut trie = CompressedTrie::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_trie() {
        let trie = CompressedTrie::new();
        assert!(trie.is_empty());
        assert!(!trie.contains("cat"));
        assert!(!trie.contains(""));
        assert!(trie.fuzzy_find("cat").is_empty());
    }

    #[test]
    fn test_first_word_becomes_root() {
        let trie = trie_of(&["cat"]);
        assert_eq!(trie.len(), 1);
        assert!(trie.contains("cat"));
        assert!(!trie.contains("ca"));
        assert!(!trie.contains("cats"));
        trie.assert_well_formed();
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut trie = CompressedTrie::new();
        assert!(!trie.insert(""));
        assert!(trie.is_empty());
        assert!(!trie.contains(""));
    }

    #[test]
    fn test_split_on_partial_overlap() {
        let trie = trie_of(&["cat", "car"]);
        assert!(trie.contains("cat"));
        assert!(trie.contains("car"));
        assert!(!trie.contains("ca"));
        assert_eq!(trie.len(), 2);
        trie.assert_well_formed();
    }

    #[test]
    fn test_split_with_no_common_prefix() {
        let trie = trie_of(&["cat", "dog"]);
        assert!(trie.contains("cat"));
        assert!(trie.contains("dog"));
        assert!(!trie.contains(""));
        trie.assert_well_formed();
    }

    #[test]
    fn test_prefix_word_inserted_after_longer_word() {
        let trie = trie_of(&["cart", "car"]);
        assert!(trie.contains("car"));
        assert!(trie.contains("cart"));
        assert!(!trie.contains("ca"));
        trie.assert_well_formed();
    }

    #[test]
    fn test_longer_word_inserted_after_prefix_word() {
        let trie = trie_of(&["car", "cart", "carts"]);
        assert!(trie.contains("car"));
        assert!(trie.contains("cart"));
        assert!(trie.contains("carts"));
        assert!(!trie.contains("cars"));
        trie.assert_well_formed();
    }

    #[test]
    fn test_shared_prefix_remarked_as_word() {
        let mut trie = trie_of(&["cat", "car"]);
        assert!(!trie.contains("ca"));
        assert!(trie.insert("ca"));
        assert!(trie.contains("ca"));
        assert_eq!(trie.len(), 3);
        trie.assert_well_formed();
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut trie = trie_of(&["cat", "car", "dog"]);
        assert!(!trie.insert("cat"));
        assert!(!trie.insert("dog"));
        assert_eq!(trie.len(), 3);
        assert!(trie.contains("cat"));
    }

    #[test]
    fn test_deep_descent_through_several_splits() {
        let trie = trie_of(&["romane", "romanus", "romulus", "rubens", "ruber", "rubicon", "rubicundus"]);
        for word in ["romane", "romanus", "romulus", "rubens", "ruber", "rubicon", "rubicundus"] {
            assert!(trie.contains(word), "missing {word}");
        }
        assert!(!trie.contains("rom"));
        assert!(!trie.contains("rubic"));
        assert_eq!(trie.len(), 7);
        trie.assert_well_formed();
    }

    #[test]
    fn test_multibyte_labels() {
        let trie = trie_of(&["ёжик", "ёлка", "еж"]);
        assert!(trie.contains("ёжик"));
        assert!(trie.contains("ёлка"));
        assert!(trie.contains("еж"));
        assert!(!trie.contains("ё"));
        assert_eq!(trie.fuzzy_find("ёжек"), set(&["ёжик"]));
        trie.assert_well_formed();
    }

    #[test]
    fn test_words_are_sorted() {
        let trie = trie_of(&["dog", "cat", "car", "ca", "do"]);
        assert_eq!(trie.words(), vec!["ca", "car", "cat", "do", "dog"]);
    }

    #[test]
    fn test_fuzzy_single_node() {
        let trie = trie_of(&["cat"]);
        assert_eq!(trie.fuzzy_find("cat"), set(&["cat"]));
        assert_eq!(trie.fuzzy_find("cut"), set(&["cat"]));
        assert!(trie.fuzzy_find("cute").is_empty());
    }

    #[test]
    fn test_fuzzy_scenarios() {
        let trie = trie_of(&["cat", "car", "dog"]);
        assert_eq!(trie.fuzzy_find("cat"), set(&["cat"]));
        assert_eq!(trie.fuzzy_find("cot"), set(&["cat"]));
        assert_eq!(trie.fuzzy_find("ca"), set(&["car", "cat"]));
        assert!(trie.fuzzy_find("xyz").is_empty());
        assert_eq!(trie.fuzzy_find("dgo"), set(&["dog"]));
    }

    #[test]
    fn test_fuzzy_exact_match_short_circuits() {
        let trie = trie_of(&["car", "cart", "cat"]);
        assert_eq!(trie.fuzzy_find("car"), set(&["car"]));
        assert_eq!(trie.fuzzy_find("cas"), set(&["car", "cat"]));
    }

    #[test]
    fn test_fuzzy_terminal_root_with_children() {
        let trie = trie_of(&["ca", "cat"]);
        assert_eq!(trie.fuzzy_find("c"), set(&["ca"]));
        assert_eq!(trie.fuzzy_find("cast"), set(&["cat"]));
    }

    #[test]
    fn test_fuzzy_empty_query_matches_single_chars() {
        let trie = trie_of(&["a", "ab", "b"]);
        assert_eq!(trie.fuzzy_find(""), set(&["a", "b"]));
    }

    #[test]
    fn test_fuzzy_insertion_inside_label() {
        let trie = trie_of(&["transposition", "transport", "dog"]);
        assert_eq!(trie.fuzzy_find("transpostion"), set(&["transposition"]));
        assert_eq!(trie.fuzzy_find("trnasport"), set(&["transport"]));
        assert_eq!(trie.fuzzy_find("transpport"), set(&["transport"]));
    }

    fn brute_force(words: &[String], query: &str) -> BTreeSet<String> {
        if words.iter().any(|w| w == query) {
            return BTreeSet::from([query.to_string()]);
        }
        words
            .iter()
            .filter(|w| within_one(query, w))
            .cloned()
            .collect()
    }

    proptest! {
        #[test]
        fn prop_contains_exactly_inserted(words in prop::collection::vec("[abc]{1,5}", 0..20), probe in "[abc]{0,5}") {
            let mut trie = CompressedTrie::new();
            for word in &words {
                trie.insert(word);
            }
            trie.assert_well_formed();

            for word in &words {
                prop_assert!(trie.contains(word));
            }
            prop_assert_eq!(trie.contains(&probe), words.contains(&probe));

            let distinct: BTreeSet<&String> = words.iter().collect();
            prop_assert_eq!(trie.len(), distinct.len());
        }

        #[test]
        fn prop_insertion_order_is_irrelevant(words in prop::collection::vec("[abcd]{1,6}", 0..16)) {
            let mut forward = CompressedTrie::new();
            let mut backward = CompressedTrie::new();
            for word in &words {
                forward.insert(word);
            }
            for word in words.iter().rev() {
                backward.insert(word);
            }
            prop_assert_eq!(forward.words(), backward.words());
        }

        /// Pruning never drops a word a full scan would accept.
        #[test]
        fn prop_fuzzy_matches_full_scan(words in prop::collection::vec("[abc]{1,6}", 1..24), query in "[abc]{0,7}") {
            let mut trie = CompressedTrie::new();
            for word in &words {
                trie.insert(word);
            }
            prop_assert_eq!(trie.fuzzy_find(&query), brute_force(&words, &query));
        }

        #[test]
        fn prop_stored_words_find_themselves(words in prop::collection::vec("[a-e]{1,8}", 1..24)) {
            let mut trie = CompressedTrie::new();
            for word in &words {
                trie.insert(word);
            }
            for word in &words {
                prop_assert!(trie.fuzzy_find(word).contains(word));
            }
        }
    }
}
