use super::trie::CompressedTrie;
use crate::error::DictionaryError;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Case-insensitive word set backed by a [`CompressedTrie`].
///
/// Words and queries are both folded to lowercase here; the trie itself
/// only ever sees lowercase text.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    trie: CompressedTrie,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new();
        dictionary.add_words(words);
        dictionary
    }

    /// Load a newline-separated word list. Blank lines and `#` comments are skipped.
    pub fn load_from_path(path: &Path) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::from_words(crate::parser::parse_word_list(&content));
        info!(
            path = %path.display(),
            words = dictionary.len(),
            "loaded word list"
        );

        Ok(dictionary)
    }

    pub fn add_word(&mut self, word: &str) {
        let word = normalize(word);
        if !self.trie.insert(&word) {
            debug!(word = %word, "skipped duplicate or empty word");
        }
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add_word(word.as_ref());
        }
    }

    /// Whether `word` is a dictionary word, ignoring case.
    pub fn find(&self, word: &str) -> bool {
        self.trie.contains(&normalize(word))
    }

    /// Dictionary words within one edit of `word`, in lowercase.
    pub fn find_similar_words(&self, word: &str) -> BTreeSet<String> {
        self.trie.fuzzy_find(&normalize(word))
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// All words in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        self.trie.words()
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
