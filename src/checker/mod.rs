pub mod dictionary;
pub mod distance;
pub mod trie;

use crate::{Config, Report};
use anyhow::{Context, Result};
use dictionary::Dictionary;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Outcome of checking one word against the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The word is in the dictionary.
    Ok,
    /// Dictionary words one edit away, sorted ascending.
    Suggestions(Vec<String>),
    /// Nothing within one edit.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// The query as written by the caller, case preserved.
    pub word: String,
    pub verdict: Verdict,
}

pub struct Corrector {
    dictionary: Dictionary,
}

impl Corrector {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// Build a corrector from the configured word list (if any) plus `words`.
    pub fn from_config<I, S>(config: &Config, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = match &config.dictionary {
            Some(path) => Dictionary::load_from_path(path)
                .with_context(|| format!("Failed to load dictionary: {}", path.display()))?,
            None => Dictionary::new(),
        };
        dictionary.add_words(words);

        debug!(words = dictionary.len(), "dictionary ready");

        Ok(Self::new(dictionary))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn correct(&self, word: &str) -> Correction {
        let verdict = if self.dictionary.find(word) {
            Verdict::Ok
        } else {
            let similar = self.dictionary.find_similar_words(word);
            if similar.is_empty() {
                Verdict::Unknown
            } else {
                Verdict::Suggestions(similar.into_iter().collect())
            }
        };

        trace!(word, ?verdict, "checked");

        Correction {
            word: word.to_string(),
            verdict,
        }
    }

    /// Check every word, keeping input order.
    ///
    /// With `parallel` the lookups fan out over the rayon pool; the
    /// dictionary is only read, so the threads share it directly.
    pub fn correct_all<S>(&self, words: &[S], parallel: bool) -> Report
    where
        S: AsRef<str> + Sync,
    {
        debug!(queries = words.len(), parallel, "correcting batch");

        let corrections: Vec<Correction> = if parallel {
            words
                .par_iter()
                .map(|word| self.correct(word.as_ref()))
                .collect()
        } else {
            words.iter().map(|word| self.correct(word.as_ref())).collect()
        };

        Report { corrections }
    }
}
