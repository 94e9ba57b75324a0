use alloc::borrow::Cow;
use alloc::vec::Vec;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::hash_index::{word_hash, HashIndex, IndexPolicy};

/// A distinct word and the number of times it occurred.
///
/// Words are the raw token bytes, so input that is not UTF-8 keeps distinct
/// words distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabEntry {
    #[serde(serialize_with = "serialize_lossy")]
    pub word: Box<[u8]>,
    pub count: u64,
}

impl VocabEntry {
    /// The word for logs and reports; invalid UTF-8 shows as U+FFFD
    pub fn display_word(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.word)
    }
}

fn serialize_lossy<S: Serializer>(word: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(word))
}

/// Word -> count table over the whole corpus.
///
/// Entries live in insertion order in a growable vector until
/// [`finalize_and_sort`](Self::finalize_and_sort) reorders them alphabetically.
/// The hash index only stores positions into `entries`, so every reorder
/// rebuilds it from scratch.
#[derive(Debug)]
pub struct VocabularyTable {
    entries: Vec<VocabEntry>,
    index: HashIndex,
    // Extra entries reserved whenever the backing vector is about to fill up
    growth_step: usize,
    // Tokens seen so far. Recomputed from the counts on every sort
    total_tokens: u64,
}

impl VocabularyTable {
    pub fn new(index_capacity: usize, policy: IndexPolicy, growth_step: usize) -> Self {
        let growth_step = growth_step.max(1);
        Self {
            entries: Vec::with_capacity(growth_step),
            index: HashIndex::new(index_capacity, policy),
            growth_step,
            total_tokens: 0,
        }
    }

    /// Position of `word` in the current entry order
    pub fn lookup(&self, word: impl AsRef<[u8]>) -> Option<usize> {
        let word = word.as_ref();
        let entries = &self.entries;
        self.index
            .find(word_hash(word), |position| *entries[position].word == *word)
    }

    /// Counts one occurrence of `word` and returns its position
    pub fn insert_or_increment(&mut self, word: impl AsRef<[u8]>) -> Result<usize> {
        let word = word.as_ref();
        if let Some(position) = self.lookup(word) {
            self.entries[position].count += 1;
            self.total_tokens += 1;
            return Ok(position);
        }

        if self.index.needs_growth() {
            self.grow_index()?;
        }
        let position = self.entries.len();
        self.index.insert(word_hash(word), position)?;
        self.entries.push(VocabEntry {
            word: word.into(),
            count: 1,
        });
        if self.entries.len() + 2 >= self.entries.capacity() {
            self.entries.reserve_exact(self.growth_step);
        }
        self.total_tokens += 1;
        Ok(position)
    }

    fn grow_index(&mut self) -> Result<()> {
        let capacity = self.index.capacity() * 2;
        log::debug!(
            "Growing word index from {} to {} slots ({} words)",
            self.index.capacity(),
            capacity,
            self.entries.len()
        );
        self.index.reset(capacity);
        self.reindex()
    }

    // Inserts every entry position into an empty index
    fn reindex(&mut self) -> Result<()> {
        for (position, entry) in self.entries.iter().enumerate() {
            self.index.insert(word_hash(&entry.word), position)?;
        }
        Ok(())
    }

    /// Sorts entries by byte-wise word order, rebuilds the index against the
    /// new positions and recomputes the token total from the counts.
    pub fn finalize_and_sort(&mut self) -> Result<()> {
        self.entries.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        self.index.clear();
        self.reindex()?;
        self.total_tokens = self.entries.iter().map(|e| e.count).sum();
        self.entries.shrink_to(self.entries.len() + 1);
        Ok(())
    }

    /// (word, count) pairs in the current order
    pub fn snapshot_frequencies(&self) -> Vec<(Box<[u8]>, u64)> {
        self.entries
            .iter()
            .map(|e| (e.word.clone(), e.count))
            .collect()
    }

    /// The `n` most frequent entries, ties broken alphabetically
    pub fn most_frequent(&self, n: usize) -> Vec<&VocabEntry> {
        let mut ranked: Vec<&VocabEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        ranked.truncate(n);
        ranked
    }

    pub fn get(&self, position: usize) -> Option<&VocabEntry> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn index_capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Returns the number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
