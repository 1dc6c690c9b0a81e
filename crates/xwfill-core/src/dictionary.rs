//! The word list used to fill a crossword.

use std::{collections::BTreeSet, fmt, ops::Index};

/// Index of a word within a [`Dictionary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct WordId(usize);

impl WordId {
    /// Creates an id from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A candidate word, stored both as text and as a letter sequence.
///
/// Letters are Unicode scalar values, so [`Word::len`] counts letters rather
/// than bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: Box<str>,
    letters: Box<[char]>,
}

impl Word {
    fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            letters: text.chars().collect(),
        }
    }

    /// Returns the word as a string slice.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the number of letters.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` if the word has no letters.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the letter at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not less than [`Word::len`].
    #[must_use]
    #[inline]
    pub fn letter(&self, offset: usize) -> char {
        self.letters[offset]
    }

    /// Returns all letters in order.
    #[must_use]
    #[inline]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// An immutable set of candidate words.
///
/// Entries are kept exactly as given apart from dropping empty strings and
/// duplicates; trimming and case folding belong to whoever reads the word
/// file. Words are stored in sorted order, so [`WordId`]s are deterministic
/// for a given set of words.
///
/// # Examples
///
/// ```
/// use xwfill_core::Dictionary;
///
/// let dictionary = Dictionary::new(["TWO", "ONE", "", "THREE", "ONE"]);
/// assert_eq!(dictionary.len(), 3);
/// assert!(dictionary.contains("THREE"));
///
/// let three_letters = dictionary
///     .ids_with_length(3)
///     .map(|id| dictionary[id].as_str())
///     .collect::<Vec<_>>();
/// assert_eq!(three_letters, ["ONE", "TWO"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    words: Vec<Word>,
    /// Word ids grouped by letter count; `by_length[n]` holds words of length `n`.
    by_length: Vec<Vec<WordId>>,
}

impl Dictionary {
    /// Builds a dictionary from a list of words.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique = words
            .into_iter()
            .filter(|w| !w.as_ref().is_empty())
            .map(|w| w.as_ref().to_owned())
            .collect::<BTreeSet<_>>();
        let words = unique.iter().map(|w| Word::new(w)).collect::<Vec<_>>();

        let mut by_length: Vec<Vec<WordId>> = vec![];
        for (i, word) in words.iter().enumerate() {
            if by_length.len() <= word.len() {
                by_length.resize_with(word.len() + 1, Vec::new);
            }
            by_length[word.len()].push(WordId(i));
        }

        Self { words, by_length }
    }

    /// Returns the number of words.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the dictionary has no words.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the word for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this dictionary.
    #[must_use]
    #[inline]
    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    /// Returns `true` if `text` is one of the words.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Returns the id of `text`, if it is one of the words.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<WordId> {
        self.words
            .binary_search_by(|w| w.as_str().cmp(text))
            .ok()
            .map(WordId)
    }

    /// Returns every word id in order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = WordId> + use<> {
        (0..self.words.len()).map(WordId)
    }

    /// Returns the ids of the words with exactly `length` letters.
    pub fn ids_with_length(&self, length: usize) -> impl ExactSizeIterator<Item = WordId> + '_ {
        self.by_length
            .get(length)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .copied()
    }

    /// Returns an iterator over `(id, word)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate().map(|(i, w)| (WordId(i), w))
    }
}

impl Index<WordId> for Dictionary {
    type Output = Word;

    #[inline]
    fn index(&self, id: WordId) -> &Word {
        self.word(id)
    }
}
