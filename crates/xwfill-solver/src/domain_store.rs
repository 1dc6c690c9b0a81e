use std::mem;

use xwfill_core::{Crossword, Dictionary, VariableId, WordId};

/// A position in the undo trail of a [`DomainStore`].
///
/// Obtained from [`DomainStore::checkpoint`] and consumed by
/// [`DomainStore::rollback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// The candidate words of every variable, with an undo trail.
///
/// Domains only ever shrink. Every shrinking mutation records the variable's
/// previous domain on a trail, so a search branch can take a
/// [`checkpoint`](Self::checkpoint) before it prunes and
/// [`rollback`](Self::rollback) afterwards, leaving sibling branches exactly
/// the state they would have seen without it.
///
/// Each domain is kept in ascending [`WordId`] order.
///
/// # Examples
///
/// ```
/// use xwfill_core::{Crossword, Dictionary, VariableId};
/// use xwfill_solver::DomainStore;
///
/// let crossword: Crossword = "___".parse()?;
/// let dictionary = Dictionary::new(["AB", "ABC", "XYZ"]);
/// let mut domains = DomainStore::new(&crossword, &dictionary);
/// let var = VariableId::new(0);
/// assert_eq!(domains.size(var), 3);
///
/// let checkpoint = domains.checkpoint();
/// domains.enforce_node_consistency(&crossword, &dictionary);
/// assert_eq!(domains.size(var), 2);
///
/// domains.rollback(checkpoint);
/// assert_eq!(domains.size(var), 3);
/// # Ok::<(), xwfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<Vec<WordId>>,
    /// `(variable, domain before the change)`, oldest first.
    trail: Vec<(VariableId, Vec<WordId>)>,
}

impl DomainStore {
    /// Creates a store in which every variable may take every dictionary word.
    ///
    /// This copies the whole word list into every slot; prefer
    /// [`with_node_consistency`](Self::with_node_consistency) unless the
    /// unfiltered domains are needed.
    #[must_use]
    pub fn new(crossword: &Crossword, dictionary: &Dictionary) -> Self {
        let all = dictionary.ids().collect::<Vec<_>>();
        Self {
            domains: vec![all; crossword.variables().len()],
            trail: vec![],
        }
    }

    /// Creates a node-consistent store directly, seeding each variable with
    /// only the words of its length.
    ///
    /// Equivalent to [`new`](Self::new) followed by
    /// [`enforce_node_consistency`](Self::enforce_node_consistency) and
    /// [`commit`](Self::commit).
    #[must_use]
    pub fn with_node_consistency(crossword: &Crossword, dictionary: &Dictionary) -> Self {
        let domains = crossword
            .variables()
            .iter()
            .map(|var| dictionary.ids_with_length(var.length).collect())
            .collect();
        Self {
            domains,
            trail: vec![],
        }
    }

    /// Returns the number of variables tracked.
    #[must_use]
    #[inline]
    pub fn variable_count(&self) -> usize {
        self.domains.len()
    }

    /// Returns the candidate words of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    #[inline]
    pub fn domain(&self, id: VariableId) -> &[WordId] {
        &self.domains[id.index()]
    }

    /// Returns the number of candidate words of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    #[inline]
    pub fn size(&self, id: VariableId) -> usize {
        self.domains[id.index()].len()
    }

    /// Returns `true` if `word` is still a candidate for `id`.
    #[must_use]
    pub fn contains(&self, id: VariableId, word: WordId) -> bool {
        self.domain(id).binary_search(&word).is_ok()
    }

    /// Returns the first variable whose domain is empty, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<VariableId> {
        self.domains
            .iter()
            .position(Vec::is_empty)
            .map(VariableId::new)
    }

    /// Returns the total number of candidates over all variables.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.domains.iter().map(Vec::len).sum()
    }

    /// Keeps only the candidates of `id` for which `keep` returns `true`.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn retain<F>(&mut self, id: VariableId, mut keep: F) -> bool
    where
        F: FnMut(WordId) -> bool,
    {
        let domain = &self.domains[id.index()];
        let Some(first_removed) = domain.iter().position(|&w| !keep(w)) else {
            return false;
        };
        let mut kept = Vec::with_capacity(domain.len() - 1);
        kept.extend_from_slice(&domain[..first_removed]);
        kept.extend(
            domain[first_removed + 1..]
                .iter()
                .copied()
                .filter(|&w| keep(w)),
        );
        self.replace(id, kept);
        true
    }

    /// Removes a single candidate from `id`.
    ///
    /// Returns `true` if it was present.
    pub fn remove(&mut self, id: VariableId, word: WordId) -> bool {
        if !self.contains(id, word) {
            return false;
        }
        self.retain(id, |w| w != word)
    }

    /// Reduces the domain of `id` to the single candidate `word`.
    ///
    /// If `word` is not a candidate the domain becomes empty. Returns `true`
    /// if the domain changed.
    pub fn restrict_to(&mut self, id: VariableId, word: WordId) -> bool {
        self.retain(id, |w| w == word)
    }

    /// Keeps only words whose length equals the variable's length.
    ///
    /// Applying this more than once has no further effect.
    pub fn enforce_node_consistency(&mut self, crossword: &Crossword, dictionary: &Dictionary) {
        for id in crossword.ids() {
            let length = crossword.variable(id).length;
            self.retain(id, |w| dictionary[w].len() == length);
        }
    }

    /// Marks the current state so it can be restored with [`rollback`](Self::rollback).
    #[must_use]
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undoes every change made since `checkpoint` was taken.
    ///
    /// Checkpoints must be rolled back in reverse order of creation.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.trail.len());
        while self.trail.len() > checkpoint.0 {
            let Some((id, prior)) = self.trail.pop() else {
                break;
            };
            self.domains[id.index()] = prior;
        }
    }

    /// Forgets the undo trail, making the current state permanent.
    ///
    /// Checkpoints taken before this call become invalid.
    pub fn commit(&mut self) {
        self.trail.clear();
    }

    fn replace(&mut self, id: VariableId, domain: Vec<WordId>) {
        let prior = mem::replace(&mut self.domains[id.index()], domain);
        self.trail.push((id, prior));
    }
}
