use xwfill_core::{Crossword, VariableId, WordId};

/// A partial mapping from variables to words.
///
/// The search grows an assignment by one variable per level and shrinks it
/// again when it backtracks.
///
/// # Examples
///
/// ```
/// use xwfill_core::{Crossword, VariableId, WordId};
/// use xwfill_solver::Assignment;
///
/// let crossword: Crossword = "___\n_##\n_##".parse()?;
/// let mut assignment = Assignment::new(&crossword);
/// assert!(assignment.is_empty());
///
/// assignment.assign(VariableId::new(0), WordId::new(2));
/// assert_eq!(assignment.get(VariableId::new(0)), Some(WordId::new(2)));
/// assert!(!assignment.is_complete());
/// # Ok::<(), xwfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<WordId>>,
    assigned: usize,
}

impl Assignment {
    /// Creates an empty assignment for the variables of `crossword`.
    #[must_use]
    pub fn new(crossword: &Crossword) -> Self {
        Self::with_variable_count(crossword.variables().len())
    }

    /// Creates an empty assignment for `count` variables.
    #[must_use]
    pub fn with_variable_count(count: usize) -> Self {
        Self {
            values: vec![None; count],
            assigned: 0,
        }
    }

    /// Returns the number of assigned variables.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.assigned
    }

    /// Returns `true` if no variable is assigned.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Returns `true` if every variable has a word.
    #[must_use]
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.assigned == self.values.len()
    }

    /// Returns the word assigned to `id`, if any.
    #[must_use]
    #[inline]
    pub fn get(&self, id: VariableId) -> Option<WordId> {
        self.values[id.index()]
    }

    /// Returns `true` if `id` has a word.
    #[must_use]
    #[inline]
    pub fn is_assigned(&self, id: VariableId) -> bool {
        self.values[id.index()].is_some()
    }

    /// Returns `true` if some variable already holds `word`.
    #[must_use]
    pub fn uses(&self, word: WordId) -> bool {
        self.values.contains(&Some(word))
    }

    /// Assigns `word` to `id`, returning the previous word.
    pub fn assign(&mut self, id: VariableId, word: WordId) -> Option<WordId> {
        let prior = self.values[id.index()].replace(word);
        if prior.is_none() {
            self.assigned += 1;
        }
        prior
    }

    /// Removes the word of `id`, returning it.
    pub fn unassign(&mut self, id: VariableId) -> Option<WordId> {
        let prior = self.values[id.index()].take();
        if prior.is_some() {
            self.assigned -= 1;
        }
        prior
    }

    /// Returns an iterator over the assigned `(variable, word)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.map(|w| (VariableId::new(i), w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_unassign_track_len() {
        let mut assignment = Assignment::with_variable_count(2);
        let [a, b] = [VariableId::new(0), VariableId::new(1)];

        assert_eq!(assignment.assign(a, WordId::new(5)), None);
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.assign(a, WordId::new(6)), Some(WordId::new(5)));
        assert_eq!(assignment.len(), 1);

        assignment.assign(b, WordId::new(7));
        assert!(assignment.is_complete());
        assert!(assignment.uses(WordId::new(7)));
        assert!(!assignment.uses(WordId::new(5)));

        assert_eq!(assignment.unassign(a), Some(WordId::new(6)));
        assert_eq!(assignment.unassign(a), None);
        assert_eq!(assignment.len(), 1);
        assert_eq!(
            assignment.iter().collect::<Vec<_>>(),
            [(b, WordId::new(7))]
        );
    }

    #[test]
    fn test_zero_variables_is_complete() {
        let assignment = Assignment::with_variable_count(0);
        assert!(assignment.is_complete());
        assert!(assignment.is_empty());
    }
}
