//! Arc consistency (AC-3) over crossing slots.
//!
//! An arc `(x, y)` is consistent when every word left for `x` has at least one
//! word left for `y` with the same letter in their shared cell. AC-3 keeps a
//! FIFO worklist of arcs and revises them until nothing changes or a domain
//! runs dry.
//!
//! Arc consistency is necessary but not sufficient for a fill: the rule that
//! no word appears twice is not a binary letter constraint, so a search is
//! still needed afterwards.

use std::collections::{HashSet, VecDeque};

use xwfill_core::{Crossword, Dictionary, VariableId};

use crate::DomainStore;

/// AC-3 emptied the domain of a variable, so the puzzle has no fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no candidate word left for variable {variable}")]
pub struct DomainWipeout {
    /// The variable whose domain became empty.
    pub variable: VariableId,
}

/// Enforces arc consistency on a [`DomainStore`].
///
/// The engine borrows the puzzle and counts the revisions it performs and the
/// candidates it removes, so callers can report them.
///
/// # Examples
///
/// ```
/// use xwfill_core::{Crossword, Dictionary, VariableId};
/// use xwfill_solver::{ArcConsistency, DomainStore};
///
/// // An across slot whose middle letter starts a down slot.
/// let crossword: Crossword = "___\n#_#\n#_#".parse()?;
/// let dictionary = Dictionary::new(["CAT", "ARE", "DOG"]);
/// let mut domains = DomainStore::new(&crossword, &dictionary);
/// domains.enforce_node_consistency(&crossword, &dictionary);
///
/// let mut ac3 = ArcConsistency::new(&crossword, &dictionary);
/// ac3.run(&mut domains)?;
///
/// let [down, across] = [VariableId::new(0), VariableId::new(1)];
/// assert_eq!(domains.domain(across), [dictionary.find("CAT").unwrap()]);
/// assert_eq!(domains.domain(down), [dictionary.find("ARE").unwrap()]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArcConsistency<'a> {
    crossword: &'a Crossword,
    dictionary: &'a Dictionary,
    revisions: usize,
    removals: usize,
}

impl<'a> ArcConsistency<'a> {
    /// Creates an engine for one puzzle.
    #[must_use]
    pub fn new(crossword: &'a Crossword, dictionary: &'a Dictionary) -> Self {
        Self {
            crossword,
            dictionary,
            revisions: 0,
            removals: 0,
        }
    }

    /// Returns how many arcs with an overlap have been revised so far.
    #[must_use]
    pub fn revisions(&self) -> usize {
        self.revisions
    }

    /// Returns how many candidates have been removed so far.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.removals
    }

    /// Returns every ordered pair of crossing variables.
    #[must_use]
    pub fn all_arcs(&self) -> Vec<(VariableId, VariableId)> {
        self.crossword
            .ids()
            .flat_map(|x| self.crossword.neighbors(x).iter().map(move |n| (x, n.id)))
            .collect()
    }

    /// Makes `x` arc consistent with `y`.
    ///
    /// Removes from the domain of `x` every word that has no partner in the
    /// domain of `y` at their shared cell. Does nothing if the two variables
    /// do not cross.
    ///
    /// Returns `true` if the domain of `x` changed.
    pub fn revise(&mut self, domains: &mut DomainStore, x: VariableId, y: VariableId) -> bool {
        let Some(overlap) = self.crossword.overlap(x, y) else {
            return false;
        };
        self.revisions += 1;

        let dictionary = self.dictionary;
        let supported = domains
            .domain(y)
            .iter()
            .filter_map(|&w| dictionary[w].letters().get(overlap.other).copied())
            .collect::<HashSet<_>>();

        let before = domains.size(x);
        let changed = domains.retain(x, |w| {
            dictionary[w]
                .letters()
                .get(overlap.this)
                .is_some_and(|c| supported.contains(c))
        });
        self.removals += before - domains.size(x);
        changed
    }

    /// Runs AC-3 starting from every arc in the puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`DomainWipeout`] as soon as a domain becomes empty; the store
    /// is left in its partially pruned state.
    pub fn run(&mut self, domains: &mut DomainStore) -> Result<(), DomainWipeout> {
        let arcs = self.all_arcs();
        self.run_from(domains, arcs)
    }

    /// Runs AC-3 starting from the given arcs.
    ///
    /// Whenever the domain of `x` shrinks while revising `(x, y)`, every arc
    /// `(z, x)` with `z` a neighbor of `x` other than `y` is queued again.
    ///
    /// # Errors
    ///
    /// Returns [`DomainWipeout`] as soon as a domain becomes empty; the store
    /// is left in its partially pruned state.
    pub fn run_from<I>(&mut self, domains: &mut DomainStore, arcs: I) -> Result<(), DomainWipeout>
    where
        I: IntoIterator<Item = (VariableId, VariableId)>,
    {
        let crossword = self.crossword;
        let mut queue = arcs.into_iter().collect::<VecDeque<_>>();
        while let Some((x, y)) = queue.pop_front() {
            if !self.revise(domains, x, y) {
                continue;
            }
            if domains.size(x) == 0 {
                log::trace!("ac3: domain of {} wiped out", crossword.variable(x));
                return Err(DomainWipeout { variable: x });
            }
            queue.extend(
                crossword
                    .neighbors(x)
                    .iter()
                    .filter(|n| n.id != y)
                    .map(|n| (n.id, x)),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xwfill_core::Direction;

    use super::*;
    use crate::testing;

    fn pruned(crossword: &Crossword, dictionary: &Dictionary) -> DomainStore {
        let mut domains = DomainStore::new(crossword, dictionary);
        domains.enforce_node_consistency(crossword, dictionary);
        domains
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let crossword = testing::crossword("___\n###\n___");
        let dictionary = Dictionary::new(["ABC", "XYZ"]);
        let mut domains = pruned(&crossword, &dictionary);
        let mut ac3 = ArcConsistency::new(&crossword, &dictionary);

        let [top, bottom] = [VariableId::new(0), VariableId::new(1)];
        domains.restrict_to(bottom, dictionary.find("XYZ").unwrap());
        assert!(!ac3.revise(&mut domains, top, bottom));
        assert_eq!(domains.size(top), 2);
        assert_eq!(ac3.revisions(), 0);
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let crossword = testing::crossword("___\n_##\n_##");
        let dictionary = Dictionary::new(["CAT", "DOG", "COW"]);
        let mut domains = pruned(&crossword, &dictionary);
        let down = testing::id(&crossword, 0, 0, Direction::Down);
        let across = testing::id(&crossword, 0, 0, Direction::Across);

        domains.restrict_to(across, dictionary.find("DOG").unwrap());
        assert!(ac3_revise(&crossword, &dictionary, &mut domains, down, across));
        assert_eq!(testing::words(&dictionary, domains.domain(down)), ["DOG"]);
        assert!(!ac3_revise(&crossword, &dictionary, &mut domains, down, across));
    }

    fn ac3_revise(
        crossword: &Crossword,
        dictionary: &Dictionary,
        domains: &mut DomainStore,
        x: VariableId,
        y: VariableId,
    ) -> bool {
        let mut ac3 = ArcConsistency::new(crossword, dictionary);
        ac3.revise(domains, x, y)
    }

    #[test]
    fn test_all_arcs_are_ordered_neighbor_pairs() {
        let crossword = testing::crossword("_____\n_#_#_\n_#_#_");
        let dictionary = Dictionary::default();
        let ac3 = ArcConsistency::new(&crossword, &dictionary);
        let arcs = ac3.all_arcs();
        // Three downs each cross the single across: 3 pairs, both orders.
        assert_eq!(arcs.len(), 6);
        for (x, y) in arcs {
            assert!(crossword.overlap(x, y).is_some());
        }
    }

    #[test]
    fn test_run_propagates_through_chain() {
        // Two downs hanging off one across; pruning one down must reach the
        // other through the across.
        let crossword = testing::crossword("___\n_#_\n_#_");
        let dictionary = Dictionary::new(["ABC", "AXX", "CYY", "BZZ", "QQQ"]);
        let mut domains = pruned(&crossword, &dictionary);
        let left = testing::id(&crossword, 0, 0, Direction::Down);
        let right = testing::id(&crossword, 0, 2, Direction::Down);
        let across = testing::id(&crossword, 0, 0, Direction::Across);

        domains.restrict_to(left, dictionary.find("AXX").unwrap());
        let mut ac3 = ArcConsistency::new(&crossword, &dictionary);
        ac3.run(&mut domains).unwrap();

        assert_eq!(testing::words(&dictionary, domains.domain(across)), ["ABC"]);
        assert_eq!(testing::words(&dictionary, domains.domain(right)), ["CYY"]);
        assert!(ac3.removals() > 0);
    }

    #[test]
    fn test_run_detects_wipeout() {
        let crossword = testing::crossword("___\n_##\n_##");
        let dictionary = Dictionary::new(["ABC", "XYZ"]);
        let mut domains = pruned(&crossword, &dictionary);
        let down = testing::id(&crossword, 0, 0, Direction::Down);
        let across = testing::id(&crossword, 0, 0, Direction::Across);
        domains.restrict_to(down, dictionary.find("ABC").unwrap());
        domains.restrict_to(across, dictionary.find("XYZ").unwrap());

        let mut ac3 = ArcConsistency::new(&crossword, &dictionary);
        let wipeout = ac3.run(&mut domains).unwrap_err();
        assert!(wipeout.variable == down || wipeout.variable == across);
        assert_eq!(domains.size(wipeout.variable), 0);
    }

    #[test]
    fn test_run_with_empty_neighbor_domain_fails() {
        let crossword = testing::crossword("___\n_##\n_##");
        let dictionary = Dictionary::new(["ABC", "ACE"]);
        let mut domains = pruned(&crossword, &dictionary);
        let across = testing::id(&crossword, 0, 0, Direction::Across);
        domains.retain(across, |_| false);

        let mut ac3 = ArcConsistency::new(&crossword, &dictionary);
        assert!(ac3.run(&mut domains).is_err());
    }

    #[test]
    fn test_run_from_empty_worklist_changes_nothing() {
        let crossword = testing::crossword("___\n_##\n_##");
        let dictionary = Dictionary::new(["ABC", "XYZ"]);
        let mut domains = pruned(&crossword, &dictionary);
        let before = domains.clone();
        ArcConsistency::new(&crossword, &dictionary)
            .run_from(&mut domains, [])
            .unwrap();
        assert_eq!(domains, before);
    }

    proptest! {
        #[test]
        fn test_run_is_monotonic_and_reaches_fixpoint(
            words in prop::collection::vec("[A-C]{3}", 1..25),
        ) {
            let crossword = testing::crossword("___\n_#_\n___");
            let dictionary = Dictionary::new(&words);
            let mut domains = pruned(&crossword, &dictionary);
            let before = domains.clone();

            let mut ac3 = ArcConsistency::new(&crossword, &dictionary);
            let result = ac3.run(&mut domains);

            for id in crossword.ids() {
                prop_assert!(domains.size(id) <= before.size(id));
                prop_assert!(domains.domain(id).iter().all(|&w| before.contains(id, w)));
            }

            if result.is_ok() {
                // Every remaining word has support in every neighbor.
                let mut fresh = ArcConsistency::new(&crossword, &dictionary);
                for (x, y) in ac3.all_arcs() {
                    let mut check = domains.clone();
                    prop_assert!(!fresh.revise(&mut check, x, y));
                }
            }
        }
    }
}
