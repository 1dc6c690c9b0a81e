//! Backtracking search over a pruned [`DomainStore`].
//!
//! The heuristics are exposed as plain functions so they can be inspected on
//! hand-built states:
//!
//! - [`select_unassigned_variable`]: minimum remaining values, then highest
//!   degree.
//! - [`order_domain_values`]: least constraining value first.
//! - [`consistent`]: whether a partial assignment breaks any constraint.
//!
//! Ties are broken by variable id and dictionary order, which keeps runs
//! reproducible but is not part of the contract.

use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    time::{Duration, Instant},
};

use xwfill_core::{Crossword, Dictionary, VariableId, WordId};

use crate::{ArcConsistency, Assignment, BudgetExceeded, DomainStore, Propagation};

/// Only read the clock once per this many search nodes.
const TIME_CHECK_INTERVAL: usize = 64;

/// Picks the next variable to assign.
///
/// Among unassigned variables, chooses one with the fewest remaining
/// candidates; among those, one that crosses the most other variables.
/// Returns `None` when every variable is assigned.
#[must_use]
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<VariableId> {
    crossword
        .ids()
        .filter(|&id| !assignment.is_assigned(id))
        .min_by_key(|&id| (domains.size(id), Reverse(crossword.degree(id))))
}

/// Counts, for each candidate of `var`, how many candidates it would rule
/// out in the unassigned variables crossing `var`.
///
/// A neighbor candidate is ruled out when its letter at the shared cell
/// differs from the candidate's. The result follows the order of the domain.
#[must_use]
pub fn ruled_out_counts(
    crossword: &Crossword,
    dictionary: &Dictionary,
    domains: &DomainStore,
    assignment: &Assignment,
    var: VariableId,
) -> Vec<(WordId, usize)> {
    // Per unassigned neighbor: (offset in `var`, neighbor domain size, letter counts).
    let histograms = crossword
        .neighbors(var)
        .iter()
        .filter(|n| !assignment.is_assigned(n.id))
        .map(|n| {
            let mut counts = HashMap::<char, usize>::new();
            for &w in domains.domain(n.id) {
                if let Some(&c) = dictionary[w].letters().get(n.overlap.other) {
                    *counts.entry(c).or_default() += 1;
                }
            }
            (n.overlap.this, domains.size(n.id), counts)
        })
        .collect::<Vec<_>>();

    domains
        .domain(var)
        .iter()
        .map(|&w| {
            let letters = dictionary[w].letters();
            let ruled_out = histograms
                .iter()
                .map(|(offset, total, counts)| {
                    let agreeing = letters
                        .get(*offset)
                        .and_then(|c| counts.get(c))
                        .copied()
                        .unwrap_or(0);
                    total - agreeing
                })
                .sum();
            (w, ruled_out)
        })
        .collect()
}

/// Returns the candidates of `var`, least constraining first.
///
/// See [`ruled_out_counts`] for the measure. Candidates with equal counts keep
/// their domain order.
#[must_use]
pub fn order_domain_values(
    crossword: &Crossword,
    dictionary: &Dictionary,
    domains: &DomainStore,
    assignment: &Assignment,
    var: VariableId,
) -> Vec<WordId> {
    let mut scored = ruled_out_counts(crossword, dictionary, domains, assignment, var);
    scored.sort_by_key(|&(_, ruled_out)| ruled_out);
    scored.into_iter().map(|(w, _)| w).collect()
}

/// Returns `true` if the assignment violates no constraint.
///
/// An assignment is consistent when all its words are distinct, each word
/// has the length of its variable, and every pair of assigned crossing
/// variables agrees on the shared letter.
#[must_use]
pub fn consistent(crossword: &Crossword, dictionary: &Dictionary, assignment: &Assignment) -> bool {
    let mut used = HashSet::new();
    for (id, word) in assignment.iter() {
        if !used.insert(word) {
            return false;
        }
        let letters = dictionary[word].letters();
        if letters.len() != crossword.variable(id).length {
            return false;
        }
        for n in crossword.neighbors(id) {
            let Some(other) = assignment.get(n.id) else {
                continue;
            };
            if letters.get(n.overlap.this) != dictionary[other].letters().get(n.overlap.other) {
                return false;
            }
        }
    }
    true
}

/// Returns `true` if adding `var := word` to a consistent assignment keeps it
/// consistent.
///
/// Only the new pair is checked against the existing ones, so for a
/// consistent `assignment` this agrees with calling [`consistent`] on the
/// extended assignment.
#[must_use]
pub fn consistent_with(
    crossword: &Crossword,
    dictionary: &Dictionary,
    assignment: &Assignment,
    var: VariableId,
    word: WordId,
) -> bool {
    let letters = dictionary[word].letters();
    if letters.len() != crossword.variable(var).length {
        return false;
    }
    if assignment.uses(word) && assignment.get(var) != Some(word) {
        return false;
    }
    crossword.neighbors(var).iter().all(|n| {
        let Some(other) = assignment.get(n.id) else {
            return true;
        };
        letters.get(n.overlap.this) == dictionary[other].letters().get(n.overlap.other)
    })
}

/// Node and time limits for one search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    node_limit: Option<usize>,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
}

impl Budget {
    pub(crate) fn new(
        node_limit: Option<usize>,
        time_limit: Option<Duration>,
        start: Instant,
    ) -> Self {
        Self {
            node_limit,
            time_limit,
            deadline: time_limit.and_then(|limit| start.checked_add(limit)),
        }
    }

    fn check(&self, nodes: usize) -> Result<(), BudgetExceeded> {
        if let Some(limit) = self.node_limit
            && nodes > limit
        {
            return Err(BudgetExceeded::NodeLimit { limit });
        }
        if let (Some(deadline), Some(limit)) = (self.deadline, self.time_limit)
            && (nodes - 1) % TIME_CHECK_INTERVAL == 0
            && Instant::now() >= deadline
        {
            return Err(BudgetExceeded::TimeLimit { limit });
        }
        Ok(())
    }
}

/// Depth-first search that keeps one assignment and one domain store and
/// undoes its own changes on the way back up.
#[derive(Debug)]
pub(crate) struct Backtracker<'a> {
    crossword: &'a Crossword,
    dictionary: &'a Dictionary,
    arc_consistency: ArcConsistency<'a>,
    domains: DomainStore,
    assignment: Assignment,
    propagation: Propagation,
    budget: Budget,
    pub(crate) nodes: usize,
    pub(crate) values_tried: usize,
    pub(crate) backtracks: usize,
}

impl<'a> Backtracker<'a> {
    pub(crate) fn new(
        crossword: &'a Crossword,
        dictionary: &'a Dictionary,
        arc_consistency: ArcConsistency<'a>,
        domains: DomainStore,
        propagation: Propagation,
        budget: Budget,
    ) -> Self {
        Self {
            crossword,
            dictionary,
            arc_consistency,
            domains,
            assignment: Assignment::new(crossword),
            propagation,
            budget,
            nodes: 0,
            values_tried: 0,
            backtracks: 0,
        }
    }

    pub(crate) fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub(crate) fn arc_consistency(&self) -> &ArcConsistency<'a> {
        &self.arc_consistency
    }

    /// Searches for a complete assignment.
    ///
    /// On `Ok(true)` the assignment is complete. On `Ok(false)` or an error,
    /// the assignment and domains are back to where they started.
    pub(crate) fn run(&mut self) -> Result<bool, BudgetExceeded> {
        self.backtrack()
    }

    fn backtrack(&mut self) -> Result<bool, BudgetExceeded> {
        if self.assignment.is_complete() {
            return Ok(true);
        }
        self.nodes += 1;
        self.budget.check(self.nodes)?;

        let crossword = self.crossword;
        let dictionary = self.dictionary;
        let selected = select_unassigned_variable(crossword, &self.domains, &self.assignment);
        let Some(var) = selected else {
            return Ok(true);
        };
        let values =
            order_domain_values(crossword, dictionary, &self.domains, &self.assignment, var);
        log::trace!(
            "depth {}: {} has {} candidates",
            self.assignment.len(),
            crossword.variable(var),
            values.len()
        );

        for value in values {
            self.values_tried += 1;
            if !consistent_with(crossword, dictionary, &self.assignment, var, value) {
                continue;
            }

            let checkpoint = self.domains.checkpoint();
            self.assignment.assign(var, value);
            let result = if self.propagate(var, value) {
                self.backtrack()
            } else {
                Ok(false)
            };
            if matches!(result, Ok(true)) {
                return result;
            }
            self.assignment.unassign(var);
            self.domains.rollback(checkpoint);
            result?;
        }

        self.backtracks += 1;
        Ok(false)
    }

    /// Prunes domains after `var := value`; returns `false` if some
    /// unassigned variable is left without candidates.
    fn propagate(&mut self, var: VariableId, value: WordId) -> bool {
        match self.propagation {
            Propagation::None => true,
            Propagation::ForwardChecking => self.forward_check(var, value),
            Propagation::MaintainArcConsistency => {
                self.forward_check(var, value) && self.maintain_arc_consistency(var)
            }
        }
    }

    fn forward_check(&mut self, var: VariableId, value: WordId) -> bool {
        let crossword = self.crossword;
        self.domains.restrict_to(var, value);

        for id in crossword.ids() {
            if id == var || self.assignment.is_assigned(id) {
                continue;
            }
            if self.domains.remove(id, value) && self.domains.size(id) == 0 {
                return false;
            }
        }

        for n in crossword.neighbors(var) {
            if self.assignment.is_assigned(n.id) {
                continue;
            }
            let revised = self.arc_consistency.revise(&mut self.domains, n.id, var);
            if revised && self.domains.size(n.id) == 0 {
                return false;
            }
        }
        true
    }

    fn maintain_arc_consistency(&mut self, var: VariableId) -> bool {
        let crossword = self.crossword;
        let assignment = &self.assignment;
        let arcs = crossword
            .neighbors(var)
            .iter()
            .filter(|n| !assignment.is_assigned(n.id))
            .flat_map(|n| {
                crossword
                    .neighbors(n.id)
                    .iter()
                    .filter(|m| m.id != var)
                    .map(move |m| (m.id, n.id))
            })
            .collect::<Vec<_>>();
        let result = self.arc_consistency.run_from(&mut self.domains, arcs);
        result.is_ok()
    }
}
