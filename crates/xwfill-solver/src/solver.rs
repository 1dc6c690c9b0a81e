use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use xwfill_core::{Crossword, Dictionary, Variable};

use crate::{
    ArcConsistency, Assignment, DomainStore, DomainWipeout,
    search::{self, Backtracker, Budget},
};

/// Look-ahead applied after each tentative assignment during search.
///
/// Every mode only discards words that cannot appear in any completion, so
/// they all accept and reject the same puzzles; they differ in how many
/// nodes the search visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Propagation {
    /// Plain backtracking; domains stay as arc consistency left them.
    #[display("none")]
    None,
    /// Removes the chosen word from every other open slot and revises each
    /// open crossing slot against the new assignment.
    #[default]
    #[display("forward checking")]
    ForwardChecking,
    /// Forward checking followed by AC-3 on the arcs into the crossing slots.
    #[display("maintain arc consistency")]
    MaintainArcConsistency,
}

/// Settings for a [`CrosswordSolver`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use xwfill_solver::{Propagation, SolverConfig};
///
/// let config = SolverConfig::new()
///     .with_propagation(Propagation::MaintainArcConsistency)
///     .with_node_limit(10_000)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(config.node_limit(), Some(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    propagation: Propagation,
    node_limit: Option<usize>,
    time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Creates the default configuration: forward checking, no limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the look-ahead mode.
    #[must_use]
    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    /// Stops the search after visiting `limit` nodes.
    #[must_use]
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Stops the search once `limit` has elapsed since [`CrosswordSolver::solve`]
    /// was called.
    ///
    /// The clock is sampled periodically, so the search may run slightly past
    /// the limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Returns the look-ahead mode.
    #[must_use]
    pub fn propagation(&self) -> Propagation {
        self.propagation
    }

    /// Returns the node limit, if any.
    #[must_use]
    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }

    /// Returns the time limit, if any.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    nodes: usize,
    values_tried: usize,
    backtracks: usize,
    revisions: usize,
    removals: usize,
}

impl SearchStats {
    /// Returns the number of search nodes, i.e. variables selected for
    /// assignment.
    ///
    /// Zero when the puzzle was decided before search.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Returns the number of candidate words tried.
    #[must_use]
    pub fn values_tried(&self) -> usize {
        self.values_tried
    }

    /// Returns the number of nodes at which every candidate failed.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Returns the number of arc revisions, before and during search.
    #[must_use]
    pub fn revisions(&self) -> usize {
        self.revisions
    }

    /// Returns the number of candidates removed by arc revisions.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.removals
    }
}

/// A complete fill: one word per slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    words: BTreeMap<Variable, String>,
}

impl Solution {
    fn from_assignment(
        crossword: &Crossword,
        dictionary: &Dictionary,
        assignment: &Assignment,
    ) -> Self {
        let words = assignment
            .iter()
            .map(|(id, w)| (crossword.variable(id), dictionary[w].as_str().to_owned()))
            .collect();
        Self { words }
    }

    /// Returns the number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the puzzle had no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the word placed in `variable`.
    #[must_use]
    pub fn get(&self, variable: &Variable) -> Option<&str> {
        self.words.get(variable).map(String::as_str)
    }

    /// Returns the slots and their words, ordered by slot.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Variable, &str)> {
        self.words.iter().map(|(var, word)| (var, word.as_str()))
    }

    /// Returns the letter in cell `(row, col)`.
    ///
    /// Returns `None` for cells that no slot covers: blocked cells, cells
    /// outside the grid, and fillable cells in runs shorter than two.
    #[must_use]
    pub fn letter_at(&self, row: usize, col: usize) -> Option<char> {
        self.words.iter().find_map(|(var, word)| {
            var.offset_of(row, col)
                .and_then(|offset| word.chars().nth(offset))
        })
    }

    /// Maps the solution back to word ids of `dictionary`.
    ///
    /// Returns `None` if a slot is not part of `crossword` or a word is not in
    /// `dictionary`.
    #[must_use]
    pub fn to_assignment(
        &self,
        crossword: &Crossword,
        dictionary: &Dictionary,
    ) -> Option<Assignment> {
        let mut assignment = Assignment::new(crossword);
        for (var, word) in &self.words {
            assignment.assign(crossword.id_of(var)?, dictionary.find(word)?);
        }
        Some(assignment)
    }
}

/// Why a puzzle has no fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Unsatisfiable {
    /// No dictionary word has the length of a slot.
    #[display("no word has the length of {variable}")]
    EmptyDomain {
        /// The slot without candidates.
        variable: Variable,
    },
    /// Arc consistency removed every candidate of a slot.
    #[display("no candidate for {variable} fits its crossings")]
    ArcInconsistent {
        /// The slot whose candidates ran out.
        variable: Variable,
    },
    /// The search tried every candidate without finding a fill.
    #[display("every combination of candidates was tried")]
    SearchExhausted,
}

/// The search was stopped before it could decide the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BudgetExceeded {
    /// More nodes were needed than allowed.
    #[display("search exceeded the limit of {limit} nodes")]
    NodeLimit {
        /// The configured node limit.
        limit: usize,
    },
    /// The deadline passed.
    #[display("search exceeded the time limit of {limit:?}")]
    TimeLimit {
        /// The configured time limit.
        limit: Duration,
    },
}

/// The result of [`CrosswordSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveOutcome {
    /// A complete, consistent fill was found.
    Solved(Solution),
    /// The puzzle provably has no fill.
    NoSolution(Unsatisfiable),
    /// The search budget ran out; the puzzle may or may not have a fill.
    BudgetExceeded(BudgetExceeded),
}

impl SolveOutcome {
    /// Returns the fill, if one was found.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::NoSolution(_) | Self::BudgetExceeded(_) => None,
        }
    }

    /// Consumes the outcome and returns the fill, if one was found.
    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::NoSolution(_) | Self::BudgetExceeded(_) => None,
        }
    }
}

/// An outcome together with the counters collected while reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// What the solver concluded.
    pub outcome: SolveOutcome,
    /// How much work it took.
    pub stats: SearchStats,
}

/// Fills a crossword from a dictionary.
///
/// Solving enforces node consistency, then arc consistency, then runs a
/// backtracking search configured by [`SolverConfig`]. Puzzles decided by
/// the first two phases never enter the search.
///
/// # Examples
///
/// ```
/// use xwfill_core::{Crossword, Dictionary};
/// use xwfill_solver::{CrosswordSolver, SolveOutcome, SolverConfig, Unsatisfiable};
///
/// let crossword: Crossword = "_____".parse()?;
/// let dictionary = Dictionary::new(["CAT", "DOGS"]);
///
/// let report = CrosswordSolver::with_config(&crossword, &dictionary, SolverConfig::new())
///     .solve();
/// assert!(matches!(
///     report.outcome,
///     SolveOutcome::NoSolution(Unsatisfiable::EmptyDomain { .. })
/// ));
/// assert_eq!(report.stats.nodes(), 0);
/// # Ok::<(), xwfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CrosswordSolver<'a> {
    crossword: &'a Crossword,
    dictionary: &'a Dictionary,
    config: SolverConfig,
}

impl<'a> CrosswordSolver<'a> {
    /// Creates a solver with the default configuration.
    #[must_use]
    pub fn new(crossword: &'a Crossword, dictionary: &'a Dictionary) -> Self {
        Self::with_config(crossword, dictionary, SolverConfig::default())
    }

    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn with_config(
        crossword: &'a Crossword,
        dictionary: &'a Dictionary,
        config: SolverConfig,
    ) -> Self {
        Self {
            crossword,
            dictionary,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the puzzle.
    ///
    /// A [`SolveOutcome::Solved`] result is always complete and consistent.
    /// Calling this again repeats the work from scratch.
    #[must_use]
    pub fn solve(&self) -> SolveReport {
        let start = Instant::now();
        let crossword = self.crossword;
        let dictionary = self.dictionary;
        let mut stats = SearchStats::default();

        let mut domains = DomainStore::with_node_consistency(crossword, dictionary);
        log::debug!(
            "node consistency: {} candidates over {} variables",
            domains.total_size(),
            domains.variable_count()
        );
        if let Some(id) = domains.first_empty() {
            let variable = crossword.variable(id);
            log::debug!("no word fits {variable}");
            return SolveReport {
                outcome: SolveOutcome::NoSolution(Unsatisfiable::EmptyDomain { variable }),
                stats,
            };
        }

        let mut arc_consistency = ArcConsistency::new(crossword, dictionary);
        let result = arc_consistency.run(&mut domains);
        stats.revisions = arc_consistency.revisions();
        stats.removals = arc_consistency.removals();
        if let Err(DomainWipeout { variable }) = result {
            let variable = crossword.variable(variable);
            log::debug!("ac3 emptied the domain of {variable}");
            return SolveReport {
                outcome: SolveOutcome::NoSolution(Unsatisfiable::ArcInconsistent { variable }),
                stats,
            };
        }
        log::debug!(
            "ac3: {} revisions, {} removals, {} candidates left",
            stats.revisions,
            stats.removals,
            domains.total_size()
        );
        domains.commit();

        let budget = Budget::new(self.config.node_limit, self.config.time_limit, start);
        let mut backtracker = Backtracker::new(
            crossword,
            dictionary,
            arc_consistency,
            domains,
            self.config.propagation,
            budget,
        );
        let result = backtracker.run();

        stats.nodes = backtracker.nodes;
        stats.values_tried = backtracker.values_tried;
        stats.backtracks = backtracker.backtracks;
        stats.revisions = backtracker.arc_consistency().revisions();
        stats.removals = backtracker.arc_consistency().removals();

        let outcome = match result {
            Ok(true) => {
                let assignment = backtracker.assignment();
                debug_assert!(assignment.is_complete());
                debug_assert!(search::consistent(crossword, dictionary, assignment));
                SolveOutcome::Solved(Solution::from_assignment(
                    crossword, dictionary, assignment,
                ))
            }
            Ok(false) => SolveOutcome::NoSolution(Unsatisfiable::SearchExhausted),
            Err(exceeded) => SolveOutcome::BudgetExceeded(exceeded),
        };
        log::debug!(
            "search ({}) finished in {:?}: {} nodes, {} values tried, {} backtracks",
            self.config.propagation,
            start.elapsed(),
            stats.nodes,
            stats.values_tried,
            stats.backtracks
        );

        SolveReport { outcome, stats }
    }
}
