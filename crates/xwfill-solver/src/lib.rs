//! Crossword filling as a constraint satisfaction problem.
//!
//! Each slot of a [`Crossword`](xwfill_core::Crossword) is a variable whose
//! domain is a set of dictionary words. Crossing slots must agree on their
//! shared letter, and no word may be used twice.
//!
//! Solving runs in three phases:
//!
//! 1. **Node consistency**: each domain keeps only words of the slot's length
//!    ([`DomainStore::enforce_node_consistency`]).
//! 2. **Arc consistency**: AC-3 prunes words that have no partner in a
//!    crossing slot ([`ArcConsistency`]).
//! 3. **Backtracking search**: variables are chosen by minimum remaining
//!    values and degree, values by least-constraining-value, with optional
//!    look-ahead ([`search`], [`Propagation`]).
//!
//! [`CrosswordSolver`] drives all three phases and reports a
//! [`SolveOutcome`].
//!
//! # Examples
//!
//! ```
//! use xwfill_core::{Crossword, Dictionary};
//! use xwfill_solver::CrosswordSolver;
//!
//! let crossword: Crossword = "___\n_##\n_##".parse()?;
//! let dictionary = Dictionary::new(["CAT", "CAR", "ART"]);
//!
//! let report = CrosswordSolver::new(&crossword, &dictionary).solve();
//! let solution = report.outcome.solution().unwrap();
//! assert_eq!(solution.letter_at(0, 0), Some('C'));
//! # Ok::<(), xwfill_core::StructureError>(())
//! ```

pub use self::{
    arc_consistency::{ArcConsistency, DomainWipeout},
    assignment::Assignment,
    domain_store::{Checkpoint, DomainStore},
    solver::{
        BudgetExceeded, CrosswordSolver, Propagation, SearchStats, Solution, SolveOutcome,
        SolveReport, SolverConfig, Unsatisfiable,
    },
};

pub mod arc_consistency;
mod assignment;
mod domain_store;
pub mod search;
mod solver;

#[cfg(test)]
mod testing;
