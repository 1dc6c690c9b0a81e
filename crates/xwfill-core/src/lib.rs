//! Core data structures for crossword filling.
//!
//! This crate describes the static side of a crossword fill problem: the grid
//! geometry and the word list. Both are read-only once built and are shared by
//! the solver and any front end.
//!
//! # Overview
//!
//! - [`crossword`]: the grid ([`Crossword`]), the slots derived from it
//!   ([`Variable`]) and the cells where slots cross ([`Overlap`]).
//! - [`dictionary`]: the candidate words ([`Dictionary`]) addressed by
//!   [`WordId`].
//!
//! # Examples
//!
//! ```
//! use xwfill_core::{Crossword, Dictionary, Direction};
//!
//! let crossword: Crossword = "
//! ___
//! _##
//! _##
//! "
//! .trim_start()
//! .parse()?;
//!
//! assert_eq!(crossword.variables().len(), 2);
//! let down = crossword.variables()[0];
//! assert_eq!(down.direction, Direction::Down);
//!
//! let dictionary = Dictionary::new(["CAT", "CAR", "ART"]);
//! assert_eq!(dictionary.ids_with_length(3).count(), 3);
//! # Ok::<(), xwfill_core::StructureError>(())
//! ```

pub mod crossword;
pub mod dictionary;
mod variable;

pub use self::{
    crossword::{Crossword, Neighbor, StructureError},
    dictionary::{Dictionary, Word, WordId},
    variable::{Direction, Overlap, Variable, VariableId},
};
