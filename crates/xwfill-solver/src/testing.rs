//! Test utilities for solver components.
//!
//! Fixtures are written as grid strings with `_` for fillable cells, the same
//! format the structure files use.

use std::collections::HashSet;

use xwfill_core::{Crossword, Dictionary, Direction, VariableId, WordId};

use crate::{Solution, search};

/// Parses a grid fixture, ignoring a leading newline.
///
/// # Panics
///
/// Panics if the grid is malformed.
#[track_caller]
pub(crate) fn crossword(s: &str) -> Crossword {
    s.trim_start_matches('\n').parse().unwrap()
}

/// Returns the id of the variable starting at `(row, col)` in `direction`.
///
/// # Panics
///
/// Panics if there is no such variable.
#[track_caller]
pub(crate) fn id(
    crossword: &Crossword,
    row: usize,
    col: usize,
    direction: Direction,
) -> VariableId {
    crossword
        .ids()
        .find(|&id| {
            let var = crossword.variable(id);
            var.row == row && var.col == col && var.direction == direction
        })
        .unwrap_or_else(|| panic!("no {direction} variable at ({row}, {col})"))
}

/// Returns the text of each word id.
pub(crate) fn words<'a>(dictionary: &'a Dictionary, ids: &[WordId]) -> Vec<&'a str> {
    ids.iter().map(|&w| dictionary[w].as_str()).collect()
}

/// Returns the word id of `text`.
///
/// # Panics
///
/// Panics if the word is not in the dictionary.
#[track_caller]
pub(crate) fn word(dictionary: &Dictionary, text: &str) -> WordId {
    dictionary
        .find(text)
        .unwrap_or_else(|| panic!("{text:?} is not in the dictionary"))
}

/// Asserts that `solution` is a complete, valid fill of `crossword`.
///
/// Checks that every variable has a word of the right length taken from the
/// dictionary, that no word is used twice, and that crossing variables agree
/// on their shared letters.
///
/// # Panics
///
/// Panics with a description of the first violation found.
#[track_caller]
pub(crate) fn assert_valid_solution(
    crossword: &Crossword,
    dictionary: &Dictionary,
    solution: &Solution,
) {
    assert_eq!(
        solution.len(),
        crossword.variables().len(),
        "Expected every variable to be filled"
    );

    let mut seen = HashSet::new();
    for (var, word) in solution.iter() {
        assert!(
            dictionary.contains(word),
            "Expected {word:?} for {var} to be a dictionary word"
        );
        assert_eq!(
            word.chars().count(),
            var.length,
            "Expected {word:?} to fit {var}"
        );
        assert!(seen.insert(word), "Expected {word:?} to be used only once");
    }

    for id in crossword.ids() {
        let var = crossword.variable(id);
        let word = solution.get(&var).unwrap().chars().collect::<Vec<_>>();
        for neighbor in crossword.neighbors(id) {
            let other = crossword.variable(neighbor.id);
            let other_word = solution.get(&other).unwrap().chars().collect::<Vec<_>>();
            assert_eq!(
                word[neighbor.overlap.this], other_word[neighbor.overlap.other],
                "Expected {var} and {other} to agree at their crossing"
            );
        }
    }

    let assignment = solution.to_assignment(crossword, dictionary).unwrap();
    assert!(
        search::consistent(crossword, dictionary, &assignment),
        "Expected the solution to pass the consistency check"
    );
}
