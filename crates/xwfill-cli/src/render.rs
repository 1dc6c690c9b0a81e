//! Text rendering of a grid.

use xwfill_core::Crossword;
use xwfill_solver::Solution;

/// Drawn for blocked cells.
const BLOCK: char = '█';

/// Renders one line per row.
///
/// Fillable cells show their letter, or a space if no slot covers them;
/// blocked cells show [`BLOCK`].
pub(crate) fn render(crossword: &Crossword, solution: &Solution) -> String {
    let mut out = String::with_capacity((crossword.width() + 1) * crossword.height());
    for row in 0..crossword.height() {
        for col in 0..crossword.width() {
            let cell = if crossword.is_fillable(row, col) {
                solution.letter_at(row, col).unwrap_or(' ')
            } else {
                BLOCK
            };
            out.push(cell);
        }
        out.push('\n');
    }
    out
}
