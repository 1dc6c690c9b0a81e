//! Grid geometry and the slots derived from it.

use std::{collections::HashMap, fmt, str::FromStr};

use crate::{Direction, Overlap, Variable, VariableId};

/// Character marking a fillable cell in the textual grid format.
pub const FILLABLE: char = '_';

/// Character used for blocked cells when a grid is formatted back to text.
pub const BLOCKED: char = '#';

/// Errors raised while building a [`Crossword`] from a grid description.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StructureError {
    /// The grid has no rows, or its first row has no cells.
    #[display("structure is empty")]
    Empty,
    /// A row's length differs from the first row's length.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// A variable that crosses another one, together with the shared cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor {
    /// The crossing variable.
    pub id: VariableId,
    /// Letter offsets of the shared cell, seen from the variable whose
    /// neighbors were requested.
    pub overlap: Overlap,
}

/// The static structure of a crossword puzzle.
///
/// A crossword is a rectangular grid of fillable and blocked cells. Building
/// one derives every slot ([`Variable`]) and every crossing between slots, so
/// that later queries are simple lookups.
///
/// Variables are numbered by [`VariableId`] in a fixed order: all down slots
/// (column by column, top to bottom), then all across slots (row by row, left
/// to right).
///
/// # Examples
///
/// ```
/// use xwfill_core::{Crossword, Direction, Overlap, Variable};
///
/// let crossword: Crossword = "#___\n#_##\n____".parse()?;
/// assert_eq!((crossword.height(), crossword.width()), (3, 4));
///
/// let down = crossword
///     .id_of(&Variable::new(0, 1, Direction::Down, 3))
///     .unwrap();
/// let across = crossword
///     .id_of(&Variable::new(0, 1, Direction::Across, 3))
///     .unwrap();
/// assert_eq!(
///     crossword.overlap(down, across),
///     Some(Overlap { this: 0, other: 0 })
/// );
/// # Ok::<(), xwfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    height: usize,
    width: usize,
    /// Row-major fillable flags.
    cells: Vec<bool>,
    variables: Vec<Variable>,
    index: HashMap<Variable, VariableId>,
    /// Neighbor lists indexed by `VariableId`, sorted by neighbor id.
    neighbors: Vec<Vec<Neighbor>>,
}

impl FromStr for Crossword {
    type Err = StructureError;

    /// Parses a grid where [`FILLABLE`] marks an open cell and any other
    /// character marks a blocked one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines().map(|line| line.chars().map(|c| c == FILLABLE)))
    }
}

impl Crossword {
    /// Builds a crossword from rows of fillable flags.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Empty`] if there are no rows or the first row
    /// is empty, and [`StructureError::RaggedRow`] if rows differ in length.
    pub fn from_rows<R, C>(rows: R) -> Result<Self, StructureError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = bool>,
    {
        let mut cells = vec![];
        let mut width = None;
        let mut height = 0;
        for (row, line) in rows.into_iter().enumerate() {
            let start = cells.len();
            cells.extend(line);
            let found = cells.len() - start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(StructureError::RaggedRow {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.filter(|&w| w > 0).ok_or(StructureError::Empty)?;
        Ok(Self::build(height, width, cells))
    }

    fn build(height: usize, width: usize, cells: Vec<bool>) -> Self {
        let fillable = |row: usize, col: usize| cells[row * width + col];

        let mut variables = vec![];
        for col in 0..width {
            let mut row = 0;
            while row < height {
                let start = row;
                while row < height && fillable(row, col) {
                    row += 1;
                }
                if row - start >= 2 {
                    variables.push(Variable::new(start, col, Direction::Down, row - start));
                }
                row += 1;
            }
        }
        for row in 0..height {
            let mut col = 0;
            while col < width {
                let start = col;
                while col < width && fillable(row, col) {
                    col += 1;
                }
                if col - start >= 2 {
                    variables.push(Variable::new(row, start, Direction::Across, col - start));
                }
                col += 1;
            }
        }

        let index = variables
            .iter()
            .enumerate()
            .map(|(i, &var)| (var, VariableId(i)))
            .collect::<HashMap<_, _>>();

        // Each cell is covered by at most one across and one down slot.
        let mut across_at = vec![None; height * width];
        let mut down_at = vec![None; height * width];
        for (i, var) in variables.iter().enumerate() {
            let slots = match var.direction {
                Direction::Across => &mut across_at,
                Direction::Down => &mut down_at,
            };
            for (offset, (row, col)) in var.cells().enumerate() {
                slots[row * width + col] = Some((VariableId(i), offset));
            }
        }

        let mut neighbors = vec![vec![]; variables.len()];
        for (across, down) in across_at.into_iter().zip(down_at) {
            let (Some((a, a_offset)), Some((d, d_offset))) = (across, down) else {
                continue;
            };
            let overlap = Overlap {
                this: a_offset,
                other: d_offset,
            };
            neighbors[a.0].push(Neighbor { id: d, overlap });
            neighbors[d.0].push(Neighbor {
                id: a,
                overlap: overlap.flip(),
            });
        }
        for list in &mut neighbors {
            list.sort_by_key(|n| n.id);
        }

        Self {
            height,
            width,
            cells,
            variables,
            index,
            neighbors,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns `true` if the cell at `(row, col)` can hold a letter.
    ///
    /// Cells outside the grid are reported as not fillable.
    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Returns all variables, indexed by [`VariableId`].
    #[must_use]
    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns an iterator over all variable ids in order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = VariableId> + use<> {
        (0..self.variables.len()).map(VariableId)
    }

    /// Returns the variable for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this crossword.
    #[must_use]
    #[inline]
    pub fn variable(&self, id: VariableId) -> Variable {
        self.variables[id.0]
    }

    /// Looks up the id of a variable.
    #[must_use]
    pub fn id_of(&self, variable: &Variable) -> Option<VariableId> {
        self.index.get(variable).copied()
    }

    /// Returns the variables crossing `id`, each with the shared cell.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this crossword.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, id: VariableId) -> &[Neighbor] {
        &self.neighbors[id.0]
    }

    /// Returns the number of variables crossing `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this crossword.
    #[must_use]
    #[inline]
    pub fn degree(&self, id: VariableId) -> usize {
        self.neighbors[id.0].len()
    }

    /// Returns where `a` and `b` cross, or `None` if they do not.
    ///
    /// The overlap is expressed from `a`'s side: `this` indexes into `a`,
    /// `other` into `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` was not produced by this crossword.
    #[must_use]
    pub fn overlap(&self, a: VariableId, b: VariableId) -> Option<Overlap> {
        let list = &self.neighbors[a.0];
        list.binary_search_by_key(&b, |n| n.id)
            .ok()
            .map(|i| list[i].overlap)
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.is_fillable(row, col) {
                    FILLABLE
                } else {
                    BLOCKED
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
