use std::fmt;

/// The direction in which a slot is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Direction {
    /// Left to right along a row.
    #[display("across")]
    Across,
    /// Top to bottom along a column.
    #[display("down")]
    Down,
}

/// A slot in the grid that must hold exactly one word.
///
/// A variable is a maximal run of fillable cells in one direction. It is
/// identified by its starting cell, its direction and its length.
///
/// # Examples
///
/// ```
/// use xwfill_core::{Direction, Variable};
///
/// let var = Variable::new(1, 2, Direction::Down, 4);
/// assert_eq!(var.cell(3), (4, 2));
/// assert_eq!(var.to_string(), "(1, 2) down : 4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub col: usize,
    /// Reading direction.
    pub direction: Direction,
    /// Number of cells in the slot.
    pub length: usize,
}

impl Variable {
    /// Creates a new variable.
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Returns the `(row, col)` of the `offset`-th letter of this slot.
    ///
    /// The offset is not checked against the slot length.
    #[must_use]
    #[inline]
    pub const fn cell(&self, offset: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + offset),
            Direction::Down => (self.row + offset, self.col),
        }
    }

    /// Returns an iterator over all `(row, col)` cells covered by this slot.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + use<> {
        let this = *self;
        (0..self.length).map(move |offset| this.cell(offset))
    }

    /// Returns the offset of `(row, col)` within this slot, if the slot covers it.
    #[must_use]
    pub fn offset_of(&self, row: usize, col: usize) -> Option<usize> {
        let offset = match self.direction {
            Direction::Across if row == self.row && col >= self.col => col - self.col,
            Direction::Down if col == self.col && row >= self.row => row - self.row,
            _ => return None,
        };
        (offset < self.length).then_some(offset)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

/// Dense index of a [`Variable`] within one [`Crossword`](crate::Crossword).
///
/// Ids are assigned in the order returned by
/// [`Crossword::variables`](crate::Crossword::variables) and are only
/// meaningful for the crossword that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct VariableId(pub(crate) usize);

impl VariableId {
    /// Creates an id from a raw index.
    ///
    /// Ids built this way are only meaningful if `index` is less than the
    /// number of variables in the crossword they are used with.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index, suitable for indexing per-variable tables.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The cell shared by two crossing variables.
///
/// `this` is the letter offset within the first variable of the pair and
/// `other` the offset within the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    /// Letter offset within the variable the overlap was looked up from.
    pub this: usize,
    /// Letter offset within the neighboring variable.
    pub other: usize,
}

impl Overlap {
    /// Returns the same overlap seen from the other variable.
    #[must_use]
    #[inline]
    pub const fn flip(self) -> Self {
        Self {
            this: self.other,
            other: self.this,
        }
    }
}
