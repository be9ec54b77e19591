use serde::Serialize;

use super::BOARD_SIZE;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A cell coordinate that is always inside the board.
///
/// The only way to obtain one is through a bounds-checked constructor, so
/// everything that takes a `Square` can index the board without checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// The square at the given row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self {
            row: (index / size) as i8,
            col: (index % size) as i8,
        })
    }

    pub fn row(self) -> i8 {
        self.row
    }

    pub fn col(self) -> i8 {
        self.col
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Every square, in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..CELL_COUNT).filter_map(Square::from_index)
    }

    /// The square `d_row` rows and `d_col` columns away, if it is on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::new(
            self.row.checked_add(d_row)?,
            self.col.checked_add(d_col)?,
        )
    }

    /// `(row, col)` difference from `self` to `other`.
    pub fn delta(self, other: Square) -> (i8, i8) {
        (other.row - self.row, other.col - self.col)
    }

    /// True for the (up to) eight surrounding squares.
    pub fn is_adjacent(self, other: Square) -> bool {
        let (d_row, d_col) = self.delta(other);
        d_row.abs().max(d_col.abs()) == 1
    }

    pub fn orthogonal_neighbours(self) -> impl Iterator<Item = Square> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(d_row, d_col)| self.offset(d_row, d_col))
    }

    pub fn adjacent_squares(self) -> impl Iterator<Item = Square> {
        [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ]
        .into_iter()
        .filter_map(move |(d_row, d_col)| self.offset(d_row, d_col))
    }

    /// The squares strictly between `self` and `other`, if they share a row,
    /// column or diagonal. Returns `None` for any other pair, including
    /// `self == other`.
    pub fn squares_between(self, other: Square) -> Option<impl Iterator<Item = Square>> {
        let (d_row, d_col) = self.delta(other);
        let is_line = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if self == other || !is_line {
            return None;
        }
        let (step_row, step_col) = (d_row.signum(), d_col.signum());
        let steps = d_row.abs().max(d_col.abs());
        Some((1..steps).filter_map(move |k| self.offset(k * step_row, k * step_col)))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).unwrap()
    }

    quickcheck! {
        fn index_roundtrip(sq: Square) -> bool {
            Square::from_index(sq.index()) == Some(sq)
        }
    }

    #[test]
    fn out_of_bounds_squares_do_not_exist() {
        assert!(Square::new(-1, 0).is_none());
        assert!(Square::new(0, 9).is_none());
        assert!(Square::from_index(CELL_COUNT).is_none());
        assert_eq!(sq(0, 0).offset(-1, 0), None);
        assert_eq!(sq(8, 8).offset(0, 1), None);
        assert_eq!(Square::all().count(), 81);
    }

    #[test]
    fn corner_has_three_neighbours() {
        assert_eq!(sq(0, 0).adjacent_squares().count(), 3);
        assert_eq!(sq(0, 0).orthogonal_neighbours().count(), 2);
        assert_eq!(sq(4, 4).adjacent_squares().count(), 8);
        assert!(sq(4, 4).is_adjacent(sq(5, 5)));
        assert!(!sq(4, 4).is_adjacent(sq(4, 4)));
        assert!(!sq(4, 4).is_adjacent(sq(6, 4)));
    }

    #[test]
    fn squares_between_follows_lines_only() {
        let between: Vec<_> = sq(1, 1).squares_between(sq(4, 4)).unwrap().collect();
        assert_eq!(between, vec![sq(2, 2), sq(3, 3)]);
        let between: Vec<_> = sq(5, 7).squares_between(sq(5, 4)).unwrap().collect();
        assert_eq!(between, vec![sq(5, 6), sq(5, 5)]);
        assert_eq!(sq(3, 3).squares_between(sq(3, 4)).unwrap().count(), 0);
        assert!(sq(0, 0).squares_between(sq(1, 2)).is_none());
        assert!(sq(0, 0).squares_between(sq(0, 0)).is_none());
    }
}
