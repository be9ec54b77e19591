//! The plain-text board format used to hand positions to bots.
//!
//! A board is 9 lines of 9 characters. `.` or a space is an empty square, `#`
//! is a wall, and any other character is the first letter of a unit kind
//! (`g` for the leader), uppercase for white and lowercase for black.

use std::str::FromStr;

use crate::{Board, ParseBoardError, Side, Square, UnitKind, BOARD_SIZE};

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Extra lines and characters past the ninth column are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = BOARD_SIZE as usize;
        let rows: Vec<&str> = s.lines().take(size).collect();
        if rows.len() < size {
            return Err(ParseBoardError::TooFewRows { found: rows.len() });
        }

        let mut board = Board::new();
        for (row, line) in rows.into_iter().enumerate() {
            let line = line.trim_end_matches('\r');
            let icons: Vec<char> = line.chars().take(size).collect();
            if icons.len() < size {
                return Err(ParseBoardError::RowTooShort {
                    row,
                    len: icons.len(),
                });
            }
            let squares = Square::all().skip(row * size);
            for ((col, icon), square) in icons.into_iter().enumerate().zip(squares) {
                if icon == '.' || icon == ' ' {
                    continue;
                }
                let kind = UnitKind::from_letter(icon)
                    .ok_or(ParseBoardError::UnknownIcon { row, col, icon })?;
                let side = if kind == UnitKind::Wall {
                    Side::Neutral
                } else if icon.is_ascii_uppercase() {
                    Side::White
                } else {
                    Side::Black
                };
                board
                    .place(kind, side, square)
                    .map_err(|err| ParseBoardError::Placement { row, col, err })?;
            }
        }
        Ok(board)
    }
}

impl Board {
    /// Writes the board in the same format that [`Board::from_str`] reads,
    /// with `.` for empty squares.
    pub fn to_notation(&self) -> String {
        let size = BOARD_SIZE as usize;
        let mut result = String::with_capacity(size * (size + 1));
        for square in Square::all() {
            result.push(self.occupant_unit(square).map_or('.', |unit| unit.icon()));
            if square.col() == BOARD_SIZE - 1 {
                result.push('\n');
            }
        }
        result
    }
}
