use crate::{Board, Square, BOARD_SIZE};

/// Draws the board in a box with row and column numbers, for logs and terminals.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("   ");
    for col in 0..BOARD_SIZE {
        result += &format!(" {}", col);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮";
    for square in Square::all() {
        if square.col() == 0 {
            result += &format!("\n{:>2} │", square.row());
        }
        let icon = board.occupant_unit(square).map_or('·', |unit| unit.icon());
        result += &format!(" {}", icon);
        if square.col() == BOARD_SIZE - 1 {
            result += " │";
        }
    }
    result += "\n   ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯";
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}
