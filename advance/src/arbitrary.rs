use quickcheck::{Arbitrary, Gen};

use crate::{Board, Side, Square, UnitKind, CELL_COUNT};

/// A sparse board with random units of both sides, and the side to move.
#[derive(Clone, Debug)]
pub struct Position {
    pub board: Board,
    pub side: Side,
}

impl Arbitrary for Position {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board = Board::new();
        for square in Square::all() {
            if u8::arbitrary(g) % 6 != 0 {
                continue;
            }
            let kind = *g.choose(&UnitKind::ALL).unwrap();
            board.place(kind, Side::arbitrary(g), square).unwrap();
        }
        // Most games still have their leaders.
        for side in [Side::White, Side::Black] {
            if u8::arbitrary(g) % 4 == 0 {
                continue;
            }
            let free: Vec<Square> = Square::all().filter(|&sq| board.is_free(sq)).collect();
            if let Some(&square) = g.choose(&free) {
                board.place(UnitKind::Leader, side, square).unwrap();
            }
        }
        Position {
            board,
            side: Side::arbitrary(g),
        }
    }
}

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Side::White, Side::Black]).unwrap()
    }
}

impl Arbitrary for Square {
    fn arbitrary(g: &mut Gen) -> Self {
        Square::from_index(usize::arbitrary(g) % CELL_COUNT).unwrap()
    }
}
