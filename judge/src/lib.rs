mod error;
mod game;
mod player;
mod recording;
mod referee;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;
pub use referee::*;

/// The usual starting position.
pub const OPENING: &str = include_str!("../boards/opening.txt");

#[cfg(test)]
mod tests {
    use advance::{Board, Side};

    use super::*;

    #[test]
    fn opening_is_a_valid_board() {
        let board: Board = OPENING.parse().unwrap();
        assert_eq!(board.to_notation(), OPENING);
        assert!(board.has_leader(Side::White) && board.has_leader(Side::Black));
    }
}
