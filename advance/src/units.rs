use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Square;

/// Who owns a unit.
///
/// Walls belong to [`Side::Neutral`], which never takes a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Uppercase icons. Moves towards row 0.
    White,
    /// Lowercase icons. Moves towards row 8.
    Black,
    Neutral,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
            Side::Neutral => Side::Neutral,
        }
    }

    /// The row delta of a "forward" step for this side.
    pub fn direction(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
            Side::Neutral => 0,
        }
    }

    /// Whether this side takes turns, i.e. is not [`Side::Neutral`].
    pub fn is_player(self) -> bool {
        self != Side::Neutral
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
            Side::Neutral => write!(f, "neutral"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Side`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSideError {
    pub input: String,
}

impl std::error::Error for ParseSideError {}

impl std::fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a side, expected 'white' or 'black'",
            self.input
        )
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    /// Only the two playing sides can be parsed, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Side::White),
            "black" => Ok(Side::Black),
            _ => Err(ParseSideError {
                input: String::from(s),
            }),
        }
    }
}

/// The nine kinds of unit, including the ownerless wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UnitKind {
    Zombie,
    Builder,
    Jester,
    Miner,
    Sentinel,
    Catapult,
    Dragon,
    /// The unit that must never be left attackable.
    Leader,
    Wall,
}

/// What capturing a unit of each kind is worth, indexed by `UnitKind as usize`.
pub const UNIT_VALUES: [i32; 9] = [1, 2, 3, 4, 5, 6, 7, 10, 0];

impl UnitKind {
    pub const ALL: [UnitKind; 9] = [
        UnitKind::Zombie,
        UnitKind::Builder,
        UnitKind::Jester,
        UnitKind::Miner,
        UnitKind::Sentinel,
        UnitKind::Catapult,
        UnitKind::Dragon,
        UnitKind::Leader,
        UnitKind::Wall,
    ];

    pub fn value(self) -> i32 {
        UNIT_VALUES[self as usize]
    }

    /// The lowercase letter used in board files. Walls are always `#`.
    pub fn letter(self) -> char {
        match self {
            UnitKind::Zombie => 'z',
            UnitKind::Builder => 'b',
            UnitKind::Jester => 'j',
            UnitKind::Miner => 'm',
            UnitKind::Sentinel => 's',
            UnitKind::Catapult => 'c',
            UnitKind::Dragon => 'd',
            UnitKind::Leader => 'g',
            UnitKind::Wall => '#',
        }
    }

    /// Inverse of [`Self::letter()`], ignoring case.
    pub fn from_letter(letter: char) -> Option<UnitKind> {
        let lower = letter.to_ascii_lowercase();
        UnitKind::ALL.into_iter().find(|kind| kind.letter() == lower)
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Index of a unit in its [`Board`](crate::Board).
///
/// Ids are only meaningful for the board that handed them out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single unit. The owning [`Board`](crate::Board) is the only thing that mutates it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub(crate) kind: UnitKind,
    pub(crate) side: Side,
    /// `None` once the unit has been captured or removed.
    pub(crate) square: Option<Square>,
}

impl Unit {
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn square(&self) -> Option<Square> {
        self.square
    }

    pub fn is_on_board(&self) -> bool {
        self.square.is_some()
    }

    /// The board file character: uppercase for white, lowercase for black.
    pub fn icon(&self) -> char {
        match self.side {
            Side::White => self.kind.letter().to_ascii_uppercase(),
            Side::Black => self.kind.letter(),
            Side::Neutral => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_roundtrip_for_every_kind() {
        for kind in UnitKind::ALL {
            assert_eq!(UnitKind::from_letter(kind.letter()), Some(kind));
            assert_eq!(
                UnitKind::from_letter(kind.letter().to_ascii_uppercase()),
                Some(kind)
            );
        }
        assert_eq!(UnitKind::from_letter('x'), None);
    }

    #[test]
    fn leader_is_worth_most() {
        assert_eq!(UnitKind::Zombie.value(), 1);
        assert_eq!(UnitKind::Dragon.value(), 7);
        assert_eq!(UnitKind::Leader.value(), 10);
        assert!(UnitKind::ALL
            .into_iter()
            .all(|kind| kind.value() <= UnitKind::Leader.value()));
    }

    #[test]
    fn side_parsing_ignores_case() {
        assert_eq!("White".parse::<Side>(), Ok(Side::White));
        assert_eq!("BLACK".parse::<Side>(), Ok(Side::Black));
        assert!("neutral".parse::<Side>().is_err());
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.direction(), 1);
    }
}
