use crate::{Square, UnitId, UnitKind};

/// The error type for applying or inverting an [`Action`](crate::Action),
/// and for placing units on a [`Board`](crate::Board).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    UnitOffBoard { unit: UnitId },
    TargetOccupied { target: Square },
    EmptyTarget { target: Square },
    OutOfReach { unit: UnitId, target: Square },
    NotAWall { target: Square },
    NoSwapPartner { target: Square },
    CannotBuild { kind: UnitKind },
    NeutralUnit { kind: UnitKind },
    /// The board is not in the state the action left it in.
    NotApplied,
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::UnitOffBoard { unit } =>
                write!(f, "Unit {} is not on the board", unit.index()),
            IllegalAction::TargetOccupied { target } =>
                write!(f, "Target square {} is already occupied", target),
            IllegalAction::EmptyTarget { target } =>
                write!(f, "Target square {} is empty", target),
            IllegalAction::OutOfReach { unit, target } =>
                write!(f, "Unit {} cannot act on square {} from where it stands", unit.index(), target),
            IllegalAction::NotAWall { target } =>
                write!(f, "Square {} does not hold a wall", target),
            IllegalAction::NoSwapPartner { target } =>
                write!(f, "There is no friendly unit to swap with on square {}", target),
            IllegalAction::CannotBuild { kind } =>
                write!(f, "A {} cannot build walls", kind),
            IllegalAction::NeutralUnit { kind } =>
                write!(f, "A {} must belong to white or black", kind),
            IllegalAction::NotApplied =>
                write!(f, "Tried to invert an action that is not the most recently applied one"),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Board`](crate::Board).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseBoardError {
    TooFewRows { found: usize },
    RowTooShort { row: usize, len: usize },
    UnknownIcon { row: usize, col: usize, icon: char },
    Placement { row: usize, col: usize, err: IllegalAction },
}

impl std::error::Error for ParseBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseBoardError::Placement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseBoardError::TooFewRows { found } =>
                write!(f, "Expected 9 rows, but the board only has {}", found),
            ParseBoardError::RowTooShort { row, len } =>
                write!(f, "Row {} has {} characters, expected at least 9", row, len),
            ParseBoardError::UnknownIcon { row, col, icon } =>
                write!(f, "Unknown unit icon '{}' at row {}, column {}", icon, row, col),
            ParseBoardError::Placement { row, col, .. } =>
                write!(f, "Could not place the unit at row {}, column {}", row, col),
        }
    }
}
