mod square;

pub use square::*;

use crate::{IllegalAction, Side, Unit, UnitId, UnitKind};

pub const BOARD_SIZE: i8 = 9;

/// The 9x9 playing field together with every unit that was ever placed on it.
///
/// Units live in an arena and are referred to by [`UnitId`]. A unit records
/// the square it stands on, and that square records the unit. Both sides of
/// this link are only ever written by [`Self::lift()`] and [`Self::put()`],
/// so they cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// The occupant of every square, in row-major order.
    cells: [Option<UnitId>; CELL_COUNT],
    /// Captured units stay in here with no square, so that ids remain stable.
    units: Vec<Unit>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            units: Vec::new(),
        }
    }

    /// Puts a new unit on a free square during setup.
    ///
    /// Walls always belong to [`Side::Neutral`], whatever `side` is given.
    pub fn place(
        &mut self,
        kind: UnitKind,
        side: Side,
        square: Square,
    ) -> Result<UnitId, IllegalAction> {
        let side = if kind == UnitKind::Wall {
            Side::Neutral
        } else if side.is_player() {
            side
        } else {
            return Err(IllegalAction::NeutralUnit { kind });
        };
        self.spawn(kind, side, square)
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    /// All units ever placed, including captured ones, in creation order.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> + '_ {
        self.units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (UnitId(idx), unit))
    }

    /// The army of `side`: the units it currently owns that are on the board.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = UnitId> + '_ {
        self.units()
            .filter(move |(_, unit)| unit.side == side && unit.is_on_board())
            .map(|(id, _)| id)
    }

    pub fn occupant(&self, square: Square) -> Option<UnitId> {
        self.cells[square.index()]
    }

    pub fn occupant_unit(&self, square: Square) -> Option<&Unit> {
        self.occupant(square).map(|id| self.unit(id))
    }

    pub fn is_free(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    /// Leaders that are on the board, of either side.
    pub fn leaders(&self) -> impl Iterator<Item = (UnitId, &Unit)> + '_ {
        self.units()
            .filter(|(_, unit)| unit.kind == UnitKind::Leader && unit.is_on_board())
    }

    /// The first leader of `side` still on the board, if any.
    pub fn leader(&self, side: Side) -> Option<UnitId> {
        self.leaders()
            .find(|(_, unit)| unit.side == side)
            .map(|(id, _)| id)
    }

    pub fn has_leader(&self, side: Side) -> bool {
        self.leader(side).is_some()
    }

    /// The units that could attack whatever stands on `square`.
    pub fn threats_to(&self, square: Square) -> impl Iterator<Item = UnitId> + '_ {
        self.units()
            .filter(|(_, unit)| unit.is_on_board())
            .map(|(id, _)| id)
            .filter(move |&id| self.can_attack(id, square))
    }

    pub fn is_threatened(&self, square: Square) -> bool {
        self.threats_to(square).next().is_some()
    }

    pub(crate) fn set_side(&mut self, id: UnitId, side: Side) {
        self.units[id.0].side = side;
    }

    /// Takes a unit off its square and returns the square it stood on.
    pub(crate) fn lift(&mut self, id: UnitId) -> Result<Square, IllegalAction> {
        let square = self.units[id.0]
            .square
            .take()
            .ok_or(IllegalAction::UnitOffBoard { unit: id })?;
        self.cells[square.index()] = None;
        Ok(square)
    }

    /// Puts an off-board unit onto a free square.
    pub(crate) fn put(&mut self, id: UnitId, square: Square) -> Result<(), IllegalAction> {
        if self.cells[square.index()].is_some() {
            return Err(IllegalAction::TargetOccupied { target: square });
        }
        if self.units[id.0].square.is_some() {
            return Err(IllegalAction::NotApplied);
        }
        self.cells[square.index()] = Some(id);
        self.units[id.0].square = Some(square);
        Ok(())
    }

    pub(crate) fn spawn(
        &mut self,
        kind: UnitKind,
        side: Side,
        square: Square,
    ) -> Result<UnitId, IllegalAction> {
        if !self.is_free(square) {
            return Err(IllegalAction::TargetOccupied { target: square });
        }
        let id = UnitId(self.units.len());
        self.units.push(Unit {
            kind,
            side,
            square: None,
        });
        self.put(id, square)?;
        Ok(id)
    }

    /// Removes the most recently spawned unit entirely, undoing [`Self::spawn()`].
    pub(crate) fn despawn(&mut self, id: UnitId) -> Result<(), IllegalAction> {
        if id.0 + 1 != self.units.len() {
            return Err(IllegalAction::NotApplied);
        }
        self.lift(id)?;
        self.units.pop();
        Ok(())
    }
}
