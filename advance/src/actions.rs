use serde::Serialize;

use crate::{Board, IllegalAction, Side, Square, Strike, UnitId, UnitKind};

/// A single reversible turn.
///
/// An action is built against the current board and remembers just enough of
/// it to be undone exactly. Applying and inverting must be strictly nested:
/// only the most recently applied action may be inverted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Action {
    Move {
        unit: UnitId,
        from: Square,
        to: Square,
    },
    Attack {
        unit: UnitId,
        from: Square,
        to: Square,
        victim: UnitId,
        victim_kind: UnitKind,
        victim_side: Side,
    },
    Convert {
        unit: UnitId,
        target: Square,
        victim: UnitId,
        victim_kind: UnitKind,
    },
    Swap {
        unit: UnitId,
        from: Square,
        to: Square,
        partner: UnitId,
    },
    BuildWall {
        unit: UnitId,
        target: Square,
    },
    DestroyWall {
        unit: UnitId,
        from: Square,
        to: Square,
        wall: UnitId,
    },
}

fn position_of(board: &Board, unit: UnitId) -> Result<Square, IllegalAction> {
    board
        .unit(unit)
        .square()
        .ok_or(IllegalAction::UnitOffBoard { unit })
}

fn occupant_of(board: &Board, target: Square) -> Result<UnitId, IllegalAction> {
    board
        .occupant(target)
        .ok_or(IllegalAction::EmptyTarget { target })
}

impl Action {
    pub fn new_move(board: &Board, unit: UnitId, to: Square) -> Result<Self, IllegalAction> {
        Ok(Action::Move {
            unit,
            from: position_of(board, unit)?,
            to,
        })
    }

    pub fn new_attack(board: &Board, unit: UnitId, to: Square) -> Result<Self, IllegalAction> {
        let from = position_of(board, unit)?;
        let victim = occupant_of(board, to)?;
        let defender = board.unit(victim);
        Ok(Action::Attack {
            unit,
            from,
            to,
            victim,
            victim_kind: defender.kind(),
            victim_side: defender.side(),
        })
    }

    pub fn new_convert(board: &Board, unit: UnitId, target: Square) -> Result<Self, IllegalAction> {
        position_of(board, unit)?;
        let victim = occupant_of(board, target)?;
        Ok(Action::Convert {
            unit,
            target,
            victim,
            victim_kind: board.unit(victim).kind(),
        })
    }

    /// Fails if there is nobody on `to` to swap with.
    pub fn new_swap(board: &Board, unit: UnitId, to: Square) -> Result<Self, IllegalAction> {
        let from = position_of(board, unit)?;
        let partner = board
            .occupant(to)
            .ok_or(IllegalAction::NoSwapPartner { target: to })?;
        Ok(Action::Swap {
            unit,
            from,
            to,
            partner,
        })
    }

    pub fn new_build_wall(board: &Board, unit: UnitId, target: Square) -> Result<Self, IllegalAction> {
        position_of(board, unit)?;
        Ok(Action::BuildWall { unit, target })
    }

    pub fn new_destroy_wall(board: &Board, unit: UnitId, to: Square) -> Result<Self, IllegalAction> {
        let from = position_of(board, unit)?;
        let wall = occupant_of(board, to)?;
        if board.unit(wall).kind() != UnitKind::Wall {
            return Err(IllegalAction::NotAWall { target: to });
        }
        Ok(Action::DestroyWall {
            unit,
            from,
            to,
            wall,
        })
    }

    /// The unit performing the action.
    pub fn actor(&self) -> UnitId {
        match *self {
            Action::Move { unit, .. }
            | Action::Attack { unit, .. }
            | Action::Convert { unit, .. }
            | Action::Swap { unit, .. }
            | Action::BuildWall { unit, .. }
            | Action::DestroyWall { unit, .. } => unit,
        }
    }

    /// The square the action is aimed at.
    pub fn target(&self) -> Square {
        match *self {
            Action::Move { to, .. }
            | Action::Attack { to, .. }
            | Action::Swap { to, .. }
            | Action::DestroyWall { to, .. } => to,
            Action::Convert { target, .. } | Action::BuildWall { target, .. } => target,
        }
    }

    /// The immediate value of the action, used by the search.
    pub fn score(&self) -> i32 {
        match self {
            Action::Move { .. } => 0,
            Action::Attack { victim_kind, .. } => victim_kind.value(),
            Action::Convert { victim_kind, .. } => victim_kind.value() * 2,
            Action::Swap { .. } => 1,
            Action::BuildWall { .. } => 1,
            Action::DestroyWall { .. } => 1,
        }
    }

    /// Performs the action, after checking that it is legal on this board.
    ///
    /// On error, the board is left untouched.
    pub fn apply(&self, board: &mut Board) -> Result<(), IllegalAction> {
        match *self {
            Action::Move { unit, from, to } => {
                check_at(board, unit, from)?;
                if !board.is_free(to) {
                    return Err(IllegalAction::TargetOccupied { target: to });
                }
                if !board.can_move_to(unit, to) {
                    return Err(IllegalAction::OutOfReach { unit, target: to });
                }
                board.lift(unit)?;
                board.put(unit, to)
            }
            Action::Attack {
                unit,
                from,
                to,
                victim,
                ..
            } => {
                check_at(board, unit, from)?;
                check_strike(board, unit, to, victim, &[Strike::Capture])?;
                board.lift(victim)?;
                board.lift(unit)?;
                board.put(unit, to)
            }
            Action::Convert {
                unit,
                target,
                victim,
                ..
            } => {
                check_strike(board, unit, target, victim, &[Strike::Convert])?;
                flip(board, victim);
                Ok(())
            }
            Action::Swap {
                unit,
                from,
                to,
                partner,
            } => {
                check_at(board, unit, from)?;
                if board.occupant(to) != Some(partner) {
                    return Err(IllegalAction::NoSwapPartner { target: to });
                }
                if !board.can_swap(unit, to) {
                    return Err(IllegalAction::OutOfReach { unit, target: to });
                }
                exchange(board, unit, partner)
            }
            Action::BuildWall { unit, target } => {
                let kind = board.unit(unit).kind();
                if kind != UnitKind::Builder {
                    return Err(IllegalAction::CannotBuild { kind });
                }
                if !board.is_free(target) {
                    return Err(IllegalAction::TargetOccupied { target });
                }
                if !board.can_move_to(unit, target) {
                    return Err(IllegalAction::OutOfReach { unit, target });
                }
                board.spawn(UnitKind::Wall, Side::Neutral, target)?;
                Ok(())
            }
            Action::DestroyWall {
                unit,
                from,
                to,
                wall,
            } => {
                check_at(board, unit, from)?;
                if board.occupant_unit(to).map(|u| u.kind()) != Some(UnitKind::Wall) {
                    return Err(IllegalAction::NotAWall { target: to });
                }
                check_strike(board, unit, to, wall, &[Strike::DestroyWall])?;
                board.lift(wall)?;
                board.lift(unit)?;
                board.put(unit, to)
            }
        }
    }

    /// Undoes [`Self::apply()`]. Must be called on the board exactly as
    /// `apply` left it.
    pub fn invert(&self, board: &mut Board) -> Result<(), IllegalAction> {
        match *self {
            Action::Move { unit, from, to } => {
                check_at(board, unit, to)?;
                board.lift(unit)?;
                board.put(unit, from)
            }
            Action::Attack {
                unit,
                from,
                to,
                victim,
                victim_side,
                ..
            } => {
                check_at(board, unit, to)?;
                board.lift(unit)?;
                if board.unit(victim).is_on_board() {
                    board.lift(victim)?;
                }
                board.put(victim, to)?;
                // The victim may have defected while it was off the board.
                board.set_side(victim, victim_side);
                board.put(unit, from)
            }
            Action::Convert { target, victim, .. } => {
                if board.occupant(target) != Some(victim) {
                    return Err(IllegalAction::NotApplied);
                }
                flip(board, victim);
                Ok(())
            }
            Action::Swap {
                unit,
                from,
                to,
                partner,
            } => {
                check_at(board, unit, to)?;
                check_at(board, partner, from)?;
                exchange(board, unit, partner)
            }
            Action::BuildWall { target, .. } => {
                let wall = board.occupant(target).ok_or(IllegalAction::NotApplied)?;
                if board.unit(wall).kind() != UnitKind::Wall {
                    return Err(IllegalAction::NotAWall { target });
                }
                board.despawn(wall)
            }
            Action::DestroyWall {
                unit,
                from,
                to,
                wall,
            } => {
                check_at(board, unit, to)?;
                if board.unit(wall).is_on_board() {
                    return Err(IllegalAction::NotApplied);
                }
                board.lift(unit)?;
                board.put(unit, from)?;
                board.put(wall, to)
            }
        }
    }
}

/// Checks that `unit` stands on `square`.
fn check_at(board: &Board, unit: UnitId, square: Square) -> Result<(), IllegalAction> {
    match board.unit(unit).square() {
        None => Err(IllegalAction::UnitOffBoard { unit }),
        Some(sq) if sq != square => Err(IllegalAction::NotApplied),
        Some(_) => Ok(()),
    }
}

/// Checks that `unit` may currently strike `expected` on `target` in one of the `allowed` ways.
fn check_strike(
    board: &Board,
    unit: UnitId,
    target: Square,
    expected: UnitId,
    allowed: &[Strike],
) -> Result<(), IllegalAction> {
    match board.occupant(target) {
        None => return Err(IllegalAction::EmptyTarget { target }),
        Some(occupant) if occupant != expected => return Err(IllegalAction::NotApplied),
        Some(_) => {}
    }
    match board.strike(unit, target) {
        Some(strike) if allowed.contains(&strike) => Ok(()),
        _ => Err(IllegalAction::OutOfReach { unit, target }),
    }
}

fn flip(board: &mut Board, unit: UnitId) {
    let side = board.unit(unit).side().opponent();
    board.set_side(unit, side);
}

/// Exchanges the squares of two units that are both on the board.
fn exchange(board: &mut Board, a: UnitId, b: UnitId) -> Result<(), IllegalAction> {
    let square_a = board.lift(a)?;
    let square_b = board.lift(b)?;
    board.put(a, square_b)?;
    board.put(b, square_a)
}
