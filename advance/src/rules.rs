use crate::{Board, Side, Square, UnitId, UnitKind};

/// What a legal attack on an occupied square turns into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strike {
    /// The defender is removed and the attacker takes its square.
    Capture,
    /// The defender changes sides and nobody moves (Jester).
    Convert,
    /// The wall is removed and the attacker takes its square (Miner).
    DestroyWall,
}

impl UnitKind {
    /// The geometric move pattern, ignoring whether `to` itself is free.
    fn reaches_by_move(self, board: &Board, side: Side, from: Square, to: Square) -> bool {
        let (d_row, d_col) = from.delta(to);
        match self {
            UnitKind::Zombie => d_row == side.direction() && d_col.abs() <= 1,
            UnitKind::Leader | UnitKind::Jester | UnitKind::Builder => from.is_adjacent(to),
            UnitKind::Sentinel => is_knight_jump(d_row, d_col),
            UnitKind::Miner => (d_row == 0 || d_col == 0) && board.is_path_clear(from, to),
            UnitKind::Catapult => d_row.abs() + d_col.abs() == 1,
            UnitKind::Dragon => board.is_path_clear(from, to),
            UnitKind::Wall => false,
        }
    }

    /// The geometric attack pattern, ignoring who stands on `to`.
    fn reaches_by_attack(self, board: &Board, side: Side, from: Square, to: Square) -> bool {
        let (d_row, d_col) = from.delta(to);
        match self {
            UnitKind::Zombie => {
                let forward = side.direction();
                let leap = d_row == 2 * forward
                    && (d_col == 0 || d_col.abs() == 2)
                    && from
                        .offset(forward, d_col / 2)
                        .is_some_and(|over| board.is_free(over));
                leap || self.reaches_by_move(board, side, from, to)
            }
            UnitKind::Catapult => {
                (d_row.abs() == 3 && d_col == 0)
                    || (d_col.abs() == 3 && d_row == 0)
                    || (d_row.abs() == 2 && d_col.abs() == 2)
            }
            // The dragon breathes fire, so it can't hit what is right next to it.
            UnitKind::Dragon => {
                !from.is_adjacent(to) && self.reaches_by_move(board, side, from, to)
            }
            _ => self.reaches_by_move(board, side, from, to),
        }
    }
}

fn is_knight_jump(d_row: i8, d_col: i8) -> bool {
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}

impl Board {
    /// Whether `from` and `to` share a row, column or diagonal with only
    /// free squares in between.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        match from.squares_between(to) {
            Some(mut between) => between.all(|sq| self.is_free(sq)),
            None => false,
        }
    }

    /// Whether an enemy Sentinel of `attacker_side` stands orthogonally next
    /// to `target`, which makes the target immune to attacks.
    pub fn is_protected(&self, target: Square, attacker_side: Side) -> bool {
        let guard_side = attacker_side.opponent();
        target.orthogonal_neighbours().any(|sq| {
            self.occupant_unit(sq)
                .is_some_and(|unit| unit.kind() == UnitKind::Sentinel && unit.side() == guard_side)
        })
    }

    /// Can the unit move onto the free square `target`?
    pub fn can_move_to(&self, id: UnitId, target: Square) -> bool {
        let unit = self.unit(id);
        let Some(from) = unit.square() else {
            return false;
        };
        from != target
            && self.is_free(target)
            && unit.kind().reaches_by_move(self, unit.side(), from, target)
    }

    pub fn can_attack(&self, id: UnitId, target: Square) -> bool {
        self.strike(id, target).is_some()
    }

    /// If the unit may attack `target`, what kind of attack that would be.
    pub fn strike(&self, id: UnitId, target: Square) -> Option<Strike> {
        let unit = self.unit(id);
        let from = unit.square()?;
        let defender = self.occupant_unit(target)?;
        if from == target || defender.side() == unit.side() {
            return None;
        }
        let is_wall = defender.kind() == UnitKind::Wall;
        if is_wall && unit.kind() != UnitKind::Miner {
            return None;
        }
        if self.is_protected(target, unit.side()) {
            return None;
        }
        if !unit
            .kind()
            .reaches_by_attack(self, unit.side(), from, target)
        {
            return None;
        }
        Some(if is_wall {
            Strike::DestroyWall
        } else if unit.kind() == UnitKind::Jester {
            Strike::Convert
        } else {
            Strike::Capture
        })
    }

    /// Only Jesters swap, and only with an adjacent friendly unit.
    pub fn can_swap(&self, id: UnitId, target: Square) -> bool {
        let unit = self.unit(id);
        let Some(from) = unit.square() else {
            return false;
        };
        unit.kind() == UnitKind::Jester
            && from.is_adjacent(target)
            && self
                .occupant_unit(target)
                .is_some_and(|other| other.side() == unit.side())
    }
}
