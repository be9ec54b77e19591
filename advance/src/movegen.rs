use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Action, Board, IllegalAction, Side, Square, Strike, UnitKind};

/// Which leaders must not be attackable after an action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyScope {
    /// Every leader on the board, whoever owns it.
    #[default]
    AnyLeader,
    /// Only the leaders of the side that acts.
    OwnLeader,
}

impl std::fmt::Display for SafetyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyScope::AnyLeader => write!(f, "any-leader"),
            SafetyScope::OwnLeader => write!(f, "own-leader"),
        }
    }
}

impl std::str::FromStr for SafetyScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any-leader" => Ok(SafetyScope::AnyLeader),
            "own-leader" => Ok(SafetyScope::OwnLeader),
            _ => Err(format!(
                "unknown safety scope '{}', expected 'any-leader' or 'own-leader'",
                s
            )),
        }
    }
}

/// Lists every action `side` could take, without the leader safety check.
///
/// Units are visited in creation order and targets in row-major order. Each
/// (unit, target) pair yields at most one action, except that a Builder gets
/// both a move and a wall on every square it can move to.
pub fn generate_actions(board: &Board, side: Side) -> Result<Vec<Action>, IllegalAction> {
    let mut actions = Vec::new();
    let army: Vec<_> = board.units_of(side).collect();
    for unit in army {
        for target in Square::all() {
            if board.can_move_to(unit, target) {
                actions.push(Action::new_move(board, unit, target)?);
                if board.unit(unit).kind() == UnitKind::Builder {
                    actions.push(Action::new_build_wall(board, unit, target)?);
                }
            } else if let Some(strike) = board.strike(unit, target) {
                actions.push(match strike {
                    Strike::DestroyWall => Action::new_destroy_wall(board, unit, target)?,
                    Strike::Convert => Action::new_convert(board, unit, target)?,
                    Strike::Capture => Action::new_attack(board, unit, target)?,
                });
            } else if board.can_swap(unit, target) {
                actions.push(Action::new_swap(board, unit, target)?);
            }
        }
    }
    Ok(actions)
}

impl Board {
    /// Whether a leader in `scope`, as seen by `side`, can be attacked right now.
    pub fn leader_in_danger(&self, side: Side, scope: SafetyScope) -> bool {
        self.leaders()
            .filter(|(_, leader)| scope == SafetyScope::AnyLeader || leader.side() == side)
            .filter_map(|(_, leader)| leader.square())
            .any(|sq| self.is_threatened(sq))
    }
}

/// Drops every action after which a leader in `scope` would be attackable.
///
/// Each action is tried on the board and undone again, so the board is
/// unchanged afterwards. The order of the remaining actions is kept.
pub fn retain_safe_actions(
    board: &mut Board,
    side: Side,
    scope: SafetyScope,
    actions: &mut Vec<Action>,
) -> Result<(), IllegalAction> {
    for idx in (0..actions.len()).rev() {
        let action = actions[idx];
        action.apply(board)?;
        let in_danger = board.leader_in_danger(side, scope);
        action.invert(board)?;
        if in_danger {
            trace!(?action, "Discarding action that leaves a leader attackable");
            actions.remove(idx);
        }
    }
    Ok(())
}

/// All actions of `side` that pass the leader safety check.
pub fn legal_actions(
    board: &mut Board,
    side: Side,
    scope: SafetyScope,
) -> Result<Vec<Action>, IllegalAction> {
    let mut actions = generate_actions(board, side)?;
    retain_safe_actions(board, side, scope, &mut actions)?;
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::Position;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).unwrap()
    }

    quickcheck! {
        fn safe_actions_never_endanger_a_leader(pos: Position) -> bool {
            let mut board = pos.board.clone();
            let actions = legal_actions(&mut board, pos.side, SafetyScope::AnyLeader).unwrap();
            board == pos.board && actions.iter().all(|action| {
                action.apply(&mut board).unwrap();
                let safe = !board.leader_in_danger(pos.side, SafetyScope::AnyLeader);
                action.invert(&mut board).unwrap();
                safe
            })
        }
    }

    quickcheck! {
        fn generated_actions_belong_to_the_side(pos: Position) -> bool {
            generate_actions(&pos.board, pos.side)
                .unwrap()
                .iter()
                .all(|action| pos.board.unit(action.actor()).side() == pos.side)
        }
    }

    #[test]
    fn safety_scope_names_roundtrip() {
        for scope in [SafetyScope::AnyLeader, SafetyScope::OwnLeader] {
            assert_eq!(scope.to_string().parse(), Ok(scope));
        }
        assert!("own".parse::<SafetyScope>().is_err());
    }

    #[test]
    fn builder_gets_a_wall_for_every_move() {
        let board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            ....B....\n\
            .........\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let actions = generate_actions(&board, Side::White).unwrap();
        let moves = actions
            .iter()
            .filter(|a| matches!(a, Action::Move { .. }))
            .count();
        let walls = actions
            .iter()
            .filter(|a| matches!(a, Action::BuildWall { .. }))
            .count();
        assert_eq!((moves, walls), (8, 8));
        // Each wall directly follows the move to the same square.
        for pair in actions.chunks(2) {
            assert!(matches!(pair[0], Action::Move { .. }));
            assert!(matches!(pair[1], Action::BuildWall { .. }));
            assert_eq!(pair[0].target(), pair[1].target());
        }
    }

    #[test]
    fn each_strike_becomes_the_matching_action() {
        let board: Board = "\
            M...#....\n\
            .........\n\
            .........\n\
            d........\n\
            .J.......\n\
            ..z......\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let actions = generate_actions(&board, Side::White).unwrap();
        let miner = board.occupant(sq(0, 0)).unwrap();
        let jester = board.occupant(sq(4, 1)).unwrap();
        assert!(actions.contains(&Action::new_destroy_wall(&board, miner, sq(0, 4)).unwrap()));
        assert!(actions.contains(&Action::new_attack(&board, miner, sq(3, 0)).unwrap()));
        assert!(actions.contains(&Action::new_convert(&board, jester, sq(3, 0)).unwrap()));
        assert!(actions.contains(&Action::new_convert(&board, jester, sq(5, 2)).unwrap()));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::Attack { unit, .. } if *unit == jester)));
    }

    #[test]
    fn leader_may_not_step_into_attack() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            ..c......\n\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            G........\n"
            .parse()
            .unwrap();
        let actions = legal_actions(&mut board, Side::White, SafetyScope::OwnLeader).unwrap();
        let targets: Vec<Square> = actions.iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec![sq(7, 0), sq(7, 1), sq(8, 1)]);

        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            ..c......\n\
            .........\n\
            .........\n\
            G........\n"
            .parse()
            .unwrap();
        // The catapult now hits (7, 0) diagonally.
        let actions = legal_actions(&mut board, Side::White, SafetyScope::OwnLeader).unwrap();
        let targets: Vec<Square> = actions.iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec![sq(7, 1), sq(8, 1)]);
    }

    #[test]
    fn any_leader_scope_also_protects_the_enemy_leader() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            ...g.....\n\
            .........\n\
            ...Z.....\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let own = legal_actions(&mut board, Side::White, SafetyScope::OwnLeader).unwrap();
        let any = legal_actions(&mut board, Side::White, SafetyScope::AnyLeader).unwrap();
        // Three steps plus the leap onto the black leader.
        assert_eq!(own.len(), 4);
        // Every step puts the black leader in reach, only capturing it is left.
        assert_eq!(any.len(), 1);
        assert!(matches!(
            any[0],
            Action::Attack {
                victim_kind: UnitKind::Leader,
                ..
            }
        ));
    }
}
