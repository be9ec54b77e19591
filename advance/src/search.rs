use tracing::{debug, trace};

use crate::{legal_actions, Action, Board, IllegalAction, SafetyScope, Side};

/// Settings for [`SearchConfig::choose_move()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// How many opponent replies to look ahead. 0 picks on immediate score alone.
    pub depth: u32,
    pub safety: SafetyScope,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            safety: SafetyScope::default(),
        }
    }
}

/// Picks an action for `side` with the default safety scope.
///
/// See [`SearchConfig::choose_move()`].
pub fn choose_move(
    board: &mut Board,
    side: Side,
    depth: u32,
) -> Result<Option<Action>, IllegalAction> {
    SearchConfig {
        depth,
        ..SearchConfig::default()
    }
    .choose_move(board, side)
}

impl SearchConfig {
    /// Picks an action for `side`, or `None` if it has nothing to play.
    ///
    /// Every candidate is scored as its own value minus the value of the
    /// opponent's chosen reply, searched `depth` levels deep. Candidates are
    /// tried on the board itself and undone again, so the board is unchanged
    /// when this returns `Ok`.
    ///
    /// The first candidate with a net score of exactly 0 is taken as a
    /// baseline worth 1, and later candidates only replace the current best
    /// if they score strictly more. Consequently, if every candidate nets
    /// less than zero, nothing is chosen.
    pub fn choose_move(
        &self,
        board: &mut Board,
        side: Side,
    ) -> Result<Option<Action>, IllegalAction> {
        let mut search = Search {
            board,
            safety: self.safety,
            nodes: 0,
        };
        let choice = search.best_action(side, self.depth)?;
        debug!(%side, depth = self.depth, nodes = search.nodes, ?choice, "Search finished");
        Ok(choice)
    }
}

struct Search<'a> {
    board: &'a mut Board,
    safety: SafetyScope,
    /// Number of positions whose actions were generated.
    nodes: u64,
}

impl<'a> Search<'a> {
    fn best_action(&mut self, side: Side, depth: u32) -> Result<Option<Action>, IllegalAction> {
        self.nodes += 1;
        let candidates = legal_actions(self.board, side, self.safety)?;
        if candidates.len() <= 1 {
            return Ok(candidates.first().copied());
        }

        let mut best_action = None;
        let mut best_score = 0;
        for action in candidates {
            action.apply(self.board)?;
            let mut net = action.score();
            if depth > 0 {
                match self.best_action(side.opponent(), depth - 1)? {
                    Some(reply) => net -= reply.score(),
                    None => {
                        // The opponent is out of options, no need to look further.
                        action.invert(self.board)?;
                        return Ok(Some(action));
                    }
                }
            }
            action.invert(self.board)?;

            if best_score == 0 && net == 0 {
                best_score = 1;
                best_action = Some(action);
            } else if net > best_score {
                best_score = net;
                best_action = Some(action);
                trace!(%side, depth, net, ?action, "New best action");
            }
        }
        Ok(best_action)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::Position;
    use crate::{Square, UnitKind};

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col).unwrap()
    }

    quickcheck! {
        fn search_is_deterministic_and_leaves_the_board_alone(pos: Position) -> bool {
            let mut board = pos.board.clone();
            let first = choose_move(&mut board, pos.side, 1).unwrap();
            let unchanged = board == pos.board;
            let second = choose_move(&mut board, pos.side, 1).unwrap();
            unchanged && first == second && board == pos.board
        }
    }

    #[test]
    fn single_safe_move_is_played() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            ...###...\n\
            ...#G....\n\
            ...###...\n\
            .........\n\
            .........\n\
            ........z\n"
            .parse()
            .unwrap();
        let leader = board.occupant(sq(4, 4)).unwrap();
        let choice = choose_move(&mut board, Side::White, 0).unwrap();
        assert_eq!(
            choice,
            Some(Action::Move {
                unit: leader,
                from: sq(4, 4),
                to: sq(4, 5)
            })
        );
    }

    #[test]
    fn capturing_the_only_reachable_zombie_scores_one() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            ...###...\n\
            ...#Gz...\n\
            ...###...\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let choice = choose_move(&mut board, Side::White, 0).unwrap().unwrap();
        assert!(matches!(
            choice,
            Action::Attack {
                victim_kind: UnitKind::Zombie,
                ..
            }
        ));
        assert_eq!(choice.score(), 1);
    }

    #[test]
    fn enclosed_leader_has_no_move() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            ...###...\n\
            ...#G#...\n\
            ...###...\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        for depth in 0..3 {
            assert_eq!(choose_move(&mut board, Side::White, depth), Ok(None));
        }
    }

    #[test]
    fn depth_zero_takes_the_most_valuable_capture() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            ...z.d...\n\
            ....G....\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let choice = choose_move(&mut board, Side::White, 0).unwrap().unwrap();
        assert_eq!(choice.target(), sq(4, 5));
        assert_eq!(choice.score(), 7);
    }

    #[test]
    fn lookahead_avoids_a_capture_that_gets_recaptured() {
        // The catapult at (2, 4) is worth the most, but the miner at (2, 0)
        // takes the dragon back. Taking the miner first is safe.
        let mut board: Board = "\
            .........\n\
            .........\n\
            m...c....\n\
            .........\n\
            .........\n\
            .........\n\
            ....D..j.\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let greedy = choose_move(&mut board, Side::White, 0).unwrap().unwrap();
        assert_eq!(greedy.target(), sq(2, 4));
        let careful = choose_move(&mut board, Side::White, 1).unwrap().unwrap();
        assert_eq!(careful.target(), sq(2, 0));
        assert_eq!(careful.score(), 4);
    }

    #[test]
    fn move_that_leaves_the_opponent_stuck_is_played_at_once() {
        // Moving the miner from (5, 3) to (5, 1) covers every square the black
        // leader could escape to. Taking the zombie comes later and scores more.
        let mut board: Board = "\
            g........\n\
            ........M\n\
            .........\n\
            .........\n\
            .........\n\
            ...M.....\n\
            .........\n\
            .........\n\
            .......zG\n"
            .parse()
            .unwrap();
        let miner = board.occupant(sq(5, 3)).unwrap();
        let choice = choose_move(&mut board, Side::White, 1).unwrap().unwrap();
        let stuck = Action::Move {
            unit: miner,
            from: sq(5, 3),
            to: sq(5, 1),
        };
        assert_eq!(choice, stuck);

        let legal = legal_actions(&mut board, Side::White, SafetyScope::AnyLeader).unwrap();
        let chosen_at = legal.iter().position(|a| *a == stuck).unwrap();
        let capture_at = legal
            .iter()
            .position(|a| matches!(a, Action::Attack { victim_kind: UnitKind::Zombie, .. }))
            .unwrap();
        assert!(chosen_at > 0 && capture_at > chosen_at);
        assert!(legal[capture_at].score() > choice.score());
    }

    #[test]
    fn nothing_is_chosen_when_every_candidate_loses_material() {
        // Each catapult step is recaptured by the miner or the dragon.
        let mut board: Board = "\
            .........\n\
            ....C...m\n\
            .........\n\
            .........\n\
            .........\n\
            ....d....\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let legal = legal_actions(&mut board, Side::White, SafetyScope::AnyLeader).unwrap();
        assert_eq!(legal.len(), 4);
        assert_eq!(choose_move(&mut board, Side::White, 1), Ok(None));
        // Without looking ahead, a plain step is fine.
        assert!(choose_move(&mut board, Side::White, 0).unwrap().is_some());
    }

    #[test]
    fn first_zero_scoring_move_is_kept_over_later_ties() {
        let mut board: Board = "\
            .........\n\
            .........\n\
            .........\n\
            .........\n\
            ....G....\n\
            .........\n\
            .........\n\
            .........\n\
            .........\n"
            .parse()
            .unwrap();
        let choice = choose_move(&mut board, Side::White, 0).unwrap().unwrap();
        assert_eq!(choice.target(), sq(3, 3));
    }
}
