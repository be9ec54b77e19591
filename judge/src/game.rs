use std::path::PathBuf;

use advance::{legal_actions, Board, SafetyScope, Side};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::IllegalTurn;
use crate::player::Player;
use crate::recording::{RecordedTurn, Recorder};
use crate::referee::{validate_turn, TurnOutcome};

/// Why a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victory {
    /// The loser had no leader left on the board at the start of its turn.
    LeaderCaptured,
    /// The loser had no legal action.
    NoLegalAction,
}

pub enum GameResult {
    WonByPlayer { player_idx: usize, victory: Victory },
    Tie,
    IllegalTurnByPlayer { player_idx: usize, err: IllegalTurn },
}

/// Settings that stay the same for every game of a match.
pub struct GameSettings {
    pub start: Board,
    pub max_turns: usize,
    pub safety: SafetyScope,
    /// Where the boards for and from the bots are written.
    pub work_dir: PathBuf,
}

/// Returns an error only when a bot cannot be run or a file cannot be
/// accessed, not when an illegal turn is played.
pub fn play_game(
    rng: &mut StdRng,
    players: [&Player; 2],
    settings: &GameSettings,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Assign the colours randomly
    let sides = {
        let mut arr = [Side::White, Side::Black];
        arr.shuffle(rng);
        arr
    };
    debug!(
        white = players[player_with(sides, Side::White)].name,
        black = players[player_with(sides, Side::Black)].name,
        "New game"
    );

    let result = play_turns(players, sides, settings, recorder)?;
    if let Some(rec) = recorder {
        rec.write_game_recording(&settings.start.to_notation())?;
    }
    Ok(result)
}

fn player_with(sides: [Side; 2], side: Side) -> usize {
    if sides[0] == side {
        0
    } else {
        1
    }
}

fn play_turns(
    players: [&Player; 2],
    sides: [Side; 2],
    settings: &GameSettings,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut board = settings.start.clone();
    let mut side = Side::White;
    for turn in 0..settings.max_turns {
        let player_idx = player_with(sides, side);
        let player = players[player_idx];
        if !board.has_leader(side) {
            return Ok(GameResult::WonByPlayer {
                player_idx: 1 - player_idx,
                victory: Victory::LeaderCaptured,
            });
        }
        // A side that can only pass has lost, its bot is not asked.
        let legal = legal_actions(&mut board, side, settings.safety)?;
        if legal.is_empty() {
            return Ok(GameResult::WonByPlayer {
                player_idx: 1 - player_idx,
                victory: Victory::NoLegalAction,
            });
        }

        let input = settings.work_dir.join(format!("turn_{:0>4}_in.txt", turn));
        let output = settings.work_dir.join(format!("turn_{:0>4}_out.txt", turn));
        std::fs::write(&input, board.to_notation())
            .with_context(|| format!("Could not write {}", input.display()))?;
        if output.exists() {
            std::fs::remove_file(&output)?;
        }

        let status = player.play_turn(side, &input, &output)?;
        if !status.success() {
            let err = IllegalTurn::BotFailed {
                exit_code: status.code(),
            };
            return Ok(GameResult::IllegalTurnByPlayer { player_idx, err });
        }
        let Ok(written) = std::fs::read_to_string(&output) else {
            let err = IllegalTurn::MissingOutput;
            return Ok(GameResult::IllegalTurnByPlayer { player_idx, err });
        };

        let action = match validate_turn(&mut board, &legal, &written)? {
            TurnOutcome::Played(action) => Some(action),
            TurnOutcome::Passed => None,
            TurnOutcome::Illegal(err) => {
                return Ok(GameResult::IllegalTurnByPlayer { player_idx, err })
            }
        };
        let action_json = serde_json::to_string(&action)?;
        debug!(turn, player = player.name, %side, action = %action_json);
        if let Some(recorder) = recorder {
            recorder.store_turn(RecordedTurn {
                player: player.name.clone(),
                side,
                action,
                board: board.to_notation(),
            });
        }
        side = side.opponent();
    }

    info!(max_turns = settings.max_turns, "Turn limit reached");
    Ok(GameResult::Tie)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::player::PlayerConfig;

    fn unreachable_player(nick: &str) -> Player {
        Player::from_config(&PlayerConfig {
            nick: String::from(nick),
            cmd: PathBuf::from("/nonexistent/advance_bot"),
            args: Vec::new(),
        })
    }

    fn settings(start: &str) -> GameSettings {
        GameSettings {
            start: start.parse().unwrap(),
            max_turns: 10,
            safety: SafetyScope::AnyLeader,
            work_dir: std::env::temp_dir().join("advance_judge_tests"),
        }
    }

    #[test]
    fn side_without_legal_actions_loses_without_its_bot_being_started() {
        let players = [unreachable_player("a"), unreachable_player("b")];
        let settings = settings(
            "g........\n.........\n.........\n...###...\n...#G#...\n\
             ...###...\n.........\n.........\n.........\n",
        );
        let mut rng = StdRng::seed_from_u64(7);
        // Starting either bot would fail, so reaching a result means neither ran.
        let result = play_game(&mut rng, [&players[0], &players[1]], &settings, &mut None).unwrap();
        assert!(matches!(
            result,
            GameResult::WonByPlayer {
                victory: Victory::NoLegalAction,
                ..
            }
        ));
    }

    #[test]
    fn side_without_leader_loses_at_the_start_of_its_turn() {
        let players = [unreachable_player("a"), unreachable_player("b")];
        let settings = settings(
            "g........\n.........\n.........\n.........\n.........\n\
             .........\n.........\n.........\n........Z\n",
        );
        let mut rng = StdRng::seed_from_u64(7);
        let result = play_game(&mut rng, [&players[0], &players[1]], &settings, &mut None).unwrap();
        assert!(matches!(
            result,
            GameResult::WonByPlayer {
                victory: Victory::LeaderCaptured,
                ..
            }
        ));
    }
}
