use advance::{Action, Board, IllegalAction};

use crate::error::IllegalTurn;

/// How a turn written by a bot was judged.
#[derive(Debug)]
pub enum TurnOutcome {
    Played(Action),
    /// The board came back unchanged and there was nothing to play.
    Passed,
    Illegal(IllegalTurn),
}

/// Finds the action among `legal` that turns `board` into `written`, and
/// applies it to `board`.
///
/// Boards are compared by their notation, since the bot's board has its own
/// unit ids. If several actions give the same board, the first one counts.
/// On anything but [`TurnOutcome::Played`], `board` is unchanged.
///
/// [`play_game`](crate::play_game) decides a side with no legal action has
/// lost before its bot is started, so during a game `legal` is never empty
/// and [`TurnOutcome::Passed`] does not occur.
pub fn validate_turn(
    board: &mut Board,
    legal: &[Action],
    written: &str,
) -> Result<TurnOutcome, IllegalAction> {
    let expected = match written.parse::<Board>() {
        Ok(written_board) => written_board.to_notation(),
        Err(err) => return Ok(TurnOutcome::Illegal(IllegalTurn::UnreadableBoard { err })),
    };

    for &action in legal {
        action.apply(board)?;
        if board.to_notation() == expected {
            return Ok(TurnOutcome::Played(action));
        }
        action.invert(board)?;
    }

    let outcome = if board.to_notation() != expected {
        TurnOutcome::Illegal(IllegalTurn::NoMatchingAction)
    } else if legal.is_empty() {
        TurnOutcome::Passed
    } else {
        TurnOutcome::Illegal(IllegalTurn::PassedWithLegalActions {
            num_actions: legal.len(),
        })
    };
    Ok(outcome)
}
