mod invocation;
mod logging;
pub use invocation::*;
pub use logging::*;

use std::io::Write;
use std::path::Path;

use advance::{Action, Board, Side};
use anyhow::Context;
use tracing::{info, warn};

/// A trait to simplify writing bots.
///
/// Bots are started once per turn. They read the board from a file, pick an
/// action, and write the board after that action to another file.
pub trait Bot {
    fn name(&self) -> &str;

    /// Picks an action for `side`, or `None` to pass because nothing is legal.
    ///
    /// The board may be changed while searching, but must be restored before returning.
    fn choose_action(&mut self, board: &mut Board, side: Side) -> anyhow::Result<Option<Action>>;

    /// Plays one turn on `board`, returning the action that was applied.
    fn play_turn(&mut self, board: &mut Board, side: Side) -> anyhow::Result<Option<Action>> {
        let choice = self.choose_action(board, side)?;
        match choice {
            Some(action) => {
                action
                    .apply(board)
                    .with_context(|| format!("Bot chose an illegal action {:?}", action))?;
                info!(%side, ?action, "Playing");
            }
            None => warn!(%side, "No legal action, passing"),
        }
        Ok(choice)
    }

    fn run(&mut self, invocation: Invocation) -> anyhow::Result<()> {
        match invocation {
            Invocation::Name => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", self.name())?;
                stdout.flush()?;
                Ok(())
            }
            Invocation::Play {
                side,
                input,
                output,
            } => {
                let mut board = read_board(&input)?;
                self.play_turn(&mut board, side)?;
                std::fs::write(&output, board.to_notation())
                    .with_context(|| format!("Could not write board to {}", output.display()))
            }
        }
    }
}

/// Reads a board in text notation from a file.
pub fn read_board(path: &Path) -> anyhow::Result<Board> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read board from {}", path.display()))?;
    text.parse()
        .with_context(|| format!("Malformed board in {}", path.display()))
}
