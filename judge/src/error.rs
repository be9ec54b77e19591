use advance::ParseBoardError;

#[derive(Debug)]
/// Error type for one turn.
pub enum IllegalTurn {
    /// The bot exited unsuccessfully. `None` if it was killed by a signal.
    BotFailed { exit_code: Option<i32> },
    MissingOutput,
    UnreadableBoard { err: ParseBoardError },
    /// The board is not the result of any single legal action.
    NoMatchingAction,
    /// The board was handed back unchanged although there were legal actions.
    PassedWithLegalActions { num_actions: usize },
}

impl std::error::Error for IllegalTurn {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalTurn::UnreadableBoard { err } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalTurn::BotFailed {
                exit_code: Some(code),
            } => write!(f, "The bot exited with code {}", code),
            IllegalTurn::BotFailed { exit_code: None } => {
                write!(f, "The bot was terminated by a signal")
            }
            IllegalTurn::MissingOutput => write!(f, "The bot did not write an output board"),
            IllegalTurn::UnreadableBoard { .. } => {
                write!(f, "The bot wrote a board that could not be read")
            }
            IllegalTurn::NoMatchingAction => write!(
                f,
                "The bot wrote a board that no single legal action leads to"
            ),
            IllegalTurn::PassedWithLegalActions { num_actions } => write!(
                f,
                "The bot passed, but had {} legal actions to choose from",
                num_actions
            ),
        }
    }
}
