use advance::{legal_actions, Action, Board, SafetyScope, SearchConfig, Side};
use advance_bot_utils::{initialize_logging, Bot, Invocation};

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// Either `name`, or `<colour> <inFile> <outFile>`
    #[arg(required = true, num_args = 1..=3)]
    invocation: Vec<String>,
    /// How many opponent replies to look ahead
    #[arg(short, long, default_value_t = 1)]
    depth: u32,
    /// Which leaders an action must not leave attackable
    /// ("any-leader" or "own-leader")
    #[arg(long, default_value = "any-leader")]
    safety: SafetyScope,
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

struct MinimaxBot {
    config: SearchConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let invocation = Invocation::from_args(&args.invocation)?;
    let config = SearchConfig {
        depth: args.depth,
        safety: args.safety,
    };
    MinimaxBot { config }.run(invocation)
}

impl Bot for MinimaxBot {
    fn name(&self) -> &str {
        "MinimaxBot"
    }

    /// Only passes when there is no legal action at all. If the search rejects
    /// every candidate because each one loses material, the first legal
    /// action is played instead.
    fn choose_action(&mut self, board: &mut Board, side: Side) -> anyhow::Result<Option<Action>> {
        debug!("Searching on\n{}", board);
        if let Some(action) = self.config.choose_move(board, side)? {
            return Ok(Some(action));
        }
        let fallback = legal_actions(board, side, self.config.safety)?
            .first()
            .copied();
        if let Some(action) = fallback {
            warn!(%side, ?action, "Every candidate loses material, playing the first legal action");
        }
        Ok(fallback)
    }
}
