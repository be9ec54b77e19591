use advance::{legal_actions, Action, Board, SafetyScope, Side};
use advance_bot_utils::{initialize_logging, Bot, Invocation};

use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
struct Args {
    /// Either `name`, or `<colour> <inFile> <outFile>`
    #[arg(required = true, num_args = 1..=3)]
    invocation: Vec<String>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Which leaders an action must not leave attackable
    /// ("any-leader" or "own-leader")
    #[arg(long, default_value = "any-leader")]
    safety: SafetyScope,
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let invocation = Invocation::from_args(&args.invocation)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot {
        rng,
        safety: args.safety,
    }
    .run(invocation)
}

struct RandomBot {
    rng: StdRng,
    safety: SafetyScope,
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "RandomBot"
    }

    fn choose_action(&mut self, board: &mut Board, side: Side) -> anyhow::Result<Option<Action>> {
        let actions = legal_actions(board, side, self.safety)?;
        Ok(actions.choose(&mut self.rng).copied())
    }
}
