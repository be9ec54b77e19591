use std::path::PathBuf;

use advance::{Board, SafetyScope};
use anyhow::Context;
use clap::Parser;
use judge::{play_game, GameResult, GameSettings, Player, PlayerConfig, Recorder, OPENING};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of the two players
    #[arg(required = true, num_args = 2)]
    player_configs: Vec<PathBuf>,

    /// Board to start every game from, in text notation
    #[arg(long)]
    start_board: Option<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 10)]
    num_games: usize,

    /// A game that reaches this many turns is a tie
    #[arg(short, long, default_value_t = 200)]
    max_turns: usize,

    /// Which leaders an action must not leave attackable
    /// ("any-leader" or "own-leader")
    #[arg(long, default_value = "any-leader")]
    safety: SafetyScope,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the match as soon as one player makes an illegal turn
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Directory for the board files exchanged with the bots
    #[arg(short, long)]
    work_dir: Option<PathBuf>,

    /// Record every game's actions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    ties: usize,
}

fn play_matchup(
    players: [&Player; 2],
    num_games: usize,
    rng: &mut StdRng,
    settings: &GameSettings,
    stop_on_illegal_move: bool,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(rng, players, settings, recorder)? {
            GameResult::WonByPlayer {
                player_idx,
                victory,
            } => {
                debug!(winner = players[player_idx].name, game_idx, ?victory);
                match_score.wins[player_idx] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::IllegalTurnByPlayer { player_idx, err } => {
                info!(
                    player = players[player_idx].name,
                    game_idx, "Illegal turn by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                if stop_on_illegal_move {
                    break;
                } else {
                    match_score.wins[1 - player_idx] += 1;
                    match_score.illegal_moves[player_idx] += 1;
                }
            }
        }
    }

    let paren_1 = if match_score.illegal_moves[1] > 0 {
        format!(
            " ({} through illegal turns by player 2)",
            match_score.illegal_moves[1]
        )
    } else {
        String::new()
    };
    let paren_2 = if match_score.illegal_moves[0] > 0 {
        format!(
            " ({} through illegal turns by player 1)",
            match_score.illegal_moves[0]
        )
    } else {
        String::new()
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} ties",
        match_score.wins[0],
        players[0].name,
        paren_1,
        match_score.wins[1],
        players[1].name,
        paren_2,
        match_score.ties
    );

    Ok(match_score)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let start = match &args.start_board {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read start board {}", path.display()))?,
        None => String::from(OPENING),
    };
    let start: Board = start.parse().context("Malformed start board")?;
    debug!("Start board\n{}", start);

    let work_dir = args
        .work_dir
        .unwrap_or_else(|| std::env::temp_dir().join("advance_judge"));
    std::fs::create_dir_all(&work_dir)
        .with_context(|| format!("Could not create {}", work_dir.display()))?;

    let players = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path).map(|config| Player::from_config(&config)))
        .collect::<anyhow::Result<Vec<Player>>>()?;
    for player in &players {
        match player.reported_name() {
            Ok(name) => info!(player = player.name, reports = name, "Bot ready"),
            Err(err) => warn!(player = player.name, "{:#}", err),
        }
    }

    let settings = GameSettings {
        start,
        max_turns: args.max_turns,
        safety: args.safety,
        work_dir,
    };
    play_matchup(
        [&players[0], &players[1]],
        args.num_games,
        &mut rng,
        &settings,
        args.stop_on_illegal_move,
        &mut recorder,
    )?;

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
