use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use advance::{Action, Side};
use serde::Serialize;

/// Writes one JSON file per game with every action that was played.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    turns: Vec<RecordedTurn>,
}

#[derive(Serialize)]
pub struct RecordedTurn {
    pub player: String,
    pub side: Side,
    /// `None` for a pass.
    pub action: Option<Action>,
    /// The board after the turn, in text notation.
    pub board: String,
}

#[derive(Serialize)]
struct GameRecording<'a> {
    start: &'a str,
    turns: &'a [RecordedTurn],
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            turns: Vec::new(),
        })
    }

    pub fn store_turn(&mut self, turn: RecordedTurn) {
        self.turns.push(turn);
    }

    pub fn write_game_recording(&mut self, start: &str) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        let turns = std::mem::take(&mut self.turns);
        serde_json::to_writer_pretty(
            writer,
            &GameRecording {
                start,
                turns: &turns,
            },
        )?;
        self.num += 1;
        Ok(())
    }
}
