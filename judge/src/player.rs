use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use advance::Side;
use anyhow::Context;
use serde::Deserialize;
use tracing::trace;

/// How to start a bot, as read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    pub cmd: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Malformed player config {}", path.display()))
    }
}

/// A bot executable. A fresh process is started for every turn.
pub struct Player {
    pub name: String,
    cmd: PathBuf,
    args: Vec<String>,
}

impl Player {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            name: config.nick.clone(),
            cmd: config.cmd.clone(),
            args: config.args.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.cmd);
        command.args(&self.args);
        command
    }

    /// Asks the bot for the name it calls itself.
    pub fn reported_name(&self) -> anyhow::Result<String> {
        let output = self
            .command()
            .arg("name")
            .output()
            .with_context(|| format!("Could not start {}", self.cmd.display()))?;
        if !output.status.success() {
            anyhow::bail!("{} failed to report its name", self.name);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Lets the bot play one turn as `side`, from the board in `input` to `output`.
    ///
    /// Returns an error only if the bot could not be started.
    pub fn play_turn(&self, side: Side, input: &Path, output: &Path) -> anyhow::Result<ExitStatus> {
        trace!(player = &self.name, %side, input = %input.display(), "Starting bot");
        self.command()
            .arg(side.to_string())
            .arg(input)
            .arg(output)
            .status()
            .with_context(|| format!("Could not start {}", self.cmd.display()))
    }
}
