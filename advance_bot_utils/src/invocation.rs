use std::path::PathBuf;

use advance::Side;
use anyhow::{bail, Context};

/// What a bot was asked to do on its command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// `name`, in any case: print the bot's name on stdout.
    Name,
    /// `<colour> <inFile> <outFile>`: play one turn.
    Play {
        side: Side,
        input: PathBuf,
        output: PathBuf,
    },
}

impl Invocation {
    pub fn from_args(args: &[String]) -> anyhow::Result<Self> {
        match args {
            [command] if command.eq_ignore_ascii_case("name") => Ok(Invocation::Name),
            [colour, input, output] => {
                let side = colour
                    .parse()
                    .with_context(|| format!("Unknown colour {:?}", colour))?;
                Ok(Invocation::Play {
                    side,
                    input: input.into(),
                    output: output.into(),
                })
            }
            _ => bail!("Expected either `name` or `<colour> <inFile> <outFile>`, got {:?}", args),
        }
    }
}
