//! REPL Module
//!
//! The line-oriented command loop: input cleaning, command parsing, and the
//! per-session state commands act on.

pub mod commands;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::error::{PokedexError, Result};

pub use commands::{Command, CommandSpec, Parsed, COMMANDS};
pub use session::Session;

/// Prompt printed before each line is read.
pub const PROMPT: &str = "Pokedex > ";

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Lowercases `text` and splits it into whitespace-separated words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// Command failures are printed as `Error: ...` and the loop continues. Only
/// failures to read input or write output end the loop with an error.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            writeln!(out)?;
            return Ok(());
        };

        match session.execute(&line, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(err)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "Command failed");
                writeln!(out, "Error: {}", err)?;
            }
        }
    }
}
