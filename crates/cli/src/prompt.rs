//! Interactive prompt session.
//!
//! An owned, scoped resource over stdin/stdout: opened when the first
//! answer is actually needed, closed (or dropped) on every exit path.
//! Replaces the usual module-level readline singleton.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

/// A question-and-answer session over a pair of byte streams.
pub struct PromptSession<R, W> {
    input: Lines<R>,
    output: W,
}

impl PromptSession<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Open a session over the process's stdin and stdout.
    pub fn open() -> Self {
        Self::from_parts(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> PromptSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Build a session from arbitrary streams (used by tests).
    pub fn from_parts(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    /// Print `prompt` (no trailing newline) and return the trimmed answer.
    ///
    /// End of input yields an empty answer.
    pub async fn ask(&mut self, prompt: &str) -> Result<String> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let line = self.input.next_line().await?.unwrap_or_default();
        Ok(line.trim().to_string())
    }

    /// Close the session, flushing any pending output.
    pub async fn close(mut self) -> Result<()> {
        self.output.flush().await?;
        Ok(())
    }
}
