//! Interactive move source reading from a terminal.

use tictactoe_core::{Mark, MoveSource, Snapshot, SourceError, parse_candidate};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::{debug, instrument};

const MOVE_PROMPT: &str = "Enter your move (<row>, <col>): ";
const MARK_PROMPT: &str = "Enter your mark (X or O): ";

/// Human player typing `row, col` lines.
#[derive(Debug)]
pub struct ConsoleSource<R, W> {
    name: String,
    reader: R,
    writer: W,
}

impl<R, W> ConsoleSource<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a console source over any line reader and writer.
    pub fn new(name: impl Into<String>, reader: R, writer: W) -> Self {
        Self {
            name: name.into(),
            reader,
            writer,
        }
    }
}

impl ConsoleSource<BufReader<Stdin>, Stdout> {
    /// Console source over the process's stdin and stdout.
    pub fn stdio(name: impl Into<String>, reader: BufReader<Stdin>) -> Self {
        Self::new(name, reader, tokio::io::stdout())
    }
}

#[async_trait::async_trait]
impl<R, W> MoveSource for ConsoleSource<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    #[instrument(skip(self, _snapshot), fields(player = %self.name))]
    async fn propose(
        &mut self,
        _snapshot: &Snapshot,
        mark: Mark,
        _opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        let line = ask(&mut self.reader, &mut self.writer, MOVE_PROMPT).await?;
        debug!(%mark, line = %line.trim(), "Read move");
        parse_candidate(&line)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Asks for the human's mark. An unrecognized answer is fatal to setup.
#[instrument(skip_all)]
pub async fn prompt_mark<R, W>(reader: &mut R, writer: &mut W) -> anyhow::Result<Mark>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let line = ask(reader, writer, MARK_PROMPT).await?;
    let mark = Mark::parse(&line)?;
    debug!(%mark, "Mark chosen");
    Ok(mark)
}

async fn ask<R, W>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String, SourceError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let io_error = |e: std::io::Error| SourceError::unavailable(format!("Console I/O failed: {}", e));

    writer.write_all(prompt.as_bytes()).await.map_err(io_error)?;
    writer.flush().await.map_err(io_error)?;

    let mut line = String::new();
    let read = reader.read_line(&mut line).await.map_err(io_error)?;
    if read == 0 {
        return Err(SourceError::unavailable("Input closed"));
    }
    Ok(line)
}
