//! Interactive terminal confirmation.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use recshare_core::{ConfirmationPort, ConfirmationRequest, ConfirmationResponse, IdSet, ShareError};

/// Asks on a terminal: `[y]es / [n]o / [s]elect / [a]bort`.
///
/// `select` walks the flagged recommendations one by one.
pub struct TerminalPrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPrompt<BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stderr())
    }
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

async fn ask<R, W>(reader: &mut R, writer: &mut W, question: &str) -> Result<String, ShareError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    writer.write_all(question.as_bytes()).await?;
    writer.flush().await?;
    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Err(ShareError::Confirmation("input closed before an answer".into()));
    }
    Ok(line.trim().to_ascii_lowercase())
}

#[async_trait]
impl<R, W> ConfirmationPort for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(
        &self,
        request: &ConfirmationRequest,
    ) -> recshare_core::Result<ConfirmationResponse> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        writer
            .write_all(format!("{}\n", request.message).as_bytes())
            .await?;
        loop {
            let answer = ask(reader, writer, "[y]es / [n]o / [s]elect / [a]bort: ").await?;
            match answer.as_str() {
                "y" | "yes" => return Ok(ConfirmationResponse::AcceptAll),
                "n" | "no" => return Ok(ConfirmationResponse::DeclineAll),
                "a" | "abort" => return Ok(ConfirmationResponse::Abort),
                "s" | "select" => {
                    let mut accepted = IdSet::new();
                    for e in &request.expansions {
                        let q = format!(
                            "  widen {} from {} to {}? [y/n]: ",
                            e.display_name(),
                            e.current_visibility,
                            e.target_visibility
                        );
                        if matches!(ask(reader, writer, &q).await?.as_str(), "y" | "yes") {
                            accepted.insert(e.id.clone());
                        }
                    }
                    return Ok(ConfirmationResponse::PerItem { accepted });
                }
                _ => continue,
            }
        }
    }
}
