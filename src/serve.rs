//! Serve loop
//!
//! Reads request lines, answers each on its own task and writes response
//! lines as they complete. Responses may be written out of request order;
//! clients match them by id. Each line is handled on the blocking pool since
//! a query can take arbitrarily long. Finished tasks are reaped while input
//! is still open.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

use tfjq_executor::{Error, Executor};
use tfjq_wire::{decode_request, encode_response, handle_line, ResponseEnvelope};

/// Serve requests from `reader` until it reaches end of input.
///
/// Returns once every accepted request has been answered and flushed.
pub async fn serve<R, W>(executor: Executor, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        writer.shutdown().await
    });

    let mut in_flight = JoinSet::new();
    let accepted = accept(&executor, BufReader::new(reader), &tx, &mut in_flight).await?;
    tracing::info!(
        target: "tfjq::serve",
        accepted,
        pending = in_flight.len(),
        "input closed, draining"
    );

    while let Some(joined) = in_flight.join_next().await {
        reap(joined);
    }
    drop(tx);

    writer_task
        .await
        .context("writer task failed")?
        .context("writing response")?;
    Ok(())
}

/// Spawn a task per request line until end of input, reaping finished
/// tasks as they complete. Returns the number of lines accepted.
async fn accept<R>(
    executor: &Executor,
    reader: R,
    tx: &mpsc::UnboundedSender<String>,
    in_flight: &mut JoinSet<()>,
) -> anyhow::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut accepted = 0u64;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading request")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                accepted += 1;
                let executor = executor.clone();
                let tx = tx.clone();
                in_flight.spawn(async move {
                    // fails only if the writer has already died
                    let _ = tx.send(answer(executor, line).await);
                });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => reap(joined),
        }
    }
    Ok(accepted)
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        tracing::warn!(target: "tfjq::serve", error = %e, "request task failed");
    }
}

async fn answer(executor: Executor, line: String) -> String {
    let request = line.clone();
    match tokio::task::spawn_blocking(move || handle_line(&executor, &request)).await {
        Ok(response) => response,
        Err(e) => {
            // Recover the id so the client can still match the failure
            let id = decode_request(&line).map(|env| env.id).unwrap_or_default();
            tracing::warn!(target: "tfjq::serve", %id, error = %e, "request panicked");
            encode_response(&ResponseEnvelope::error(
                &id,
                &Error::Internal {
                    reason: e.to_string(),
                },
            ))
        }
    }
}
