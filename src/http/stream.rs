//! Chunked file streaming
//!
//! A transfer task reads the file and pushes bounded chunks through a small
//! channel into the response body. When the client goes away hyper drops the
//! body, the channel closes, and the next send reports
//! [`Delivery::Disconnected`]. That outcome ends the transfer quietly: it is the
//! normal way a video player abandons a range while seeking.

use super::body::{self, BodyChunk, ResponseBody};
use super::range::ByteRange;
use crate::logger;
use hyper::body::{Bytes, Frame};
use std::io::{self, SeekFrom};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tokio::sync::mpsc;

/// Chunk size for ranged transfers
pub const RANGE_CHUNK_SIZE: usize = 8 * 1024;

/// Chunk size for whole-file transfers above [`SINGLE_WRITE_LIMIT`]
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Whole files up to this size go out as a single chunk
pub const SINGLE_WRITE_LIMIT: u64 = 1024 * 1024;

/// Chunks buffered between the reader task and the connection
const CHANNEL_DEPTH: usize = 2;

/// Result of handing one chunk to the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Disconnected,
}

/// How a transfer ended
#[derive(Debug)]
pub enum TransferOutcome {
    /// Every byte was handed to the connection
    Complete { sent: u64 },
    /// The file ran out of data early
    ShortRead { sent: u64, expected: u64 },
    /// The client closed the connection
    Disconnected { sent: u64 },
    /// Reading the file failed after headers were committed
    Failed { sent: u64, error: io::Error },
}

/// What part of the file to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPlan {
    Range(ByteRange),
    Whole { file_size: u64 },
}

/// Sending half of a streamed response body
pub struct ChunkSink {
    tx: mpsc::Sender<BodyChunk>,
}

impl ChunkSink {
    /// Create a sink and the body it feeds
    pub fn new() -> (Self, ResponseBody) {
        let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
        (Self { tx }, body::channel(rx))
    }

    /// Hand a chunk to the connection, waiting while the buffer is full
    pub async fn send(&self, chunk: Bytes) -> Delivery {
        match self.tx.send(Ok(Frame::data(chunk))).await {
            Ok(()) => Delivery::Sent,
            Err(_) => Delivery::Disconnected,
        }
    }

    /// Terminate the body with an error so the connection is cut short
    pub async fn abort(&self, error: io::Error) {
        // Nothing to do if the client is already gone
        let _ = self.tx.send(Err(error)).await;
    }
}

/// Spawn the transfer task and return the body it feeds.
///
/// `label` names the file in log lines.
pub fn start_transfer<R>(reader: R, plan: TransferPlan, label: String) -> ResponseBody
where
    R: AsyncRead + AsyncSeek + Unpin + Send + 'static,
{
    let (sink, body) = ChunkSink::new();

    tokio::spawn(async move {
        let mut reader = reader;
        let outcome = match plan {
            TransferPlan::Range(range) => copy_range(&mut reader, range, &sink).await,
            TransferPlan::Whole { file_size } => copy_whole(&mut reader, file_size, &sink).await,
        };
        report(outcome, plan, &label, &sink).await;
    });

    body
}

async fn report(outcome: TransferOutcome, plan: TransferPlan, label: &str, sink: &ChunkSink) {
    let kind = match plan {
        TransferPlan::Range(_) => "range request",
        TransferPlan::Whole { .. } => "transfer",
    };
    match outcome {
        TransferOutcome::Complete { .. } => {}
        TransferOutcome::ShortRead { sent, expected } => {
            logger::log_info(&format!(
                "File {label} ended early: sent {sent} of {expected} bytes"
            ));
        }
        TransferOutcome::Disconnected { sent } => {
            logger::log_client_disconnected(kind, label, sent);
        }
        TransferOutcome::Failed { sent, error } => {
            logger::log_error(&format!(
                "Read failed during {kind} of {label} after {sent} bytes: {error}"
            ));
            sink.abort(error).await;
        }
    }
}

/// Send `range` in [`RANGE_CHUNK_SIZE`] pieces
pub async fn copy_range<R>(reader: &mut R, range: ByteRange, sink: &ChunkSink) -> TransferOutcome
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    if let Err(error) = reader.seek(SeekFrom::Start(range.start)).await {
        return TransferOutcome::Failed { sent: 0, error };
    }
    copy_chunked(reader, range.content_length(), RANGE_CHUNK_SIZE, sink).await
}

/// Send a whole file: one chunk when small, [`STREAM_CHUNK_SIZE`] pieces otherwise
pub async fn copy_whole<R>(reader: &mut R, file_size: u64, sink: &ChunkSink) -> TransferOutcome
where
    R: AsyncRead + Unpin,
{
    if file_size > SINGLE_WRITE_LIMIT {
        return copy_chunked(reader, file_size, STREAM_CHUNK_SIZE, sink).await;
    }

    let mut data = Vec::with_capacity(usize::try_from(file_size).unwrap_or_default());
    // Bounded so a file that grew after stat cannot overrun Content-Length
    if let Err(error) = (&mut *reader).take(file_size).read_to_end(&mut data).await {
        return TransferOutcome::Failed { sent: 0, error };
    }

    let sent = data.len() as u64;
    if sent > 0 && sink.send(Bytes::from(data)).await == Delivery::Disconnected {
        return TransferOutcome::Disconnected { sent: 0 };
    }
    if sent < file_size {
        return TransferOutcome::ShortRead {
            sent,
            expected: file_size,
        };
    }
    TransferOutcome::Complete { sent }
}

async fn copy_chunked<R>(
    reader: &mut R,
    length: u64,
    chunk_size: usize,
    sink: &ChunkSink,
) -> TransferOutcome
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; chunk_size];
    let mut remaining = length;
    let mut sent = 0u64;

    while remaining > 0 {
        let want = usize::try_from(remaining).map_or(chunk_size, |r| r.min(chunk_size));
        let n = match reader.read(&mut buf[..want]).await {
            Ok(0) => {
                return TransferOutcome::ShortRead {
                    sent,
                    expected: length,
                }
            }
            Ok(n) => n,
            Err(error) => return TransferOutcome::Failed { sent, error },
        };

        if sink.send(Bytes::copy_from_slice(&buf[..n])).await == Delivery::Disconnected {
            return TransferOutcome::Disconnected { sent };
        }
        sent += n as u64;
        remaining -= n as u64;
    }

    TransferOutcome::Complete { sent }
}
