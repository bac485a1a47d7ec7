//! Response body type shared by buffered and streamed responses

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::io;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Every handler response carries this body
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Item type flowing from a transfer task into a streamed body
pub type BodyChunk = Result<Frame<Bytes>, io::Error>;

/// Buffered body from in-memory bytes
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Zero-length body
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Body fed chunk by chunk from a channel.
///
/// Hyper drops the body when the client goes away, which closes the
/// receiving side and lets the sender observe the disconnect.
pub fn channel(rx: mpsc::Receiver<BodyChunk>) -> ResponseBody {
    StreamBody::new(ReceiverStream::new(rx)).boxed_unsync()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_body_collects() {
        let body = full("hello");
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_channel_body_yields_sent_chunks() {
        let (tx, rx) = mpsc::channel(2);
        let body = channel(rx);
        tokio::spawn(async move {
            tx.send(Ok(Frame::data(Bytes::from_static(b"ab")))).await.unwrap();
            tx.send(Ok(Frame::data(Bytes::from_static(b"cd")))).await.unwrap();
        });
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"abcd");
    }
}
