//! Streamed response body as decoded text segments

use std::pin::Pin;

use async_stream::stream;
use futures::StreamExt;
use tokio_stream::Stream;

use crate::{decode::Utf8Decoder, error::Error};

/// A stream of decoded text segments from one response body.
///
/// Segment boundaries are transport-determined and carry no meaning; the
/// concatenation of all `Ok` items is the full response text. The stream ends
/// after the first `Err` item.
pub type TextStream = Pin<Box<dyn Stream<Item = crate::Result<String>> + Send>>;

/// Adapt a response body into decoded text segments.
///
/// Empty segments (a fragment that only completed part of a multi-byte
/// character) are skipped rather than yielded.
pub fn text_segments(response: reqwest::Response) -> TextStream {
    Box::pin(stream! {
        let mut decoder = Utf8Decoder::new();
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = decoder.decode(&bytes);
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
                Err(e) => {
                    tracing::debug!("response body read failed: {}", e);
                    yield Err(Error::Read(e.to_string()));
                    return;
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    })
}
