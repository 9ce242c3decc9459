//! Server-sent-event decoding for streamed chat completions.

use crate::openai_compat::dto::ChatStreamEvent;
use aign_error::{TransportError, TransportErrorKind};
use aign_interface::{ChunkStream, FinishReason, StreamChunk};
use futures_util::{Stream, StreamExt, stream};
use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

/// Outcome of decoding one SSE line.
#[derive(Debug, PartialEq)]
pub enum SseLine {
    /// A content chunk
    Chunk(StreamChunk),
    /// The `[DONE]` sentinel
    Done,
    /// Comments, blank keep-alives, events without content
    Skip,
}

/// Decode a single line of an event stream.
pub fn parse_line(line: &str) -> Result<SseLine, TransportError> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim();
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let event: ChatStreamEvent = serde_json::from_str(data).map_err(|e| {
        TransportError::new(TransportErrorKind::ResponseParsing(format!(
            "Invalid stream event: {}",
            e
        )))
    })?;

    let Some(choice) = event.choices.into_iter().next() else {
        return Ok(SseLine::Skip);
    };
    let content = choice.delta.content.unwrap_or_default();

    Ok(match choice.finish_reason {
        Some(reason) => SseLine::Chunk(StreamChunk::last(content, FinishReason::from_provider(&reason))),
        None if content.is_empty() => SseLine::Skip,
        None => SseLine::Chunk(StreamChunk::delta(content)),
    })
}

struct Decoder<S> {
    bytes: Pin<Box<S>>,
    buffer: Vec<u8>,
    pending: VecDeque<StreamChunk>,
    finished: bool,
}

/// Turn a byte stream of SSE frames into a [`ChunkStream`].
///
/// Lines are split on raw bytes so multi-byte characters spanning two
/// network reads are decoded intact.
pub fn decode<S, B, E>(bytes: S) -> ChunkStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let decoder = Decoder {
        bytes: Box::pin(bytes),
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(stream::unfold(decoder, |mut state| async move {
        loop {
            if let Some(chunk) = state.pending.pop_front() {
                return Some((Ok(chunk), state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    state.buffer.extend_from_slice(bytes.as_ref());
                    while let Some(pos) = state.buffer.iter().position(|b| *b == b'\n') {
                        let line: Vec<u8> = state.buffer.drain(..=pos).collect();
                        let line = String::from_utf8_lossy(&line);
                        match parse_line(line.trim()) {
                            Ok(SseLine::Chunk(chunk)) => state.pending.push_back(chunk),
                            Ok(SseLine::Done) => {
                                state.finished = true;
                                break;
                            }
                            Ok(SseLine::Skip) => {}
                            Err(e) => {
                                state.finished = true;
                                return Some((Err(e.into()), state));
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    state.finished = true;
                    let err = TransportError::new(TransportErrorKind::Http(format!(
                        "Stream interrupted: {}",
                        e
                    )));
                    return Some((Err(err.into()), state));
                }
                None => state.finished = true,
            }
        }
    }))
}
