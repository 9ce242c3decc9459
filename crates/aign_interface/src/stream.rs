//! Buffering of streamed replies.

use crate::ChunkStream;
use aign_core::CompletionResponse;
use aign_error::AignResult;
use futures_util::StreamExt;

/// Drain a chunk stream into one complete response.
///
/// Section parsing needs the whole reply, so a streamed completion is fully
/// buffered before anything downstream sees it. The first failed chunk aborts
/// the collection.
#[tracing::instrument(skip(stream))]
pub async fn collect_stream(mut stream: ChunkStream) -> AignResult<CompletionResponse> {
    let mut content = String::new();
    let mut chunks = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        content.push_str(&chunk.content);
        chunks += 1;
        if chunk.is_final {
            tracing::debug!(chunks, finish_reason = ?chunk.finish_reason, "Stream finished");
            break;
        }
    }

    Ok(CompletionResponse::new(content, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FinishReason, StreamChunk};
    use aign_error::{TransportError, TransportErrorKind};
    use futures_util::stream;

    #[tokio::test]
    async fn test_collect_concatenates_chunks() {
        let chunks: Vec<AignResult<StreamChunk>> = vec![
            Ok(StreamChunk::delta("# 段落\n")),
            Ok(StreamChunk::delta("从前")),
            Ok(StreamChunk::last("有座山。", FinishReason::Stop)),
        ];
        let response = collect_stream(Box::pin(stream::iter(chunks)))
            .await
            .expect("stream collects");

        assert_eq!(response.content(), "# 段落\n从前有座山。");
    }

    #[tokio::test]
    async fn test_collect_stops_after_final_chunk() {
        let chunks: Vec<AignResult<StreamChunk>> = vec![
            Ok(StreamChunk::last("done", FinishReason::Stop)),
            Ok(StreamChunk::delta("ignored")),
        ];
        let response = collect_stream(Box::pin(stream::iter(chunks)))
            .await
            .expect("stream collects");

        assert_eq!(response.content(), "done");
    }

    #[tokio::test]
    async fn test_collect_propagates_chunk_error() {
        let chunks: Vec<AignResult<StreamChunk>> = vec![
            Ok(StreamChunk::delta("partial")),
            Err(TransportError::new(TransportErrorKind::Http("reset".into())).into()),
        ];
        let result = collect_stream(Box::pin(stream::iter(chunks))).await;

        assert!(result.is_err());
    }
}
