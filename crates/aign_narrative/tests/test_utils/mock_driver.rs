//! Scripted chat driver for testing.

use aign_core::{CompletionRequest, CompletionResponse, TokenUsage};
use aign_error::{AignResult, TransportError, TransportErrorKind};
use aign_interface::ChatDriver;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(TransportErrorKind),
    /// Return a sequence of responses; calls past the end fail
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(String),
    Error(TransportErrorKind),
}

/// Mock chat driver that records every request it receives.
pub struct MockChatDriver {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    model_name: String,
}

#[allow(dead_code)]
impl MockChatDriver {
    /// Create a mock driver with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock-glm".to_string(),
        }
    }

    /// Create a mock driver that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock driver that always fails with the given error.
    pub fn new_error(error: TransportErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock driver replying with successive texts.
    pub fn new_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new_sequence(
            replies
                .into_iter()
                .map(|text| MockResponse::Success(text.into()))
                .collect(),
        )
    }

    /// Create a mock driver with a sequence of responses.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Number of times complete() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Content of the final message of the n-th request.
    pub fn last_turn_of(&self, n: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[n]
            .messages
            .last()
            .map(|message| message.content().clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> AignResult<CompletionResponse> {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        let outcome = match &self.behavior {
            MockBehavior::Success(text) => MockResponse::Success(text.clone()),
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::Sequence(responses) => responses
                .get(current)
                .cloned()
                .unwrap_or(MockResponse::Error(TransportErrorKind::EmptyResponse)),
        };

        match outcome {
            MockResponse::Success(text) => {
                let usage = TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                };
                Ok(CompletionResponse::new(text, Some(usage)))
            }
            MockResponse::Error(kind) => Err(TransportError::new(kind).into()),
        }
    }
}

#[async_trait]
impl ChatDriver for MockChatDriver {
    async fn complete(&self, req: &CompletionRequest) -> AignResult<CompletionResponse> {
        self.requests.lock().unwrap().push(req.clone());
        self.next_response()
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
