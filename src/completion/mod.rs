mod client;
mod types;

pub use client::{CompletionError, CompletionSettings, OpenAiClient};
pub use types::{ChatMessage, ChatRequest, Role};

use std::future::Future;

/// Anything that can answer a chat request with text
pub trait Completer {
    fn complete(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}
