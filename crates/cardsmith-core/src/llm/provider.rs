//! LlmProvider trait definition.
//!
//! The design crew only needs whole-response completions, so the trait has a
//! single async method. Uses RPITIT (Rust 2024 edition); see
//! [`BoxLlmProvider`](super::box_provider::BoxLlmProvider) for dynamic dispatch.

use std::future::Future;

use cardsmith_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends (OpenAI, SambaNova, ...).
///
/// Implementations live in cardsmith-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "sambanova").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn default_model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
