//! LLM provider abstraction for dalal
//!
//! This crate provides provider-agnostic abstractions for chat-completion
//! style LLM calls. It includes:
//!
//! - Message types for conversation history
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - A Groq provider (works against any OpenAI-compatible endpoint)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
