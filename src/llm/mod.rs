// src/llm/mod.rs
// Chat-completion gateway (OpenAI-compatible) shared by the filter and the engines

mod logging;
mod openai;
mod openai_compat;
mod provider;
mod transport;
mod types;

pub use openai::OpenAiClient;
pub use openai_compat::{ChatRequest, parse_chat_response};
pub use provider::LlmGateway;
pub use transport::{HttpTransport, RetryPolicy};
pub use types::{ChatResult, Message, Role, Usage};

/// Canonical chat model for classification and rewriting
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
