//! LLM provider abstraction
//!
//! The assistant only needs plain chat completions, so providers implement a single
//! request/response call behind [`LLMProviderTrait`].

mod openai;
mod provider_trait;

pub use openai::{OpenAICompatibleProvider, GROQ_CHAT_ENDPOINT};
pub use provider_trait::{
    ChatConfig, ChatMessage, ChatRequest, LLMProviderTrait, MessageRole, ProviderError,
    TokenUsage,
};
