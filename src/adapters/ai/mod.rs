//! LLM adapter module. Implements LlmPort.
//!
//! Provides OpenAI-compatible adapter and mock adapter for offline use.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockLlmAdapter;
pub use openai_adapter::OpenAiAdapter;
