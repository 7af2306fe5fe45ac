//! OpenAI-compatible adapter for LLM analysis.
//!
//! Works with any chat-completions endpoint: Gemini's OpenAI-compatible API (default),
//! OpenAI, Azure OpenAI and local Ollama instances. Implements `LlmPort` as a single
//! blocking-from-the-caller's-view request with no retries.

use crate::domain::DomainError;
use crate::ports::LlmPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// OpenAI-compatible LLM adapter.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Chat completions endpoint
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gemini-1.5-flash", "gpt-4o-mini", "llama3.2")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Pull the first choice's text out of a chat completions response body.
    fn extract_content(body: &str) -> Result<String, DomainError> {
        let chat_response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::Invocation(format!("Failed to parse API response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::Invocation("No response choices returned".to_string()))
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmPort for OpenAiAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "sending prompt to LLM"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Invocation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "LLM API returned error");
            return Err(DomainError::Invocation(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Invocation(format!("Failed to read API response: {}", e)))?;
        let content = Self::extract_content(&body)?;

        debug!(response_len = content.len(), "received LLM response");
        Ok(content)
    }
}
