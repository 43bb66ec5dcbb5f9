use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ChainError, ChainResult};

/// Query generation runs at the most deterministic setting.
pub const TEMPERATURE: f32 = 0.0;

/// A text-completion service. Both chain stages share one instance.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> ChainResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChat {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiChat {
    pub fn new(config: &Config) -> ChainResult<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| ChainError::Configuration("OPENAI_API_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(config.llm_timeout())
            .build()
            .map_err(|e| ChainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.openai_base_url.trim_end_matches('/').to_string();
        debug!("LLM client initialized with URL: {}, Model: {}", base_url, config.openai_model);

        Ok(Self {
            client,
            base_url,
            model: config.openai_model.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, prompt: &str) -> ChainResult<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Sending {} prompt chars to {}", prompt.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Llm(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM call failed: {}", status);
            return Err(ChainError::Llm(format!("{status}: {body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Llm(format!("Malformed response: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ChainError::Llm("Empty completion".to_string()))
    }
}
