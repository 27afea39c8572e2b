use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::CompletionService;

/// Sampling temperature for every request. Keeps replies close to deterministic.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

/// Groq chat completions client (OpenAI-compatible API)
pub struct GroqService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqService {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
        }
    }
}

fn first_choice_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .context("Groq response contained no choices")
}

#[async_trait::async_trait]
impl CompletionService for GroqService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);

        log::info!("🤖 Sending request to Groq with model: {}", self.model);
        log::debug!("📤 Prompt size: {} bytes", prompt.len());

        let response = self
            .client
            .post(self.api_url("/chat/completions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Groq response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Groq API error ({}): {}", status, error_text);
            anyhow::bail!("Groq API error ({}): {}", status, error_text);
        }

        let response_text = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .context("Failed to decode Groq response envelope")?;

        let content = first_choice_content(chat_response)?;
        log::debug!("💬 Groq response content: {}", content);

        Ok(content)
    }
}
