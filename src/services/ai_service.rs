use anyhow::Result;

/// Trait for text-completion models (Groq, OpenAI-compatible providers, test fakes)
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Send a single rendered prompt and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
