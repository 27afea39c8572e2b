use anyhow::Result;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Meal analysis service: estimates ingredients and macros for a dish name.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: String,

    /// Model used for completions
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Deadline for a single model call, in seconds
    #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// Analyze this dish once, print the result and exit
    #[arg(long)]
    pub dish: Option<String>,
}

impl Config {
    /// Load from `.env`, the environment and the command line.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::parse().validated()
    }

    fn validated(self) -> Result<Self> {
        if self.groq_api_key.trim().is_empty() {
            anyhow::bail!("GROQ_API_KEY must not be empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("MODEL_TIMEOUT_SECS must be greater than zero");
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
