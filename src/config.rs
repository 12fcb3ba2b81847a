use std::env;

use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Vision-call reply cap; the item listing is short by construction.
const DEFAULT_MAX_TOKENS: u32 = 300;

/// Runtime configuration, loaded once from the environment at startup. The
/// API key is the only required value.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY must be set (see .env)")?;

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| {
            log::info!("OPENAI_MODEL not set, using default: {}", DEFAULT_MODEL);
            DEFAULT_MODEL.to_string()
        });

        let api_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_key,
            model,
            api_url,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}
