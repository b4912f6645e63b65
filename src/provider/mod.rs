use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::wire::Instruction;

pub mod gemini;
pub mod ollama;
pub mod openai;

/// A generative-language backend. `generate` returns the model's raw text
/// output; tolerant JSON extraction happens in the caller, never here.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, ins: &Instruction, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    let timeout = Duration::from_secs(cfg.timeout_secs);
    match cfg.provider {
        ProviderKind::Gemini => {
            let api_key = std::env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow!("GEMINI_API_KEY env var is not set"))?;
            Ok(Box::new(gemini::Gemini {
                model: cfg.model.clone(),
                api_key,
                timeout,
                api_base: cfg.gemini_api_base.clone(),
                temperature: cfg.temperature,
            }))
        }
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(
            cfg.model.clone(),
            cfg.timeout_secs,
            cfg.temperature,
        ))),
        ProviderKind::Ollama => Ok(Box::new(ollama::Ollama {
            model: cfg.model.clone(),
            url: cfg.ollama_url.clone(),
            timeout,
            temperature: cfg.temperature,
        })),
    }
}
