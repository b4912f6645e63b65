use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::wire::Instruction;

pub struct OpenAIProvider {
    model: String,
    client: Client,
    timeout_secs: u64,
    temperature: f32,
}

impl OpenAIProvider {
    pub fn new(model: String, timeout_secs: u64, temperature: f32) -> Self {
        Self {
            model,
            client: Client::new(),
            timeout_secs,
            temperature,
        }
    }
}

#[async_trait]
impl super::Provider for OpenAIProvider {
    async fn generate(&self, ins: &Instruction, debug: bool) -> Result<String> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY env var is not set"))?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": ins.system },
                { "role": "user", "content": ins.user }
            ],
            "temperature": self.temperature,
            // Force a valid JSON object in the response.
            "response_format": { "type": "json_object" }
        });

        if debug {
            eprintln!(
                "debug[openai]: HTTP POST /v1/chat/completions body:\n{}",
                serde_json::to_string_pretty(&body)?
            );
        }

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if debug {
            eprintln!("debug[openai]: raw status: {}", status);
            eprintln!("debug[openai]: raw response:\n{}", &text);
        }

        if !status.is_success() {
            return Err(anyhow!("OpenAI API error ({}): {}", status, text));
        }

        // Minimal structs to parse the chat envelope
        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse OpenAI response: {e}\nRaw: {text}"))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("openai: empty choices"))
    }
}
