use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::Instruction;

pub struct Ollama {
    pub model: String,
    pub url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct Msg {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

fn to_messages(ins: &Instruction) -> Vec<Msg> {
    vec![
        Msg { role: "system".into(), content: ins.system.clone() },
        Msg { role: "user".into(), content: ins.user.clone() },
    ]
}

#[async_trait]
impl Provider for Ollama {
    async fn generate(&self, ins: &Instruction, debug: bool) -> Result<String> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = ChatRequest {
            model: &self.model,
            messages: to_messages(ins),
            stream: false,
            options: OllamaOptions { temperature: self.temperature },
        };

        if debug {
            eprintln!("debug/ollama: POST {}", url);
        }

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?;

        let text = resp.text().await.context("ollama read body failed")?;

        if debug {
            eprintln!("debug/ollama: raw body:\n{}\n", text);
        }

        // Some proxies return the message content bare rather than wrapped in
        // the chat envelope; fall back to the body itself in that case.
        let parsed: Result<ChatResponse, _> = serde_json::from_str(&text);
        let content = match parsed {
            Ok(c) => c.message.content,
            Err(_) => text,
        };

        Ok(content)
    }
}
