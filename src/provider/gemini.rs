use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::Instruction;

pub struct Gemini {
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
    pub api_base: String,
    pub temperature: f32,
}

#[derive(Serialize)]
struct GenRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Pull the generated text out of a `generateContent` response body. A
/// candidate may split its output across several parts.
fn text_from_body(body: &str) -> Result<String> {
    let parsed: GenResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("gemini response parse error: {}", e))?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.is_empty() {
        return Err(anyhow!("gemini: empty candidates"));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Gemini {
    async fn generate(&self, ins: &Instruction, debug: bool) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = GenRequest {
            contents: vec![Content { parts: vec![Part { text: &ins.user }] }],
            system_instruction: Some(Content { parts: vec![Part { text: &ins.system }] }),
            generation_config: GenConfig { temperature: self.temperature },
        };

        if debug {
            eprintln!("debug/gemini: POST {}", url);
        }

        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;
        if debug {
            eprintln!("debug/gemini: raw body:\n{}\n", text);
        }
        if !status.is_success() {
            return Err(anyhow!("gemini API error ({}): {}", status, text));
        }

        text_from_body(&text)
    }
}
