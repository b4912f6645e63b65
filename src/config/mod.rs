use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::cli::ProviderKind;
use crate::errors::TripError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub bind: String,
    pub provider: ProviderKind,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub gemini_api_base: String,
    pub ollama_url: String,
    pub save_request: bool,
    pub save_response: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            bind: "127.0.0.1:8787".into(),
            provider: ProviderKind::Gemini,
            model: "gemini-2.5-flash".into(),
            timeout_secs: 120,
            temperature: 0.2,
            gemini_api_base: "https://generativelanguage.googleapis.com".into(),
            ollama_url: "http://localhost:11434".into(),
            save_request: true,
            save_response: true,
        }
    }
}

impl Config {
    /// Load from a TOML file when a path is given; otherwise the defaults.
    /// Absent keys keep their default values.
    pub fn load(path: Option<&str>) -> Result<Self, TripError> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let text = fs::read_to_string(p)
                    .map_err(|e| TripError::Config(format!("read {}: {}", p, e)))?;
                toml::from_str(&text)
                    .map_err(|e| TripError::Config(format!("parse {}: {}", p, e)))
            }
        }
    }
}
