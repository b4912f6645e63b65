use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    #[value(alias = "openai", alias = "open-ai")]
    OpenAI,
    #[value(alias = "ollama")]
    Ollama,
}

#[derive(Parser, Debug)]
#[command(name = "tripsmith", version, about = "Student travel itinerary generator backed by a generative-language API")]
pub struct Args {
    /// Run the HTTP API instead of a one-shot generation.
    #[arg(long, default_value_t = false)]
    pub serve: bool,

    #[arg(long)]
    pub bind: Option<String>,

    #[arg(long)]
    pub destination: Option<String>,

    #[arg(long)]
    pub days: Option<u32>,

    #[arg(long)]
    pub budget: Option<String>,

    #[arg(long)]
    pub interests: Option<String>,

    #[arg(long)]
    pub transport: Option<String>,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Root directory for transaction artifacts (.tripsmith/tx/...).
    #[arg(long, default_value = ".")]
    pub root: String,

    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long)]
    pub config: Option<String>,
}
