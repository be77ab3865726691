use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use riderlog_core::InsightsGenerator;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Ollama-backed insights generator. One prompt in, one block of prose out;
/// no retries, no streaming.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OllamaGenerator {
    pub fn new(base_url: String, model: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            model,
            client,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl InsightsGenerator for OllamaGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().map_err(|e| {
            if e.is_timeout() {
                anyhow!("Insights request timed out after {}s", REQUEST_TIMEOUT_SECS)
            } else if e.is_connect() {
                anyhow!("Cannot connect to Ollama at {}", self.base_url)
            } else {
                anyhow!("Failed to send insights request: {}", e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("Ollama API error {}: {}", status, body));
        }

        let parsed: GenerateResponse = response.json().context("Failed to parse Ollama response")?;
        Ok(parsed.response.trim().to_string())
    }
}
