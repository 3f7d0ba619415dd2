use reqwest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

macro_rules! debug_println {
    ($($arg:tt)*) => {
        if std::env::var("TOPIC_SCOUT_DEBUG").is_ok() {
            println!($($arg)*);
        }
    };
}

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum GenerationError {
    // User-facing notice; delivered through the normal result path.
    #[error("API 키가 유효하지 않습니다.")]
    NoCredential,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation service returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("generation service returned no text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn with_config(model: String, api_key: Option<String>) -> Self {
        GeminiClient {
            base_url: API_BASE.to_string(),
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// One prompt in, the raw generated text out. The credential is
    /// checked before any network traffic; no retry on failure.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::NoCredential);
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug_println!("POST {}:generateContent", self.model);

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            debug_println!("generateContent error {}: {}", status, message);
            return Err(GenerationError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}
