use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;
use crate::summarizer::{Credential, Summarizer};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Chat completions client for Groq's OpenAI-compatible API.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl GroqClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_GROQ_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn send_completion_request(
        &self,
        credential: &Credential,
        user_content: &str,
    ) -> Result<String, SummarizeError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: user_content,
            }],
            temperature: self.temperature,
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status,
                message: api_error_message(&message),
            });
        }

        let response = res.json::<ChatResponse>().await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(SummarizeError::EmptyResponse)
    }
}

impl Summarizer for GroqClient {
    async fn summarize(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, SummarizeError> {
        self.send_completion_request(credential, prompt)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Failed to summarize content")
            })
    }
}

/// OpenAI-style error bodies look like `{"error":{"message":"..."}}`; fall back
/// to the raw body for anything else.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
