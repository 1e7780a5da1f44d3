use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use clap::Args;
use reqwest::{Client, ClientBuilder};

use crate::error::{AppError, Result};
use crate::llm::{DEFAULT_GROQ_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GroqClient};
use crate::loader::{WebPageLoader, YoutubeLoader, youtube::DEFAULT_YOUTUBE_BASE_URL};
use crate::pipeline::Pipeline;
use crate::summarizer::{DEFAULT_PROMPT_TEMPLATE, PromptTemplate};

pub type DefaultPipeline = Pipeline<YoutubeLoader, WebPageLoader, GroqClient>;

/// Settings for the loaders and the model client. The API key is not part of
/// it; every action brings its own.
#[derive(Debug, Clone, Args)]
pub struct PipelineConfig {
    /// Base URL of the OpenAI-compatible chat completions API
    #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_GROQ_BASE_URL)]
    pub groq_base_url: String,

    /// Model used for summaries
    #[arg(long, env = "SUMMARY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "SUMMARY_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Prompt sent to the model; must contain exactly one {text} slot
    #[arg(
        long,
        env = "PROMPT_TEMPLATE",
        default_value = DEFAULT_PROMPT_TEMPLATE,
        hide_default_value = true
    )]
    pub prompt_template: String,

    #[arg(long, env = "YOUTUBE_BASE_URL", default_value = DEFAULT_YOUTUBE_BASE_URL)]
    pub youtube_base_url: String,

    /// Caption languages to look for, in order of preference
    #[arg(long, env = "TRANSCRIPT_LANGUAGES", value_delimiter = ',', default_value = "en")]
    pub transcript_languages: Vec<String>,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 60)]
    pub http_timeout_secs: u64,

    #[arg(long, env = "HTTP_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub http_connect_timeout_secs: u64,
}

impl PipelineConfig {
    pub fn http_client(&self) -> Result<Client> {
        ClientBuilder::new()
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .connect_timeout(Duration::from_secs(self.http_connect_timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))
    }

    pub fn build_pipeline(&self) -> Result<DefaultPipeline> {
        let prompt = PromptTemplate::new(self.prompt_template.as_str())
            .map_err(|e| AppError::Config(e.to_string()))?;
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Invalid temperature {}: expected a value between 0 and 2",
                self.temperature
            )));
        }

        let client = self.http_client()?;
        let video = YoutubeLoader::new(client.clone())
            .with_base_url(&self.youtube_base_url)
            .with_languages(self.transcript_languages.clone());
        let web = WebPageLoader::new(client.clone());
        let summarizer = GroqClient::new(client)
            .with_base_url(&self.groq_base_url)
            .with_model(&self.model)
            .with_temperature(self.temperature);

        Ok(Pipeline::new(video, web, summarizer).with_prompt(prompt))
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: String,
}

impl ServerConfig {
    pub fn server_addr(&self) -> Result<SocketAddr> {
        let port = self
            .port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&self.host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        Ok(SocketAddr::new(ip, port))
    }
}
