use std::sync::{Arc, Mutex};

use url_summarizer::error::SummarizeError;
use url_summarizer::summarizer::{Credential, Summarizer};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub credentials: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<(u16, String)>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            credentials: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            fail_with: Some((status, message.to_string())),
            ..Self::new("")
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, SummarizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.credentials.lock().unwrap().push(credential.expose().to_string());

        if let Some((status, message)) = &self.fail_with {
            return Err(SummarizeError::Api {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(self.summary.clone())
    }
}
