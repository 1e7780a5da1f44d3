use std::sync::{Arc, Mutex};

use url::Url;
use url_summarizer::error::LoadError;
use url_summarizer::loader::{ContentDocument, ContentLoader};

#[derive(Clone, Default)]
pub struct MockLoader {
    pub texts: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with_status: Option<u16>,
}

impl MockLoader {
    pub fn new(text: &str) -> Self {
        Self::with_documents(&[text])
    }

    pub fn with_documents(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ContentLoader for MockLoader {
    async fn load(&self, url: &Url) -> Result<Vec<ContentDocument>, LoadError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(status) = self.fail_with_status {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(self
            .texts
            .iter()
            .map(|text| ContentDocument::new(url.as_str(), text.as_str()))
            .collect())
    }
}
