use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::loader::LoadStrategy;

/// Fields posted by the page form and by JSON clients alike. Missing fields
/// deserialize to empty strings so the validator reports them.
#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub summary: String,
    pub strategy: LoadStrategy,
    pub word_count: usize,
    pub summarized_at: DateTime<Utc>,
}
