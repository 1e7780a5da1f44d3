pub mod webpage;
pub mod youtube;

use std::fmt;
use std::future::Future;

use serde::Serialize;
use url::Url;

use crate::error::LoadError;

pub use webpage::WebPageLoader;
pub use youtube::YoutubeLoader;

/// Substring that routes a URL to the transcript loader (youtube.com, youtu.be).
pub const VIDEO_URL_MARKER: &str = "youtu";

/// How the content behind a URL gets turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    VideoTranscript,
    WebPage,
}

impl LoadStrategy {
    pub fn for_url(url: &Url) -> Self {
        if url.as_str().contains(VIDEO_URL_MARKER) {
            LoadStrategy::VideoTranscript
        } else {
            LoadStrategy::WebPage
        }
    }
}

impl fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStrategy::VideoTranscript => f.write_str("video_transcript"),
            LoadStrategy::WebPage => f.write_str("web_page"),
        }
    }
}

/// Text extracted from a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    pub source: String,
    pub text: String,
}

impl ContentDocument {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

pub trait ContentLoader {
    fn load(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Vec<ContentDocument>, LoadError>> + Send;
}
