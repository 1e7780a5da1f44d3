use once_cell::sync::Lazy;
use reqwest::{Client, header::CONTENT_TYPE};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::error::LoadError;
use crate::loader::{ContentDocument, ContentLoader};

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "svg"];

/// Loads a generic page over HTTP(S) and reduces it to its visible text.
#[derive(Clone)]
pub struct WebPageLoader {
    client: Client,
}

impl WebPageLoader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &Url) -> Result<(Option<String>, String), LoadError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());
        let body = response.text().await?;

        Ok((content_type, body))
    }
}

impl ContentLoader for WebPageLoader {
    async fn load(&self, url: &Url) -> Result<Vec<ContentDocument>, LoadError> {
        let (content_type, body) = self.fetch(url).await?;

        let text = match PageKind::from_content_type(content_type.as_deref())? {
            PageKind::Html => extract_text(&body),
            PageKind::PlainText => format_text(&body),
        };
        tracing::debug!(%url, chars = text.len(), "Extracted page text");

        if text.is_empty() {
            return Err(LoadError::EmptyContent(url.to_string()));
        }

        Ok(vec![ContentDocument::new(url.as_str(), text)])
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PageKind {
    Html,
    PlainText,
}

impl PageKind {
    fn from_content_type(content_type: Option<&str>) -> Result<Self, LoadError> {
        let Some(content_type) = content_type else {
            return Ok(PageKind::Html);
        };
        let mime = content_type.split(';').next().unwrap_or_default().trim();

        match mime {
            "text/html" | "application/xhtml+xml" => Ok(PageKind::Html),
            "text/plain" => Ok(PageKind::PlainText),
            other => Err(LoadError::UnsupportedContentType(other.to_string())),
        }
    }
}

/// Collects the text nodes under `<body>`, leaving out scripts, styles and
/// other non-visible subtrees.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::with_capacity(html.len() / 2);
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ElementRef::wrap(ancestor)
                .map(|element| SKIPPED_ELEMENTS.contains(&element.value().name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        raw.push_str(text);
        raw.push('\n');
    }

    format_text(&raw)
}

/// Trims each line and drops the blank ones.
pub fn format_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(trimmed);
        }
    }

    result
}
