use std::fmt;
use std::future::Future;

use crate::error::SummarizeError;
use crate::loader::ContentDocument;

pub const TEXT_SLOT: &str = "{text}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "
Provide a summary of the following content:
Content: {text}
";

const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Secret used to authenticate against the model API. Lives only as long as
/// the request that carries it and never shows up in `Debug` output.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

pub trait Summarizer {
    fn summarize(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> impl Future<Output = Result<String, SummarizeError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prompt template must contain exactly one {{text}} slot, found {0}")]
pub struct TemplateError(usize);

/// Prompt with a single `{text}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        match template.matches(TEXT_SLOT).count() {
            1 => Ok(Self { template }),
            n => Err(TemplateError(n)),
        }
    }

    pub fn render(&self, text: &str) -> String {
        self.template.replacen(TEXT_SLOT, text, 1)
    }

    /// "Stuff" mode: every document goes into the one slot, separated by a
    /// blank line, producing a single prompt.
    pub fn stuff(&self, documents: &[ContentDocument]) -> String {
        let text = documents
            .iter()
            .map(|doc| doc.text.as_str())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);
        self.render(&text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}
