use std::time::Instant;

use url::Url;

use crate::error::{AppError, PipelineError};
use crate::loader::{ContentDocument, ContentLoader, LoadStrategy};
use crate::summarizer::{Credential, PromptTemplate, Summarizer};
use crate::validate::{Validation, validate};

/// Everything one action needs, built only from inputs that passed validation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    credential: Credential,
    url: Url,
    strategy: LoadStrategy,
}

impl RequestContext {
    pub fn from_validation(credential: &str, validation: Validation) -> Result<Self, AppError> {
        match validation {
            Validation::Valid(url) => Ok(Self {
                credential: Credential::new(credential),
                strategy: LoadStrategy::for_url(&url),
                url,
            }),
            Validation::MissingFields => Err(AppError::MissingFields),
            Validation::InvalidUrl => Err(AppError::InvalidUrl),
        }
    }

    pub fn new(credential: &str, url: &str) -> Result<Self, AppError> {
        Self::from_validation(credential, validate(credential, url))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub strategy: LoadStrategy,
    pub word_count: usize,
}

/// Load then summarize. `V` handles video URLs, `W` everything else.
#[derive(Clone)]
pub struct Pipeline<V, W, S> {
    video: V,
    web: W,
    summarizer: S,
    prompt: PromptTemplate,
}

impl<V, W, S> Pipeline<V, W, S>
where
    V: ContentLoader + Sync,
    W: ContentLoader + Sync,
    S: Summarizer + Sync,
{
    pub fn new(video: V, web: W, summarizer: S) -> Self {
        Self {
            video,
            web,
            summarizer,
            prompt: PromptTemplate::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    pub async fn run(&self, ctx: &RequestContext) -> Result<SummaryResult, PipelineError> {
        let start = Instant::now();
        tracing::info!(url = %ctx.url, strategy = %ctx.strategy, "Loading content");

        let documents = self.load(ctx).await?;
        let word_count: usize = documents.iter().map(ContentDocument::word_count).sum();
        for doc in &documents {
            tracing::debug!(source = %doc.source, words = doc.word_count(), "Loaded document");
        }
        tracing::info!(
            documents = documents.len(),
            word_count,
            elapsed = ?start.elapsed(),
            "Content loaded"
        );

        let prompt = self.prompt.stuff(&documents);
        tracing::debug!(chars = prompt.len(), "Built prompt");

        let summary = self.summarizer.summarize(&ctx.credential, &prompt).await?;
        tracing::info!(url = %ctx.url, elapsed = ?start.elapsed(), "Summary ready");

        Ok(SummaryResult {
            summary,
            strategy: ctx.strategy,
            word_count,
        })
    }

    /// Validates the raw inputs and runs the pipeline on success.
    pub async fn summarize_action(
        &self,
        credential: &str,
        url: &str,
    ) -> Result<SummaryResult, AppError> {
        let ctx = RequestContext::new(credential, url)?;
        Ok(self.run(&ctx).await?)
    }

    async fn load(&self, ctx: &RequestContext) -> Result<Vec<ContentDocument>, PipelineError> {
        let documents = match ctx.strategy {
            LoadStrategy::VideoTranscript => self.video.load(&ctx.url).await?,
            LoadStrategy::WebPage => self.web.load(&ctx.url).await?,
        };
        Ok(documents)
    }
}
