pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod presenter;
pub mod summarizer;
pub mod validate;

use std::sync::Arc;
use config::DefaultPipeline;

/// Application state shared across handlers. Immutable: nothing from one
/// action is visible to the next.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DefaultPipeline>,
}

impl AppState {
    pub fn new(pipeline: DefaultPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
