use crate::error::{AppError, PipelineError};
use crate::loader::ContentLoader;
use crate::pipeline::{Pipeline, RequestContext, SummaryResult};
use crate::summarizer::Summarizer;
use crate::validate::{Validation, validate};

pub const LOADING_MESSAGE: &str = "Loading and summarizing content...";

/// What the page shows for the current action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Validating,
    Loading,
    SummaryDisplayed(SummaryResult),
    ErrorDisplayed(String),
}

#[derive(Debug)]
pub enum Event {
    Triggered,
    Validated(Validation),
    Finished(Result<SummaryResult, PipelineError>),
}

impl ViewState {
    pub fn on(self, event: Event) -> ViewState {
        match (self, event) {
            (
                ViewState::Idle | ViewState::SummaryDisplayed(_) | ViewState::ErrorDisplayed(_),
                Event::Triggered,
            ) => ViewState::Validating,
            (ViewState::Validating, Event::Validated(validation)) => match validation {
                Validation::Valid(_) => ViewState::Loading,
                Validation::MissingFields => ViewState::error(&AppError::MissingFields),
                Validation::InvalidUrl => ViewState::error(&AppError::InvalidUrl),
            },
            (ViewState::Loading, Event::Finished(Ok(result))) => {
                ViewState::SummaryDisplayed(result)
            }
            (ViewState::Loading, Event::Finished(Err(err))) => {
                ViewState::error(&AppError::Pipeline(err))
            }
            (state, event) => {
                tracing::warn!(?state, ?event, "Ignoring event in current view state");
                state
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::SummaryDisplayed(_) | ViewState::ErrorDisplayed(_))
    }

    fn error(err: &AppError) -> ViewState {
        ViewState::ErrorDisplayed(err.to_string())
    }
}

/// Runs one user-triggered action through the view states and returns the
/// terminal one.
pub async fn run_action<V, W, S>(
    pipeline: &Pipeline<V, W, S>,
    credential: &str,
    url: &str,
) -> ViewState
where
    V: ContentLoader + Sync,
    W: ContentLoader + Sync,
    S: Summarizer + Sync,
{
    let validation = validate(credential, url);
    let state = ViewState::Idle
        .on(Event::Triggered)
        .on(Event::Validated(validation.clone()));

    let Ok(ctx) = RequestContext::from_validation(credential, validation) else {
        return state;
    };

    let state = state.on(Event::Finished(pipeline.run(&ctx).await));
    debug_assert!(state.is_terminal());
    state
}
