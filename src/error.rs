use std::time::Duration;

/// Fatal failures surfaced to the caller. Everything else in the pipeline
/// degrades to nulls or documented defaults instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid profile URL: {0}")]
    InvalidInput(String),

    #[error("primary page navigation failed: {0}")]
    Navigation(String),

    #[error("extraction exceeded the {}s ceiling", .0.as_secs())]
    Ceiling(Duration),
}
