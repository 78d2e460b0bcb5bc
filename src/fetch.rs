use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::ScrapeError;

/// Page-rendering collaborator seam. Production substitutes a rendering
/// browser that executes scripts and blocks image/media/font resources during
/// navigation; tests feed canned HTML. Either way the pipeline only ever sees
/// the rendered document text.
pub trait PageSource {
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, ScrapeError>> + Send;
}

/// Plain HTTP implementation on reqwest. Good enough for pages that ship
/// their content server-side; the trait exists so a headless renderer can be
/// swapped in without touching the pipeline.
pub struct HttpSource {
    client: reqwest::Client,
}

const USER_AGENT: &str = concat!("athlete_scraper/", env!("CARGO_PKG_VERSION"));

impl HttpSource {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, ScrapeError> {
        debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?
            .error_for_status()
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))
    }
}
