use std::time::Duration;

use reqwest::Url;
use tracing::{info, warn};

use crate::dom;
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use crate::model::{FinalRecord, TeamMetadata};
use crate::parser;
use crate::parser::events::EventVocabulary;
use crate::parser::records::PR_MARKERS;

/// The fixed results-hosting domain profile URLs must belong to.
pub const RESULTS_HOST: &str = "athletic.net";

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Per-page navigation timeout. Primary-page failure is fatal.
    pub nav_timeout: Duration,
    /// Ceiling over the whole operation; exceeding it cancels everything.
    pub ceiling: Duration,
    /// Skip the secondary team-page stage entirely.
    pub fetch_team_page: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(20),
            ceiling: Duration::from_secs(60),
            fetch_team_page: true,
        }
    }
}

/// Full extraction: validate → fetch → parse profile → conditionally fetch the
/// team page → merge. All-or-nothing at this boundary; sub-stages past the
/// primary fetch degrade to nulls instead of failing.
pub async fn extract<S: PageSource>(
    source: &S,
    url: &str,
    vocab: &EventVocabulary,
    opts: &ExtractOptions,
) -> Result<FinalRecord, ScrapeError> {
    let url = validate_url(url)?;
    match tokio::time::timeout(opts.ceiling, run(source, &url, vocab, opts)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Ceiling(opts.ceiling)),
    }
}

async fn run<S: PageSource>(
    source: &S,
    url: &Url,
    vocab: &EventVocabulary,
    opts: &ExtractOptions,
) -> Result<FinalRecord, ScrapeError> {
    let html = source.fetch(url.as_str(), opts.nav_timeout).await?;
    let snapshot = dom::snapshot(&html);

    if !snapshot
        .texts
        .iter()
        .any(|t| PR_MARKERS.contains(&t.as_str()))
    {
        // Degraded, not fatal: parse whatever content loaded.
        warn!("no PR markers found on {url}; proceeding with partial content");
    }

    let athlete = parser::extract_profile(&snapshot, vocab);
    info!(
        "extracted {} {} ({} PRs)",
        athlete.first_name,
        athlete.last_name,
        athlete.prs.len()
    );

    let team = match &athlete.team_url {
        Some(href) if opts.fetch_team_page => {
            let team_url = url
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.clone());
            fetch_team_metadata(source, &team_url, athlete.is_club, opts).await
        }
        _ => TeamMetadata::default(),
    };

    Ok(FinalRecord { athlete, team })
}

/// Secondary stage. Any failure here downgrades the metadata fields to null
/// and never aborts the primary record.
async fn fetch_team_metadata<S: PageSource>(
    source: &S,
    team_url: &str,
    is_club: bool,
    opts: &ExtractOptions,
) -> TeamMetadata {
    match source.fetch(team_url, opts.nav_timeout).await {
        Ok(html) => {
            let snapshot = dom::snapshot(&html);
            parser::breadcrumb::resolve(&snapshot.anchors, is_club)
        }
        Err(e) => {
            warn!("team page fetch failed ({e}); leaving team metadata empty");
            TeamMetadata::default()
        }
    }
}

/// Reject anything that is not a URL on the fixed results-hosting domain,
/// before any navigation happens.
fn validate_url(url: &str) -> Result<Url, ScrapeError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::InvalidInput("no URL provided".to_string()));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|e| ScrapeError::InvalidInput(format!("{trimmed}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ScrapeError::InvalidInput(format!("{trimmed}: missing host")))?;
    if host != RESULTS_HOST && !host.ends_with(&format!(".{RESULTS_HOST}")) {
        return Err(ScrapeError::InvalidInput(format!(
            "{trimmed}: not a {RESULTS_HOST} URL"
        )));
    }
    Ok(parsed)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned page source: URL path → HTML body.
    struct StaticSource {
        pages: HashMap<String, String>,
        fail_team_page: bool,
    }

    impl StaticSource {
        fn from_fixtures() -> Self {
            let mut pages = HashMap::new();
            pages.insert(
                "/athlete/123".to_string(),
                std::fs::read_to_string("tests/fixtures/profile.html").unwrap(),
            );
            pages.insert(
                "/team/123".to_string(),
                std::fs::read_to_string("tests/fixtures/team.html").unwrap(),
            );
            Self {
                pages,
                fail_team_page: false,
            }
        }
    }

    impl PageSource for StaticSource {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, ScrapeError> {
            let path = Url::parse(url).unwrap().path().to_string();
            if self.fail_team_page && path.starts_with("/team/") {
                return Err(ScrapeError::Navigation("boom".to_string()));
            }
            self.pages
                .get(&path)
                .cloned()
                .ok_or_else(|| ScrapeError::Navigation(format!("404 {path}")))
        }
    }

    #[tokio::test]
    async fn end_to_end_over_fixtures() {
        let source = StaticSource::from_fixtures();
        let record = extract(
            &source,
            "https://www.athletic.net/athlete/123",
            &EventVocabulary::default(),
            &ExtractOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(record.athlete.first_name, "Jane");
        assert_eq!(record.athlete.prs.len(), 2);
        assert_eq!(record.team.state.as_deref(), Some("NY"));
        assert_eq!(record.team.school_size.as_deref(), Some("3A"));
        assert_eq!(record.team.conference.as_deref(), Some("Liberty League"));
    }

    #[tokio::test]
    async fn team_page_failure_degrades_to_nulls() {
        let mut source = StaticSource::from_fixtures();
        source.fail_team_page = true;
        let record = extract(
            &source,
            "https://www.athletic.net/athlete/123",
            &EventVocabulary::default(),
            &ExtractOptions::default(),
        )
        .await
        .unwrap();

        // Primary record intact, metadata degraded.
        assert_eq!(record.athlete.first_name, "Jane");
        assert_eq!(record.team, TeamMetadata::default());
    }

    #[tokio::test]
    async fn team_stage_can_be_skipped() {
        let source = StaticSource::from_fixtures();
        let opts = ExtractOptions {
            fetch_team_page: false,
            ..Default::default()
        };
        let record = extract(
            &source,
            "https://www.athletic.net/athlete/123",
            &EventVocabulary::default(),
            &opts,
        )
        .await
        .unwrap();
        assert_eq!(record.team, TeamMetadata::default());
    }

    #[tokio::test]
    async fn primary_navigation_failure_is_fatal() {
        let source = StaticSource::from_fixtures();
        let err = extract(
            &source,
            "https://www.athletic.net/athlete/999",
            &EventVocabulary::default(),
            &ExtractOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation(_)));
    }

    #[tokio::test]
    async fn wrong_domain_rejected_before_navigation() {
        let source = StaticSource {
            pages: HashMap::new(),
            fail_team_page: false,
        };
        let err = extract(
            &source,
            "https://example.com/athlete/123",
            &EventVocabulary::default(),
            &ExtractOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidInput(_)));
    }

    #[test]
    fn url_validation() {
        assert!(validate_url("https://www.athletic.net/athlete/1").is_ok());
        assert!(validate_url("https://athletic.net/athlete/1").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("https://evil-athletic.net.example.com/x").is_err());
    }
}
