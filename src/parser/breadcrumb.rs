use std::sync::LazyLock;

use regex::Regex;

use super::team::is_high_school;
use crate::model::{AnchorCandidate, TeamMetadata};

/// Division/size notation: "3A", "4a", "Class B", "Division II", "Region 5".
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+[A-Za-z]{1,2}|(?:class|division|group|region|section)\s+\S+)$").unwrap()
});

const COUNTRY_MARKERS: &[&str] = &["united states", "us"];
const LEVEL_TYPES: &[&str] = &["high school", "middle school", "college", "club", "clubs"];

/// Fallback league label for club teams whose breadcrumb carries no league.
const DEFAULT_CLUB_LEAGUE: &str = "USATF";

/// Walk the team page's breadcrumb: country → (level) → state → size/conference.
/// Any missing anchor leaves its field null.
pub fn resolve(anchors: &[AnchorCandidate], is_club: bool) -> TeamMetadata {
    let Some(country) = anchors
        .iter()
        .position(|a| COUNTRY_MARKERS.contains(&a.text.trim().to_lowercase().as_str()))
    else {
        return TeamMetadata::default();
    };

    let trail: Vec<&str> = anchors[country + 1..]
        .iter()
        .map(|a| a.text.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let mut idx = 0;
    if trail
        .first()
        .is_some_and(|t| LEVEL_TYPES.contains(&t.to_lowercase().as_str()))
    {
        idx = 1;
    }

    let state = trail.get(idx).map(|t| t.to_string());
    idx += 1;

    if is_club {
        let conference = trail[idx.min(trail.len())..]
            .iter()
            .find(|t| !is_high_school(&t.to_lowercase()))
            .map(|t| t.to_string())
            .or_else(|| Some(DEFAULT_CLUB_LEAGUE.to_string()));
        return TeamMetadata {
            state,
            school_size: Some("Club".to_string()),
            conference,
        };
    }

    let mut school_size = None;
    let mut conference = None;
    for t in trail[idx.min(trail.len())..].iter().take(2) {
        if school_size.is_none() && SIZE_RE.is_match(t) {
            school_size = Some(t.to_string());
        } else if conference.is_none() && !is_high_school(&t.to_lowercase()) {
            conference = Some(t.to_string());
        }
    }

    TeamMetadata {
        state,
        school_size,
        conference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(texts: &[&str]) -> Vec<AnchorCandidate> {
        texts
            .iter()
            .map(|t| AnchorCandidate {
                text: t.to_string(),
                href: format!("/{}", t.to_lowercase().replace(' ', "-")),
            })
            .collect()
    }

    #[test]
    fn full_trail_with_level_anchor() {
        let meta = resolve(
            &anchors(&["Home", "United States", "High School", "NY", "3A", "Liberty League"]),
            false,
        );
        assert_eq!(meta.state.as_deref(), Some("NY"));
        assert_eq!(meta.school_size.as_deref(), Some("3A"));
        assert_eq!(meta.conference.as_deref(), Some("Liberty League"));
    }

    #[test]
    fn level_anchor_absent() {
        let meta = resolve(&anchors(&["US", "Texas", "Class 6A", "District 12"]), false);
        assert_eq!(meta.state.as_deref(), Some("Texas"));
        assert_eq!(meta.school_size.as_deref(), Some("Class 6A"));
        assert_eq!(meta.conference.as_deref(), Some("District 12"));
    }

    #[test]
    fn high_school_token_not_a_conference() {
        let meta = resolve(&anchors(&["United States", "NY", "Mercy HS"]), false);
        assert_eq!(meta.state.as_deref(), Some("NY"));
        assert_eq!(meta.school_size, None);
        assert_eq!(meta.conference, None);
    }

    #[test]
    fn truncated_trail_yields_nulls() {
        let meta = resolve(&anchors(&["United States", "High School"]), false);
        assert_eq!(meta.state, None);
        assert_eq!(meta.school_size, None);
        assert_eq!(meta.conference, None);
    }

    #[test]
    fn no_country_marker_yields_default() {
        let meta = resolve(&anchors(&["Home", "Teams", "NY"]), false);
        assert_eq!(meta, TeamMetadata::default());
    }

    #[test]
    fn club_forces_size_and_defaults_league() {
        let meta = resolve(&anchors(&["United States", "Clubs", "Oregon"]), true);
        assert_eq!(meta.state.as_deref(), Some("Oregon"));
        assert_eq!(meta.school_size.as_deref(), Some("Club"));
        assert_eq!(meta.conference.as_deref(), Some("USATF"));
    }

    #[test]
    fn club_takes_league_from_trail() {
        let meta = resolve(
            &anchors(&["United States", "Clubs", "Oregon", "AAU Region 14"]),
            true,
        );
        assert_eq!(meta.conference.as_deref(), Some("AAU Region 14"));
    }
}
