use std::sync::LazyLock;

use regex::Regex;

use super::events::EventVocabulary;
use crate::model::PersonalRecord;

/// Marker tokens that anchor a personal record in the stream.
pub const PR_MARKERS: &[&str] = &["PR", "PB", "SR"];

/// Marks longer than this are layout fragments, not results.
const MAX_MARK_LEN: usize = 15;

static WIND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?\d+\.\d$").unwrap());
static MS_GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:[78]th\s+grade|grade\s+[78]|middle\s+school)\b").unwrap());
static HS_GRADE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:(?:9|10|11|12)th\s+grade|grade\s+(?:9|10|11|12)|varsity|high\s+school|club)\b")
        .unwrap()
});

/// The two pieces of rolling state carried across one left-to-right pass.
/// `event_set_at` remembers which token set the current event, so a marker
/// directly following the event label knows there is no mark behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState {
    pub current_event: Option<usize>,
    pub event_set_at: Option<usize>,
    pub hs_eligible: bool,
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            current_event: None,
            event_set_at: None,
            hs_eligible: true,
        }
    }
}

impl ParseState {
    /// Pure transition: fold one token into the rolling state.
    pub fn advance(self, idx: usize, token: &str, vocab: &EventVocabulary) -> Self {
        let mut next = self;
        if let Some(event_idx) = vocab.match_token(token) {
            next.current_event = Some(event_idx);
            next.event_set_at = Some(idx);
        }
        let lower = token.to_lowercase();
        if MS_GRADE_RE.is_match(token) || lower.ends_with(" ms") {
            next.hs_eligible = false;
        } else if HS_GRADE_RE.is_match(token) || lower.ends_with(" hs") {
            next.hs_eligible = true;
        }
        next
    }
}

/// Single pass over the stream. One record per event at most; the first valid
/// hit wins, which prefers the page's own best-result callout (it precedes the
/// historical per-meet rows in every observed layout).
pub fn parse_records(tokens: &[String], vocab: &EventVocabulary) -> Vec<PersonalRecord> {
    let mut state = ParseState::default();
    let mut out: Vec<PersonalRecord> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        state = state.advance(i, token, vocab);
        if !PR_MARKERS.contains(&token.as_str()) {
            continue;
        }
        let Some(event_idx) = state.current_event else {
            continue;
        };
        if !state.hs_eligible {
            continue;
        }
        let event = &vocab.events[event_idx];
        if out.iter().any(|r| r.event == *event) {
            continue;
        }
        if let Some(record) = locate_record(tokens, i, state.event_set_at, event) {
            out.push(record);
        }
    }

    out
}

/// Resolve mark/date/meet around the marker at `marker_idx`. Invalid candidate
/// marks are dropped silently — no record, no state change.
fn locate_record(
    tokens: &[String],
    marker_idx: usize,
    event_set_at: Option<usize>,
    event: &str,
) -> Option<PersonalRecord> {
    // Marker directly after the event label: the mark sits ahead of the marker,
    // behind an optional wind reading.
    let event_is_behind = marker_idx > 0 && event_set_at == Some(marker_idx - 1);

    if marker_idx == 0 || event_is_behind {
        let mut j = marker_idx + 1;
        if tokens.get(j).is_some_and(|t| is_wind_reading(t)) {
            j += 1;
        }
        let mark = tokens.get(j)?;
        return build_record(event, mark, tokens.get(j + 1), tokens.get(j + 2));
    }

    let prev = &tokens[marker_idx - 1];
    let mark = if is_wind_reading(prev) {
        // Wind sits between mark and marker; mark is two back when it carries
        // a digit, else fall back to the preceding token.
        match tokens.get(marker_idx.wrapping_sub(2)) {
            Some(two_back) if marker_idx >= 2 && contains_digit(two_back) => two_back,
            _ => prev,
        }
    } else {
        prev
    };

    build_record(
        event,
        mark,
        tokens.get(marker_idx + 1),
        tokens.get(marker_idx + 2),
    )
}

fn build_record(
    event: &str,
    mark: &str,
    date: Option<&String>,
    meet: Option<&String>,
) -> Option<PersonalRecord> {
    if !is_valid_mark(mark) {
        return None;
    }
    Some(PersonalRecord {
        event: event.to_string(),
        mark: mark.to_string(),
        date: date.cloned().unwrap_or_else(|| "Unknown Date".to_string()),
        meet: meet.cloned().unwrap_or_else(|| "Unknown Meet".to_string()),
    })
}

/// Signed one-decimal number or the NWI literal, after stripping the
/// parenthesis/"c"/"*" noise the site wraps wind readings in.
fn is_wind_reading(token: &str) -> bool {
    let cleaned: String = token
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | 'c' | '*'))
        .collect();
    let cleaned = cleaned.trim();
    cleaned.eq_ignore_ascii_case("NWI") || WIND_RE.is_match(cleaned)
}

fn contains_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// A mark carries a digit, is not a distance label ("3.1 mi.") and stays under
/// the length bound.
fn is_valid_mark(mark: &str) -> bool {
    contains_digit(mark) && !mark.contains("mi.") && mark.len() < MAX_MARK_LEN
}
