use std::sync::LazyLock;

use regex::Regex;

use super::events::EventVocabulary;
use crate::model::{Gender, PersonalRecord};

/// Embedded-data gender literal, e.g. `"gender":"F"` inside a script blob.
static SCRIPT_FEMALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?gender["']?\s*[:=]\s*["']?(?:f|female)\b"#).unwrap()
});

/// Three-stage cascade, first decisive stage wins. Event evidence is the most
/// semantically reliable signal and always takes precedence; the visual avatar
/// signal is approximate and injected by the rendering adapter; the embedded
/// script sniff only ever flips to female. Default: male.
pub fn classify(
    records: &[PersonalRecord],
    visual: Option<Gender>,
    scripts: &[String],
    vocab: &EventVocabulary,
) -> Gender {
    if records.iter().any(|r| vocab.female_only.contains(&r.event)) {
        return Gender::Female;
    }
    if records.iter().any(|r| vocab.male_only.contains(&r.event)) {
        return Gender::Male;
    }
    if let Some(signal) = visual {
        return signal;
    }
    if scripts.iter().any(|s| SCRIPT_FEMALE_RE.is_match(s)) {
        return Gender::Female;
    }
    Gender::Male
}
