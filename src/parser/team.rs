use crate::model::{AnchorCandidate, TeamCandidate};

const CLUB_KEYWORDS: &[&str] = &["club", "athletics"];
const CLUB_TOKENS: &[&str] = &["aau", "usatf", "tc"];

/// Pick the athlete's current team from the structural anchor candidates.
/// High-school names win over everything; middle-school names are never picked.
pub fn resolve(candidates: &[AnchorCandidate]) -> Option<TeamCandidate> {
    let pick = candidates
        .iter()
        .find(|c| {
            let t = c.text.to_lowercase();
            is_high_school(&t) && !t.contains("middle")
        })
        .or_else(|| {
            candidates.iter().find(|c| {
                let t = c.text.to_lowercase();
                !t.contains("middle") && !t.ends_with(" ms")
            })
        })?;

    Some(TeamCandidate {
        name: pick.text.clone(),
        url: pick.href.clone(),
        is_club: is_club_name(&pick.text),
    })
}

pub fn is_high_school(lower: &str) -> bool {
    lower.contains("high school") || lower.split_whitespace().any(|w| w == "hs")
}

fn is_club_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    CLUB_KEYWORDS.iter().any(|k| lower.contains(k))
        || lower
            .split_whitespace()
            .any(|w| CLUB_TOKENS.contains(&w.trim_matches(|c: char| !c.is_alphanumeric())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(entries: &[(&str, &str)]) -> Vec<AnchorCandidate> {
        entries
            .iter()
            .map(|(text, href)| AnchorCandidate {
                text: text.to_string(),
                href: href.to_string(),
            })
            .collect()
    }

    #[test]
    fn high_school_beats_club() {
        let team = resolve(&anchors(&[
            ("Lincoln Track Club", "/team/9"),
            ("Lincoln HS", "/team/1"),
        ]))
        .unwrap();
        assert_eq!(team.name, "Lincoln HS");
        assert!(!team.is_club);
    }

    #[test]
    fn middle_school_never_selected() {
        assert!(resolve(&anchors(&[
            ("Jefferson Middle School", "/team/2"),
            ("Jefferson MS", "/team/3"),
        ]))
        .is_none());
    }

    #[test]
    fn club_fallback_classified() {
        let team = resolve(&anchors(&[("Valley Track Club", "/team/7")])).unwrap();
        assert_eq!(team.name, "Valley Track Club");
        assert!(team.is_club);
    }

    #[test]
    fn governing_body_token_marks_club() {
        let team = resolve(&anchors(&[("Metro USATF Youth", "/team/8")])).unwrap();
        assert!(team.is_club);
    }

    #[test]
    fn no_candidates_no_team() {
        assert!(resolve(&[]).is_none());
    }
}
