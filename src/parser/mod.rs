pub mod breadcrumb;
pub mod events;
pub mod gender;
pub mod grad_year;
pub mod identity;
pub mod records;
pub mod team;

use crate::dom::PageSnapshot;
use crate::model::AthleteRecord;
use events::EventVocabulary;

/// Run every profile-page resolver over one snapshot and assemble the primary
/// record. Pure function of the snapshot and the injected vocabulary.
pub fn extract_profile(snapshot: &PageSnapshot, vocab: &EventVocabulary) -> AthleteRecord {
    let (first_name, last_name) =
        identity::resolve(snapshot.heading.as_deref(), snapshot.title.as_deref());
    let team = team::resolve(&snapshot.team_candidates);
    let prs = records::parse_records(&snapshot.texts, vocab);
    let gender = gender::classify(&prs, snapshot.avatar_signal, &snapshot.scripts, vocab);
    let grad_year = grad_year::estimate(&snapshot.texts);

    AthleteRecord {
        first_name,
        last_name,
        school_name: team.as_ref().map(|t| t.name.clone()),
        team_url: team.as_ref().map(|t| t.url.clone()),
        is_club: team.as_ref().is_some_and(|t| t.is_club),
        prs,
        gender,
        grad_year,
    }
}

// ── Tests ──
