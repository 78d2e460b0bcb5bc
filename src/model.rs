use serde::{Deserialize, Serialize};

/// One link candidate pulled from the page, document order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCandidate {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn letter(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// A verified personal record. `mark` is passed through verbatim — the
/// downstream ranking layer parses "4:05.22" and 6'2" style notations itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub event: String,
    pub mark: String,
    pub date: String,
    pub meet: String,
}

/// Team selected from the profile page's anchor candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCandidate {
    pub name: String,
    pub url: String,
    pub is_club: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteRecord {
    pub first_name: String,
    pub last_name: String,
    pub school_name: Option<String>,
    pub prs: Vec<PersonalRecord>,
    pub gender: Gender,
    pub team_url: Option<String>,
    pub grad_year: Option<i32>,
    pub is_club: bool,
}

/// Second-stage output from the team page breadcrumb. Every field is optional;
/// a missing anchor is a null, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetadata {
    pub state: Option<String>,
    pub school_size: Option<String>,
    pub conference: Option<String>,
}

/// The only object handed to external collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct FinalRecord {
    #[serde(flatten)]
    pub athlete: AthleteRecord,
    #[serde(flatten)]
    pub team: TeamMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_record_flattens_camel_case() {
        let record = FinalRecord {
            athlete: AthleteRecord {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                school_name: Some("Lincoln HS".into()),
                prs: vec![],
                gender: Gender::Female,
                team_url: None,
                grad_year: Some(2026),
                is_club: false,
            },
            team: TeamMetadata {
                state: Some("NY".into()),
                school_size: None,
                conference: None,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["gradYear"], 2026);
        assert_eq!(json["gender"], "female");
        assert_eq!(json["state"], "NY");
        assert!(json["schoolSize"].is_null());
    }
}
