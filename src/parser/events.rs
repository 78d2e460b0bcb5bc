/// Canonical event vocabulary. Injected into every parse so tests can swap in
/// synthetic vocabularies; the default mirrors the source site's event names.
#[derive(Debug, Clone)]
pub struct EventVocabulary {
    pub events: Vec<String>,
    pub female_only: Vec<String>,
    pub male_only: Vec<String>,
}

/// Tokens longer than this never match an event entry. Guards against prefix
/// hits inside full sentences ("100 Meters is her best event...").
const MAX_EVENT_TOKEN_LEN: usize = 28;

const DEFAULT_EVENTS: &[&str] = &[
    "55 Meters",
    "60 Meters",
    "100 Meters",
    "200 Meters",
    "300 Meters",
    "400 Meters",
    "500 Meters",
    "600 Meters",
    "800 Meters",
    "1000 Meters",
    "1500 Meters",
    "1600 Meters",
    "Mile",
    "3000 Meters",
    "3200 Meters",
    "2 Mile",
    "5000 Meters",
    "55m Hurdles",
    "60m Hurdles",
    "100m Hurdles",
    "110m Hurdles",
    "300m Hurdles",
    "400m Hurdles",
    "2000m Steeplechase",
    "High Jump",
    "Long Jump",
    "Triple Jump",
    "Pole Vault",
    "Shot Put",
    "Discus",
    "Javelin",
    "Hammer",
    "Decathlon",
    "Heptathlon",
    "Pentathlon",
    "4x100 Relay",
    "4x400 Relay",
    "4x800 Relay",
];

const FEMALE_ONLY: &[&str] = &["100m Hurdles", "Heptathlon"];
const MALE_ONLY: &[&str] = &["110m Hurdles", "Decathlon"];

impl Default for EventVocabulary {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS.iter().map(|s| s.to_string()).collect(),
            female_only: FEMALE_ONLY.iter().map(|s| s.to_string()).collect(),
            male_only: MALE_ONLY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EventVocabulary {
    /// Match a stream token against the vocabulary: exact, prefix, or
    /// meter(s)-normalized case-insensitive equality. Returns the entry index.
    pub fn match_token(&self, token: &str) -> Option<usize> {
        if token.len() >= MAX_EVENT_TOKEN_LEN {
            return None;
        }
        for (idx, event) in self.events.iter().enumerate() {
            if token == event || token.starts_with(event.as_str()) {
                return Some(idx);
            }
            if normalize(token) == normalize(event) {
                return Some(idx);
            }
        }
        None
    }
}

/// Fold singular/plural "meter(s)" and case so "1600 Meter" ≡ "1600 meters".
fn normalize(s: &str) -> String {
    s.to_lowercase().replace("meters", "meter")
}
