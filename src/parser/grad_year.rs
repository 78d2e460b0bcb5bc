use std::sync::LazyLock;

use regex::Regex;

/// Explicit declaration anywhere on the page: "Class of 2026", "c/o 2025",
/// "Grad Year: 2027", "Graduates 2026".
static DECLARED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:class\s+of|c/o|grad(?:uates|uation)?(?:\s+(?:year|yr))?)\W{0,3}(2\d{3})\b")
        .unwrap()
});

/// Season-record row collapsed into one fragment: "2023 Outdoor 11".
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(2\d{3})(?:\s+[A-Za-z]+)?\s+(1[0-2]|[7-9])(?:th)?$").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^2\d{3}$").unwrap());
static GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1[0-2]|[7-9])(?:th)?(?:\s+Grade)?$").unwrap());

/// How far past the "Season Records" heading the fallback scans. The block is
/// a handful of rows; anything farther is unrelated content.
const SEASON_BLOCK_SPAN: usize = 60;

/// Two-tier estimate. An explicit declaration always wins; otherwise project
/// from season-record rows (grade 9-12 ⇒ row year + (12 - grade)), keeping the
/// projection from the most recent season year, last-seen on ties.
pub fn estimate(texts: &[String]) -> Option<i32> {
    if let Some(year) = declared_year(texts) {
        return Some(year);
    }
    projected_year(texts)
}

fn declared_year(texts: &[String]) -> Option<i32> {
    texts
        .iter()
        .find_map(|t| DECLARED_RE.captures(t).and_then(|c| c[1].parse().ok()))
}

fn projected_year(texts: &[String]) -> Option<i32> {
    let start = texts
        .iter()
        .position(|t| t.to_lowercase().contains("season records"))?;
    let block = &texts[start + 1..(start + 1 + SEASON_BLOCK_SPAN).min(texts.len())];

    let mut best: Option<(i32, i32)> = None; // (row year, projection)
    for (year, grade) in season_rows(block) {
        if !(9..=12).contains(&grade) {
            continue;
        }
        let projection = year + (12 - grade);
        match best {
            Some((best_year, _)) if year < best_year => {}
            _ => best = Some((year, projection)),
        }
    }
    best.map(|(_, projection)| projection)
}

/// Rows arrive either as a single fragment ("2023 Outdoor 11") or as adjacent
/// table-cell fragments ("2023", "Outdoor", "11").
fn season_rows(block: &[String]) -> Vec<(i32, i32)> {
    let mut rows = Vec::new();
    let mut i = 0;
    while i < block.len() {
        let token = block[i].trim();
        if let Some(caps) = ROW_RE.captures(token) {
            if let (Ok(year), Ok(grade)) = (caps[1].parse(), caps[2].parse()) {
                rows.push((year, grade));
            }
            i += 1;
            continue;
        }
        if YEAR_RE.is_match(token) {
            let year: i32 = token.parse().unwrap_or(0);
            // Grade in the next cell, or one past a season label.
            for j in 1..=2 {
                let Some(next) = block.get(i + j) else { break };
                if let Some(caps) = GRADE_RE.captures(next.trim()) {
                    if let Ok(grade) = caps[1].parse() {
                        rows.push((year, grade));
                    }
                    break;
                }
                // A non-label cell ends this row.
                if !next.trim().chars().all(|c| c.is_alphabetic() || c == ' ') {
                    break;
                }
            }
        }
        i += 1;
    }
    rows
}
