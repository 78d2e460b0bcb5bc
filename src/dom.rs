use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::model::{AnchorCandidate, Gender};

/// Rendering-side adapter output. Everything downstream of this struct is a
/// pure function of plain strings — no DOM, no browser, deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub title: Option<String>,
    pub heading: Option<String>,
    /// The stream: trimmed non-empty text fragments in document order.
    pub texts: Vec<String>,
    /// Every anchor on the page, document order.
    pub anchors: Vec<AnchorCandidate>,
    /// Anchors from the fixed structural team-link locations.
    pub team_candidates: Vec<AnchorCandidate>,
    pub scripts: Vec<String>,
    /// Approximate avatar-color gender signal, when the page carries one.
    pub avatar_signal: Option<Gender>,
}

/// Subtrees that carry PR-shaped decoy text (feed teasers, training logs,
/// blurred paywall blocks, ads). Removed before any text is read.
const NOISE_SELECTORS: &[&str] = &[
    "[class*=\"activity-feed\"]",
    "[class*=\"news-feed\"]",
    "[class*=\"feed-item\"]",
    "[class*=\"training-log\"]",
    "[class*=\"paywall\"]",
    "[class*=\"teaser\"]",
    "[style*=\"blur\"]",
    ".adsbygoogle",
];

/// Structural locations the team resolver draws candidates from.
const TEAM_LINK_SELECTORS: &[&str] = &[
    "h1 a",
    "h2 a",
    "a[href*=\"/team/\"]",
    "a[href*=\"/school/\"]",
];

/// Text under these elements never enters the stream.
const SKIP_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template", "title", "head"];

/// Parse rendered HTML, strip noise, and flatten it into a `PageSnapshot`.
pub fn snapshot(html: &str) -> PageSnapshot {
    let mut doc = Html::parse_document(html);
    strip_noise(&mut doc);

    PageSnapshot {
        title: element_text(&doc, "title"),
        heading: element_text(&doc, "h1"),
        texts: linearize(&doc),
        anchors: collect_anchors(&doc, &["a"]),
        team_candidates: collect_anchors(&doc, TEAM_LINK_SELECTORS),
        scripts: collect_scripts(&doc),
        avatar_signal: avatar_signal(&doc),
    }
}

/// Detach every subtree matching the noise denylist. Idempotent.
fn strip_noise(doc: &mut Html) {
    let mut doomed = Vec::new();
    for pattern in NOISE_SELECTORS {
        let selector = Selector::parse(pattern).expect("invalid noise selector");
        for el in doc.select(&selector) {
            doomed.push(el.id());
        }
    }
    if !doomed.is_empty() {
        debug!("noise filter detaching {} subtrees", doomed.len());
    }
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Pre-order walk of the filtered tree: trimmed, non-empty text fragments in
/// document order. This index order is the coordinate system every positional
/// heuristic depends on.
fn linearize(doc: &Html) -> Vec<String> {
    let mut out = Vec::new();
    for node in doc.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let parent_name = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| e.name().to_string()));
        if parent_name.is_some_and(|n| SKIP_TEXT_PARENTS.contains(&n.as_str())) {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
    }
    out
}

fn element_text(doc: &Html, pattern: &str) -> Option<String> {
    let selector = Selector::parse(pattern).expect("invalid selector");
    doc.select(&selector).next().map(|el| normalize_ws(&el.text().collect::<String>()))
}

fn collect_anchors(doc: &Html, patterns: &[&str]) -> Vec<AnchorCandidate> {
    let mut out: Vec<AnchorCandidate> = Vec::new();
    for pattern in patterns {
        let selector = Selector::parse(pattern).expect("invalid anchor selector");
        for el in doc.select(&selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            let text = normalize_ws(&el.text().collect::<String>());
            if text.is_empty() || out.iter().any(|a| a.href == href && a.text == text) {
                continue;
            }
            out.push(AnchorCandidate {
                text,
                href: href.to_string(),
            });
        }
    }
    out
}

fn collect_scripts(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("script").expect("invalid selector");
    doc.select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Default-avatar color heuristic: within the container enclosing the identity
/// heading (three ancestor levels up, else the whole document), the first
/// red-dominant inline background reads as the female default avatar, the
/// first blue-dominant as male. Raw style text color hints are the failsafe.
/// A real deployment swaps in a resolved-style provider; inline styles are all
/// a static snapshot can see.
fn avatar_signal(doc: &Html) -> Option<Gender> {
    let h1 = Selector::parse("h1").expect("invalid selector");
    let container: Vec<ElementRef> = match doc.select(&h1).next() {
        Some(heading) => {
            let root = heading
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take(3)
                .last()
                .unwrap_or(doc.root_element());
            root.descendants().filter_map(ElementRef::wrap).collect()
        }
        None => doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect(),
    };

    for el in container {
        let Some(style) = el.value().attr("style") else {
            continue;
        };
        if let Some(signal) = classify_style(style) {
            return Some(signal);
        }
    }
    None
}

const FEMALE_STYLE_HINTS: &[&str] = &["pink", "#e91e63", "#ff69b4"];
const MALE_STYLE_HINTS: &[&str] = &["dodgerblue", "#2196f3", "#4169e1"];

fn classify_style(style: &str) -> Option<Gender> {
    let lower = style.to_lowercase();
    let background = lower
        .split(';')
        .find_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            (prop == "background" || prop == "background-color").then(|| value.trim().to_string())
        });

    if let Some(value) = background {
        if let Some((r, g, b)) = parse_css_color(&value) {
            if let Some(signal) = dominant_channel(r, g, b) {
                return Some(signal);
            }
        }
    }

    // Failsafe: raw style text hints.
    if FEMALE_STYLE_HINTS.iter().any(|h| lower.contains(h)) {
        return Some(Gender::Female);
    }
    if MALE_STYLE_HINTS.iter().any(|h| lower.contains(h)) {
        return Some(Gender::Male);
    }
    None
}

fn dominant_channel(r: u8, g: u8, b: u8) -> Option<Gender> {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    if r > 150 && r > g + 40 && r > b + 40 {
        Some(Gender::Female)
    } else if b > 150 && b > r + 40 && b > g + 40 {
        Some(Gender::Male)
    } else {
        None
    }
}

/// `rgb(...)`/`rgba(...)`, `#rrggbb` and `#rgb` forms.
fn parse_css_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        let args = args.strip_suffix(')')?;
        let mut channels = args.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        return Some((r, g, b));
    }
    let hex = value.strip_prefix('#')?;
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .ok()
                    .map(|v| v * 17)
            };
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
