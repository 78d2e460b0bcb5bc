/// Athlete name from the page heading, falling back to the title. The title
/// carries a " - <site>" suffix; only the portion before it is the name.
pub fn resolve(heading: Option<&str>, title: Option<&str>) -> (String, String) {
    let full = heading
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .or_else(|| {
            title.map(|t| t.split(" - ").next().unwrap_or(t).trim().to_string())
        })
        .unwrap_or_default();

    match full.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None if full.is_empty() => ("Unknown".to_string(), String::new()),
        None => (full, String::new()),
    }
}
