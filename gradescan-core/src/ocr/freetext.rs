use std::sync::OnceLock;

use regex::Regex;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?i)```[a-z]*\n?").unwrap())
}

/// Cleans a free-text provider response down to its delimited table.
///
/// Models often wrap the table in fenced-code markers or preface it with
/// prose despite being told not to. The fences are stripped, then every
/// line before the header (the first line containing "row"
/// case-insensitively and a comma) is dropped. A response with no
/// recognizable header is returned whole; the parser's per-line rules
/// take it from there.
pub fn clean_response(raw: &str) -> String {
    let unfenced = fence_pattern().replace_all(raw, "");

    let lines: Vec<&str> = unfenced.lines().collect();
    let header_index = lines
        .iter()
        .position(|line| line.to_lowercase().contains("row") && line.contains(','))
        .unwrap_or(0);

    lines[header_index..].join("\n").trim().to_string()
}
