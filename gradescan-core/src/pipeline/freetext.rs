use tracing::debug;

use crate::{
    grade::{record::ProcessedGrade, roster::Student, scale::parse_status_text},
    ocr::freetext::clean_response,
};

/// Parses a free-text provider response into one grade per roster
/// student, bypassing clustering and column inference entirely.
///
/// The response is expected to be a delimited table of row label, score,
/// and status, optionally fenced and/or preceded by a header line. Lines
/// pair with students positionally, capped at roster length. A malformed
/// line (fewer than two fields) contributes nothing to its positional
/// student, and the roster-driven completion step still emits an empty
/// entry for them, so the output length always equals the roster length.
pub fn parse_free_text(response: &str, roster: &[Student]) -> Vec<ProcessedGrade> {
    let cleaned = clean_response(response);

    let lines: Vec<&str> = cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let data_start = match lines.first() {
        Some(first) if first.to_lowercase().contains("row") => 1,
        _ => 0,
    };

    let mut slots: Vec<Option<ProcessedGrade>> = vec![None; roster.len()];

    for (index, line) in lines[data_start.min(lines.len())..]
        .iter()
        .take(roster.len())
        .enumerate()
    {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            debug!("skipping malformed line {}: `{}`", index, line);
            continue;
        }

        let mut grade = ProcessedGrade::empty_for(&roster[index]);
        grade.score = fields[1].to_string();
        grade.status = parse_status_text(fields.get(2).copied().unwrap_or(""));
        slots[index] = Some(grade);
    }

    roster
        .iter()
        .zip(slots)
        .map(|(student, slot)| slot.unwrap_or_else(|| ProcessedGrade::empty_for(student)))
        .collect()
}
