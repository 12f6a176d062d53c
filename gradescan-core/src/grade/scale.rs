use serde::{Deserialize, Serialize};

use crate::{
    consts::MAX_SCALE_LABELS,
    error::{GradescanError, InvalidScaleSnafu},
};
use snafu::ensure;

/// The ordered score labels a teacher configures per assignment.
///
/// Between one and five labels; ordinal position matches the printed
/// column order on the sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradingScale(Vec<String>);

impl GradingScale {
    pub fn new(labels: Vec<String>) -> Result<Self, GradescanError> {
        ensure!(
            !labels.is_empty() && labels.len() <= MAX_SCALE_LABELS,
            InvalidScaleSnafu {
                count: labels.len(),
                max: MAX_SCALE_LABELS,
            }
        );
        Ok(Self(labels))
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One of the fixed status options markable independently of the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusOption {
    Missing,
    Absent,
    Exempt,
}

impl StatusOption {
    /// Printed column order on the sheet.
    pub const ALL: [StatusOption; 3] = [
        StatusOption::Missing,
        StatusOption::Absent,
        StatusOption::Exempt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusOption::Missing => "Missing",
            StatusOption::Absent => "Absent",
            StatusOption::Exempt => "Exempt",
        }
    }

    /// Single-letter column header used on the printed sheet.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StatusOption::Missing => "M",
            StatusOption::Absent => "A",
            StatusOption::Exempt => "E",
        }
    }

    /// Whether free-form status text refers to this option: the full
    /// keyword as a case-insensitive substring, or exactly the
    /// single-letter abbreviation after trimming.
    ///
    /// The abbreviation must match exactly, not as a substring:
    /// "Exempt" contains both an M and an E, and substring matching
    /// would smear one written status into three.
    pub fn matches(&self, text: &str) -> bool {
        let trimmed = text.trim();
        trimmed.to_uppercase().contains(&self.label().to_uppercase())
            || trimmed.eq_ignore_ascii_case(self.abbreviation())
    }
}

/// Parses free-form status text into the set of matching status labels.
/// Multiple simultaneous statuses are permitted; all matches are kept.
pub fn parse_status_text(text: &str) -> Vec<String> {
    StatusOption::ALL
        .iter()
        .filter(|option| option.matches(text))
        .map(|option| option.label().to_string())
        .collect()
}
