use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::grade::roster::Student;

/// Where a grade entry's score/status fields came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum Provenance {
    /// Derived from OCR by the pipeline.
    Ocr,
    /// Replaced by a human reviewer after the fact.
    #[serde(rename_all = "camelCase")]
    Manual {
        edited_by: String,
        edited_at: String,
    },
}

/// The normalized output unit, one per roster student.
///
/// Identity fields are always stamped from the authoritative roster
/// record, never from OCR text. An empty `score` means no scale entry was
/// detected as marked; `status` may hold several labels at once, since a
/// double mark is surfaced to the reviewer, not silently resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedGrade {
    pub student_id: String,
    pub student_name: String,
    pub score: String,
    pub status: Vec<String>,
    pub provenance: Provenance,
}

impl ProcessedGrade {
    /// The entry emitted when no row could be paired with a student:
    /// identity from the roster, everything else empty for review.
    pub fn empty_for(student: &Student) -> Self {
        Self {
            student_id: student.student_id.clone(),
            student_name: student.full_name(),
            score: String::new(),
            status: Vec::new(),
            provenance: Provenance::Ocr,
        }
    }
}

/// One reviewer override for a single student's entry. `None` fields
/// keep the existing value.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCorrection {
    pub student_id: String,
    pub score: Option<String>,
    pub status: Option<Vec<String>>,
}

/// Applies reviewer corrections, returning a superseding grade list.
///
/// Entries addressed by a correction get their score/status replaced and
/// their provenance stamped `Manual`; untouched entries are carried over
/// unchanged, still marked `Ocr`. The OCR-derived list itself is never
/// mutated; reprocessing or correction always produces a replacement.
/// Corrections naming an unknown student are dropped.
pub fn apply_corrections(
    grades: &[ProcessedGrade],
    corrections: &[GradeCorrection],
    edited_by: &str,
    edited_at: &str,
) -> Vec<ProcessedGrade> {
    for correction in corrections {
        if !grades
            .iter()
            .any(|grade| grade.student_id == correction.student_id)
        {
            warn!(
                "dropping correction for unknown student `{}`",
                correction.student_id
            );
        }
    }

    grades
        .iter()
        .map(|grade| {
            match corrections
                .iter()
                .find(|correction| correction.student_id == grade.student_id)
            {
                Some(correction) => ProcessedGrade {
                    student_id: grade.student_id.clone(),
                    student_name: grade.student_name.clone(),
                    score: correction.score.clone().unwrap_or_else(|| grade.score.clone()),
                    status: correction
                        .status
                        .clone()
                        .unwrap_or_else(|| grade.status.clone()),
                    provenance: Provenance::Manual {
                        edited_by: edited_by.to_string(),
                        edited_at: edited_at.to_string(),
                    },
                },
                None => grade.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ocr_grade(id: &str, name: &str, score: &str, status: &[&str]) -> ProcessedGrade {
        ProcessedGrade {
            student_id: id.to_string(),
            student_name: name.to_string(),
            score: score.to_string(),
            status: status.iter().map(|s| s.to_string()).collect(),
            provenance: Provenance::Ocr,
        }
    }

    #[test]
    fn test_correction_replaces_only_addressed_entry() {
        let grades = vec![
            ocr_grade("001", "Ann Lee", "10", &[]),
            ocr_grade("002", "Bo Kim", "", &["Absent"]),
        ];
        let corrections = vec![GradeCorrection {
            student_id: "001".to_string(),
            score: Some("8.5".to_string()),
            status: None,
        }];

        let corrected = apply_corrections(&grades, &corrections, "teacher", "2025-11-04T10:00:00Z");

        assert_eq!(corrected[0].score, "8.5");
        assert_eq!(
            corrected[0].provenance,
            Provenance::Manual {
                edited_by: "teacher".to_string(),
                edited_at: "2025-11-04T10:00:00Z".to_string(),
            }
        );
        // Untouched entry carried over byte-identical, still OCR
        assert_eq!(corrected[1], grades[1]);
    }

    #[test]
    fn test_partial_correction_keeps_other_field() {
        let grades = vec![ocr_grade("001", "Ann Lee", "10", &["Missing"])];
        let corrections = vec![GradeCorrection {
            student_id: "001".to_string(),
            score: None,
            status: Some(vec![]),
        }];

        let corrected = apply_corrections(&grades, &corrections, "teacher", "2025-11-04T10:00:00Z");
        assert_eq!(corrected[0].score, "10");
        assert!(corrected[0].status.is_empty());
    }

    #[test]
    fn test_unknown_student_correction_is_dropped() {
        let grades = vec![ocr_grade("001", "Ann Lee", "10", &[])];
        let corrections = vec![GradeCorrection {
            student_id: "999".to_string(),
            score: Some("5".to_string()),
            status: None,
        }];

        let corrected = apply_corrections(&grades, &corrections, "teacher", "2025-11-04T10:00:00Z");
        assert_eq!(corrected, grades);
    }

    #[test]
    fn test_original_list_is_not_mutated() {
        let grades = vec![ocr_grade("001", "Ann Lee", "10", &[])];
        let corrections = vec![GradeCorrection {
            student_id: "001".to_string(),
            score: Some("5".to_string()),
            status: None,
        }];

        let _ = apply_corrections(&grades, &corrections, "teacher", "2025-11-04T10:00:00Z");
        assert_eq!(grades[0].score, "10");
        assert_eq!(grades[0].provenance, Provenance::Ocr);
    }
}
