use derive_builder::Builder;

use crate::consts::*;

/// Tuning knobs for one grade-sheet processing run.
///
/// The defaults were tuned against letter-size sheets scanned at standard
/// resolution; a different scan DPI scales every pixel tolerance, so the
/// knobs are injected here rather than read from constants at the point
/// of use.
#[derive(Clone, Debug, Builder)]
pub struct PipelineConfig {
    /// Vertical tolerance for absorbing a fragment into the current row.
    #[builder(default = "ROW_Y_TOLERANCE")]
    pub y_tolerance: f32,
    /// Horizontal tolerance for grouping X observations into one column.
    #[builder(default = "COLUMN_GROUP_TOLERANCE")]
    pub column_tolerance: f32,
    /// Horizontal tolerance for attributing a fragment to a column
    /// during mark detection.
    #[builder(default = "MARK_X_TOLERANCE")]
    pub mark_tolerance: f32,
    /// Minimum observations a group needs to survive column inference.
    #[builder(default = "MIN_COLUMN_OBSERVATIONS")]
    pub min_column_observations: usize,
    /// Number of leading rows sampled for column inference.
    #[builder(default = "COLUMN_SAMPLE_ROWS")]
    pub column_sample_rows: usize,
    /// Confidence below which a short fragment reads as a filled mark.
    #[builder(default = "LOW_CONFIDENCE_THRESHOLD")]
    pub low_confidence_threshold: f32,
    /// Maximum character count for the low-confidence mark signal.
    #[builder(default = "MAX_MARK_TEXT_LEN")]
    pub max_mark_text_len: usize,
    /// Template columns left of the first grading-scale column (row
    /// number and student name).
    #[builder(default = "LEADING_COLUMNS")]
    pub leading_columns: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            y_tolerance: ROW_Y_TOLERANCE,
            column_tolerance: COLUMN_GROUP_TOLERANCE,
            mark_tolerance: MARK_X_TOLERANCE,
            min_column_observations: MIN_COLUMN_OBSERVATIONS,
            column_sample_rows: COLUMN_SAMPLE_ROWS,
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            max_mark_text_len: MAX_MARK_TEXT_LEN,
            leading_columns: LEADING_COLUMNS,
        }
    }
}
