/// Vertical tolerance, in image pixels, for absorbing a text object into
/// the current row during clustering.
///
/// Two text objects whose vertical centers differ by at most this value
/// are considered part of the same printed row. The value 15 px was tuned
/// against letter-size sheets scanned at standard resolution; sheets
/// scanned at a different DPI should override it through `PipelineConfig`
/// rather than rely on this default.
pub const ROW_Y_TOLERANCE: f32 = 15.0;

/// Horizontal tolerance, in image pixels, for grouping X observations
/// into one inferred column.
///
/// Column inference pools the rounded X centers of every text object in
/// the sample rows and greedily merges values within this distance of a
/// group's running mean. Wider values merge adjacent template columns;
/// narrower values split one column into several when the scan is skewed.
pub const COLUMN_GROUP_TOLERANCE: f32 = 20.0;

/// Horizontal tolerance, in image pixels, for attributing a text object
/// to a column during mark detection.
///
/// Slightly wider than [`COLUMN_GROUP_TOLERANCE`] because a handwritten
/// mark rarely lands dead-center on the printed bubble.
pub const MARK_X_TOLERANCE: f32 = 25.0;

/// Minimum number of independent X observations a group needs to survive
/// column inference.
///
/// Single-observation groups are treated as noise (a stray mark or OCR
/// artifact), not a real shared column. This trades recall of rare marks
/// for precision: a spurious column would shift every ordinal mapping to
/// its right.
pub const MIN_COLUMN_OBSERVATIONS: usize = 2;

/// Number of leading rows sampled for column inference.
///
/// Column positions are a property of the printed template, not of
/// individual responses, so a handful of rows is enough to recover them
/// and bounds the cost on long rosters.
pub const COLUMN_SAMPLE_ROWS: usize = 5;

/// Recognition-confidence threshold below which a short text object is
/// treated as evidence of a filled mark.
///
/// A solid filled bubble usually OCRs as one or two characters of
/// low-confidence garbage rather than a clean glyph, so low confidence is
/// itself a positive signal here, not a reason to discard the
/// observation.
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Maximum text length (in characters) for the low-confidence mark
/// signal. Longer low-confidence fragments are more likely smeared words
/// than filled bubbles.
pub const MAX_MARK_TEXT_LEN: usize = 2;

/// Glyphs whose presence in a cell's recognized text counts as an
/// explicit mark. Matching is done against the uppercased text.
pub const MARK_GLYPHS: [&str; 6] = ["X", "\u{2713}", "\u{25CF}", "\u{25A0}", "\u{25AA}", "*"];

/// Number of template columns to the left of the first grading-scale
/// column: the printed row number and the student name.
///
/// Scale entry `i` therefore maps to inferred column `LEADING_COLUMNS + i`
/// and status option `j` to `LEADING_COLUMNS + scale_len + j`.
pub const LEADING_COLUMNS: usize = 2;

/// Maximum number of labels a grading scale may carry.
pub const MAX_SCALE_LABELS: usize = 5;

/// Default worker count for the sheet-processing job queue.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Default number of whole-job attempts before a sheet is marked failed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
