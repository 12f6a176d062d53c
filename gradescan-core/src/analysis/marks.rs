use crate::{
    analysis::{columns::ColumnPosition, rows::Row, text::TextObject},
    consts::MARK_GLYPHS,
    pipeline::config::PipelineConfig,
};

/// Explicit-glyph detector: the fragment's uppercased text contains one
/// of the known mark glyphs (X, checkmark, filled circle/square, ...).
pub fn is_glyph_mark(text_object: &TextObject) -> bool {
    let text = text_object.text.to_uppercase();
    MARK_GLYPHS.iter().any(|glyph| text.contains(glyph))
}

/// Smudge detector: short, low-confidence text.
///
/// A solid filled bubble usually OCRs as one or two characters of
/// low-confidence garbage rather than a clean glyph, so low confidence on
/// a short fragment counts as a positive mark signal.
pub fn is_smudge_mark(text_object: &TextObject, config: &PipelineConfig) -> bool {
    text_object.confidence < config.low_confidence_threshold
        && text_object.text.chars().count() <= config.max_mark_text_len
}

/// Decides whether the cell at `column_index` of `row` is marked.
///
/// A fragment counts as evidence when its center X lies within
/// `mark_tolerance` of the column center and either detector fires. An
/// out-of-range column index means the column was never detected and
/// resolves to unmarked; it is never an error.
///
/// Detection is heuristic by construction. False positives and negatives
/// are expected and surface to the human review step downstream, so both
/// detectors stay deliberately simple and independently tunable.
pub fn is_column_marked(
    row: &Row,
    columns: &[ColumnPosition],
    column_index: usize,
    config: &PipelineConfig,
) -> bool {
    let Some(column) = columns.get(column_index) else {
        return false;
    };

    row.text_objects.iter().any(|obj| {
        (obj.bbox.center().x - column.center_x).abs() <= config.mark_tolerance
            && (is_glyph_mark(obj) || is_smudge_mark(obj, config))
    })
}
