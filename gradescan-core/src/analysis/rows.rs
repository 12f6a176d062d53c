use tracing::debug;

use crate::{analysis::text::TextObject, pipeline::config::PipelineConfig};

/// A horizontal band of text objects believed to belong to one student's
/// line on the printed sheet.
#[derive(Clone, Debug)]
pub struct Row {
    /// Member fragments, sorted ascending by center X once the row is
    /// finalized.
    pub text_objects: Vec<TextObject>,
    pub min_y: f32,
    pub max_y: f32,
    /// Midpoint of the row's vertical extent, recomputed as members are
    /// absorbed.
    pub center_y: f32,
}

impl Row {
    fn start(text_object: TextObject) -> Self {
        Self {
            min_y: text_object.bbox.min.y,
            max_y: text_object.bbox.max.y,
            center_y: text_object.bbox.center().y,
            text_objects: vec![text_object],
        }
    }

    fn absorb(&mut self, text_object: TextObject) {
        self.min_y = self.min_y.min(text_object.bbox.min.y);
        self.max_y = self.max_y.max(text_object.bbox.max.y);
        self.center_y = (self.min_y + self.max_y) / 2.0;
        self.text_objects.push(text_object);
    }
}

/// Groups text objects into rows by vertical position, top to bottom.
///
/// Objects are visited in ascending center-Y order; each one either joins
/// the current row (center within `y_tolerance` of the row center, which
/// extends the row's extent) or closes it and starts the next. Members of
/// each finished row are sorted ascending by center X.
///
/// This never fails: empty input yields an empty list, and a stray
/// fragment far from everything else becomes its own one-member row for
/// downstream stages to tolerate rather than being guessed away as noise.
pub fn cluster_into_rows(text_objects: &[TextObject], config: &PipelineConfig) -> Vec<Row> {
    if text_objects.is_empty() {
        return Vec::new();
    }

    let mut sorted = text_objects.to_vec();
    sorted.sort_by(|a, b| {
        a.bbox
            .center()
            .y
            .partial_cmp(&b.bbox.center().y)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<Row> = Vec::new();

    for text_object in sorted {
        let center_y = text_object.bbox.center().y;

        match rows.last_mut() {
            Some(row) if (center_y - row.center_y).abs() <= config.y_tolerance => {
                row.absorb(text_object);
            }
            _ => rows.push(Row::start(text_object)),
        }
    }

    for row in &mut rows {
        row.text_objects.sort_by(|a, b| {
            a.bbox
                .center()
                .x
                .partial_cmp(&b.bbox.center().x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    debug!(
        "clustered {} text objects into {} rows",
        text_objects.len(),
        rows.len()
    );

    rows
}
