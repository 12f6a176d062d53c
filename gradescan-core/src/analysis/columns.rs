use serde::Serialize;
use tracing::debug;

use crate::{analysis::rows::Row, pipeline::config::PipelineConfig};

/// An inferred horizontal slot shared across rows of the printed
/// template.
///
/// Only the ordinal position of a column in the final left-to-right
/// sorted list carries meaning; nothing here stores a label. The caller
/// maps ordinals to row-number, student-name, grading-scale, and status
/// slots.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ColumnPosition {
    /// Representative X center, the running mean of all observations
    /// grouped into this column.
    pub center_x: f32,
    /// Number of independent observations backing the column.
    pub observations: usize,
}

struct Group {
    sum: f32,
    count: usize,
}

impl Group {
    fn center(&self) -> f32 {
        self.sum / self.count as f32
    }
}

/// Discovers the shared column positions from a sample of leading rows.
///
/// Pools every member's rounded X center from the first
/// `column_sample_rows` rows, sorts ascending, and greedily merges each
/// value into the first group whose running-mean center lies within
/// `column_tolerance`. Groups backed by fewer than
/// `min_column_observations` values are dropped as noise. Survivors come
/// back sorted by center.
///
/// Column positions are a property of the printed template, not of
/// individual responses, which is why a small sample suffices for the
/// whole sheet. With fewer than two sample rows the result may be
/// shorter than the template's real column count; callers treat
/// out-of-range ordinals as "undetected".
pub fn infer_columns(rows: &[Row], config: &PipelineConfig) -> Vec<ColumnPosition> {
    let sample = &rows[..rows.len().min(config.column_sample_rows)];

    let mut x_positions: Vec<f32> = sample
        .iter()
        .flat_map(|row| row.text_objects.iter())
        .map(|obj| obj.bbox.center().x.round())
        .collect();
    x_positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut groups: Vec<Group> = Vec::new();

    for x in x_positions {
        match groups
            .iter_mut()
            .find(|group| (group.center() - x).abs() <= config.column_tolerance)
        {
            Some(group) => {
                group.sum += x;
                group.count += 1;
            }
            None => groups.push(Group { sum: x, count: 1 }),
        }
    }

    let mut columns: Vec<ColumnPosition> = groups
        .into_iter()
        .filter(|group| group.count >= config.min_column_observations)
        .map(|group| ColumnPosition {
            center_x: group.center(),
            observations: group.count,
        })
        .collect();
    columns.sort_by(|a, b| {
        a.center_x
            .partial_cmp(&b.center_x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        "inferred {} columns from {} sample rows",
        columns.len(),
        sample.len()
    );

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{bbox::Bbox, text::TextObject};

    fn row_with_centers(xs: &[f32], y: f32) -> Row {
        let objects: Vec<TextObject> = xs
            .iter()
            .map(|&x| {
                TextObject::new(
                    "t",
                    Some(0.9),
                    Bbox::new(
                        glam::Vec2::new(x - 5.0, y - 5.0),
                        glam::Vec2::new(x + 5.0, y + 5.0),
                    ),
                )
            })
            .collect();
        Row {
            min_y: y - 5.0,
            max_y: y + 5.0,
            center_y: y,
            text_objects: objects,
        }
    }

    #[test]
    fn test_two_columns_from_three_sample_rows() {
        // Three columns' worth of observations at ~100 and ~300, each
        // seen three times, plus a lone outlier at 500
        let rows = vec![
            row_with_centers(&[100.0, 300.0, 500.0], 100.0),
            row_with_centers(&[101.0, 302.0], 130.0),
            row_with_centers(&[99.0, 298.0], 160.0),
        ];
        let columns = infer_columns(&rows, &PipelineConfig::default());

        assert_eq!(columns.len(), 2);
        assert!((columns[0].center_x - 100.0).abs() <= 1.0);
        assert!((columns[1].center_x - 300.0).abs() <= 2.0);
        assert!(columns.iter().all(|c| c.observations >= 2));
    }

    #[test]
    fn test_never_returns_single_observation_column() {
        let rows = vec![
            row_with_centers(&[100.0, 250.0], 100.0),
            row_with_centers(&[101.0], 130.0),
        ];
        let columns = infer_columns(&rows, &PipelineConfig::default());

        // 250 was seen once, so it must not become a column
        assert_eq!(columns.len(), 1);
        assert!((columns[0].center_x - 100.5).abs() < 0.01);
        assert_eq!(columns[0].observations, 2);
    }

    #[test]
    fn test_running_mean_tracks_group() {
        let rows = vec![
            row_with_centers(&[100.0], 100.0),
            row_with_centers(&[110.0], 130.0),
            row_with_centers(&[120.0], 160.0),
        ];
        // 100 starts the group; 110 joins (|105 - ... | within 20);
        // 120 joins against the updated mean 105
        let columns = infer_columns(&rows, &PipelineConfig::default());
        assert_eq!(columns.len(), 1);
        assert!((columns[0].center_x - 110.0).abs() < 0.01);
        assert_eq!(columns[0].observations, 3);
    }

    #[test]
    fn test_empty_and_sparse_input() {
        assert!(infer_columns(&[], &PipelineConfig::default()).is_empty());

        // A single row can never produce a 2-observation group from
        // distinct columns
        let rows = vec![row_with_centers(&[100.0, 300.0, 500.0], 100.0)];
        assert!(infer_columns(&rows, &PipelineConfig::default()).is_empty());
    }

    #[test]
    fn test_sample_is_capped() {
        // Rows beyond the sample cap contribute nothing
        let mut rows: Vec<Row> = (0..5)
            .map(|i| row_with_centers(&[100.0], 100.0 + i as f32 * 30.0))
            .collect();
        rows.push(row_with_centers(&[400.0], 300.0));
        rows.push(row_with_centers(&[401.0], 330.0));

        let columns = infer_columns(&rows, &PipelineConfig::default());
        assert_eq!(columns.len(), 1);
        assert!((columns[0].center_x - 100.0).abs() < 0.01);
    }
}
