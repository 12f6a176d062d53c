use tracing::debug;

use crate::{
    analysis::{columns::ColumnPosition, marks::is_column_marked, rows::Row},
    grade::{
        record::ProcessedGrade,
        roster::Student,
        scale::{GradingScale, StatusOption},
    },
    pipeline::config::PipelineConfig,
};

/// The seam between detected rows and roster entries.
///
/// The whole pipeline rests on an assumption about which physical row
/// belongs to which student. Keeping it behind a trait makes the
/// assumption explicit and swappable: an anchored scheme (printed
/// per-row identifiers) can replace the positional default without
/// touching the assembler.
pub trait RowMatcher {
    fn row_for_student<'a>(
        &self,
        rows: &'a [Row],
        student_index: usize,
        student: &Student,
    ) -> Option<&'a Row>;
}

/// The default correspondence: row `i` belongs to student `i` in roster
/// order. This holds only as long as the scan preserves the printed
/// order and every student occupies exactly one detected row.
pub struct PositionalMatcher;

impl RowMatcher for PositionalMatcher {
    fn row_for_student<'a>(
        &self,
        rows: &'a [Row],
        student_index: usize,
        _student: &Student,
    ) -> Option<&'a Row> {
        rows.get(student_index)
    }
}

/// Combines roster order, the grading scale, and per-cell mark decisions
/// into one normalized grade per student.
pub struct GradeAssembler<M: RowMatcher> {
    matcher: M,
}

impl GradeAssembler<PositionalMatcher> {
    pub fn positional() -> Self {
        Self::new(PositionalMatcher)
    }
}

impl<M: RowMatcher> GradeAssembler<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    /// Produces exactly one [`ProcessedGrade`] per roster entry,
    /// regardless of how many rows were detected.
    ///
    /// Scale columns are probed in printed order and the first marked
    /// one wins. On a double-marked sheet the leftmost scale option is
    /// kept, a deliberately simple tie-break left for the reviewer.
    /// Status columns are all probed and every marked one is kept.
    /// A student with no matched row gets empty score and status.
    /// Identity always comes from the roster record, never from row
    /// text. This step has no failure path: OCR trouble shows up as
    /// empty fields, not errors.
    pub fn assemble(
        &self,
        roster: &[Student],
        scale: &GradingScale,
        status_enabled: bool,
        rows: &[Row],
        columns: &[ColumnPosition],
        config: &PipelineConfig,
    ) -> Vec<ProcessedGrade> {
        let grades: Vec<ProcessedGrade> = roster
            .iter()
            .enumerate()
            .map(|(index, student)| {
                match self.matcher.row_for_student(rows, index, student) {
                    Some(row) => self.grade_row(student, row, scale, status_enabled, columns, config),
                    None => ProcessedGrade::empty_for(student),
                }
            })
            .collect();

        debug!(
            "assembled {} grades from {} detected rows",
            grades.len(),
            rows.len()
        );

        grades
    }

    fn grade_row(
        &self,
        student: &Student,
        row: &Row,
        scale: &GradingScale,
        status_enabled: bool,
        columns: &[ColumnPosition],
        config: &PipelineConfig,
    ) -> ProcessedGrade {
        let mut grade = ProcessedGrade::empty_for(student);

        for (ordinal, label) in scale.labels().iter().enumerate() {
            if is_column_marked(row, columns, config.leading_columns + ordinal, config) {
                grade.score = label.clone();
                break;
            }
        }

        if status_enabled {
            let status_base = config.leading_columns + scale.len();
            for (ordinal, option) in StatusOption::ALL.iter().enumerate() {
                if is_column_marked(row, columns, status_base + ordinal, config) {
                    grade.status.push(option.label().to_string());
                }
            }
        }

        grade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{bbox::Bbox, text::TextObject};

    fn student(id: &str, first: &str, last: &str) -> Student {
        Student {
            student_id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn mark_at(x: f32, y: f32) -> TextObject {
        TextObject::new(
            "X",
            Some(0.95),
            Bbox::new(
                glam::Vec2::new(x - 5.0, y - 5.0),
                glam::Vec2::new(x + 5.0, y + 5.0),
            ),
        )
    }

    fn row_with_marks(xs: &[f32], y: f32) -> Row {
        Row {
            min_y: y - 5.0,
            max_y: y + 5.0,
            center_y: y,
            text_objects: xs.iter().map(|&x| mark_at(x, y)).collect(),
        }
    }

    fn column_at(center_x: f32) -> ColumnPosition {
        ColumnPosition {
            center_x,
            observations: 2,
        }
    }

    fn scale_of(labels: &[&str]) -> GradingScale {
        GradingScale::new(labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    // Template: row# at 40, name at 150, scale at 250/300/350,
    // status M/A/E at 400/440/480
    fn template_columns() -> Vec<ColumnPosition> {
        [40.0, 150.0, 250.0, 300.0, 350.0, 400.0, 440.0, 480.0]
            .iter()
            .map(|&x| column_at(x))
            .collect()
    }

    fn roster_of_two() -> Vec<Student> {
        vec![student("001", "Ann", "Lee"), student("002", "Bo", "Kim")]
    }

    #[test]
    fn test_output_length_always_equals_roster_length() {
        let assembler = GradeAssembler::positional();
        let roster = roster_of_two();
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns = template_columns();
        let config = PipelineConfig::default();

        // Fewer rows than roster
        let rows = vec![row_with_marks(&[250.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[1].score, "");
        assert!(grades[1].status.is_empty());

        // More rows than roster: extras ignored
        let rows = vec![
            row_with_marks(&[250.0], 100.0),
            row_with_marks(&[300.0], 130.0),
            row_with_marks(&[350.0], 160.0),
        ];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades.len(), 2);

        // No rows at all
        let grades = assembler.assemble(&roster, &scale, true, &[], &columns, &config);
        assert_eq!(grades.len(), 2);
        assert!(grades.iter().all(|g| g.score.is_empty() && g.status.is_empty()));
    }

    #[test]
    fn test_identity_always_from_roster() {
        let assembler = GradeAssembler::positional();
        let roster = roster_of_two();
        let scale = scale_of(&["10"]);
        let columns = template_columns();
        let config = PipelineConfig::default();
        let rows = vec![row_with_marks(&[250.0], 100.0), row_with_marks(&[], 130.0)];

        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        for (grade, student) in grades.iter().zip(&roster) {
            assert_eq!(grade.student_id, student.student_id);
            assert_eq!(grade.student_name, student.full_name());
        }
    }

    #[test]
    fn test_first_marked_scale_column_wins() {
        let assembler = GradeAssembler::positional();
        let roster = vec![student("001", "Ann", "Lee")];
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns = template_columns();
        let config = PipelineConfig::default();

        // Double-marked: 8.5 and 7.5 columns both carry a mark
        let rows = vec![row_with_marks(&[300.0, 350.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades[0].score, "8.5");
    }

    #[test]
    fn test_statuses_union_not_first_match() {
        let assembler = GradeAssembler::positional();
        let roster = vec![student("001", "Ann", "Lee")];
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns = template_columns();
        let config = PipelineConfig::default();

        let rows = vec![row_with_marks(&[400.0, 480.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades[0].status, vec!["Missing", "Exempt"]);
        assert_eq!(grades[0].score, "");
    }

    #[test]
    fn test_status_disabled_probes_nothing() {
        let assembler = GradeAssembler::positional();
        let roster = vec![student("001", "Ann", "Lee")];
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns = template_columns();
        let config = PipelineConfig::default();

        let rows = vec![row_with_marks(&[400.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, false, &rows, &columns, &config);
        assert!(grades[0].status.is_empty());
    }

    #[test]
    fn test_undercounted_columns_yield_empty_score() {
        let assembler = GradeAssembler::positional();
        let roster = vec![student("001", "Ann", "Lee")];
        // Scale has 3 entries but only the first scale column was detected
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns: Vec<ColumnPosition> =
            [40.0, 150.0, 250.0].iter().map(|&x| column_at(x)).collect();
        let config = PipelineConfig::default();

        // The mark sits where the 7.5 column would be, which went
        // undetected, so
        // nothing is found and nothing panics
        let rows = vec![row_with_marks(&[350.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades[0].score, "");
        assert!(grades[0].status.is_empty());
    }

    #[test]
    fn test_extra_unexplained_columns_are_ignored() {
        let assembler = GradeAssembler::positional();
        let roster = vec![student("001", "Ann", "Lee")];
        let scale = scale_of(&["10"]);
        // Columns beyond scale + status exist (e.g. stray template art)
        let mut columns = template_columns();
        columns.push(column_at(600.0));
        let config = PipelineConfig::default();

        let rows = vec![row_with_marks(&[250.0, 600.0], 100.0)];
        let grades = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(grades[0].score, "10");
        // The mark at 600 maps to no scale or status ordinal
        assert!(grades[0].status.is_empty());
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let assembler = GradeAssembler::positional();
        let roster = roster_of_two();
        let scale = scale_of(&["10", "8.5", "7.5"]);
        let columns = template_columns();
        let config = PipelineConfig::default();
        let rows = vec![
            row_with_marks(&[250.0, 440.0], 100.0),
            row_with_marks(&[300.0], 130.0),
        ];

        let first = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        let second = assembler.assemble(&roster, &scale, true, &rows, &columns, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
