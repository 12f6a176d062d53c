use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    analysis::{columns::infer_columns, rows::cluster_into_rows, text::TextObject},
    error::GradescanError,
    grade::{record::ProcessedGrade, roster::Student, scale::GradingScale},
    ocr::provider::OcrProvider,
    pipeline::{
        assembler::GradeAssembler, config::PipelineConfig, freetext::parse_free_text,
    },
};

/// Which of the provider's two response shapes to request for a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Structured fragments with bounding geometry; spatial pipeline.
    Vision,
    /// One delimited-table response; free-text parser.
    FreeText,
}

/// Everything the pipeline needs to know about one grade sheet besides
/// the scanned image: the roster in printed order, the grading scale,
/// and whether the sheet carries status columns.
#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub roster: Vec<Student>,
    pub scale: GradingScale,
    pub status_enabled: bool,
}

/// Per-sheet orchestration over an [`OcrProvider`].
///
/// Each call is self-contained: all intermediate state (text objects,
/// rows, columns) is local to the invocation, so any number of sheets
/// can be processed concurrently without sharing anything.
pub struct SheetProcessor<P: OcrProvider> {
    provider: P,
    config: PipelineConfig,
}

impl<P: OcrProvider> SheetProcessor<P> {
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs one sheet through the path selected by `mode`.
    ///
    /// Only the provider call can fail here; every downstream stage
    /// degrades to empty fields instead of erroring.
    pub async fn process(
        &self,
        image: Bytes,
        sheet: &SheetConfig,
        mode: ProviderMode,
    ) -> Result<Vec<ProcessedGrade>, GradescanError> {
        match mode {
            ProviderMode::Vision => {
                let text_objects = self.provider.recognize(image).await?;
                Ok(process_recognized(&text_objects, sheet, &self.config))
            }
            ProviderMode::FreeText => {
                let response = self.provider.describe(image).await?;
                Ok(process_free_text(&response, sheet))
            }
        }
    }
}

/// The synchronous spatial path: cluster fragments into rows, infer the
/// template's columns from the leading rows, then assemble one grade per
/// roster student from per-cell mark decisions.
pub fn process_recognized(
    text_objects: &[TextObject],
    sheet: &SheetConfig,
    config: &PipelineConfig,
) -> Vec<ProcessedGrade> {
    let rows = cluster_into_rows(text_objects, config);
    let columns = infer_columns(&rows, config);

    info!(
        "vision path: {} fragments, {} rows, {} columns, {} students",
        text_objects.len(),
        rows.len(),
        columns.len(),
        sheet.roster.len()
    );

    GradeAssembler::positional().assemble(
        &sheet.roster,
        &sheet.scale,
        sheet.status_enabled,
        &rows,
        &columns,
        config,
    )
}

/// The synchronous free-text path: clean and parse the delimited table.
pub fn process_free_text(response: &str, sheet: &SheetConfig) -> Vec<ProcessedGrade> {
    info!(
        "free-text path: {} bytes of response, {} students",
        response.len(),
        sheet.roster.len()
    );

    parse_free_text(response, &sheet.roster)
}
