use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum GradescanError {
    #[snafu(display("OCR provider `{}` failed at `{}`: {}", provider, stage, message))]
    Provider {
        provider: String,
        stage: String,
        message: String,
    },
    #[snafu(display("Decode vision response error: {}", source))]
    VisionDecode { source: serde_json::Error },
    #[snafu(display(
        "Grading scale must have between 1 and {} labels, got {}",
        max,
        count
    ))]
    InvalidScale { count: usize, max: usize },
    #[snafu(display("Store write for sheet `{}` error: {}", sheet_id, message))]
    Store { sheet_id: String, message: String },
}
