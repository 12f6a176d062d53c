pub mod analysis;
pub mod consts;
pub mod error;
pub mod grade;
pub mod jobs;
pub mod ocr;
pub mod pipeline;

// Re-export commonly used types
pub use grade::{record::ProcessedGrade, roster::Student, scale::GradingScale};
pub use pipeline::{
    config::{PipelineConfig, PipelineConfigBuilder},
    processor::{ProviderMode, SheetConfig, SheetProcessor},
};
