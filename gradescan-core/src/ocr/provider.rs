use bytes::Bytes;
use futures::future::BoxFuture;

use crate::{analysis::text::TextObject, error::GradescanError};

/// The external OCR collaborator, behind a seam so the pipeline never
/// owns network I/O.
///
/// A provider exposes two modes: `recognize` returns structured text
/// fragments with bounding geometry (consumed by the spatial pipeline),
/// `describe` returns one free-text table response (consumed by the
/// free-text parser). Implementations make one remote call per grade
/// sheet; any failure is fatal for that sheet and surfaces as
/// [`GradescanError::Provider`]; retries belong to the job layer, not
/// here.
pub trait OcrProvider: Send + Sync {
    /// Short provider name for logs and error messages.
    fn name(&self) -> &str;

    /// Vision mode: image to recognized text fragments.
    fn recognize(&self, image: Bytes) -> BoxFuture<'_, Result<Vec<TextObject>, GradescanError>>;

    /// Free-text mode: image to one delimited-table response.
    fn describe(&self, image: Bytes) -> BoxFuture<'_, Result<String, GradescanError>>;
}
