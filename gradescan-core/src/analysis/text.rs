use serde::{Deserialize, Serialize};

use crate::analysis::bbox::Bbox;

/// One OCR-recognized text fragment with its bounding geometry.
///
/// Created once per OCR response and held only for the duration of one
/// processing run; never persisted on its own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextObject {
    /// Recognized string content, trimmed.
    pub text: String,
    /// Recognition confidence in 0.0..=1.0; 1.0 when the provider does
    /// not report one.
    pub confidence: f32,
    pub bbox: Bbox,
}

impl TextObject {
    pub fn new(text: impl Into<String>, confidence: Option<f32>, bbox: Bbox) -> Self {
        Self {
            text: text.into().trim().to_string(),
            confidence: confidence.unwrap_or(1.0),
            bbox,
        }
    }
}
