use serde::Deserialize;
use snafu::ResultExt;

use crate::{
    analysis::{bbox::Bbox, text::TextObject},
    error::{GradescanError, VisionDecodeSnafu},
};

/// One image's worth of annotations from a structured vision provider.
///
/// Mirrors the shape of a Google-Vision-style text-detection response:
/// the first annotation covers the full recognized text of the image,
/// followed by one annotation per individual fragment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResponse {
    #[serde(default)]
    pub text_annotations: Vec<TextAnnotation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    pub description: String,
    /// Absent when the provider was not asked for confidence scores.
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub bounding_poly: BoundingPoly,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// Providers omit a coordinate when it is zero.
#[derive(Debug, Default, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

/// Converts a decoded vision response into the pipeline's text objects.
///
/// The leading full-text annotation is skipped; each remaining
/// annotation's bounding box is the min/max envelope of its polygon
/// vertices, missing coordinates default to 0, and missing confidence
/// defaults to 1.0.
pub fn parse_vision_response(response: &VisionResponse) -> Vec<TextObject> {
    response
        .text_annotations
        .iter()
        .skip(1)
        .map(|annotation| {
            let vertices: Vec<glam::Vec2> = annotation
                .bounding_poly
                .vertices
                .iter()
                .map(|v| glam::Vec2::new(v.x.unwrap_or(0.0), v.y.unwrap_or(0.0)))
                .collect();

            TextObject::new(
                &annotation.description,
                annotation.confidence,
                Bbox::from_vertices(&vertices),
            )
        })
        .collect()
}

/// Decodes a raw vision-response JSON document into text objects.
pub fn decode_vision_json(raw: &str) -> Result<Vec<TextObject>, GradescanError> {
    let response: VisionResponse = serde_json::from_str(raw).context(VisionDecodeSnafu)?;
    Ok(parse_vision_response(&response))
}
