//! Serialization codec: the persisted Document shape.
//!
//! `Document` is the single contract point between the live element
//! collection and both the persistence gateway (`jsonData` payload field)
//! and the renderer adapter. Decoding fills any missing optional element
//! fields with their per-type defaults, so `from_json(to_json(E))` is
//! element-for-element equivalent to `E` for any valid element set.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::element::Element;

/// Errors from encoding or decoding a persisted document.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The canonical persisted shape of a design's canvas data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Elements in z-order, bottom-most first.
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
}

impl Document {
    /// An empty document at the default canvas size.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }

    /// Decode a persisted document, defaulting missing optional fields.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode to the wire JSON accepted by the persistence gateway.
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the persisted Document shape from the live element collection.
#[must_use]
pub fn to_document(elements: &[Element], canvas_width: f64, canvas_height: f64) -> Document {
    Document {
        elements: elements.to_vec(),
        canvas_width,
        canvas_height,
    }
}

/// Extract the element collection from a persisted document.
#[must_use]
pub fn from_document(document: Document) -> Vec<Element> {
    document.elements
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}
