//! Ink capture and stroke-to-tensor normalization for NeuroView.
//!
//! [`InkCanvas`] holds the raw one-channel raster a user draws onto.
//! [`normalize`] converts whatever was drawn, at whatever position and
//! scale, into the fixed-size centered grid the classifier expects.

mod bounding_box;
mod canvas;
mod normalizer;

pub use bounding_box::InkBoundingBox;
pub use canvas::{CanvasConfig, CanvasPoint, InkCanvas};
pub use normalizer::{normalize, NormalizedInput, NormalizerConfig};
