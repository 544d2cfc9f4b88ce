// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{InkBoundingBox, InkCanvas};
use neuroview_structures::NeuroviewError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning parameters for stroke normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Intensity a pixel must exceed to count as ink (0-255)
    pub ink_threshold: u8,
    /// Edge length of the classifier's input grid
    pub target_side: u32,
    /// Fraction of the target side the stroke's longer dimension fills
    pub fill_fraction: f32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            ink_threshold: 50,
            target_side: 28,
            fill_fraction: 0.71,
        }
    }
}

impl NormalizerConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), NeuroviewError> {
        if self.target_side == 0 {
            return Err(NeuroviewError::BadParameters(
                "Target side must be > 0".into(),
            ));
        }
        if !self.fill_fraction.is_finite()
            || self.fill_fraction <= 0.0
            || self.fill_fraction > 1.0
        {
            return Err(NeuroviewError::BadParameters(
                "Fill fraction must be within (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// The flattened, intensity-normalized grid handed to the classifier.
///
/// Holds exactly `side * side` values in `[0.0, 1.0]`, row-major
/// (index = row * side + column). This is the only artifact that crosses
/// the boundary to the inference service.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    side: u32,
    pixels: Vec<f32>,
}

impl NormalizedInput {
    /// Wraps an already-flattened grid, checking the length against `side`.
    pub fn new(side: u32, pixels: Vec<f32>) -> Result<Self, NeuroviewError> {
        let expected = (side as usize) * (side as usize);
        if pixels.len() != expected {
            return Err(NeuroviewError::BadParameters(format!(
                "Expected {} normalized pixels for side {}, got {}",
                expected,
                side,
                pixels.len()
            )));
        }
        Ok(NormalizedInput { side, pixels })
    }

    /// Edge length of the grid.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total number of values (`side * side`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the grid holds no values (never the case for a valid instance).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The flattened row-major values.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Value at (row, column), if in range.
    pub fn value_at(&self, row: u32, col: u32) -> Option<f32> {
        if row >= self.side || col >= self.side {
            return None;
        }
        Some(self.pixels[(row * self.side + col) as usize])
    }
}

/// Converts the drawn stroke into the classifier's fixed input grid.
///
/// One scan finds the ink bounding box; the boxed region is then rescaled
/// uniformly so its longer dimension fills `fill_fraction` of the target
/// side, re-centered, resampled nearest-neighbor, and flattened row-major
/// with intensities divided down to `[0, 1]`.
///
/// Bounding-box spans are raw deltas, so a stroke one pixel wide or tall has
/// a zero span on that axis; the zero is substituted with 1 before the scale
/// division. A canvas with no ink above the threshold returns
/// [`NeuroviewError::NoInk`] and the caller must skip inference entirely.
///
/// # Examples
/// ```
/// use neuroview_ink::{normalize, CanvasPoint, InkCanvas, NormalizerConfig};
///
/// let mut canvas = InkCanvas::new(280).unwrap();
/// canvas.stamp_dot(CanvasPoint::new(140.0, 140.0), 25.0);
///
/// let input = normalize(&canvas, &NormalizerConfig::default()).unwrap();
/// assert_eq!(input.len(), 784);
/// assert!(input.pixels().iter().all(|&v| (0.0..=1.0).contains(&v)));
/// ```
pub fn normalize(
    canvas: &InkCanvas,
    config: &NormalizerConfig,
) -> Result<NormalizedInput, NeuroviewError> {
    config.validate()?;
    let source = canvas.get_pixels_view();
    let bounds = InkBoundingBox::scan_canvas(source, config.ink_threshold)
        .ok_or(NeuroviewError::NoInk)?;

    // Raw-delta spans; a degenerate axis scales as if it were one pixel wide.
    let span_x = bounds.span_x().max(1) as f32;
    let span_y = bounds.span_y().max(1) as f32;

    let target_side = config.target_side as f32;
    let scale = (target_side * config.fill_fraction) / span_x.max(span_y);
    let scaled_width = span_x * scale;
    let scaled_height = span_y * scale;
    let offset_x = (target_side - scaled_width) / 2.0;
    let offset_y = (target_side - scaled_height) / 2.0;

    debug!(
        "[NORMALIZE] Bounds x:{}..{} y:{}..{} scale:{:.4} placing {:.1}x{:.1} at ({:.2}, {:.2})",
        bounds.min_x(),
        bounds.max_x(),
        bounds.min_y(),
        bounds.max_y(),
        scale,
        scaled_width,
        scaled_height,
        offset_x,
        offset_y
    );

    let side = config.target_side as usize;
    let mut pixels = vec![0.0f32; side * side];
    for dest_row in 0..side {
        let relative_y = (dest_row as f32 + 0.5) - offset_y;
        if relative_y < 0.0 || relative_y >= scaled_height {
            continue;
        }
        let source_row = (bounds.min_y() + (relative_y / scale) as u32).min(bounds.max_y());
        for dest_col in 0..side {
            let relative_x = (dest_col as f32 + 0.5) - offset_x;
            if relative_x < 0.0 || relative_x >= scaled_width {
                continue;
            }
            let source_col = (bounds.min_x() + (relative_x / scale) as u32).min(bounds.max_x());
            pixels[dest_row * side + dest_col] =
                source[(source_row as usize, source_col as usize)] as f32 / 255.0;
        }
    }

    NormalizedInput::new(config.target_side, pixels)
}
