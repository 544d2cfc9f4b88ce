// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::ArrayView2;
use neuroview_structures::NeuroviewError;

/// Axis-aligned bounds of the inked region of a canvas, in pixel coordinates.
///
/// Built by scanning for pixels whose intensity exceeds the ink detection
/// threshold. Holds `min <= max` on both axes whenever it exists at all; a
/// canvas with no ink produces no bounding box rather than a degenerate one.
///
/// Spans are raw coordinate deltas (`max - min`), not inclusive pixel
/// counts. A one-pixel-wide stroke therefore reports a span of zero and the
/// consumer substitutes 1 before dividing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBoundingBox {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl InkBoundingBox {
    /// Creates a bounding box from corner coordinates.
    ///
    /// # Arguments
    /// * `min_x`, `min_y` - Top-left inked pixel
    /// * `max_x`, `max_y` - Bottom-right inked pixel
    ///
    /// # Returns
    /// * `Result<Self, NeuroviewError>` - The box, or an error when a min exceeds its max
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<Self, NeuroviewError> {
        if min_x > max_x || min_y > max_y {
            return Err(NeuroviewError::BadParameters(
                "Bounding box minimums cannot exceed maximums!".into(),
            ));
        }
        Ok(InkBoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Scans a raster once and bounds every pixel brighter than `ink_threshold`.
    ///
    /// Returns `None` when no pixel qualifies, which callers must treat as
    /// "nothing drawn" rather than an empty box at the origin.
    ///
    /// # Examples
    /// ```
    /// use ndarray::Array2;
    /// use neuroview_ink::InkBoundingBox;
    ///
    /// let mut pixels = Array2::<u8>::zeros((10, 10));
    /// pixels[(2, 3)] = 255;
    /// pixels[(5, 7)] = 255;
    ///
    /// let bounds = InkBoundingBox::scan_canvas(pixels.view(), 50).unwrap();
    /// assert_eq!(bounds.min_x(), 3);
    /// assert_eq!(bounds.max_y(), 5);
    /// ```
    pub fn scan_canvas(pixels: ArrayView2<u8>, ink_threshold: u8) -> Option<InkBoundingBox> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for ((row, col), &intensity) in pixels.indexed_iter() {
            if intensity <= ink_threshold {
                continue;
            }
            let (x, y) = (col as u32, row as u32);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds.map(|(min_x, min_y, max_x, max_y)| InkBoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Leftmost inked column.
    pub fn min_x(&self) -> u32 {
        self.min_x
    }

    /// Topmost inked row.
    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    /// Rightmost inked column.
    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    /// Bottommost inked row.
    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    /// Horizontal span as a raw delta (0 for a single-column stroke).
    pub fn span_x(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Vertical span as a raw delta (0 for a single-row stroke).
    pub fn span_y(&self) -> u32 {
        self.max_y - self.min_y
    }
}
