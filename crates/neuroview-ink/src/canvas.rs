// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::{Array2, ArrayView2};
use neuroview_structures::NeuroviewError;
use serde::{Deserialize, Serialize};

/// Intensity written by the brush. Strokes are pure white on a black canvas.
const INK_FULL: u8 = 255;

/// Sizing parameters for the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Edge length of the square canvas in pixels
    pub side: u32,
    /// Brush radius in canvas pixels (stroke width is twice this)
    pub brush_radius: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            side: 280,
            brush_radius: 10.0,
        }
    }
}

impl CanvasConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), NeuroviewError> {
        if self.side == 0 {
            return Err(NeuroviewError::BadParameters(
                "Canvas side must be > 0".into(),
            ));
        }
        if self.brush_radius <= 0.0 || !self.brush_radius.is_finite() {
            return Err(NeuroviewError::BadParameters(
                "Brush radius must be a positive finite number".into(),
            ));
        }
        Ok(())
    }
}

/// A position on the canvas in pixel units, X right, Y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    /// Creates a new canvas point.
    pub const fn new(x: f32, y: f32) -> Self {
        CanvasPoint { x, y }
    }
}

/// A container for the raw ink raster a user draws onto.
///
/// Stores one intensity channel per pixel as a 2D array indexed
/// (row, column). Pointer input arrives as line segments which are stamped
/// with a circular brush; round caps fall out of the distance test. The
/// canvas owns its buffer exclusively, normalization only borrows a view.
#[derive(Clone, Debug)]
pub struct InkCanvas {
    pixels: Array2<u8>,
}

// NOTE -> (0,0) is in the top left corner!

impl InkCanvas {
    /// Creates a new zero-filled (all black) square canvas.
    ///
    /// # Arguments
    /// * `side` - Edge length in pixels, must be > 0
    ///
    /// # Examples
    /// ```
    /// use neuroview_ink::InkCanvas;
    ///
    /// let canvas = InkCanvas::new(280).unwrap();
    /// assert_eq!(canvas.side(), 280);
    /// assert!(canvas.is_blank());
    /// ```
    pub fn new(side: u32) -> Result<InkCanvas, NeuroviewError> {
        if side == 0 {
            return Err(NeuroviewError::BadParameters(
                "Canvas side must be > 0".into(),
            ));
        }
        Ok(InkCanvas {
            pixels: Array2::<u8>::zeros((side as usize, side as usize)),
        })
    }

    /// Creates a canvas sized from a [`CanvasConfig`].
    pub fn new_from_config(config: &CanvasConfig) -> Result<InkCanvas, NeuroviewError> {
        config.validate()?;
        Self::new(config.side)
    }

    /// Edge length of the canvas in pixels.
    pub fn side(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    /// Borrows the pixel buffer, indexed (row, column).
    pub fn get_pixels_view(&self) -> ArrayView2<u8> {
        self.pixels.view()
    }

    /// True when no pixel holds any ink.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&intensity| intensity == 0)
    }

    /// Stamps one stroke segment onto the canvas with a circular brush.
    ///
    /// Every cell within `brush_radius` of the segment is set to full
    /// intensity. A zero-length segment stamps a single dot. Coordinates
    /// outside the canvas are tolerated; only in-bounds cells are written.
    pub fn stamp_segment(&mut self, from: CanvasPoint, to: CanvasPoint, brush_radius: f32) {
        let radius = brush_radius.max(0.0);
        let side = self.pixels.nrows() as f32;

        let min_col = (from.x.min(to.x) - radius).floor().max(0.0);
        let max_col = (from.x.max(to.x) + radius).ceil().min(side - 1.0);
        let min_row = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_row = (from.y.max(to.y) + radius).ceil().min(side - 1.0);
        if min_col > max_col || min_row > max_row {
            return;
        }

        for row in (min_row as usize)..=(max_row as usize) {
            for col in (min_col as usize)..=(max_col as usize) {
                let cell = CanvasPoint::new(col as f32, row as f32);
                if distance_to_segment(cell, from, to) <= radius {
                    self.pixels[(row, col)] = INK_FULL;
                }
            }
        }
    }

    /// Stamps a single brush dot (a click without movement).
    pub fn stamp_dot(&mut self, at: CanvasPoint, brush_radius: f32) {
        self.stamp_segment(at, at, brush_radius);
    }

    /// Resets every pixel to black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}

/// Distance from a point to the closest point on a segment.
fn distance_to_segment(point: CanvasPoint, start: CanvasPoint, end: CanvasPoint) -> f32 {
    let segment_x = end.x - start.x;
    let segment_y = end.y - start.y;
    let length_squared = segment_x * segment_x + segment_y * segment_y;
    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((point.x - start.x) * segment_x + (point.y - start.y) * segment_y) / length_squared)
            .clamp(0.0, 1.0)
    };
    let nearest_x = start.x + t * segment_x;
    let nearest_y = start.y + t * segment_y;
    let offset_x = point.x - nearest_x;
    let offset_y = point.y - nearest_y;
    (offset_x * offset_x + offset_y * offset_y).sqrt()
}
