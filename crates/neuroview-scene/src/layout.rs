// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ahash::AHashMap;
use neuroview_structures::activations::LayerKind;
use neuroview_structures::geometry::NeuronPositions;
use neuroview_structures::NeuroviewError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry constants for the layer layout rules.
///
/// Every literal the packing rules need lives here so different network
/// shapes reuse one implementation instead of forking it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Per-cell spacing of the input pixel grid
    pub input_spacing: f32,
    /// Width budget a hidden grid may occupy regardless of neuron count
    pub hidden_envelope: f32,
    /// Spacing between hidden neurons when the envelope allows it
    pub hidden_base_spacing: f32,
    /// Vertical spacing between output classes
    pub output_spacing: f32,
    /// Depth lane of the first (input) layer
    pub first_lane: f32,
    /// Depth distance between adjacent lanes
    pub lane_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            input_spacing: 0.4,
            hidden_envelope: 8.0,
            hidden_base_spacing: 1.0,
            output_spacing: 1.0,
            first_lane: -8.0,
            lane_step: 8.0,
        }
    }
}

impl LayoutConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), NeuroviewError> {
        if self.input_spacing <= 0.0
            || self.hidden_envelope <= 0.0
            || self.hidden_base_spacing <= 0.0
            || self.output_spacing <= 0.0
        {
            return Err(NeuroviewError::BadParameters(
                "Layout spacings and envelope must be > 0".into(),
            ));
        }
        if self.lane_step == 0.0 {
            return Err(NeuroviewError::BadParameters(
                "Lane step must be non-zero so layers occupy distinct lanes".into(),
            ));
        }
        Ok(())
    }

    /// Depth-lane coordinate for the layer at `layer_index`.
    pub fn lane(&self, layer_index: usize) -> f32 {
        self.first_lane + layer_index as f32 * self.lane_step
    }
}

/// Computes scene positions for every neuron of one layer.
///
/// Pure over its arguments: no randomness and no dependency on activation
/// values, so identical `(layer_index, layer_size, layer_kind)` always
/// yields identical coordinates and the result is safe to memoize.
///
/// Packing rules per kind:
/// - `Input`: square grid of side `sqrt(layer_size)` truncated, fixed
///   spacing, centered, rows inverted so the raster's top-left origin
///   renders upright.
/// - `Hidden`: roughly-square grid whose spacing shrinks once the grid
///   would exceed the configured envelope, keeping 16 and 512 neurons at
///   comparable visual scale.
/// - `Output`: one evenly-spaced centered column, one row per class.
pub fn layout_layer(
    layer_index: usize,
    layer_size: usize,
    layer_kind: LayerKind,
    config: &LayoutConfig,
) -> NeuronPositions {
    let lane = config.lane(layer_index);
    let mut positions = NeuronPositions::with_capacity(layer_size);
    if layer_size == 0 {
        return positions;
    }

    match layer_kind {
        LayerKind::Input => {
            let side = (layer_size as f64).sqrt() as usize;
            let side = side.max(1);
            let half = (side as f32 - 1.0) / 2.0;
            for index in 0..layer_size {
                let row = (index / side) as f32;
                let col = (index % side) as f32;
                // Raster row 0 is the top of the drawing, so it takes the
                // highest Y cell.
                let inverted_row = side as f32 - 1.0 - row;
                positions.push_raw(
                    (col - half) * config.input_spacing,
                    (inverted_row - half) * config.input_spacing,
                    lane,
                );
            }
        }
        LayerKind::Hidden => {
            let columns = (layer_size as f64).sqrt().ceil() as usize;
            let columns = columns.max(1);
            let rows = layer_size.div_ceil(columns);
            let fitted = config.hidden_envelope / columns.saturating_sub(1).max(1) as f32;
            let spacing = config.hidden_base_spacing.min(fitted);
            let half_width = (columns as f32 - 1.0) / 2.0 * spacing;
            let half_height = (rows as f32 - 1.0) / 2.0 * spacing;
            for index in 0..layer_size {
                let row = (index / columns) as f32;
                let col = (index % columns) as f32;
                positions.push_raw(
                    col * spacing - half_width,
                    half_height - row * spacing,
                    lane,
                );
            }
        }
        LayerKind::Output => {
            let half = (layer_size as f32 - 1.0) / 2.0 * config.output_spacing;
            for index in 0..layer_size {
                positions.push_raw(0.0, half - index as f32 * config.output_spacing, lane);
            }
        }
    }
    positions
}

/// Key identifying one distinct layer shape.
pub type LayerShapeKey = (usize, usize, LayerKind);

/// Memoizes [`layout_layer`] results for the lifetime of a session.
///
/// Positions depend only on the layer shape, never on activations, so one
/// computation per distinct `(index, size, kind)` serves every subsequent
/// prediction.
#[derive(Debug, Clone)]
pub struct LayoutCache {
    config: LayoutConfig,
    cached: AHashMap<LayerShapeKey, NeuronPositions>,
}

impl LayoutCache {
    /// Creates an empty cache over a fixed layout configuration.
    pub fn new(config: LayoutConfig) -> Self {
        LayoutCache {
            config,
            cached: AHashMap::new(),
        }
    }

    /// The configuration every cached layout was computed with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Positions for the given layer shape, computing them on first request.
    pub fn layer(
        &mut self,
        layer_index: usize,
        layer_size: usize,
        layer_kind: LayerKind,
    ) -> &NeuronPositions {
        let config = &self.config;
        self.cached
            .entry((layer_index, layer_size, layer_kind))
            .or_insert_with(|| {
                debug!(
                    "[LAYOUT] Computing {} positions for layer {} ({:?})",
                    layer_size, layer_index, layer_kind
                );
                layout_layer(layer_index, layer_size, layer_kind, config)
            })
    }

    /// Number of distinct layer shapes laid out so far.
    pub fn cached_layer_count(&self) -> usize {
        self.cached.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_deterministic() {
        let config = LayoutConfig::default();
        let first = layout_layer(1, 16, LayerKind::Hidden, &config);
        let second = layout_layer(1, 16, LayerKind::Hidden, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layers_occupy_distinct_lanes() {
        let config = LayoutConfig::default();
        let input = layout_layer(0, 4, LayerKind::Input, &config);
        let hidden = layout_layer(1, 4, LayerKind::Hidden, &config);
        let output = layout_layer(2, 4, LayerKind::Output, &config);
        assert!(input.z().iter().all(|&z| z == config.lane(0)));
        assert!(hidden.z().iter().all(|&z| z == config.lane(1)));
        assert!(output.z().iter().all(|&z| z == config.lane(2)));
        assert_ne!(config.lane(0), config.lane(1));
        assert_ne!(config.lane(1), config.lane(2));
    }

    #[test]
    fn test_input_grid_rows_are_inverted() {
        let config = LayoutConfig::default();
        // 3x3 grid: neuron 0 is raster top-left, so it takes the highest Y
        let positions = layout_layer(0, 9, LayerKind::Input, &config);
        let top_left = positions.get(0).unwrap();
        let bottom_left = positions.get(6).unwrap();
        assert!(top_left.y > bottom_left.y);
        assert_eq!(top_left.x, bottom_left.x);
    }

    #[test]
    fn test_input_grid_is_centered() {
        let config = LayoutConfig::default();
        let positions = layout_layer(0, 784, LayerKind::Input, &config);
        assert_eq!(positions.len(), 784);
        let sum_x: f32 = positions.x().iter().sum();
        let sum_y: f32 = positions.y().iter().sum();
        assert!((sum_x / 784.0).abs() < 1e-4);
        assert!((sum_y / 784.0).abs() < 1e-4);
    }

    #[test]
    fn test_hidden_envelope_bounds_any_width() {
        let config = LayoutConfig::default();
        for &size in &[16usize, 64, 128, 256, 512] {
            let positions = layout_layer(1, size, LayerKind::Hidden, &config);
            let max_x = positions.x().iter().cloned().fold(f32::MIN, f32::max);
            let min_x = positions.x().iter().cloned().fold(f32::MAX, f32::min);
            assert!(
                max_x - min_x <= config.hidden_envelope + 1e-4,
                "size {} spans {}",
                size,
                max_x - min_x
            );
        }
    }

    #[test]
    fn test_output_column_is_evenly_spaced() {
        let config = LayoutConfig::default();
        let positions = layout_layer(2, 11, LayerKind::Output, &config);
        assert!(positions.x().iter().all(|&x| x == 0.0));
        for index in 1..positions.len() {
            let step = positions.y()[index - 1] - positions.y()[index];
            assert!((step - config.output_spacing).abs() < 1e-4);
        }
        let sum_y: f32 = positions.y().iter().sum();
        assert!((sum_y / 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_layer_yields_no_positions() {
        let config = LayoutConfig::default();
        assert!(layout_layer(0, 0, LayerKind::Input, &config).is_empty());
        assert!(layout_layer(1, 0, LayerKind::Hidden, &config).is_empty());
    }

    #[test]
    fn test_cache_computes_each_shape_once() {
        let mut cache = LayoutCache::new(LayoutConfig::default());
        let first = cache.layer(1, 16, LayerKind::Hidden).clone();
        let again = cache.layer(1, 16, LayerKind::Hidden).clone();
        assert_eq!(first, again);
        assert_eq!(cache.cached_layer_count(), 1);
        cache.layer(1, 32, LayerKind::Hidden);
        assert_eq!(cache.cached_layer_count(), 2);
    }
}
