// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{prune_connections, render_layer, LayoutCache, NeuronVisual, PruneConfig, RenderConfig};
use neuroview_structures::activations::{ActivationSnapshot, PredictionLabel};
use neuroview_structures::geometry::Edge;
use tracing::debug;

/// One fully composed render pass: per-layer neuron visuals, per-boundary
/// edge sets, and the prediction banner values.
///
/// Ephemeral like the snapshot it came from; the next prediction replaces
/// it wholesale.
#[derive(Debug, Clone)]
pub struct SceneFrame {
    layers: Vec<Vec<NeuronVisual>>,
    connections: Vec<Vec<Edge>>,
    prediction: PredictionLabel,
    confidence: f32,
}

impl SceneFrame {
    /// Neuron visuals grouped by layer, in network order.
    pub fn layers(&self) -> &[Vec<NeuronVisual>] {
        &self.layers
    }

    /// Edge sets, one per adjacent layer boundary (`layer_count - 1` of them).
    pub fn connections(&self) -> &[Vec<Edge>] {
        &self.connections
    }

    /// The prediction to display alongside the scene.
    pub fn prediction(&self) -> &PredictionLabel {
        &self.prediction
    }

    /// The service's confidence in the prediction.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Total neuron spheres in this frame, culling applied.
    pub fn drawn_neuron_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Total line primitives in this frame.
    pub fn drawn_edge_count(&self) -> usize {
        self.connections.iter().map(Vec::len).sum()
    }
}

/// Runs layout, rendering, and pruning over one snapshot.
///
/// Layout positions come from the cache, so repeated frames over the same
/// network shape only pay for the activation-dependent work.
pub fn compose_frame(
    snapshot: &ActivationSnapshot,
    layout: &mut LayoutCache,
    render_config: &RenderConfig,
    prune_config: &PruneConfig,
) -> SceneFrame {
    let mut layers = Vec::with_capacity(snapshot.layer_count());
    for (index, layer) in snapshot.layers().iter().enumerate() {
        let positions = layout.layer(index, layer.len(), layer.kind());
        layers.push(render_layer(positions, layer, render_config));
    }

    let connections: Vec<Vec<Edge>> = snapshot
        .adjacent_layer_pairs()
        .map(|(source, target)| {
            prune_connections(source.activations(), target.activations(), prune_config)
        })
        .collect();

    let frame = SceneFrame {
        layers,
        connections,
        prediction: snapshot.prediction().clone(),
        confidence: snapshot.confidence(),
    };
    debug!(
        "[SCENE] Frame composed: {} layers, {} neurons, {} edges, prediction {}",
        frame.layers.len(),
        frame.drawn_neuron_count(),
        frame.drawn_edge_count(),
        frame.prediction
    );
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_snapshot() -> ActivationSnapshot {
        let response = serde_json::json!({
            "input_layer": [0.0, 1.0, 0.0, 0.9],
            "hidden_layer1": [0.9, 0.05, 0.5, 0.01],
            "output_layer": [0.2, 0.9, 0.1],
            "prediction": 1,
            "confidence": 0.9,
        });
        ActivationSnapshot::new_from_response_json(&response).expect("Fixture should decode")
    }

    #[test]
    fn test_frame_covers_every_layer_and_boundary() {
        let snapshot = fixture_snapshot();
        let mut layout = LayoutCache::new(Default::default());
        let frame = compose_frame(
            &snapshot,
            &mut layout,
            &RenderConfig::default(),
            &PruneConfig::default(),
        );
        assert_eq!(frame.layers().len(), 3);
        assert_eq!(frame.connections().len(), 2);
        assert_eq!(frame.prediction(), &PredictionLabel::Class(1));
        assert_eq!(frame.confidence(), 0.9);
    }

    #[test]
    fn test_input_culling_applies_in_frame() {
        let snapshot = fixture_snapshot();
        let mut layout = LayoutCache::new(Default::default());
        let frame = compose_frame(
            &snapshot,
            &mut layout,
            &RenderConfig::default(),
            &PruneConfig::default(),
        );
        // Input pixels 1 and 3 are the only ones above the render threshold
        assert_eq!(frame.layers()[0].len(), 2);
        // Hidden and output layers keep their full population
        assert_eq!(frame.layers()[1].len(), 4);
        assert_eq!(frame.layers()[2].len(), 3);
    }

    #[test]
    fn test_frames_are_reproducible() {
        let snapshot = fixture_snapshot();
        let mut layout = LayoutCache::new(Default::default());
        let render = RenderConfig::default();
        let prune = PruneConfig::default();
        let first = compose_frame(&snapshot, &mut layout, &render, &prune);
        let second = compose_frame(&snapshot, &mut layout, &render, &prune);
        assert_eq!(first.layers(), second.layers());
        assert_eq!(first.connections(), second.connections());
        assert_eq!(layout.cached_layer_count(), 3);
    }
}
