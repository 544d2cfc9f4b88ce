// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Role of a layer within the network topology.
///
/// The layout engine and the activation renderer select their packing and
/// culling rules from this kind, never from the layer's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// The pixel-input layer (laid out as a square grid mirroring the canvas)
    Input,
    /// Any intermediate layer (laid out as a bounded roughly-square grid)
    Hidden,
    /// The class-output layer (laid out as a single labeled column)
    Output,
}

/// One named layer of per-neuron activation scalars.
///
/// Activations are conventionally in `[0.0, 1.0]` but are not clamped here;
/// render policies treat them as salience values. Indices past the end of
/// the stored vector read as `0.0` so short or missing wire fields degrade
/// to inactive neurons instead of failing.
///
/// # Examples
/// ```
/// use neuroview_structures::activations::{LayerActivations, LayerKind};
///
/// let layer = LayerActivations::new("hidden_layer1", LayerKind::Hidden, vec![0.9, 0.05]);
/// assert_eq!(layer.len(), 2);
/// assert_eq!(layer.activation_or_zero(1), 0.05);
/// assert_eq!(layer.activation_or_zero(99), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerActivations {
    name: String,
    kind: LayerKind,
    activations: Vec<f32>,
}

impl LayerActivations {
    /// Creates a new layer from a name, a kind, and its activation vector.
    pub fn new(name: impl Into<String>, kind: LayerKind, activations: Vec<f32>) -> Self {
        LayerActivations {
            name: name.into(),
            kind,
            activations,
        }
    }

    /// Creates an empty layer of the given kind (used when a wire field is absent).
    pub fn new_empty(name: impl Into<String>, kind: LayerKind) -> Self {
        Self::new(name, kind, Vec::new())
    }

    /// The wire-level name of this layer (e.g. "hidden_layer1").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The topological role of this layer.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// All activation scalars, in neuron order.
    pub fn activations(&self) -> &[f32] {
        &self.activations
    }

    /// Number of neurons in this layer.
    pub fn len(&self) -> usize {
        self.activations.len()
    }

    /// True when the layer holds no neurons.
    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    /// Activation at `index`, or `0.0` when the index is past the stored vector.
    pub fn activation_or_zero(&self, index: usize) -> f32 {
        self.activations.get(index).copied().unwrap_or(0.0)
    }
}
