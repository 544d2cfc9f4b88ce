// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::activations::{LayerActivations, LayerKind, PredictionLabel};
use crate::NeuroviewError;
use tracing::warn;

const INPUT_LAYER_KEY: &str = "input_layer";
const HIDDEN_LAYER_KEY_PREFIX: &str = "hidden_layer";
const OUTPUT_LAYER_KEY: &str = "output_layer";
const PREDICTION_KEY: &str = "prediction";
const CONFIDENCE_KEY: &str = "confidence";

/// One complete set of per-layer activations for a single inference pass.
///
/// Received whole from the inference service, immutable afterwards, and
/// replaced wholesale by the next prediction (or dropped on a clear action).
/// Layers are ordered input, hidden(s), output; the hidden count varies with
/// the service version, so consumers iterate rather than address layers by
/// fixed field names.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationSnapshot {
    layers: Vec<LayerActivations>,
    prediction: PredictionLabel,
    confidence: f32,
}

impl ActivationSnapshot {
    /// Creates a snapshot from already-ordered layers.
    pub fn new(
        layers: Vec<LayerActivations>,
        prediction: PredictionLabel,
        confidence: f32,
    ) -> Self {
        ActivationSnapshot {
            layers,
            prediction,
            confidence,
        }
    }

    /// Decodes the loosely-shaped JSON object the inference service answers with.
    ///
    /// Expected fields: `input_layer`, zero or more hidden layers (either a
    /// bare `hidden_layer` on older services or numbered `hidden_layer1..N`),
    /// `output_layer`, `prediction` (number or string), and `confidence`.
    /// Missing or malformed layer fields decode as empty layers so the render
    /// pass degrades to inactive neurons instead of failing; a missing
    /// `prediction` is an error since nothing sensible can be displayed.
    ///
    /// # Examples
    /// ```
    /// use neuroview_structures::activations::ActivationSnapshot;
    ///
    /// let response = serde_json::json!({
    ///     "input_layer": [0.0, 1.0],
    ///     "hidden_layer1": [0.9, 0.05],
    ///     "output_layer": [0.1, 0.8],
    ///     "prediction": 1,
    ///     "confidence": 0.8,
    /// });
    /// let snapshot = ActivationSnapshot::new_from_response_json(&response).unwrap();
    /// assert_eq!(snapshot.layer_count(), 3);
    /// assert_eq!(snapshot.confidence(), 0.8);
    /// ```
    pub fn new_from_response_json(value: &serde_json::Value) -> Result<Self, NeuroviewError> {
        let object = value.as_object().ok_or_else(|| {
            NeuroviewError::DeserializationError(
                "Inference response must be a JSON object".into(),
            )
        })?;

        let mut layers: Vec<LayerActivations> = Vec::with_capacity(object.len());
        layers.push(decode_layer(object, INPUT_LAYER_KEY, LayerKind::Input));

        // Hidden layer keys are ordered by their numeric suffix, with the
        // legacy bare "hidden_layer" key sorting first. serde_json's map is
        // alphabetical, which would misorder hidden_layer10 vs hidden_layer2.
        let mut hidden_keys: Vec<(u32, &str)> = Vec::new();
        for key in object.keys() {
            if let Some(suffix) = key.strip_prefix(HIDDEN_LAYER_KEY_PREFIX) {
                if suffix.is_empty() {
                    hidden_keys.push((0, key));
                } else if let Ok(ordinal) = suffix.parse::<u32>() {
                    hidden_keys.push((ordinal, key));
                } else {
                    warn!("[SNAPSHOT] Ignoring unrecognized layer field '{}'", key);
                }
            }
        }
        hidden_keys.sort_unstable_by_key(|(ordinal, _)| *ordinal);
        for (_, key) in hidden_keys {
            layers.push(decode_layer(object, key, LayerKind::Hidden));
        }

        layers.push(decode_layer(object, OUTPUT_LAYER_KEY, LayerKind::Output));

        let prediction = object
            .get(PREDICTION_KEY)
            .and_then(PredictionLabel::new_from_wire_value)
            .ok_or_else(|| {
                NeuroviewError::DeserializationError(
                    "Inference response is missing a usable 'prediction' field".into(),
                )
            })?;

        let confidence = object
            .get(CONFIDENCE_KEY)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0) as f32;

        Ok(ActivationSnapshot::new(layers, prediction, confidence))
    }

    /// All layers in network order (input first, output last).
    pub fn layers(&self) -> &[LayerActivations] {
        &self.layers
    }

    /// Layer at `index` in network order, if present.
    pub fn layer(&self, index: usize) -> Option<&LayerActivations> {
        self.layers.get(index)
    }

    /// Number of layers, hidden count included.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Iterates over adjacent (source, target) layer pairs in forward order,
    /// the shape the connection pruner consumes.
    pub fn adjacent_layer_pairs(
        &self,
    ) -> impl Iterator<Item = (&LayerActivations, &LayerActivations)> {
        self.layers.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// The service's terminal classification for this pass.
    pub fn prediction(&self) -> &PredictionLabel {
        &self.prediction
    }

    /// The service's confidence in the prediction, `0.0` when unreported.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Decodes one layer field into activations, degrading absent or malformed
/// fields to an empty layer.
fn decode_layer(
    object: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    kind: LayerKind,
) -> LayerActivations {
    match object.get(key).and_then(serde_json::Value::as_array) {
        Some(entries) => {
            let activations = entries
                .iter()
                .map(|entry| entry.as_f64().unwrap_or(0.0) as f32)
                .collect();
            LayerActivations::new(key, kind, activations)
        }
        None => {
            warn!(
                "[SNAPSHOT] Response field '{}' is absent or not an array, treating as empty",
                key
            );
            LayerActivations::new_empty(key, kind)
        }
    }
}
