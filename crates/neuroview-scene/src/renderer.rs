// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use neuroview_structures::activations::{LayerActivations, LayerKind};
use neuroview_structures::geometry::{NeuronPositions, Rgb, SceneVector};
use neuroview_structures::NeuroviewError;
use serde::{Deserialize, Serialize};

/// Visual policy for mapping activations onto neuron spheres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Multiplier from activation to emissive intensity
    pub intensity_gain: f32,
    /// Activation above which a neuron shows its active color
    pub active_threshold: f32,
    /// Color of active neurons (also the emissive color)
    pub active_color: Rgb,
    /// Neutral color of inactive neurons
    pub dimmed_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            intensity_gain: 5.5,
            active_threshold: 0.1,
            active_color: Rgb::CYAN,
            dimmed_color: Rgb::CHARCOAL,
        }
    }
}

impl RenderConfig {
    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), NeuroviewError> {
        if !self.intensity_gain.is_finite() || self.intensity_gain <= 0.0 {
            return Err(NeuroviewError::BadParameters(
                "Intensity gain must be a positive finite number".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.active_threshold) {
            return Err(NeuroviewError::BadParameters(
                "Active threshold must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Everything the scene graph needs to instantiate one neuron sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronVisual {
    pub position: SceneVector,
    pub emissive_color: Rgb,
    pub emissive_intensity: f32,
    pub surface_color: Rgb,
}

/// Maps one neuron's activation onto its visual descriptor.
///
/// Emissive intensity scales continuously with the activation; the surface
/// color flips between the active and dimmed colors at the threshold,
/// giving a binary salience cue on top of the continuous glow.
pub fn render_neuron(
    position: SceneVector,
    activation: f32,
    config: &RenderConfig,
) -> NeuronVisual {
    let active = activation > config.active_threshold;
    NeuronVisual {
        position,
        emissive_color: config.active_color,
        emissive_intensity: activation * config.intensity_gain,
        surface_color: if active {
            config.active_color
        } else {
            config.dimmed_color
        },
    }
}

/// Renders every drawable neuron of one layer.
///
/// Input layers cull neurons at or below the threshold from the render set
/// entirely; with hundreds of input pixels and most of them blank, drawing
/// dimmed spheres for all of them would dominate the scene for nothing.
/// Other layer kinds keep their full population, dimmed where inactive.
/// Activations missing from a short snapshot vector read as `0.0`.
pub fn render_layer(
    positions: &NeuronPositions,
    layer: &LayerActivations,
    config: &RenderConfig,
) -> Vec<NeuronVisual> {
    let mut visuals = Vec::with_capacity(positions.len());
    for (index, position) in positions.iter().enumerate() {
        let activation = layer.activation_or_zero(index);
        if layer.kind() == LayerKind::Input && activation <= config.active_threshold {
            continue;
        }
        visuals.push(render_neuron(position, activation, config));
    }
    visuals
}
